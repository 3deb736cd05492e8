use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use sha1::{Digest, Sha1};

/// Computes `base64(sha1(secret || data || secret))`.
///
/// The secret sandwich is the gateway's authentication construction. The
/// signature covers the still-base64-encoded payload string, never the
/// decoded JSON. The same construction signs outbound requests.
pub fn compute_signature(secret: &[u8], data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(secret);
    hasher.update(data);
    hasher.update(secret);
    // Line-wrapping encoders on the gateway side append a trailing newline;
    // the wire value never carries it.
    BASE64.encode(hasher.finalize()).trim_end().to_string()
}

/// Exact, case-sensitive comparison of `claimed` against the recomputed
/// signature for `data`.
pub fn verify(secret: &[u8], data: &[u8], claimed: &str) -> bool {
    compute_signature(secret, data) == claimed
}
