use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use gateway_callback::signature::compute_signature;

pub const SECRET: &[u8] = b"sk_live_4f8b";

/// Builds the `(data, signature)` pair the gateway would post for `json`,
/// signed with [`SECRET`].
pub fn signed_payload(json: &str) -> (String, String) {
    signed_payload_with(SECRET, json)
}

pub fn signed_payload_with(secret: &[u8], json: &str) -> (String, String) {
    let data = BASE64.encode(json);
    let signature = compute_signature(secret, data.as_bytes());
    (data, signature)
}
