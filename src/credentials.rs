use crate::callback::Callback;
use crate::error::CallbackError;
use crate::response::TransactionResponse;
use crate::signature;

/// Merchant key pair as issued by the gateway. The private key never leaves
/// the struct; both inbound verification and outbound signing go through it.
#[derive(Clone)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Signs an outbound payload string with the same construction the
    /// gateway uses for inbound callbacks.
    pub fn sign(&self, data: &str) -> String {
        signature::compute_signature(self.private_key.as_bytes(), data.as_bytes())
    }

    /// Verifies and decodes an inbound callback.
    pub fn decode(&self, callback: &Callback) -> Result<TransactionResponse, CallbackError> {
        callback.decode(self.private_key.as_bytes())
    }
}
