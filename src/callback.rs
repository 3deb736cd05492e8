use crate::error::CallbackError;
use crate::response::TransactionResponse;
use serde::Deserialize;

/// The two transport fields of an inbound gateway callback, as posted by
/// the gateway. Field names match the wire contract, whether the transport
/// layer hands them over as form fields or a JSON body.
#[derive(Debug, Clone, Deserialize)]
pub struct Callback {
    pub data: String,
    pub signature: String,
}

impl Callback {
    /// Verifies and decodes the callback against the merchant secret.
    pub fn decode(&self, secret: &[u8]) -> Result<TransactionResponse, CallbackError> {
        TransactionResponse::decode(&self.data, &self.signature, secret)
    }
}
