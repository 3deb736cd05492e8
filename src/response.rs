use crate::error::CallbackError;
use crate::payload::Payload;
use crate::signature;
use rust_decimal::Decimal;

/// Transaction outcome as reported by the gateway. Values outside the
/// documented set are gateway-defined and preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Failure,
    Success,
    /// Successful, but the card was not yet known to the gateway.
    WaitSecure,
    /// Completed against the gateway's test mode.
    Sandbox,
    Other(String),
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        match value {
            "failure" => Status::Failure,
            "success" => Status::Success,
            "wait_secure" => Status::WaitSecure,
            "sandbox" => Status::Sandbox,
            other => Status::Other(other.to_string()),
        }
    }
}

impl Status {
    /// The wire spelling of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Failure => "failure",
            Status::Success => "success",
            Status::WaitSecure => "wait_secure",
            Status::Sandbox => "sandbox",
            Status::Other(value) => value,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success | Status::WaitSecure | Status::Sandbox)
    }
}

/// A decoded gateway callback whose signature has been verified.
///
/// [`TransactionResponse::decode`] is the only way to obtain one; no record
/// ever exists for a payload that failed verification, and the record does
/// not change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionResponse {
    public_key: Option<String>,
    order_id: Option<String>,
    amount: Option<Decimal>,
    currency: Option<String>,
    description: Option<String>,
    r#type: Option<String>,
    status: Option<Status>,
    transaction_id: Option<String>,
    sender_phone: Option<String>,
    action: String,
    sandbox: i64,
    sender_commission: Option<Decimal>,
    receiver_commission: Option<Decimal>,
    agent_commission: Option<Decimal>,
}

impl TransactionResponse {
    /// Verifies `signature` against the still-encoded `data` string and
    /// decodes the payload.
    ///
    /// Verification happens before any parsing; a mismatch is the only
    /// error. An authentically signed payload that fails to decode yields a
    /// record with every field absent or defaulted rather than an error.
    pub fn decode(data: &str, signature: &str, secret: &[u8]) -> Result<Self, CallbackError> {
        if !signature::verify(secret, data.as_bytes(), signature) {
            return Err(CallbackError::InvalidResponse);
        }
        Ok(Self::from_payload(&Payload::from_base64(data)))
    }

    fn from_payload(payload: &Payload) -> Self {
        Self {
            public_key: payload.str_field("public_key"),
            order_id: payload.str_field("order_id"),
            amount: payload.decimal_field("amount"),
            currency: payload.str_field("currency"),
            description: payload.str_field("description"),
            r#type: payload.str_field("type"),
            status: payload.str_field("status").map(|s| Status::from(s.as_str())),
            transaction_id: payload.str_field("transaction_id"),
            sender_phone: payload.str_field("sender_phone"),
            action: payload.str_field_or("action", "pay"),
            sandbox: payload.int_field_or("sandbox", 1),
            sender_commission: payload.decimal_field("sender_commission"),
            receiver_commission: payload.decimal_field("receiver_commission"),
            agent_commission: payload.decimal_field("agent_commission"),
        }
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// Amount of the payment. MUST match the amount that was requested;
    /// comparing the two is the caller's responsibility.
    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    /// Currency of the payment. MUST match the requested currency.
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn r#type(&self) -> Option<&str> {
        self.r#type.as_deref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// The gateway's internal transaction ID. Absent for failed transactions.
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    /// Payer's phone.
    pub fn sender_phone(&self) -> Option<&str> {
        self.sender_phone.as_deref()
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Gateway test-mode flag. `1` unless the payload explicitly carried
    /// another value.
    pub fn sandbox(&self) -> i64 {
        self.sandbox
    }

    pub fn sender_commission(&self) -> Option<Decimal> {
        self.sender_commission
    }

    pub fn receiver_commission(&self) -> Option<Decimal> {
        self.receiver_commission
    }

    pub fn agent_commission(&self) -> Option<Decimal> {
        self.agent_commission
    }

    /// True if the transaction went through: `success`, `wait_secure` or
    /// `sandbox`. `failure`, unrecognized statuses and a missing status all
    /// count as non-success.
    pub fn is_success(&self) -> bool {
        self.status.as_ref().is_some_and(Status::is_success)
    }

    /// Total of the extra fees the gateway reported. Absent when no
    /// commission field was present at all; a reported zero stays zero.
    pub fn commissions(&self) -> Option<Decimal> {
        [
            self.sender_commission,
            self.receiver_commission,
            self.agent_commission,
        ]
        .into_iter()
        .flatten()
        .reduce(|total, fee| total + fee)
    }

    /// The canonical field sequence for recomputing a signature from an
    /// already-decoded response. The order is part of the wire contract.
    pub fn signature_fields(&self) -> [Option<String>; 9] {
        [
            self.amount.map(|amount| amount.to_string()),
            self.currency.clone(),
            self.public_key.clone(),
            self.order_id.clone(),
            self.r#type.clone(),
            self.description.clone(),
            self.status.as_ref().map(|status| status.as_str().to_string()),
            self.transaction_id.clone(),
            self.sender_phone.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
    use rust_decimal_macros::dec;

    const SECRET: &[u8] = b"test_private_key";

    fn decode_json(json: &str) -> TransactionResponse {
        let data = BASE64.encode(json);
        let signature = signature::compute_signature(SECRET, data.as_bytes());
        TransactionResponse::decode(&data, &signature, SECRET).unwrap()
    }

    #[test]
    fn test_status_from_wire_value() {
        assert_eq!(Status::from("success"), Status::Success);
        assert_eq!(Status::from("wait_secure"), Status::WaitSecure);
        assert_eq!(Status::from("sandbox"), Status::Sandbox);
        assert_eq!(Status::from("failure"), Status::Failure);
        assert_eq!(
            Status::from("3ds_verify"),
            Status::Other("3ds_verify".to_string())
        );
    }

    #[test]
    fn test_status_round_trips_through_as_str() {
        for value in ["failure", "success", "wait_secure", "sandbox", "3ds_verify"] {
            assert_eq!(Status::from(value).as_str(), value);
        }
    }

    #[test]
    fn test_decode_rejects_mismatched_signature() {
        let data = BASE64.encode(r#"{"status":"success"}"#);
        let result = TransactionResponse::decode(&data, "bogus", SECRET);
        assert!(matches!(result, Err(CallbackError::InvalidResponse)));
    }

    #[test]
    fn test_decode_populates_fields() {
        let response = decode_json(
            r#"{"public_key":"i000000000","order_id":"X1","amount":"10.00","currency":"USD","description":"subscription","type":"buy","status":"success","transaction_id":"42","sender_phone":"+380001112233"}"#,
        );
        assert_eq!(response.public_key(), Some("i000000000"));
        assert_eq!(response.order_id(), Some("X1"));
        assert_eq!(response.amount(), Some(dec!(10.00)));
        assert_eq!(response.currency(), Some("USD"));
        assert_eq!(response.description(), Some("subscription"));
        assert_eq!(response.r#type(), Some("buy"));
        assert_eq!(response.status(), Some(&Status::Success));
        assert_eq!(response.transaction_id(), Some("42"));
        assert_eq!(response.sender_phone(), Some("+380001112233"));
    }

    #[test]
    fn test_decode_applies_defaults() {
        let response = decode_json(r#"{"status":"success"}"#);
        assert_eq!(response.action(), "pay");
        assert_eq!(response.sandbox(), 1);
    }

    #[test]
    fn test_explicit_sandbox_zero_is_honored() {
        let response = decode_json(r#"{"status":"success","sandbox":0}"#);
        assert_eq!(response.sandbox(), 0);
    }

    #[test]
    fn test_commissions_sum_present_fields_only() {
        let response = decode_json(
            r#"{"sender_commission":"1.5","agent_commission":"0.25"}"#,
        );
        assert_eq!(response.commissions(), Some(dec!(1.75)));
    }

    #[test]
    fn test_commissions_absent_when_none_reported() {
        let response = decode_json(r#"{"status":"success"}"#);
        assert_eq!(response.commissions(), None);
    }

    #[test]
    fn test_commissions_reported_zero_stays_zero() {
        let response = decode_json(r#"{"sender_commission":"0"}"#);
        assert_eq!(response.commissions(), Some(dec!(0)));
    }

    #[test]
    fn test_signature_fields_order() {
        let response = decode_json(
            r#"{"public_key":"pk","order_id":"X1","amount":"10.00","currency":"USD","description":"d","type":"buy","status":"success","transaction_id":"42","sender_phone":"+380001112233"}"#,
        );
        assert_eq!(
            response.signature_fields(),
            [
                Some("10.00".to_string()),
                Some("USD".to_string()),
                Some("pk".to_string()),
                Some("X1".to_string()),
                Some("buy".to_string()),
                Some("d".to_string()),
                Some("success".to_string()),
                Some("42".to_string()),
                Some("+380001112233".to_string()),
            ]
        );
    }

    #[test]
    fn test_signature_fields_keep_absent_positions() {
        let response = decode_json(r#"{"currency":"USD"}"#);
        let fields = response.signature_fields();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[1], Some("USD".to_string()));
        for (i, field) in fields.iter().enumerate() {
            if i != 1 {
                assert_eq!(*field, None, "position {i}");
            }
        }
    }
}
