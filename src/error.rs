use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("response signature does not match payload")]
    InvalidResponse,
}
