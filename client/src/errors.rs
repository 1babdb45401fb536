//! Error taxonomy for calls against the finance service.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Network unreachable, non-JSON body or a body that does not match the contract
    #[error("connection error: {0}")]
    Connection(String),

    /// The service answered `success: false`; the message is shown as-is
    #[error("{0}")]
    Rejected(String),

    #[error("not logged in")]
    NotAuthenticated,

    #[error("category {0} is not an expense category")]
    InvalidBudgetCategory(i64),
}

impl ClientError {
    /// Build a rejection from an optional service message
    pub fn rejected(message: Option<String>, fallback: &str) -> Self {
        ClientError::Rejected(message.unwrap_or_else(|| fallback.to_string()))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Connection(error.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
