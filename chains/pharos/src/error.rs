//! Error taxonomy for ledger and rewards API operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BotError {
    /// Endpoint unreachable, handshake failed, or wrong chain
    #[error("Connection error ({endpoint}): {reason}")]
    Connection { endpoint: String, reason: String },

    /// Login rejected or no token in the response
    #[error("Authentication failed: {reason}")]
    Auth {
        reason: String,
        status: Option<u16>,
        body: Option<String>,
    },

    /// Read-only call failed
    #[error("Query '{what}' failed: {reason}")]
    Query { what: String, reason: String },

    /// Transaction rejected, reverted, dropped or timed out
    #[error("Transaction '{action}' failed: {reason}")]
    Transaction { action: String, reason: String },

    /// Secret key could not be turned into a signer
    #[error("Invalid credential: {0}")]
    Credential(String),
}

impl BotError {
    pub fn query(what: &str, reason: impl ToString) -> Self {
        BotError::Query {
            what: what.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn transaction(action: &str, reason: impl ToString) -> Self {
        BotError::Transaction {
            action: action.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn connection(endpoint: &str, reason: impl ToString) -> Self {
        BotError::Connection {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}
