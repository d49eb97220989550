use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single backend query.
///
/// The variants exist for logs and for a future split into network /
/// server / not-found once the backend exposes error codes; the user sees
/// one undifferentiated message regardless.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum QueryError {
    #[error("invalid search input: {0}")]
    InvalidInput(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unreadable response: {0}")]
    BadResponse(String),
}

impl QueryError {
    #[must_use]
    pub fn transport(err: &crux_http::Error) -> Self {
        Self::Transport(err.to_string())
    }

    #[must_use]
    pub const fn user_facing_message(&self) -> &'static str {
        // Deliberately uniform: the backend gives us nothing to
        // distinguish a bad ID from a dead connection.
        "Search failed. Check the ID or your connection."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_uniform() {
        let errors = [
            QueryError::InvalidInput("farm id is empty".into()),
            QueryError::Transport("connection refused".into()),
            QueryError::BadResponse("not json".into()),
        ];
        let messages: Vec<_> = errors.iter().map(QueryError::user_facing_message).collect();
        assert!(messages.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = QueryError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
