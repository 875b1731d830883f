//! Errors raised by gameplay operations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// Purchase denied. Nothing was changed.
    #[error("need {cost} Scrap, have {}", .balance.trunc())]
    InsufficientFunds { cost: f64, balance: f64 },
    #[error("unknown upgrade id: {0}")]
    UnknownUpgrade(String),
    #[error("unknown task id: {0}")]
    UnknownTask(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_message_truncates_balance() {
        let e = GameError::InsufficientFunds {
            cost: 16.0,
            balance: 12.7,
        };
        assert_eq!(e.to_string(), "need 16 Scrap, have 12");
    }

    #[test]
    fn unknown_id_messages() {
        assert_eq!(
            GameError::UnknownUpgrade("x".into()).to_string(),
            "unknown upgrade id: x"
        );
        assert_eq!(
            GameError::UnknownTask("y".into()).to_string(),
            "unknown task id: y"
        );
    }
}
