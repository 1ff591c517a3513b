//! Единый тип ошибок публичного API.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CashioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Amount cannot be negative: {0}")]
    InvalidAmount(Decimal),

    #[error("Balance overflow: {balance} + {amount}")]
    Overflow { balance: Decimal, amount: Decimal },

    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

pub type Result<T> = std::result::Result<T, CashioError>;
