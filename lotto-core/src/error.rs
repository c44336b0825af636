use thiserror::Error;

use crate::models::{DRAW_SIZE, MAX_NUMBER, MIN_NUMBER, TICKET_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LottoError {
    /// More picks than a ticket can hold, counted before de-duplication.
    #[error("a ticket cannot hold more than {max} numbers (got {0})", max = TICKET_SIZE)]
    Overflow(usize),

    #[error("number {0} is out of range ({min}-{max})", min = MIN_NUMBER, max = MAX_NUMBER)]
    OutOfRange(u8),

    #[error("duplicate number: {0}")]
    Duplicate(u8),

    /// Malformed ticket or draw handed to the evaluator.
    #[error(
        "invalid input: ticket must have {ticket_size} numbers and draw must have {draw_size} numbers (got {ticket} and {draw})",
        ticket_size = TICKET_SIZE,
        draw_size = DRAW_SIZE
    )]
    InvalidInput { ticket: usize, draw: usize },

    #[error("form {0} is disabled")]
    Disabled(String),

    #[error("no form at index {0}")]
    FormIndex(usize),

    #[error("cannot parse number: '{0}'")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Accumulated money no longer fits in the counters.
    #[error("money total overflow while adding {0} won")]
    MoneyOverflow(u64),
}

pub type Result<T> = std::result::Result<T, LottoError>;
