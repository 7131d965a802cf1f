//! Error types for the roster presenter.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    /// Workbook bytes could not be read as a spreadsheet.
    #[error("Cannot decode workbook: {0}")]
    Decode(String),

    #[error("Sync channel closed")]
    ChannelClosed,

    #[error("Sync subscriber lagged behind by {0} messages")]
    Lagged(u64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
