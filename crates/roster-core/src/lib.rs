//! Core classification, session and sync logic for the roster presenter.

mod bus;
mod classifier;
mod error;
mod export;
mod replica;
mod session;

pub use bus::{LocalBus, Subscription, SyncBus, DEFAULT_CHANNEL_CAPACITY, DEFAULT_TOPIC};
pub use classifier::{Classification, Classifier, DEFAULT_UNIT_LABEL};
pub use error::RosterError;
pub use export::{export_file_name, export_rows, ExportHeaders, ExportSheet, EXPORT_SHEET_NAME};
pub use replica::{DisplayReplica, ReplicaState};
pub use session::{ControlSession, LoadSummary};

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
