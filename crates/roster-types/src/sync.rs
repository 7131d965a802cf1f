//! Messages carried from the control context to display replicas.

use serde::{Deserialize, Serialize};

use crate::{Directory, Employee, SelectionRoster, UnitGroup};

/// State delta broadcast on the sync channel.
///
/// Wire form is `{"type": "SYNC_DATA", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncMessage {
    /// A freshly classified directory.
    SyncData(Directory),
    /// Search outcome; `None` means nothing matched.
    UpdateResult(Option<Employee>),
    /// Back to the initial state.
    Reset,
    /// The selection roster, shown as the final list.
    ShowFinalList(SelectionRoster),
    /// Open (or with `None`, close) the unit-detail overlay.
    ShowUnitList(Option<UnitGroup>),
}

impl SyncMessage {
    /// Decode a wire frame.
    ///
    /// Unknown tags and malformed payloads yield `None`.
    pub fn decode(frame: &str) -> Option<Self> {
        match serde_json::from_str::<SyncMessage>(frame) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::debug!(target: "roster::sync", "Ignoring undecodable sync frame: {}", e);
                None
            }
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Wire tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncMessage::SyncData(_) => "SYNC_DATA",
            SyncMessage::UpdateResult(_) => "UPDATE_RESULT",
            SyncMessage::Reset => "RESET",
            SyncMessage::ShowFinalList(_) => "SHOW_FINAL_LIST",
            SyncMessage::ShowUnitList(_) => "SHOW_UNIT_LIST",
        }
    }
}
