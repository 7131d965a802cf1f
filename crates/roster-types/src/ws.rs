//! WebSocket message protocol between browsing contexts and the server.

use serde::{Deserialize, Serialize};

use crate::{Employee, SessionState, SyncMessage, UnitGroup};

/// Commands sent by a control context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Pick the unit for the next search.
    SelectUnit { unit: String },
    /// Update the raw serial input.
    SetSerial { serial: String },
    /// Search with explicit inputs.
    Search { unit: String, serial: String },
    /// Search with the current unit and serial inputs.
    SearchCurrent,
    /// Close selection and show the final list.
    Finish,
    /// Return from the final list to searching.
    BackToSearch,
    /// Drop one employee from the roster.
    Remove { unit: String, serial: String },
    /// Open the unit-detail overlay for a unit of the roster.
    ShowUnitDetail { unit: String },
    /// Close the unit-detail overlay (control only).
    CloseUnitDetail,
    /// Discard everything and return to upload.
    Reset,
    /// Clear the last upload error.
    DismissError,
    /// Request current session state.
    GetState,
}

impl ControlCommand {
    /// Decode a command frame. Unknown commands yield `None`.
    pub fn decode(frame: &str) -> Option<Self> {
        match serde_json::from_str::<ControlCommand>(frame) {
            Ok(command) => Some(command),
            Err(e) => {
                tracing::debug!(target: "roster::ws", "Ignoring undecodable control frame: {}", e);
                None
            }
        }
    }
}

/// Frames sent from the server to a control context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlFrame {
    /// Session state after a command was applied.
    State { state: Box<SessionState> },
    /// Error occurred.
    Error { message: String },
}

/// What a display context should render, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    /// Waiting for the control context.
    Idle,
    /// A search hit.
    Result { employee: Employee },
    /// A search miss.
    NotFound,
    /// The final list, grouped by unit.
    Final { total: usize, groups: Vec<UnitGroup> },
    /// Unit-detail overlay; shadows whatever primary view is active.
    UnitDetail { group: UnitGroup },
}

/// Frames sent from the server to a display context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayFrame {
    /// The message just applied, absent for the initial frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<SyncMessage>,
    pub screen: Screen,
}
