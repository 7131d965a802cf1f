//! Session types and view state machine.

use serde::{Deserialize, Serialize};

use crate::{Directory, SelectionRoster, UnitGroup};

/// Which side of the sync channel a browsing context is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Operator screen. Owns the session and is the only publisher.
    Control,
    /// Audience screen. Follows control broadcasts, never publishes.
    Display,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Control => f.write_str("control"),
            Role::Display => f.write_str("display"),
        }
    }
}

/// Primary view.
///
/// The control context only ever shows `Upload`, `Search` and `Final`;
/// `Result` exists only on display replicas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Upload,
    Search,
    Result,
    Final,
}

/// Full state of the control context.
///
/// Search outcomes are not part of it; they only reach display replicas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub view: View,
    pub directory: Option<Directory>,
    pub selected_unit: String,
    pub serial_input: String,
    pub roster: SelectionRoster,
    /// Unit-detail focus opened by the operator.
    pub unit_detail: Option<UnitGroup>,
    /// Dismissible message from the last failed upload.
    pub error: Option<String>,
}

impl SessionState {
    pub fn has_directory(&self) -> bool {
        self.directory.is_some()
    }
}
