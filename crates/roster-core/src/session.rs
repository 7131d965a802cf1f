//! Control session: the operator's state machine and the only publisher.

use std::path::Path;
use std::sync::Arc;

use roster_types::{
    Directory, Employee, LookupResult, SessionState, SyncMessage, UnitGroup, View,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{Classification, Classifier, Result, SyncBus};

/// Counts reported after a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub units: usize,
    pub employees: usize,
    pub skipped_rows: usize,
}

/// Authoritative session of the control context.
///
/// Every transition is synchronous and publishes its deltas before returning,
/// so display replicas observe transitions in the order they happened.
/// Transitions whose preconditions do not hold are no-ops and return `false`
/// (or `None`).
pub struct ControlSession {
    bus: Arc<dyn SyncBus>,
    classifier: Classifier,
    state: SessionState,
}

impl ControlSession {
    pub fn new(bus: Arc<dyn SyncBus>, classifier: Classifier) -> Self {
        info!(target: "roster::session", "Control session publishing on '{}'", bus.topic());
        Self {
            bus,
            classifier,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    /// Decode and classify an uploaded workbook, then load it.
    ///
    /// Returns `Ok(None)` outside the Upload view. A decode failure is kept
    /// as a dismissible error and otherwise leaves the state untouched.
    pub fn upload(&mut self, bytes: &[u8]) -> Result<Option<LoadSummary>> {
        self.load_with(|classifier| classifier.load(bytes))
    }

    /// Same as [`upload`](Self::upload), reading the workbook from disk.
    pub fn upload_file(&mut self, path: &Path) -> Result<Option<LoadSummary>> {
        self.load_with(|classifier| classifier.load_file(path))
    }

    fn load_with<F>(&mut self, decode: F) -> Result<Option<LoadSummary>>
    where
        F: FnOnce(&Classifier) -> Result<Classification>,
    {
        if self.state.view != View::Upload {
            debug!(target: "roster::session", "Ignoring upload outside the upload view");
            return Ok(None);
        }

        let Classification { directory, skipped } = match decode(&self.classifier) {
            Ok(classification) => classification,
            Err(e) => {
                warn!(target: "roster::session", "Upload rejected: {}", e);
                self.state.error = Some(e.to_string());
                return Err(e);
            }
        };

        let summary = LoadSummary {
            units: directory.units.len(),
            employees: directory.employees.len(),
            skipped_rows: skipped,
        };
        self.load_directory(directory);
        Ok(Some(summary))
    }

    /// Install a directory and move to Search.
    pub fn load_directory(&mut self, directory: Directory) -> bool {
        if self.state.view != View::Upload {
            return false;
        }

        info!(
            target: "roster::session",
            "Loaded directory: {} units, {} employees",
            directory.units.len(),
            directory.employees.len()
        );
        self.state.selected_unit.clear();
        self.state.serial_input.clear();
        self.state.error = None;
        self.state.directory = Some(directory.clone());
        self.publish(SyncMessage::SyncData(directory));
        self.state.view = View::Search;
        true
    }

    pub fn select_unit(&mut self, unit: impl Into<String>) {
        self.state.selected_unit = unit.into();
    }

    pub fn set_serial_input(&mut self, serial: impl Into<String>) {
        self.state.serial_input = serial.into();
    }

    /// Look up (unit, serial) and broadcast the outcome.
    ///
    /// A hit joins the roster. The outcome goes to displays and back to the
    /// caller; the control state only keeps the roster change.
    pub fn search(&mut self, unit: &str, serial: &str) -> Option<LookupResult> {
        if self.state.view != View::Search {
            return None;
        }
        let directory = self.state.directory.as_ref()?;

        let found = directory.lookup(unit, serial).cloned();
        debug!(
            target: "roster::session",
            "Search unit='{}' serial='{}': {}",
            unit,
            serial.trim(),
            if found.is_some() { "hit" } else { "miss" }
        );

        if let Some(employee) = &found {
            self.state.roster.add(employee.clone());
        }
        self.state.selected_unit = unit.to_string();
        self.state.serial_input.clear();
        self.publish(SyncMessage::UpdateResult(found.clone()));

        Some(LookupResult::from(found))
    }

    /// Search with the current inputs.
    pub fn search_current(&mut self) -> Option<LookupResult> {
        let unit = self.state.selected_unit.clone();
        let serial = self.state.serial_input.clone();
        self.search(&unit, &serial)
    }

    /// Show the final list. Requires a non-empty roster.
    ///
    /// Displays drop their overlay on the final list, so the focus closes too.
    pub fn finish(&mut self) -> bool {
        if self.state.view != View::Search || self.state.roster.is_empty() {
            return false;
        }
        self.state.view = View::Final;
        self.state.unit_detail = None;
        self.publish(SyncMessage::ShowFinalList(self.state.roster.clone()));
        true
    }

    /// Return from Final to Search. Local only.
    pub fn back_to_search(&mut self) -> bool {
        if self.state.view != View::Final {
            return false;
        }
        self.state.view = View::Search;
        true
    }

    /// Remove an employee from the roster by (unit, serial).
    ///
    /// The final list is re-broadcast even when nothing was removed. A focus
    /// open on `unit` is recomputed and closed if the unit became empty. Any
    /// open focus is re-broadcast after the list so displays keep the overlay.
    pub fn remove_from_roster(&mut self, unit: &str, serial: &str) -> bool {
        if !matches!(self.state.view, View::Search | View::Final) {
            return false;
        }

        if self.state.roster.remove(unit, serial).is_some() {
            debug!(target: "roster::session", "Removed {}/{} from roster", unit, serial);
        }

        self.publish(SyncMessage::ShowFinalList(self.state.roster.clone()));

        if let Some(focus) = self.state.unit_detail.take() {
            self.state.unit_detail = if focus.unit == unit {
                let employees = self.state.roster.members_of(unit);
                (!employees.is_empty()).then(|| UnitGroup {
                    unit: focus.unit,
                    employees,
                })
            } else {
                Some(focus)
            };
            self.publish(SyncMessage::ShowUnitList(self.state.unit_detail.clone()));
        }
        true
    }

    /// Open the unit-detail focus and broadcast it.
    pub fn show_unit_detail(&mut self, unit: &str, employees: Vec<Employee>) -> bool {
        if employees.is_empty() {
            return false;
        }
        let group = UnitGroup {
            unit: unit.to_string(),
            employees,
        };
        self.state.unit_detail = Some(group.clone());
        self.publish(SyncMessage::ShowUnitList(Some(group)));
        true
    }

    /// Open the unit-detail focus with the roster members of `unit`.
    pub fn show_unit_members(&mut self, unit: &str) -> bool {
        let employees = self.state.roster.members_of(unit);
        self.show_unit_detail(unit, employees)
    }

    /// Close the unit-detail focus. Not broadcast.
    pub fn close_unit_detail(&mut self) {
        self.state.unit_detail = None;
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    /// Drop the directory, results and roster, and return to Upload.
    pub fn reset(&mut self) {
        info!(target: "roster::session", "Session reset");
        self.state = SessionState::default();
        self.publish(SyncMessage::Reset);
    }

    fn publish(&self, message: SyncMessage) {
        self.bus.publish(message);
    }
}
