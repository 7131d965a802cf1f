//! Display replica: a follower that folds sync messages into local state.

use std::sync::Arc;

use roster_types::{
    Directory, LookupResult, Screen, SelectionRoster, SyncMessage, UnitGroup, View,
};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::{Result, RosterError, Subscription, SyncBus};

/// State of a display context.
///
/// Mutated only by [`ReplicaState::apply`]; the fold is deterministic, so two
/// replicas that saw the same messages are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplicaState {
    pub view: View,
    pub directory: Option<Directory>,
    pub last_result: Option<LookupResult>,
    pub roster: SelectionRoster,
    /// Overlay, independent of `view`.
    pub unit_detail: Option<UnitGroup>,
}

impl ReplicaState {
    /// Apply one message.
    pub fn apply(&mut self, message: &SyncMessage) {
        match message {
            SyncMessage::SyncData(directory) => {
                self.directory = Some(directory.clone());
                self.last_result = None;
                self.view = View::Upload;
            }
            SyncMessage::UpdateResult(employee) => {
                self.last_result = Some(LookupResult::from(employee.clone()));
                self.view = View::Result;
            }
            SyncMessage::Reset => {
                *self = ReplicaState::default();
            }
            SyncMessage::ShowFinalList(roster) => {
                self.roster = roster.clone();
                self.unit_detail = None;
                self.view = View::Final;
            }
            SyncMessage::ShowUnitList(group) => {
                self.unit_detail = group.clone();
            }
        }
    }

    /// Shortest message sequence that rebuilds this state on a fresh replica.
    ///
    /// Sent to subscribers that attach after the fact.
    pub fn replay(&self) -> Vec<SyncMessage> {
        let mut messages = Vec::new();
        if let Some(directory) = &self.directory {
            messages.push(SyncMessage::SyncData(directory.clone()));
        }

        let roster = || SyncMessage::ShowFinalList(self.roster.clone());
        match self.view {
            View::Upload | View::Search => {
                // Upload with a roster implies a directory: only SYNC_DATA
                // returns to Upload without resetting.
                if !self.roster.is_empty() {
                    if let Some(directory) = &self.directory {
                        messages.push(roster());
                        messages.push(SyncMessage::SyncData(directory.clone()));
                    }
                }
            }
            View::Result => {
                if !self.roster.is_empty() {
                    messages.push(roster());
                }
                let result = self.last_result.as_ref().and_then(|r| r.employee().cloned());
                messages.push(SyncMessage::UpdateResult(result));
            }
            View::Final => {
                if let Some(result) = &self.last_result {
                    messages.push(SyncMessage::UpdateResult(result.clone().into()));
                }
                messages.push(roster());
            }
        }

        if let Some(group) = &self.unit_detail {
            messages.push(SyncMessage::ShowUnitList(Some(group.clone())));
        }
        messages
    }

    /// Resolve what to render. The overlay wins over the primary view.
    pub fn screen(&self) -> Screen {
        if let Some(group) = &self.unit_detail {
            return Screen::UnitDetail {
                group: group.clone(),
            };
        }

        match (self.view, &self.last_result) {
            (View::Final, _) => Screen::Final {
                total: self.roster.len(),
                groups: self.roster.grouped(),
            },
            (View::Result, Some(LookupResult::Found(employee))) => Screen::Result {
                employee: employee.clone(),
            },
            (View::Result, Some(LookupResult::NotFound)) => Screen::NotFound,
            _ => Screen::Idle,
        }
    }
}

/// A display context attached to a sync bus.
///
/// Holds its own copy of the state and never publishes.
pub struct DisplayReplica {
    bus: Arc<dyn SyncBus>,
    subscription: Subscription,
    state: ReplicaState,
}

impl DisplayReplica {
    /// Subscribe to the bus. Any backlog is applied by the first receive.
    pub fn attach(bus: Arc<dyn SyncBus>) -> Self {
        let subscription = bus.subscribe();
        info!(target: "roster::display", "Display replica attached to '{}'", bus.topic());
        Self {
            bus,
            subscription,
            state: ReplicaState::default(),
        }
    }

    pub fn state(&self) -> &ReplicaState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    /// Wait for the next message, apply it and return it.
    ///
    /// A replica that fell behind the channel drops its state and
    /// resubscribes, which replays a fresh snapshot.
    pub async fn next(&mut self) -> Result<SyncMessage> {
        loop {
            match self.subscription.recv().await {
                Ok(message) => {
                    self.apply(&message);
                    return Ok(message);
                }
                Err(RosterError::Lagged(missed)) => {
                    warn!(
                        target: "roster::display",
                        "Display replica missed {} messages, resynchronizing", missed
                    );
                    self.resync();
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Apply every message that is already available without waiting.
    pub fn drain(&mut self) -> Result<usize> {
        let mut applied = 0;
        loop {
            match self.subscription.try_recv() {
                Ok(Some(message)) => {
                    self.apply(&message);
                    applied += 1;
                }
                Ok(None) => return Ok(applied),
                Err(RosterError::Lagged(_)) => self.resync(),
                Err(e) => return Err(e),
            }
        }
    }

    fn apply(&mut self, message: &SyncMessage) {
        trace!(target: "roster::display", "Applying {}", message.kind());
        self.state.apply(message);
    }

    fn resync(&mut self) {
        self.state = ReplicaState::default();
        self.subscription = self.bus.subscribe();
        debug!(target: "roster::display", "Display replica resubscribed");
    }
}
