//! Dispatch of operator commands onto the control session.

use roster_core::ControlSession;
use roster_types::ControlCommand;
use tracing::debug;

/// Apply one command. Returns `false` when its preconditions did not hold
/// and the session was left as it was.
pub fn execute(session: &mut ControlSession, command: ControlCommand) -> bool {
    let applied = match &command {
        ControlCommand::SelectUnit { unit } => {
            session.select_unit(unit.clone());
            true
        }
        ControlCommand::SetSerial { serial } => {
            session.set_serial_input(serial.clone());
            true
        }
        ControlCommand::Search { unit, serial } => session.search(unit, serial).is_some(),
        ControlCommand::SearchCurrent => session.search_current().is_some(),
        ControlCommand::Finish => session.finish(),
        ControlCommand::BackToSearch => session.back_to_search(),
        ControlCommand::Remove { unit, serial } => session.remove_from_roster(unit, serial),
        ControlCommand::ShowUnitDetail { unit } => session.show_unit_members(unit),
        ControlCommand::CloseUnitDetail => {
            session.close_unit_detail();
            true
        }
        ControlCommand::Reset => {
            session.reset();
            true
        }
        ControlCommand::DismissError => {
            session.dismiss_error();
            true
        }
        ControlCommand::GetState => true,
    };

    if !applied {
        debug!(target: "roster::session", "Ignored {:?} in {:?} view", command, session.view());
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{Classifier, LocalBus};
    use roster_types::{Directory, Employee, View};
    use std::sync::Arc;

    fn session() -> ControlSession {
        let mut session = ControlSession::new(Arc::new(LocalBus::default()), Classifier::default());
        session.load_directory(Directory {
            units: vec!["Unit A".into()],
            employees: vec![Employee {
                unit: "Unit A".into(),
                serial: "1".into(),
                full_name: "Alice".into(),
                job_title: "Auditor".into(),
            }],
        });
        session
    }

    #[test]
    fn test_input_commands_then_search_current() {
        let mut session = session();
        assert!(execute(&mut session, ControlCommand::SelectUnit { unit: "Unit A".into() }));
        assert!(execute(&mut session, ControlCommand::SetSerial { serial: " 1".into() }));
        assert!(execute(&mut session, ControlCommand::SearchCurrent));
        assert_eq!(session.state().roster.len(), 1);
    }

    #[test]
    fn test_guarded_commands_report_noop() {
        let mut session = session();
        assert!(!execute(&mut session, ControlCommand::Finish));
        assert!(!execute(&mut session, ControlCommand::BackToSearch));
        assert!(!execute(&mut session, ControlCommand::ShowUnitDetail { unit: "Unit A".into() }));
        assert_eq!(session.view(), View::Search);

        assert!(execute(&mut session, ControlCommand::Reset));
        assert!(!execute(&mut session, ControlCommand::Search {
            unit: "Unit A".into(),
            serial: "1".into()
        }));
        assert_eq!(session.view(), View::Upload);
    }
}
