//! Personnel directory produced by classifying a spreadsheet.

use serde::{Deserialize, Serialize};

/// Label shown in place of an empty job title.
pub const FALLBACK_JOB_TITLE: &str = "Cán bộ";

/// A single personnel record.
///
/// `serial` is only unique within its `unit`, and is compared as an exact
/// string ("01" and "1" are different serials).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub unit: String,
    pub serial: String,
    pub full_name: String,
    #[serde(default)]
    pub job_title: String,
}

impl Employee {
    /// Whether this record has the given compound key.
    pub fn matches(&self, unit: &str, serial: &str) -> bool {
        self.unit == unit && self.serial == serial
    }

    /// Whether two records share the same (unit, serial) key.
    pub fn same_key(&self, other: &Employee) -> bool {
        self.matches(&other.unit, &other.serial)
    }

    /// Job title, or the fallback label when the sheet left it blank.
    pub fn display_title(&self) -> &str {
        if self.job_title.is_empty() {
            FALLBACK_JOB_TITLE
        } else {
            &self.job_title
        }
    }
}

/// Validated personnel dataset.
///
/// Built once per upload and replaced wholesale on the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Unit labels in first-seen order, without duplicates.
    pub units: Vec<String>,
    /// Employees in spreadsheet row order.
    pub employees: Vec<Employee>,
}

impl Directory {
    /// Find the employee with exactly this unit and serial.
    ///
    /// The serial is trimmed before comparison; the unit is not.
    pub fn lookup(&self, unit: &str, serial: &str) -> Option<&Employee> {
        let serial = serial.trim();
        self.employees.iter().find(|e| e.matches(unit, serial))
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// Outcome of a search. A miss is a normal, renderable result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "employee", rename_all = "snake_case")]
pub enum LookupResult {
    Found(Employee),
    NotFound,
}

impl LookupResult {
    pub fn employee(&self) -> Option<&Employee> {
        match self {
            LookupResult::Found(employee) => Some(employee),
            LookupResult::NotFound => None,
        }
    }
}

impl From<Option<Employee>> for LookupResult {
    fn from(value: Option<Employee>) -> Self {
        match value {
            Some(employee) => LookupResult::Found(employee),
            None => LookupResult::NotFound,
        }
    }
}

impl From<LookupResult> for Option<Employee> {
    fn from(value: LookupResult) -> Self {
        match value {
            LookupResult::Found(employee) => Some(employee),
            LookupResult::NotFound => None,
        }
    }
}

/// One unit together with an ordered list of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitGroup {
    pub unit: String,
    pub employees: Vec<Employee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(unit: &str, serial: &str, name: &str) -> Employee {
        Employee {
            unit: unit.to_string(),
            serial: serial.to_string(),
            full_name: name.to_string(),
            job_title: String::new(),
        }
    }

    #[test]
    fn test_lookup_trims_serial_only() {
        let directory = Directory {
            units: vec!["Unit A".into()],
            employees: vec![employee("Unit A", "3", "Carol")],
        };

        assert_eq!(directory.lookup("Unit A", " 3 ").map(|e| e.full_name.as_str()), Some("Carol"));
        assert!(directory.lookup(" Unit A", "3").is_none());
    }

    #[test]
    fn test_lookup_is_string_exact() {
        let directory = Directory {
            units: vec!["Unit A".into()],
            employees: vec![employee("Unit A", "1", "Alice")],
        };

        assert!(directory.lookup("Unit A", "01").is_none());
        assert!(directory.lookup("Unit A", "1.0").is_none());
    }

    #[test]
    fn test_display_title_fallback() {
        let mut e = employee("U", "1", "Alice");
        assert_eq!(e.display_title(), FALLBACK_JOB_TITLE);
        e.job_title = "Auditor".into();
        assert_eq!(e.display_title(), "Auditor");
    }

    #[test]
    fn test_employee_wire_names() {
        let e = employee("U", "1", "Alice");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["fullName"], "Alice");
        assert_eq!(json["jobTitle"], "");
    }
}
