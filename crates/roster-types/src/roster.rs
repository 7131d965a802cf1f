//! Operator-curated selection of employees.

use serde::{Deserialize, Serialize};

use crate::{Employee, UnitGroup};

/// Ordered set of selected employees, unique on (unit, serial).
///
/// Serialized as a plain JSON array. Deserializing drops repeated keys so the
/// uniqueness invariant holds for rosters received over the wire too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Employee>", into = "Vec<Employee>")]
pub struct SelectionRoster {
    entries: Vec<Employee>,
}

impl SelectionRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an employee. Returns `false` if its key was already present.
    pub fn add(&mut self, employee: Employee) -> bool {
        if self.contains(&employee.unit, &employee.serial) {
            return false;
        }
        self.entries.push(employee);
        true
    }

    /// Remove by compound key. Returns the removed record, if any.
    pub fn remove(&mut self, unit: &str, serial: &str) -> Option<Employee> {
        let index = self.entries.iter().position(|e| e.matches(unit, serial))?;
        Some(self.entries.remove(index))
    }

    pub fn contains(&self, unit: &str, serial: &str) -> bool {
        self.entries.iter().any(|e| e.matches(unit, serial))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Employee] {
        &self.entries
    }

    /// Members of one unit, in insertion order.
    pub fn members_of(&self, unit: &str) -> Vec<Employee> {
        self.entries
            .iter()
            .filter(|e| e.unit == unit)
            .cloned()
            .collect()
    }

    /// Group by unit: groups appear in the order their first member was
    /// added, members keep insertion order within each group.
    pub fn grouped(&self) -> Vec<UnitGroup> {
        let mut groups: Vec<UnitGroup> = Vec::new();
        for employee in &self.entries {
            match groups.iter_mut().find(|g| g.unit == employee.unit) {
                Some(group) => group.employees.push(employee.clone()),
                None => groups.push(UnitGroup {
                    unit: employee.unit.clone(),
                    employees: vec![employee.clone()],
                }),
            }
        }
        groups
    }
}

impl From<Vec<Employee>> for SelectionRoster {
    fn from(employees: Vec<Employee>) -> Self {
        let mut roster = SelectionRoster::new();
        for employee in employees {
            roster.add(employee);
        }
        roster
    }
}

impl From<SelectionRoster> for Vec<Employee> {
    fn from(roster: SelectionRoster) -> Self {
        roster.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(unit: &str, serial: &str) -> Employee {
        Employee {
            unit: unit.to_string(),
            serial: serial.to_string(),
            full_name: format!("{unit}-{serial}"),
            job_title: String::new(),
        }
    }

    #[test]
    fn test_add_is_idempotent_per_key() {
        let mut roster = SelectionRoster::new();
        assert!(roster.add(employee("A", "1")));
        assert!(!roster.add(employee("A", "1")));
        assert_eq!(roster.len(), 1);

        // Same serial in another unit is a different key
        assert!(roster.add(employee("B", "1")));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut roster = SelectionRoster::from(vec![employee("A", "1")]);
        assert!(roster.remove("A", "2").is_none());
        assert!(roster.remove("B", "1").is_none());
        assert_eq!(roster.len(), 1);

        assert!(roster.remove("A", "1").is_some());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_grouped_preserves_orders() {
        let roster = SelectionRoster::from(vec![
            employee("B", "2"),
            employee("A", "1"),
            employee("B", "1"),
            employee("A", "3"),
        ]);

        let groups = roster.grouped();
        let units: Vec<_> = groups.iter().map(|g| g.unit.as_str()).collect();
        assert_eq!(units, vec!["B", "A"]);

        let b: Vec<_> = groups[0].employees.iter().map(|e| e.serial.as_str()).collect();
        assert_eq!(b, vec!["2", "1"]);
        let a: Vec<_> = groups[1].employees.iter().map(|e| e.serial.as_str()).collect();
        assert_eq!(a, vec!["1", "3"]);
    }

    #[test]
    fn test_deserialize_drops_duplicate_keys() {
        let json = r#"[
            {"unit":"A","serial":"1","fullName":"x","jobTitle":""},
            {"unit":"A","serial":"1","fullName":"y","jobTitle":""}
        ]"#;
        let roster: SelectionRoster = serde_json::from_str(json).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.as_slice()[0].full_name, "x");
    }
}
