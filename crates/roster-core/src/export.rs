//! Tabular export of the selection roster.
//!
//! Produces the rows of the downloadable sheet. Serializing them into a
//! spreadsheet file is left to the client.

use chrono::NaiveDate;
use roster_types::SelectionRoster;
use serde::Serialize;

/// Sheet name used for exported rosters.
pub const EXPORT_SHEET_NAME: &str = "Danh sách đã chọn";

/// Column captions for the member rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportHeaders {
    pub serial: String,
    pub full_name: String,
    pub job_title: String,
}

impl Default for ExportHeaders {
    fn default() -> Self {
        Self {
            serial: "STT".to_string(),
            full_name: "Họ và tên".to_string(),
            job_title: "Chức danh".to_string(),
        }
    }
}

/// A ready-to-write sheet.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSheet {
    pub file_name: String,
    pub sheet_name: String,
    pub rows: Vec<Vec<String>>,
}

/// Lay out the roster as rows, one block per unit:
/// the unit label, the header row, its members, then a blank row.
pub fn export_rows(roster: &SelectionRoster, headers: &ExportHeaders) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for group in roster.grouped() {
        rows.push(vec![group.unit]);
        rows.push(vec![
            headers.serial.clone(),
            headers.full_name.clone(),
            headers.job_title.clone(),
        ]);
        for employee in group.employees {
            rows.push(vec![employee.serial, employee.full_name, employee.job_title]);
        }
        rows.push(Vec::new());
    }
    rows
}

/// Download name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("danh-sach-da-chon-{}.xlsx", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_types::Employee;

    fn employee(unit: &str, serial: &str, name: &str, title: &str) -> Employee {
        Employee {
            unit: unit.to_string(),
            serial: serial.to_string(),
            full_name: name.to_string(),
            job_title: title.to_string(),
        }
    }

    #[test]
    fn test_rows_grouped_by_unit() {
        let roster = SelectionRoster::from(vec![
            employee("B", "4", "Dave", "Lead"),
            employee("A", "1", "Alice", ""),
            employee("B", "2", "Bob", "Auditor"),
        ]);

        let rows = export_rows(&roster, &ExportHeaders::default());
        let expected: Vec<Vec<String>> = vec![
            vec!["B".into()],
            vec!["STT".into(), "Họ và tên".into(), "Chức danh".into()],
            vec!["4".into(), "Dave".into(), "Lead".into()],
            vec!["2".into(), "Bob".into(), "Auditor".into()],
            vec![],
            vec!["A".into()],
            vec!["STT".into(), "Họ và tên".into(), "Chức danh".into()],
            vec!["1".into(), "Alice".into(), "".into()],
            vec![],
        ];
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_empty_roster_exports_nothing() {
        assert!(export_rows(&SelectionRoster::new(), &ExportHeaders::default()).is_empty());
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(export_file_name(date), "danh-sach-da-chon-2026-10-18.xlsx");
    }
}
