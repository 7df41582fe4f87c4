//! Rendu tabulaire : libellés d'affichage et tableau croisé date × emplacement.

use crate::calendar::weekday_name;
use crate::model::{AssignmentRecord, Location, Role, Shift};
use crate::scheduler::Schedule;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Libellé d'une ligne : "(Sup)" pour un superviseur en clinique,
/// "(OFF)" pour un congé.
pub fn display_label(rec: &AssignmentRecord) -> String {
    match (&rec.location, &rec.paired_supervisor) {
        (Location::Vacation, _) => format!("{} (OFF)", rec.assignee),
        (Location::Clinic(_), Some(sup)) => format!("{} + {} (Sup)", rec.assignee, sup),
        (Location::Clinic(_), None) if rec.role == Role::Supervisor => {
            format!("{} (Sup)", rec.assignee)
        }
        _ => rec.assignee.clone(),
    }
}

/// Libellé de ligne du tableau croisé.
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", weekday_name(date.weekday()), date)
}

/// Tableau croisé d'une demi-journée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pivot {
    pub columns: Vec<String>,
    /// (date, cellules alignées sur `columns`)
    pub rows: Vec<(NaiveDate, Vec<String>)>,
}

impl Pivot {
    /// En-tête puis lignes, prêtes pour un export CSV.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        let mut header = vec!["Date".to_string()];
        header.extend(self.columns.iter().cloned());
        grid.push(header);
        for (date, cells) in &self.rows {
            let mut line = vec![day_label(*date)];
            line.extend(cells.iter().cloned());
            grid.push(line);
        }
        grid
    }
}

/// Construit le tableau croisé d'une demi-journée ; cellule vide = "-".
pub fn pivot(schedule: &Schedule, shift: Shift) -> Pivot {
    let mut cells: BTreeMap<NaiveDate, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    let mut locations: Vec<Location> = Vec::new();

    for rec in schedule.by_shift(shift) {
        if !locations.contains(&rec.location) {
            locations.push(rec.location.clone());
        }
        cells
            .entry(rec.date)
            .or_default()
            .entry(rec.location.label())
            .or_default()
            .push(display_label(rec));
    }

    locations.sort_by_key(column_rank);
    let columns: Vec<String> = locations.iter().map(Location::label).collect();

    let rows = cells
        .into_iter()
        .map(|(date, by_col)| {
            let line: Vec<String> = columns
                .iter()
                .map(|col| {
                    by_col
                        .get(col)
                        .map(|names| names.join(", "))
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            (date, line)
        })
        .collect();

    Pivot { columns, rows }
}

// cliniques numériques, autres cliniques, Supervision, Sci, puis le reste
fn column_rank(loc: &Location) -> (u8, u64, String) {
    match loc {
        Location::Clinic(id) => match id.number() {
            Some(n) => (0, n, String::new()),
            None => (1, 0, id.as_str().to_string()),
        },
        Location::Supervision => (2, 0, String::new()),
        Location::Science(_) => (3, 0, loc.label()),
        Location::FloorReserve => (4, 0, String::new()),
        Location::Vacation => (5, 0, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClinicId, SundaySession};
    use chrono::Weekday;

    fn rec(location: Location, who: &str, role: Role) -> AssignmentRecord {
        AssignmentRecord {
            date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
            weekday: Weekday::Sun,
            shift: Shift::Am,
            location,
            assignee: who.to_string(),
            role,
            paired_supervisor: None,
        }
    }

    #[test]
    fn labels() {
        assert_eq!(
            display_label(&rec(Location::Vacation, "Dr. A", Role::Resident)),
            "Dr. A (OFF)"
        );
        assert_eq!(
            display_label(&rec(Location::Clinic(ClinicId::from(8)), "Dr. S", Role::Supervisor)),
            "Dr. S (Sup)"
        );
        assert_eq!(
            display_label(&rec(Location::Supervision, "Dr. S", Role::Supervisor)),
            "Dr. S"
        );
        let mut paired = rec(Location::Clinic(ClinicId::from(9)), "Dr. R", Role::Resident);
        paired.paired_supervisor = Some("Dr. S".into());
        assert_eq!(display_label(&paired), "Dr. R + Dr. S (Sup)");
    }

    #[test]
    fn column_order() {
        let mut locs = vec![
            Location::FloorReserve,
            Location::Science(SundaySession::Both),
            Location::Clinic(ClinicId::from(15)),
            Location::Supervision,
            Location::Clinic(ClinicId::new("Ortho")),
            Location::Clinic(ClinicId::from(8)),
        ];
        locs.sort_by_key(column_rank);
        let labels: Vec<_> = locs.iter().map(Location::label).collect();
        assert_eq!(
            labels,
            ["8", "15", "Ortho", "Supervision", "Sci: Both", "Floor/Reserve"]
        );
    }

    #[test]
    fn day_label_format() {
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2025, 10, 5).unwrap()),
            "Sunday 2025-10-05"
        );
    }
}
