use crate::model::{Role, Roster, Shift};
use crate::scheduler::{Schedule, ScheduleWarning};
use std::fmt::Write;

/// Ligne de synthèse par clinicien.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadLine {
    pub name: String,
    pub role: Option<Role>,
    pub assignments: u32,
}

/// Synthèse d'un planning généré.
#[derive(Debug, Clone)]
pub struct Summary {
    pub schedule_id: String,
    pub am_records: usize,
    pub pm_records: usize,
    pub loads: Vec<LoadLine>,
    pub warnings: Vec<ScheduleWarning>,
}

/// Permet de customiser le rendu de la synthèse (texte, markdown, etc.).
pub trait SummaryRenderer {
    fn render(&self, summary: &Summary) -> String;
}

/// Rendu texte brut pour le terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSummary;

impl SummaryRenderer for TextSummary {
    fn render(&self, summary: &Summary) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Schedule {} : {} AM record(s), {} PM record(s)",
            summary.schedule_id, summary.am_records, summary.pm_records
        );
        for line in &summary.loads {
            let tag = match line.role {
                Some(Role::Supervisor) => " (Sup)",
                _ => "",
            };
            let _ = writeln!(out, "  {:<24} {:>4}", format!("{}{}", line.name, tag), line.assignments);
        }
        if !summary.warnings.is_empty() {
            let _ = writeln!(out, "{} warning(s):", summary.warnings.len());
            for w in &summary.warnings {
                let _ = writeln!(out, "  - {}", describe(w));
            }
        }
        out
    }
}

/// Construit la synthèse, charges triées par nom.
pub fn summarize(schedule: &Schedule, roster: &Roster) -> Summary {
    let loads = schedule
        .workload
        .iter()
        .map(|(name, count)| LoadLine {
            name: name.clone(),
            role: roster.find_clinician(name).map(|c| c.role()),
            assignments: *count,
        })
        .collect();
    Summary {
        schedule_id: schedule.id.as_str().to_string(),
        am_records: schedule.by_shift(Shift::Am).count(),
        pm_records: schedule.by_shift(Shift::Pm).count(),
        loads,
        warnings: schedule.warnings.clone(),
    }
}

pub fn describe(warning: &ScheduleWarning) -> String {
    match warning {
        ScheduleWarning::ReversedRange { start, end } => {
            format!("end date {end} is before start date {start}, nothing generated")
        }
        ScheduleWarning::EmptyRoster => "roster has no clinicians".to_string(),
        ScheduleWarning::NoClinics => "no clinics configured".to_string(),
        ScheduleWarning::UnderStaffed { date, shift, clinic } => {
            format!("clinic {clinic} unstaffed on {date} {shift}")
        }
        ScheduleWarning::UnknownPreferredClinic { name, clinic } => {
            format!("{name} prefers clinic {clinic} which is not in the clinic list")
        }
    }
}
