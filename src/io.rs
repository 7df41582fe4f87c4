use crate::model::{ClinicId, Clinician, Roster, Shift, ShiftPreference, SundaySession, Title, VacationPeriod};
use crate::render;
use crate::scheduler::Schedule;
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};

pub const CLINICIAN_HEADERS: [&str; 8] = [
    "Name",
    "Title",
    "Shift_Pref",
    "Supervisor",
    "Sun_Session",
    "Vacation_Start",
    "Vacation_End",
    "Preferred_Clinic",
];

pub const CLINIC_HEADERS: [&str; 1] = ["Clinic_Number"];

/// Import des cliniciens depuis CSV:
/// header `Name,Title,Shift_Pref,Supervisor,Sun_Session,Vacation_Start,Vacation_End[,Preferred_Clinic]`
pub fn import_clinicians_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Clinician>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let name = rec.get(0).context("missing Name")?.trim();
        if name.is_empty() {
            bail!("invalid clinician row {} (empty name)", line + 2);
        }
        let title = Title::parse(rec.get(1).context("missing Title")?);
        let is_supervisor = parse_bool(rec.get(3).unwrap_or("").trim())
            .with_context(|| format!("invalid Supervisor value for {name}"))?;

        let mut clinician = Clinician::new(name, title, is_supervisor);
        clinician.shift_preference = parse_shift_pref(rec.get(2).unwrap_or(""))
            .with_context(|| format!("invalid Shift_Pref value for {name}"))?;
        clinician.sunday_session = parse_sunday_session(rec.get(4).unwrap_or(""))
            .with_context(|| format!("invalid Sun_Session value for {name}"))?;
        if let Some(period) = parse_vacation(rec.get(5).unwrap_or(""), rec.get(6).unwrap_or(""))
            .with_context(|| format!("invalid vacation for {name}"))?
        {
            clinician.vacations.push(period);
        }
        if let Some(clinic) = rec.get(7).map(str::trim).filter(|s| !s.is_empty()) {
            clinician.preferred_clinic = Some(parse_clinic(clinic));
        }
        out.push(clinician);
    }
    Ok(out)
}

/// Import des cliniques: header `Clinic_Number`
pub fn import_clinics_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ClinicId>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let raw = rec.get(0).map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            continue;
        }
        out.push(parse_clinic(raw));
    }
    Ok(out)
}

/// Écrit deux CSV vides (`doctors.csv`, `clinics.csv`) avec les en-têtes attendus.
pub fn write_templates<P: AsRef<Path>>(dir: P) -> anyhow::Result<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let doctors = dir.join("doctors.csv");
    let mut w = WriterBuilder::new().from_path(&doctors)?;
    w.write_record(CLINICIAN_HEADERS)?;
    w.flush()?;

    let clinics = dir.join("clinics.csv");
    let mut w = WriterBuilder::new().from_path(&clinics)?;
    w.write_record(CLINIC_HEADERS)?;
    w.flush()?;

    Ok((doctors, clinics))
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" | "" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

fn parse_shift_pref(s: &str) -> anyhow::Result<ShiftPreference> {
    match s.trim().to_ascii_lowercase().as_str() {
        "day" | "am" => Ok(ShiftPreference::Day),
        "night" | "pm" => Ok(ShiftPreference::Night),
        "both" | "" => Ok(ShiftPreference::Both),
        other => bail!("expected Day, Night or Both, got {other:?}"),
    }
}

fn parse_sunday_session(s: &str) -> anyhow::Result<Option<SundaySession>> {
    let norm: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();
    match norm.as_str() {
        "" | "nan" => Ok(None),
        "none" => Ok(Some(SundaySession::None)),
        "session1" | "1" => Ok(Some(SundaySession::Session1)),
        "session2" | "2" => Ok(Some(SundaySession::Session2)),
        "both" => Ok(Some(SundaySession::Both)),
        _ => bail!("expected None, Session 1, Session 2 or Both"),
    }
}

fn parse_vacation(start: &str, end: &str) -> anyhow::Result<Option<VacationPeriod>> {
    let (start, end) = (start.trim(), end.trim());
    match (start.is_empty(), end.is_empty()) {
        (true, true) => Ok(None),
        (false, false) => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            VacationPeriod::new(start, end)
                .map(Some)
                .map_err(anyhow::Error::msg)
        }
        _ => bail!("vacation needs both start and end"),
    }
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    if raw.parse::<Weekday>().is_ok() {
        bail!("weekday bound {raw:?} is not supported, use YYYY-MM-DD");
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    // export tableur : "2025-10-05 00:00:00"
    let dt = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("invalid date: {raw}"))?;
    Ok(dt.date())
}

// "8.0" (tableur) -> "8"
fn parse_clinic(raw: &str) -> ClinicId {
    match raw.strip_suffix(".0") {
        Some(int) if int.parse::<u64>().is_ok() => ClinicId::new(int),
        _ => ClinicId::new(raw),
    }
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des affectations: header `date,day,shift,location,clinician`
pub fn export_records_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "day", "shift", "location", "clinician"])?;
    for r in &schedule.records {
        let date = r.date.to_string();
        let location = r.location.label();
        let label = render::display_label(r);
        w.write_record([
            date.as_str(),
            crate::calendar::weekday_name(r.weekday),
            r.shift.label(),
            location.as_str(),
            label.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV de la charge finale: header `name,role,assignments`
/// (rôle vide si le nom n'est plus dans le roster)
pub fn export_workload_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    roster: &Roster,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["name", "role", "assignments"])?;
    for (name, count) in &schedule.workload {
        let role = roster
            .find_clinician(name)
            .map(|c| c.role().label())
            .unwrap_or_default();
        w.write_record([name.as_str(), role, count.to_string().as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du tableau croisé d'une demi-journée.
pub fn export_pivot_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    shift: Shift,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().flexible(false).from_path(path)?;
    for line in render::pivot(schedule, shift).to_grid() {
        w.write_record(&line)?;
    }
    w.flush()?;
    Ok(())
}
