use crate::scheduler::SchedError;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifiant fort pour une clinique (numéro ou libellé libre)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicId(String);

impl ClinicId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Valeur numérique si l'identifiant est un numéro de clinique.
    pub fn number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ClinicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for ClinicId {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

/// Titre administratif. Seul `Resident` a un sens particulier à l'import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Title {
    Resident,
    Consultant,
    Specialist,
    Other(String),
}

impl Title {
    /// Reconnaît les abréviations usuelles ("Res", "Cons", "Spec").
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.contains("res") {
            Title::Resident
        } else if lower.contains("cons") {
            Title::Consultant
        } else if lower.contains("spec") {
            Title::Specialist
        } else {
            Title::Other(raw.trim().to_string())
        }
    }

    pub fn abbrev(&self) -> &str {
        match self {
            Title::Resident => "Res",
            Title::Consultant => "Cons",
            Title::Specialist => "Spec",
            Title::Other(s) => s.as_str(),
        }
    }
}

/// Rôle effectif pour l'allocation, dérivé uniquement de `is_supervisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Resident,
    Supervisor,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Resident => "resident",
            Role::Supervisor => "supervisor",
        }
    }
}

/// Demi-journée de consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Shift {
    /// Ordre de traitement dans une journée.
    pub const ALL: [Shift; 2] = [Shift::Am, Shift::Pm];

    pub fn label(self) -> &'static str {
        match self {
            Shift::Am => "AM",
            Shift::Pm => "PM",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftPreference {
    Day,
    Night,
    #[default]
    Both,
}


/// Participation à la séance scientifique du dimanche matin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SundaySession {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "session-1")]
    Session1,
    #[serde(rename = "session-2")]
    Session2,
    #[serde(rename = "both")]
    Both,
}

impl SundaySession {
    pub fn label(self) -> &'static str {
        match self {
            SundaySession::None => "None",
            SundaySession::Session1 => "Session 1",
            SundaySession::Session2 => "Session 2",
            SundaySession::Both => "Both",
        }
    }
}

/// Période de congés, bornes incluses ([start, end] en dates calendaires).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VacationPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err("vacation end must not be before start".to_string());
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Clinicien du roster. Le nom sert d'identifiant pendant un run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinician {
    pub name: String,
    pub title: Title,
    pub is_supervisor: bool,
    #[serde(default)]
    pub shift_preference: ShiftPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday_session: Option<SundaySession>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vacations: Vec<VacationPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_clinic: Option<ClinicId>,
}

impl Clinician {
    pub fn new<N: Into<String>>(name: N, title: Title, is_supervisor: bool) -> Self {
        Self {
            name: name.into(),
            title,
            is_supervisor,
            shift_preference: ShiftPreference::Both,
            sunday_session: None,
            vacations: Vec::new(),
            preferred_clinic: None,
        }
    }

    pub fn resident<N: Into<String>>(name: N) -> Self {
        Self::new(name, Title::Resident, false)
    }

    pub fn supervisor<N: Into<String>>(name: N, title: Title) -> Self {
        Self::new(name, title, true)
    }

    pub fn with_shift_preference(mut self, pref: ShiftPreference) -> Self {
        self.shift_preference = pref;
        self
    }

    pub fn with_sunday_session(mut self, session: SundaySession) -> Self {
        self.sunday_session = Some(session);
        self
    }

    pub fn with_vacation(mut self, period: VacationPeriod) -> Self {
        self.vacations.push(period);
        self
    }

    pub fn with_preferred_clinic(mut self, clinic: ClinicId) -> Self {
        self.preferred_clinic = Some(clinic);
        self
    }

    pub fn role(&self) -> Role {
        if self.is_supervisor {
            Role::Supervisor
        } else {
            Role::Resident
        }
    }

    pub fn is_on_vacation(&self, date: NaiveDate) -> bool {
        self.vacations.iter().any(|v| v.contains(date))
    }

    /// Les résidents sans préférence (ou "none") assistent aux deux séances.
    pub fn effective_sunday_session(&self) -> SundaySession {
        match (self.role(), self.sunday_session) {
            (Role::Resident, None | Some(SundaySession::None)) => SundaySession::Both,
            (_, Some(session)) => session,
            (_, None) => SundaySession::None,
        }
    }
}

/// Emplacement d'une affectation dans une demi-journée
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Location {
    Clinic(ClinicId),
    Supervision,
    FloorReserve,
    Science(SundaySession),
    Vacation,
}

impl Location {
    pub fn label(&self) -> String {
        match self {
            Location::Clinic(id) => id.to_string(),
            Location::Supervision => "Supervision".to_string(),
            Location::FloorReserve => "Floor/Reserve".to_string(),
            Location::Science(session) => format!("Sci: {}", session.label()),
            Location::Vacation => "VACATION".to_string(),
        }
    }

    /// Vrai si l'affectation compte dans la charge du clinicien.
    pub fn consumes_workload(&self) -> bool {
        matches!(
            self,
            Location::Clinic(_) | Location::Supervision | Location::FloorReserve
        )
    }
}

/// Ligne produite par l'allocation ; jamais modifiée après émission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub shift: Shift,
    pub location: Location,
    pub assignee: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_supervisor: Option<String>,
}

impl AssignmentRecord {
    /// Tous les noms présents sur la ligne (résident puis superviseur apparié).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.assignee.as_str()).chain(self.paired_supervisor.as_deref())
    }

    pub fn involves(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }
}

/// Roster complet : cliniciens et cliniques d'un run
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Roster {
    pub clinicians: Vec<Clinician>,
    pub clinics: Vec<ClinicId>,
}

impl Roster {
    pub fn new(clinicians: Vec<Clinician>, clinics: Vec<ClinicId>) -> Self {
        Self { clinicians, clinics }
    }

    pub fn find_clinician<'a>(&'a self, name: &str) -> Option<&'a Clinician> {
        self.clinicians.iter().find(|c| c.name == name)
    }

    pub fn find_clinician_mut(&mut self, name: &str) -> Option<&mut Clinician> {
        self.clinicians.iter_mut().find(|c| c.name == name)
    }

    /// Vérifie noms non vides et uniques, et bornes de congés cohérentes.
    pub fn validate(&self) -> Result<(), SchedError> {
        let mut seen = BTreeSet::new();
        for c in &self.clinicians {
            if c.name.trim().is_empty() {
                return Err(SchedError::EmptyName);
            }
            if !seen.insert(c.name.as_str()) {
                return Err(SchedError::DuplicateClinician(c.name.clone()));
            }
            if let Some(v) = c.vacations.iter().find(|v| v.end < v.start) {
                return Err(SchedError::InvalidVacation {
                    name: c.name.clone(),
                    reason: format!("end {} before start {}", v.end, v.start),
                });
            }
        }
        Ok(())
    }
}
