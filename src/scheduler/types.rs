use crate::calendar::RestDays;
use crate::model::{AssignmentRecord, ClinicId, Shift};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Répartition des cliniciens "both" entre équipes de jour et de soir
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TeamPolicy {
    /// Les flexibles sont répartis une fois par run vers l'équipe la plus petite.
    #[default]
    Balanced,
    /// Les flexibles sont éligibles matin et soir.
    Independent,
}

/// Stratégie de remplissage des cliniques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FillPolicy {
    #[default]
    PreferredPairing,
    ResidentsFirst,
}

/// Options d'allocation
#[derive(Debug, Clone, Copy)]
pub struct AllocOptions {
    pub rest_days: RestDays,
    pub team_policy: TeamPolicy,
    pub fill_policy: FillPolicy,
    pub allow_double_booking: bool,
    /// Graine du mélange aléatoire ; `None` = entropie système.
    pub seed: Option<u64>,
}

impl Default for AllocOptions {
    fn default() -> Self {
        Self {
            rest_days: RestDays::default(),
            team_policy: TeamPolicy::default(),
            fill_policy: FillPolicy::default(),
            allow_double_booking: true,
            seed: None,
        }
    }
}

/// Situations dégradées signalées sans interrompre le run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScheduleWarning {
    ReversedRange { start: NaiveDate, end: NaiveDate },
    EmptyRoster,
    NoClinics,
    UnderStaffed { date: NaiveDate, shift: Shift, clinic: ClinicId },
    UnknownPreferredClinic { name: String, clinic: ClinicId },
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("clinician name cannot be empty")]
    EmptyName,
    #[error("duplicate clinician name: {0}")]
    DuplicateClinician(String),
    #[error("invalid vacation for {name}: {reason}")]
    InvalidVacation { name: String, reason: String },
}

/// Identifiant fort pour un planning généré
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(String);

impl ScheduleId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Résultat d'un run complet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub records: Vec<AssignmentRecord>,
    /// Charge finale par clinicien.
    pub workload: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScheduleWarning>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_shift(&self, shift: Shift) -> impl Iterator<Item = &AssignmentRecord> {
        self.records.iter().filter(move |r| r.shift == shift)
    }

    pub fn under_staffed(&self) -> impl Iterator<Item = &ScheduleWarning> {
        self.warnings
            .iter()
            .filter(|w| matches!(w, ScheduleWarning::UnderStaffed { .. }))
    }
}
