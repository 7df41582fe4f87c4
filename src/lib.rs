#![forbid(unsafe_code)]
//! Garde — répartition des cliniciens sur les cliniques, matin et soir.
//!
//! - Jours ouvrés hors deux jours de repos hebdomadaires.
//! - Allocation gloutonne par demi-journée, équité par compteur de charge.
//! - Congés en dates calendaires, séance scientifique du dimanche matin.
//! - Import/export CSV/JSON en dehors du cœur.

pub mod calendar;
pub mod config;
pub mod defaults;
pub mod io;
pub mod model;
pub mod render;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use calendar::{active_dates, RestDays};
pub use config::{load_config, RunConfig};
pub use defaults::builtin_roster;
pub use model::{
    AssignmentRecord, ClinicId, Clinician, Location, Role, Roster, Shift, ShiftPreference,
    SundaySession, Title, VacationPeriod,
};
pub use report::{summarize, Summary, SummaryRenderer, TextSummary};
pub use scheduler::{
    generate_schedule, AllocOptions, FillPolicy, SchedError, Schedule, ScheduleWarning, Scheduler,
    TeamPolicy,
};
pub use storage::{JsonStorage, Storage};
