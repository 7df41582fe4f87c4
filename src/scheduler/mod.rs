mod assignment;
mod strategy;
mod teams;
mod types;
mod util;
mod workload;

pub use assignment::{allocate_shift, ShiftAllocation};
pub use strategy::{strategy_for, Placement, PreferredPairing, ResidentsFirst, SlotFill, SlotFillStrategy};
pub use teams::{partition, Teams};
pub use types::{
    AllocOptions, FillPolicy, SchedError, Schedule, ScheduleId, ScheduleWarning, TeamPolicy,
};
pub use workload::WorkloadCounter;

use crate::calendar::active_dates;
use crate::model::{Clinician, Role, Roster, Shift};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use tracing::info;

/// Scheduler : encapsule un Roster validé et la source d'aléa des départages
#[derive(Debug)]
pub struct Scheduler {
    roster: Roster,
    options: AllocOptions,
    rng: StdRng,
}

impl Scheduler {
    pub fn new(roster: Roster, options: AllocOptions) -> Result<Self, SchedError> {
        roster.validate()?;
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            roster,
            options,
            rng,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn options(&self) -> &AllocOptions {
        &self.options
    }

    /// Planifie toutes les dates actives de [start, end].
    ///
    /// Le compteur de charge vit le temps d'un run ; deux appels sont indépendants
    /// (hors état de l'aléa).
    pub fn run(&mut self, start: NaiveDate, end: NaiveDate) -> Schedule {
        let Self {
            roster,
            options,
            rng,
        } = self;

        let mut warnings = precheck(roster, start, end);
        let mut records = Vec::new();
        let mut workload = WorkloadCounter::new(&roster.clinicians);
        let strategy = strategy_for(options.fill_policy);
        let teams = teams::partition(&roster.clinicians, options.team_policy, rng);

        info!(
            %start,
            %end,
            clinicians = roster.clinicians.len(),
            clinics = roster.clinics.len(),
            day_team = teams.day.len(),
            night_team = teams.night.len(),
            "schedule run started"
        );

        for date in active_dates(start, end, options.rest_days) {
            let mut busy: BTreeSet<String> = BTreeSet::new();
            for shift in Shift::ALL {
                let pool: Vec<&Clinician> = teams
                    .for_shift(shift)
                    .iter()
                    .copied()
                    .filter(|c| options.allow_double_booking || !busy.contains(&c.name))
                    .collect();

                let alloc = allocate_shift(
                    date,
                    shift,
                    &pool,
                    &roster.clinics,
                    strategy.as_ref(),
                    &mut workload,
                    rng,
                );

                if !options.allow_double_booking {
                    busy.extend(
                        alloc
                            .records
                            .iter()
                            .filter(|r| r.location.consumes_workload())
                            .flat_map(|r| r.names().map(str::to_string)),
                    );
                }
                warnings.extend(alloc.unfilled.into_iter().map(|clinic| {
                    ScheduleWarning::UnderStaffed {
                        date,
                        shift,
                        clinic,
                    }
                }));
                records.extend(alloc.records);
            }
        }

        info!(
            records = records.len(),
            assignments = workload.total(),
            warnings = warnings.len(),
            "schedule run finished"
        );

        Schedule {
            id: ScheduleId::random(),
            start,
            end,
            records,
            workload: workload.snapshot(),
            warnings,
        }
    }
}

/// Valide le roster puis génère le planning en une passe.
pub fn generate_schedule(
    roster: Roster,
    start: NaiveDate,
    end: NaiveDate,
    options: AllocOptions,
) -> Result<Schedule, SchedError> {
    let mut scheduler = Scheduler::new(roster, options)?;
    Ok(scheduler.run(start, end))
}

fn precheck(roster: &Roster, start: NaiveDate, end: NaiveDate) -> Vec<ScheduleWarning> {
    let mut out = Vec::new();
    if end < start {
        out.push(ScheduleWarning::ReversedRange { start, end });
    }
    if roster.clinicians.is_empty() {
        out.push(ScheduleWarning::EmptyRoster);
    }
    if roster.clinics.is_empty() {
        out.push(ScheduleWarning::NoClinics);
    }
    for c in &roster.clinicians {
        if c.role() != Role::Supervisor {
            continue;
        }
        if let Some(clinic) = &c.preferred_clinic {
            if !roster.clinics.contains(clinic) {
                out.push(ScheduleWarning::UnknownPreferredClinic {
                    name: c.name.clone(),
                    clinic: clinic.clone(),
                });
            }
        }
    }
    out
}
