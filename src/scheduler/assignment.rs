use super::strategy::SlotFillStrategy;
use super::util;
use super::workload::WorkloadCounter;
use crate::model::{AssignmentRecord, ClinicId, Clinician, Location, Shift, SundaySession};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use tracing::{debug, warn};

/// Sortie d'une demi-journée
#[derive(Debug, Clone, Default)]
pub struct ShiftAllocation {
    pub records: Vec<AssignmentRecord>,
    /// Cliniques restées sans personne faute de cliniciens.
    pub unfilled: Vec<ClinicId>,
}

/// Alloue une demi-journée : congés, séance scientifique, tri d'équité,
/// remplissage des cliniques puis débordement (Supervision / Floor/Reserve).
///
/// `pool` doit déjà être filtré par préférence de demi-journée.
/// Chaque placement en clinique ou en débordement incrémente `workload`.
pub fn allocate_shift<R: Rng + ?Sized>(
    date: NaiveDate,
    shift: Shift,
    pool: &[&Clinician],
    clinics: &[ClinicId],
    strategy: &dyn SlotFillStrategy,
    workload: &mut WorkloadCounter,
    rng: &mut R,
) -> ShiftAllocation {
    let weekday = date.weekday();
    let record = |location: Location, who: &Clinician| AssignmentRecord {
        date,
        weekday,
        shift,
        location,
        assignee: who.name.clone(),
        role: who.role(),
        paired_supervisor: None,
    };
    let mut out = ShiftAllocation::default();

    let mut available = Vec::with_capacity(pool.len());
    for &c in pool {
        if c.is_on_vacation(date) {
            out.records.push(record(Location::Vacation, c));
            continue;
        }
        let session = c.effective_sunday_session();
        if shift == Shift::Am && weekday == Weekday::Sun && session != SundaySession::None {
            out.records.push(record(Location::Science(session), c));
            continue;
        }
        available.push(c);
    }

    util::fairness_order(&mut available, workload, rng);
    let (residents, supervisors) = util::split_by_role(available);
    let fill = strategy.fill(residents, supervisors, clinics);

    for placement in &fill.placements {
        let mut rec = record(Location::Clinic(placement.clinic.clone()), placement.occupant);
        workload.increment(&placement.occupant.name);
        if let Some(sup) = placement.supervisor {
            rec.paired_supervisor = Some(sup.name.clone());
            workload.increment(&sup.name);
        }
        out.records.push(rec);
    }

    for &sup in &fill.supervisors {
        out.records.push(record(Location::Supervision, sup));
        workload.increment(&sup.name);
    }
    for &res in &fill.residents {
        out.records.push(record(Location::FloorReserve, res));
        workload.increment(&res.name);
    }

    for clinic in &fill.unfilled {
        warn!(%date, %shift, %clinic, "clinic left unstaffed");
    }
    out.unfilled = fill.unfilled;

    debug!(
        %date,
        %shift,
        placed = fill.placements.len(),
        supervision = fill.supervisors.len(),
        reserve = fill.residents.len(),
        records = out.records.len(),
        "shift allocated"
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, Title};
    use crate::scheduler::strategy::{PreferredPairing, ResidentsFirst};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overflow_goes_to_reserve_and_supervision() {
        let roster = vec![
            Clinician::resident("r1"),
            Clinician::resident("r2"),
            Clinician::supervisor("s1", Title::Consultant),
        ];
        let pool: Vec<&Clinician> = roster.iter().collect();
        let mut w = WorkloadCounter::new(&roster);
        // 2025-10-06 est un lundi
        let out = allocate_shift(
            date(2025, 10, 6),
            Shift::Am,
            &pool,
            &[ClinicId::from(8)],
            &ResidentsFirst,
            &mut w,
            &mut StdRng::seed_from_u64(3),
        );

        assert_eq!(out.records.len(), 3);
        let clinic: Vec<_> = out
            .records
            .iter()
            .filter(|r| matches!(r.location, Location::Clinic(_)))
            .collect();
        assert_eq!(clinic.len(), 1);
        assert_eq!(clinic[0].role, Role::Resident);
        assert!(out
            .records
            .iter()
            .any(|r| r.location == Location::Supervision && r.assignee == "s1"));
        assert_eq!(
            out.records
                .iter()
                .filter(|r| r.location == Location::FloorReserve)
                .count(),
            1
        );
        assert_eq!(w.total(), 3);
        assert!(out.unfilled.is_empty());
    }

    #[test]
    fn paired_record_counts_both() {
        let roster = vec![
            Clinician::resident("r1"),
            Clinician::supervisor("s1", Title::Consultant).with_preferred_clinic(ClinicId::from(8)),
        ];
        let pool: Vec<&Clinician> = roster.iter().collect();
        let mut w = WorkloadCounter::new(&roster);
        let out = allocate_shift(
            date(2025, 10, 6),
            Shift::Pm,
            &pool,
            &[ClinicId::from(8)],
            &PreferredPairing,
            &mut w,
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].assignee, "r1");
        assert_eq!(out.records[0].paired_supervisor.as_deref(), Some("s1"));
        assert_eq!(w.get("r1"), 1);
        assert_eq!(w.get("s1"), 1);
    }

    #[test]
    fn sunday_session_only_on_sunday_morning() {
        let roster = vec![Clinician::resident("r1")];
        let pool: Vec<&Clinician> = roster.iter().collect();
        let mut w = WorkloadCounter::new(&roster);
        let mut rng = StdRng::seed_from_u64(0);
        // 2025-10-05 est un dimanche
        let sunday = date(2025, 10, 5);
        let clinics = [ClinicId::from(8)];

        let am = allocate_shift(sunday, Shift::Am, &pool, &clinics, &PreferredPairing, &mut w, &mut rng);
        assert_eq!(am.records.len(), 1);
        assert_eq!(am.records[0].location, Location::Science(SundaySession::Both));
        assert_eq!(am.unfilled, clinics.to_vec());
        assert_eq!(w.get("r1"), 0);

        let pm = allocate_shift(sunday, Shift::Pm, &pool, &clinics, &PreferredPairing, &mut w, &mut rng);
        assert_eq!(pm.records[0].location, Location::Clinic(ClinicId::from(8)));
        assert_eq!(w.get("r1"), 1);
    }

    #[test]
    fn vacation_excludes_from_everything_else() {
        let period = crate::model::VacationPeriod::new(date(2025, 10, 1), date(2025, 10, 31)).unwrap();
        let roster = vec![Clinician::resident("r1").with_vacation(period)];
        let pool: Vec<&Clinician> = roster.iter().collect();
        let mut w = WorkloadCounter::new(&roster);
        let out = allocate_shift(
            date(2025, 10, 5),
            Shift::Am,
            &pool,
            &[ClinicId::from(8)],
            &PreferredPairing,
            &mut w,
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].location, Location::Vacation);
        assert_eq!(w.total(), 0);
    }

    #[test]
    fn empty_pool_reports_every_clinic() {
        let mut w = WorkloadCounter::default();
        let out = allocate_shift(
            date(2025, 10, 6),
            Shift::Am,
            &[],
            &[ClinicId::from(8), ClinicId::from(9)],
            &PreferredPairing,
            &mut w,
            &mut StdRng::seed_from_u64(0),
        );
        assert!(out.records.is_empty());
        assert_eq!(out.unfilled.len(), 2);
    }
}
