use super::types::FillPolicy;
use crate::model::{ClinicId, Clinician};

/// Occupation d'une clinique pour une demi-journée.
#[derive(Debug, Clone)]
pub struct Placement<'a> {
    pub clinic: ClinicId,
    pub occupant: &'a Clinician,
    /// Superviseur apparié à un résident (même clinique).
    pub supervisor: Option<&'a Clinician>,
}

/// Résultat d'un remplissage : placements dans l'ordre des cliniques,
/// cliniques restées vides, et files restantes.
#[derive(Debug, Clone, Default)]
pub struct SlotFill<'a> {
    pub placements: Vec<Placement<'a>>,
    pub unfilled: Vec<ClinicId>,
    pub residents: Vec<&'a Clinician>,
    pub supervisors: Vec<&'a Clinician>,
}

/// Politique de remplissage des cliniques.
///
/// Fonction pure : les files arrivent triées par équité, la stratégie
/// consomme ce dont elle a besoin et rend le reste.
pub trait SlotFillStrategy {
    fn fill<'a>(
        &self,
        residents: Vec<&'a Clinician>,
        supervisors: Vec<&'a Clinician>,
        clinics: &[ClinicId],
    ) -> SlotFill<'a>;
}

/// Résidents d'abord, superviseurs une fois les résidents épuisés.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResidentsFirst;

impl SlotFillStrategy for ResidentsFirst {
    fn fill<'a>(
        &self,
        residents: Vec<&'a Clinician>,
        supervisors: Vec<&'a Clinician>,
        clinics: &[ClinicId],
    ) -> SlotFill<'a> {
        let mut slots: Vec<Option<Placement<'a>>> = vec![None; clinics.len()];
        let (residents, supervisors) = fill_remaining(&mut slots, clinics, residents, supervisors);
        collect(slots, clinics, residents, supervisors)
    }
}

/// Appariement superviseur/résident sur la clinique préférée du superviseur,
/// puis remplissage simple des cliniques restantes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreferredPairing;

impl SlotFillStrategy for PreferredPairing {
    fn fill<'a>(
        &self,
        residents: Vec<&'a Clinician>,
        mut supervisors: Vec<&'a Clinician>,
        clinics: &[ClinicId],
    ) -> SlotFill<'a> {
        let mut slots: Vec<Option<Placement<'a>>> = vec![None; clinics.len()];
        let mut residents = residents.into_iter();

        for (slot, clinic) in slots.iter_mut().zip(clinics) {
            let Some(pos) = supervisors
                .iter()
                .position(|s| s.preferred_clinic.as_ref() == Some(clinic))
            else {
                continue;
            };
            let Some(resident) = residents.next() else {
                break;
            };
            let supervisor = supervisors.remove(pos);
            *slot = Some(Placement {
                clinic: clinic.clone(),
                occupant: resident,
                supervisor: Some(supervisor),
            });
        }
        let pending: Vec<_> = residents.collect();

        let (residents, supervisors) = fill_remaining(&mut slots, clinics, pending, supervisors);
        collect(slots, clinics, residents, supervisors)
    }
}

/// Construit la stratégie correspondant à une politique.
pub fn strategy_for(policy: FillPolicy) -> Box<dyn SlotFillStrategy> {
    match policy {
        FillPolicy::PreferredPairing => Box::new(PreferredPairing),
        FillPolicy::ResidentsFirst => Box::new(ResidentsFirst),
    }
}

fn fill_remaining<'a>(
    slots: &mut [Option<Placement<'a>>],
    clinics: &[ClinicId],
    residents: Vec<&'a Clinician>,
    supervisors: Vec<&'a Clinician>,
) -> (Vec<&'a Clinician>, Vec<&'a Clinician>) {
    let mut residents = residents.into_iter();
    let mut supervisors = supervisors.into_iter();

    for (slot, clinic) in slots.iter_mut().zip(clinics) {
        if slot.is_some() {
            continue;
        }
        let Some(occupant) = residents.next().or_else(|| supervisors.next()) else {
            break;
        };
        *slot = Some(Placement {
            clinic: clinic.clone(),
            occupant,
            supervisor: None,
        });
    }

    (residents.collect(), supervisors.collect())
}

fn collect<'a>(
    slots: Vec<Option<Placement<'a>>>,
    clinics: &[ClinicId],
    residents: Vec<&'a Clinician>,
    supervisors: Vec<&'a Clinician>,
) -> SlotFill<'a> {
    let mut out = SlotFill {
        residents,
        supervisors,
        ..SlotFill::default()
    };
    for (slot, clinic) in slots.into_iter().zip(clinics) {
        match slot {
            Some(p) => out.placements.push(p),
            None => out.unfilled.push(clinic.clone()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Title;

    fn clinics(ids: &[u32]) -> Vec<ClinicId> {
        ids.iter().copied().map(ClinicId::from).collect()
    }

    fn names<'a>(v: &[&'a Clinician]) -> Vec<&'a str> {
        v.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn residents_first_then_supervisors() {
        let r1 = Clinician::resident("r1");
        let s1 = Clinician::supervisor("s1", Title::Consultant);
        let s2 = Clinician::supervisor("s2", Title::Specialist);
        let fill = ResidentsFirst.fill(vec![&r1], vec![&s1, &s2], &clinics(&[8, 9]));

        assert_eq!(fill.placements.len(), 2);
        assert_eq!(fill.placements[0].occupant.name, "r1");
        assert_eq!(fill.placements[1].occupant.name, "s1");
        assert!(fill.unfilled.is_empty());
        assert!(fill.residents.is_empty());
        assert_eq!(names(&fill.supervisors), ["s2"]);
    }

    #[test]
    fn exhausted_pool_leaves_clinics_unfilled() {
        let r1 = Clinician::resident("r1");
        let fill = ResidentsFirst.fill(vec![&r1], vec![], &clinics(&[8, 9, 10]));
        assert_eq!(fill.placements.len(), 1);
        assert_eq!(fill.unfilled, clinics(&[9, 10]));
    }

    #[test]
    fn pairing_uses_preferred_clinic() {
        let r1 = Clinician::resident("r1");
        let r2 = Clinician::resident("r2");
        let s1 = Clinician::supervisor("s1", Title::Consultant).with_preferred_clinic(ClinicId::from(9));
        let s2 = Clinician::supervisor("s2", Title::Consultant);
        let fill = PreferredPairing.fill(vec![&r1, &r2], vec![&s2, &s1], &clinics(&[8, 9]));

        assert_eq!(fill.placements.len(), 2);
        let at_8 = &fill.placements[0];
        let at_9 = &fill.placements[1];
        assert_eq!(at_8.clinic, ClinicId::from(8));
        assert_eq!(at_8.occupant.name, "r2");
        assert!(at_8.supervisor.is_none());
        assert_eq!(at_9.occupant.name, "r1");
        assert_eq!(at_9.supervisor.map(|s| s.name.as_str()), Some("s1"));
        assert_eq!(names(&fill.supervisors), ["s2"]);
    }

    #[test]
    fn pairing_needs_a_resident() {
        let s1 = Clinician::supervisor("s1", Title::Consultant).with_preferred_clinic(ClinicId::from(8));
        let fill = PreferredPairing.fill(vec![], vec![&s1], &clinics(&[8]));
        assert_eq!(fill.placements.len(), 1);
        assert_eq!(fill.placements[0].occupant.name, "s1");
        assert!(fill.placements[0].supervisor.is_none());
    }

    #[test]
    fn empty_clinic_list_returns_everyone() {
        let r1 = Clinician::resident("r1");
        let s1 = Clinician::supervisor("s1", Title::Consultant);
        let fill = PreferredPairing.fill(vec![&r1], vec![&s1], &[]);
        assert!(fill.placements.is_empty());
        assert_eq!(fill.residents.len(), 1);
        assert_eq!(fill.supervisors.len(), 1);
    }
}
