use super::workload::WorkloadCounter;
use crate::model::{Clinician, Role};
use rand::seq::SliceRandom;
use rand::Rng;

/// Mélange puis tri stable par charge croissante : la charge domine,
/// le hasard départage les ex aequo.
pub(super) fn fairness_order<R: Rng + ?Sized>(
    pool: &mut [&Clinician],
    workload: &WorkloadCounter,
    rng: &mut R,
) {
    pool.shuffle(rng);
    pool.sort_by_key(|c| workload.get(&c.name));
}

/// Sépare résidents et superviseurs en conservant l'ordre d'équité.
pub(super) fn split_by_role<'a>(pool: Vec<&'a Clinician>) -> (Vec<&'a Clinician>, Vec<&'a Clinician>) {
    pool.into_iter().partition(|c| c.role() == Role::Resident)
}
