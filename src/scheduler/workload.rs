use crate::model::Clinician;
use std::collections::BTreeMap;

/// Compteur d'affectations par clinicien, partagé par toutes les demi-journées d'un run.
///
/// Initialisé à zéro pour tout le roster ; ne fait que croître.
#[derive(Debug, Clone, Default)]
pub struct WorkloadCounter {
    counts: BTreeMap<String, u32>,
}

impl WorkloadCounter {
    pub fn new(clinicians: &[Clinician]) -> Self {
        Self {
            counts: clinicians.iter().map(|c| (c.name.clone(), 0)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.counts.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_grows() {
        let roster = vec![Clinician::resident("a"), Clinician::resident("b")];
        let mut w = WorkloadCounter::new(&roster);
        assert_eq!(w.get("a"), 0);
        w.increment("a");
        w.increment("a");
        w.increment("b");
        assert_eq!(w.get("a"), 2);
        assert_eq!(w.total(), 3);
        assert_eq!(w.snapshot().len(), 2);
    }

    #[test]
    fn unknown_name_reads_zero() {
        let w = WorkloadCounter::default();
        assert_eq!(w.get("nobody"), 0);
    }
}
