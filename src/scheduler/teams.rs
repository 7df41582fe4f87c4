use super::types::TeamPolicy;
use crate::model::{Clinician, Shift, ShiftPreference};
use rand::seq::SliceRandom;
use rand::Rng;

/// Équipes de jour (AM) et de soir (PM) pour tout un run.
#[derive(Debug, Clone, Default)]
pub struct Teams<'a> {
    pub day: Vec<&'a Clinician>,
    pub night: Vec<&'a Clinician>,
}

impl<'a> Teams<'a> {
    pub fn for_shift(&self, shift: Shift) -> &[&'a Clinician] {
        match shift {
            Shift::Am => &self.day,
            Shift::Pm => &self.night,
        }
    }
}

/// Répartit le roster en équipes selon la préférence de demi-journée.
///
/// En mode `Balanced`, les flexibles sont mélangés puis placés un à un dans
/// l'équipe la moins fournie (égalité : équipe de jour).
pub fn partition<'a, R: Rng + ?Sized>(
    clinicians: &'a [Clinician],
    policy: TeamPolicy,
    rng: &mut R,
) -> Teams<'a> {
    let mut teams = Teams::default();
    let mut flexible = Vec::new();

    for c in clinicians {
        match c.shift_preference {
            ShiftPreference::Day => teams.day.push(c),
            ShiftPreference::Night => teams.night.push(c),
            ShiftPreference::Both => flexible.push(c),
        }
    }

    match policy {
        TeamPolicy::Independent => {
            teams.day.extend(flexible.iter().copied());
            teams.night.extend(flexible);
        }
        TeamPolicy::Balanced => {
            flexible.shuffle(rng);
            for c in flexible {
                if teams.day.len() <= teams.night.len() {
                    teams.day.push(c);
                } else {
                    teams.night.push(c);
                }
            }
        }
    }

    teams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Title;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster() -> Vec<Clinician> {
        let mut out = vec![
            Clinician::resident("day").with_shift_preference(ShiftPreference::Day),
            Clinician::supervisor("night", Title::Consultant)
                .with_shift_preference(ShiftPreference::Night),
        ];
        out.extend((0..5).map(|i| Clinician::resident(format!("flex{i}"))));
        out
    }

    #[test]
    fn independent_puts_flexible_in_both() {
        let r = roster();
        let teams = partition(&r, TeamPolicy::Independent, &mut StdRng::seed_from_u64(1));
        assert_eq!(teams.day.len(), 6);
        assert_eq!(teams.night.len(), 6);
        assert!(teams.day.iter().all(|c| c.name != "night"));
        assert!(teams.night.iter().all(|c| c.name != "day"));
    }

    #[test]
    fn balanced_splits_flexible_once() {
        let r = roster();
        for seed in 0..10 {
            let teams = partition(&r, TeamPolicy::Balanced, &mut StdRng::seed_from_u64(seed));
            assert_eq!(teams.day.len() + teams.night.len(), r.len());
            assert!(teams.day.len().abs_diff(teams.night.len()) <= 1);
            assert!(teams.day.iter().any(|c| c.name == "day"));
            assert!(teams.night.iter().any(|c| c.name == "night"));
            for c in &teams.day {
                assert!(!teams.night.iter().any(|n| n.name == c.name));
            }
        }
    }

    #[test]
    fn for_shift_selects_team() {
        let r = roster();
        let teams = partition(&r, TeamPolicy::Independent, &mut StdRng::seed_from_u64(0));
        assert_eq!(teams.for_shift(Shift::Am).len(), teams.day.len());
        assert_eq!(teams.for_shift(Shift::Pm).len(), teams.night.len());
    }
}
