//! Génération des jours ouvrés d'une période.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Paire de jours de repos hebdomadaires (aucune consultation ces jours-là).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestDays(pub Weekday, pub Weekday);

impl Default for RestDays {
    fn default() -> Self {
        Self(Weekday::Fri, Weekday::Sat)
    }
}

impl RestDays {
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 == day || self.1 == day
    }
}

/// Itérateur des dates actives entre `start` et `end` inclus.
///
/// Clonable : un clone repart du même point, ce qui permet de rejouer la séquence.
#[derive(Debug, Clone)]
pub struct ActiveDates {
    next: Option<NaiveDate>,
    end: NaiveDate,
    rest: RestDays,
}

impl Iterator for ActiveDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while let Some(current) = self.next {
            if current > self.end {
                self.next = None;
                break;
            }
            self.next = current.succ_opt();
            if !self.rest.contains(current.weekday()) {
                return Some(current);
            }
        }
        None
    }
}

/// Dates entre `start` et `end` (incluses) hors jours de repos.
/// Une période inversée donne une séquence vide.
pub fn active_dates(start: NaiveDate, end: NaiveDate, rest: RestDays) -> ActiveDates {
    ActiveDates {
        next: (start <= end).then_some(start),
        end,
        rest,
    }
}

/// Nom complet anglais du jour ("Sunday", ...).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn skips_default_rest_days() {
        // 2025-10-05 est un dimanche
        let dates: Vec<_> = active_dates(d(2025, 10, 5), d(2025, 10, 11), RestDays::default()).collect();
        assert_eq!(dates.len(), 5);
        assert!(dates
            .iter()
            .all(|x| x.weekday() != Weekday::Fri && x.weekday() != Weekday::Sat));
        assert_eq!(dates.first(), Some(&d(2025, 10, 5)));
        assert_eq!(dates.last(), Some(&d(2025, 10, 9)));
    }

    #[test]
    fn reversed_range_is_empty() {
        assert_eq!(active_dates(d(2025, 10, 9), d(2025, 10, 5), RestDays::default()).count(), 0);
    }

    #[test]
    fn single_rest_day_range_is_empty() {
        // 2025-10-10 est un vendredi
        assert_eq!(active_dates(d(2025, 10, 10), d(2025, 10, 11), RestDays::default()).count(), 0);
    }

    #[test]
    fn custom_rest_days_and_replay() {
        let rest = RestDays(Weekday::Sat, Weekday::Sun);
        let seq = active_dates(d(2025, 10, 1), d(2025, 10, 31), rest);
        let first: Vec<_> = seq.clone().collect();
        let second: Vec<_> = seq.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 23);
    }

    #[test]
    fn names() {
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
        assert_eq!(weekday_name(Weekday::Thu), "Thursday");
    }
}
