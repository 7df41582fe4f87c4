//! Roster intégré, utilisé quand aucun fichier n'est fourni.

use crate::model::{ClinicId, Clinician, Roster, SundaySession, Title};

const RESIDENTS: [&str; 8] = [
    "Dr. Amjad",
    "Dr. Ziad",
    "Dr. Sara",
    "Dr. Ohood",
    "Dr. Abdullah",
    "Dr. Tariq",
    "Dr. Faisel",
    "Dr. Roqaya",
];

const SUPERVISORS: [(&str, Title); 11] = [
    ("Dr. M Atef", Title::Consultant),
    ("Dr. M Shady", Title::Consultant),
    ("Dr. Moatez", Title::Specialist),
    ("Dr. M Sandokji", Title::Consultant),
    ("Dr. Abeer", Title::Specialist),
    ("Dr. Ahmed E.", Title::Specialist),
    ("Dr. Nesam", Title::Consultant),
    ("Dr. Hanin", Title::Specialist),
    ("Dr. Asayel", Title::Specialist),
    ("Dr. Hind", Title::Specialist),
    ("Dr. Bassam", Title::Specialist),
];

const CLINICS: [u32; 4] = [8, 9, 10, 15];

/// 8 résidents, 11 superviseurs, cliniques 8, 9, 10 et 15 ; tous flexibles matin/soir.
pub fn builtin_roster() -> Roster {
    let residents = RESIDENTS
        .iter()
        .map(|name| Clinician::resident(*name).with_sunday_session(SundaySession::Both));
    let supervisors = SUPERVISORS.iter().map(|(name, title)| {
        Clinician::supervisor(*name, title.clone()).with_sunday_session(SundaySession::None)
    });
    Roster::new(
        residents.chain(supervisors).collect(),
        CLINICS.iter().copied().map(ClinicId::from).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn builtin_is_valid() {
        let r = builtin_roster();
        r.validate().unwrap();
        assert_eq!(r.clinicians.len(), 19);
        assert_eq!(
            r.clinicians.iter().filter(|c| c.role() == Role::Resident).count(),
            8
        );
        assert_eq!(r.clinics.len(), 4);
    }
}
