// Pure derivation of member versions.
//
// Purpose
// - Decide the temporal fields of a new or closing version without touching storage.
//
// Responsibilities
// - Version numbers come from the previous row only; there is no shared counter.
// - Payload fields always come from the candidate.

use chrono::NaiveDate;

use crate::modules::members::core::member::{
    CurrentIndicator, MemberCandidate, MemberVersion, OPEN_END_DATE, PendingVersion,
};

pub const FIRST_VERSION: u32 = 1;

/// Field values written onto the active row when it is superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closing {
    pub curr_ind: CurrentIndicator,
    pub eff_end_date: NaiveDate,
}

pub fn closing(today: NaiveDate) -> Closing {
    Closing {
        curr_ind: CurrentIndicator::Inactive,
        eff_end_date: today,
    }
}

pub fn first_version(candidate: MemberCandidate, today: NaiveDate) -> PendingVersion {
    active_version(candidate, FIRST_VERSION, today)
}

pub fn next_version(
    previous: &MemberVersion,
    candidate: MemberCandidate,
    today: NaiveDate,
) -> PendingVersion {
    active_version(candidate, previous.version.saturating_add(1), today)
}

fn active_version(candidate: MemberCandidate, version: u32, today: NaiveDate) -> PendingVersion {
    PendingVersion {
        member_id: candidate.member_id,
        details: candidate.details,
        version,
        curr_ind: CurrentIndicator::Active,
        eff_start_date: today,
        eff_end_date: OPEN_END_DATE,
    }
}

#[cfg(test)]
mod versioning_tests {
    use super::*;
    use crate::modules::members::core::member::MemberDetails;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn candidate(first_name: &str) -> MemberCandidate {
        MemberCandidate::new(
            "M1",
            MemberDetails {
                first_name: Some(first_name.into()),
                ..MemberDetails::default()
            },
        )
    }

    #[rstest]
    fn it_should_derive_an_open_first_version(today: NaiveDate) {
        let pending = first_version(candidate("Alice"), today);
        assert_eq!(pending.version, 1);
        assert_eq!(pending.curr_ind, CurrentIndicator::Active);
        assert_eq!(pending.eff_start_date, today);
        assert_eq!(pending.eff_end_date, OPEN_END_DATE);
        assert_eq!(pending.details.first_name.as_deref(), Some("Alice"));
    }

    #[rstest]
    #[case(1, 2)]
    #[case(7, 8)]
    fn it_should_increment_the_previous_version(
        today: NaiveDate,
        #[case] previous_version: u32,
        #[case] expected: u32,
    ) {
        let previous = PendingVersion {
            version: previous_version,
            ..first_version(candidate("Alice"), today)
        }
        .with_id(Uuid::now_v7());
        let pending = next_version(&previous, candidate("Alice B."), today);
        assert_eq!(pending.version, expected);
        assert_eq!(pending.curr_ind, CurrentIndicator::Active);
        assert_eq!(pending.details.first_name.as_deref(), Some("Alice B."));
    }

    #[rstest]
    fn it_should_close_with_todays_date(today: NaiveDate) {
        let closed = closing(today);
        assert_eq!(closed.curr_ind, CurrentIndicator::Inactive);
        assert_eq!(closed.eff_end_date, today);
    }
}
