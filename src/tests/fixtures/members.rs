// Shared fixtures for member tests.

use chrono::NaiveDate;

use crate::modules::members::core::member::{MemberCandidate, MemberDetails};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

pub fn candidate(member_id: &str, first_name: &str) -> MemberCandidate {
    MemberCandidate::new(
        member_id,
        MemberDetails {
            first_name: Some(first_name.to_string()),
            last_name: Some("Smith".to_string()),
            primary_number: Some("555-0100".to_string()),
        },
    )
}
