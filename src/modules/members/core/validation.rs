use crate::modules::members::core::member::MemberCandidate;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Member ID cannot be empty")]
    BlankMemberId,
}

/// Accepts a member id only when it has at least one non-whitespace character.
pub fn validate_member_id(member_id: &str) -> Result<&str, ValidationError> {
    if member_id.trim().is_empty() {
        return Err(ValidationError::BlankMemberId);
    }
    Ok(member_id)
}

pub fn validate_candidate(candidate: &MemberCandidate) -> Result<(), ValidationError> {
    validate_member_id(&candidate.member_id).map(|_| ())
}

#[cfg(test)]
mod validation_tests {
    use super::*;
    use crate::modules::members::core::member::MemberDetails;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case(" ")]
    #[case("\t\n")]
    fn it_should_reject_blank_member_ids(#[case] member_id: &str) {
        assert_eq!(
            validate_member_id(member_id),
            Err(ValidationError::BlankMemberId)
        );
    }

    #[rstest]
    #[case("M1")]
    #[case(" M1 ")]
    fn it_should_accept_member_ids_with_content(#[case] member_id: &str) {
        assert_eq!(validate_member_id(member_id), Ok(member_id));
    }

    #[rstest]
    fn it_should_validate_the_candidate_member_id() {
        let candidate = MemberCandidate::new("  ", MemberDetails::default());
        assert!(validate_candidate(&candidate).is_err());
    }
}
