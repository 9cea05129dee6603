// Versioned member record.
//
// Purpose
// - Describe what a client submits (MemberCandidate) and what the collection stores (MemberVersion).
//
// Responsibilities
// - Carry the temporal fields (version, currInd, effective dates) next to the opaque payload.
// - Keep the wire names of the member document (camelCase, "Y"/"N" indicator).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// End date carried by every active version.
pub const OPEN_END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2099, 12, 31) {
    Some(date) => date,
    None => panic!("invalid open end date"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentIndicator {
    #[serde(rename = "Y")]
    Active,
    #[serde(rename = "N")]
    Inactive,
}

impl CurrentIndicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentIndicator::Active => "Y",
            CurrentIndicator::Inactive => "N",
        }
    }
}

/// Payload copied verbatim into every version. The store never looks inside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub primary_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCandidate {
    #[serde(default)]
    pub member_id: String,
    #[serde(flatten)]
    pub details: MemberDetails,
}

impl MemberCandidate {
    pub fn new(member_id: impl Into<String>, details: MemberDetails) -> Self {
        Self {
            member_id: member_id.into(),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberVersion {
    pub id: Uuid,
    pub member_id: String,
    #[serde(flatten)]
    pub details: MemberDetails,
    pub version: u32,
    pub curr_ind: CurrentIndicator,
    pub eff_start_date: NaiveDate,
    pub eff_end_date: NaiveDate,
}

impl MemberVersion {
    pub fn is_active(&self) -> bool {
        self.curr_ind == CurrentIndicator::Active
    }
}

/// A version that has been derived but not yet written; the collection assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVersion {
    pub member_id: String,
    pub details: MemberDetails,
    pub version: u32,
    pub curr_ind: CurrentIndicator,
    pub eff_start_date: NaiveDate,
    pub eff_end_date: NaiveDate,
}

impl PendingVersion {
    pub fn with_id(self, id: Uuid) -> MemberVersion {
        MemberVersion {
            id,
            member_id: self.member_id,
            details: self.details,
            version: self.version,
            curr_ind: self.curr_ind,
            eff_start_date: self.eff_start_date,
            eff_end_date: self.eff_end_date,
        }
    }
}
