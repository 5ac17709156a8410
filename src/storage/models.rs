use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Policyholder row (`CMC_SBSB_SUBSC`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscriber {
    pub sbsb_ck: i64,
    pub sbsb_id: String,
    pub grgr_ck: String,
}

/// Covered individual (`CMC_MEME_MEMBER`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub meme_ck: i64,
    pub sbsb_ck: i64,
}

/// Dated coverage of a member under a group/category/plan (`CMC_MEPE_PRCS_ELIG`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EligibilityPeriod {
    pub mepe_ck: i64,
    pub meme_ck: i64,
    pub grgr_ck: String,
    pub cspd_cat: String,
    pub cspi_id: String,
    pub eff_dt: NaiveDate,
    pub term_dt: NaiveDate,
}

/// Group/category/plan combination with its prefix (`CMC_CSPI_CS_PLAN`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarePlan {
    pub grgr_ck: String,
    pub cspd_cat: String,
    pub cspi_id: String,
    pub prefix: String,
    pub eff_dt: NaiveDate,
    pub term_dt: NaiveDate,
}

/// One lookup result row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberAltId {
    pub alternate_id: String,
    pub group_id: String,
}

impl MemberAltId {
    pub fn new(alternate_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            alternate_id: alternate_id.into(),
            group_id: group_id.into(),
        }
    }
}

impl std::fmt::Display for MemberAltId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.alternate_id, self.group_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TableCounts {
    pub subscribers: usize,
    pub members: usize,
    pub eligibility_periods: usize,
    pub care_plans: usize,
}
