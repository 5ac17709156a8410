use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::{
    error::{LookupError, Result},
    storage::models::{CarePlan, EligibilityPeriod, Member, Subscriber},
};

/// Fixture dataset for priming a lookup database.
///
/// Dates are written as quoted `YYYY-MM-DD` strings in both TOML and JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeedData {
    #[serde(default)]
    pub subscribers: Vec<Subscriber>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub eligibility: Vec<EligibilityPeriod>,
    #[serde(default)]
    pub care_plans: Vec<CarePlan>,
}

impl SeedData {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&raw)?),
            Some("toml") => Self::from_toml(&raw),
            other => Err(LookupError::InvalidInput(format!(
                "unsupported seed format {:?} for {}",
                other,
                path.display()
            ))),
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| LookupError::InvalidInput(format!("seed TOML: {}", e)))
    }

    pub fn row_count(&self) -> usize {
        self.subscribers.len() + self.members.len() + self.eligibility.len() + self.care_plans.len()
    }

    /// Inserts every row in one transaction, replacing rows with the same key.
    pub fn apply(&self, conn: &mut Connection) -> Result<()> {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO CMC_SBSB_SUBSC (SBSB_CK, SBSB_ID, GRGR_CK)
                 VALUES (?1, ?2, ?3)",
            )?;
            for s in &self.subscribers {
                stmt.execute(params![s.sbsb_ck, s.sbsb_id, s.grgr_ck])?;
            }

            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO CMC_MEME_MEMBER (MEME_CK, SBSB_CK) VALUES (?1, ?2)",
            )?;
            for m in &self.members {
                stmt.execute(params![m.meme_ck, m.sbsb_ck])?;
            }

            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO CMC_MEPE_PRCS_ELIG
                 (MEPE_CK, MEME_CK, GRGR_CK, CSPD_CAT, CSPI_ID, MEPE_EFF_DT, MEPE_TERM_DT)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for e in &self.eligibility {
                stmt.execute(params![
                    e.mepe_ck, e.meme_ck, e.grgr_ck, e.cspd_cat, e.cspi_id, e.eff_dt, e.term_dt,
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO CMC_CSPI_CS_PLAN
                 (GRGR_CK, CSPD_CAT, CSPI_ID, CSPI_PFX, CSPI_EFF_DT, CSPI_TERM_DT)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for p in &self.care_plans {
                stmt.execute(params![
                    p.grgr_ck, p.cspd_cat, p.cspi_id, p.prefix, p.eff_dt, p.term_dt,
                ])?;
            }
        }
        tx.commit()?;

        info!("Seeded {} rows", self.row_count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::init_schema;
    use chrono::NaiveDate;

    const SAMPLE: &str = r#"
[[subscribers]]
sbsb_ck = 1
sbsb_id = "123456"
grgr_ck = "G001"

[[members]]
meme_ck = 10
sbsb_ck = 1

[[eligibility]]
mepe_ck = 100
meme_ck = 10
grgr_ck = "G001"
cspd_cat = "M"
cspi_id = "PLAN01"
eff_dt = "2024-01-01"
term_dt = "2024-12-31"

[[care_plans]]
grgr_ck = "G001"
cspd_cat = "M"
cspi_id = "PLAN01"
prefix = "PRE001"
eff_dt = "2024-01-01"
term_dt = "2024-12-31"
"#;

    #[test]
    fn test_parse_toml_fixture() {
        let seed = SeedData::from_toml(SAMPLE).unwrap();
        assert_eq!(seed.row_count(), 4);
        assert_eq!(seed.care_plans[0].prefix, "PRE001");
        assert_eq!(
            seed.eligibility[0].term_dt,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_apply_twice_replaces_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let seed = SeedData::from_toml(SAMPLE).unwrap();

        seed.apply(&mut conn).unwrap();
        seed.apply(&mut conn).unwrap();

        let subscribers: i64 = conn
            .query_row("SELECT COUNT(*) FROM CMC_SBSB_SUBSC", [], |row| row.get(0))
            .unwrap();
        let plans: i64 = conn
            .query_row("SELECT COUNT(*) FROM CMC_CSPI_CS_PLAN", [], |row| row.get(0))
            .unwrap();
        assert_eq!(subscribers, 1);
        assert_eq!(plans, 1);
    }

    #[test]
    fn test_dates_stored_as_iso_text() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        SeedData::from_toml(SAMPLE).unwrap().apply(&mut conn).unwrap();

        let eff: String = conn
            .query_row("SELECT MEPE_EFF_DT FROM CMC_MEPE_PRCS_ELIG", [], |row| row.get(0))
            .unwrap();
        assert_eq!(eff, "2024-01-01");
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seed.csv");
        std::fs::write(&path, "").unwrap();

        let err = SeedData::from_path(&path).unwrap_err();
        assert!(matches!(err, LookupError::InvalidInput(_)));
    }
}
