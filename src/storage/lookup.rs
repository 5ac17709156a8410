use chrono::NaiveDate;
use rusqlite::named_params;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    error::{LookupError, Result},
    storage::{models::MemberAltId, pool::DbPool},
};

// Both intervals are closed, so a window overlaps when it starts on or before
// the term date and ends on or after the effective date. An inverted window
// matches nothing.
const LOOKUP_SQL: &str = "
    SELECT s.SBSB_ID, p.GRGR_CK
    FROM CMC_SBSB_SUBSC s
    JOIN CMC_MEME_MEMBER m ON m.SBSB_CK = s.SBSB_CK
    JOIN CMC_MEPE_PRCS_ELIG e ON e.MEME_CK = m.MEME_CK
    JOIN CMC_CSPI_CS_PLAN p
      ON p.GRGR_CK = e.GRGR_CK
     AND p.CSPD_CAT = e.CSPD_CAT
     AND p.CSPI_ID = e.CSPI_ID
    WHERE s.SBSB_ID = :subscriber_id
      AND p.CSPI_PFX = :prefix
      AND :start_date <= :end_date
      AND e.MEPE_EFF_DT <= :end_date
      AND e.MEPE_TERM_DT >= :start_date
      AND p.CSPI_EFF_DT <= :end_date
      AND p.CSPI_TERM_DT >= :start_date
    ORDER BY e.MEPE_EFF_DT, p.CSPI_EFF_DT, e.MEPE_CK";

/// Member alternate-id lookup by subscriber, plan prefix and date window.
#[cfg_attr(test, mockall::automock)]
pub trait MemberAltIdLookup {
    /// Returns one row per matching join row; an empty list when nothing
    /// matches, including when `start` is after `end`.
    fn lookup(
        &self,
        subscriber_id: &str,
        prefix: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MemberAltId>>;
}

#[derive(Clone)]
pub struct EligibilityLookup {
    pool: DbPool,
}

impl EligibilityLookup {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MemberAltIdLookup for EligibilityLookup {
    fn lookup(
        &self,
        subscriber_id: &str,
        prefix: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MemberAltId>> {
        debug!(
            "Looking up subscriber {} prefix {} for {}..={}",
            subscriber_id, prefix, start, end
        );

        // Returned to the pool when dropped, on every path out of this fn.
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare_cached(LOOKUP_SQL)?;

        let rows = stmt
            .query_map(
                named_params! {
                    ":subscriber_id": subscriber_id,
                    ":prefix": prefix,
                    ":start_date": start,
                    ":end_date": end,
                },
                |row| {
                    Ok(MemberAltId {
                        alternate_id: row.get(0)?,
                        group_id: row.get(1)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!("Lookup for subscriber {} returned {} rows", subscriber_id, rows.len());
        Ok(rows)
    }
}

/// Parameters of a single lookup, owned so it can cross into a blocking task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub subscriber_id: String,
    pub prefix: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LookupQuery {
    pub fn new(
        subscriber_id: impl Into<String>,
        prefix: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            subscriber_id: subscriber_id.into(),
            prefix: prefix.into(),
            start,
            end,
        }
    }
}

/// Runs the lookup on the blocking pool and gives up after `deadline`.
///
/// A query still in flight at the deadline runs to completion in the
/// background and releases its connection normally.
pub async fn lookup_with_deadline<L>(
    lookup: Arc<L>,
    query: LookupQuery,
    deadline: Duration,
) -> Result<Vec<MemberAltId>>
where
    L: MemberAltIdLookup + Send + Sync + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        lookup.lookup(&query.subscriber_id, &query.prefix, query.start, query.end)
    });

    match tokio::time::timeout(deadline, task).await {
        Ok(joined) => joined
            .map_err(|e| LookupError::Other(anyhow::anyhow!("lookup task failed: {}", e)))?,
        Err(_) => Err(LookupError::DeadlineExceeded(deadline.as_millis() as u64)),
    }
}
