use tracing::info;

use crate::{
    config::DatabaseConfig,
    error::Result,
    storage::{
        models::TableCounts,
        pool::{open_pool, DbPool, PooledConnection},
        schema::{self, CARE_PLAN_TABLE, ELIGIBILITY_TABLE, MEMBER_TABLE, SUBSCRIBER_TABLE},
        seed::SeedData,
    },
};

/// Administrative handle over the lookup database: schema bootstrap, fixture
/// seeding and counts. The lookup itself lives in [`crate::storage::lookup`].
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = open_pool(config)?;
        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    pub fn init_schema(&self) -> Result<()> {
        schema::init_schema(&*self.conn()?)
    }

    pub fn seed(&self, data: &SeedData) -> Result<()> {
        let mut conn = self.conn()?;
        data.apply(&mut conn)?;
        info!("Fixture applied to database");
        Ok(())
    }

    pub fn table_counts(&self) -> Result<TableCounts> {
        let conn = self.conn()?;
        let count = |table: &str| -> Result<usize> {
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
            Ok(n as usize)
        };

        Ok(TableCounts {
            subscribers: count(SUBSCRIBER_TABLE)?,
            members: count(MEMBER_TABLE)?,
            eligibility_periods: count(ELIGIBILITY_TABLE)?,
            care_plans: count(CARE_PLAN_TABLE)?,
        })
    }
}
