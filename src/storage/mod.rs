pub mod db;
pub mod lookup;
pub mod models;
pub mod pool;
pub mod schema;
pub mod seed;

pub use db::Database;
pub use lookup::{lookup_with_deadline, EligibilityLookup, LookupQuery, MemberAltIdLookup};
pub use models::{CarePlan, EligibilityPeriod, Member, MemberAltId, Subscriber, TableCounts};
pub use pool::{open_pool, DbPool};
pub use seed::SeedData;
