pub mod config;
pub mod error;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use error::{LookupError, Result};
pub use storage::{EligibilityLookup, MemberAltId, MemberAltIdLookup};
