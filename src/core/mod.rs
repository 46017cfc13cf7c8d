//! Core module - the search engine and its supporting types

pub mod assembly;
pub mod combination;
pub mod gear;
pub mod limits;
pub mod search;

pub use assembly::{round3, Assembly};
pub use combination::{tuple_ratio, Candidate, Combinations};
pub use gear::Gear;
pub use limits::{LimitsError, SearchLimits};
pub use search::{run_search, SearchOutcome};
