pub mod config;
pub mod problem;
pub mod profile;
pub mod summary;

pub use config::HarnessConfig;
pub use problem::{Pool, PoolSelection, ProblemId, ProblemLocation};
pub use profile::{BuildConfiguration, Profile};
pub use summary::RunSummary;
