pub mod error;
pub mod growth;
pub mod types;

#[cfg(feature = "business")]
pub mod business;

pub use error::SmbMetricsError;
pub use types::*;

/// Standard result type for all smb-metrics operations
pub type SmbResult<T> = Result<T, SmbMetricsError>;
