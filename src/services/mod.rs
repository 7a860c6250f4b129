pub mod cached_fetch;
pub use cached_fetch::{CacheStats, CachedClient, Fetched, ResponseStore};

pub mod endpoints;
pub use endpoints::ApiUrls;

pub mod harvest;
pub use harvest::{HarvestOutcome, HarvestService};

pub mod persistence;

pub mod yarn_detail;
pub use yarn_detail::YarnDetailService;
