pub mod fiber;
pub mod group;
pub mod pattern;
pub mod project;
pub mod yarn;

pub use fiber::{FiberContent, YarnFiberRecord};
pub use group::PatternGroup;
pub use pattern::{PatternRecord, PatternSet};
pub use project::{PatternProjectGroup, ProjectRecord, ResultSet};
pub use yarn::{PatternYarnGroup, ProjectYarnRecord, YarnCatalogEntry, YarnUsage};
