//! Project records: scanning, building and enrichment
//!
//! Data flows one way through this module: document lines are scanned into
//! a [`ProjectRecord`] by [`build`], which is then handed to [`enrich`] for
//! code-hosting statistics before the report assembler turns it into a row.

mod builder;
mod enrich;
mod level;
mod record;
mod scanner;

pub use builder::{build, DocumentRole, SourceDocument};
pub use enrich::{enrich, CommitActivity, StatsProvider, WeeklyActivity};
pub use level::ProjectLevel;
pub use record::{LinkSet, ProjectRecord, RepoMeta};
pub use scanner::{scan, scan_links, LinkRules};
