//! logwarden logs - listing, tailing, searching and retention of log files
//!
//! Every operation derives its result from the filesystem at call time;
//! nothing is cached between calls.

mod catalog;
mod classifier;
mod errors;
mod follow;
mod inspector;
mod reader;
mod retention;
mod search;

pub use catalog::FileCatalog;
pub use classifier::{classify, extract_level, extract_timestamp};
pub use errors::ErrorExtractor;
pub use follow::LogFollower;
pub use inspector::LogInspector;
pub use reader::{ReverseLineReader, TailSnapshot};
pub use retention::RetentionSweeper;
pub use search::LogSearcher;
