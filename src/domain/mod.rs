pub mod outcome;
pub mod site;

pub use outcome::{DownloadTarget, Outcome, RunSummary};
pub use site::{SiteId, SiteSelection};
