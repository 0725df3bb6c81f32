//! Job listing scraper.
//! Pages through the public guest job search, extracts listing cards into
//! [`JobRecord`]s and writes them to a JSON file.

mod error;
mod macros;
pub mod parse;
pub mod process;
pub mod query;
pub mod relative;
pub mod report;
pub mod request;

use std::time::Duration;

pub use error::{Error, Result};
pub use parse::{Extraction, JobRecord, SkipReason};
pub use process::{search_jobs, SearchOutcome, StopReason};
pub use query::SearchQuery;
pub use request::{HttpPageSource, PageResponse, PageSource};

pub const BASE_URL: &str = "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";
/// Results the endpoint serves per page.
pub const BATCH_SIZE: usize = 25;
/// Wait between two page requests.
pub const PAGE_DELAY: Duration = Duration::from_secs(2);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Placeholder for absent optional fields.
pub const NOT_AVAILABLE: &str = "N/A";

pub const DEFAULT_LOOKBACK_HOURS: i64 = 24;
pub const DEFAULT_LOCATION: &str = "India";
pub const DEFAULT_MAX_RESULTS: usize = 25;
