use chrono::Local;
use tokio::time::sleep;

use crate::parse::{parse_page, CardSelectors, Extraction, JobRecord, SCRAPED_AT_FORMAT};
use crate::request::PageSource;
use crate::{info_time, Error, SearchQuery, BATCH_SIZE, PAGE_DELAY};

/// Why the search stopped paginating.
#[derive(Debug)]
pub enum StopReason {
    TargetReached,
    /// A page came back with no candidate items.
    EmptyPage,
    /// Non-success HTTP status.
    Status(u16),
    /// The page could not be requested or read (connection, timeout, body decoding).
    Transport(Error),
}

#[derive(Debug)]
pub struct SearchOutcome {
    /// In discovery order, never longer than the requested maximum.
    pub records: Vec<JobRecord>,
    pub stop: StopReason,
    pub pages_fetched: usize,
}

/// Pages through the search results until `query.max_results` records are gathered
/// or the source runs dry.
///
/// Never fails: every problem ends the loop and whatever was accumulated is returned
/// together with the [`StopReason`].
pub async fn search_jobs<S: PageSource>(source: &S, query: &SearchQuery) -> SearchOutcome {
    let start_time = Local::now();
    info_time!(
        "Searching for '{}' in {}, posted within the last {} hours, up to {} jobs",
        query.keyword,
        query.location,
        query.lookback_hours,
        query.max_results
    );

    let mut records = Vec::with_capacity(query.max_results.min(BATCH_SIZE * 4));
    let mut pages_fetched = 0;
    let mut start = 0;

    let stop = match CardSelectors::new() {
        Ok(selectors) => loop {
            if records.len() >= query.max_results {
                break StopReason::TargetReached;
            }
            if pages_fetched > 0 {
                sleep(PAGE_DELAY).await;
            }

            let page = match source.fetch_page(&query.page_params(start)).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Request for offset {start} failed: {e}");
                    break StopReason::Transport(e);
                }
            };
            pages_fetched += 1;

            if !page.is_success() {
                tracing::warn!("Status code: {} at offset {start}", page.status);
                break StopReason::Status(page.status);
            }

            let scraped_at = Local::now().format(SCRAPED_AT_FORMAT).to_string();
            let extractions = parse_page(&page.body, &selectors, source.base_url(), &scraped_at);
            if extractions.is_empty() {
                info_time!("No more jobs found at offset {}", start);
                break StopReason::EmptyPage;
            }

            let candidates = extractions.len();
            let mut accepted = 0;
            for extraction in extractions {
                if records.len() >= query.max_results {
                    break;
                }
                match extraction {
                    Extraction::Record(job) => {
                        records.push(job);
                        accepted += 1;
                    }
                    Extraction::Skipped(reason) => {
                        tracing::debug!("Skipped a card at offset {start}: {reason:?}")
                    }
                }
            }
            info_time!(
                "Offset {}: {} of {} cards accepted, {} jobs so far",
                start,
                accepted,
                candidates,
                records.len()
            );

            start += BATCH_SIZE;
        },
        Err(e) => StopReason::Transport(e),
    };

    info_time!(
        start_time,
        "Finished search with {} jobs after {} pages ({:?})",
        records.len(),
        pages_fetched,
        stop
    );

    SearchOutcome {
        records,
        stop,
        pages_fetched,
    }
}
