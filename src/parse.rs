use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::relative::normalize_relative_time;
use crate::{Error, Result, NOT_AVAILABLE};

/// Format of [`JobRecord::scraped_at`].
pub const SCRAPED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One scraped listing. Only `title` and `company` are guaranteed, the rest may be `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted_time: String,
    pub posted_ago: String,
    pub url: String,
    pub scraped_at: String,
}

/// Why a candidate node didn't become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    EmptyTitle,
    MissingCompany,
    EmptyCompany,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Record(JobRecord),
    Skipped(SkipReason),
}

/// Selectors for the fields of a listing card.
pub struct CardSelectors {
    candidate: Selector,
    title: Selector,
    company: Selector,
    link: Selector,
    time: Selector,
    location: Selector,
}

impl CardSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            candidate: create_selector("li")?,
            title: create_selector("h3.base-search-card__title")?,
            company: create_selector("h4.base-search-card__subtitle")?,
            link: create_selector("a.base-card__full-link")?,
            time: create_selector("time")?,
            location: create_selector("span.job-search-card__location")?,
        })
    }
}

/// Parses a page of results.
/// Returns one [`Extraction`] per candidate `<li>`, in document order.
/// An empty `Vec` means the page held no candidates at all.
pub fn parse_page(
    html: &str,
    selectors: &CardSelectors,
    base: &Url,
    scraped_at: &str,
) -> Vec<Extraction> {
    let doc = Html::parse_document(html);
    doc.select(&selectors.candidate)
        .map(|card| extract_card(card, selectors, base, scraped_at))
        .collect()
}

/// Reads the fixed fields out of a single card.
pub fn extract_card(
    card: ElementRef<'_>,
    selectors: &CardSelectors,
    base: &Url,
    scraped_at: &str,
) -> Extraction {
    let title = match card.select(&selectors.title).next().map(stripped_text) {
        None => return Extraction::Skipped(SkipReason::MissingTitle),
        Some(t) if t.is_empty() => return Extraction::Skipped(SkipReason::EmptyTitle),
        Some(t) => t,
    };
    let company = match card.select(&selectors.company).next().map(stripped_text) {
        None => return Extraction::Skipped(SkipReason::MissingCompany),
        Some(c) if c.is_empty() => return Extraction::Skipped(SkipReason::EmptyCompany),
        Some(c) => c,
    };

    let location = card
        .select(&selectors.location)
        .next()
        .map(stripped_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let url = card
        .select(&selectors.link)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|href| resolve_href(href, base))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let (posted_time, posted_ago) = match card.select(&selectors.time).next() {
        Some(time) => {
            let raw = stripped_text(time);
            let ago = normalize_relative_time(&raw).unwrap_or_else(|e| {
                tracing::debug!("{e}");
                NOT_AVAILABLE.to_string()
            });
            (raw, ago)
        }
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };

    Extraction::Record(JobRecord {
        title,
        company,
        location,
        posted_time,
        posted_ago,
        url,
        scraped_at: scraped_at.to_string(),
    })
}

/// Absolute and unparseable hrefs are kept as written, relative ones are joined onto `base`.
fn resolve_href(href: &str, base: &Url) -> String {
    match Url::parse(href) {
        Ok(_) => href.to_string(),
        Err(_) => base
            .join(href)
            .map(String::from)
            .unwrap_or_else(|_| href.to_string()),
    }
}

/// Every text segment under the node trimmed and glued together, empty ones dropped.
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|s| !s.is_empty()).collect()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}
