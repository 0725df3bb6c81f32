use crate::{Error, Result, BATCH_SIZE};

/// Parameters of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub location: String,
    pub lookback_hours: u64,
    pub max_results: usize,
}

impl SearchQuery {
    /// Rejects blank keywords and a negative lookback window. Keywords are stored trimmed.
    pub fn new(
        keyword: impl Into<String>,
        location: impl Into<String>,
        lookback_hours: i64,
        max_results: usize,
    ) -> Result<Self> {
        let keyword = keyword.into().trim().to_string();
        if keyword.is_empty() {
            return Err(Error::EmptyKeywords);
        }
        let lookback_hours =
            u64::try_from(lookback_hours).map_err(|_| Error::NegativeLookback(lookback_hours))?;
        Ok(Self {
            keyword,
            location: location.into(),
            lookback_hours,
            max_results,
        })
    }

    pub fn time_filter(&self) -> String {
        time_filter(self.lookback_hours)
    }

    /// Query parameters for the page starting at `start`.
    pub fn page_params(&self, start: usize) -> Vec<(&'static str, String)> {
        vec![
            ("keywords", self.keyword.clone()),
            ("location", self.location.clone()),
            ("f_TPR", self.time_filter()),
            ("start", start.to_string()),
            ("count", BATCH_SIZE.to_string()),
        ]
    }

    pub fn output_file_name(&self) -> String {
        output_file_name(&self.keyword)
    }
}

/// Encodes "posted within the last `hours` hours" as the `r<seconds>` token.
pub fn time_filter(hours: u64) -> String {
    format!("r{}", hours.saturating_mul(3600))
}

pub fn output_file_name(keyword: &str) -> String {
    format!("linkedin_jobs_{}.json", keyword.replace(' ', "_"))
}
