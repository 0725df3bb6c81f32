use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    InvalidSelector(String),

    #[error("Search keywords can't be empty")]
    EmptyKeywords,

    #[error("Lookback window must be zero or more hours, got: {0}")]
    NegativeLookback(i64),

    #[error("Relative time text names a unit but holds no ASCII number: {0:?}")]
    MalformedTimeText(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt Error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
