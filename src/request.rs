use std::future::Future;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};

use crate::{Error, Result, BASE_URL, REQUEST_TIMEOUT};

const BROWSER_HEADERS: [(HeaderName, &str); 6] = [
    (
        header::USER_AGENT,
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        header::ACCEPT,
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    (header::ACCEPT_LANGUAGE, "en-US,en;q=0.5"),
    (header::ACCEPT_ENCODING, "gzip, deflate, br"),
    (header::DNT, "1"),
    (header::CONNECTION, "keep-alive"),
];

/// Status and body of one fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can serve pages of search results.
///
/// `Err` is reserved for transport failures: any HTTP status, including
/// errors, comes back as a [`PageResponse`].
pub trait PageSource {
    /// Endpoint relative card links are resolved against.
    fn base_url(&self) -> &Url;

    fn fetch_page(
        &self,
        params: &[(&'static str, String)],
    ) -> impl Future<Output = Result<PageResponse>> + Send;
}

/// [`PageSource`] backed by one persistent `reqwest::Client` dressed up as a desktop browser.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
}

impl HttpPageSource {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| Error::InvalidEndpoint(format!("{base_url}: {e}")))?;
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }
}

impl PageSource for HttpPageSource {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Requests a page and returns its status plus the HTML.
    /// The body of a non-success response is never read, so a broken one can't hide the status.
    async fn fetch_page(&self, params: &[(&'static str, String)]) -> Result<PageResponse> {
        let res = self
            .client
            .get(self.base_url.clone())
            .query(params)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Ok(PageResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }
        let body = res.text().await?;
        Ok(PageResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn browser_headers() -> HeaderMap {
    BROWSER_HEADERS
        .into_iter()
        .map(|(name, value)| (name, HeaderValue::from_static(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Answers a single request on localhost with `response` and returns the endpoint.
    async fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        format!("http://{addr}/search")
    }

    #[test]
    fn browser_headers_match_table() {
        let headers = browser_headers();
        assert_eq!(headers.len(), BROWSER_HEADERS.len());
        for (name, value) in BROWSER_HEADERS {
            assert_eq!(headers.get(&name).unwrap(), value, "header {name}");
        }
        assert_eq!(
            headers.get(header::USER_AGENT).unwrap(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        );
    }

    #[test]
    fn success_range() {
        let page = |status| PageResponse { status, body: String::new() };
        assert!(page(200).is_success());
        assert!(page(204).is_success());
        assert!(!page(301).is_success());
        assert!(!page(429).is_success());
        assert!(!page(500).is_success());
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(matches!(
            HttpPageSource::with_base_url("not a url"),
            Err(Error::InvalidEndpoint(_))
        ));
        assert_eq!(HttpPageSource::new().unwrap().base_url().as_str(), BASE_URL);
    }

    #[tokio::test]
    async fn error_status_wins_over_broken_body() {
        let endpoint = serve_once(
            b"HTTP/1.1 429 Too Many Requests\r\nContent-Encoding: gzip\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot gzip!",
        )
        .await;
        let source = HttpPageSource::with_base_url(&endpoint).unwrap();
        let page = source.fetch_page(&[("start", "0".into())]).await.unwrap();
        assert_eq!(page.status, 429);
        assert!(page.body.is_empty());
    }

    #[tokio::test]
    async fn success_body_is_read() {
        let endpoint = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 10\r\nConnection: close\r\n\r\n<li>x</li>",
        )
        .await;
        let source = HttpPageSource::with_base_url(&endpoint).unwrap();
        let page = source.fetch_page(&[("start", "0".into())]).await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<li>x</li>");
    }
}
