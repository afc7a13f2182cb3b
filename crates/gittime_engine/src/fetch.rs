use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Base of the REST API serving `/users/{user}/events`.
    pub api_base_url: String,
    /// Base of the site serving `/users/{user}/contributions` markup.
    pub graph_base_url: String,
    /// Base of the structured contribution service; no fallback when unset.
    pub fallback_base_url: Option<String>,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            graph_base_url: "https://github.com".to_string(),
            fallback_base_url: None,
            user_agent: concat!("gittime/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// A fully downloaded response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedBody {
    /// Decodes the body using the `Content-Type` charset, UTF-8 otherwise.
    pub fn text(&self) -> Result<String, FetchError> {
        let encoding = self
            .content_type
            .as_deref()
            .and_then(charset_label)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        let (text, _, had_errors) = encoding.decode(&self.bytes);
        if had_errors {
            return Err(FetchError::new(
                FailureKind::Decode,
                format!("body is not valid {}", encoding.name()),
            ));
        }
        Ok(text.into_owned())
    }
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c: char| c == '"' || c == '\''))
    })
}

/// Builds `{base}/{segments...}` with each segment percent-encoded.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = Url::parse(base)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            FetchError::new(FailureKind::InvalidUrl, format!("{base} cannot be a base"))
        })?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

/// Thin GET-only client shared by every live source.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_bytes: u64,
}

impl HttpClient {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            max_bytes: settings.max_bytes,
        })
    }

    pub async fn get(&self, url: Url, accept: &str) -> Result<FetchedBody, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchedBody {
            bytes,
            content_type,
        })
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{charset_label, endpoint, FetchedBody};

    #[test]
    fn endpoint_appends_encoded_segments() {
        let url = endpoint("https://api.example.com/", &["users", "octo cat", "events"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users/octo%20cat/events");

        let nested = endpoint("http://127.0.0.1:9000/api", &["users", "a"]).unwrap();
        assert_eq!(nested.path(), "/api/users/a");
    }

    #[test]
    fn charset_is_read_from_content_type() {
        assert_eq!(charset_label("text/html; charset=\"ISO-8859-1\""), Some("ISO-8859-1"));
        assert_eq!(charset_label("text/html"), None);
    }

    #[test]
    fn latin1_body_is_decoded() {
        let body = FetchedBody {
            bytes: b"caf\xe9".to_vec(),
            content_type: Some("text/html; charset=ISO-8859-1".to_string()),
        };
        assert_eq!(body.text().unwrap(), "caf\u{e9}");
    }

    #[test]
    fn invalid_utf8_without_charset_is_a_decode_error() {
        let body = FetchedBody {
            bytes: vec![0x41, 0xff, 0x42],
            content_type: None,
        };
        assert!(body.text().unwrap_err().is_parse_failure());
    }
}
