//! Transport collaborator: issue one GET, hand back status and body.
//!
//! [`SunlightClient`](crate::SunlightClient) only ever talks to a
//! [`Transport`]. [`HttpTransport`] is the real implementation on top of
//! `reqwest`'s blocking client; [`mock::MockTransport`] (behind the
//! `test-utils` feature) replays canned responses and records requests.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Failure to obtain any response at all.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connect, DNS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Transport could not serve the request for another reason
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Raw HTTP response as seen by the endpoint layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body decoded as text, lossily, with surrounding whitespace removed.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }
}

/// Issues blocking GET requests.
pub trait Transport: Send + Sync {
    /// Fetch `url`. A non-2xx status is still `Ok`; only transport-level
    /// failures are errors.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when no response could be obtained.
    fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;
}

/// `reqwest` blocking implementation of [`Transport`].
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Create a transport with a custom `reqwest` client (for testing with custom config).
    #[must_use]
    pub const fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(RawResponse { status, body })
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{RawResponse, Transport, TransportError, Url};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock implementation of `Transport` for unit tests.
    ///
    /// Queue responses with `push_*` methods; they are served in order. A call
    /// with nothing queued fails with `TransportError::Unavailable`. Every
    /// requested URL is recorded and can be inspected with `calls()`.
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
        calls: Mutex<Vec<Url>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue a 200 response carrying `body` serialized as JSON.
        pub fn push_json(&self, body: &serde_json::Value) {
            self.push_response(200, body.to_string());
        }

        /// Queue a response with an arbitrary status and body.
        pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
            self.responses.lock().unwrap().push_back(Ok(RawResponse {
                status,
                body: body.into(),
            }));
        }

        /// Queue a transport failure.
        pub fn push_error(&self, message: &str) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(TransportError::Unavailable(message.to_string())));
        }

        /// All URLs requested so far.
        pub fn calls(&self) -> Vec<Url> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Query pairs of the `n`th request.
        pub fn query_of(&self, n: usize) -> Vec<(String, String)> {
            self.calls.lock().unwrap()[n]
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for MockTransport {
        fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
            self.calls.lock().unwrap().push(url.clone());

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Unavailable("no response queued".into())))
        }
    }
}
