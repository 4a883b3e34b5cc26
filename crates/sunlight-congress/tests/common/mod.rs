//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - wiremock-backed stand-in for the Sunlight API
//! - [`blocking`] - run blocking client code from an async test
//!
//! The client is synchronous and `reqwest`'s blocking client must not be
//! created or dropped on an async runtime thread, so build and use it inside
//! [`blocking`]:
//!
//! ```ignore
//! let url = server.url();
//! let result = blocking(move || client_for(&url).legislators_for_zip("02144")).await;
//! ```

pub mod http_mock;

use sunlight_congress::{Config, SunlightClient};

pub const TEST_API_KEY: &str = "test-api-key";

/// Run `f` on tokio's blocking pool and wait for it.
pub async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking test task panicked")
}

/// Real HTTP client pointed at a stub server.
pub fn client_for(base_url: &str) -> SunlightClient {
    let config = Config::default()
        .with_base_url(base_url)
        .with_api_key(TEST_API_KEY);
    SunlightClient::new(&config).expect("client should build")
}
