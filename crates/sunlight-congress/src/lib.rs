//! Client for the Sunlight Labs Congress API.
//!
//! Maps the service's legislators, committees and districts onto typed
//! entities. Filters are encoded from entity values ([`params`]), each call
//! goes through a pre-resolved [`endpoint::Endpoint`], and the service's
//! nested `{"response": ...}` envelopes are flattened by [`envelope`].
//!
//! Relations that are not on the wire (a district's representative, a
//! legislator's committees, ...) are fetched on first access and cached on
//! the entity instance; see [`Relation`].
//!
//! See <http://services.sunlightlabs.com/docs/congressapi/>

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod client;
pub mod committees;
pub mod config;
pub mod districts;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod legislators;
pub mod params;
pub mod relation;
pub mod transport;

pub use client::SunlightClient;
pub use committees::Committee;
pub use config::{Config, ConfigError};
pub use districts::{District, DistrictPlan};
pub use error::{DecodeError, SunlightError};
pub use legislators::{Legislator, SearchResult};
pub use params::{FilterSet, Params};
pub use relation::Relation;
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::mock;
