//! Sunlight Congress API client.
//!
//! Every public operation performs exactly one blocking GET and returns once
//! it completes or fails. The client is immutable after construction and can
//! be shared between threads.
//!
//! # Example
//!
//! ```ignore
//! use sunlight_congress::{Config, Legislator, SunlightClient};
//!
//! let client = SunlightClient::new(&Config::load()?)?;
//! let senators = client.legislators(&[Legislator {
//!     title: "Sen".into(),
//!     state: "MA".into(),
//!     ..Legislator::default()
//! }])?;
//! for senator in &senators {
//!     println!("{senator}");
//! }
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::committees::Committee;
use crate::config::{Config, ConfigError};
use crate::districts::{District, DistrictPlan};
use crate::endpoint::{Catalog, Endpoint};
use crate::envelope::{Many, One, Shape};
use crate::error::{DecodeError, SunlightError};
use crate::legislators::{Legislator, SearchResult};
use crate::params::{encode, FilterSet, ParamSource, Params};
use crate::transport::{HttpTransport, Transport};

/// Client for the Sunlight Congress API.
pub struct SunlightClient {
    transport: Arc<dyn Transport>,
    endpoints: Catalog,
    api_key: String,
    search_threshold: f64,
}

impl SunlightClient {
    /// Create a client issuing real HTTP requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config.timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of a custom transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_transport(
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        let endpoints = Catalog::resolve(&base_url).map_err(ConfigError::Validation)?;

        Ok(Self {
            transport,
            endpoints,
            api_key: config.api_key.clone(),
            search_threshold: config.search_threshold,
        })
    }

    /// Issue one call to `endpoint` and decode the body as `S`.
    ///
    /// The query is `apikey` followed by every pair from `sources`, in order.
    ///
    /// # Errors
    ///
    /// - `SunlightError::Transport` if no response was received
    /// - `SunlightError::RemoteRejected` for a non-2xx status, carrying the body text
    /// - `SunlightError::Decode` if the body is not JSON of the expected shape
    pub fn invoke<S: Shape>(
        &self,
        endpoint: &Endpoint,
        sources: &[&dyn ParamSource],
    ) -> Result<S::Output, SunlightError> {
        let params = encode(sources);

        let mut url = endpoint.url().clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .extend_pairs(params.iter());

        tracing::debug!(
            endpoint = %endpoint.name(),
            params = params.len(),
            "issuing Sunlight API request"
        );

        let response = self.transport.get(&url)?;

        tracing::debug!(
            endpoint = %endpoint.name(),
            status = response.status,
            bytes = response.body.len(),
            "received Sunlight API response"
        );

        if !response.is_success() {
            return Err(SunlightError::RemoteRejected {
                status: response.status,
                message: response.text(),
            });
        }

        let body: Value = serde_json::from_slice(&response.body)
            .map_err(|e| DecodeError::new("$", format!("invalid JSON: {e}")))?;

        Ok(S::decode(&body)?)
    }

    /// A single current legislator matching `filter`.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`]. The service rejects filters matching
    /// zero or several legislators.
    pub fn legislator(&self, filter: &Legislator) -> Result<Legislator, SunlightError> {
        self.invoke::<One<Legislator>>(&self.endpoints.legislators_get, &[filter])
    }

    /// Like [`SunlightClient::legislator`], but also matches former legislators.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn legislator_including_former(
        &self,
        filter: &Legislator,
    ) -> Result<Legislator, SunlightError> {
        let all = Params::new().with("all_legislators", 1);
        self.invoke::<One<Legislator>>(&self.endpoints.legislators_get, &[filter, &all])
    }

    /// Current legislators matching any of `filters`.
    ///
    /// Within one filter all non-empty fields must match; the same field set
    /// on several filters matches any of their values.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn legislators(&self, filters: &[Legislator]) -> Result<Vec<Legislator>, SunlightError> {
        self.invoke::<Many<Legislator>>(
            &self.endpoints.legislators_get_list,
            &[&FilterSet(filters)],
        )
    }

    /// Like [`SunlightClient::legislators`], but also matches former legislators.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn legislators_including_former(
        &self,
        filters: &[Legislator],
    ) -> Result<Vec<Legislator>, SunlightError> {
        let all = Params::new().with("all_legislators", 1);
        self.invoke::<Many<Legislator>>(
            &self.endpoints.legislators_get_list,
            &[&FilterSet(filters), &all],
        )
    }

    /// Fuzzy search of current legislators by name, scored against the
    /// configured `search_threshold`.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn search_legislators(&self, name: &str) -> Result<Vec<SearchResult>, SunlightError> {
        self.search(name, false)
    }

    /// Fuzzy search of current and former legislators by name.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn search_legislators_including_former(
        &self,
        name: &str,
    ) -> Result<Vec<SearchResult>, SunlightError> {
        self.search(name, true)
    }

    fn search(&self, name: &str, all_legislators: bool) -> Result<Vec<SearchResult>, SunlightError> {
        let params = Params::new()
            .with("name", name)
            .with("threshold", self.search_threshold)
            .with("all_legislators", all_legislators);
        self.invoke::<Many<SearchResult>>(&self.endpoints.legislators_search, &[&params])
    }

    /// All legislators for a five digit zip code: two senators and at least
    /// one representative (more when the zip spans several districts).
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn legislators_for_zip(&self, zip: &str) -> Result<Vec<Legislator>, SunlightError> {
        let params = Params::new().with("zip", zip);
        self.invoke::<Many<Legislator>>(&self.endpoints.legislators_for_zip, &[&params])
    }

    /// All legislators for a point, usually one representative and two senators.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn legislators_for_lat_long(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Legislator>, SunlightError> {
        let params = Params::new()
            .with("latitude", latitude)
            .with("longitude", longitude);
        self.invoke::<Many<Legislator>>(&self.endpoints.legislators_for_lat_long, &[&params])
    }

    /// Committees and their subcommittees for a chamber (`house`, `senate`, `joint`).
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn committees(&self, chamber: &str) -> Result<Vec<Committee>, SunlightError> {
        let params = Params::new().with("chamber", chamber);
        self.invoke::<Many<Committee>>(&self.endpoints.committees_get_list, &[&params])
    }

    /// One committee with its subcommittees and members inline.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn committee(&self, id: &str) -> Result<Committee, SunlightError> {
        let params = Params::new().with("id", id);
        self.invoke::<One<Committee>>(&self.endpoints.committees_get, &[&params])
    }

    /// Every committee and subcommittee a legislator sits on.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn committees_for_legislator(
        &self,
        bioguide_id: &str,
    ) -> Result<Vec<Committee>, SunlightError> {
        let params = Params::new().with("bioguide_id", bioguide_id);
        self.invoke::<Many<Committee>>(&self.endpoints.committees_for_legislator, &[&params])
    }

    /// Districts overlapping a zip code; a zip may span several.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn districts_for_zip(&self, zip: &str) -> Result<Vec<District>, SunlightError> {
        let params = Params::new().with("zip", zip);
        self.invoke::<Many<District>>(&self.endpoints.districts_for_zip, &[&params])
    }

    /// The district containing a point, on the 2010 district map.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn district_for_lat_long(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<District>, SunlightError> {
        self.district_for_lat_long_on(latitude, longitude, DistrictPlan::default())
    }

    /// The district containing a point on the given district map. `None`
    /// when the service finds no district there.
    ///
    /// # Errors
    ///
    /// See [`SunlightClient::invoke`].
    pub fn district_for_lat_long_on(
        &self,
        latitude: f64,
        longitude: f64,
        plan: DistrictPlan,
    ) -> Result<Option<District>, SunlightError> {
        let params = Params::new()
            .with("latitude", latitude)
            .with("longitude", longitude)
            .with("districts", plan.as_param());
        let districts =
            self.invoke::<Many<District>>(&self.endpoints.district_for_lat_long, &[&params])?;
        Ok(districts.into_iter().next())
    }
}
