//! Endpoint descriptors.
//!
//! Each remote operation is an HTTP GET to `<base>/<resource>.<method>.json`.
//! The full set is resolved against the configured base URL once, when the
//! client is built, and is read-only afterwards.

use reqwest::Url;

/// One remote operation, pre-resolved to its request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    resource: &'static str,
    method: &'static str,
    url: Url,
}

impl Endpoint {
    /// Resolve `<resource>.<method>.json` against `base`.
    ///
    /// # Errors
    ///
    /// Returns an error message if the joined URL is not valid.
    pub fn resolve(base: &Url, resource: &'static str, method: &'static str) -> Result<Self, String> {
        let url = base
            .join(&format!("{resource}.{method}.json"))
            .map_err(|e| format!("cannot resolve {resource}.{method} against {base}: {e}"))?;
        Ok(Self {
            resource,
            method,
            url,
        })
    }

    #[must_use]
    pub const fn resource(&self) -> &'static str {
        self.resource
    }

    #[must_use]
    pub const fn method(&self) -> &'static str {
        self.method
    }

    /// Request URL without query parameters.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// `resource.method`, as named in the service documentation.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}.{}", self.resource, self.method)
    }
}

/// Every operation the client issues.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub legislators_get: Endpoint,
    pub legislators_get_list: Endpoint,
    pub legislators_search: Endpoint,
    pub legislators_for_zip: Endpoint,
    pub legislators_for_lat_long: Endpoint,
    pub committees_get_list: Endpoint,
    pub committees_get: Endpoint,
    pub committees_for_legislator: Endpoint,
    pub districts_for_zip: Endpoint,
    pub district_for_lat_long: Endpoint,
}

impl Catalog {
    /// Resolve all endpoints against `base`.
    ///
    /// # Errors
    ///
    /// Returns an error message if any endpoint URL cannot be built.
    pub fn resolve(base: &Url) -> Result<Self, String> {
        Ok(Self {
            legislators_get: Endpoint::resolve(base, "legislators", "get")?,
            legislators_get_list: Endpoint::resolve(base, "legislators", "getList")?,
            legislators_search: Endpoint::resolve(base, "legislators", "search")?,
            legislators_for_zip: Endpoint::resolve(base, "legislators", "allForZip")?,
            legislators_for_lat_long: Endpoint::resolve(base, "legislators", "allForLatLong")?,
            committees_get_list: Endpoint::resolve(base, "committees", "getList")?,
            committees_get: Endpoint::resolve(base, "committees", "get")?,
            committees_for_legislator: Endpoint::resolve(base, "committees", "allForLegislator")?,
            districts_for_zip: Endpoint::resolve(base, "districts", "getDistrictsFromZip")?,
            district_for_lat_long: Endpoint::resolve(base, "districts", "getDistrictFromLatLong")?,
        })
    }
}
