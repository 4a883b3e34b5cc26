//! Congressional districts.

use serde::Deserialize;
use serde_json::Value;

use crate::client::SunlightClient;
use crate::envelope::{decode_record, Entity, JsonPath};
use crate::error::{DecodeError, SunlightError};
use crate::legislators::Legislator;
use crate::params::{Filter, ParamSource, QueryParams};
use crate::relation::Relation;

/// A congressional district, identified by state and district number.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct District {
    pub state: String,
    pub number: String,

    #[serde(skip)]
    pub representative: Relation<Legislator>,
    #[serde(skip)]
    pub senators: Relation<Vec<Legislator>>,
}

impl District {
    /// The House member for this district.
    ///
    /// The first successful call blocks on a `legislators.get` request
    /// matching `state` and `district`; later calls return the cached value.
    /// Taking `&mut self` means a shared instance needs external locking.
    ///
    /// # Errors
    ///
    /// Returns `SunlightError::InvalidState` without any request when
    /// `state` or `number` is empty, or the request's error otherwise.
    pub fn representative(&mut self, client: &SunlightClient) -> Result<&Legislator, SunlightError> {
        let (state, number) = (&self.state, &self.number);
        self.representative.resolve_with(|| {
            if state.is_empty() {
                return Err(SunlightError::InvalidState("district state"));
            }
            if number.is_empty() {
                return Err(SunlightError::InvalidState("district number"));
            }
            client.legislator(&Legislator {
                state: state.clone(),
                district: number.clone(),
                ..Legislator::default()
            })
        })
    }

    /// The senators for this district's state.
    ///
    /// The first successful call blocks on a `legislators.getList` request
    /// for `title=Sen` in `state`; later calls return the cached list.
    /// Taking `&mut self` means a shared instance needs external locking.
    ///
    /// # Errors
    ///
    /// Returns `SunlightError::InvalidState` without any request when `state`
    /// is empty, or the request's error otherwise.
    pub fn senators(&mut self, client: &SunlightClient) -> Result<&[Legislator], SunlightError> {
        let state = &self.state;
        let senators = self.senators.resolve_with(|| {
            if state.is_empty() {
                return Err(SunlightError::InvalidState("district state"));
            }
            client.legislators(&[Legislator {
                title: "Sen".into(),
                state: state.clone(),
                ..Legislator::default()
            }])
        })?;
        Ok(senators.as_slice())
    }
}

impl Filter for District {
    const FIELDS: &'static [(&'static str, fn(&Self) -> &str)] =
        &[("state", |d| &d.state), ("number", |d| &d.number)];
}

impl ParamSource for District {
    fn append_to(&self, query: &mut QueryParams) {
        self.encode_into(query);
    }
}

impl Entity for District {
    const ITEM_KEY: &'static str = "district";
    const LIST_KEY: &'static str = "districts";

    fn from_json(value: &Value, path: &JsonPath) -> Result<Self, DecodeError> {
        decode_record(value, path)
    }
}

/// Which redistricting map `districts.getDistrictFromLatLong` should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistrictPlan {
    /// Districts drawn after the 2000 census, in force through 2012.
    #[default]
    Y2010,
    /// Districts redrawn for the 2012 elections.
    Y2012,
}

impl DistrictPlan {
    #[must_use]
    pub const fn as_param(self) -> u16 {
        match self {
            Self::Y2010 => 2010,
            Self::Y2012 => 2012,
        }
    }
}
