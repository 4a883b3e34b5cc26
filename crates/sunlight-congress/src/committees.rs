//! Committees and subcommittees.

use serde::Deserialize;
use serde_json::Value;

use crate::client::SunlightClient;
use crate::envelope::{decode_record, unwrap_list, Entity, JsonPath};
use crate::error::{DecodeError, SunlightError};
use crate::legislators::Legislator;
use crate::params::{Filter, ParamSource, QueryParams};
use crate::relation::Relation;

/// A legislative committee.
///
/// `subcommittees` is populated from the payload (empty when the endpoint
/// omits it). Members are only inline on `committees.get`; elsewhere they
/// are fetched on demand by [`Committee::members`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Committee {
    pub id: String,
    pub name: String,
    pub chamber: String,

    #[serde(skip)]
    pub subcommittees: Vec<Committee>,

    #[serde(skip)]
    pub members: Relation<Vec<Legislator>>,
}

impl Committee {
    /// Members of this committee.
    ///
    /// Returns the inline membership when the committee came from
    /// `committees.get`. Otherwise the first successful call blocks on a
    /// `committees.get` request keyed by `id` and caches the result on this
    /// instance; a shared instance needs external locking.
    ///
    /// # Errors
    ///
    /// Returns `SunlightError::InvalidState` without any request when `id`
    /// is empty, or the request's error otherwise.
    pub fn members(&mut self, client: &SunlightClient) -> Result<&[Legislator], SunlightError> {
        let id = &self.id;
        let members = self.members.resolve_with(|| {
            if id.is_empty() {
                return Err(SunlightError::InvalidState("committee id"));
            }
            let committee = client.committee(id)?;
            Ok(committee.members.into_value().unwrap_or_default())
        })?;
        Ok(members.as_slice())
    }
}

impl Filter for Committee {
    const FIELDS: &'static [(&'static str, fn(&Self) -> &str)] = &[
        ("id", |c| &c.id),
        ("name", |c| &c.name),
        ("chamber", |c| &c.chamber),
    ];
}

impl ParamSource for Committee {
    fn append_to(&self, query: &mut QueryParams) {
        self.encode_into(query);
    }
}

impl Entity for Committee {
    const ITEM_KEY: &'static str = "committee";
    const LIST_KEY: &'static str = "committees";

    fn from_json(value: &Value, path: &JsonPath) -> Result<Self, DecodeError> {
        let mut committee: Self = decode_record(value, path)?;

        if let Some(subcommittees) = value.get("subcommittees") {
            committee.subcommittees = unwrap_list(subcommittees, &path.key("subcommittees"))?;
        }
        if let Some(members) = value.get("members") {
            let members = unwrap_list(members, &path.key("members"))?;
            committee.members = Relation::resolved(members);
        }

        Ok(committee)
    }
}
