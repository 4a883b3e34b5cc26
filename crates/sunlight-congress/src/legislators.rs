//! Legislators: members of the House and Senate.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::client::SunlightClient;
use crate::committees::Committee;
use crate::envelope::{decode_field, decode_record, unwrap_item, Entity, JsonPath};
use crate::error::{DecodeError, SunlightError};
use crate::params::{Filter, ParamSource, QueryParams};
use crate::relation::Relation;

/// A single legislator.
///
/// Also used as a filter for `legislators.get`/`legislators.getList`: build
/// an instance holding only the values to match. Empty fields do not filter.
///
/// See <http://services.sunlightlabs.com/docs/congressapi/legislators.get(List)/>
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Legislator {
    pub title: String,
    pub firstname: String,
    pub lastname: String,
    pub name_suffix: String,
    pub nickname: String,
    pub party: String,
    pub state: String,
    pub district: String,
    pub in_office: bool,
    pub gender: String,
    pub phone: String,
    pub fax: String,
    pub website: String,
    pub webform: String,
    pub email: String,
    pub congress_office: String,
    pub bioguide_id: String,
    pub votesmart_id: String,
    pub fec_id: String,
    pub govtrack_id: String,
    pub crp_id: String,
    pub congresspedia_url: String,
    pub twitter_id: String,
    pub youtube_url: String,
    pub facebook_id: String,
    pub senate_class: String,
    pub birthdate: String,

    #[serde(skip)]
    pub committees: Relation<Vec<Committee>>,
}

impl Legislator {
    /// Committees and subcommittees this legislator sits on.
    ///
    /// The first successful call blocks on a `committees.allForLegislator`
    /// request keyed by `bioguide_id`; later calls return the cached list.
    /// Taking `&mut self` means a shared instance needs external locking.
    ///
    /// # Errors
    ///
    /// Returns `SunlightError::InvalidState` without any request when
    /// `bioguide_id` is empty, or the request's error otherwise.
    pub fn committees(&mut self, client: &SunlightClient) -> Result<&[Committee], SunlightError> {
        let bioguide_id = &self.bioguide_id;
        let committees = self.committees.resolve_with(|| {
            if bioguide_id.is_empty() {
                return Err(SunlightError::InvalidState("legislator bioguide_id"));
            }
            client.committees_for_legislator(bioguide_id)
        })?;
        Ok(committees.as_slice())
    }
}

/// `Sen John Kerry (D MA)`
impl fmt::Display for Legislator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({} {})",
            self.title, self.firstname, self.lastname, self.party, self.state
        )
    }
}

impl Filter for Legislator {
    const FIELDS: &'static [(&'static str, fn(&Self) -> &str)] = &[
        ("title", |l| &l.title),
        ("firstname", |l| &l.firstname),
        ("lastname", |l| &l.lastname),
        ("name_suffix", |l| &l.name_suffix),
        ("nickname", |l| &l.nickname),
        ("party", |l| &l.party),
        ("state", |l| &l.state),
        ("district", |l| &l.district),
        ("gender", |l| &l.gender),
        ("phone", |l| &l.phone),
        ("fax", |l| &l.fax),
        ("website", |l| &l.website),
        ("webform", |l| &l.webform),
        ("email", |l| &l.email),
        ("congress_office", |l| &l.congress_office),
        ("bioguide_id", |l| &l.bioguide_id),
        ("votesmart_id", |l| &l.votesmart_id),
        ("fec_id", |l| &l.fec_id),
        ("govtrack_id", |l| &l.govtrack_id),
        ("crp_id", |l| &l.crp_id),
        ("congresspedia_url", |l| &l.congresspedia_url),
        ("twitter_id", |l| &l.twitter_id),
        ("youtube_url", |l| &l.youtube_url),
        ("facebook_id", |l| &l.facebook_id),
        ("senate_class", |l| &l.senate_class),
        ("birthdate", |l| &l.birthdate),
    ];
}

impl ParamSource for Legislator {
    fn append_to(&self, query: &mut QueryParams) {
        self.encode_into(query);
    }
}

impl Entity for Legislator {
    const ITEM_KEY: &'static str = "legislator";
    const LIST_KEY: &'static str = "legislators";

    fn from_json(value: &Value, path: &JsonPath) -> Result<Self, DecodeError> {
        decode_record(value, path)
    }
}

/// One fuzzy name-search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Match quality from 0 to 1, 1 being a perfect match.
    pub score: f64,
    pub legislator: Legislator,
}

/// `{"results": [{"result": {"score": 0.9, "legislator": {...}}}]}`
impl Entity for SearchResult {
    const ITEM_KEY: &'static str = "result";
    const LIST_KEY: &'static str = "results";

    fn from_json(value: &Value, path: &JsonPath) -> Result<Self, DecodeError> {
        let score = decode_field(value, "score", path)?;
        let (legislator, legislator_path) = unwrap_item(value, Legislator::ITEM_KEY, path)?;
        Ok(Self {
            score,
            legislator: Legislator::from_json(legislator, &legislator_path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{Many, One, Shape};
    use serde_json::json;

    #[test]
    fn display_matches_roll_call_style() {
        let legislator = Legislator {
            title: "Sen".into(),
            firstname: "John".into(),
            lastname: "Kerry".into(),
            party: "D".into(),
            state: "MA".into(),
            ..Legislator::default()
        };
        assert_eq!(legislator.to_string(), "Sen John Kerry (D MA)");
    }

    #[test]
    fn decodes_wire_fields() {
        let body = json!({"response": {"legislator": {
            "title": "Rep",
            "firstname": "Edward",
            "lastname": "Markey",
            "party": "D",
            "state": "MA",
            "district": "7",
            "in_office": true,
            "bioguide_id": "M000133",
            "twitter_id": "markeymemo",
            "some_new_field": "ignored"
        }}});

        let legislator = One::<Legislator>::decode(&body).unwrap();

        assert_eq!(legislator.bioguide_id, "M000133");
        assert_eq!(legislator.district, "7");
        assert!(legislator.in_office);
        assert_eq!(legislator.fax, "");
        assert!(!legislator.committees.is_resolved());
    }

    #[test]
    fn in_office_type_mismatch_is_reported() {
        let body = json!({"response": {"legislator": {"in_office": "yes"}}});
        let err = One::<Legislator>::decode(&body).unwrap_err();
        assert_eq!(err.path, "response.legislator.in_office");
        assert!(err.message.contains("boolean"));
    }

    #[test]
    fn search_results_unwrap_nested_legislator() {
        let body = json!({"response": {"results": [
            {"result": {"score": 0.95, "legislator": {"lastname": "Kerry", "state": "MA"}}},
            {"result": {"score": 0.81, "legislator": {"lastname": "Kerrey", "state": "NE"}}}
        ]}});

        let results = Many::<SearchResult>::decode(&body).unwrap();

        assert_eq!(results.len(), 2);
        assert!((results[0].score - 0.95).abs() < f64::EPSILON);
        assert_eq!(results[0].legislator.lastname, "Kerry");
        assert_eq!(results[1].legislator.state, "NE");
    }

    #[test]
    fn search_result_without_score_is_an_error() {
        let body = json!({"response": {"results": [
            {"result": {"legislator": {"lastname": "Kerry"}}}
        ]}});
        let err = Many::<SearchResult>::decode(&body).unwrap_err();
        assert_eq!(err.path, "response.results[0].result");
        assert!(err.message.contains("score"));
    }
}
