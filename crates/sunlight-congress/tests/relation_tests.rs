//! Lazy relation behavior across entities, driven by the in-memory transport.

use std::sync::Arc;

use serde_json::json;
use sunlight_congress::mock::MockTransport;
use sunlight_congress::{
    Committee, Config, District, Legislator, SunlightClient, SunlightError,
};

fn client_with(transport: &Arc<MockTransport>) -> SunlightClient {
    let config = Config::default()
        .with_base_url("http://sunlight.test/api/")
        .with_api_key("test-key");
    SunlightClient::with_transport(&config, transport.clone()).expect("client should build")
}

fn senators_body() -> serde_json::Value {
    json!({"response": {"legislators": [
        {"legislator": {"title": "Sen", "lastname": "Kerry", "state": "MA", "bioguide_id": "K000148"}},
        {"legislator": {"title": "Sen", "lastname": "Brown", "state": "MA", "bioguide_id": "B001268"}}
    ]}})
}

// Missing identifiers

#[test]
fn test_missing_identifiers_fail_without_a_request() {
    let transport = Arc::new(MockTransport::new());
    let client = client_with(&transport);

    let mut legislator = Legislator::default();
    assert!(matches!(
        legislator.committees(&client),
        Err(SunlightError::InvalidState("legislator bioguide_id"))
    ));

    let mut committee = Committee::default();
    assert!(matches!(
        committee.members(&client),
        Err(SunlightError::InvalidState("committee id"))
    ));

    let mut no_state = District {
        number: "8".into(),
        ..District::default()
    };
    assert!(matches!(
        no_state.representative(&client),
        Err(SunlightError::InvalidState("district state"))
    ));
    assert!(matches!(
        no_state.senators(&client),
        Err(SunlightError::InvalidState("district state"))
    ));

    let mut no_number = District {
        state: "MA".into(),
        ..District::default()
    };
    assert!(matches!(
        no_number.representative(&client),
        Err(SunlightError::InvalidState("district number"))
    ));

    assert_eq!(transport.call_count(), 0);
    assert!(!legislator.committees.is_resolved());
    assert!(!no_number.representative.is_resolved());
}

// Memoization

#[test]
fn test_senators_fetched_once_per_instance() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(&senators_body());
    let client = client_with(&transport);

    let mut district = District {
        state: "MA".into(),
        number: "8".into(),
        ..District::default()
    };

    let first: Vec<String> = district
        .senators(&client)
        .unwrap()
        .iter()
        .map(|l| l.lastname.clone())
        .collect();
    let second: Vec<String> = district
        .senators(&client)
        .unwrap()
        .iter()
        .map(|l| l.lastname.clone())
        .collect();

    assert_eq!(first, vec!["Kerry", "Brown"]);
    assert_eq!(first, second);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(
        transport.query_of(0)[1..],
        [
            ("title".to_string(), "Sen".to_string()),
            ("state".to_string(), "MA".to_string()),
        ]
    );
}

#[test]
fn test_equal_instances_cache_independently() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(&senators_body());
    transport.push_json(&senators_body());
    let client = client_with(&transport);

    let mut a = District {
        state: "MA".into(),
        number: "8".into(),
        ..District::default()
    };
    let mut b = a.clone();

    a.senators(&client).unwrap();
    b.senators(&client).unwrap();

    assert_eq!(transport.call_count(), 2);
}

#[test]
fn test_representative_query_uses_state_and_district() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(&json!({"response": {"legislator": {
        "title": "Rep", "firstname": "Mike", "lastname": "Capuano",
        "party": "D", "state": "MA", "district": "8"
    }}}));
    let client = client_with(&transport);

    let mut district = District {
        state: "MA".into(),
        number: "8".into(),
        ..District::default()
    };
    let rep = district.representative(&client).unwrap().to_string();

    assert_eq!(rep, "Rep Mike Capuano (D MA)");
    assert_eq!(transport.calls()[0].path(), "/api/legislators.get.json");
    assert_eq!(
        transport.query_of(0)[1..],
        [
            ("state".to_string(), "MA".to_string()),
            ("district".to_string(), "8".to_string()),
        ]
    );

    district.representative(&client).unwrap();
    assert_eq!(transport.call_count(), 1);
}

// Failure handling

#[test]
fn test_failed_fetch_is_retried() {
    let transport = Arc::new(MockTransport::new());
    transport.push_error("connection reset");
    transport.push_json(&json!({"response": {"committees": [
        {"committee": {"id": "SSFR", "name": "Foreign Relations", "chamber": "senate"}}
    ]}}));
    let client = client_with(&transport);

    let mut legislator = Legislator {
        bioguide_id: "K000148".into(),
        ..Legislator::default()
    };

    assert!(matches!(
        legislator.committees(&client),
        Err(SunlightError::Transport(_))
    ));
    assert!(!legislator.committees.is_resolved());

    let ids: Vec<String> = legislator
        .committees(&client)
        .unwrap()
        .iter()
        .map(|c| c.id.clone())
        .collect();

    assert_eq!(ids, vec!["SSFR"]);
    assert_eq!(transport.call_count(), 2);
    assert_eq!(
        transport.calls()[1].path(),
        "/api/committees.allForLegislator.json"
    );
}

#[test]
fn test_rejected_fetch_leaves_relation_unresolved() {
    let transport = Arc::new(MockTransport::new());
    transport.push_response(400, "No such object.");
    let client = client_with(&transport);

    let mut committee = Committee {
        id: "NOPE".into(),
        ..Committee::default()
    };

    assert!(matches!(
        committee.members(&client),
        Err(SunlightError::RemoteRejected { status: 400, .. })
    ));
    assert!(!committee.members.is_resolved());
}

// Inline relations

#[test]
fn test_inline_members_need_no_request() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(&json!({"response": {"committee": {
        "id": "SSFI",
        "name": "Finance",
        "chamber": "senate",
        "members": [
            {"legislator": {"lastname": "Baucus", "bioguide_id": "B000243"}}
        ]
    }}}));
    let client = client_with(&transport);

    let mut committee = client.committee("SSFI").unwrap();
    let members = committee.members(&client).unwrap();

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].lastname, "Baucus");
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn test_listed_committee_fetches_members_by_id() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(&json!({"response": {"committees": [
        {"committee": {"id": "HSAG", "name": "Agriculture", "chamber": "house"}}
    ]}}));
    transport.push_json(&json!({"response": {"committee": {
        "id": "HSAG",
        "name": "Agriculture",
        "chamber": "house",
        "members": [
            {"legislator": {"lastname": "Lucas", "bioguide_id": "L000491"}},
            {"legislator": {"lastname": "Peterson", "bioguide_id": "P000258"}}
        ]
    }}}));
    let client = client_with(&transport);

    let mut committees = client.committees("house").unwrap();
    let committee = &mut committees[0];
    assert!(!committee.members.is_resolved());

    let count = committee.members(&client).unwrap().len();
    committee.members(&client).unwrap();

    assert_eq!(count, 2);
    assert_eq!(transport.call_count(), 2);
    assert_eq!(
        transport.query_of(1),
        vec![
            ("apikey".to_string(), "test-key".to_string()),
            ("id".to_string(), "HSAG".to_string()),
        ]
    );
}
