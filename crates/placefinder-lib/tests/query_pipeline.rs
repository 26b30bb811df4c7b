//! End-to-end checks of the inbound pipeline: raw query string, normalized
//! map, schema validation, and re-serialization for outbound use.

use placefinder_lib::endpoints::nearby::{NEARBY_SCHEMA, REQUIRED_KEYS};
use placefinder_lib::endpoints::posts::POST_SUMMARY_SCHEMA;
use placefinder_lib::schema::messages;
use placefinder_lib::{normalize, serialize, validate, FromQuery, NearbySearch, RawQuery};

fn parse(query: &str) -> placefinder_lib::CanonicalParams {
    normalize(RawQuery::from_query_string(query))
}

#[test]
fn valid_nearby_query_round_trips() {
    let query = "location=-33.8670522%2C151.1957362&type=restaurant&radius=200";
    let params = parse(query);

    assert!(validate(&params, &NEARBY_SCHEMA, Some(REQUIRED_KEYS)).is_empty());
    assert_eq!(serialize(&params), query);
}

#[test]
fn repeated_tags_round_trip() {
    let params = parse("tags=finance&tags=tech&tags=values");

    assert!(validate(&params, &POST_SUMMARY_SCHEMA, None).is_empty());
    assert_eq!(serialize(&params), "tags=finance&tags=tech&tags=values");
}

#[test]
fn missing_required_key_is_the_only_error() {
    let params = parse("type=pizza&radius=-5&bogus=1");

    let errors = validate(&params, &NEARBY_SCHEMA, Some(REQUIRED_KEYS));

    assert_eq!(
        messages(&errors),
        vec![
            "Missing required key! Required keys: 'location,type', Detected keys: 'type,radius,bogus'"
                .to_string()
        ]
    );
}

#[test]
fn every_offending_key_is_reported_in_query_order() {
    let params = parse("bogus=1&location=1%2C2&type=pizza&radius=10&keyword=");

    let errors = NearbySearch::from_params(&params).unwrap_err();

    assert_eq!(
        messages(&errors),
        vec![
            "Key: 'bogus' or associated value(s) is invalid".to_string(),
            "Key: 'type' or associated value(s) is invalid".to_string(),
            "Key: 'keyword' or associated value(s) is invalid".to_string(),
        ]
    );
}

#[test]
fn repeated_location_is_rejected() {
    let params = parse("location=1%2C2&location=3%2C4&type=restaurant");

    let errors = NearbySearch::from_params(&params).unwrap_err();

    assert_eq!(errors.len(), 1);
}
