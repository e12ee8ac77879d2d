mod common;

use startgg_charfreq::api_client::ApiError;
use startgg_charfreq::paginate::{
    FIRST_PAGE_QUERY, PageOptions, SETS_PAGE_QUERY, fetch_event, parse_event_page,
};

use common::{ScriptedTransport, melee_roster, page_body, read_fixture, set_with_picks};

fn opts() -> PageOptions {
    PageOptions {
        per_page: 500,
        complexity_threshold: 980,
        max_pages: 50,
    }
}

#[test]
fn parses_first_page_fixture() {
    let raw = read_fixture("event_first_page.json");
    let page = parse_event_page(&raw).expect("fixture should parse");
    assert_eq!(page.complexity, 420);
    let event = page.event.expect("event present");
    let characters = event.videogame.and_then(|v| v.characters).unwrap();
    assert_eq!(characters.len(), 3);
    assert_eq!(characters[2].name, "Marth");
    let nodes = event.sets.and_then(|s| s.nodes).unwrap();
    assert_eq!(nodes.len(), 3);
}

#[test]
fn graphql_errors_without_data_are_typed() {
    let raw = r#"{"errors":[{"message":"Your query complexity is too high"}]}"#;
    let err = parse_event_page(raw).unwrap_err();
    assert!(matches!(err, ApiError::Graphql(ref m) if m.contains("complexity")));
    assert!(matches!(
        parse_event_page("null"),
        Err(ApiError::Decode(_))
    ));
}

#[test]
fn missing_complexity_reads_as_zero() {
    let raw = r#"{"data":{"event":null}}"#;
    let page = parse_event_page(raw).expect("should parse");
    assert_eq!(page.complexity, 0);
    assert!(page.event.is_none());
}

#[test]
fn follows_complexity_until_threshold() {
    let transport = ScriptedTransport::new(vec![
        Ok(page_body(
            1000,
            Some(melee_roster()),
            vec![set_with_picks(&[("A", 1)])],
        )),
        Ok(page_body(995, None, vec![set_with_picks(&[("B", 2)])])),
        Ok(page_body(970, None, vec![set_with_picks(&[("C", 1)])])),
        Ok(page_body(10, None, vec![set_with_picks(&[("D", 1)])])),
    ]);

    let event = fetch_event(&transport, "tournament/t/event/e", opts()).expect("fetch ok");
    assert_eq!(transport.request_count(), 3);
    assert_eq!(event.pages_fetched, 3);
    assert_eq!(event.last_complexity, 970);
    assert_eq!(event.sets.len(), 3);
    assert_eq!(event.characters.len(), 2);

    let requests = transport.requests.borrow();
    assert_eq!(requests[0].0, FIRST_PAGE_QUERY);
    assert_eq!(requests[1].0, SETS_PAGE_QUERY);
    let pages = requests
        .iter()
        .map(|(_, vars)| vars["page"].as_u64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(pages, vec![1, 2, 3]);
    assert_eq!(requests[0].1["slug"], "tournament/t/event/e");
    assert_eq!(requests[0].1["perPage"], 500);
}

#[test]
fn single_page_when_complexity_is_at_threshold() {
    let transport = ScriptedTransport::new(vec![Ok(page_body(
        980,
        Some(melee_roster()),
        vec![set_with_picks(&[("A", 1)])],
    ))]);
    let event = fetch_event(&transport, "tournament/t/event/e", opts()).expect("fetch ok");
    assert_eq!(transport.request_count(), 1);
    assert_eq!(event.pages_fetched, 1);
}

#[test]
fn page_cap_bounds_a_stuck_complexity_signal() {
    let responses = (0..10)
        .map(|i| {
            let roster = (i == 0).then(melee_roster);
            Ok(page_body(2000, roster, vec![set_with_picks(&[("A", 1)])]))
        })
        .collect();
    let transport = ScriptedTransport::new(responses);
    let capped = PageOptions {
        max_pages: 4,
        ..opts()
    };
    let event = fetch_event(&transport, "tournament/t/event/e", capped).expect("fetch ok");
    assert_eq!(transport.request_count(), 4);
    assert_eq!(event.pages_fetched, 4);
    assert_eq!(event.sets.len(), 4);
}

#[test]
fn empty_page_stops_paging() {
    let transport = ScriptedTransport::new(vec![
        Ok(page_body(
            1500,
            Some(melee_roster()),
            vec![set_with_picks(&[("A", 1)])],
        )),
        Ok(page_body(1500, None, vec![])),
        Ok(page_body(1500, None, vec![set_with_picks(&[("B", 1)])])),
    ]);
    let event = fetch_event(&transport, "tournament/t/event/e", opts()).expect("fetch ok");
    assert_eq!(transport.request_count(), 2);
    assert_eq!(event.sets.len(), 1);
}

#[test]
fn api_errors_propagate_with_their_kind() {
    let transport = ScriptedTransport::new(vec![
        Ok(page_body(
            1500,
            Some(melee_roster()),
            vec![set_with_picks(&[("A", 1)])],
        )),
        Err(ApiError::RateLimited),
    ]);
    let err = fetch_event(&transport, "tournament/t/event/e", opts()).unwrap_err();
    let api = err
        .chain()
        .find_map(|e| e.downcast_ref::<ApiError>())
        .expect("api error in chain");
    assert_eq!(api.code(), Some(429));
}

#[test]
fn unknown_event_is_an_error() {
    let transport = ScriptedTransport::new(vec![Ok(r#"{"data":{"event":null}}"#.to_string())]);
    let err = fetch_event(&transport, "tournament/nope/event/none", opts()).unwrap_err();
    assert!(err.to_string().contains("event not found"));
}

#[test]
fn null_event_with_errors_is_a_graphql_error() {
    let raw = r#"{"data":{"event":null},"errors":[{"message":"boom"}]}"#;
    assert!(matches!(
        parse_event_page(raw),
        Err(ApiError::Graphql(ref m)) if m == "boom"
    ));
}

#[test]
fn failed_later_page_aborts_instead_of_truncating() {
    let failed_page = r#"{
        "data": { "event": null },
        "errors": [ { "message": "Your query complexity is too high" } ],
        "extensions": { "queryComplexity": 1500 }
    }"#;
    let transport = ScriptedTransport::new(vec![
        Ok(page_body(
            1500,
            Some(melee_roster()),
            vec![set_with_picks(&[("A", 1)])],
        )),
        Ok(failed_page.to_string()),
        Ok(page_body(100, None, vec![set_with_picks(&[("B", 1)])])),
    ]);

    let err = fetch_event(&transport, "tournament/t/event/e", opts()).unwrap_err();
    assert_eq!(transport.request_count(), 2);
    let api = err
        .chain()
        .find_map(|e| e.downcast_ref::<ApiError>())
        .expect("api error in chain");
    assert!(matches!(api, ApiError::Graphql(m) if m.contains("complexity")));
}
