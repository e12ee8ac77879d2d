#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};

use startgg_charfreq::api_client::{ApiError, GraphqlTransport};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Replays canned bodies in order and records every request it receives.
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<String, ApiError>>>,
    pub requests: RefCell<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<String, ApiError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl GraphqlTransport for ScriptedTransport {
    fn post(&self, query: &str, variables: &Value) -> Result<String, ApiError> {
        self.requests
            .borrow_mut()
            .push((query.to_string(), variables.clone()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Decode("script exhausted".to_string())))
    }
}

/// A set whose single game has one selection per `(entrant, character id)` pair.
pub fn set_with_picks(picks: &[(&str, i64)]) -> Value {
    let selections = picks
        .iter()
        .map(|(name, id)| json!({ "entrant": { "name": name }, "selectionValue": id }))
        .collect::<Vec<_>>();
    json!({ "games": [ { "selections": selections } ] })
}

pub fn page_body(complexity: u32, roster: Option<Value>, sets: Vec<Value>) -> String {
    let mut event = json!({ "sets": { "nodes": sets } });
    if let Some(characters) = roster {
        event["videogame"] = json!({ "characters": characters });
    }
    json!({
        "data": { "event": event },
        "extensions": { "queryComplexity": complexity }
    })
    .to_string()
}

pub fn melee_roster() -> Value {
    json!([
        { "id": 1, "name": "Fox" },
        { "id": 2, "name": "Falco" }
    ])
}
