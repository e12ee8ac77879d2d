use serde::{Deserialize, Serialize};

/// A selectable character for the event's videogame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
}

/// One character pick by one entrant in one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub entrant_name: String,
    pub character_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    pub videogame: Option<RawVideogame>,
    pub sets: Option<RawSetConnection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideogame {
    pub characters: Option<Vec<Character>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSetConnection {
    pub nodes: Option<Vec<Option<SetNode>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetNode {
    pub games: Option<Vec<Option<GameNode>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameNode {
    pub selections: Option<Vec<Option<SelectionNode>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionNode {
    pub entrant: Option<EntrantNode>,
    #[serde(rename = "selectionValue")]
    pub selection_value: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntrantNode {
    pub name: Option<String>,
}

/// Every page of an event combined: the roster from the first page plus all set nodes.
#[derive(Debug, Clone, Default)]
pub struct EventData {
    pub characters: Vec<Character>,
    pub sets: Vec<Option<SetNode>>,
    pub pages_fetched: u32,
    pub last_complexity: u32,
}
