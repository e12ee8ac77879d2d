use std::collections::BTreeMap;

use tracing::warn;

use crate::model::{Character, EventData, Selection, SetNode};

/// Character id → name for one event's videogame.
pub type Roster = BTreeMap<i64, String>;

/// One resolved pick: normalized player name and character name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPick {
    pub player: String,
    pub character: String,
}

/// Per-level counts of records that lacked the field needed to descend further.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingCounts {
    pub sets: usize,
    pub games: usize,
    pub selections: usize,
}

impl MissingCounts {
    pub fn warnings(&self) -> Vec<String> {
        [
            ("sets", self.sets),
            ("games", self.games),
            ("selections", self.selections),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(level, count)| format!("{count} {level} missing data"))
        .collect()
    }

    pub fn log(&self) {
        for message in self.warnings() {
            warn!("{message}");
        }
    }

    pub fn total(&self) -> usize {
        self.sets + self.games + self.selections
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reshaped {
    pub roster: Roster,
    pub picks: Vec<PlayerPick>,
    pub missing: MissingCounts,
    /// Selections whose character id was not in the roster; these are dropped.
    pub unknown_characters: usize,
}

pub fn build_roster(characters: &[Character]) -> Roster {
    characters
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect()
}

/// Strips a sponsor/team prefix: `"Tag | Player"` becomes `"Player"`.
pub fn normalize_player_name(raw: &str) -> String {
    match raw.split_once('|') {
        Some((_, rest)) => rest.trim().to_string(),
        None => raw.to_string(),
    }
}

/// Flattens sets → games → selections, skipping null entries and counting them.
pub fn collect_selections(sets: &[Option<SetNode>]) -> (Vec<Selection>, MissingCounts) {
    let mut missing = MissingCounts::default();
    let mut out = Vec::new();

    for set in sets {
        let Some(games) = set.as_ref().and_then(|s| s.games.as_ref()) else {
            missing.sets += 1;
            continue;
        };
        for game in games {
            let Some(selections) = game.as_ref().and_then(|g| g.selections.as_ref()) else {
                missing.games += 1;
                continue;
            };
            for selection in selections {
                let parsed = selection.as_ref().and_then(|sel| {
                    let name = sel.entrant.as_ref()?.name.as_ref()?;
                    let id = sel.selection_value?;
                    Some(Selection {
                        entrant_name: name.clone(),
                        character_id: id,
                    })
                });
                match parsed {
                    Some(sel) => out.push(sel),
                    None => missing.selections += 1,
                }
            }
        }
    }

    (out, missing)
}

pub fn reshape(event: &EventData) -> Reshaped {
    let roster = build_roster(&event.characters);
    let (selections, missing) = collect_selections(&event.sets);
    missing.log();

    let mut unknown_characters = 0;
    let mut picks = Vec::with_capacity(selections.len());
    for sel in selections {
        let Some(character) = roster.get(&sel.character_id) else {
            unknown_characters += 1;
            continue;
        };
        picks.push(PlayerPick {
            player: normalize_player_name(&sel.entrant_name),
            character: character.clone(),
        });
    }
    if unknown_characters > 0 {
        warn!(
            unknown_characters,
            "selections referenced characters outside the roster and were skipped"
        );
    }

    Reshaped {
        roster,
        picks,
        missing,
        unknown_characters,
    }
}
