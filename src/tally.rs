use std::collections::BTreeMap;

use crate::reshape::{PlayerPick, Roster};

/// Character name → pick count for one player.
pub type CharacterCounts = BTreeMap<String, u64>;

/// Player name → that player's character counts. Used both per event and as the running total.
pub type PlayerCharacterTally = BTreeMap<String, CharacterCounts>;

/// Every roster character at zero, cloned for each player so all players share one key set.
pub fn zero_template(roster: &Roster) -> CharacterCounts {
    roster.values().map(|name| (name.clone(), 0)).collect()
}

pub fn build_tally(roster: &Roster, picks: &[PlayerPick]) -> PlayerCharacterTally {
    let template = zero_template(roster);
    let mut tally = PlayerCharacterTally::new();
    for pick in picks {
        let counts = tally
            .entry(pick.player.clone())
            .or_insert_with(|| template.clone());
        *counts.entry(pick.character.clone()).or_insert(0) += 1;
    }
    tally
}

/// Adds `other` into `total`; unseen players and characters are inserted.
pub fn merge_into(total: &mut PlayerCharacterTally, other: &PlayerCharacterTally) {
    for (player, counts) in other {
        let entry = total.entry(player.clone()).or_default();
        for (character, count) in counts {
            let slot = entry.entry(character.clone()).or_insert(0);
            *slot = slot.saturating_add(*count);
        }
    }
}

pub fn total_picks(tally: &PlayerCharacterTally) -> u64 {
    tally.values().flat_map(|counts| counts.values()).sum()
}
