use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::api_client::GraphqlTransport;
use crate::config::Config;
use crate::paginate::{PageOptions, fetch_event};
use crate::persist::{recompute_total, write_event_tally, write_total};
use crate::reshape::{MissingCounts, reshape};
use crate::tally::{build_tally, total_picks};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub slug: String,
    pub event_path: PathBuf,
    pub total_path: PathBuf,
    pub pages_fetched: u32,
    pub players: usize,
    pub picks: u64,
    pub missing: MissingCounts,
    pub unknown_characters: usize,
    pub files_merged: usize,
    pub total_players: usize,
}

/// Fetches one event, writes its tally, then rebuilds the cross-event total from disk.
pub fn create_json_frequencies<T>(cfg: &Config, transport: &T, slug: &str) -> Result<RunSummary>
where
    T: GraphqlTransport + ?Sized,
{
    let event = fetch_event(transport, slug, PageOptions::from(cfg))
        .with_context(|| format!("fetch event {slug}"))?;
    let reshaped = reshape(&event);
    let tally = build_tally(&reshaped.roster, &reshaped.picks);

    let event_path = write_event_tally(&cfg.data_dir, slug, &tally)?;
    let totals = recompute_total(&cfg.data_dir)?;
    let total_path = write_total(&cfg.data_dir, &totals.total)?;
    info!(
        slug,
        files = totals.files_merged,
        players = totals.total.len(),
        "totals recomputed"
    );

    Ok(RunSummary {
        slug: slug.to_string(),
        event_path,
        total_path,
        pages_fetched: event.pages_fetched,
        players: tally.len(),
        picks: total_picks(&tally),
        missing: reshaped.missing,
        unknown_characters: reshaped.unknown_characters,
        files_merged: totals.files_merged,
        total_players: totals.total.len(),
    })
}
