use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::tally::{PlayerCharacterTally, merge_into};

const SLUGS_DIR: &str = "slugs";
const EVENT_FILE: &str = "character_frequencies.json";
const TOTAL_FILE: &str = "total_character_frequencies.json";

#[derive(Debug, Clone, Default)]
pub struct TotalSummary {
    pub total: PlayerCharacterTally,
    pub files_merged: usize,
}

/// Normalizes user input into a relative event slug.
///
/// Accepts a bare slug (`tournament/foo/event/bar`) or a pasted start.gg URL; anything past the
/// event name is dropped. Rejects empty input and path components like `..`.
pub fn normalize_slug(raw: &str) -> Result<String> {
    let mut slug = raw.trim();
    if !slug.starts_with("tournament/")
        && let Some(idx) = slug.find("/tournament/")
    {
        slug = &slug[idx + 1..];
    }
    let slug = slug.trim_matches('/');
    if slug.is_empty() {
        return Err(anyhow!("event slug is empty"));
    }

    let parts = slug.split('/').collect::<Vec<_>>();
    let parts = if parts.len() > 4 && parts[0] == "tournament" && parts[2] == "event" {
        &parts[..4]
    } else {
        &parts[..]
    };
    let slug = parts.join("/");

    let valid = Path::new(&slug)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    let bad_part = parts
        .iter()
        .any(|p| p.is_empty() || *p == "." || *p == "..");
    if !valid || bad_part || slug.contains('\\') {
        return Err(anyhow!("invalid event slug: {raw}"));
    }
    Ok(slug)
}

pub fn slugs_root(data_dir: &Path) -> PathBuf {
    data_dir.join(SLUGS_DIR)
}

pub fn event_tally_path(data_dir: &Path, slug: &str) -> PathBuf {
    slugs_root(data_dir).join(slug).join(EVENT_FILE)
}

pub fn total_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TOTAL_FILE)
}

/// Writes the per-event tally, replacing any earlier file for the same slug.
pub fn write_event_tally(
    data_dir: &Path,
    slug: &str,
    tally: &PlayerCharacterTally,
) -> Result<PathBuf> {
    let path = event_tally_path(data_dir, slug);
    write_json(&path, tally)?;
    info!(path = %path.display(), players = tally.len(), "event tally written");
    Ok(path)
}

pub fn load_tally(path: &Path) -> Result<PlayerCharacterTally> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid tally json in {}", path.display()))
}

/// Rebuilds the cross-event total from every `*.json` file under `slugs/`.
pub fn recompute_total(data_dir: &Path) -> Result<TotalSummary> {
    let root = slugs_root(data_dir);
    let mut summary = TotalSummary::default();
    if !root.is_dir() {
        return Ok(summary);
    }

    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let tally = load_tally(path)?;
        debug!(path = %path.display(), players = tally.len(), "merging event tally");
        merge_into(&mut summary.total, &tally);
        summary.files_merged += 1;
    }
    Ok(summary)
}

pub fn write_total(data_dir: &Path, total: &PlayerCharacterTally) -> Result<PathBuf> {
    let path = total_path(data_dir);
    write_json(&path, total)?;
    info!(path = %path.display(), players = total.len(), "total tally written");
    Ok(path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("serialize tally")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}
