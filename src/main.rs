use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};
use tracing::warn;

use startgg_charfreq::api_client::StartggClient;
use startgg_charfreq::config::Config;
use startgg_charfreq::logging::init_logging;
use startgg_charfreq::persist::normalize_slug;
use startgg_charfreq::pipeline::create_json_frequencies;

const CSV_HINT: &str = "Convert me: https://www.convertcsv.com/json-to-csv.htm";

fn main() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cfg = Config::from_env();
    if !cfg.has_token() {
        warn!("STARTGG_TOKEN is not set; requests will be rejected");
    }

    let raw = prompt_slug()?;
    let slug = normalize_slug(&raw)?;
    let client = StartggClient::new(&cfg)?;
    let summary = create_json_frequencies(&cfg, &client, &slug)?;

    println!("\nFile '{}' created.", summary.event_path.display());
    println!(
        "Event {}: {} players, {} picks across {} page(s)",
        summary.slug, summary.players, summary.picks, summary.pages_fetched
    );
    if summary.missing.total() > 0 || summary.unknown_characters > 0 {
        println!(
            "Skipped: {} sets, {} games, {} selections missing data; {} unknown characters",
            summary.missing.sets,
            summary.missing.games,
            summary.missing.selections,
            summary.unknown_characters
        );
    }
    println!(
        "Totals: {} players from {} event file(s) -> {}",
        summary.total_players,
        summary.files_merged,
        summary.total_path.display()
    );
    println!("{CSV_HINT}");
    Ok(())
}

fn prompt_slug() -> Result<String> {
    print!("Please enter event slug: ");
    io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read event slug")?;
    if read == 0 {
        return Err(anyhow!("no event slug entered"));
    }
    Ok(line)
}
