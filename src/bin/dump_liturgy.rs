//! Dump the liturgy of every service on a date.
//!
//! Usage: cargo run --bin dump_liturgy [-- --date 2024-06-02] [--init]
//!
//! With `--init`, a service is created from the template when the date has none.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use tracing_subscriber::EnvFilter;

use liturgy::config::Config;
use liturgy::services::{load_template, LinkChoice, LiturgyEditor, ServiceLinkResolver};
use liturgy::songs::RecencyStatus;
use liturgy::store::{JsonFileStore, LiturgyStore};

/// The `--date` value, if the flag is present. A flag without a value is an error.
fn date_arg(args: &[String]) -> anyhow::Result<Option<NaiveDate>> {
    let Some(i) = args.iter().position(|a| a == "--date") else {
        return Ok(None);
    };
    let value = args
        .get(i + 1)
        .filter(|s| !s.starts_with("--"))
        .context("--date expects a YYYY-MM-DD value")?;
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("--date expects YYYY-MM-DD, got {value}"))?;
    Ok(Some(date))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let date = date_arg(&args)?.unwrap_or_else(|| Local::now().date_naive());
    let init = args.iter().any(|a| a == "--init");

    let config = Config::load()?;
    let mut store = JsonFileStore::open(&config.data_path)?;
    if let Some(path) = &config.template_path {
        store = store.with_template(load_template(path)?);
    }
    let store = Arc::new(store);

    let resolver = ServiceLinkResolver::new(Arc::clone(&store));
    let mut found = resolver.resolve(date).await?;
    if found.is_empty() && init {
        resolver.link(date, LinkChoice::CreateNew { title: None }).await?;
        found = resolver.resolve(date).await?;
    }

    if found.is_empty() {
        println!("No services on {date}. Run with --init to create one from the template.");
        return Ok(());
    }

    let names: HashMap<_, _> = store
        .fetch_songs()
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    let editor = LiturgyEditor::new(Arc::clone(&store)).await?;

    println!("=== Services on {date} ({}) ===\n", found.candidates.len());
    for service in &found.candidates {
        let marker = if found.default_selection.as_ref() == Some(&service.id) { "*" } else { " " };
        println!(
            "{marker} {} | {} | created {}",
            service.id,
            service.title.as_deref().unwrap_or("Untitled"),
            service.created_at.format("%Y-%m-%d %H:%M")
        );

        let session = editor.open(&service.id).await?;
        for (idx, block) in session.blocks().iter().enumerate() {
            let description = block.description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default();
            println!("  {:>2}. {}{}", idx + 1, block.moment, description);
            if !block.allows_song {
                continue;
            }
            for slot in &block.songs {
                let Some(song) = &slot.song else {
                    println!("        - (no song selected)");
                    continue;
                };
                let status = RecencyStatus::classify_today(store.last_performed_date(song).await?);
                println!(
                    "        - {} [key: {}] {}",
                    names.get(song).map_or(song.as_str(), String::as_str),
                    slot.key.as_deref().unwrap_or("-"),
                    status.label()
                );
            }
        }
        println!();
    }

    Ok(())
}
