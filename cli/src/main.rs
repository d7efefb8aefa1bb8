//! Command-line host: owns the store, runs one fetch and prints the result.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use persons_core::{ClientConfig, FetchParams, FetchStatus, PersonStore, PersonsClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "persons")]
#[command(about = "List characters from the character API")]
struct Cli {
    /// TOML file with `base_url` and `user_agent`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Listing endpoint; overrides the config file.
    #[arg(long, env = "PERSONS_API_URL")]
    base_url: Option<String>,

    /// Filter by name (substring).
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    page: Option<u32>,

    /// Filter by status: alive, dead or unknown.
    #[arg(long)]
    status: Option<String>,

    /// Print the store as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let client = PersonsClient::from_config(&config).context("building API client")?;
    let mut store = PersonStore::new();
    let params = FetchParams {
        name: cli.name,
        page: cli.page,
        status: cli.status,
    };

    let status = store.fetch_persons(&client, &params);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&store)?);
    } else {
        print_store(status, &store);
    }

    Ok(match status {
        FetchStatus::TransportFailure => {
            tracing::error!(base_url = %config.base_url, "no response from the API");
            ExitCode::FAILURE
        }
        FetchStatus::Http(_) => ExitCode::SUCCESS,
    })
}

fn print_store(status: FetchStatus, store: &PersonStore) {
    match status.code() {
        Some(code) => println!("status: {code}"),
        None => println!("status: no response"),
    }
    println!("count: {}  pages: {}", store.count(), store.pages());
    for person in store.persons() {
        let id = person.id().map_or_else(|| "?".to_string(), |id| id.to_string());
        println!(
            "  {:>4}  {}  ({})",
            id,
            person.name().unwrap_or("?"),
            person.status().unwrap_or("?")
        );
    }
    if let Some(next) = store.next() {
        println!("next: {next}");
    }
    if let Some(prev) = store.prev() {
        println!("prev: {prev}");
    }
}
