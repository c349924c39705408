//! Index a captured listing response against an API document.
//!
//! Usage:
//!   halutz-index --document api.json --path /pets --body pets.json
//!   halutz-index --document api.json --path /zones --name-from label < zones.json
//!   halutz-index --document api.json --path /pets --body pets.json --find rex

use anyhow::{Context, Result, bail};
use clap::Parser;
use halutz::{CallArgs, DocumentRequest, Indexer, IndexerOptions, ItemKey, status_ok};
use serde_json::Value;
use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "halutz-index")]
#[command(about = "Build an id/name index from a listing endpoint response")]
struct Cli {
    /// API document (JSON) declaring the endpoint and its response schema.
    #[arg(long)]
    document: PathBuf,
    /// Endpoint path as declared under `paths`.
    #[arg(long)]
    path: String,
    /// HTTP method of the endpoint.
    #[arg(long, default_value = "get")]
    method: String,
    /// Response code whose schema describes the items.
    #[arg(long)]
    response_code: Option<String>,
    /// Item property to read names from.
    #[arg(long)]
    name_from: Option<String>,
    /// Item property to read ids from.
    #[arg(long)]
    id_from: Option<String>,
    /// Captured response body; reads stdin when omitted.
    #[arg(long)]
    body: Option<PathBuf>,
    /// HTTP status the body was captured with.
    #[arg(long, default_value_t = 200)]
    status: u16,
    /// Print only the item with this name.
    #[arg(long)]
    find: Option<String>,
    /// Log level written to stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn read_json(file: Option<&PathBuf>, what: &str) -> Result<Value> {
    let mut buf = String::new();
    if let Some(path) = file {
        File::open(path)
            .with_context(|| format!("opening {what} {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading {what} {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .with_context(|| format!("reading stdin for {what}"))?;
    }
    serde_json::from_str(&buf).with_context(|| format!("parsing {what} JSON"))
}

fn init_logging(level: &str) -> Result<()> {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => bail!("unknown log level '{other}'"),
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let document = read_json(Some(&cli.document), "API document")?;
    let body = read_json(cli.body.as_ref(), "response body")?;
    let ok = status_ok(cli.status);

    let request = DocumentRequest::new(document, &cli.path, &cli.method, move |_: &CallArgs| {
        (body.clone(), ok)
    })
    .with_context(|| format!("loading endpoint {}", cli.path))?;

    let options = IndexerOptions {
        name_from: cli.name_from,
        id_from: cli.id_from,
        response_code: cli.response_code,
    };
    let mut indexer = Indexer::new(request, options)
        .with_context(|| format!("inspecting response schema of {}", cli.path))?;
    indexer.run(&CallArgs::new()).map_err(|err| {
        if let Some(body) = err.response_body() {
            return anyhow::anyhow!("{err}; response body: {body}");
        }
        anyhow::Error::new(err)
    })?;
    info!(count = indexer.len(), path = indexer.path(), "indexed");

    if let Some(name) = cli.find {
        let item = ItemKey::candidates(&name)
            .into_iter()
            .find_map(|key| indexer.find(key))
            .with_context(|| format!("looking up {name}: not found in catalog"))?;
        println!("{item}");
        return Ok(());
    }

    for item in &indexer {
        println!("{}\t{}", item.id(), item.name());
    }
    Ok(())
}
