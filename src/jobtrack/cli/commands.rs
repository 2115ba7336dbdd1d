//! # CLI Layer
//!
//! One client of the jobtrack library. This is the only place that reads stdin,
//! writes stdout, and turns outcomes into exit codes.
//!
//! - `serve` and `call` speak the bridge protocol (JSON in, JSON out).
//! - `list`, `stats` and `config` are human-facing and render text.

use super::render::{render_job_list, render_summary};
use super::setup::{Cli, Commands};
use clap::Parser;
use jobtrack::bridge::{Bridge, ErrorPayload, Request, Response};
use jobtrack::config::JobTrackConfig;
use jobtrack::error::{JobTrackError, Result};
use jobtrack::paths::StorePaths;
use jobtrack::query::{JobFilter, SortDirection};
use jobtrack::stats::Summary;
use jobtrack::store::fs_backend::FsBackend;
use serde_json::Value;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

struct AppContext {
    paths: StorePaths,
    config: JobTrackConfig,
}

impl AppContext {
    /// A bridge whose store has already been loaded, as a UI host would do at startup.
    /// A load failure is logged, not fatal: the client can retry with `init`.
    fn bridge(&self) -> Bridge<FsBackend> {
        let mut store = self.paths.open_store(&self.config);
        if let Err(e) = store.initialize() {
            tracing::error!(error = %e, "failed to initialize database");
        }
        Bridge::new(store)
    }
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    jobtrack::logging::init(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Serve) => handle_serve(&ctx),
        Some(Commands::Call { operation, data }) => handle_call(&ctx, operation, data),
        Some(Commands::List {
            search,
            status,
            sort,
            asc,
        }) => handle_list(&ctx, search, &status, &sort, asc),
        Some(Commands::Stats { json }) => handle_stats(&ctx, json),
        Some(Commands::Config { key, value }) => handle_config(ctx, key, value),
        None => handle_list(&ctx, None, "all", "dateApplied", false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let paths = StorePaths::resolve(cli.data_dir.as_deref())?;
    let config = match paths.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
            JobTrackConfig::default()
        }
    };
    tracing::debug!(data_dir = %paths.data_dir.display(), "resolved data directory");
    Ok(AppContext { paths, config })
}

/// One request per line. A line that is not UTF-8 gets an error response like
/// any other bad request; only a broken stdin or stdout ends the loop.
fn handle_serve(ctx: &AppContext) -> Result<ExitCode> {
    let mut bridge = ctx.bridge();
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if stdin.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => bridge.dispatch_json(line),
            Err(e) => {
                tracing::warn!(error = %e, "rejected request");
                malformed(format!("request is not valid UTF-8: {}", e)).to_json()
            }
        };
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_call(ctx: &AppContext, operation: String, data: Option<String>) -> Result<ExitCode> {
    let response = match data.as_deref().map(serde_json::from_str::<Value>).transpose() {
        Ok(data) => ctx.bridge().dispatch(Request::new(operation, data)),
        Err(e) => malformed(format!("data is not valid JSON: {}", e)),
    };

    println!("{}", response.to_json());
    if response.is_error() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn malformed(message: String) -> Response {
    Response::Error(ErrorPayload::from(&JobTrackError::MalformedInput(message)))
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    status: &str,
    sort: &str,
    asc: bool,
) -> Result<ExitCode> {
    let filter = JobFilter {
        search,
        status: status.parse()?,
        sort: sort.parse()?,
        direction: if asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    };

    let mut store = ctx.paths.open_store(&ctx.config);
    store.initialize()?;
    let selected = filter.apply(store.list_all());
    println!("{}", render_job_list(&selected));
    Ok(ExitCode::SUCCESS)
}

fn handle_stats(ctx: &AppContext, json: bool) -> Result<ExitCode> {
    let mut store = ctx.paths.open_store(&ctx.config);
    store.initialize()?;
    let summary = Summary::compute(store.list_all(), ctx.config.recent_limit);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_summary(&summary));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(
    mut ctx: AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<ExitCode> {
    match (key, value) {
        (None, _) => {
            for key in JobTrackConfig::KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.paths.data_dir)?;
            println!("{} = {}", key, ctx.config.get(&key)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
