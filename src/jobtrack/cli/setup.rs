use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// `--version` text: the package version, plus commit hash and date unless
/// this is a tagged build from a clean tree.
fn version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let package = env!("CARGO_PKG_VERSION");
        match (env!("IS_RELEASE"), env!("GIT_HASH")) {
            ("true", _) | (_, "") => package.to_string(),
            (_, hash) => format!("{} ({} {})", package, hash, env!("GIT_COMMIT_DATE")),
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "jobtrack", bin_name = "jobtrack", version = version())]
#[command(about = "Track job applications in a local JSON file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding job-tracker.json (defaults to the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer bridge requests: one JSON request per stdin line, one response per stdout line
    Serve,

    /// Dispatch a single bridge request and print the JSON response
    Call {
        /// One of: init, getAll, getById, add, update, delete
        operation: String,

        /// JSON payload, e.g. '{"id": "..."}'
        data: Option<String>,
    },

    /// List applications
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text to look for in company, title, location and notes
        #[arg(short, long)]
        search: Option<String>,

        /// all, interviewing, offers, rejected, ghosted, or an exact status
        #[arg(long, default_value = "all")]
        status: String,

        /// dateApplied, createdAt, updatedAt, companyName, jobTitle, status, location
        #[arg(long, default_value = "dateApplied")]
        sort: String,

        /// Sort ascending (default is descending)
        #[arg(long)]
        asc: bool,
    },

    /// Show dashboard numbers and the most recent applications
    Stats {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (pretty-json, recent-limit)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
