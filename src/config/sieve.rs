// Command-line arguments for the `sieve` binary. Kept in the library so tests
// can build them without spawning the binary.
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Filter low-value YouTube comments", long_about = None)]
pub struct Args {
    /// Path to the input Parquet file of raw comments
    #[arg(short, long)]
    pub input_file: PathBuf,

    /// Path to the output Parquet file for retained comments
    #[arg(short = 'o', long, default_value = "retained.parquet")]
    pub output_file: PathBuf,

    /// Path to the output Parquet file for removed comments (with reasons)
    #[arg(short = 'e', long, default_value = "excluded.parquet")]
    pub excluded_file: PathBuf,

    /// Filter settings file (YAML or JSON). Defaults apply when omitted.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// JSON comment store used as the blacklist
    #[arg(short = 'b', long)]
    pub blacklist_store: Option<PathBuf>,

    /// Append every removed comment to the blacklist store
    #[arg(long, requires = "blacklist_store")]
    pub auto_blacklist: bool,

    /// Report path recorded on auto-blacklisted entries
    #[arg(long)]
    pub report_path: Option<String>,

    /// Print the N most repeated phrases of the retained comments
    #[arg(long, default_value_t = 0)]
    pub phrases: usize,

    /// Write Prometheus text-format metrics to this file when done
    #[arg(long)]
    pub metrics_file: Option<PathBuf>,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Validate the filter settings, print the effective configuration and exit
    #[arg(long)]
    pub validate_config: bool,
}
