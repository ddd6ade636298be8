use clap::{Parser, Subcommand};
use courseplan_catalog::MemoPolicy;
use std::str::FromStr;

#[derive(Parser)]
#[command(
    name = "courseplan",
    about = "Courseplan: sorted course listings and full prerequisite chains",
    version
)]
pub struct Cli {
    /// Path to a TOML config file (default: ./courseplan.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log filter, e.g. `info` or `courseplan_catalog=debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// When cached prerequisite chains are discarded: `per-load` or `per-query`
    #[arg(long, global = true, value_parser = MemoPolicy::from_str)]
    pub memo_policy: Option<MemoPolicy>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every course in ascending course-number order
    List {
        /// Path to the course catalog CSV
        #[arg(long)]
        catalog: Option<String>,

        /// Collect and sort the keys on every call instead of reading the ordered index
        #[arg(long)]
        resort: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one course with its direct prerequisites and full prerequisite chain
    Show {
        /// Course number (case-insensitive)
        course: String,

        /// Path to the course catalog CSV
        #[arg(long)]
        catalog: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check every course for prerequisite cycles and unknown prerequisites
    Check {
        /// Path to the course catalog CSV
        #[arg(long)]
        catalog: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Time catalog loading and compare ordered-index vs resort iteration
    Bench {
        /// Path to the course catalog CSV
        #[arg(long)]
        catalog: Option<String>,

        /// Iterations per method (default from config, 5000)
        #[arg(long)]
        iterations: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive menu over stdin/stdout
    Menu {
        /// Default catalog path offered by the load option
        #[arg(long)]
        catalog: Option<String>,
    },
}
