//! Courseplan CLI: the `courseplan` command.

mod cli;
mod commands;
mod config;
mod render;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let mut config = support::load_config_or_exit(cli.config.as_deref());
    support::init_tracing(cli.log_level.as_deref(), &config.log_level);
    if let Some(policy) = cli.memo_policy {
        config.memo_policy = policy;
    }
    tracing::debug!(
        catalog = %config.catalog,
        memo_policy = config.memo_policy.as_str(),
        "configuration resolved"
    );

    match cli.command {
        Commands::List {
            catalog,
            resort,
            json,
        } => commands::list::run(catalog, resort, json, &config),

        Commands::Show {
            course,
            catalog,
            json,
        } => commands::show::run(course, catalog, json, &config),

        Commands::Check { catalog, json } => commands::check::run(catalog, json, &config),

        Commands::Bench {
            catalog,
            iterations,
            json,
        } => commands::bench::run(catalog, iterations, json, &config),

        Commands::Menu { catalog } => commands::menu::run(catalog, &config),
    }
}
