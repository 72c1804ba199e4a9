use anyhow::Result;
use clap::Parser;
use tracing::info;

use tariff::cli::{formatters, Cli, Commands};
use tariff::config::Policy;
use tariff::duty::DutyResolver;
use tariff::importers;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let policy = match &cli.policy_file {
        Some(path) => Policy::load(path)?,
        None => Policy::default(),
    };

    let schedule = importers::load_schedule(&cli.hts_file)?;
    let sec301 = importers::load_sec301(&cli.sec301_file)?;
    info!(
        schedule_entries = schedule.len(),
        sec301_prefixes = sec301.len(),
        "reference tables loaded"
    );

    let resolver = DutyResolver::new(schedule, sec301, policy);

    match cli.command {
        Commands::Lookup { ref code, ref origin } => {
            handle_lookup(&resolver, code, origin.as_deref(), cli.json)
        }
        Commands::Quote {
            ref codes,
            ref lines,
            ref origin,
            shipment_value,
            transport,
        } => {
            let request = tariff::cli::build_quote_request(
                codes,
                lines,
                origin.clone(),
                shipment_value,
                transport,
            )?;
            let quote = resolver.quote(&request)?;
            if cli.json {
                println!("{}", formatters::format_quote_json(&quote));
            } else {
                println!("{}", formatters::format_quote(&quote));
            }
            Ok(())
        }
    }
}

/// A code that matches nothing is a warning, not a failure: the run still
/// exits zero so scripted callers can distinguish bad input from a broken
/// table load.
fn handle_lookup(
    resolver: &DutyResolver,
    code: &str,
    origin: Option<&str>,
    json: bool,
) -> Result<()> {
    match resolver.resolve(code, origin) {
        Some(breakdown) => {
            if json {
                println!("{}", formatters::format_breakdown_json(&breakdown));
            } else {
                println!("{}", formatters::format_breakdown(&breakdown));
            }
        }
        None => {
            if json {
                println!("{}", formatters::format_not_found_json(code));
            } else {
                println!("{}", formatters::format_not_found(code));
            }
        }
    }
    Ok(())
}
