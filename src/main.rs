mod cli;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fm_moneyball::cache::CleanCache;
use fm_moneyball::config::{AppConfig, MAX_BUDGET_M};
use fm_moneyball::export::{shortlist_rows, write_canonical_csv, write_shortlist_csv, write_shortlist_xlsx};
use fm_moneyball::{Shortlist, ShortlistRequest, WeightSpec, build_shortlist};

use crate::cli::{CleanCommand, Cli, Commands, RankCommand};

fn main() -> Result<()> {
    AppConfig::load_dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let mut config = AppConfig::from_env();
    if let Some(path) = cli.weights {
        config.weights_path = path;
    }

    match cli.command {
        Commands::Rank(cmd) => rank(&config, cmd),
        Commands::Roles => roles(&config),
        Commands::Clean(cmd) => clean(cmd),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_spec(config: &AppConfig) -> Result<WeightSpec> {
    WeightSpec::load(&config.weights_path)
        .with_context(|| format!("failed loading weights from {}", config.weights_path.display()))
}

fn rank(config: &AppConfig, cmd: RankCommand) -> Result<()> {
    let spec = load_spec(config)?;
    let mut cache = CleanCache::new();
    let table = cache
        .load(&cmd.data)
        .with_context(|| format!("failed cleaning {}", cmd.data.display()))?;

    let mut request = ShortlistRequest::new(cmd.position.trim())
        .version(cmd.weight_version.unwrap_or_else(|| config.weight_version.clone()));
    if !cmd.no_budget {
        let budget = cmd.max_value.unwrap_or(config.max_value_millions);
        if !(0.0..=MAX_BUDGET_M).contains(&budget) {
            bail!("--max-value must be between 0 and {MAX_BUDGET_M}");
        }
        request = request.budget(budget);
    }

    let shortlist = build_shortlist(&table, &spec, &request)?;
    if shortlist.candidates == 0 {
        warn!(position = %shortlist.position, "no players have this best position");
    }

    print_shortlist(&shortlist, cmd.top.unwrap_or(config.top));

    if let Some(path) = cmd.export {
        export_shortlist(&path, &shortlist)?;
    }
    Ok(())
}

fn export_shortlist(path: &Path, shortlist: &Shortlist) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        let file = File::create(path).with_context(|| format!("failed creating {}", path.display()))?;
        write_shortlist_csv(BufWriter::new(file), shortlist)?;
    } else {
        write_shortlist_xlsx(path, shortlist)
            .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    }
    info!(path = %path.display(), "exported shortlist");
    Ok(())
}

fn print_shortlist(shortlist: &Shortlist, top: usize) {
    println!(
        "{} | role {} | version {} | {} of {} within budget",
        shortlist.position,
        shortlist.role_key,
        shortlist.version,
        shortlist.rows.len(),
        shortlist.candidates
    );
    let rows = shortlist_rows(shortlist);
    let shown: Vec<&Vec<String>> = rows.iter().take(top.saturating_add(1)).collect();
    let mut widths = vec![0usize; rows.first().map_or(0, Vec::len)];
    for row in &shown {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    for row in shown {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

fn roles(config: &AppConfig) -> Result<()> {
    let spec = load_spec(config)?;
    for role in spec.roles() {
        let versions: Vec<&str> = role.version_names().collect();
        println!(
            "{:<6} positions: {:<40} versions: {}",
            role.key,
            role.positions.join(", "),
            versions.join(", ")
        );
    }
    Ok(())
}

fn clean(cmd: CleanCommand) -> Result<()> {
    let mut cache = CleanCache::new();
    let table = cache
        .load(&cmd.data)
        .with_context(|| format!("failed cleaning {}", cmd.data.display()))?;
    match cmd.output {
        Some(path) => {
            let file =
                File::create(&path).with_context(|| format!("failed creating {}", path.display()))?;
            write_canonical_csv(BufWriter::new(file), &table)?;
            info!(path = %path.display(), players = table.len(), "wrote cleaned table");
        }
        None => write_canonical_csv(io::stdout().lock(), &table)?,
    }
    Ok(())
}
