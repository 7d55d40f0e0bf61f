use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ouicount::{config, oui, report};
use tracing::info;

/// Count MAC addresses (given as decimal numbers) by OUI.
#[derive(Parser, Debug)]
#[command(name = "ouicount", version, about)]
struct Cli {
    /// Enumerate MACs per OUI and print a summary line.
    #[arg(short, long)]
    verbose: bool,

    /// Keep every prefix in its own group, even when vendor names match.
    #[arg(short, long)]
    dontfold: bool,

    /// Path to a TOML configuration file (optional).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Local OUI registry file (overrides the config file).
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// File containing decimal MAC addresses, one per line.
    macfile: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ouicount=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let app_config = if let Some(ref path) = cli.config {
        config::AppConfig::from_file(path)?
    } else {
        config::AppConfig::default()
    }
    .with_overrides(cli.registry, cli.dontfold);
    info!(
        registry = %app_config.registry_path.display(),
        fold = app_config.fold,
        verbose = cli.verbose,
        "Configuration loaded"
    );

    // Open the input first so a bad path fails before any registry download.
    let input = open_input(&cli.macfile)?;

    let table = oui::fetch::load(
        &app_config.registry_path,
        &app_config.registry_url,
        app_config.fetch_timeout(),
    )
    .await
    .with_context(|| {
        format!(
            "failed to load OUI registry {}",
            app_config.registry_path.display()
        )
    })?;

    let tally = ouicount::count(input, &table, app_config.fold, cli.verbose)
        .with_context(|| format!("failed to ingest {}", cli.macfile.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in report::render(&tally, cli.verbose) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    Ok(())
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_input_missing_file_names_path() {
        let err = open_input(Path::new("/nonexistent/macs.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/macs.txt"));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["ouicount", "-v", "-d", "-r", "cache/oui.txt", "macs.txt"]);
        assert!(cli.verbose);
        assert!(cli.dontfold);
        assert_eq!(cli.registry, Some(PathBuf::from("cache/oui.txt")));
        assert_eq!(cli.macfile, PathBuf::from("macs.txt"));
        assert!(cli.config.is_none());
    }
}
