// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use clap::{Parser, Subcommand};
use scorecard::{
    DatasetRegistry, EngineConfig, ErrorReporter, Scorecard, ScorecardError, SortSpec, ViewCatalog,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scorecard", about = "Chart specs for the Test career dashboard")]
struct Cli {
    /// Engine configuration (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Replacement view catalog (YAML).
    #[arg(long, global = true)]
    views: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List datasets and their selections.
    List,
    /// Print the career overview cards.
    Headlines,
    /// Build one chart spec and print it as JSON.
    Chart {
        dataset: String,
        selection: String,
        /// Override the view's ordering, e.g. `Runs:desc`.
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        compact: bool,
    },
    /// Dump a raw table.
    Table {
        dataset: String,
        #[arg(long)]
        csv: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli, io::stdout().lock()) {
        match e.downcast_ref::<ScorecardError>() {
            Some(err) => eprint!("{}", ErrorReporter::new().report(err)),
            None => eprintln!("error: {e:#}"),
        }
        std::process::exit(1);
    }
}

fn run<W: Write>(cli: Cli, mut out: W) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_yaml_file(path)?,
        None => EngineConfig::default(),
    };
    let registry = DatasetRegistry::builtin()?;
    let catalog = match &cli.views {
        Some(path) => {
            info!("Loading view catalog from {}", path.display());
            ViewCatalog::from_yaml_file(path, registry)?
        }
        None => ViewCatalog::builtin(registry)?,
    };
    let engine = Scorecard::with_catalog(registry, catalog, config)?;

    match cli.command {
        Command::List => {
            for name in engine.registry().names() {
                writeln!(out, "{name}")?;
                for token in engine.catalog().tokens(name)? {
                    writeln!(out, "  {token}")?;
                }
            }
        }
        Command::Headlines => {
            let headlines = engine.registry().headlines();
            writeln!(out, "{}", serde_json::to_string_pretty(headlines)?)?;
        }
        Command::Chart {
            dataset,
            selection,
            sort,
            compact,
        } => {
            let sort = sort.as_deref().map(SortSpec::parse).transpose()?;
            let spec = engine.chart(&dataset, &selection, sort.as_ref())?;
            let json = if compact {
                spec.to_json()?
            } else {
                spec.to_json_pretty()?
            };
            writeln!(out, "{json}")?;
        }
        Command::Table { dataset, csv } => {
            let table = engine.registry().get_table(&dataset)?;
            if csv {
                let mut writer = csv::Writer::from_writer(out);
                writer.write_record(table.column_names())?;
                for row in table.rows() {
                    writer.write_record(row.iter().map(|v| v.to_string()))?;
                }
                writer.flush()?;
            } else {
                writeln!(out, "{}", serde_json::to_string_pretty(&table.snapshot())?)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("scorecard").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_table_as_csv() -> anyhow::Result<()> {
        let output = run_args(&["table", "venue", "--csv"])?;
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("Venue,Matches,Innings,Runs,Average,Strike Rate,50s,100s")
        );
        assert_eq!(lines.next(), Some("Home,33,57,2692,50.79,58.91,9,9"));
        assert_eq!(lines.next(), Some("Away,25,45,1445,35.24,51.54,7,3"));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn test_chart_with_sort_override() -> anyhow::Result<()> {
        let output = run_args(&[
            "chart",
            "opposition",
            "Total Runs",
            "--sort",
            "Opposition:desc",
            "--compact",
        ])?;
        let value: serde_json::Value = serde_json::from_str(output.trim())?;
        assert_eq!(value["categories"][0], "West Indies");
        assert_eq!(value["categories"][6], "Australia");
        Ok(())
    }

    #[test]
    fn test_bad_sort_direction_is_a_scorecard_error() {
        let err = match run_args(&["chart", "opposition", "Total Runs", "--sort", "Runs:sideways"]) {
            Err(err) => err,
            Ok(output) => panic!("expected an error, got {output}"),
        };
        assert!(matches!(
            err.downcast_ref::<ScorecardError>(),
            Some(ScorecardError::Config(_))
        ));
    }

    #[test]
    fn test_list_prints_every_selection() -> anyhow::Result<()> {
        let output = run_args(&["list"])?;
        assert!(output.starts_with("phase\n  Average & Strike Rate\n"));
        assert_eq!(output.lines().filter(|l| l.starts_with("  ")).count(), 21);
        Ok(())
    }
}
