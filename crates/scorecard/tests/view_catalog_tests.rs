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

use anyhow::Result;
use scorecard::error::ConfigError;
use scorecard::{
    BarMode, ChartKind, DatasetRegistry, LabelFormat, ScorecardError, SortDirection, SortSpec,
    TextInfo, ViewCatalog,
};
use std::io::Write;

fn catalog() -> Result<ViewCatalog> {
    Ok(ViewCatalog::builtin(DatasetRegistry::builtin()?)?)
}

fn load(yaml: &str) -> scorecard::Result<ViewCatalog> {
    let registry = DatasetRegistry::builtin()?;
    ViewCatalog::load(yaml, registry)
}

#[test]
fn test_resolve_venue_average_comparison() -> Result<()> {
    let catalog = catalog()?;
    let view = catalog.resolve("venue", "Average Comparison")?;
    assert_eq!(view.table_name, "venue");
    assert_eq!(view.x_column, "Venue");
    assert_eq!(view.y_columns, vec!["Average".to_string()]);
    assert_eq!(view.chart_kind, ChartKind::Bar);
    assert_eq!(view.label_format, LabelFormat::Fixed2dp);
    assert_eq!(view.title, "Batting Average: Home vs Away");
    assert!(view.sort_by.is_none());
    Ok(())
}

#[test]
fn test_resolve_is_pure() -> Result<()> {
    let catalog = catalog()?;
    let first = catalog.resolve("opposition", "High Score")?.clone();
    let second = catalog.resolve("opposition", "High Score")?;
    assert_eq!(&first, second);
    assert_eq!(
        first.sort_by,
        Some(SortSpec::new("High Score", SortDirection::Descending))
    );
    Ok(())
}

#[test]
fn test_unknown_selection_and_dataset() -> Result<()> {
    let catalog = catalog()?;
    match catalog.resolve("venue", "Strike Rate") {
        Err(ScorecardError::UnknownSelection { dataset, token }) => {
            assert_eq!(dataset, "venue");
            assert_eq!(token, "Strike Rate");
        }
        other => panic!("expected UnknownSelection, got {other:?}"),
    }
    assert!(matches!(
        catalog.resolve("odi", "Average"),
        Err(ScorecardError::UnknownDataset { .. })
    ));
    Ok(())
}

#[test]
fn test_tokens_follow_declaration_order() -> Result<()> {
    let catalog = catalog()?;
    assert_eq!(
        catalog.tokens("phase")?,
        vec!["Average & Strike Rate", "Runs per Phase", "Centuries & Half-centuries"]
    );
    assert_eq!(
        catalog.tokens("shot")?,
        vec!["Average per Shot", "Dismissal Rate", "Run Production"]
    );
    assert_eq!(catalog.pairs().len(), 21);
    Ok(())
}

#[test]
fn test_presentation_hints_are_loaded() -> Result<()> {
    let catalog = catalog()?;
    let phase = catalog.resolve("phase", "Average & Strike Rate")?;
    assert_eq!(phase.chart_kind, ChartKind::Line);
    assert!(phase.markers);
    assert_eq!(phase.palette, vec!["#1E88E5", "#FFC107"]);

    let grouped = catalog.resolve("venue", "Centuries Comparison")?;
    assert_eq!(grouped.bar_mode, Some(BarMode::Group));

    let donut = catalog.resolve("dismissal", "Dismissal Breakdown")?;
    assert_eq!(donut.chart_kind, ChartKind::Pie);
    assert_eq!(donut.hole, Some(0.4));
    assert_eq!(donut.text_info, Some(TextInfo::PercentLabel));

    let shots = catalog.resolve("shot", "Average per Shot")?;
    let filter = shots.filter.as_ref().expect("filter declared");
    assert_eq!(filter.not_equal, "Defensive Stroke");
    Ok(())
}

#[test]
fn test_missing_column_detected_at_load() {
    let yaml = r#"
datasets:
  - table: venue
    x_column: Venue
    views:
      - token: "Typo"
        y_columns: ["Avg"]
"#;
    match load(yaml) {
        Err(ScorecardError::MissingColumn {
            table,
            view,
            column,
        }) => {
            assert_eq!(table, "venue");
            assert_eq!(view, "Typo");
            assert_eq!(column, "Avg");
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_missing_sort_and_group_columns_detected_at_load() {
    let sort = r#"
datasets:
  - table: opposition
    x_column: Opposition
    views:
      - token: "Bad sort"
        y_columns: ["Runs"]
        sort_by: { column: "Wickets", direction: descending }
"#;
    assert!(matches!(load(sort), Err(ScorecardError::MissingColumn { .. })));
    let group = r#"
datasets:
  - table: opposition
    x_column: Team
    views:
      - token: "Bad x"
        y_columns: ["Runs"]
"#;
    assert!(matches!(load(group), Err(ScorecardError::MissingColumn { .. })));
}

#[test]
fn test_derived_metric_requires_its_inputs() {
    let yaml = r#"
datasets:
  - table: dismissal
    x_column: Dismissal Type
    views:
      - token: "Conversion"
        y_columns: ["conversion_rate"]
"#;
    match load(yaml) {
        Err(ScorecardError::MissingColumn { column, .. }) => assert_eq!(column, "50s"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_derived_sort_requires_its_inputs() {
    let yaml = r#"
datasets:
  - table: shot
    x_column: Shot Type
    views:
      - token: "Runs by conversion"
        y_columns: ["Runs Scored"]
        sort_by: { column: conversion_rate }
"#;
    match load(yaml) {
        Err(ScorecardError::MissingColumn { table, view, column }) => {
            assert_eq!(table, "shot");
            assert_eq!(view, "Runs by conversion");
            assert_eq!(column, "50s");
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_derived_sort_loads_when_inputs_exist() -> Result<()> {
    let yaml = r#"
datasets:
  - table: situation
    x_column: Situation
    views:
      - token: "Runs by conversion"
        y_columns: ["Runs"]
        sort_by: { column: conversion_rate, direction: descending }
"#;
    let catalog = load(yaml)?;
    assert_eq!(catalog.tokens("situation")?, vec!["Runs by conversion"]);
    Ok(())
}

#[test]
fn test_misspelt_keys_are_rejected() {
    let view_key = r#"
datasets:
  - table: venue
    x_column: Venue
    views:
      - token: "Runs"
        y_columns: ["Runs"]
        sortby: { column: "Runs", direction: descending }
"#;
    assert!(matches!(
        load(view_key),
        Err(ScorecardError::Config(ConfigError::YamlParse { .. }))
    ));
    let dataset_key = r#"
datasets:
  - table: venue
    x-column: Venue
    views: []
"#;
    assert!(matches!(
        load(dataset_key),
        Err(ScorecardError::Config(ConfigError::YamlParse { .. }))
    ));
    let sort_key = r#"
datasets:
  - table: venue
    x_column: Venue
    views:
      - token: "Runs"
        y_columns: ["Runs"]
        sort_by: { column: "Runs", order: descending }
"#;
    assert!(matches!(
        load(sort_key),
        Err(ScorecardError::Config(ConfigError::YamlParse { .. }))
    ));
}

#[test]
fn test_text_column_cannot_be_a_series() {
    let yaml = r#"
datasets:
  - table: venue
    x_column: Venue
    views:
      - token: "Names"
        y_columns: ["Venue"]
"#;
    assert!(matches!(
        load(yaml),
        Err(ScorecardError::NonNumericColumn { .. })
    ));
}

#[test]
fn test_duplicate_tokens_and_unknown_tables_are_rejected() {
    let duplicate = r#"
datasets:
  - table: venue
    x_column: Venue
    views:
      - token: "Runs"
        y_columns: ["Runs"]
      - token: "Runs"
        y_columns: ["Average"]
"#;
    assert!(matches!(
        load(duplicate),
        Err(ScorecardError::Config(ConfigError::DuplicateSelection { .. }))
    ));
    let unknown = r#"
datasets:
  - table: t20i
    x_column: Year
    views:
      - token: "Runs"
        y_columns: ["Runs"]
"#;
    assert!(matches!(
        load(unknown),
        Err(ScorecardError::UnknownDataset { .. })
    ));
}

#[test]
fn test_malformed_yaml_is_a_config_error() {
    let result = load("datasets: [ { table: venue ");
    match result {
        Err(err @ ScorecardError::Config(ConfigError::YamlParse { .. })) => {
            assert!(err.is_configuration_error());
        }
        other => panic!("expected YamlParse, got {other:?}"),
    }
}

#[test]
fn test_catalog_from_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"
datasets:
  - table: position
    x_column: Position
    views:
      - token: "Fifties"
        y_columns: ["50s"]
        sort_by: {{ column: "50s", direction: descending }}
"#
    )?;
    let registry = DatasetRegistry::builtin()?;
    let catalog = ViewCatalog::from_yaml_file(file.path(), registry)?;
    assert_eq!(catalog.tokens("position")?, vec!["Fifties"]);
    assert!(catalog.tokens("venue")?.is_empty());
    assert!(matches!(
        catalog.resolve("venue", "Average Comparison"),
        Err(ScorecardError::UnknownSelection { .. })
    ));
    Ok(())
}

#[test]
fn test_sort_spec_parsing() -> Result<()> {
    assert_eq!(
        SortSpec::parse("Runs:desc")?,
        SortSpec::new("Runs", SortDirection::Descending)
    );
    assert_eq!(
        SortSpec::parse("High Score:ascending")?,
        SortSpec::new("High Score", SortDirection::Ascending)
    );
    assert_eq!(
        SortSpec::parse("Average")?,
        SortSpec::new("Average", SortDirection::Ascending)
    );
    assert!(SortSpec::parse("Runs:sideways").is_err());
    assert!(SortSpec::parse("  ").is_err());
    Ok(())
}
