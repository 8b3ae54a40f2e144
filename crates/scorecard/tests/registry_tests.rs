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
use scorecard::error::TableError;
use scorecard::{DataType, DatasetRegistry, RecordTable, Scalar, ScorecardError};

#[test]
fn test_builtin_registry_lists_all_tables_in_order() -> Result<()> {
    let registry = DatasetRegistry::builtin()?;
    assert_eq!(
        registry.names(),
        vec!["phase", "position", "venue", "opposition", "situation", "dismissal", "shot"]
    );
    Ok(())
}

#[test]
fn test_get_table_returns_typed_columns() -> Result<()> {
    let registry = DatasetRegistry::builtin()?;
    let venue = registry.get_table("venue")?;
    assert_eq!(venue.row_count(), 2);
    assert_eq!(venue.column_count(), 8);
    assert_eq!(venue.column_type("Venue"), Some(DataType::String));
    assert_eq!(venue.column_type("Runs"), Some(DataType::Int64));
    assert_eq!(venue.column_type("Average"), Some(DataType::Float64));
    assert_eq!(
        venue.row(0),
        Some(vec![
            Scalar::Text("Home".into()),
            Scalar::Int(33),
            Scalar::Int(57),
            Scalar::Int(2692),
            Scalar::Float(50.79),
            Scalar::Float(58.91),
            Scalar::Int(9),
            Scalar::Int(9),
        ])
    );
    assert!(venue.row(2).is_none());
    Ok(())
}

#[test]
fn test_unknown_dataset_is_reported() -> Result<()> {
    let registry = DatasetRegistry::builtin()?;
    match registry.get_table("t20i") {
        Err(ScorecardError::UnknownDataset { name }) => assert_eq!(name, "t20i"),
        other => panic!("expected UnknownDataset, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_every_builtin_table_is_rectangular() -> Result<()> {
    let registry = DatasetRegistry::builtin()?;
    for table in registry.tables() {
        for name in table.column_names() {
            let column = table.get_column(name).expect("listed column exists");
            assert_eq!(column.len(), table.row_count(), "{}.{}", table.name(), name);
        }
    }
    Ok(())
}

#[test]
fn test_headlines_match_career_overview() -> Result<()> {
    let registry = DatasetRegistry::builtin()?;
    let headlines = registry.headlines();
    assert_eq!(headlines.len(), 4);
    assert_eq!(headlines[0].label, "Test Matches");
    assert_eq!(headlines[0].value, "58");
    assert_eq!(headlines[1].value, "4,137");
    assert_eq!(headlines[3].delta, "Win %: 66.67");
    Ok(())
}

#[test]
fn test_builder_rejects_length_mismatch() {
    let result = RecordTable::builder("broken")
        .column("Name", vec!["a", "b"])
        .column("Runs", vec![1_i64])
        .build();
    assert!(matches!(
        result,
        Err(ScorecardError::Table(TableError::LengthMismatch {
            expected: 2,
            found: 1,
            ..
        }))
    ));
}

#[test]
fn test_builder_rejects_duplicate_and_empty_tables() {
    let duplicate = RecordTable::builder("dup")
        .column("Runs", vec![1_i64])
        .column("Runs", vec![2_i64])
        .build();
    assert!(matches!(
        duplicate,
        Err(ScorecardError::Table(TableError::DuplicateColumn { .. }))
    ));
    let empty = RecordTable::builder("empty").build();
    assert!(matches!(
        empty,
        Err(ScorecardError::Table(TableError::EmptyTable { .. }))
    ));
}

#[test]
fn test_registry_rejects_duplicate_names_and_versions_are_unique() -> Result<()> {
    let a = RecordTable::builder("same").column("x", vec![1_i64]).build()?;
    let b = RecordTable::builder("same").column("x", vec![1_i64]).build()?;
    assert_ne!(a.version(), b.version());
    let result = DatasetRegistry::with_tables(vec![a, b]);
    assert!(matches!(
        result,
        Err(ScorecardError::Table(TableError::DuplicateTable { .. }))
    ));
    Ok(())
}

#[test]
fn test_snapshot_serialises_text_cells() -> Result<()> {
    let venue = DatasetRegistry::builtin()?.get_table("venue")?;
    let value = serde_json::to_value(venue.snapshot())?;
    assert_eq!(value["name"], "venue");
    assert_eq!(value["columns"][0]["name"], "Venue");
    assert_eq!(value["columns"][0]["data_type"], "String");
    assert_eq!(value["rows"][0][0], "Home");
    assert_eq!(value["rows"][0][3], 2692);
    assert_eq!(value["rows"][1][4], 35.24);
    Ok(())
}
