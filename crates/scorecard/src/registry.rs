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

use crate::datasets;
use crate::error::{utils, Result, TableError};
use crate::table::RecordTable;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
static BUILTIN: OnceCell<DatasetRegistry> = OnceCell::new();
/// A career-overview card: a headline figure with a short qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub label: String,
    pub value: String,
    pub delta: String,
}
impl Headline {
    pub fn new(label: &str, value: &str, delta: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            delta: delta.to_string(),
        }
    }
}
/// Immutable set of named tables. Lookups never mutate and never allocate tables.
#[derive(Debug)]
pub struct DatasetRegistry {
    tables: Vec<RecordTable>,
    table_by_name: HashMap<String, usize>,
    headlines: Vec<Headline>,
}
impl DatasetRegistry {
    /// The registry of embedded career data, built on first use.
    pub fn builtin() -> Result<&'static DatasetRegistry> {
        BUILTIN.get_or_try_init(|| -> Result<DatasetRegistry> {
            let registry = Self::with_tables(datasets::all()?)?.with_headlines(datasets::headlines());
            debug!(tables = registry.tables.len(), "built-in dataset registry loaded");
            Ok(registry)
        })
    }
    pub fn with_tables(tables: Vec<RecordTable>) -> Result<Self> {
        let mut table_by_name = HashMap::with_capacity(tables.len());
        for (idx, table) in tables.iter().enumerate() {
            if table_by_name.insert(table.name().to_string(), idx).is_some() {
                return Err(TableError::DuplicateTable {
                    table: table.name().to_string(),
                }
                .into());
            }
        }
        Ok(Self {
            tables,
            table_by_name,
            headlines: Vec::new(),
        })
    }
    pub fn with_headlines(mut self, headlines: Vec<Headline>) -> Self {
        self.headlines = headlines;
        self
    }
    pub fn get_table(&self, name: &str) -> Result<&RecordTable> {
        self.table_by_name
            .get(name)
            .map(|&idx| &self.tables[idx])
            .ok_or_else(|| utils::unknown_dataset(name))
    }
    pub fn contains(&self, name: &str) -> bool {
        self.table_by_name.contains_key(name)
    }
    /// Table names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(RecordTable::name).collect()
    }
    pub fn tables(&self) -> &[RecordTable] {
        &self.tables
    }
    pub fn headlines(&self) -> &[Headline] {
        &self.headlines
    }
}
