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

use crate::error::{Result, TableError};
use crate::table::column::Column;
use crate::table::common::{DataType, Scalar, SortDirection};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);
/// A named, ordered, immutable set of equally long typed columns.
#[derive(Debug, Clone)]
pub struct RecordTable {
    name: String,
    version: u64,
    columns: HashMap<String, Arc<Column>>,
    column_order: Vec<String>,
    row_count: usize,
}
#[derive(Debug)]
pub struct RecordTableBuilder {
    name: String,
    columns: Vec<(String, Column)>,
}
impl RecordTableBuilder {
    pub fn column(mut self, name: impl Into<String>, column: impl Into<Column>) -> Self {
        self.columns.push((name.into(), column.into()));
        self
    }
    pub fn build(self) -> Result<RecordTable> {
        let Some((_, first)) = self.columns.first() else {
            return Err(TableError::EmptyTable { table: self.name }.into());
        };
        let row_count = first.len();
        let mut columns = HashMap::with_capacity(self.columns.len());
        let mut column_order = Vec::with_capacity(self.columns.len());
        for (name, column) in self.columns {
            if column.len() != row_count {
                return Err(TableError::LengthMismatch {
                    table: self.name,
                    column: name,
                    expected: row_count,
                    found: column.len(),
                }
                .into());
            }
            if columns.contains_key(&name) {
                return Err(TableError::DuplicateColumn {
                    table: self.name,
                    column: name,
                }
                .into());
            }
            column_order.push(name.clone());
            columns.insert(name, Arc::new(column));
        }
        Ok(RecordTable {
            name: self.name,
            version: NEXT_VERSION.fetch_add(1, AtomicOrdering::Relaxed),
            columns,
            column_order,
            row_count,
        })
    }
}
impl RecordTable {
    pub fn builder(name: impl Into<String>) -> RecordTableBuilder {
        RecordTableBuilder {
            name: name.into(),
            columns: Vec::new(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Process-unique identity of this table's contents.
    pub fn version(&self) -> u64 {
        self.version
    }
    pub fn row_count(&self) -> usize {
        self.row_count
    }
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name).map(|arc| arc.as_ref())
    }
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
    pub fn column_type(&self, name: &str) -> Option<DataType> {
        self.get_column(name).map(Column::data_type)
    }
    pub fn row(&self, index: usize) -> Option<Vec<Scalar>> {
        if index >= self.row_count {
            return None;
        }
        self.column_order
            .iter()
            .map(|name| self.columns[name].get(index))
            .collect()
    }
    pub fn rows(&self) -> impl Iterator<Item = Vec<Scalar>> + '_ {
        (0..self.row_count).filter_map(move |i| self.row(i))
    }
    /// Stable ordering of `indices` by `column`; equal keys keep their input order.
    /// The table itself is never reordered.
    pub fn sorted_indices(
        &self,
        indices: &[usize],
        column: &str,
        direction: SortDirection,
    ) -> Option<Vec<usize>> {
        let column = self.get_column(column)?;
        let mut sorted = indices.to_vec();
        sorted.sort_by(|&a, &b| {
            let cmp = column.compare_rows(a, b);
            match direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        });
        Some(sorted)
    }
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            name: self.name.clone(),
            columns: self
                .column_order
                .iter()
                .map(|name| ColumnSnapshot {
                    name: name.clone(),
                    data_type: self.columns[name].data_type(),
                })
                .collect(),
            rows: self.rows().collect(),
        }
    }
}
/// Serialisable copy of a table, for hosts that want to show raw data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<ColumnSnapshot>,
    pub rows: Vec<Vec<Scalar>>,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSnapshot {
    pub name: String,
    pub data_type: DataType,
}
