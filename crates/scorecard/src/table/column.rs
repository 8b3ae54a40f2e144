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

use crate::table::common::{DataType, Scalar};
use std::cmp::Ordering;
use std::sync::Arc;
/// Typed, immutable column storage. Cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int64(Arc<[i64]>),
    Float64(Arc<[f64]>),
    String(Arc<[Arc<str>]>),
}
impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(data) => data.len(),
            Column::Float64(data) => data.len(),
            Column::String(data) => data.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn data_type(&self) -> DataType {
        match self {
            Column::Int64(_) => DataType::Int64,
            Column::Float64(_) => DataType::Float64,
            Column::String(_) => DataType::String,
        }
    }
    pub fn is_numeric(&self) -> bool {
        self.data_type().is_numeric()
    }
    pub fn get(&self, index: usize) -> Option<Scalar> {
        match self {
            Column::Int64(data) => data.get(index).map(|v| Scalar::Int(*v)),
            Column::Float64(data) => data.get(index).map(|v| Scalar::Float(*v)),
            Column::String(data) => data.get(index).map(|s| Scalar::Text(Arc::clone(s))),
        }
    }
    pub fn get_string(&self, index: usize) -> Option<String> {
        self.get(index).map(|v| v.to_string())
    }
    pub fn to_f64(&self, index: usize) -> Option<f64> {
        match self {
            Column::Int64(data) => data.get(index).map(|v| *v as f64),
            Column::Float64(data) => data.get(index).copied(),
            Column::String(_) => None,
        }
    }
    /// All values as `f64`, or `None` for string columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match self {
            Column::Int64(data) => Some(data.iter().map(|v| *v as f64).collect()),
            Column::Float64(data) => Some(data.to_vec()),
            Column::String(_) => None,
        }
    }
    /// Total order between two rows of this column. Out-of-range indices sort last.
    pub fn compare_rows(&self, a: usize, b: usize) -> Ordering {
        match self {
            Column::Int64(data) => match (data.get(a), data.get(b)) {
                (Some(x), Some(y)) => x.cmp(y),
                (x, y) => x.is_none().cmp(&y.is_none()),
            },
            Column::Float64(data) => match (data.get(a), data.get(b)) {
                (Some(x), Some(y)) => x.total_cmp(y),
                (x, y) => x.is_none().cmp(&y.is_none()),
            },
            Column::String(data) => match (data.get(a), data.get(b)) {
                (Some(x), Some(y)) => x.cmp(y),
                (x, y) => x.is_none().cmp(&y.is_none()),
            },
        }
    }
}
impl From<Vec<i64>> for Column {
    fn from(values: Vec<i64>) -> Self {
        Column::Int64(values.into())
    }
}
impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Float64(values.into())
    }
}
impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::String(values.into_iter().map(Arc::from).collect())
    }
}
impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::String(values.into_iter().map(Arc::from).collect())
    }
}
