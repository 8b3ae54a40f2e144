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

use crate::config::ZeroDivisionPolicy;
use crate::error::{utils, Result, ScorecardError};
use crate::table::RecordTable;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
pub const FIFTIES: &str = "50s";
pub const CENTURIES: &str = "100s";
/// Metrics computed from stored columns rather than stored themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedMetric {
    /// `100s / (50s + 100s) * 100`
    ConversionRate,
}
impl DerivedMetric {
    pub const ALL: [DerivedMetric; 1] = [DerivedMetric::ConversionRate];
    pub fn name(&self) -> &'static str {
        match self {
            DerivedMetric::ConversionRate => "conversion_rate",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            DerivedMetric::ConversionRate => "Conversion Rate",
        }
    }
    pub fn inputs(&self) -> &'static [&'static str] {
        match self {
            DerivedMetric::ConversionRate => &[FIFTIES, CENTURIES],
        }
    }
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| ScorecardError::UnknownDerivedMetric {
            name: name.to_string(),
        })
    }
}
/// Computes derived metrics, memoising results per table version.
#[derive(Debug)]
pub struct DerivedCalculator {
    policy: ZeroDivisionPolicy,
    memoize: bool,
    cache: DashMap<(u64, DerivedMetric), Arc<[f64]>>,
}
impl DerivedCalculator {
    pub fn new(policy: ZeroDivisionPolicy, memoize: bool) -> Self {
        Self {
            policy,
            memoize,
            cache: DashMap::new(),
        }
    }
    pub fn policy(&self) -> ZeroDivisionPolicy {
        self.policy
    }
    /// One value per table row, in table order.
    pub fn compute(&self, table: &RecordTable, metric: DerivedMetric) -> Result<Arc<[f64]>> {
        let key = (table.version(), metric);
        if self.memoize {
            if let Some(hit) = self.cache.get(&key) {
                return Ok(Arc::clone(hit.value()));
            }
        }
        let values: Arc<[f64]> = self.evaluate(table, metric)?.into();
        if self.memoize {
            self.cache.insert(key, Arc::clone(&values));
        }
        Ok(values)
    }
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
    fn evaluate(&self, table: &RecordTable, metric: DerivedMetric) -> Result<Vec<f64>> {
        debug!(table = table.name(), metric = metric.name(), "computing derived metric");
        match metric {
            DerivedMetric::ConversionRate => {
                let fifties = numeric_input(table, metric, FIFTIES)?;
                let centuries = numeric_input(table, metric, CENTURIES)?;
                let mut zero_rows = 0usize;
                let values = fifties
                    .iter()
                    .zip(centuries.iter())
                    .map(|(f, c)| {
                        let attempts = f + c;
                        if attempts == 0.0 {
                            zero_rows += 1;
                            self.policy.value()
                        } else {
                            c / attempts * 100.0
                        }
                    })
                    .collect();
                if zero_rows > 0 {
                    warn!(
                        table = table.name(),
                        rows = zero_rows,
                        policy = ?self.policy,
                        "conversion rate has no fifties or centuries; applied zero-division policy"
                    );
                }
                Ok(values)
            }
        }
    }
}
impl Default for DerivedCalculator {
    fn default() -> Self {
        Self::new(ZeroDivisionPolicy::default(), true)
    }
}
fn numeric_input(table: &RecordTable, metric: DerivedMetric, column: &str) -> Result<Vec<f64>> {
    let data = table
        .get_column(column)
        .ok_or_else(|| utils::missing_column(table.name(), metric.name(), column))?;
    data.numeric_values()
        .ok_or_else(|| ScorecardError::NonNumericColumn {
            table: table.name().to_string(),
            column: column.to_string(),
        })
}
