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

use crate::derived::DerivedCalculator;
use crate::error::{utils, Result, ScorecardError};
use crate::format::LabelFormat;
use crate::table::{RecordTable, SortDirection};
use crate::view::{BarMode, ChartKind, MetricView, SeriesSource, SortSpec, TextInfo};
use serde::Serialize;
use tracing::debug;
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub format: LabelFormat,
    pub labels: Vec<String>,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayHints {
    pub palette: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    pub markers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_info: Option<TextInfo>,
}
/// Render-ready description of one chart. Holds no reference to its source table.
///
/// Non-finite values serialise as JSON `null` and are labelled `n/a`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub chart_kind: ChartKind,
    pub x_field: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub color_field: String,
    pub color_keys: Vec<String>,
    pub hints: DisplayHints,
}
impl ChartSpec {
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
    /// True when every series and the colour keys line up with the categories.
    pub fn is_aligned(&self) -> bool {
        let n = self.categories.len();
        self.color_keys.len() == n
            && self
                .series
                .iter()
                .all(|s| s.values.len() == n && s.labels.len() == n)
    }
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
/// Assembles chart specs. Never mutates the table it reads.
pub struct ChartSpecBuilder<'a> {
    calculator: &'a DerivedCalculator,
    default_palette: &'a [String],
}
impl<'a> ChartSpecBuilder<'a> {
    pub fn new(calculator: &'a DerivedCalculator, default_palette: &'a [String]) -> Self {
        Self {
            calculator,
            default_palette,
        }
    }
    pub fn build(
        &self,
        table: &RecordTable,
        view: &MetricView,
        sort_override: Option<&SortSpec>,
    ) -> Result<ChartSpec> {
        view.validate(table)?;
        if let Some(sort) = sort_override {
            view.validate_sort(table, sort)?;
        }
        debug!(
            table = table.name(),
            view = view.token.as_str(),
            sort_override = sort_override.map(|s| s.column.as_str()),
            "building chart spec"
        );
        let columns = view
            .series_sources(table)?
            .into_iter()
            .map(|source| -> Result<(String, Vec<f64>)> {
                Ok((
                    source.display_name().to_string(),
                    self.series_values(table, source)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut rows = self.visible_rows(table, view);
        if let Some(sort) = sort_override.or(view.sort_by.as_ref()) {
            rows = self.sort_rows(table, view, &rows, sort)?;
        }
        let categories = self.column_strings(table, view, &view.x_column, &rows)?;
        let color_field = view.group_by.as_deref().unwrap_or(&view.x_column);
        let color_keys = self.column_strings(table, view, color_field, &rows)?;
        let series = columns
            .into_iter()
            .map(|(name, full)| {
                let values: Vec<f64> = rows.iter().map(|&i| full[i]).collect();
                let (format, labels) = match view.text_info {
                    Some(TextInfo::Percent) => (LabelFormat::Percent, share_labels(&values, None)),
                    Some(TextInfo::PercentLabel) => (
                        LabelFormat::Percent,
                        share_labels(&values, Some(categories.as_slice())),
                    ),
                    Some(TextInfo::Value) | None => {
                        (view.label_format, view.label_format.format_all(&values))
                    }
                };
                Series {
                    name,
                    labels,
                    values,
                    format,
                }
            })
            .collect();
        let palette = if view.palette.is_empty() {
            self.default_palette.to_vec()
        } else {
            view.palette.clone()
        };
        Ok(ChartSpec {
            title: view.title.clone(),
            chart_kind: view.chart_kind,
            x_field: view.x_column.clone(),
            categories,
            series,
            color_field: color_field.to_string(),
            color_keys,
            hints: DisplayHints {
                palette,
                bar_mode: view.bar_mode,
                markers: view.markers,
                hole: view.hole,
                text_info: view.text_info,
            },
        })
    }
    /// Full-length values for one series, aligned to table rows.
    fn series_values(&self, table: &RecordTable, source: SeriesSource<'_>) -> Result<Vec<f64>> {
        match source {
            SeriesSource::Stored(name) => table
                .get_column(name)
                .and_then(|c| c.numeric_values())
                .ok_or_else(|| ScorecardError::NonNumericColumn {
                    table: table.name().to_string(),
                    column: name.to_string(),
                }),
            SeriesSource::Derived(metric) => Ok(self.calculator.compute(table, metric)?.to_vec()),
        }
    }
    fn visible_rows(&self, table: &RecordTable, view: &MetricView) -> Vec<usize> {
        let all = 0..table.row_count();
        match (&view.filter, view.filter.as_ref().and_then(|f| table.get_column(&f.column))) {
            (Some(filter), Some(column)) => all
                .filter(|&i| column.get_string(i).as_deref() != Some(filter.not_equal.as_str()))
                .collect(),
            _ => all.collect(),
        }
    }
    fn sort_rows(
        &self,
        table: &RecordTable,
        view: &MetricView,
        rows: &[usize],
        sort: &SortSpec,
    ) -> Result<Vec<usize>> {
        match SeriesSource::resolve(table, &sort.column) {
            Some(SeriesSource::Stored(column)) => table
                .sorted_indices(rows, column, sort.direction)
                .ok_or_else(|| utils::missing_column(table.name(), &view.token, column)),
            Some(SeriesSource::Derived(metric)) => {
                let keys = self.calculator.compute(table, metric)?;
                let mut sorted = rows.to_vec();
                sorted.sort_by(|&a, &b| {
                    let cmp = keys[a].total_cmp(&keys[b]);
                    match sort.direction {
                        SortDirection::Ascending => cmp,
                        SortDirection::Descending => cmp.reverse(),
                    }
                });
                Ok(sorted)
            }
            None => Err(utils::missing_column(table.name(), &view.token, &sort.column)),
        }
    }
    fn column_strings(
        &self,
        table: &RecordTable,
        view: &MetricView,
        column: &str,
        rows: &[usize],
    ) -> Result<Vec<String>> {
        let data = table
            .get_column(column)
            .ok_or_else(|| utils::missing_column(table.name(), &view.token, column))?;
        Ok(rows
            .iter()
            .map(|&i| data.get_string(i).unwrap_or_default())
            .collect())
    }
}
/// Each value as a percentage of the finite total, optionally prefixed by its category.
fn share_labels(values: &[f64], categories: Option<&[String]>) -> Vec<String> {
    let total: f64 = values.iter().filter(|v| v.is_finite()).sum();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let share = if total == 0.0 { f64::NAN } else { v / total * 100.0 };
            let text = LabelFormat::Percent.format(share);
            match categories.and_then(|c| c.get(i)) {
                Some(category) => format!("{category} {text}"),
                None => text,
            }
        })
        .collect()
}
