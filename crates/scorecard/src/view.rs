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

use crate::config::validate_palette;
use crate::derived::DerivedMetric;
use crate::error::{utils, ConfigError, Result, ScorecardError};
use crate::format::LabelFormat;
use crate::registry::DatasetRegistry;
use crate::table::{RecordTable, SortDirection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;
/// The view catalog shipped with the crate.
pub const BUILTIN_VIEWS: &str = include_str!("../config/views.yml");
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
    Stack,
}
/// What the text on each pie slice shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextInfo {
    #[serde(rename = "value")]
    Value,
    /// Share of the visible total.
    #[serde(rename = "percent")]
    Percent,
    /// Category followed by its share of the visible total.
    #[serde(rename = "percent+label")]
    PercentLabel,
}
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortSpec {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}
impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
    /// Parses `COLUMN`, `COLUMN:asc` or `COLUMN:desc`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.rsplit_once(':') {
            Some((column, dir)) if !column.is_empty() => {
                let direction = SortDirection::parse(dir)
                    .ok_or_else(|| utils::invalid_config("sort direction", dir))?;
                Ok(Self::new(column, direction))
            }
            _ if !value.trim().is_empty() => Ok(Self::new(value, SortDirection::Ascending)),
            _ => Err(utils::invalid_config("sort column", value)),
        }
    }
}
/// Drops rows whose `column` renders to `not_equal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowFilter {
    pub column: String,
    pub not_equal: String,
}
/// Where a plotted series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSource<'a> {
    Stored(&'a str),
    Derived(DerivedMetric),
}
impl<'a> SeriesSource<'a> {
    pub fn resolve(table: &RecordTable, name: &'a str) -> Option<Self> {
        if table.has_column(name) {
            Some(SeriesSource::Stored(name))
        } else {
            DerivedMetric::from_name(name).map(SeriesSource::Derived)
        }
    }
    pub fn display_name(&self) -> &'a str {
        match self {
            SeriesSource::Stored(name) => *name,
            SeriesSource::Derived(metric) => metric.label(),
        }
    }
}
/// How to turn one table into one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    pub token: String,
    pub table_name: String,
    pub x_column: String,
    pub y_columns: Vec<String>,
    pub group_by: Option<String>,
    pub sort_by: Option<SortSpec>,
    pub chart_kind: ChartKind,
    pub label_format: LabelFormat,
    pub title: String,
    pub filter: Option<RowFilter>,
    pub bar_mode: Option<BarMode>,
    pub markers: bool,
    pub hole: Option<f64>,
    pub text_info: Option<TextInfo>,
    pub palette: Vec<String>,
}
impl MetricView {
    pub fn new(
        table_name: impl Into<String>,
        token: impl Into<String>,
        x_column: impl Into<String>,
        y_columns: Vec<String>,
    ) -> Self {
        let token = token.into();
        Self {
            title: token.clone(),
            token,
            table_name: table_name.into(),
            x_column: x_column.into(),
            y_columns,
            group_by: None,
            sort_by: None,
            chart_kind: ChartKind::Bar,
            label_format: LabelFormat::Integer,
            filter: None,
            bar_mode: None,
            markers: false,
            hole: None,
            text_info: None,
            palette: Vec::new(),
        }
    }
    pub fn with_chart_kind(mut self, kind: ChartKind) -> Self {
        self.chart_kind = kind;
        self
    }
    pub fn with_label_format(mut self, format: LabelFormat) -> Self {
        self.label_format = format;
        self
    }
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort_by = Some(sort);
        self
    }
    pub fn with_group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by = Some(column.into());
        self
    }
    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filter = Some(filter);
        self
    }
    pub fn with_text_info(mut self, text_info: TextInfo) -> Self {
        self.text_info = Some(text_info);
        self
    }
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
    pub fn series_sources<'a>(&'a self, table: &RecordTable) -> Result<Vec<SeriesSource<'a>>> {
        self.y_columns
            .iter()
            .map(|name| {
                SeriesSource::resolve(table, name)
                    .ok_or_else(|| utils::missing_column(table.name(), &self.token, name))
            })
            .collect()
    }
    /// Checks every column this view references against `table`.
    pub fn validate(&self, table: &RecordTable) -> Result<()> {
        if self.y_columns.is_empty() {
            return Err(ConfigError::EmptySeries {
                view: self.token.clone(),
            }
            .into());
        }
        self.require_column(table, &self.x_column)?;
        for source in self.series_sources(table)? {
            match source {
                SeriesSource::Stored(name) => self.require_numeric(table, name)?,
                SeriesSource::Derived(metric) => {
                    for input in metric.inputs() {
                        self.require_numeric(table, input)?;
                    }
                }
            }
        }
        if let Some(group) = &self.group_by {
            self.require_column(table, group)?;
        }
        if let Some(sort) = &self.sort_by {
            self.validate_sort(table, sort)?;
        }
        if let Some(filter) = &self.filter {
            self.require_column(table, &filter.column)?;
        }
        if let Some(hole) = self.hole {
            if !(0.0..1.0).contains(&hole) {
                return Err(utils::invalid_config("hole", &hole.to_string()));
            }
        }
        validate_palette("palette", &self.palette)
    }
    /// A sort key may be a stored column or a derived metric.
    pub fn validate_sort(&self, table: &RecordTable, sort: &SortSpec) -> Result<()> {
        match SeriesSource::resolve(table, &sort.column) {
            Some(SeriesSource::Stored(_)) => Ok(()),
            Some(SeriesSource::Derived(metric)) => metric
                .inputs()
                .iter()
                .try_for_each(|input| self.require_numeric(table, input)),
            None => Err(utils::missing_column(table.name(), &self.token, &sort.column)),
        }
    }
    fn require_column(&self, table: &RecordTable, column: &str) -> Result<()> {
        if table.has_column(column) {
            Ok(())
        } else {
            Err(utils::missing_column(table.name(), &self.token, column))
        }
    }
    fn require_numeric(&self, table: &RecordTable, column: &str) -> Result<()> {
        match table.get_column(column) {
            Some(data) if data.is_numeric() => Ok(()),
            Some(_) => Err(ScorecardError::NonNumericColumn {
                table: table.name().to_string(),
                column: column.to_string(),
            }),
            None => Err(utils::missing_column(table.name(), &self.token, column)),
        }
    }
}
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    datasets: Vec<DatasetViews>,
}
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetViews {
    table: String,
    x_column: String,
    views: Vec<ViewDecl>,
}
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewDecl {
    token: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    chart_kind: ChartKind,
    y_columns: Vec<String>,
    #[serde(default)]
    label_format: LabelFormat,
    #[serde(default)]
    group_by: Option<String>,
    #[serde(default)]
    sort_by: Option<SortSpec>,
    #[serde(default)]
    filter: Option<RowFilter>,
    #[serde(default)]
    bar_mode: Option<BarMode>,
    #[serde(default)]
    markers: bool,
    #[serde(default)]
    hole: Option<f64>,
    #[serde(default)]
    text_info: Option<TextInfo>,
    #[serde(default)]
    palette: Vec<String>,
}
impl ViewDecl {
    fn into_view(self, table: &str, x_column: &str) -> MetricView {
        MetricView {
            title: self.title.unwrap_or_else(|| self.token.clone()),
            token: self.token,
            table_name: table.to_string(),
            x_column: x_column.to_string(),
            y_columns: self.y_columns,
            group_by: self.group_by,
            sort_by: self.sort_by,
            chart_kind: self.chart_kind,
            label_format: self.label_format,
            filter: self.filter,
            bar_mode: self.bar_mode,
            markers: self.markers,
            hole: self.hole,
            text_info: self.text_info,
            palette: self.palette,
        }
    }
}
/// Declarative lookup from `(table, selection token)` to a validated view.
#[derive(Debug)]
pub struct ViewCatalog {
    views: Vec<MetricView>,
    view_by_key: HashMap<(String, String), usize>,
    views_by_table: HashMap<String, Vec<usize>>,
}
impl ViewCatalog {
    pub fn builtin(registry: &DatasetRegistry) -> Result<Self> {
        Self::load(BUILTIN_VIEWS, registry)
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P, registry: &DatasetRegistry) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::ConfigFile {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::load(&content, registry)
    }
    pub fn load(yaml: &str, registry: &DatasetRegistry) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let views = file
            .datasets
            .into_iter()
            .flat_map(|group| {
                let DatasetViews {
                    table,
                    x_column,
                    views,
                } = group;
                views
                    .into_iter()
                    .map(move |decl| decl.into_view(&table, &x_column))
            })
            .collect();
        Self::from_views(views, registry)
    }
    /// Builds a catalog, rejecting any view that does not fit its table.
    pub fn from_views(views: Vec<MetricView>, registry: &DatasetRegistry) -> Result<Self> {
        let mut view_by_key = HashMap::with_capacity(views.len());
        let mut views_by_table: HashMap<String, Vec<usize>> = HashMap::new();
        for name in registry.names() {
            views_by_table.insert(name.to_string(), Vec::new());
        }
        for (idx, view) in views.iter().enumerate() {
            let table = registry.get_table(&view.table_name)?;
            view.validate(table)?;
            let key = (view.table_name.clone(), view.token.clone());
            if view_by_key.insert(key, idx).is_some() {
                return Err(ConfigError::DuplicateSelection {
                    dataset: view.table_name.clone(),
                    token: view.token.clone(),
                }
                .into());
            }
            views_by_table
                .entry(view.table_name.clone())
                .or_default()
                .push(idx);
        }
        info!(views = views.len(), tables = views_by_table.len(), "view catalog loaded");
        Ok(Self {
            views,
            view_by_key,
            views_by_table,
        })
    }
    pub fn resolve(&self, table_name: &str, token: &str) -> Result<&MetricView> {
        if !self.views_by_table.contains_key(table_name) {
            return Err(utils::unknown_dataset(table_name));
        }
        self.view_by_key
            .get(&(table_name.to_string(), token.to_string()))
            .map(|&idx| &self.views[idx])
            .ok_or_else(|| ScorecardError::UnknownSelection {
                dataset: table_name.to_string(),
                token: token.to_string(),
            })
    }
    /// Selection tokens for `table_name`, in declaration order.
    pub fn tokens(&self, table_name: &str) -> Result<Vec<&str>> {
        self.views_by_table
            .get(table_name)
            .map(|indices| indices.iter().map(|&i| self.views[i].token.as_str()).collect())
            .ok_or_else(|| utils::unknown_dataset(table_name))
    }
    /// Every `(table, token)` pair the catalog can resolve.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.views
            .iter()
            .map(|v| (v.table_name.as_str(), v.token.as_str()))
            .collect()
    }
    pub fn views(&self) -> &[MetricView] {
        &self.views
    }
}
