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

pub mod chart_spec;
pub mod config;
pub mod datasets;
pub mod derived;
pub mod error;
pub mod format;
pub mod registry;
pub mod table;
pub mod view;

pub use chart_spec::{ChartSpec, ChartSpecBuilder, DisplayHints, Series};
pub use config::{EngineConfig, ZeroDivisionPolicy};
pub use derived::{DerivedCalculator, DerivedMetric};
pub use error::{ErrorReporter, Result, ScorecardError};
pub use format::LabelFormat;
pub use registry::{DatasetRegistry, Headline};
pub use table::{Column, DataType, RecordTable, Scalar, SortDirection};
pub use view::{BarMode, ChartKind, MetricView, RowFilter, SortSpec, TextInfo, ViewCatalog};

/// Registry, view catalog and derived-metric cache wired together.
///
/// Every call is a single pure pass over shared immutable tables, so one
/// instance can serve concurrent callers.
pub struct Scorecard<'r> {
    registry: &'r DatasetRegistry,
    catalog: ViewCatalog,
    calculator: DerivedCalculator,
    config: EngineConfig,
}
impl Scorecard<'static> {
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let registry = DatasetRegistry::builtin()?;
        let catalog = ViewCatalog::builtin(registry)?;
        Self::with_catalog(registry, catalog, config)
    }
}
impl<'r> Scorecard<'r> {
    pub fn with_catalog(
        registry: &'r DatasetRegistry,
        catalog: ViewCatalog,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let calculator = DerivedCalculator::new(config.zero_division, config.memoize_derived);
        Ok(Self {
            registry,
            catalog,
            calculator,
            config,
        })
    }
    pub fn resolve(&self, table_name: &str, token: &str) -> Result<&MetricView> {
        self.catalog.resolve(table_name, token)
    }
    pub fn build(
        &self,
        table: &RecordTable,
        view: &MetricView,
        sort_override: Option<&SortSpec>,
    ) -> Result<ChartSpec> {
        ChartSpecBuilder::new(&self.calculator, &self.config.default_palette).build(
            table,
            view,
            sort_override,
        )
    }
    /// Resolve and build in one step.
    pub fn chart(
        &self,
        table_name: &str,
        token: &str,
        sort_override: Option<&SortSpec>,
    ) -> Result<ChartSpec> {
        let table = self.registry.get_table(table_name)?;
        let view = self.catalog.resolve(table_name, token)?;
        self.build(table, view, sort_override)
    }
    pub fn registry(&self) -> &DatasetRegistry {
        self.registry
    }
    pub fn catalog(&self) -> &ViewCatalog {
        &self.catalog
    }
    pub fn calculator(&self) -> &DerivedCalculator {
        &self.calculator
    }
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
