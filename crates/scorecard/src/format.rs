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

//! Display formatting for series values. Formatting only ever affects labels;
//! the numeric values in a chart spec are left untouched.

use serde::{Deserialize, Serialize};
pub const NOT_AVAILABLE: &str = "n/a";
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelFormat {
    #[default]
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "fixed_1dp")]
    Fixed1dp,
    #[serde(rename = "fixed_2dp")]
    Fixed2dp,
    #[serde(rename = "percent")]
    Percent,
}
impl LabelFormat {
    pub fn decimals(&self) -> usize {
        match self {
            LabelFormat::Integer => 0,
            LabelFormat::Fixed1dp | LabelFormat::Percent => 1,
            LabelFormat::Fixed2dp => 2,
        }
    }
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return NOT_AVAILABLE.to_string();
        }
        let digits = self.decimals();
        match self {
            LabelFormat::Percent => format!("{value:.digits$}%"),
            _ => format!("{value:.digits$}"),
        }
    }
    pub fn format_all(&self, values: &[f64]) -> Vec<String> {
        values.iter().map(|v| self.format(*v)).collect()
    }
}
