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

use crate::error::{utils, ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
/// Plotly's default qualitative colour sequence.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];
/// What a derived ratio yields when its denominator is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroDivisionPolicy {
    #[default]
    #[serde(rename = "zero")]
    Zero,
    #[serde(rename = "nan")]
    NaN,
}
impl ZeroDivisionPolicy {
    pub fn value(&self) -> f64 {
        match self {
            ZeroDivisionPolicy::Zero => 0.0,
            ZeroDivisionPolicy::NaN => f64::NAN,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub zero_division: ZeroDivisionPolicy,
    pub memoize_derived: bool,
    /// Used by views that do not declare their own palette.
    pub default_palette: Vec<String>,
}
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zero_division: ZeroDivisionPolicy::default(),
            memoize_derived: true,
            default_palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}
impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::ConfigFile {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
    pub fn validate(&self) -> Result<()> {
        if self.default_palette.is_empty() {
            return Err(utils::invalid_config("default_palette", "[]"));
        }
        validate_palette("default_palette", &self.default_palette)
    }
}
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
pub(crate) fn validate_palette(field: &str, palette: &[String]) -> Result<()> {
    match palette.iter().find(|c| !is_hex_color(c)) {
        Some(bad) => Err(utils::invalid_config(field, bad)),
        None => Ok(()),
    }
}
