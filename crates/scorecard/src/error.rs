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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum ScorecardError {
    #[error("Unknown dataset '{name}'")]
    UnknownDataset { name: String },
    #[error("Unknown selection '{token}' for dataset '{dataset}'")]
    UnknownSelection { dataset: String, token: String },
    #[error("Column '{column}' referenced by view '{view}' does not exist in table '{table}'")]
    MissingColumn {
        table: String,
        view: String,
        column: String,
    },
    #[error("Column '{column}' in table '{table}' is not numeric and cannot be plotted as a series")]
    NonNumericColumn { table: String, column: String },
    #[error("Unknown derived metric '{name}'")]
    UnknownDerivedMetric { name: String },
    #[error("Table error: {0}")]
    Table(#[from] TableError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] SerialisationError),
}
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column length mismatch in '{table}': column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        table: String,
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },
    #[error("Table '{table}' has no columns")]
    EmptyTable { table: String },
    #[error("Duplicate table name '{table}' in registry")]
    DuplicateTable { table: String },
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse YAML configuration: {source}")]
    YamlParse {
        #[from]
        source: serde_yaml::Error,
    },
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Duplicate selection '{token}' for dataset '{dataset}'")]
    DuplicateSelection { dataset: String, token: String },
    #[error("View '{view}' declares no y columns")]
    EmptySeries { view: String },
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
#[derive(Error, Debug)]
pub enum SerialisationError {
    #[error("JSON serialisation failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
pub type Result<T> = std::result::Result<T, ScorecardError>;
impl From<serde_json::Error> for ScorecardError {
    fn from(err: serde_json::Error) -> Self {
        ScorecardError::Serialisation(SerialisationError::Json { source: err })
    }
}
impl From<serde_yaml::Error> for ScorecardError {
    fn from(err: serde_yaml::Error) -> Self {
        ScorecardError::Config(ConfigError::YamlParse { source: err })
    }
}
impl ScorecardError {
    pub fn category(&self) -> &'static str {
        match self {
            ScorecardError::UnknownDataset { .. } => "Dataset",
            ScorecardError::UnknownSelection { .. } => "Selection",
            ScorecardError::MissingColumn { .. }
            | ScorecardError::NonNumericColumn { .. }
            | ScorecardError::UnknownDerivedMetric { .. } => "View",
            ScorecardError::Table(_) => "Table",
            ScorecardError::Config(_) => "Configuration",
            ScorecardError::Serialisation(_) => "Serialisation",
        }
    }
    /// Errors raised while loading tables or the view catalog, as opposed to
    /// errors caused by a bad request.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ScorecardError::MissingColumn { .. }
                | ScorecardError::NonNumericColumn { .. }
                | ScorecardError::UnknownDerivedMetric { .. }
                | ScorecardError::Table(_)
                | ScorecardError::Config(_)
        )
    }
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ScorecardError::UnknownDataset { .. } => vec![
                "Check the dataset name spelling".to_string(),
                "Run `scorecard list` to see registered datasets".to_string(),
            ],
            ScorecardError::UnknownSelection { dataset, .. } => vec![
                format!("List the selections available for '{dataset}'"),
                "Selections are matched exactly, including case and punctuation".to_string(),
            ],
            ScorecardError::MissingColumn { table, .. } => vec![
                format!("Check the column names declared for table '{table}'"),
                "Derived metrics must be spelled as their registered name".to_string(),
            ],
            ScorecardError::Config(ConfigError::YamlParse { .. }) => vec![
                "Validate the YAML syntax of the configuration file".to_string(),
            ],
            _ => vec!["Check the error message for specific guidance".to_string()],
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            ScorecardError::UnknownDataset { name } => {
                format!("There is no dataset called '{name}'.")
            }
            ScorecardError::UnknownSelection { token, .. } => {
                format!("'{token}' is not one of the available views for this chart.")
            }
            ScorecardError::Config(ConfigError::ConfigFile { path, .. }) => {
                format!("Unable to read configuration file '{path}'.")
            }
            _ => self.to_string(),
        }
    }
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScorecardError::UnknownDataset { .. } | ScorecardError::UnknownSelection { .. } => {
                ErrorSeverity::Warning
            }
            ScorecardError::Serialisation(_) => ErrorSeverity::Error,
            _ if self.is_configuration_error() => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
}
pub mod utils {
    use super::*;
    pub fn missing_column(table: &str, view: &str, column: &str) -> ScorecardError {
        ScorecardError::MissingColumn {
            table: table.to_string(),
            view: view.to_string(),
            column: column.to_string(),
        }
    }
    pub fn unknown_dataset(name: &str) -> ScorecardError {
        ScorecardError::UnknownDataset {
            name: name.to_string(),
        }
    }
    pub fn invalid_config(field: &str, value: &str) -> ScorecardError {
        ScorecardError::Config(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}
impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "INFO",
            ErrorSeverity::Warning => "WARNING",
            ErrorSeverity::Error => "ERROR",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }
    pub fn color_code(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "\x1b[36m",
            ErrorSeverity::Warning => "\x1b[33m",
            ErrorSeverity::Error => "\x1b[31m",
            ErrorSeverity::Critical => "\x1b[35m",
        }
    }
}
pub struct ErrorReporter {
    pub show_suggestions: bool,
    pub colored_output: bool,
}
impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            show_suggestions: true,
            colored_output: true,
        }
    }
    pub fn plain() -> Self {
        Self {
            show_suggestions: true,
            colored_output: false,
        }
    }
    pub fn report(&self, error: &ScorecardError) -> String {
        let severity = error.severity();
        let mut output = String::new();
        if self.colored_output {
            output.push_str(severity.color_code());
        }
        output.push_str(&format!(
            "[{}] {}: {}\n",
            severity.as_str(),
            error.category(),
            error.user_message()
        ));
        if self.colored_output {
            output.push_str("\x1b[0m");
        }
        if self.show_suggestions {
            let suggestions = error.suggestions();
            if !suggestions.is_empty() {
                output.push_str("\nSuggestions:\n");
                for suggestion in suggestions {
                    output.push_str(&format!("  • {suggestion}\n"));
                }
            }
        }
        output
    }
}
impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
