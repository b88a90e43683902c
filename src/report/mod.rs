//! Renderers for a finished [`ClassificationResult`].
//!
//! - [`json`] — the result object as compact JSON.
//! - [`csv`] — one delimited row per classified record.
//! - [`table`] — the same rows as a space-aligned text table.
//! - [`summary`] — coloured per-bucket counts for the terminal (`--summary`).

pub mod csv;
pub mod json;
mod rows;
pub mod summary;
pub mod table;

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{Bucket, ClassificationResult};

/// Name of the synthetic column holding the bucket label.
pub const CLASSIFICATION_COLUMN: &str = "classification";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Table,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "table" => Ok(OutputFormat::Table),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

/// One output column: the record field to read and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumn {
    pub key: String,
    pub label: String,
}

impl OutputColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        OutputColumn {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Display labels for the buckets, used in the `classification` column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassificationLabels {
    #[serde(default = "default_not_allowed_label")]
    pub not_allowed: String,
    #[serde(default = "default_forbidden_label")]
    pub forbidden: String,
    #[serde(default = "default_unknown_label")]
    pub unknown: String,
}

fn default_not_allowed_label() -> String {
    "not allowed".to_string()
}

fn default_forbidden_label() -> String {
    "forbidden".to_string()
}

fn default_unknown_label() -> String {
    "unknown".to_string()
}

impl Default for ClassificationLabels {
    fn default() -> Self {
        ClassificationLabels {
            not_allowed: default_not_allowed_label(),
            forbidden: default_forbidden_label(),
            unknown: default_unknown_label(),
        }
    }
}

impl ClassificationLabels {
    pub fn label(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::NotAllowed => &self.not_allowed,
            Bucket::Forbidden => &self.forbidden,
            Bucket::Unknown => &self.unknown,
        }
    }
}

/// Everything the renderers need to know about the requested output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub columns: Vec<OutputColumn>,
    pub classifications: ClassificationLabels,
    pub delimiter: String,
    pub escape_csv_fields: bool,
    pub csv_headers: bool,
}

pub fn default_columns() -> Vec<OutputColumn> {
    vec![
        OutputColumn::new("name", "name"),
        OutputColumn::new("licenseType", "licenseType"),
        OutputColumn::new(CLASSIFICATION_COLUMN, CLASSIFICATION_COLUMN),
    ]
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Json,
            columns: default_columns(),
            classifications: ClassificationLabels::default(),
            delimiter: ",".to_string(),
            escape_csv_fields: false,
            csv_headers: false,
        }
    }
}

/// Render `result` in the configured format.
///
/// Delimiter collisions in CSV output are logged as warnings; the rendered
/// text is returned regardless.
pub fn render(result: &ClassificationResult, config: &OutputConfig) -> serde_json::Result<String> {
    match config.format {
        OutputFormat::Json => json::render(result),
        OutputFormat::Csv => {
            let rendered = csv::render(result, config);
            for collision in &rendered.collisions {
                tracing::warn!(row = collision.row, "field contains delimiter; value: {:?}", collision.value);
            }
            Ok(rendered.text)
        }
        OutputFormat::Table => Ok(table::render(result, config)),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;

    use crate::models::ClassificationResult;

    /// A classified `license-report` of the checker's own dev dependencies.
    pub fn classified_report() -> ClassificationResult {
        let eol = json!({
            "name": "eol",
            "link": "git+https://github.com/ryanve/eol.git",
            "remoteVersion": "0.10.0",
            "installedVersion": "0.10.0",
            "definedVersion": "^0.10.0",
            "author": "Ryan Van Etten"
        });
        let semver = json!({
            "name": "semver",
            "licenseType": "ISC",
            "link": "git+https://github.com/npm/node-semver.git",
            "remoteVersion": "7.6.3",
            "installedVersion": "7.6.3",
            "definedVersion": "^7.6.3",
            "author": "GitHub Inc."
        });
        let commit_and_tag = json!({
            "name": "commit-and-tag-version",
            "licenseType": "ISC",
            "link": "git+https://github.com/absolute-version/commit-and-tag-version.git",
            "remoteVersion": "12.5.0",
            "installedVersion": "12.5.0",
            "definedVersion": "^12.5.0",
            "author": "Ben Coe <ben@npmjs.com>"
        });
        let jsdoc = json!({
            "name": "eslint-plugin-jsdoc",
            "licenseType": "BSD-3-Clause",
            "link": "git+https://github.com/gajus/eslint-plugin-jsdoc.git",
            "remoteVersion": "50.6.0",
            "installedVersion": "50.6.0",
            "definedVersion": "^50.6.0",
            "author": "Gajus Kuizinas gajus@gajus.com http://gajus.com"
        });
        let security = json!({
            "name": "eslint-plugin-security",
            "licenseType": "Apache-2.0",
            "link": "git+https://github.com/eslint-community/eslint-plugin-security.git",
            "remoteVersion": "3.0.1",
            "installedVersion": "3.0.1",
            "definedVersion": "^3.0.1",
            "author": "Node Security Project"
        });
        let security_node = json!({
            "name": "eslint-plugin-security-node",
            "licenseType": "ISC",
            "link": "git+https://github.com/gkouziik/eslint-plugin-security-node.git",
            "remoteVersion": "1.1.4",
            "installedVersion": "1.1.4",
            "definedVersion": "^1.1.4",
            "author": "gkouziik"
        });

        serde_json::from_value(json!({
            "notAllowed": [eol.clone(), semver, commit_and_tag, jsdoc, security.clone(), security_node],
            "forbidden": [eol.clone(), security],
            "unknown": [eol]
        }))
        .expect("fixture is a valid classification result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!(matches!("xml".parse::<OutputFormat>(), Err(ConfigError::UnknownFormat(f)) if f == "xml"));
        assert!("JSON".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_labels_default() {
        let labels = ClassificationLabels::default();
        assert_eq!(labels.label(Bucket::NotAllowed), "not allowed");
        assert_eq!(labels.label(Bucket::Forbidden), "forbidden");
        assert_eq!(labels.label(Bucket::Unknown), "unknown");
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let result = ClassificationResult::default();
        let mut config = OutputConfig::default();
        assert_eq!(render(&result, &config).unwrap(), "{}");

        config.format = OutputFormat::Csv;
        assert_eq!(render(&result, &config).unwrap(), "");

        config.format = OutputFormat::Table;
        assert_eq!(render(&result, &config).unwrap(), "\n\n");
    }
}
