use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::license::classifier::LicensePolicy;
use crate::report::{default_columns, ClassificationLabels, OutputColumn, OutputConfig, OutputFormat};
use crate::source::Source;

/// Configuration file contents, deserialized from
/// `.license-report-check/config.toml`. Every key is optional; command-line
/// flags take precedence.
///
/// ```toml
/// allowed = ["MIT", "ISC"]
/// forbidden = "GPL-3.0"
/// output = "csv"
/// csvHeaders = true
///
/// [outputColumns]
/// name = "Package"
/// licenseType = "License"
/// classification = "Status"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Path of the `license-report` JSON file; stdin when unset.
    pub source: Option<PathBuf>,
    /// Allowed license ids, as a single string or a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub allowed: Vec<String>,
    /// Forbidden license ids, as a single string or a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub forbidden: Vec<String>,
    /// `json`, `csv` or `table`. Checked when settings are resolved.
    pub output: Option<String>,
    /// Record field → column label, in output order.
    #[serde(default, deserialize_with = "ordered_columns")]
    pub output_columns: Option<Vec<OutputColumn>>,
    pub output_classifications: Option<ClassificationLabels>,
    pub delimiter: Option<String>,
    pub escape_csv_fields: Option<bool>,
    pub csv_headers: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub source: Source,
    pub policy: LicensePolicy,
    pub output: OutputConfig,
    pub summary: bool,
}

/// Load the configuration file, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.license-report-check/config.toml`
/// 3. `~/.config/license-report-check/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = base_dir.join(".license-report-check").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-report-check")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge the config file with command-line flags and validate the result.
///
/// Lists given on the command line replace the ones from the file rather than
/// extending them.
pub fn resolve(config: Config, cli: &Cli) -> Result<Settings, ConfigError> {
    let format = match (cli.output, config.output.as_deref()) {
        (Some(format), _) => format,
        (None, Some(name)) => name.parse()?,
        (None, None) => OutputFormat::default(),
    };

    let delimiter = cli
        .delimiter
        .clone()
        .or(config.delimiter)
        .unwrap_or_else(|| ",".to_string());
    if delimiter.is_empty() {
        return Err(ConfigError::EmptyDelimiter);
    }

    let columns = config.output_columns.unwrap_or_else(default_columns);
    validate_columns(&columns)?;

    let allowed = if cli.allowed.is_empty() { config.allowed } else { cli.allowed.clone() };
    let forbidden = if cli.forbidden.is_empty() { config.forbidden } else { cli.forbidden.clone() };

    let source = cli.source.as_deref().or(config.source.as_deref());

    Ok(Settings {
        source: Source::from_path(source),
        policy: LicensePolicy::new(allowed, forbidden),
        output: OutputConfig {
            format,
            columns,
            classifications: config.output_classifications.unwrap_or_default(),
            delimiter,
            escape_csv_fields: cli.escape_csv_fields || config.escape_csv_fields.unwrap_or(false),
            csv_headers: cli.csv_headers || config.csv_headers.unwrap_or(false),
        },
        summary: cli.summary,
    })
}

fn validate_columns(columns: &[OutputColumn]) -> Result<(), ConfigError> {
    if columns.is_empty() {
        return Err(ConfigError::NoColumns);
    }
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(ConfigError::DuplicateColumn(column.key.clone()));
        }
    }
    Ok(())
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(id) => vec![id],
        OneOrMany::Many(ids) => ids,
    })
}

/// Read a `field = "label"` table into columns, keeping document order.
fn ordered_columns<'de, D>(deserializer: D) -> Result<Option<Vec<OutputColumn>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ColumnsVisitor;

    impl<'de> Visitor<'de> for ColumnsVisitor {
        type Value = Vec<OutputColumn>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of field names to column labels")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut columns = Vec::new();
            while let Some((key, label)) = map.next_entry::<String, String>()? {
                columns.push(OutputColumn { key, label });
            }
            Ok(columns)
        }
    }

    deserializer.deserialize_map(ColumnsVisitor).map(Some)
}
