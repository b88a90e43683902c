use std::path::PathBuf;

use clap::Parser;

use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "license-report-check",
    about = "Check the license types of a project's dependencies against allowed and forbidden lists",
    long_about = "Check the license types of a project's dependencies based on the JSON report \
                  generated by `license-report`.\n\n\
                  Packages without a license type or with an empty license type are reported as \
                  'unknown'.\n\n\
                  Exit code: 0 when nothing is reported, otherwise the sum of 2 (not allowed), \
                  4 (forbidden) and 8 (unknown); 1 on errors.",
    version
)]
pub struct Cli {
    /// license-report JSON file to check [default: read from stdin]
    #[arg(long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Allowed license type, e.g. MIT (repeatable). Without it every license is allowed
    #[arg(long, value_name = "LICENSE")]
    pub allowed: Vec<String>,

    /// Forbidden license type, e.g. GPL-3.0 (repeatable). Without it no license is forbidden
    #[arg(long, value_name = "LICENSE")]
    pub forbidden: Vec<String>,

    /// Output format [default: json]
    #[arg(long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Field delimiter for csv output [default: ","]
    #[arg(long, value_name = "DELIMITER")]
    pub delimiter: Option<String>,

    /// Quote csv fields that contain the delimiter
    #[arg(long)]
    pub escape_csv_fields: bool,

    /// Emit a header row in csv output
    #[arg(long)]
    pub csv_headers: bool,

    /// Print a per-classification summary to stderr
    #[arg(long)]
    pub summary: bool,

    /// Config file [default: ./.license-report-check/config.toml, fallback ~/.config/license-report-check/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
