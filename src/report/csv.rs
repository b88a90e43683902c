use crate::models::ClassificationResult;
use crate::report::rows::select_rows;
use crate::report::OutputConfig;

/// A field value that contains the configured delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterCollision {
    /// Zero-based data row (header excluded).
    pub row: usize,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCsv {
    pub text: String,
    pub collisions: Vec<DelimiterCollision>,
}

/// Render one delimited row per classified record, optionally preceded by a
/// header row of column labels. Rows are joined by `\n` without a trailing
/// newline.
///
/// Values containing the delimiter are reported as collisions. With
/// `escape_csv_fields` they are wrapped in double quotes, otherwise they are
/// written as-is and the row ends up with extra fields.
pub fn render(result: &ClassificationResult, config: &OutputConfig) -> RenderedCsv {
    let delimiter = config.delimiter.as_str();
    let mut lines = Vec::new();
    let mut collisions = Vec::new();

    if config.csv_headers {
        let headers: Vec<&str> = config.columns.iter().map(|c| c.label.as_str()).collect();
        lines.push(headers.join(delimiter));
    }

    for (row, fields) in select_rows(result, config).into_iter().enumerate() {
        let fields: Vec<String> = fields
            .into_iter()
            .map(|value| {
                if !value.contains(delimiter) {
                    return value;
                }
                let escaped = if config.escape_csv_fields {
                    format!("\"{value}\"")
                } else {
                    value.clone()
                };
                collisions.push(DelimiterCollision { row, value });
                escaped
            })
            .collect();
        lines.push(fields.join(delimiter));
    }

    RenderedCsv {
        text: lines.join("\n"),
        collisions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::classifier::{Classifier, LicensePolicy};
    use crate::models::record;
    use crate::report::fixtures::classified_report;
    use serde_json::json;

    const HEADER: &str = "name,licenseType,classification";

    const EXPECTED: &str = "eol,,not allowed
semver,ISC,not allowed
commit-and-tag-version,ISC,not allowed
eslint-plugin-jsdoc,BSD-3-Clause,not allowed
eslint-plugin-security,Apache-2.0,not allowed
eslint-plugin-security-node,ISC,not allowed
eol,,forbidden
eslint-plugin-security,Apache-2.0,forbidden
eol,,unknown";

    fn dash_config(escape: bool) -> OutputConfig {
        OutputConfig {
            delimiter: "-".to_string(),
            escape_csv_fields: escape,
            ..OutputConfig::default()
        }
    }

    #[test]
    fn test_render_without_header() {
        let rendered = render(&classified_report(), &OutputConfig::default());
        assert_eq!(rendered.text, EXPECTED);
        assert!(rendered.collisions.is_empty());
    }

    #[test]
    fn test_render_with_header() {
        let config = OutputConfig {
            csv_headers: true,
            ..OutputConfig::default()
        };
        let rendered = render(&classified_report(), &config);
        assert_eq!(rendered.text, format!("{HEADER}\n{EXPECTED}"));
    }

    #[test]
    fn test_render_classified_stream() {
        let mut classifier = Classifier::new(LicensePolicy::new(["MIT"], Vec::<String>::new()));
        classifier.accept(record(json!({"name": "eol"})));
        classifier.accept(record(json!({"name": "semver", "licenseType": "ISC"})));
        let mut result = classifier.finish();
        result.unknown = Some(Vec::new());

        let rendered = render(&result, &OutputConfig::default());
        assert_eq!(rendered.text, "eol,,not allowed\nsemver,ISC,not allowed");
    }

    #[test]
    fn test_delimiter_in_field_unescaped() {
        let rendered = render(&classified_report(), &dash_config(false));
        assert_eq!(
            rendered.text,
            "eol--not allowed
semver-ISC-not allowed
commit-and-tag-version-ISC-not allowed
eslint-plugin-jsdoc-BSD-3-Clause-not allowed
eslint-plugin-security-Apache-2.0-not allowed
eslint-plugin-security-node-ISC-not allowed
eol--forbidden
eslint-plugin-security-Apache-2.0-forbidden
eol--unknown"
        );
    }

    #[test]
    fn test_delimiter_in_field_escaped() {
        let rendered = render(&classified_report(), &dash_config(true));
        assert_eq!(
            rendered.text,
            r#"eol--not allowed
semver-ISC-not allowed
"commit-and-tag-version"-ISC-not allowed
"eslint-plugin-jsdoc"-"BSD-3-Clause"-not allowed
"eslint-plugin-security"-"Apache-2.0"-not allowed
"eslint-plugin-security-node"-ISC-not allowed
eol--forbidden
"eslint-plugin-security"-"Apache-2.0"-forbidden
eol--unknown"#
        );
    }

    #[test]
    fn test_one_collision_per_offending_field() {
        let rendered = render(&classified_report(), &dash_config(true));
        let found: Vec<(usize, &str)> = rendered
            .collisions
            .iter()
            .map(|c| (c.row, c.value.as_str()))
            .collect();
        assert_eq!(
            found,
            [
                (2, "commit-and-tag-version"),
                (3, "eslint-plugin-jsdoc"),
                (3, "BSD-3-Clause"),
                (4, "eslint-plugin-security"),
                (4, "Apache-2.0"),
                (5, "eslint-plugin-security-node"),
                (7, "eslint-plugin-security"),
                (7, "Apache-2.0"),
            ]
        );
    }

    #[test]
    fn test_field_equal_to_delimiter_is_quoted() {
        let mut classifier = Classifier::new(LicensePolicy::default());
        classifier.accept(record(json!({"name": ",", "licenseType": ""})));
        let config = OutputConfig {
            escape_csv_fields: true,
            ..OutputConfig::default()
        };

        let rendered = render(&classifier.finish(), &config);
        assert_eq!(rendered.text, "\",\",,unknown");
        assert_eq!(rendered.collisions.len(), 1);
        assert_eq!(rendered.collisions[0].value, ",");
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(render(&ClassificationResult::default(), &OutputConfig::default()).text, "");

        let config = OutputConfig {
            csv_headers: true,
            ..OutputConfig::default()
        };
        assert_eq!(render(&ClassificationResult::empty(), &config).text, HEADER);
    }
}
