use std::collections::HashMap;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Bucket, ClassificationResult, DependencyRecord};
use crate::report::ClassificationLabels;

/// Per-bucket counts with the most frequent license types, for the terminal.
pub fn render(result: &ClassificationResult, labels: &ClassificationLabels) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Classification").add_attribute(Attribute::Bold),
            Cell::new("Count").add_attribute(Attribute::Bold),
            Cell::new("License types").add_attribute(Attribute::Bold),
        ]);

    for bucket in Bucket::ALL {
        let records = result.bucket(bucket);
        let color = match (bucket, records.is_empty()) {
            (_, true) => Color::Green,
            (Bucket::Unknown, false) => Color::Yellow,
            (_, false) => Color::Red,
        };
        table.add_row(vec![
            Cell::new(labels.label(bucket)),
            Cell::new(records.len())
                .fg(color)
                .set_alignment(CellAlignment::Right),
            Cell::new(summarize_licenses(records)),
        ]);
    }

    let code = result.exit_code();
    let status = if code == 0 {
        "no restricted licenses found".green().to_string()
    } else {
        format!("exit code {code}").red().bold().to_string()
    };

    format!("{table}\n {status}")
}

/// Up to three most frequent declared license types, e.g. `[ISC (3), MIT (1)]`.
fn summarize_licenses(records: &[DependencyRecord]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let license = record
            .license_type()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or("none");
        *counts.entry(license).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(lic, cnt)| format!("{} ({})", lic, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::classified_report;

    #[test]
    fn test_summarize_licenses() {
        let result = classified_report();
        assert_eq!(
            summarize_licenses(result.bucket(Bucket::NotAllowed)),
            "[ISC (3), Apache-2.0 (1), BSD-3-Clause (1)]"
        );
        assert_eq!(summarize_licenses(result.bucket(Bucket::Unknown)), "[none (1)]");
        assert_eq!(summarize_licenses(&[]), "");
    }

    #[test]
    fn test_render_lists_every_bucket() {
        colored::control::set_override(false);
        let rendered = render(&classified_report(), &ClassificationLabels::default());
        for label in ["not allowed", "forbidden", "unknown"] {
            assert!(rendered.contains(label), "missing {label}");
        }
        assert!(rendered.contains("exit code 14"));
    }
}
