use serde_json::Value;

use crate::models::{Bucket, ClassificationResult};
use crate::report::{OutputConfig, CLASSIFICATION_COLUMN};

/// Cell values for every classified record, buckets in [`Bucket::ALL`] order
/// and records in insertion order. A missing bucket yields no rows.
pub(super) fn select_rows(result: &ClassificationResult, config: &OutputConfig) -> Vec<Vec<String>> {
    Bucket::ALL
        .iter()
        .flat_map(|&bucket| {
            let label = config.classifications.label(bucket);
            result.bucket(bucket).iter().map(move |record| {
                config
                    .columns
                    .iter()
                    .map(|column| {
                        if column.key == CLASSIFICATION_COLUMN {
                            label.to_string()
                        } else {
                            cell_text(record.field(&column.key))
                        }
                    })
                    .collect::<Vec<String>>()
            })
        })
        .collect()
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
