use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a `license-report` JSON document.
///
/// Only `name` and `licenseType` mean anything to the classifier; every other
/// field is carried through untouched (in its original key order) so the
/// renderer can select it as an output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyRecord(Map<String, Value>);

impl DependencyRecord {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Declared license type. Missing, `null` and non-string values all read as
    /// "no declared license".
    pub fn license_type(&self) -> Option<&str> {
        self.0.get("licenseType").and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for DependencyRecord {
    fn from(fields: Map<String, Value>) -> Self {
        DependencyRecord(fields)
    }
}

/// A classification a record can land in. Buckets are not exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    NotAllowed,
    Forbidden,
    Unknown,
}

impl Bucket {
    /// Fixed order used for tabular output and exit codes.
    pub const ALL: [Bucket; 3] = [Bucket::NotAllowed, Bucket::Forbidden, Bucket::Unknown];

    /// Key of the bucket in the serialized result.
    pub fn key(self) -> &'static str {
        match self {
            Bucket::NotAllowed => "notAllowed",
            Bucket::Forbidden => "forbidden",
            Bucket::Unknown => "unknown",
        }
    }

    /// Bit contributed to the process exit code when the bucket is non-empty.
    pub fn exit_bit(self) -> i32 {
        match self {
            Bucket::NotAllowed => 2,
            Bucket::Forbidden => 4,
            Bucket::Unknown => 8,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Outcome of one classification run.
///
/// A bucket is `None` only for degenerate results (e.g. `{}` read back from
/// JSON); readers treat a missing bucket as empty and serialization omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_allowed: Option<Vec<DependencyRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden: Option<Vec<DependencyRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown: Option<Vec<DependencyRecord>>,
}

impl ClassificationResult {
    /// A result with all three buckets present and empty.
    pub fn empty() -> Self {
        ClassificationResult {
            not_allowed: Some(Vec::new()),
            forbidden: Some(Vec::new()),
            unknown: Some(Vec::new()),
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> &[DependencyRecord] {
        let records = match bucket {
            Bucket::NotAllowed => &self.not_allowed,
            Bucket::Forbidden => &self.forbidden,
            Bucket::Unknown => &self.unknown,
        };
        records.as_deref().unwrap_or(&[])
    }

    pub(crate) fn push(&mut self, bucket: Bucket, record: DependencyRecord) {
        let records = match bucket {
            Bucket::NotAllowed => &mut self.not_allowed,
            Bucket::Forbidden => &mut self.forbidden,
            Bucket::Unknown => &mut self.unknown,
        };
        records.get_or_insert_with(Vec::new).push(record);
    }

    /// Exit code derived from the non-empty buckets: `2 | 4 | 8` for
    /// not allowed, forbidden and unknown respectively, `0` when all are empty.
    pub fn exit_code(&self) -> i32 {
        Bucket::ALL
            .iter()
            .filter(|b| !self.bucket(**b).is_empty())
            .fold(0, |code, b| code | b.exit_bit())
    }
}

#[cfg(test)]
pub(crate) fn record(value: Value) -> DependencyRecord {
    serde_json::from_value(value).expect("record must be a JSON object")
}
