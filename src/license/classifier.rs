use std::collections::HashSet;

use crate::license::expression::{parse_license_types, LicenseTypes};
use crate::models::{Bucket, ClassificationResult, DependencyRecord};

/// Allowed and forbidden license ids for one run. An empty list places no
/// restriction of that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicensePolicy {
    allowed: HashSet<String>,
    forbidden: HashSet<String>,
}

impl LicensePolicy {
    pub fn new<A, F>(allowed: A, forbidden: F) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        LicensePolicy {
            allowed: allowed.into_iter().map(Into::into).collect(),
            forbidden: forbidden.into_iter().map(Into::into).collect(),
        }
    }

    /// At least one of `ids` is allowed. Always true when no allow list is set.
    fn permits_any(&self, ids: &[String]) -> bool {
        self.allowed.is_empty() || ids.iter().any(|id| self.allowed.contains(id))
    }

    /// Every one of `ids` is forbidden, given a forbid list is set.
    ///
    /// Vacuously true for an empty `ids`: a dependency without a declared
    /// license counts as forbidden whenever a forbid list exists. Possibly a
    /// policy bug, but exit codes depend on it.
    fn forbids_all(&self, ids: &[String]) -> bool {
        !self.forbidden.is_empty() && ids.iter().all(|id| self.forbidden.contains(id))
    }
}

/// Single-pass accumulator for one classification run.
///
/// Feed records with [`Classifier::accept`], then consume the classifier with
/// [`Classifier::finish`] to get the result. A run that fails part-way simply
/// drops the classifier and its partial state.
#[derive(Debug)]
pub struct Classifier {
    policy: LicensePolicy,
    result: ClassificationResult,
    accepted: usize,
}

impl Classifier {
    pub fn new(policy: LicensePolicy) -> Self {
        Classifier {
            policy,
            result: ClassificationResult::empty(),
            accepted: 0,
        }
    }

    /// Classify one record. Never fails: anything that cannot be judged ends
    /// up in the unknown bucket.
    pub fn accept(&mut self, record: DependencyRecord) {
        self.accepted += 1;

        let ids = match parse_license_types(record.license_type()) {
            LicenseTypes::Ids(ids) => ids,
            LicenseTypes::Unrecognized => {
                tracing::debug!(
                    name = record.name().unwrap_or_default(),
                    license_type = record.license_type().unwrap_or_default(),
                    "unrecognized license expression"
                );
                self.result.push(Bucket::Unknown, record);
                return;
            }
        };

        if !self.policy.permits_any(&ids) {
            self.result.push(Bucket::NotAllowed, record.clone());
        }

        if self.policy.forbids_all(&ids) {
            self.result.push(Bucket::Forbidden, record.clone());
        }

        if ids.is_empty() {
            self.result.push(Bucket::Unknown, record);
        }
    }

    /// Number of records accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn finish(self) -> ClassificationResult {
        self.result
    }
}
