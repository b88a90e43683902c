//! License-type parsing and allow/forbid classification.
//!
//! - [`expression`] — splits a declared `licenseType` into license ids,
//!   including `(A OR B)` expressions.
//! - [`classifier`] — single-pass accumulator that sorts records into the
//!   not-allowed, forbidden and unknown buckets.

pub mod classifier;
pub mod expression;
