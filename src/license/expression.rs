use std::sync::LazyLock;

use regex::Regex;

/// ORed identifiers in parentheses, e.g. `(BSD-2-Clause OR MIT OR Apache-2.0)`.
/// The repetition is bounded to 2..=7 alternatives.
static OR_EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\S+(\sOR\s\S+){1,6}\)$").expect("OR expression regex is valid")
});

/// Separators of a recognized OR expression: the enclosing parentheses and
/// each ` OR `.
static OR_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^\(|\)$|\sOR\s)").expect("OR separator regex is valid")
});

/// License ids declared by a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseTypes {
    /// Zero (no declared license), one, or several ORed alternatives.
    Ids(Vec<String>),
    /// A value containing spaces that is not a supported OR expression.
    Unrecognized,
}

/// Split a declared `licenseType` into its license ids.
///
/// - `None`, `""` or whitespace only → no ids
/// - a value without interior spaces → that single id
/// - `(A OR B ...)` with 2 to 7 alternatives → each alternative
/// - anything else containing a space → [`LicenseTypes::Unrecognized`]
pub fn parse_license_types(raw: Option<&str>) -> LicenseTypes {
    let trimmed = raw.unwrap_or("").trim();

    if trimmed.contains(' ') {
        if !OR_EXPRESSION_RE.is_match(trimmed) {
            return LicenseTypes::Unrecognized;
        }
        let ids = OR_SEPARATOR_RE
            .split(trimmed)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        return LicenseTypes::Ids(ids);
    }

    if trimmed.is_empty() {
        LicenseTypes::Ids(Vec::new())
    } else {
        LicenseTypes::Ids(vec![trimmed.to_string()])
    }
}
