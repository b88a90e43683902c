use crate::models::ClassificationResult;

/// Serialize the result as compact JSON, keeping record field order.
pub fn render(result: &ClassificationResult) -> serde_json::Result<String> {
    serde_json::to_string(result)
}
