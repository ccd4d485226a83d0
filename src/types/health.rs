use serde::{Deserialize, Serialize};

/// Response body for the health probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Service status string, `"ok"` when healthy.
    pub status: String,
}

impl HealthResponse {
    /// Returns true if the service reported itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialization() {
        let response: HealthResponse = serde_json::from_value(json!({"status": "ok"})).unwrap();
        assert!(response.is_ok());
    }
}
