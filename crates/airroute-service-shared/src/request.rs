//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request for computing the total distance along an ordered airport route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceRequest {
    /// Ordered list of IATA codes to visit.
    #[serde(default)]
    pub airports: Vec<String>,
}

impl Validate for DistanceRequest {
    /// Each submitted code must be exactly 3 non-whitespace characters,
    /// matching the wire contract. Whether the code actually resolves is the
    /// directory's concern, not the transport's. An empty list is valid and
    /// yields a zero distance.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        for (index, code) in self.airports.iter().enumerate() {
            if code.chars().count() != 3 || code.chars().any(char::is_whitespace) {
                return Err(Box::new(ProblemDetails::bad_request(
                    format!(
                        "Airport code '{}' at position {} must be exactly 3 characters",
                        code, index
                    ),
                    request_id,
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(codes: &[&str]) -> DistanceRequest {
        DistanceRequest {
            airports: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_distance_request_valid() {
        assert!(request(&["LAX", "JFK", "ORD"]).validate("test").is_ok());
    }

    #[test]
    fn test_distance_request_empty_list_is_valid() {
        assert!(request(&[]).validate("test").is_ok());
    }

    #[test]
    fn test_distance_request_single_code_is_valid() {
        assert!(request(&["LAX"]).validate("test").is_ok());
    }

    #[test]
    fn test_distance_request_rejects_long_code() {
        let err = request(&["LAX", "INVALID"]).validate("test").unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.detail.as_deref().unwrap().contains("'INVALID'"));
        assert!(err.detail.as_deref().unwrap().contains("position 1"));
    }

    #[test]
    fn test_distance_request_rejects_short_code() {
        let err = request(&["LA"]).validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'LA'"));
    }

    #[test]
    fn test_distance_request_rejects_whitespace_code() {
        let err = request(&["L X"]).validate("test").unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn test_distance_request_deserialization_default() {
        let req: DistanceRequest = serde_json::from_str("{}").unwrap();
        assert!(req.airports.is_empty());
    }

    #[test]
    fn test_distance_request_deserialization() {
        let json = r#"{"airports":["LAX","JFK"]}"#;
        let req: DistanceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.airports, vec!["LAX", "JFK"]);
    }
}
