//! Pincode lookup against the public postal pincode API.
//!
//! Best effort: the checkout form works without it, the lookup only
//! pre-fills city and state. Upstream failures surface as errors to the
//! caller, which degrades to an empty suggestion.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Errors that can occur during a pincode lookup.
#[derive(Debug, thiserror::Error)]
pub enum PincodeError {
    /// The pincode is not a 6-digit number.
    #[error("pincode must be exactly 6 digits")]
    InvalidPincode,

    /// Upstream request failed.
    #[error("pincode service request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream returned no match for the pincode.
    #[error("pincode not found")]
    NotFound,
}

/// City/state pair resolved from a pincode.
#[derive(Debug, Clone, Serialize)]
pub struct PincodeDetails {
    pub post_office: String,
    pub city: String,
    pub state: String,
}

/// Upstream response shape: an array with one element per query.
#[derive(Debug, Deserialize)]
struct LookupEntry {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "PostOffice")]
    post_office: Option<Vec<PostOffice>>,
}

#[derive(Debug, Deserialize)]
struct PostOffice {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
}

/// Look up city and state for a 6-digit Indian pincode.
///
/// Uses the first post office of the first successful entry.
///
/// # Errors
///
/// Returns `PincodeError::InvalidPincode` without touching the network for
/// malformed input, `PincodeError::NotFound` when the upstream has no match,
/// and `PincodeError::Request` for transport failures.
#[instrument(skip(client, api_base))]
pub async fn lookup(
    client: &reqwest::Client,
    api_base: &str,
    pincode: &str,
) -> Result<PincodeDetails, PincodeError> {
    if !is_valid_pincode(pincode) {
        return Err(PincodeError::InvalidPincode);
    }

    let url = format!("{api_base}/pincode/{pincode}");
    let entries: Vec<LookupEntry> = client.get(&url).send().await?.json().await?;

    entries
        .into_iter()
        .find(|e| e.status == "Success")
        .and_then(|e| e.post_office)
        .and_then(|offices| offices.into_iter().next())
        .map(|office| PincodeDetails {
            post_office: office.name,
            city: office.district,
            state: office.state,
        })
        .ok_or(PincodeError::NotFound)
}

/// A pincode is exactly six ASCII digits.
#[must_use]
pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pincode_validation() {
        assert!(is_valid_pincode("560001"));
        assert!(is_valid_pincode("110001"));
        assert!(!is_valid_pincode("56001"));
        assert!(!is_valid_pincode("5600011"));
        assert!(!is_valid_pincode("56000a"));
        assert!(!is_valid_pincode(""));
        assert!(!is_valid_pincode("५६०московски"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"[{
            "Message": "Number of pincode(s) found:1",
            "Status": "Success",
            "PostOffice": [
                {"Name": "Bangalore G.P.O.", "District": "Bengaluru", "State": "Karnataka"}
            ]
        }]"#;
        let entries: Vec<LookupEntry> = serde_json::from_str(body).expect("parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, "Success");
        let offices = entries[0].post_office.as_ref().expect("offices");
        assert_eq!(offices[0].district, "Bengaluru");
    }

    #[test]
    fn test_error_response_parsing() {
        let body = r#"[{"Message": "No records found", "Status": "Error", "PostOffice": null}]"#;
        let entries: Vec<LookupEntry> = serde_json::from_str(body).expect("parse");
        assert_eq!(entries[0].status, "Error");
        assert!(entries[0].post_office.is_none());
    }
}
