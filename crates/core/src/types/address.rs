//! Shipping-address snapshot embedded in orders.

use serde::{Deserialize, Serialize};

/// Denormalized copy of the buyer's selected address, stored as JSONB on the
/// order row at placement time. Later edits to the address book never alter
/// historical orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient name.
    pub name: String,
    /// Primary contact number.
    pub mobile: String,
    /// Street / house line.
    pub street: String,
    /// Optional landmark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    /// City.
    pub city: String,
    /// State / region.
    pub state: String,
    /// 6-digit postal code.
    pub pincode: String,
}

impl ShippingAddress {
    /// Single-line rendering for order pages and emails.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.landmark {
            Some(landmark) => format!(
                "{}, {}, {}, {}, {} - {}",
                self.street, landmark, self.city, self.state, self.pincode, self.mobile
            ),
            None => format!(
                "{}, {}, {}, {} - {}",
                self.street, self.city, self.state, self.pincode, self.mobile
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ShippingAddress {
        ShippingAddress {
            name: "Asha Verma".to_owned(),
            mobile: "9876543210".to_owned(),
            street: "14 MG Road".to_owned(),
            landmark: None,
            city: "Pune".to_owned(),
            state: "Maharashtra".to_owned(),
            pincode: "411001".to_owned(),
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let addr = sample();
        let json = serde_json::to_string(&addr).expect("serialize");
        let back: ShippingAddress = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, addr);
    }

    #[test]
    fn test_landmark_omitted_when_none() {
        let json = serde_json::to_string(&sample()).expect("serialize");
        assert!(!json.contains("landmark"));
    }

    #[test]
    fn test_summary_includes_pincode() {
        assert!(sample().summary().contains("411001"));
    }
}
