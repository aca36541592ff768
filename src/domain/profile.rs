//! User Profile
//!
//! The profile blob written by the profile editor and read by the home
//! screen for the avatar. Stored as camelCase JSON under key "profile".

use serde::{Deserialize, Serialize};

/// Blob store key holding the serialized profile
pub const PROFILE_KEY: &str = "profile";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    /// Notification preferences
    pub order_statuses: bool,
    pub password_changes: bool,
    pub special_offers: bool,
    pub newsletter: bool,
    /// Avatar image URI, empty when none was picked
    pub image: String,
}

impl Profile {
    /// Avatar fallback text: first letter of first and last name
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .collect()
    }

    pub fn has_avatar(&self) -> bool {
        !self.image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_round_trip() {
        let json = r#"{"firstName":"Tilly","lastName":"Doe","email":"tilly@example.com",
            "phoneNumber":"5551234567","orderStatuses":true,"passwordChanges":false,
            "specialOffers":true,"newsletter":false,"image":""}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.first_name, "Tilly");
        assert!(profile.order_statuses);
        assert!(!profile.has_avatar());
        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["phoneNumber"], "5551234567");
    }

    #[test]
    fn test_missing_fields_default() {
        let profile: Profile = serde_json::from_str(r#"{"firstName":"Ana"}"#).unwrap();
        assert_eq!(profile.last_name, "");
        assert!(!profile.newsletter);
    }

    #[test]
    fn test_initials() {
        let mut profile = Profile::default();
        assert_eq!(profile.initials(), "");
        profile.first_name = "Tilly".into();
        assert_eq!(profile.initials(), "T");
        profile.last_name = "Doe".into();
        assert_eq!(profile.initials(), "TD");
    }
}
