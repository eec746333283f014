//! Signup payload types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The kind of user joining the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserCategory {
    Host,
    #[default]
    Traveller,
    ServiceHost,
    Dispensary,
}

impl UserCategory {
    pub const ALL: [UserCategory; 4] = [
        UserCategory::Host,
        UserCategory::Traveller,
        UserCategory::ServiceHost,
        UserCategory::Dispensary,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserCategory::Host => "host",
            UserCategory::Traveller => "traveller",
            UserCategory::ServiceHost => "service_host",
            UserCategory::Dispensary => "dispensary",
        }
    }

    /// Parse a `?category=` query value; missing or empty means traveller.
    pub fn from_query(value: Option<&str>) -> Result<Self, Error> {
        match value {
            None | Some("") => Ok(Self::default()),
            Some(v) => v.parse(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            UserCategory::Host => "Host",
            UserCategory::Traveller => "Traveller",
            UserCategory::ServiceHost => "Service Host",
            UserCategory::Dispensary => "Dispensary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserCategory::Host => {
                "Sign up to list your wellness-friendly property and start earning"
            }
            UserCategory::Traveller => {
                "Sign up to discover amazing wellness-friendly stays worldwide"
            }
            UserCategory::ServiceHost => "Sign up to offer your wellness services to travelers",
            UserCategory::Dispensary => {
                "Sign up to partner with VibesBNB and reach more customers"
            }
        }
    }

    /// Hosts and dispensaries must provide a location.
    pub fn needs_location(&self) -> bool {
        matches!(self, UserCategory::Host | UserCategory::Dispensary)
    }

    /// Service hosts must list services, areas and pincodes.
    pub fn needs_services(&self) -> bool {
        matches!(self, UserCategory::ServiceHost)
    }

    /// Only hosts may attach Airbnb listing details.
    pub fn is_host(&self) -> bool {
        matches!(self, UserCategory::Host)
    }
}

impl fmt::Display for UserCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::Other {
                    message: format!("unknown user category '{}'", s),
                }
                .into()
            })
    }
}

/// Where a host property or dispensary is located.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_entry: Option<bool>,
}

/// What a service host offers and where.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHostData {
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub service_areas: Vec<String>,
    #[serde(default)]
    pub pincodes: Vec<String>,
}

/// An existing Airbnb listing a host wants to bring along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirbnbData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
}

/// Body of `POST /early-access/signup`.
///
/// The server stamps the signup time; the client never sends one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: UserCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_host_data: Option<ServiceHostData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airbnb_data: Option<AirbnbData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_wire_names() {
        for category in UserCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, json!(category.as_str()));
            assert_eq!(category.as_str().parse::<UserCategory>().unwrap(), category);
        }
    }

    #[test]
    fn missing_query_defaults_to_traveller() {
        assert_eq!(UserCategory::from_query(None).unwrap(), UserCategory::Traveller);
        assert_eq!(UserCategory::from_query(Some("")).unwrap(), UserCategory::Traveller);
        assert_eq!(
            UserCategory::from_query(Some("dispensary")).unwrap(),
            UserCategory::Dispensary
        );
        assert!(UserCategory::from_query(Some("pilot")).is_err());
    }

    #[test]
    fn category_requirements() {
        assert!(UserCategory::Host.needs_location());
        assert!(UserCategory::Dispensary.needs_location());
        assert!(!UserCategory::Traveller.needs_location());
        assert!(UserCategory::ServiceHost.needs_services());
        assert!(UserCategory::Host.is_host());
        assert!(!UserCategory::Dispensary.is_host());
    }

    #[test]
    fn request_omits_absent_sections() {
        let request = SignupRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "+1 555 0100".into(),
            category: UserCategory::Traveller,
            location: None,
            service_host_data: None,
            airbnb_data: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "phone": "+1 555 0100",
                "category": "traveller"
            })
        );
    }

    #[test]
    fn service_host_data_uses_camel_case() {
        let data = ServiceHostData {
            services: vec!["Yoga".into()],
            service_areas: vec!["Goa".into()],
            pincodes: vec!["403001".into()],
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"services": ["Yoga"], "serviceAreas": ["Goa"], "pincodes": ["403001"]})
        );
    }
}
