//! Early-access form state and client-side validation.

use thiserror::Error;

use super::types::{AirbnbData, LocationData, ServiceHostData, SignupRequest, UserCategory};

/// Why a signup form was rejected before submission.
///
/// The messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    #[error("Please enter latitude and longitude")]
    MissingCoordinates,

    #[error("Latitude must be within ±90 and longitude within ±180")]
    CoordinatesOutOfRange,

    #[error("Please select your location from the dropdown")]
    MissingAddress,

    #[error("Please add at least one service")]
    MissingServices,

    #[error("Please add at least one service area")]
    MissingServiceAreas,

    #[error("Please add at least one pincode/zipcode")]
    MissingPincodes,
}

/// The early-access form as the user fills it in.
///
/// Which sections matter depends on the [`UserCategory`]; sections that do
/// not apply are ignored by [`SignupForm::validate`] and left out of the
/// resulting request.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub category: UserCategory,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: LocationData,
    /// Coordinates typed in by hand instead of picked from autocomplete.
    pub manual_location: bool,
    pub service_host: ServiceHostData,
    pub has_airbnb: bool,
    pub airbnb: AirbnbData,
}

impl SignupForm {
    pub fn new(category: UserCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Add a service; blank input is ignored.
    pub fn add_service(&mut self, service: &str) -> bool {
        push_trimmed(&mut self.service_host.services, service)
    }

    pub fn remove_service(&mut self, index: usize) -> Option<String> {
        remove_at(&mut self.service_host.services, index)
    }

    /// Add a service area; blank input is ignored.
    pub fn add_service_area(&mut self, area: &str) -> bool {
        push_trimmed(&mut self.service_host.service_areas, area)
    }

    pub fn remove_service_area(&mut self, index: usize) -> Option<String> {
        remove_at(&mut self.service_host.service_areas, index)
    }

    /// Add a pincode or zipcode; blank input is ignored.
    pub fn add_pincode(&mut self, pincode: &str) -> bool {
        push_trimmed(&mut self.service_host.pincodes, pincode)
    }

    pub fn remove_pincode(&mut self, index: usize) -> Option<String> {
        remove_at(&mut self.service_host.pincodes, index)
    }

    /// Validate the form and build the request body.
    ///
    /// Checks run in the order the form presents them, and the first failure
    /// is returned.
    pub fn validate(&self) -> Result<SignupRequest, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        if name.is_empty() || email.is_empty() || phone.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }

        let category = self.category;

        let location = if category.needs_location() {
            Some(self.checked_location()?)
        } else {
            None
        };

        let service_host_data = if category.needs_services() {
            let data = &self.service_host;
            if data.services.is_empty() {
                return Err(ValidationError::MissingServices);
            }
            if data.service_areas.is_empty() {
                return Err(ValidationError::MissingServiceAreas);
            }
            if data.pincodes.is_empty() {
                return Err(ValidationError::MissingPincodes);
            }
            Some(data.clone())
        } else {
            None
        };

        let has_listing = self
            .airbnb
            .listing_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());
        let airbnb_data = (category.is_host() && self.has_airbnb && has_listing)
            .then(|| self.airbnb.clone());

        Ok(SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            category,
            location,
            service_host_data,
            airbnb_data,
        })
    }

    fn checked_location(&self) -> Result<LocationData, ValidationError> {
        let mut location = self.location.clone();
        location.manual_entry = Some(self.manual_location);

        if self.manual_location {
            let (Some(lat), Some(lng)) = (location.latitude, location.longitude) else {
                return Err(ValidationError::MissingCoordinates);
            };
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                return Err(ValidationError::CoordinatesOutOfRange);
            }
        } else if location
            .address
            .as_deref()
            .is_none_or(|a| a.trim().is_empty())
        {
            return Err(ValidationError::MissingAddress);
        }

        Ok(location)
    }
}

fn push_trimmed(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    list.push(value.to_string());
    true
}

fn remove_at(list: &mut Vec<String>, index: usize) -> Option<String> {
    (index < list.len()).then(|| list.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(category: UserCategory) -> SignupForm {
        SignupForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0000".into(),
            ..SignupForm::new(category)
        }
    }

    #[test]
    fn traveller_needs_only_contact_fields() {
        let request = filled(UserCategory::Traveller).validate().unwrap();
        assert_eq!(request.category, UserCategory::Traveller);
        assert!(request.location.is_none());
        assert!(request.service_host_data.is_none());
        assert!(request.airbnb_data.is_none());
    }

    #[test]
    fn blank_contact_field_is_rejected() {
        let mut form = filled(UserCategory::Traveller);
        form.phone = "   ".into();
        assert_eq!(form.validate(), Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn host_without_address_is_rejected() {
        let form = filled(UserCategory::Host);
        assert_eq!(form.validate(), Err(ValidationError::MissingAddress));
    }

    #[test]
    fn host_with_autocomplete_address() {
        let mut form = filled(UserCategory::Host);
        form.location.address = Some("Anjuna, Goa, India".into());
        form.location.place_id = Some("ChIJ123".into());

        let location = form.validate().unwrap().location.unwrap();
        assert_eq!(location.address.as_deref(), Some("Anjuna, Goa, India"));
        assert_eq!(location.manual_entry, Some(false));
    }

    #[test]
    fn manual_location_needs_both_coordinates() {
        let mut form = filled(UserCategory::Dispensary);
        form.manual_location = true;
        form.location.latitude = Some(15.57);
        assert_eq!(form.validate(), Err(ValidationError::MissingCoordinates));

        form.location.longitude = Some(73.74);
        let location = form.validate().unwrap().location.unwrap();
        assert_eq!(location.manual_entry, Some(true));
    }

    #[test]
    fn manual_location_rejects_impossible_coordinates() {
        let mut form = filled(UserCategory::Host);
        form.manual_location = true;
        form.location.latitude = Some(123.0);
        form.location.longitude = Some(10.0);
        assert_eq!(form.validate(), Err(ValidationError::CoordinatesOutOfRange));
    }

    #[test]
    fn service_host_sections_checked_in_order() {
        let mut form = filled(UserCategory::ServiceHost);
        assert_eq!(form.validate(), Err(ValidationError::MissingServices));

        form.add_service("Sound healing");
        assert_eq!(form.validate(), Err(ValidationError::MissingServiceAreas));

        form.add_service_area("North Goa");
        assert_eq!(form.validate(), Err(ValidationError::MissingPincodes));

        form.add_pincode(" 403509 ");
        let data = form.validate().unwrap().service_host_data.unwrap();
        assert_eq!(data.pincodes, vec!["403509".to_string()]);
    }

    #[test]
    fn blank_list_entries_are_ignored() {
        let mut form = filled(UserCategory::ServiceHost);
        assert!(!form.add_service("  "));
        assert!(form.service_host.services.is_empty());
        assert!(form.add_service("Reiki"));
        assert_eq!(form.remove_service(0).as_deref(), Some("Reiki"));
        assert_eq!(form.remove_service(0), None);
    }

    #[test]
    fn airbnb_data_only_for_hosts_with_listing() {
        let mut form = filled(UserCategory::Host);
        form.location.address = Some("Tulum".into());
        form.has_airbnb = true;
        form.airbnb.property_name = Some("Casa Verde".into());
        assert!(form.validate().unwrap().airbnb_data.is_none());

        form.airbnb.listing_url = Some("https://airbnb.com/rooms/1".into());
        assert!(form.validate().unwrap().airbnb_data.is_some());

        form.has_airbnb = false;
        assert!(form.validate().unwrap().airbnb_data.is_none());
    }

    #[test]
    fn non_location_category_ignores_location() {
        let mut form = filled(UserCategory::Traveller);
        form.location.address = Some("Lisbon".into());
        assert!(form.validate().unwrap().location.is_none());
    }
}
