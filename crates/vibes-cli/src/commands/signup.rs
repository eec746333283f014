//! Early-access signup command.

use anyhow::{Context, Result, anyhow};
use clap::Args;

use vibes_core::signup::{signup_failure_message, thank_you_path};
use vibes_core::{SignupForm, UserCategory};

use crate::output;

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// traveller, host, service_host or dispensary
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Address picked from autocomplete
    #[arg(long)]
    pub address: Option<String>,

    /// Place ID of the picked address
    #[arg(long)]
    pub place_id: Option<String>,

    /// Latitude, for a manually entered location
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude, for a manually entered location
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Service offered (repeatable)
    #[arg(long = "service")]
    pub services: Vec<String>,

    /// Area served (repeatable)
    #[arg(long = "service-area")]
    pub service_areas: Vec<String>,

    /// Pincode or zipcode served (repeatable)
    #[arg(long = "pincode")]
    pub pincodes: Vec<String>,

    /// Existing Airbnb listing URL
    #[arg(long)]
    pub airbnb_url: Option<String>,

    #[arg(long)]
    pub property_name: Option<String>,

    #[arg(long)]
    pub property_type: Option<String>,

    #[arg(long)]
    pub bedrooms: Option<u32>,

    #[arg(long)]
    pub bathrooms: Option<u32>,

    #[arg(long)]
    pub guests: Option<u32>,
}

impl SignupArgs {
    fn into_form(self) -> Result<SignupForm> {
        let category = UserCategory::from_query(self.category.as_deref())
            .context("Invalid category")?;

        let mut form = SignupForm::new(category);
        form.name = self.name;
        form.email = self.email;
        form.phone = self.phone;

        form.manual_location = self.latitude.is_some() || self.longitude.is_some();
        form.location.address = self.address;
        form.location.place_id = self.place_id;
        form.location.latitude = self.latitude;
        form.location.longitude = self.longitude;

        for service in &self.services {
            form.add_service(service);
        }
        for area in &self.service_areas {
            form.add_service_area(area);
        }
        for pincode in &self.pincodes {
            form.add_pincode(pincode);
        }

        form.has_airbnb = self.airbnb_url.is_some();
        form.airbnb.listing_url = self.airbnb_url;
        form.airbnb.property_name = self.property_name;
        form.airbnb.property_type = self.property_type;
        form.airbnb.bedrooms = self.bedrooms;
        form.airbnb.bathrooms = self.bathrooms;
        form.airbnb.guests = self.guests;

        Ok(form)
    }
}

pub async fn run(api_url: &str, args: SignupArgs) -> Result<()> {
    let form = args.into_form()?;
    let client = super::connect(api_url).await?;

    client
        .submit_signup_form(&form)
        .await
        .map_err(|e| anyhow!(signup_failure_message(&e)))?;

    output::success("Successfully signed up for early access!");
    println!();
    output::field("Category", form.category.title());
    output::field("Next", &thank_you_path(form.category));

    Ok(())
}
