use serde::{Deserialize, Serialize};

use crate::{
    core::{tier::ChargerTier, user_type::UserType, wizard::Selection},
    error::Error,
};

/// Snapshot of the simulation for pre-filling the quote request.
///
/// The client fields are left empty for the quote form to fill in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteHandoffPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,

    pub car_brand: String,
    pub car_model: String,
    pub car_version: String,

    /// For example, `50 kWh`.
    pub battery_capacity: String,

    /// Label of the charger the client wants installed.
    pub charging_power: String,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub client_email: String,

    #[serde(default)]
    pub client_phone: String,
}

pub fn build_handoff(
    selection: &Selection,
    charger: &ChargerTier,
) -> Result<QuoteHandoffPayload, Error> {
    let brand = selection.brand.as_ref().ok_or(Error::Precondition("brand"))?;
    let model = selection.model.as_ref().ok_or(Error::Precondition("model"))?;
    let version = selection.version.as_ref().ok_or(Error::Precondition("version"))?;
    Ok(QuoteHandoffPayload {
        user_type: selection.user_type,
        car_brand: brand.clone(),
        car_model: model.clone(),
        car_version: version.label.clone(),
        battery_capacity: version.battery_capacity.to_string(),
        charging_power: charger.label.clone(),
        client_name: String::new(),
        client_email: String::new(),
        client_phone: String::new(),
    })
}
