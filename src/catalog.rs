mod source;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub use self::source::CatalogSource;
use crate::{
    error::Error,
    quantity::{energy::KilowattHours, power::Kilowatts},
};

/// Immutable vehicle trim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleVersion {
    /// Human-readable trim name, for example `50 kWh - R135`.
    pub label: String,

    #[serde(rename = "battery_capacity_kwh")]
    pub battery_capacity: KilowattHours,

    /// Onboard charger limit, informational only.
    #[serde(rename = "max_ac_charge_kw")]
    pub max_ac_charge: Kilowatts,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub versions: Vec<VehicleVersion>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub models: Vec<Model>,
}

/// Brand → model → versions, in display order.
///
/// Every brand has at least one model, every model has at least one version,
/// and keys are unique within their level.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Document", into = "Document")]
pub struct Catalog {
    brands: Vec<Brand>,
}

/// On-disk and on-wire shape of the catalog.
#[derive(Serialize, Deserialize)]
struct Document {
    brands: Vec<Brand>,
}

impl TryFrom<Document> for Catalog {
    type Error = Error;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        Self::try_from_brands(document.brands)
    }
}

impl From<Catalog> for Document {
    fn from(catalog: Catalog) -> Self {
        Self { brands: catalog.brands }
    }
}

impl Catalog {
    pub fn try_from_brands(brands: Vec<Brand>) -> Result<Self, Error> {
        if brands.is_empty() {
            return Err(Error::InvalidCatalog("there are no brands".to_owned()));
        }
        if let Some(name) = brands.iter().map(|brand| &brand.name).duplicates().next() {
            return Err(Error::InvalidCatalog(format!("brand `{name}` is listed twice")));
        }
        for brand in &brands {
            if brand.models.is_empty() {
                return Err(Error::InvalidCatalog(format!("brand `{}` has no models", brand.name)));
            }
            if let Some(name) = brand.models.iter().map(|model| &model.name).duplicates().next() {
                return Err(Error::InvalidCatalog(format!(
                    "model `{name}` is listed twice under `{}`",
                    brand.name,
                )));
            }
            for model in &brand.models {
                Self::validate_versions(brand, model)?;
            }
        }
        Ok(Self { brands })
    }

    fn validate_versions(brand: &Brand, model: &Model) -> Result<(), Error> {
        if model.versions.is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "model `{} {}` has no versions",
                brand.name, model.name,
            )));
        }
        if let Some(label) = model.versions.iter().map(|version| &version.label).duplicates().next()
        {
            return Err(Error::InvalidCatalog(format!(
                "version `{label}` is listed twice under `{} {}`",
                brand.name, model.name,
            )));
        }
        for version in &model.versions {
            if !version.battery_capacity.is_positive() || !version.max_ac_charge.is_positive() {
                return Err(Error::InvalidCatalog(format!(
                    "version `{} {} {}` must have positive capacity and charge rate",
                    brand.name, model.name, version.label,
                )));
            }
        }
        Ok(())
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    #[must_use]
    pub fn list_brands(&self) -> Vec<&str> {
        self.brands.iter().map(|brand| brand.name.as_str()).collect()
    }

    pub fn list_models(&self, brand: &str) -> Result<Vec<&str>, Error> {
        Ok(self.brand(brand)?.models.iter().map(|model| model.name.as_str()).collect())
    }

    pub fn list_versions(&self, brand: &str, model: &str) -> Result<&[VehicleVersion], Error> {
        Ok(&self.model(brand, model)?.versions)
    }

    pub fn find_version(
        &self,
        brand: &str,
        model: &str,
        label: &str,
    ) -> Result<&VehicleVersion, Error> {
        self.list_versions(brand, model)?
            .iter()
            .find(|version| version.label == label)
            .ok_or_else(|| Error::not_found("version", label))
    }

    fn brand(&self, name: &str) -> Result<&Brand, Error> {
        self.brands
            .iter()
            .find(|brand| brand.name == name)
            .ok_or_else(|| Error::not_found("brand", name))
    }

    fn model(&self, brand: &str, name: &str) -> Result<&Model, Error> {
        self.brand(brand)?
            .models
            .iter()
            .find(|model| model.name == name)
            .ok_or_else(|| Error::not_found("model", format!("{brand} {name}")))
    }

    /// Total number of versions across all brands and models.
    #[must_use]
    pub fn n_versions(&self) -> usize {
        self.brands
            .iter()
            .flat_map(|brand| &brand.models)
            .map(|model| model.versions.len())
            .sum()
    }
}
