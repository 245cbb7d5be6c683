use std::{fs, path::PathBuf, time::Duration};

use ureq::Agent;

use crate::{catalog::Catalog, prelude::*};

const EMBEDDED: &str = include_str!("default.toml");

/// Where the vehicle catalog comes from.
#[derive(Clone, Debug)]
pub enum CatalogSource {
    /// Reference catalog compiled into the binary.
    Embedded,

    /// TOML document on disk.
    File(PathBuf),

    /// JSON document served by a content service.
    Url(String),
}

impl CatalogSource {
    /// Load and validate the catalog.
    ///
    /// The wizard is only constructed from the returned catalog, so nothing
    /// can interact with it while the load is pending.
    #[instrument(skip_all)]
    pub fn load(&self) -> Result<Catalog> {
        let catalog = match self {
            Self::Embedded => {
                toml::from_str::<Catalog>(EMBEDDED).context("the embedded catalog is invalid")?
            }
            Self::File(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                toml::from_str::<Catalog>(&contents)
                    .with_context(|| format!("failed to parse `{}`", path.display()))?
            }
            Self::Url(url) => Self::fetch(url)?,
        };
        info!(
            source = ?self,
            n_brands = catalog.brands().len(),
            n_versions = catalog.n_versions(),
            "loaded the catalog"
        );
        Ok(catalog)
    }

    #[instrument(skip_all, fields(url = url))]
    fn fetch(url: &str) -> Result<Catalog> {
        info!("fetching…");
        let client: Agent =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(10))).build().into();
        client
            .get(url)
            .call()
            .with_context(|| format!("failed to request the catalog from `{url}`"))?
            .body_mut()
            .read_json::<Catalog>()
            .with_context(|| format!("failed to deserialize the catalog from `{url}`"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_embedded_catalog_ok() -> Result {
        let catalog = CatalogSource::Embedded.load()?;
        assert_eq!(catalog.list_brands().first(), Some(&"Tesla"));
        let zoe = catalog.find_version("Renault", "Zoe", "50 kWh - R135")?;
        assert_eq!(zoe.battery_capacity.0, 50.0);
        Ok(())
    }

    #[test]
    fn test_file_catalog_ok() -> Result {
        let mut file = tempfile::NamedTempFile::new()?;
        // language=toml
        writeln!(
            file,
            r#"
            [[brands]]
            name = "Dacia"
            [[brands.models]]
            name = "Spring"
            [[brands.models.versions]]
            label = "Electric 45"
            battery_capacity_kwh = 26.8
            max_ac_charge_kw = 7.0
            "#,
        )?;
        let catalog = CatalogSource::File(file.path().to_owned()).load()?;
        assert_eq!(catalog.list_brands(), ["Dacia"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(CatalogSource::File(PathBuf::from("/nonexistent/catalog.toml")).load().is_err());
    }

    #[test]
    fn test_json_shape_matches_toml() -> Result {
        let catalog = CatalogSource::Embedded.load()?;
        let json = serde_json::to_string(&catalog)?;
        assert_eq!(serde_json::from_str::<Catalog>(&json)?, catalog);
        Ok(())
    }
}
