use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    catalog::CatalogSource,
    core::{step::WizardVariant, tier::ChargerTier},
    quantity::percent::Percent,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub catalog: CatalogArgs,

    /// Charger powers in kilowatts, in display order.
    ///
    /// Defaults to the reinforced socket, single-phase and three-phase wallboxes.
    #[clap(
        long = "tiers",
        env = "CHARGER_TIERS",
        value_delimiter = ',',
        num_args = 1..,
        global = true
    )]
    tiers: Vec<ChargerTier>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn tiers(&self) -> Vec<ChargerTier> {
        if self.tiers.is_empty() {
            ChargerTier::canonical()
        } else {
            self.tiers.clone()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the vehicle catalog.
    #[clap(name = "catalog")]
    Catalog,

    /// Estimate the charging time of a vehicle on every charger.
    #[clap(name = "estimate")]
    Estimate(EstimateArgs),

    /// Walk through the simulator step by step.
    #[clap(name = "wizard")]
    Wizard(WizardArgs),

    /// Take the pending simulation on the quote request side.
    #[clap(name = "intake")]
    Intake(HandoffArgs),
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// TOML catalog file, instead of the embedded one.
    #[clap(long = "catalog-path", env = "CATALOG_PATH", global = true)]
    pub path: Option<PathBuf>,

    /// Content service URL serving the JSON catalog.
    #[clap(long = "catalog-url", env = "CATALOG_URL", conflicts_with = "path", global = true)]
    pub url: Option<String>,
}

impl CatalogArgs {
    pub fn source(&self) -> CatalogSource {
        match (&self.path, &self.url) {
            (Some(path), _) => CatalogSource::File(path.clone()),
            (None, Some(url)) => CatalogSource::Url(url.clone()),
            (None, None) => CatalogSource::Embedded,
        }
    }
}

#[derive(Parser)]
pub struct EstimateArgs {
    #[clap(long)]
    pub brand: String,

    #[clap(long)]
    pub model: String,

    /// Version label, for example `50 kWh - R135`.
    #[clap(long)]
    pub vehicle_version: String,

    /// Battery level when plugged in.
    #[clap(long, default_value = "20")]
    pub start: Percent,

    /// Target battery level.
    #[clap(long, default_value = "80")]
    pub end: Percent,
}

#[derive(Parser)]
pub struct WizardArgs {
    #[clap(long, env = "WIZARD_VARIANT", value_enum, default_value_t)]
    pub variant: WizardVariant,

    #[clap(flatten)]
    pub handoff: HandoffArgs,
}

#[derive(Parser)]
pub struct HandoffArgs {
    /// Directory where the simulator leaves the data for the quote request.
    #[clap(long = "handoff-dir", env = "HANDOFF_DIR", default_value = ".")]
    pub dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_tiers() {
        let args = Args::parse_from(["borne", "catalog"]);
        assert_eq!(args.tiers(), ChargerTier::canonical());
        assert!(matches!(args.catalog.source(), CatalogSource::Embedded));
    }

    #[test]
    fn test_estimate_args() {
        let args = Args::parse_from([
            "borne",
            "estimate",
            "--brand=Renault",
            "--model=Zoe",
            "--vehicle-version=50 kWh - R135",
            "--start=10",
            "--tiers=7,11",
        ]);
        let Command::Estimate(ref estimate) = args.command else {
            panic!("expected `estimate`");
        };
        assert_eq!(estimate.start, Percent::from_u8_clamped(10));
        assert_eq!(estimate.end, Percent::from_u8_clamped(80));
        let labels: Vec<_> = args.tiers().into_iter().map(|tier| tier.label).collect();
        assert_eq!(labels, ["7 kW", "11 kW"]);
    }

    #[test]
    fn test_non_positive_tier_rejected() {
        assert!(Args::try_parse_from(["borne", "--tiers=0", "catalog"]).is_err());
    }

    #[test]
    fn test_catalog_source_conflict() {
        assert!(
            Args::try_parse_from([
                "borne",
                "--catalog-path=catalog.toml",
                "--catalog-url=https://example.com/catalog.json",
                "catalog",
            ])
            .is_err()
        );
    }
}
