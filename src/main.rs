mod catalog;
mod cli;
mod console;
mod core;
mod error;
mod handoff;
mod prelude;
mod quantity;
mod tables;

use std::io::{BufWriter, stdin, stdout};

use chrono::Local;
use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    catalog::Catalog,
    cli::{Args, Command, EstimateArgs, HandoffArgs, WizardArgs},
    console::Console,
    core::{
        battery_range::BatteryRange,
        step::WizardVariant,
        tier::ChargerTier,
        wizard::Wizard,
    },
    handoff::{DirectorySlot, HandoffSlot, SLOT_KEY, compare_tiers},
    prelude::*,
    tables::{build_catalog_table, build_estimates_table},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let tiers = args.tiers();

    match args.command {
        Command::Catalog => {
            let catalog = args.catalog.source().load()?;
            println!("{}", build_catalog_table(&catalog));
        }
        Command::Estimate(estimate_args) => {
            let catalog = args.catalog.source().load()?;
            estimate(&catalog, &estimate_args, &tiers)?;
        }
        Command::Wizard(wizard_args) => {
            let catalog = args.catalog.source().load()?;
            wizard(&catalog, &wizard_args, &tiers)?;
        }
        Command::Intake(handoff_args) => {
            intake(&handoff_args)?;
        }
    }

    info!("done!");
    Ok(())
}

#[instrument(
    skip_all,
    fields(brand = %args.brand, model = %args.model, version = %args.vehicle_version)
)]
fn estimate(catalog: &Catalog, args: &EstimateArgs, tiers: &[ChargerTier]) -> Result {
    let range = BatteryRange::try_new(args.start, args.end)?;
    let mut wizard = Wizard::new(catalog, WizardVariant::Simple);
    wizard.select_brand(&args.brand)?;
    wizard.select_model(&args.model)?;
    wizard.select_version(&args.vehicle_version)?;

    // Each edit must keep the range ordered, so widen towards the target first:
    if range.start() < wizard.selection().battery_range.end() {
        wizard.set_battery_start(range.start());
        wizard.set_battery_end(range.end());
    } else {
        wizard.set_battery_end(range.end());
        wizard.set_battery_start(range.start());
    }
    ensure!(wizard.selection().battery_range == range, "failed to apply {range:?}");

    let estimates = compare_tiers(wizard.selection(), tiers)?;
    println!("{}", build_estimates_table(&estimates, range, Local::now()));
    Ok(())
}

#[instrument(skip_all, fields(variant = ?args.variant))]
fn wizard(catalog: &Catalog, args: &WizardArgs, tiers: &[ChargerTier]) -> Result {
    let slot = DirectorySlot::new(&args.handoff.dir);
    let payload = Console::builder()
        .wizard(Wizard::new(catalog, args.variant))
        .tiers(tiers)
        .slot(&slot)
        .output(BufWriter::new(stdout().lock()))
        .build()
        .run(stdin().lock())?;
    match payload {
        Some(payload) => {
            info!(
                brand = %payload.car_brand,
                model = %payload.car_model,
                root = %slot.root().display(),
                "handed off"
            );
        }
        None => {
            info!("nothing to hand off");
        }
    }
    Ok(())
}

#[instrument(skip_all, fields(dir = %args.dir.display()))]
fn intake(args: &HandoffArgs) -> Result {
    if let Some(payload) = DirectorySlot::new(&args.dir).take(SLOT_KEY)? {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    Ok(())
}
