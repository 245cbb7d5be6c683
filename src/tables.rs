use chrono::{DateTime, Local};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    catalog::Catalog,
    core::{battery_range::BatteryRange, step::Step},
    handoff::TierEstimate,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_catalog_table(catalog: &Catalog) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Brand", "Model", "Version", "Battery", "Max AC"]);
    for brand in catalog.brands() {
        for (i, model) in brand.models.iter().enumerate() {
            for (j, version) in model.versions.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(if i == 0 && j == 0 { brand.name.as_str() } else { "" })
                        .add_attribute(Attribute::Bold),
                    Cell::new(if j == 0 { model.name.as_str() } else { "" }),
                    Cell::new(&version.label),
                    Cell::new(version.battery_capacity).set_alignment(CellAlignment::Right),
                    Cell::new(version.max_ac_charge)
                        .set_alignment(CellAlignment::Right)
                        .add_attribute(Attribute::Dim),
                ]);
            }
        }
    }
    table
}

/// Side-by-side charging times, fastest in green and slowest in red.
#[must_use]
pub fn build_estimates_table(
    estimates: &[TierEstimate],
    range: BatteryRange,
    plugged_in_at: DateTime<Local>,
) -> Table {
    let fastest = estimates.iter().map(|tier| tier.estimate).min();
    let slowest = estimates.iter().map(|tier| tier.estimate).max();

    let mut table = new_table();
    table.set_header(vec![
        "Charger",
        "Kind",
        "Effective power",
        format!("Energy {}→{}", range.start(), range.end()).as_str(),
        "Duration",
        "Ready at",
    ]);
    for tier in estimates {
        let color = if Some(tier.estimate) == fastest {
            Color::Green
        } else if Some(tier.estimate) == slowest {
            Color::Red
        } else {
            Color::DarkYellow
        };
        let ready_at = plugged_in_at + tier.estimate.as_time_delta();
        table.add_row(vec![
            Cell::new(&tier.tier.label).add_attribute(Attribute::Bold),
            Cell::new(tier.tier.kind()).add_attribute(Attribute::Dim),
            Cell::new(format!("{:.2} kW", tier.effective_power.0))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1} kWh", tier.needed_energy.0))
                .set_alignment(CellAlignment::Right),
            Cell::new(tier.estimate).set_alignment(CellAlignment::Right).fg(color),
            Cell::new(ready_at.format("%a %H:%M")).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// One node per step, the current one highlighted.
#[must_use]
pub fn build_step_indicator(steps: &[Step], current: usize) -> Table {
    let mut table = new_table();
    table.add_row(steps.iter().enumerate().map(|(i, step)| {
        let cell = Cell::new(format!("{} {step}", i + 1));
        if i == current {
            cell.fg(Color::Green).add_attribute(Attribute::Bold)
        } else if i < current {
            cell.add_attribute(Attribute::Dim)
        } else {
            cell
        }
    }));
    table
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{
        catalog::tests::sample_catalog,
        core::{step::WizardVariant, tier::ChargerTier, wizard::Selection},
        handoff::compare_tiers,
        prelude::Result,
    };

    #[test]
    fn test_catalog_table_rows() {
        let table = build_catalog_table(&sample_catalog());
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn test_estimates_table() -> Result {
        let catalog = sample_catalog();
        let selection = Selection {
            version: Some(catalog.find_version("Renault", "Zoe", "50 kWh - R135")?.clone()),
            ..Selection::default()
        };
        let estimates = compare_tiers(&selection, &ChargerTier::canonical())?;
        let plugged_in_at = Local.with_ymd_and_hms(2025, 10, 6, 22, 0, 0).unwrap();
        let table = build_estimates_table(&estimates, selection.battery_range, plugged_in_at);
        assert_eq!(table.row_count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("4h 46min"), "{rendered}");
        assert!(rendered.contains("Tue 02:46"), "{rendered}");
        Ok(())
    }

    #[test]
    fn test_step_indicator_nodes() {
        let steps: Vec<_> = WizardVariant::Simple.steps().iter().collect();
        let mut table = build_step_indicator(&steps, 1);
        assert_eq!(table.column_count(), 5);
        assert!(table.to_string().contains("2 Model"));
    }
}
