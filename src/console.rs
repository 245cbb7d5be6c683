use std::io::{BufRead, Write};

use chrono::Local;

use crate::{
    core::{
        step::Step,
        tier::ChargerTier,
        user_type::UserType,
        wizard::{PrimaryAction, Wizard},
    },
    handoff::{HandoffSlot, QuoteHandoffPayload, SLOT_KEY, build_handoff, compare_tiers},
    prelude::*,
    quantity::percent::Percent,
    tables::{build_estimates_table, build_step_indicator},
};

/// Parsed input line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Command {
    /// One-based option number on the current step.
    Choose(usize),
    Next,
    Back,
    Start(Percent),
    End(Percent),
    Restart,
    /// One-based tier number to install.
    Install(usize),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match (words.next()?, words.next()) {
            ("n" | "next", None) => Self::Next,
            ("b" | "back", None) => Self::Back,
            ("r" | "restart", None) => Self::Restart,
            ("q" | "quit", None) => Self::Quit,
            ("s" | "start", Some(value)) => Self::Start(value.parse().ok()?),
            ("e" | "end", Some(value)) => Self::End(value.parse().ok()?),
            ("i" | "install", Some(value)) => Self::Install(value.parse().ok()?),
            (value, None) => Self::Choose(value.parse().ok()?),
            _ => return None,
        };
        if words.next().is_some() { None } else { Some(command) }
    }
}

/// Line-driven front-end of the wizard.
#[derive(bon::Builder)]
pub struct Console<'a, 'c, W> {
    wizard: Wizard<'c>,
    tiers: &'a [ChargerTier],
    slot: &'a dyn HandoffSlot,
    output: W,
}

impl<'a, 'c, W: Write> Console<'a, 'c, W> {
    /// Run until the client confirms the installation, quits, or the input ends.
    ///
    /// # Returns
    ///
    /// The payload handed off to the quote form, if confirmed.
    pub fn run(&mut self, input: impl BufRead) -> Result<Option<QuoteHandoffPayload>> {
        self.render()?;
        for line in input.lines() {
            let line = line.context("failed to read the input")?;
            let Some(command) = Command::parse(&line) else {
                if !line.trim().is_empty() {
                    writeln!(self.output, "Unknown command: `{}`", line.trim())?;
                }
                continue;
            };
            debug!(?command, step = ?self.wizard.step());
            match command {
                Command::Quit => return Ok(None),
                Command::Install(number) => {
                    if let Some(payload) = self.install(number)? {
                        return Ok(Some(payload));
                    }
                }
                _ => self.handle(command)?,
            }
            self.render()?;
        }
        Ok(None)
    }

    fn handle(&mut self, command: Command) -> Result {
        match command {
            Command::Choose(number) => self.choose(number)?,
            Command::Next => match self.wizard.primary_action() {
                PrimaryAction::Next { is_enabled: true } => {
                    self.wizard.advance();
                }
                PrimaryAction::Next { is_enabled: false } => {
                    writeln!(self.output, "Pick an option first.")?;
                }
                PrimaryAction::Restart => self.wizard.reset(),
            },
            Command::Restart if self.wizard.step() == Step::ShowResults => self.wizard.reset(),
            Command::Back => {
                if !self.wizard.retreat() {
                    writeln!(self.output, "This is the first step.")?;
                }
            }
            Command::Start(start) if self.wizard.step() == Step::SelectBattery => {
                self.wizard.set_battery_start(start);
            }
            Command::End(end) if self.wizard.step() == Step::SelectBattery => {
                self.wizard.set_battery_end(end);
            }
            _ => writeln!(self.output, "Not available on this step.")?,
        }
        Ok(())
    }

    fn choose(&mut self, number: usize) -> Result {
        let Some(index) = number.checked_sub(1) else {
            writeln!(self.output, "There is no option {number}.")?;
            return Ok(());
        };
        let catalog = self.wizard.catalog();
        let selection = self.wizard.selection();
        let is_chosen = match self.wizard.step() {
            Step::SelectUserType => match UserType::ALL.get(index) {
                Some(user_type) => {
                    self.wizard.select_user_type(*user_type);
                    true
                }
                None => false,
            },
            Step::SelectBrand => match catalog.list_brands().get(index) {
                Some(brand) => {
                    self.wizard.select_brand(brand)?;
                    true
                }
                None => false,
            },
            Step::SelectModel => {
                let brand = selection.brand.clone().context("no brand is selected")?;
                match catalog.list_models(&brand)?.get(index) {
                    Some(model) => {
                        self.wizard.select_model(model)?;
                        true
                    }
                    None => false,
                }
            }
            Step::SelectVersion => {
                let brand = selection.brand.clone().context("no brand is selected")?;
                let model = selection.model.clone().context("no model is selected")?;
                match catalog.list_versions(&brand, &model)?.get(index) {
                    Some(version) => {
                        self.wizard.select_version(&version.label)?;
                        true
                    }
                    None => false,
                }
            }
            Step::SelectBattery | Step::ShowResults => {
                writeln!(self.output, "Nothing to choose on this step.")?;
                return Ok(());
            }
        };
        if !is_chosen {
            writeln!(self.output, "There is no option {number}.")?;
        }
        Ok(())
    }

    fn install(&mut self, number: usize) -> Result<Option<QuoteHandoffPayload>> {
        if self.wizard.step() != Step::ShowResults {
            writeln!(self.output, "Not available on this step.")?;
            return Ok(None);
        }
        let Some(tier) = number.checked_sub(1).and_then(|index| self.tiers.get(index)) else {
            writeln!(self.output, "There is no charger {number}.")?;
            return Ok(None);
        };
        let payload = build_handoff(self.wizard.selection(), tier)?;
        self.slot.put(SLOT_KEY, &payload)?;
        info!(charger = %tier, "handed off to the quote request");
        writeln!(
            self.output,
            "Your {} {} is ready for a {} quote request.",
            payload.car_brand, payload.car_model, tier,
        )?;
        Ok(Some(payload))
    }

    fn render(&mut self) -> Result {
        debug!(state = ?self.wizard.state(), "rendering");
        writeln!(
            self.output,
            "{}",
            build_step_indicator(self.wizard.steps(), self.wizard.step_index()),
        )?;
        let catalog = self.wizard.catalog();
        let selection = self.wizard.selection();
        match self.wizard.step() {
            Step::SelectUserType => {
                writeln!(self.output, "Where will the charger be installed?")?;
                for (i, user_type) in UserType::ALL.into_iter().enumerate() {
                    let marker = if selection.user_type == Some(user_type) { '*' } else { ' ' };
                    writeln!(
                        self.output,
                        "{marker}{}. {user_type}: {}",
                        i + 1,
                        user_type.description(),
                    )?;
                }
            }
            Step::SelectBrand => {
                writeln!(self.output, "Which brand is your vehicle?")?;
                for (i, brand) in catalog.list_brands().into_iter().enumerate() {
                    let marker = if selection.brand.as_deref() == Some(brand) { '*' } else { ' ' };
                    writeln!(self.output, "{marker}{}. {brand}", i + 1)?;
                }
            }
            Step::SelectModel => {
                let brand = selection.brand.as_deref().context("no brand is selected")?;
                writeln!(self.output, "Which {brand} model?")?;
                for (i, model) in catalog.list_models(brand)?.into_iter().enumerate() {
                    let marker = if selection.model.as_deref() == Some(model) { '*' } else { ' ' };
                    writeln!(self.output, "{marker}{}. {model}", i + 1)?;
                }
            }
            Step::SelectVersion => {
                let brand = selection.brand.as_deref().context("no brand is selected")?;
                let model = selection.model.as_deref().context("no model is selected")?;
                writeln!(self.output, "Which {brand} {model} version?")?;
                for (i, version) in catalog.list_versions(brand, model)?.iter().enumerate() {
                    let marker = if selection.version.as_ref() == Some(version) { '*' } else { ' ' };
                    writeln!(
                        self.output,
                        "{marker}{}. {} ({}, up to {} AC)",
                        i + 1,
                        version.label,
                        version.battery_capacity,
                        version.max_ac_charge,
                    )?;
                }
            }
            Step::SelectBattery => {
                let range = selection.battery_range;
                writeln!(
                    self.output,
                    "Charge from {} to {}. Change with `s <percent>` and `e <percent>`.",
                    range.start(),
                    range.end(),
                )?;
            }
            Step::ShowResults => {
                debug_assert!(self.wizard.is_results_visible());
                let estimates = compare_tiers(selection, self.tiers)?;
                let version = selection.version.as_ref().context("no version is selected")?;
                writeln!(
                    self.output,
                    "{} {} {}, {} battery, {} onboard charger:",
                    selection.brand.as_deref().unwrap_or_default(),
                    selection.model.as_deref().unwrap_or_default(),
                    version.label,
                    version.battery_capacity,
                    version.max_ac_charge,
                )?;
                writeln!(
                    self.output,
                    "{}",
                    build_estimates_table(&estimates, selection.battery_range, Local::now()),
                )?;
                for (i, tier) in self.tiers.iter().enumerate() {
                    writeln!(self.output, "  i {}: install a {tier}", i + 1)?;
                }
            }
        }
        let mut controls = Vec::new();
        if self.wizard.can_go_back() {
            controls.push("b: back");
        }
        controls.push(match self.wizard.primary_action() {
            PrimaryAction::Next { is_enabled: true } => "n: next",
            PrimaryAction::Next { is_enabled: false } => "n: next (pick an option first)",
            PrimaryAction::Restart => "r: restart the estimation",
        });
        controls.push("q: quit");
        writeln!(self.output, "[{}]", controls.join(" | "))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{
        catalog::tests::sample_catalog,
        core::step::WizardVariant,
        handoff::MemorySlot,
    };

    fn run(variant: WizardVariant, input: &str) -> Result<(Option<QuoteHandoffPayload>, String)> {
        let catalog = sample_catalog();
        let tiers = ChargerTier::canonical();
        let slot = MemorySlot::default();
        let mut output = Vec::new();
        let payload = Console::builder()
            .wizard(Wizard::new(&catalog, variant))
            .tiers(&tiers)
            .slot(&slot)
            .output(&mut output)
            .build()
            .run(Cursor::new(input))?;
        if let Some(payload) = &payload {
            assert_eq!(slot.take(SLOT_KEY)?.as_ref(), Some(payload));
        }
        Ok((payload, String::from_utf8(output)?))
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::parse("3"), Some(Command::Choose(3)));
        assert_eq!(Command::parse(" n "), Some(Command::Next));
        assert_eq!(Command::parse("s 30"), Some(Command::Start(Percent::from_u8_clamped(30))));
        assert_eq!(Command::parse("e 101"), None);
        assert_eq!(Command::parse("i 2"), Some(Command::Install(2)));
        assert_eq!(Command::parse("n 2"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_full_flow_hands_off() -> Result {
        let (payload, output) = run(WizardVariant::Full, "2\nn\n2\nn\n1\nn\n1\nn\ns 10\nn\ni 3\n")?;
        let payload = payload.context("nothing has been handed off")?;
        assert_eq!(payload.user_type, Some(UserType::Condominium));
        assert_eq!(payload.car_brand, "Renault");
        assert_eq!(payload.car_version, "50 kWh - R135");
        assert_eq!(payload.battery_capacity, "50 kWh");
        assert_eq!(payload.charging_power, "22 kW");
        assert!(output.contains("Charge from 10% to 80%."), "{output}");
        assert!(output.contains("r: restart the estimation"), "{output}");
        Ok(())
    }

    #[test]
    fn test_next_is_disabled_without_selection() -> Result {
        let (payload, output) = run(WizardVariant::Simple, "n\nq\n1\n")?;
        assert_eq!(payload, None);
        assert!(output.contains("Pick an option first."), "{output}");
        assert!(!output.contains("Which Tesla model?"), "{output}");
        Ok(())
    }

    #[test]
    fn test_back_is_hidden_on_first_step() -> Result {
        let (_, output) = run(WizardVariant::Simple, "b\n")?;
        assert!(output.contains("This is the first step."), "{output}");
        assert!(!output.contains("b: back"), "{output}");
        Ok(())
    }

    #[test]
    fn test_inverted_battery_edit_is_ignored() -> Result {
        let (_, output) = run(WizardVariant::Simple, "1\nn\n1\nn\n2\nn\ns 90\n")?;
        assert!(output.contains("Charge from 20% to 80%."), "{output}");
        assert!(!output.contains("Charge from 90%"), "{output}");
        Ok(())
    }

    #[test]
    fn test_restart_returns_to_first_step() -> Result {
        let (payload, output) = run(WizardVariant::Simple, "1\nn\n1\nn\n2\nn\nn\nr\ni 1\n")?;
        assert_eq!(payload, None);
        assert!(output.contains("2h 29min"), "{output}");
        assert!(output.ends_with("[n: next (pick an option first) | q: quit]\n"), "{output}");
        Ok(())
    }

    #[test]
    fn test_unknown_option() -> Result {
        let (_, output) = run(WizardVariant::Simple, "9\nfoo\n")?;
        assert!(output.contains("There is no option 9."), "{output}");
        assert!(output.contains("Unknown command: `foo`"), "{output}");
        Ok(())
    }
}
