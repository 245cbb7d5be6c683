use crate::{
    catalog::{Catalog, VehicleVersion},
    core::{
        battery_range::BatteryRange,
        step::{Step, WizardVariant},
        user_type::UserType,
    },
    error::Error,
    prelude::*,
    quantity::percent::Percent,
};

/// Everything the user has picked so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub user_type: Option<UserType>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub version: Option<VehicleVersion>,
    pub battery_range: BatteryRange,
}

/// Full snapshot of the wizard session.
#[derive(Clone, Debug, PartialEq)]
pub struct WizardState {
    pub step: Step,
    pub selection: Selection,
    pub is_results_visible: bool,
}

impl WizardState {
    fn initial(step: Step) -> Self {
        Self { step, selection: Selection::default(), is_results_visible: false }
    }
}

/// What the forward button does on the current step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PrimaryAction {
    Next { is_enabled: bool },
    Restart,
}

/// Linear selection flow over the vehicle catalog.
///
/// Invalid transitions are no-ops: the methods report whether anything changed.
pub struct Wizard<'c> {
    catalog: &'c Catalog,
    steps: Vec<Step>,
    index: usize,
    state: WizardState,
}

impl<'c> Wizard<'c> {
    pub fn new(catalog: &'c Catalog, variant: WizardVariant) -> Self {
        let steps: Vec<Step> = variant.steps().iter().collect();
        let state = WizardState::initial(steps[0]);
        Self { catalog, steps, index: 0, state }
    }

    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    pub const fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub const fn step(&self) -> Step {
        self.state.step
    }

    /// Zero-based position of the current step.
    pub const fn step_index(&self) -> usize {
        self.index
    }

    pub const fn is_results_visible(&self) -> bool {
        self.state.is_results_visible
    }

    pub const fn can_go_back(&self) -> bool {
        self.index != 0
    }

    /// Whether the current step has its required selection.
    pub const fn can_advance(&self) -> bool {
        let selection = &self.state.selection;
        match self.state.step {
            Step::SelectUserType => selection.user_type.is_some(),
            Step::SelectBrand => selection.brand.is_some(),
            Step::SelectModel => selection.model.is_some(),
            Step::SelectVersion => selection.version.is_some(),
            Step::SelectBattery => true,
            Step::ShowResults => false,
        }
    }

    pub const fn primary_action(&self) -> PrimaryAction {
        match self.state.step {
            Step::ShowResults => PrimaryAction::Restart,
            _ => PrimaryAction::Next { is_enabled: self.can_advance() },
        }
    }

    /// Move to the next step if the current one is complete.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() || self.index + 1 >= self.steps.len() {
            debug!(step = ?self.state.step, "advance rejected");
            return false;
        }
        if self.state.step == Step::SelectBattery {
            self.state.is_results_visible = true;
        }
        self.index += 1;
        self.state.step = self.steps[self.index];
        debug!(step = ?self.state.step, "advanced");
        true
    }

    /// Move to the previous step, dropping the selection made on the step being left.
    pub fn retreat(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        let selection = &mut self.state.selection;
        match self.state.step {
            Step::SelectUserType => selection.user_type = None,
            Step::SelectBrand => selection.brand = None,
            Step::SelectModel => selection.model = None,
            Step::SelectVersion => selection.version = None,
            Step::SelectBattery | Step::ShowResults => {}
        }
        self.state.is_results_visible = false;
        self.index -= 1;
        self.state.step = self.steps[self.index];
        debug!(step = ?self.state.step, "retreated");
        true
    }

    /// Clear everything and return to the first step.
    pub fn reset(&mut self) {
        self.index = 0;
        self.state = WizardState::initial(self.steps[0]);
        debug!(step = ?self.state.step, "reset");
    }

    pub fn select_user_type(&mut self, user_type: UserType) {
        self.state.selection.user_type = Some(user_type);
    }

    /// Select the brand and drop the model and version chosen for another one.
    pub fn select_brand(&mut self, brand: &str) -> Result<(), Error> {
        self.catalog.list_models(brand)?;
        let selection = &mut self.state.selection;
        selection.brand = Some(brand.to_owned());
        selection.model = None;
        selection.version = None;
        Ok(())
    }

    /// Select the model of the selected brand and drop the version chosen for another one.
    pub fn select_model(&mut self, model: &str) -> Result<(), Error> {
        let brand = self.state.selection.brand.as_deref().ok_or(Error::Precondition("brand"))?;
        self.catalog.list_versions(brand, model)?;
        let selection = &mut self.state.selection;
        selection.model = Some(model.to_owned());
        selection.version = None;
        Ok(())
    }

    pub fn select_version(&mut self, label: &str) -> Result<(), Error> {
        let selection = &self.state.selection;
        let brand = selection.brand.as_deref().ok_or(Error::Precondition("brand"))?;
        let model = selection.model.as_deref().ok_or(Error::Precondition("model"))?;
        let version = self.catalog.find_version(brand, model, label)?.clone();
        self.state.selection.version = Some(version);
        Ok(())
    }

    /// Accepted only if the start stays below the end.
    pub fn set_battery_start(&mut self, start: Percent) -> bool {
        let is_accepted = self.state.selection.battery_range.set_start(start);
        if !is_accepted {
            debug!(?start, range = ?self.state.selection.battery_range, "start rejected");
        }
        is_accepted
    }

    /// Accepted only if the end stays above the start.
    pub fn set_battery_end(&mut self, end: Percent) -> bool {
        let is_accepted = self.state.selection.battery_range.set_end(end);
        if !is_accepted {
            debug!(?end, range = ?self.state.selection.battery_range, "end rejected");
        }
        is_accepted
    }
}
