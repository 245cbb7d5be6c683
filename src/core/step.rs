use std::fmt::{Display, Formatter};

use enumset::{EnumSet, enum_set};

/// Wizard steps in their display order.
#[derive(Debug, enumset::EnumSetType)]
pub enum Step {
    SelectUserType,
    SelectBrand,
    SelectModel,
    SelectVersion,
    SelectBattery,
    ShowResults,
}

impl Step {
    pub const fn title(self) -> &'static str {
        match self {
            Self::SelectUserType => "Profile",
            Self::SelectBrand => "Brand",
            Self::SelectModel => "Model",
            Self::SelectVersion => "Version",
            Self::SelectBattery => "Battery",
            Self::ShowResults => "Results",
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Step list of the wizard.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum WizardVariant {
    /// Ask for the installation context first.
    #[default]
    Full,

    /// Start right away with the vehicle brand.
    Simple,
}

impl WizardVariant {
    /// Vehicle and result steps, shared by every variant.
    pub const REQUIRED_STEPS: EnumSet<Step> = enum_set!(
        Step::SelectBrand
            | Step::SelectModel
            | Step::SelectVersion
            | Step::SelectBattery
            | Step::ShowResults
    );

    pub fn steps(self) -> EnumSet<Step> {
        match self {
            Self::Full => Self::REQUIRED_STEPS | Step::SelectUserType,
            Self::Simple => Self::REQUIRED_STEPS,
        }
    }
}
