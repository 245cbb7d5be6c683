use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Installation context, informational only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Individual house.
    Home,

    /// Shared parking of a residential building.
    Condominium,

    /// Company premises or fleet.
    Business,
}

impl UserType {
    pub const ALL: [Self; 3] = [Self::Home, Self::Condominium, Self::Business];

    pub const fn description(self) -> &'static str {
        match self {
            Self::Home => "Individual house with a private parking spot",
            Self::Condominium => "Shared parking of a residential building",
            Self::Business => "Company premises, customers or fleet",
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Condominium => write!(f, "Condominium"),
            Self::Business => write!(f, "Business"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Result;

    #[test]
    fn test_serialize() -> Result {
        assert_eq!(serde_json::to_string(&UserType::Condominium)?, r#""condominium""#);
        Ok(())
    }
}
