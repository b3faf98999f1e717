use crate::error::{ErrorSeverity, GameError};
use crate::state::{AbilityId, HeroId};

/// Reasons an ability cannot be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("{0} is not in the party")]
    HeroNotFound(HeroId),

    #[error("{0} has fallen")]
    HeroDown(HeroId),

    #[error("{hero} does not know '{ability}'")]
    NotKnown { hero: HeroId, ability: AbilityId },

    #[error("'{0}' has no definition")]
    MissingDefinition(AbilityId),

    #[error("'{ability}' is on cooldown ({remaining} left)")]
    OnCooldown { ability: AbilityId, remaining: u32 },

    #[error("'{ability}' has no charges left ({charges} per run)")]
    NoCharges { ability: AbilityId, charges: u32 },
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } | Self::NoCharges { .. } | Self::HeroDown(_) => {
                ErrorSeverity::Recoverable
            }
            Self::HeroNotFound(_) | Self::NotKnown { .. } => ErrorSeverity::Validation,
            Self::MissingDefinition(_) => ErrorSeverity::Corruption,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HeroNotFound(_) => "ABILITY_HERO_NOT_FOUND",
            Self::HeroDown(_) => "ABILITY_HERO_DOWN",
            Self::NotKnown { .. } => "ABILITY_NOT_KNOWN",
            Self::MissingDefinition(_) => "ABILITY_MISSING_DEFINITION",
            Self::OnCooldown { .. } => "ABILITY_ON_COOLDOWN",
            Self::NoCharges { .. } => "ABILITY_NO_CHARGES",
        }
    }
}
