use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::stats::StatKind;

/// Reasons a choice cannot be resolved.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChoiceError {
    #[error("choice {index} does not exist on event '{event}'")]
    UnknownChoice { event: String, index: usize },

    #[error("event '{event}' unlocks at depth {min_depth}")]
    EventLocked { event: String, min_depth: u32 },

    #[error("requires a living {class}")]
    MissingClass { class: String },

    #[error("requires {stat} {required:.0} (best in party: {best})")]
    StatTooLow {
        stat: StatKind,
        required: f64,
        best: i32,
    },

    #[error("requires {required} gold (have {available})")]
    NotEnoughGold { required: u64, available: u64 },

    #[error("requires '{item}' in the inventory")]
    MissingItem { item: String },

    #[error("choice '{choice}' has no outcomes to draw from")]
    NoOutcomes { choice: String },

    #[error("the party has fallen")]
    PartyWiped { context: ErrorContext },
}

impl GameError for ChoiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingClass { .. }
            | Self::StatTooLow { .. }
            | Self::NotEnoughGold { .. }
            | Self::MissingItem { .. } => ErrorSeverity::Recoverable,
            Self::UnknownChoice { .. } | Self::EventLocked { .. } | Self::PartyWiped { .. } => {
                ErrorSeverity::Validation
            }
            Self::NoOutcomes { .. } => ErrorSeverity::Corruption,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::PartyWiped { context } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownChoice { .. } => "CHOICE_UNKNOWN",
            Self::EventLocked { .. } => "CHOICE_EVENT_LOCKED",
            Self::MissingClass { .. } => "CHOICE_MISSING_CLASS",
            Self::StatTooLow { .. } => "CHOICE_STAT_TOO_LOW",
            Self::NotEnoughGold { .. } => "CHOICE_NOT_ENOUGH_GOLD",
            Self::MissingItem { .. } => "CHOICE_MISSING_ITEM",
            Self::NoOutcomes { .. } => "CHOICE_NO_OUTCOMES",
            Self::PartyWiped { .. } => "CHOICE_PARTY_WIPED",
        }
    }
}
