use crate::error::GameError;
use crate::event::{Branch, ChoiceError, EffectSummary};
use crate::state::RunResources;

/// Messages and applied effects from one trigger dispatch.
pub(crate) struct Fired {
    pub messages: Vec<String>,
    pub summaries: Vec<EffectSummary>,
}

/// Result of [`GameSession::select_choice`](super::GameSession::select_choice).
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceReport {
    pub success: bool,
    /// Outcome text on success, the rejection reason otherwise.
    pub message: String,
    pub branch: Option<Branch>,
    /// Outcome effects first, then handler effects in dispatch order.
    pub summaries: Vec<EffectSummary>,
    /// Unique-effect messages.
    pub messages: Vec<String>,
    pub error: Option<ChoiceError>,
}

impl ChoiceReport {
    pub(crate) fn resolved(text: String, branch: Branch, summaries: Vec<EffectSummary>) -> Self {
        Self {
            success: true,
            message: text,
            branch: Some(branch),
            summaries,
            messages: Vec::new(),
            error: None,
        }
    }

    pub(crate) fn failed(error: ChoiceError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            branch: None,
            summaries: Vec::new(),
            messages: Vec::new(),
            error: Some(error),
        }
    }

    /// True when the rejection may clear up later without a different choice,
    /// such as a requirement the party can still meet.
    pub fn is_retryable(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|error| error.severity().is_recoverable())
    }

    pub(crate) fn absorb(&mut self, fired: Fired) {
        self.messages.extend(fired.messages);
        self.summaries.extend(fired.summaries);
    }
}

/// Result of entering an event or advancing depth or floor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressReport {
    pub floor: u32,
    pub depth: u32,
    /// A floor boss awaits at this depth, or a zone boss closes this floor.
    pub boss: bool,
    pub summaries: Vec<EffectSummary>,
    pub messages: Vec<String>,
}

impl ProgressReport {
    pub(crate) fn at(resources: &RunResources) -> Self {
        Self {
            floor: resources.floor,
            depth: resources.depth,
            ..Self::default()
        }
    }

    pub(crate) fn absorb(&mut self, fired: Fired) {
        self.messages.extend(fired.messages);
        self.summaries.extend(fired.summaries);
    }
}
