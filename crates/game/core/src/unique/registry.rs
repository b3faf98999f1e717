use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use strum::{Display, EnumIter};

use crate::event::{EventKind, OutcomeEffect};
use crate::state::{HeroId, Item, ItemId, Party, SetId, UniqueEffectId};
use crate::stats::StatAggregator;

/// Moments at which equipped unique items may react.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Trigger {
    CombatStart,
    BossDefeated,
    DepthAdvance,
    FloorAdvance,
    EventComplete,
}

/// Where in the run a trigger fired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerContext {
    pub floor: u32,
    pub depth: u32,
    /// Kind of the event being resolved, if any.
    pub event_kind: Option<EventKind>,
}

impl TriggerContext {
    pub fn new(floor: u32, depth: u32) -> Self {
        Self {
            floor,
            depth,
            event_kind: None,
        }
    }

    #[must_use]
    pub fn with_event(mut self, kind: EventKind) -> Self {
        self.event_kind = Some(kind);
        self
    }
}

/// Everything a handler learns about one invocation.
#[derive(Clone, Copy, Debug)]
pub struct Invocation<'a> {
    pub trigger: Trigger,
    /// Hero wearing the item.
    pub source: HeroId,
    pub item: ItemId,
    pub context: &'a TriggerContext,
    pub aggregator: StatAggregator<'a>,
}

/// What a handler reports back to the dispatcher.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandlerOutput {
    pub messages: Vec<String>,
    /// Applied by the session through the regular effect pipeline.
    pub additional_effects: Vec<OutcomeEffect>,
}

impl HandlerOutput {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            messages: vec![text.into()],
            additional_effects: Vec::new(),
        }
    }
}

/// Behavior behind a unique effect.
///
/// Handlers are shared across sessions and never serialized; items refer to
/// them by id only.
pub trait UniqueEffectHandler: Send + Sync + fmt::Debug {
    fn handle(&self, party: &mut Party, invocation: &Invocation<'_>) -> HandlerOutput;
}

/// A registered unique effect.
#[derive(Clone, Debug)]
pub struct UniqueEffectDefinition {
    pub id: UniqueEffectId,
    pub name: String,
    pub triggers: Vec<Trigger>,
    pub handler: Arc<dyn UniqueEffectHandler>,
}

impl UniqueEffectDefinition {
    pub fn new(
        id: impl Into<UniqueEffectId>,
        name: impl Into<String>,
        triggers: impl IntoIterator<Item = Trigger>,
        handler: Arc<dyn UniqueEffectHandler>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            triggers: triggers.into_iter().collect(),
            handler,
        }
    }

    pub fn listens_to(&self, trigger: Trigger) -> bool {
        self.triggers.contains(&trigger)
    }
}

/// Unique-effect definitions with their item-name and set bindings.
///
/// Built once from content and then only read.
#[derive(Clone, Debug, Default)]
pub struct UniqueEffectRegistry {
    by_id: HashMap<UniqueEffectId, Arc<UniqueEffectDefinition>>,
    by_item_name: HashMap<String, UniqueEffectId>,
    by_set: HashMap<SetId, UniqueEffectId>,
}

impl UniqueEffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, definition: UniqueEffectDefinition) -> Self {
        self.by_id.insert(definition.id.clone(), Arc::new(definition));
        self
    }

    /// Binds every item named exactly `name` to `effect`.
    #[must_use]
    pub fn bind_item_name(mut self, name: impl Into<String>, effect: impl Into<UniqueEffectId>) -> Self {
        self.by_item_name.insert(name.into(), effect.into());
        self
    }

    /// Binds the unique pieces of `set` to `effect`.
    #[must_use]
    pub fn bind_set(mut self, set: impl Into<SetId>, effect: impl Into<UniqueEffectId>) -> Self {
        self.by_set.insert(set.into(), effect.into());
        self
    }

    pub fn get(&self, id: &UniqueEffectId) -> Option<&Arc<UniqueEffectDefinition>> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Definition governing `item`, first match wins:
    ///
    /// 1. the id embedded in the item, when registered
    /// 2. the binding for the item's exact name
    /// 3. the set binding, for unique items that belong to a set
    pub fn resolve(&self, item: &Item) -> Option<&Arc<UniqueEffectDefinition>> {
        if let Some(id) = &item.unique_effect {
            match self.by_id.get(id) {
                Some(definition) => return Some(definition),
                None => tracing::warn!(item = %item.id, effect = %id, "unregistered unique effect"),
            }
        }

        if let Some(definition) = self.by_item_name.get(&item.name).and_then(|id| self.by_id.get(id)) {
            return Some(definition);
        }

        if item.is_unique {
            return item
                .set_id
                .as_ref()
                .and_then(|set| self.by_set.get(set))
                .and_then(|id| self.by_id.get(id));
        }
        None
    }
}
