use std::sync::Arc;

use super::registry::{Invocation, Trigger, TriggerContext, UniqueEffectDefinition};
use crate::env::Registries;
use crate::event::OutcomeEffect;
use crate::state::{ItemId, Party};

/// Collected output of one trigger dispatch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DispatchResult {
    pub messages: Vec<String>,
    /// Effects the caller must route through the effect applier.
    pub additional_effects: Vec<OutcomeEffect>,
}

impl DispatchResult {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.additional_effects.is_empty()
    }
}

/// Fires `trigger` for every equipped unique item.
///
/// Heroes are visited in roster order and gear in slot order. A hero is
/// skipped if they are dead when reached, so a handler that fells or revives a
/// later hero changes whether that hero's items fire.
pub fn dispatch(
    party: &mut Party,
    trigger: Trigger,
    context: &TriggerContext,
    registries: &Registries,
) -> DispatchResult {
    let aggregator = crate::stats::StatAggregator::new(&registries.sets).at_depth(context.depth);
    let mut result = DispatchResult::default();

    for index in 0..party.len() {
        let Some(hero) = party.heroes().get(index) else {
            break;
        };
        if !hero.alive {
            continue;
        }
        let source = hero.id;
        let bound: Vec<(ItemId, Arc<UniqueEffectDefinition>)> = hero
            .equipment
            .gear()
            .filter_map(|(_, item)| registries.uniques.resolve(item).map(|def| (item.id, Arc::clone(def))))
            .filter(|(_, def)| def.listens_to(trigger))
            .collect();

        for (item, definition) in bound {
            let invocation = Invocation {
                trigger,
                source,
                item,
                context,
                aggregator,
            };
            let output = definition.handler.handle(party, &invocation);
            tracing::debug!(
                %trigger,
                hero = %source,
                %item,
                effect = %definition.id,
                messages = output.messages.len(),
                "unique effect fired"
            );
            result.messages.extend(output.messages);
            result.additional_effects.extend(output.additional_effects);
        }
    }
    result
}
