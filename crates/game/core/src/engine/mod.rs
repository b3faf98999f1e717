//! Session orchestration.
//!
//! A [`GameSession`] is the single entry point a host calls once per player
//! action. It borrows the run state and the injected environment for the
//! duration of the call and enforces the stage order:
//!
//! ```text
//! requirements → outcome → effects → boss-defeat / event-complete triggers
//!                                    → handler effects
//! ```
//!
//! Depth transitions tick the timed-effect ledger exactly once before the
//! depth-advance trigger fires.

mod report;

pub use report::{ChoiceReport, ProgressReport};

use report::Fired;

use crate::ability::{AbilityUse, use_ability};
use crate::env::{Env, RngOracle};
use crate::error::{ErrorContext, GameError};
use crate::event::{
    ApplyContext, ChoiceError, DungeonEvent, EffectApplier, EventKind, check_requirements, resolve,
};
use crate::inventory::{ConsumableSource, ConsumableUse, use_consumable};
use crate::state::{AbilityId, HeroId, Inventory, Party, RunResources};
use crate::timed::TimedEffectLedger;
use crate::unique::{DispatchResult, Trigger, TriggerContext, dispatch};

/// Everything a run persists between actions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    pub party: Party,
    pub resources: RunResources,
    /// Items kept between runs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bank: Inventory,
}

impl RunState {
    pub fn new(party: Party, resources: RunResources) -> Self {
        Self {
            party,
            resources,
            bank: Inventory::new(),
        }
    }

    #[must_use]
    pub fn with_bank(mut self, bank: Inventory) -> Self {
        self.bank = bank;
        self
    }
}

/// Applies player actions to a [`RunState`].
pub struct GameSession<'a> {
    state: &'a mut RunState,
    env: Env<'a>,
}

impl<'a> GameSession<'a> {
    pub fn new(state: &'a mut RunState, env: Env<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &RunState {
        self.state
    }

    /// True if the current depth hosts a floor boss.
    pub fn is_boss_depth(&self) -> bool {
        self.env.config.progression.is_boss_depth(self.state.resources.depth)
    }

    /// True if the current floor ends in a zone boss.
    pub fn is_zone_boss_floor(&self) -> bool {
        self.env.config.progression.is_zone_boss_floor(self.state.resources.floor)
    }

    fn trigger_context(&self) -> TriggerContext {
        TriggerContext::new(self.state.resources.floor, self.state.resources.depth)
    }

    fn error_context(&self) -> ErrorContext {
        ErrorContext::new(self.state.resources.floor, self.state.resources.depth)
    }

    /// Fires combat-start triggers when `event` opens a fight.
    pub fn enter_event(&mut self, event: &DungeonEvent, rng: &mut dyn RngOracle) -> ProgressReport {
        let mut report = ProgressReport::at(&self.state.resources);
        if event.kind.is_combat() {
            let context = self.trigger_context().with_event(event.kind);
            let fired = self.fire(Trigger::CombatStart, &context, rng);
            report.absorb(fired);
        }
        report
    }

    /// Resolves choice `index` of `event`.
    ///
    /// Nothing is mutated unless the choice passes its requirements.
    pub fn select_choice(
        &mut self,
        event: &DungeonEvent,
        index: usize,
        actor: Option<HeroId>,
        rng: &mut dyn RngOracle,
    ) -> ChoiceReport {
        match self.try_select(event, index, actor, rng) {
            Ok(report) => report,
            Err(error) => {
                tracing::debug!(
                    event = %event.id,
                    index,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    %error,
                    "choice rejected"
                );
                ChoiceReport::failed(error)
            }
        }
    }

    fn try_select(
        &mut self,
        event: &DungeonEvent,
        index: usize,
        actor: Option<HeroId>,
        rng: &mut dyn RngOracle,
    ) -> Result<ChoiceReport, ChoiceError> {
        let depth = self.state.resources.depth;
        if self.state.party.is_wiped() {
            let context = self.error_context();
            return Err(ChoiceError::PartyWiped {
                context: match actor {
                    Some(hero) => context.with_hero(hero),
                    None => context,
                },
            });
        }
        if !event.is_available_at(depth) {
            return Err(ChoiceError::EventLocked {
                event: event.id.clone(),
                min_depth: event.min_depth,
            });
        }
        let choice = event.choices.get(index).ok_or_else(|| ChoiceError::UnknownChoice {
            event: event.id.clone(),
            index,
        })?;

        let env = self.env;
        let balance = &env.config.events;
        let aggregator = env.aggregator(depth);
        let RunState {
            party,
            resources,
            bank,
        } = &mut *self.state;

        check_requirements(
            choice,
            party,
            depth,
            resources.gold,
            &resources.inventory,
            balance,
            &aggregator,
        )?;
        let resolved = resolve(choice, party, balance, &aggregator, rng)?;

        let ctx = ApplyContext::new(actor).with_bank(bank);
        let summaries = EffectApplier::new(env).apply(&resolved.outcome.effects, party, resources, &ctx, rng);
        let mut report = ChoiceReport::resolved(resolved.outcome.text.clone(), resolved.branch, summaries);

        let context = self.trigger_context().with_event(event.kind);
        if event.kind == EventKind::Boss && !self.state.party.is_wiped() {
            let fired = self.fire(Trigger::BossDefeated, &context, rng);
            report.absorb(fired);
        }
        let fired = self.fire(Trigger::EventComplete, &context, rng);
        report.absorb(fired);

        tracing::debug!(
            event = %event.id,
            index,
            branch = ?report.branch,
            effects = report.summaries.len(),
            "choice resolved"
        );
        Ok(report)
    }

    /// Moves one depth deeper.
    pub fn advance_depth(&mut self, rng: &mut dyn RngOracle) -> ProgressReport {
        self.state.resources.depth = self.state.resources.depth.saturating_add(1);
        let depth = self.state.resources.depth;

        let ledger = TimedEffectLedger::new(self.env.aggregator(depth));
        let mut report = ProgressReport::at(&self.state.resources);
        report.summaries = ledger.tick(&mut self.state.party, depth);

        let context = self.trigger_context();
        let fired = self.fire(Trigger::DepthAdvance, &context, rng);
        report.absorb(fired);
        report.boss = self.is_boss_depth();
        report
    }

    /// Moves to the next floor. Depth keeps counting.
    pub fn advance_floor(&mut self, rng: &mut dyn RngOracle) -> ProgressReport {
        self.state.resources.floor = self.state.resources.floor.saturating_add(1);
        let mut report = ProgressReport::at(&self.state.resources);

        let context = self.trigger_context();
        let fired = self.fire(Trigger::FloorAdvance, &context, rng);
        report.absorb(fired);
        report.boss = self.is_zone_boss_floor();
        report
    }

    pub fn use_ability(&mut self, hero: HeroId, ability: &AbilityId, rng: &mut dyn RngOracle) -> AbilityUse {
        let RunResources { floor, depth, .. } = self.state.resources;
        use_ability(&mut self.state.party, hero, ability, floor, depth, &self.env, rng)
    }

    pub fn use_consumable(
        &mut self,
        hero: HeroId,
        source: ConsumableSource,
        rng: &mut dyn RngOracle,
    ) -> ConsumableUse {
        let RunState {
            party, resources, ..
        } = &mut *self.state;
        use_consumable(party, resources, hero, source, &self.env, rng)
    }

    /// Dispatches `trigger` and routes handler effects through the applier.
    fn fire(&mut self, trigger: Trigger, context: &TriggerContext, rng: &mut dyn RngOracle) -> Fired {
        let RunState {
            party,
            resources,
            bank,
        } = &mut *self.state;
        let DispatchResult {
            messages,
            additional_effects,
        } = dispatch(party, trigger, context, self.env.registries);

        let ctx = ApplyContext::new(None).with_bank(bank);
        let summaries = EffectApplier::new(self.env).apply(&additional_effects, party, resources, &ctx, rng);
        Fired { messages, summaries }
    }
}
