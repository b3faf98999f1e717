//! Experience and level-ups.
//!
//! ```text
//! while experience >= level × xp_per_level and level < max_level:
//!     experience -= level × xp_per_level
//!     level += 1
//!     base += class.per_level        (max HP gain also restores current HP)
//! ```

use crate::config::ProgressionConfig;
use crate::env::ClassRegistry;
use crate::state::Hero;

/// Adds experience to a living hero and applies every level-up it earns.
///
/// Returns the levels reached, in order. Dead heroes gain nothing.
pub fn grant_experience(
    hero: &mut Hero,
    amount: u64,
    progression: &ProgressionConfig,
    classes: &ClassRegistry,
) -> Vec<u32> {
    if !hero.alive || amount == 0 {
        return Vec::new();
    }
    hero.experience = hero.experience.saturating_add(amount);

    let mut reached = Vec::new();
    while hero.level < progression.max_level {
        let threshold = progression.xp_threshold(hero.level);
        if threshold == 0 || hero.experience < threshold {
            break;
        }
        hero.experience -= threshold;
        hero.level += 1;
        level_up_stats(hero, classes);
        reached.push(hero.level);
    }
    reached
}

fn level_up_stats(hero: &mut Hero, classes: &ClassRegistry) {
    let Some(class) = classes.get(&hero.class) else {
        tracing::warn!(hero = %hero.id, class = %hero.class, "unknown class; level-up grants no stats");
        return;
    };
    hero.base.apply_bonus(&class.per_level);
    hero.base.hp = hero.base.hp.saturating_add(class.per_level.max_hp.max(0));
    tracing::debug!(hero = %hero.id, level = hero.level, "level up");
}
