use super::HeroId;

/// How an effect selects the heroes it touches.
///
/// Resolution against a party snapshot lives in [`crate::event::targeting`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetRule {
    /// The acting hero (caster, or whoever resolved the choice).
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfTarget,
    /// One explicitly named hero.
    Hero(HeroId),
    /// One random alive member other than the actor.
    Ally,
    /// Every alive member.
    AllAllies,
    /// Every alive member.
    #[default]
    All,
    /// One uniformly random alive member.
    Random,
    /// Alive member with the highest effective attack.
    Strongest,
    /// Alive member with the lowest effective attack.
    Weakest,
}
