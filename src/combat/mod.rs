pub mod constants;
pub mod honor;
pub mod resolution;

pub use honor::{
    delta_for, honor_delta, is_worthy_prey, should_allow_action, HonorAction, HonorChange,
    PreyClass, Worthiness,
};
pub use resolution::{
    apply_strike, engagement, resolve_combat, roll_damage, should_engage, CombatResult,
    Engagement, StrikeOutcome,
};
