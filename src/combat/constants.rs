//! Combat and honor constants
//!
//! These are rules of the code, not tuning knobs. Knobs live in
//! `PolicyConstants`.

// Honor code
pub const HONOR_BOSS_KILL: i32 = 20;
pub const HONOR_WORTHY_KILL: i32 = 10;
pub const HONOR_WOUNDED_ATTACK: i32 = -10;
pub const HONOR_SUPPORT_ATTACK: i32 = -5;
pub const HONOR_COWARDICE: i32 = -15;

/// Targets below this fraction of max health count as wounded prey
pub const WOUNDED_FRACTION: f32 = 0.5;

// Protagonist behaviour
/// Creatures closer than this wrapped Manhattan distance count as danger when evading
pub const DANGER_RADIUS: i32 = 3;
/// Med kits in the inventory are used automatically below this health
pub const MED_KIT_THRESHOLD: i32 = 50;
/// Stamina boosts in the inventory are used automatically below this stamina
pub const STAMINA_BOOST_THRESHOLD: i32 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_honor_signs() {
        assert!(HONOR_BOSS_KILL > HONOR_WORTHY_KILL && HONOR_WORTHY_KILL > 0);
        assert!(HONOR_WOUNDED_ATTACK < 0 && HONOR_SUPPORT_ATTACK < 0);
        assert!(HONOR_COWARDICE < HONOR_WOUNDED_ATTACK);
    }

    #[test]
    fn test_wounded_fraction_reasonable() {
        assert!(WOUNDED_FRACTION > 0.0 && WOUNDED_FRACTION < 1.0);
    }
}
