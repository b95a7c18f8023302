//! Weather
//!
//! Weather is rerolled every few ticks and wears on the hunters: heat and
//! cold drain stamina, storms throw lightning.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Ticks between weather rolls
pub const WEATHER_PERIOD: Tick = 10;

pub const HOT_STAMINA_DRAIN: i32 = 2;
pub const COLD_STAMINA_DRAIN: i32 = 1;
/// Below this stamina a hunter in the heat stops to rest
pub const HEAT_EXHAUSTION: i32 = 20;
pub const HEAT_REST: i32 = 10;
pub const LIGHTNING_CHANCE: f64 = 0.15;
pub const LIGHTNING_DAMAGE_MIN: i32 = 5;
pub const LIGHTNING_DAMAGE_MAX: i32 = 10;

/// Current weather condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Hot,
    Cold,
    ThunderStorm,
}

impl Weather {
    pub const ALL: [Weather; 4] = [Weather::Clear, Weather::Hot, Weather::Cold, Weather::ThunderStorm];

    /// Stamina each hunter loses per tick
    pub fn stamina_drain(&self) -> i32 {
        match self {
            Self::Hot => HOT_STAMINA_DRAIN,
            Self::Cold => COLD_STAMINA_DRAIN,
            Self::Clear | Self::ThunderStorm => 0,
        }
    }

    pub fn lightning_chance(&self) -> f64 {
        match self {
            Self::ThunderStorm => LIGHTNING_CHANCE,
            _ => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Hot => "hot",
            Self::Cold => "cold",
            Self::ThunderStorm => "thunder storm",
        }
    }
}

/// Weather for the whole map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: Weather,
    /// Tick of the last roll
    pub since: Tick,
}

impl WeatherState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reroll on every period boundary. Returns the old weather if it changed.
    pub fn update<R: Rng + ?Sized>(&mut self, tick: Tick, rng: &mut R) -> Option<Weather> {
        if tick % WEATHER_PERIOD != 0 {
            return None;
        }
        let old = self.current;
        self.current = Weather::ALL[rng.gen_range(0..Weather::ALL.len())];
        self.since = tick;
        (old != self.current).then_some(old)
    }

    /// Roll a lightning strike for one hunter; returns its damage
    pub fn roll_lightning<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<i32> {
        let chance = self.current.lightning_chance();
        if chance > 0.0 && rng.gen::<f64>() < chance {
            Some(rng.gen_range(LIGHTNING_DAMAGE_MIN..=LIGHTNING_DAMAGE_MAX))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_weather_drains() {
        assert_eq!(Weather::Clear.stamina_drain(), 0);
        assert_eq!(Weather::Hot.stamina_drain(), 2);
        assert_eq!(Weather::Cold.stamina_drain(), 1);
        assert_eq!(Weather::ThunderStorm.lightning_chance(), 0.15);
        assert_eq!(Weather::Hot.lightning_chance(), 0.0);
    }

    #[test]
    fn test_weather_only_rolls_on_period() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut state = WeatherState::new();
        for tick in 1..10 {
            assert!(state.update(tick, &mut rng).is_none());
            assert_eq!(state.current, Weather::Clear);
        }

        let mut rolled = std::collections::HashSet::new();
        for k in 1..=200 {
            state.update(k * WEATHER_PERIOD, &mut rng);
            assert_eq!(state.since, k * WEATHER_PERIOD);
            rolled.insert(state.current);
        }
        assert_eq!(rolled.len(), Weather::ALL.len());
    }

    #[test]
    fn test_no_lightning_without_storm() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let state = WeatherState::new();
        for _ in 0..100 {
            assert!(state.roll_lightning(&mut rng).is_none());
        }

        let storm = WeatherState {
            current: Weather::ThunderStorm,
            since: 0,
        };
        let strikes: Vec<i32> = (0..500).filter_map(|_| storm.roll_lightning(&mut rng)).collect();
        assert!(!strikes.is_empty());
        assert!(strikes.iter().all(|d| (5..=10).contains(d)));
    }
}
