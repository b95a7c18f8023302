//! Procedural environmental hazards
//!
//! Hazards are not grid entities. Each one covers a small set of tiles,
//! grows in intensity toward its own cap, and expires after a fixed age.
//! Only hunters take hazard damage.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::HazardConfig;
use crate::core::types::{Position, Tick, ORTHOGONAL_OFFSETS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    SiliconRain,
    OzoneRadiation,
    SulphurDioxide,
    /// A hole in reality
    BreakDomain,
    Nuke,
}

impl HazardKind {
    pub const NON_LETHAL: [HazardKind; 3] = [
        HazardKind::SiliconRain,
        HazardKind::OzoneRadiation,
        HazardKind::SulphurDioxide,
    ];

    pub const ALL: [HazardKind; 5] = [
        HazardKind::SiliconRain,
        HazardKind::OzoneRadiation,
        HazardKind::SulphurDioxide,
        HazardKind::BreakDomain,
        HazardKind::Nuke,
    ];

    /// Damage at intensity 1.0
    pub fn base_damage(self) -> i32 {
        match self {
            Self::SiliconRain => 15,
            Self::OzoneRadiation => 50,
            Self::SulphurDioxide => 10,
            Self::BreakDomain | Self::Nuke => 999,
        }
    }

    /// Severe kinds are late-game only and pulse on a fixed cycle
    pub fn is_severe(self) -> bool {
        matches!(self, Self::BreakDomain | Self::Nuke)
    }

    pub fn spreads(self) -> bool {
        self == Self::OzoneRadiation
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SiliconRain => "silicon rain",
            Self::OzoneRadiation => "ozone radiation",
            Self::SulphurDioxide => "sulphur dioxide",
            Self::BreakDomain => "break domain",
            Self::Nuke => "nuke",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub origin: Position,
    pub intensity: f64,
    pub max_intensity: f64,
    pub growth_rate: f64,
    /// Ticks since creation
    pub age: u32,
    pub active: bool,
    /// Always contains the origin; never longer than the configured tile cap
    pub tiles: Vec<Position>,
}

impl Hazard {
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        kind: HazardKind,
        origin: Position,
        intensity: f64,
        rng: &mut R,
    ) -> Self {
        Self {
            id,
            kind,
            origin,
            intensity,
            max_intensity: rng.gen_range(2.0..5.0),
            growth_rate: rng.gen_range(0.05..0.15),
            age: 0,
            active: true,
            tiles: vec![origin],
        }
    }

    /// Current damage to anything standing on an affected tile
    pub fn damage(&self) -> i32 {
        (self.kind.base_damage() as f64 * self.intensity) as i32
    }

    pub fn covers(&self, pos: Position) -> bool {
        self.tiles.contains(&pos)
    }

    pub fn affects(&self, pos: Position) -> bool {
        self.active && self.covers(pos)
    }

    fn grow(&mut self) {
        if self.intensity < self.max_intensity {
            self.intensity = (self.intensity + self.growth_rate).min(self.max_intensity);
        }
    }
}

/// What changed during one hazard update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardUpdate {
    pub expired: usize,
    pub spawned: Option<(u32, HazardKind, Position)>,
}

/// All live hazards on a `width` × `height` torus
#[derive(Debug, Clone)]
pub struct HazardField {
    width: i32,
    height: i32,
    config: HazardConfig,
    hazards: Vec<Hazard>,
    next_id: u32,
}

impl HazardField {
    pub fn new(width: i32, height: i32, config: HazardConfig) -> Self {
        Self {
            width,
            height,
            config,
            hazards: Vec::new(),
            next_id: 1,
        }
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    fn wrap(&self, x: i32, y: i32) -> Position {
        Position::new(x.rem_euclid(self.width), y.rem_euclid(self.height))
    }

    fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    fn push<R: Rng + ?Sized>(&mut self, kind: HazardKind, intensity: f64, rng: &mut R) -> (u32, Position) {
        let origin = self.random_cell(rng);
        let id = self.next_id;
        self.next_id += 1;
        self.hazards.push(Hazard::new(id, kind, origin, intensity, rng));
        (id, origin)
    }

    /// Seed `count` non-lethal hazards at random cells
    pub fn generate_initial<R: Rng + ?Sized>(&mut self, count: u32, rng: &mut R) {
        for _ in 0..count {
            let kind = HazardKind::NON_LETHAL[rng.gen_range(0..HazardKind::NON_LETHAL.len())];
            self.push(kind, 1.0, rng);
        }
        info!(count, "Generated initial hazards");
    }

    /// Advance every hazard one tick, prune the old ones, maybe spawn a new one
    pub fn update<R: Rng + ?Sized>(&mut self, tick: Tick, rng: &mut R) -> HazardUpdate {
        let mut hazards = std::mem::take(&mut self.hazards);
        for hazard in &mut hazards {
            self.evolve(hazard, tick, rng);
        }

        let before = hazards.len();
        let lifespan = self.config.lifespan;
        hazards.retain(|h| h.age < lifespan);
        let expired = before - hazards.len();
        self.hazards = hazards;

        let mut update = HazardUpdate {
            expired,
            spawned: None,
        };

        if self.hazards.len() < self.config.max_concurrent {
            let chance = self.config.spawn_rate * self.config.difficulty;
            if rng.gen::<f64>() < chance {
                let kind = self.roll_kind(tick, rng);
                let intensity = 1.0 + tick as f64 / 100.0;
                let (id, origin) = self.push(kind, intensity, rng);
                info!(kind = kind.name(), %origin, intensity, "New hazard spawned");
                update.spawned = Some((id, kind, origin));
            }
        }

        update
    }

    fn roll_kind<R: Rng + ?Sized>(&self, tick: Tick, rng: &mut R) -> HazardKind {
        let pool: &[HazardKind] = if tick > self.config.severe_unlock_tick {
            &HazardKind::ALL
        } else {
            &HazardKind::NON_LETHAL
        };
        pool[rng.gen_range(0..pool.len())]
    }

    fn evolve<R: Rng + ?Sized>(&self, hazard: &mut Hazard, tick: Tick, rng: &mut R) {
        hazard.age += 1;
        hazard.grow();

        if hazard.kind.spreads() && hazard.age % self.config.spread_interval == 0 {
            self.spread(hazard, rng);
        }

        if hazard.kind.is_severe() {
            hazard.active = tick % self.config.dormant_period != 0;
        }
    }

    /// Claim one new orthogonally adjacent tile, if any is left and the cap allows
    fn spread<R: Rng + ?Sized>(&self, hazard: &mut Hazard, rng: &mut R) {
        if hazard.tiles.len() >= self.config.max_tiles {
            return;
        }
        let mut candidates: Vec<Position> = Vec::new();
        for tile in &hazard.tiles {
            for (dx, dy) in ORTHOGONAL_OFFSETS {
                let next = self.wrap(tile.x + dx, tile.y + dy);
                if !hazard.covers(next) && !candidates.contains(&next) {
                    candidates.push(next);
                }
            }
        }
        if let Some(&tile) = candidates.choose(rng) {
            hazard.tiles.push(tile);
        }
    }

    /// Damage from the first active hazard covering `pos`
    pub fn damage_at(&self, pos: Position) -> Option<(HazardKind, i32)> {
        self.hazards
            .iter()
            .find(|h| h.affects(pos))
            .map(|h| (h.kind, h.damage()))
    }

    /// Place a hazard directly; used by scenario setups
    pub fn insert(&mut self, mut hazard: Hazard) -> u32 {
        hazard.id = self.next_id;
        self.next_id += 1;
        let id = hazard.id;
        self.hazards.push(hazard);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quiet_config() -> HazardConfig {
        HazardConfig {
            spawn_rate: 0.0,
            ..HazardConfig::default()
        }
    }

    fn fixed(kind: HazardKind, origin: Position) -> Hazard {
        Hazard {
            id: 0,
            kind,
            origin,
            intensity: 1.0,
            max_intensity: 2.0,
            growth_rate: 0.1,
            age: 0,
            active: true,
            tiles: vec![origin],
        }
    }

    #[test]
    fn test_initial_hazards_are_non_lethal() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut field = HazardField::new(20, 20, quiet_config());
        field.generate_initial(10, &mut rng);

        assert_eq!(field.len(), 10);
        assert!(field.hazards().iter().all(|h| !h.kind.is_severe()));
        assert!(field.hazards().iter().all(|h| h.intensity == 1.0 && h.tiles.len() == 1));
    }

    #[test]
    fn test_intensity_grows_to_cap_and_stops() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut field = HazardField::new(20, 20, quiet_config());
        field.insert(fixed(HazardKind::SulphurDioxide, Position::new(3, 3)));

        let mut last = 1.0;
        for tick in 1..=40 {
            field.update(tick, &mut rng);
            let intensity = field.hazards()[0].intensity;
            assert!(intensity >= last);
            assert!(intensity <= 2.0);
            last = intensity;
        }
        assert_eq!(last, 2.0);
    }

    #[test]
    fn test_damage_truncates() {
        let mut h = fixed(HazardKind::SiliconRain, Position::new(0, 0));
        h.intensity = 1.55;
        // 15 * 1.55 = 23.25
        assert_eq!(h.damage(), 23);
    }

    #[test]
    fn test_ozone_spreads_every_fifth_tick_up_to_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut field = HazardField::new(20, 20, quiet_config());
        field.insert(fixed(HazardKind::OzoneRadiation, Position::new(0, 0)));

        for tick in 1..=4 {
            field.update(tick, &mut rng);
        }
        assert_eq!(field.hazards()[0].tiles.len(), 1);

        field.update(5, &mut rng);
        let tiles = &field.hazards()[0].tiles;
        assert_eq!(tiles.len(), 2);
        // The new tile is orthogonally adjacent on the torus
        let t = tiles[1];
        assert!([(0, 1), (1, 0), (0, 19), (19, 0)].contains(&(t.x, t.y)));

        for tick in 6..=45 {
            field.update(tick, &mut rng);
        }
        assert_eq!(field.hazards()[0].tiles.len(), 5);
    }

    #[test]
    fn test_non_spreading_kinds_stay_put() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut field = HazardField::new(20, 20, quiet_config());
        field.insert(fixed(HazardKind::SiliconRain, Position::new(4, 4)));
        for tick in 1..=20 {
            field.update(tick, &mut rng);
        }
        assert_eq!(field.hazards()[0].tiles, vec![Position::new(4, 4)]);
    }

    #[test]
    fn test_severe_hazards_pulse_on_ten_tick_cycle() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut field = HazardField::new(20, 20, quiet_config());
        let pos = Position::new(5, 5);
        field.insert(fixed(HazardKind::Nuke, pos));
        field.insert(fixed(HazardKind::SulphurDioxide, Position::new(6, 6)));

        field.update(9, &mut rng);
        assert!(field.damage_at(pos).is_some());

        field.update(10, &mut rng);
        assert!(field.damage_at(pos).is_none());
        // Non-severe kinds never go dormant
        assert!(field.damage_at(Position::new(6, 6)).is_some());

        field.update(11, &mut rng);
        let (kind, damage) = field.damage_at(pos).unwrap();
        assert_eq!(kind, HazardKind::Nuke);
        assert!(damage >= 999);
    }

    #[test]
    fn test_hazards_expire_at_lifespan() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut field = HazardField::new(20, 20, quiet_config());
        field.insert(fixed(HazardKind::SiliconRain, Position::new(1, 1)));

        for tick in 1..50 {
            assert_eq!(field.update(tick, &mut rng).expired, 0);
        }
        assert_eq!(field.update(50, &mut rng).expired, 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_severe_kinds_locked_early() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let config = HazardConfig {
            spawn_rate: 1.0,
            max_concurrent: 1000,
            ..HazardConfig::default()
        };
        let mut field = HazardField::new(20, 20, config);

        for tick in 1..=30 {
            let update = field.update(tick, &mut rng);
            let (_, kind, _) = update.spawned.unwrap();
            assert!(!kind.is_severe());
        }

        let mut severe_seen = false;
        for tick in 31..=80 {
            if let Some((_, kind, _)) = field.update(tick, &mut rng).spawned {
                severe_seen |= kind.is_severe();
            }
        }
        assert!(severe_seen);
    }

    #[test]
    fn test_spawn_respects_concurrency_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = HazardConfig {
            spawn_rate: 1.0,
            ..HazardConfig::default()
        };
        let mut field = HazardField::new(20, 20, config);
        for tick in 1..=40 {
            field.update(tick, &mut rng);
            assert!(field.len() <= 8);
        }
        assert_eq!(field.len(), 8);
    }

    #[test]
    fn test_spawned_intensity_scales_with_time() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = HazardConfig {
            spawn_rate: 1.0,
            ..HazardConfig::default()
        };
        let mut field = HazardField::new(20, 20, config);
        let (id, _, _) = field.update(50, &mut rng).spawned.unwrap();
        let hazard = field.hazards().iter().find(|h| h.id == id).unwrap();
        assert!((hazard.intensity - 1.5).abs() < 1e-12);
    }
}
