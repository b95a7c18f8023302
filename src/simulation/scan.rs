//! Area scans - what a support agent can see around itself

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{EntityId, Position};
use crate::simulation::world::World;

/// Default scan reach, in cells along each axis
pub const SCAN_RANGE: i32 = 3;

/// One agent seen by a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
    pub id: EntityId,
    pub name: String,
    pub pos: Position,
    /// Wrapped Manhattan distance from the scanner
    pub distance: i32,
    pub health: i32,
}

/// Everything inside a scan window, nearest first within each group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub scanner: EntityId,
    pub creatures: Vec<Sighting>,
    pub boss: Option<Sighting>,
    pub hunters: Vec<Sighting>,
    pub supports: Vec<Sighting>,
}

impl ScanReport {
    /// Hostile creatures seen, boss included
    pub fn threats(&self) -> usize {
        self.creatures.len() + usize::from(self.boss.is_some())
    }
}

impl World {
    /// Scan the square window of `range` cells around a support agent
    ///
    /// Read-only. Hidden traps and resources don't show up. Returns None if
    /// `scanner` is not a living support agent.
    pub fn scan_area(&self, scanner: EntityId, range: i32) -> Option<ScanReport> {
        let origin = self
            .entities
            .get(&scanner)
            .filter(|e| e.is_support() && e.is_alive())?
            .pos;

        let mut report = ScanReport {
            scanner,
            creatures: Vec::new(),
            boss: None,
            hunters: Vec::new(),
            supports: Vec::new(),
        };
        // A window wider than the grid wraps onto cells it already saw
        let mut seen = AHashSet::new();
        seen.insert(scanner);

        for dy in -range..=range {
            for dx in -range..=range {
                let Some(id) = self.grid.get_cell(origin.offset(dx, dy)) else {
                    continue;
                };
                if !seen.insert(id) {
                    continue;
                }
                let Some(entity) = self.entities.get(&id) else {
                    continue;
                };

                let sighting = Sighting {
                    id,
                    name: entity.name.clone(),
                    pos: entity.pos,
                    distance: self.grid.manhattan(origin, entity.pos),
                    health: entity.health,
                };
                if entity.is_boss() {
                    report.boss = Some(sighting);
                } else if entity.is_creature() {
                    report.creatures.push(sighting);
                } else if entity.is_hunter() {
                    report.hunters.push(sighting);
                } else if entity.is_support() {
                    report.supports.push(sighting);
                }
            }
        }

        for group in [
            &mut report.creatures,
            &mut report.hunters,
            &mut report.supports,
        ] {
            group.sort_by_key(|s| (s.distance, s.id));
        }
        debug!(
            scanner = %scanner,
            threats = report.threats(),
            boss = report.boss.is_some(),
            "Area scanned"
        );
        Some(report)
    }
}
