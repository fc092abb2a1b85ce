//! Ground hazard creation and per-turn processing.

use crate::combat::{DeathCause, DeathEvent, apply_damage};
use crate::env::{MapOracle, MessageLog, MessageTone};
use crate::state::{EntityId, GameState, GroundHazard, HazardKind, HazardRegistry, Position};

/// One hazard hit computed before any hazard ages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingHit {
    target: EntityId,
    kind: HazardKind,
    damage: i32,
}

/// Map-scoped hazard operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroundHazardManager;

impl GroundHazardManager {
    pub fn new() -> Self {
        Self
    }

    /// Places one hazard on every tile in `positions`, replacing any hazard
    /// already there. Returns how many tiles were covered.
    pub fn create(
        &self,
        registry: &mut HazardRegistry,
        kind: HazardKind,
        positions: impl IntoIterator<Item = Position>,
        base_damage: i32,
        duration: u32,
        source: Option<EntityId>,
    ) -> usize {
        if duration == 0 {
            return 0;
        }
        let mut placed = 0;
        for position in positions {
            let mut hazard = GroundHazard::new(kind, position, base_damage, duration);
            if let Some(source) = source {
                hazard = hazard.with_source(source);
            }
            registry.insert(hazard);
            placed += 1;
        }
        placed
    }

    /// Fills every open tile within Chebyshev `radius` of `center`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_burst(
        &self,
        registry: &mut HazardRegistry,
        map: &dyn MapOracle,
        kind: HazardKind,
        center: Position,
        radius: u32,
        base_damage: i32,
        duration: u32,
        source: Option<EntityId>,
    ) -> usize {
        let tiles = center.area(radius).filter(|&pos| !map.is_blocked(pos));
        self.create(registry, kind, tiles, base_damage, duration, source)
    }

    /// Runs one ENVIRONMENT tick.
    ///
    /// Damage for every hazard is computed from the current registry first,
    /// then applied to whoever stands on each tile, then every hazard ages
    /// and expired ones are dropped. With no hazards this is a no-op.
    pub fn process_turn(&self, state: &mut GameState, log: &mut MessageLog) -> Vec<DeathEvent> {
        if state.hazards.is_empty() {
            return Vec::new();
        }
        let turn = state.turn.turn_number;

        let pending: Vec<PendingHit> = state
            .hazards
            .iter()
            .filter_map(|hazard| {
                let damage = hazard.current_damage();
                let target = state.entities.occupant_at(hazard.position)?;
                (damage > 0).then_some(PendingHit {
                    target,
                    kind: hazard.kind,
                    damage,
                })
            })
            .collect();

        let mut deaths = Vec::new();
        for hit in pending {
            let Some(entity) = state.entities.get_mut(hit.target) else {
                continue;
            };
            let Some(stats) = entity.stats.as_mut() else {
                continue;
            };
            let report = apply_damage(stats, hit.damage, hit.kind.damage_type());
            if report.dealt > 0 {
                log.push(
                    turn,
                    MessageTone::Bad,
                    format!(
                        "{} is {} for {} damage.",
                        entity.name,
                        hit.kind.verb(),
                        report.dealt
                    ),
                );
            }
            if report.killed {
                deaths.push(DeathEvent::new(
                    hit.target,
                    DeathCause::Hazard { kind: hit.kind },
                ));
            }
        }

        state.hazards.age();
        deaths
    }
}
