//! Scenario system for entity placement and game initialization.
//!
//! A scenario draws the terrain as character rows (see
//! [`MapLayout`](delve_content::MapLayout) for the legend) and places the
//! player and monsters on it. Monsters are named by archetype template id
//! and built from the [`ArchetypeOracle`], so the same placements play out
//! differently under different stat blocks.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use delve_content::MapLayout;
use delve_core::{
    ArchetypeOracle, AttackProfile, CombatStats, Direction, Entity, Equipment, Faction,
    GameConfig, GameState, MapOracle, Position,
};

use crate::api::{Result, RuntimeError};
use crate::oracle::GridMap;

/// The player's starting kit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub position: Position,
    /// `hp` is ignored; the player starts at full health.
    pub stats: CombatStats,
    pub attack: AttackProfile,
    #[serde(default)]
    pub equipment: Option<Equipment>,
}

/// One monster to place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterPlacement {
    /// Archetype template id.
    pub archetype: String,
    pub position: Position,
    /// Replaces the template's equipment.
    #[serde(default)]
    pub equipment: Option<Equipment>,
    #[serde(default)]
    pub facing: Option<Direction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Terrain rows.
    pub map: Vec<String>,
    pub player: PlayerSpec,
    #[serde(default)]
    pub monsters: Vec<MonsterPlacement>,
}

impl Scenario {
    /// Load scenario from a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn layout(&self) -> Result<MapLayout> {
        Ok(MapLayout::parse(self.map.as_slice())?)
    }

    pub fn grid_map(&self) -> Result<GridMap> {
        Ok(GridMap::from_layout(&self.layout()?))
    }

    /// Builds the starting state: the player under
    /// [`EntityId::PLAYER`](delve_core::EntityId::PLAYER), then monsters in
    /// listed order, so ids follow the scenario file.
    ///
    /// Fails on unknown archetype ids and on placements that are out of
    /// bounds, inside walls, or stacked on another placement.
    pub fn create_initial_state(
        &self,
        seed: u64,
        archetypes: &dyn ArchetypeOracle,
        config: &GameConfig,
    ) -> Result<GameState> {
        let map = self.grid_map()?;
        let mut taken = BTreeSet::new();
        let mut place = |who: &str, position: Position| -> Result<()> {
            if map.is_blocked(position) {
                return Err(RuntimeError::InvalidConfig(format!(
                    "{who} at ({}, {}) is not on open floor",
                    position.x, position.y
                )));
            }
            if !taken.insert(position) {
                return Err(RuntimeError::InvalidConfig(format!(
                    "{who} at ({}, {}) overlaps another placement",
                    position.x, position.y
                )));
            }
            Ok(())
        };

        let mut state = GameState::new(seed);

        let spec = &self.player;
        place(&spec.name, spec.position)?;
        let mut stats = spec.stats.clone();
        stats.restore();
        let mut player = Entity::new(spec.name.clone(), spec.position, Faction::Player)
            .with_stats(stats)
            .with_attack(spec.attack.clone());
        player.equipment = spec.equipment.clone();
        state.entities.set_player(player);

        for placement in &self.monsters {
            let template = archetypes
                .template(&placement.archetype)
                .ok_or_else(|| RuntimeError::UnknownArchetype(placement.archetype.clone()))?;
            place(&placement.archetype, placement.position)?;

            let mut monster = template.instantiate(&placement.archetype, placement.position, config);
            if placement.equipment.is_some() {
                monster.equipment = placement.equipment.clone();
            }
            monster.facing = placement.facing;
            state.entities.spawn(monster)?;
        }

        tracing::info!(
            target: "runtime::session",
            scenario = %self.name,
            seed,
            monsters = self.monsters.len(),
            "created initial state"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_content::ContentFactory;
    use delve_core::{Archetype, EntityId};

    const SMALL: &str = r######"(
        name: "pit",
        map: ["#####", "#...#", "#####"],
        player: (
            name: "Hero",
            position: (x: 1, y: 1),
            stats: (max_hp: 12),
            attack: (name: "sword", damage: "1d6", damage_type: Slashing),
        ),
        monsters: [(archetype: "orc", position: (x: 3, y: 1), facing: Some(West))],
    )"######;

    #[test]
    fn builds_state_from_placements() {
        let factory = ContentFactory::bundled();
        let catalog = factory.load_archetypes().expect("archetypes");
        let scenario = Scenario::from_str(SMALL).expect("parse");

        let state = scenario
            .create_initial_state(42, &catalog, &GameConfig::default())
            .expect("state");
        assert_eq!(state.game_seed, 42);

        let hero = state.entities.player().expect("player");
        assert_eq!(hero.stats.as_ref().map(|s| s.hp), Some(12));

        let orc = state.entities.get(EntityId(1)).expect("orc");
        assert_eq!(orc.ai.as_ref().map(|ai| ai.archetype), Some(Archetype::Brute));
        assert_eq!(orc.facing, Some(Direction::West));
    }

    #[test]
    fn rejects_bad_placements() {
        let catalog = ContentFactory::bundled().load_archetypes().expect("archetypes");
        let config = GameConfig::default();

        let mut scenario = Scenario::from_str(SMALL).expect("parse");
        scenario.monsters[0].archetype = "dragon".into();
        assert!(matches!(
            scenario.create_initial_state(1, &catalog, &config),
            Err(RuntimeError::UnknownArchetype(id)) if id == "dragon"
        ));

        let mut scenario = Scenario::from_str(SMALL).expect("parse");
        scenario.monsters[0].position = Position::new(0, 0);
        assert!(matches!(
            scenario.create_initial_state(1, &catalog, &config),
            Err(RuntimeError::InvalidConfig(_))
        ));

        let mut scenario = Scenario::from_str(SMALL).expect("parse");
        scenario.monsters[0].position = Position::new(1, 1);
        assert!(matches!(
            scenario.create_initial_state(1, &catalog, &config),
            Err(RuntimeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn bundled_crypt_is_playable() {
        let factory = ContentFactory::bundled();
        let catalog = factory.load_archetypes().expect("archetypes");
        let scenario = Scenario::load(&factory.scenario_path("crypt")).expect("crypt");
        let state = scenario
            .create_initial_state(7, &catalog, &GameConfig::default())
            .expect("state");
        assert_eq!(state.entities.living_monster_ids().len(), scenario.monsters.len());
        assert!(!scenario.layout().expect("map").portals.is_empty());
    }
}
