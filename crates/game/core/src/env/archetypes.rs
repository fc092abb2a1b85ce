use crate::combat::AttackProfile;
use crate::config::GameConfig;
use crate::state::{AbilityParams, AiState, Archetype, Entity, Faction, Position};
use crate::stats::{CombatStats, Equipment};

/// Immutable stat block for one kind of monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchetypeTemplate {
    pub name: String,
    pub archetype: Archetype,
    pub stats: CombatStats,
    pub attack: AttackProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: AbilityParams,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Option<Equipment>,
    /// Falls back to [`GameConfig::sight_range`] when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sight_range: Option<u32>,
    /// Raises allowed on the corpse this monster leaves behind.
    #[cfg_attr(feature = "serde", serde(default = "default_max_raises"))]
    pub max_raises: u32,
}

#[cfg(feature = "serde")]
fn default_max_raises() -> u32 {
    GameConfig::DEFAULT_MAX_RAISES
}

impl ArchetypeTemplate {
    pub fn new(
        name: impl Into<String>,
        archetype: Archetype,
        stats: CombatStats,
        attack: AttackProfile,
    ) -> Self {
        Self {
            name: name.into(),
            archetype,
            stats,
            attack,
            abilities: AbilityParams::default(),
            equipment: None,
            sight_range: None,
            max_raises: GameConfig::DEFAULT_MAX_RAISES,
        }
    }

    pub fn with_abilities(mut self, abilities: AbilityParams) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_sight_range(mut self, sight_range: u32) -> Self {
        self.sight_range = Some(sight_range);
        self
    }

    pub fn with_max_raises(mut self, max_raises: u32) -> Self {
        self.max_raises = max_raises;
        self
    }

    /// Builds a fresh, full-health monster record. The registry assigns the
    /// id on spawn.
    pub fn instantiate(&self, template_id: &str, position: Position, config: &GameConfig) -> Entity {
        let mut stats = self.stats.clone();
        stats.restore();
        let ai = AiState::new(
            self.archetype,
            template_id,
            self.abilities,
            self.sight_range.unwrap_or(config.sight_range),
        );
        let mut entity = Entity::new(self.name.clone(), position, Faction::Monsters)
            .with_stats(stats)
            .with_attack(self.attack.clone())
            .with_ai(ai);
        entity.equipment = self.equipment.clone();
        entity
    }

    /// Builds a thrall from this template: same body, thrall behavior, and a
    /// corpse that can never be raised again.
    pub fn instantiate_thrall(
        &self,
        template_id: &str,
        position: Position,
        faction: Faction,
        config: &GameConfig,
    ) -> Entity {
        let mut entity = self.instantiate(template_id, position, config);
        entity.name = format!("raised {}", self.name);
        entity.faction = faction;
        if let Some(ai) = entity.ai.as_mut() {
            ai.archetype = Archetype::Thrall;
            ai.abilities = AbilityParams::default();
        }
        entity
    }
}

/// Source of archetype templates, keyed by template id.
pub trait ArchetypeOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<&ArchetypeTemplate>;

    fn contains(&self, id: &str) -> bool {
        self.template(id).is_some()
    }
}
