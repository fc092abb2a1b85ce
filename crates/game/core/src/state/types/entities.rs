//! Typed entity records and the registry that owns them.
//!
//! Optional components follow one convention: a missing `status` or
//! `equipment` means "none", while a missing `stats` on an attack target is a
//! caller bug surfaced as [`StateError::MissingCombatStats`].

use crate::combat::AttackProfile;
use crate::config::GameConfig;
use crate::state::StateError;
use crate::stats::{CombatStats, Equipment, Immunities};

use super::{AiState, CorpseComponent, Direction, EntityId, Position, StatusEffects};

/// Allegiance used to decide who attacks whom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Player,
    Monsters,
}

/// One entity, living or dead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub faction: Faction,
    pub alive: bool,
    /// Direction of the entity's last step.
    pub facing: Option<Direction>,
    pub stats: Option<CombatStats>,
    /// Attack used when no weapon is wielded.
    pub natural_attack: Option<AttackProfile>,
    pub equipment: Option<Equipment>,
    pub status: Option<StatusEffects>,
    /// Present on every monster; absent on the player.
    pub ai: Option<AiState>,
    /// Attached once by the death pipeline.
    pub corpse: Option<CorpseComponent>,
    /// Necromancer that raised this entity, if it is a thrall.
    pub raised_by: Option<EntityId>,
}

impl Entity {
    pub fn new(name: impl Into<String>, position: Position, faction: Faction) -> Self {
        Self {
            id: EntityId::PLAYER,
            name: name.into(),
            position,
            faction,
            alive: true,
            facing: None,
            stats: None,
            natural_attack: None,
            equipment: None,
            status: None,
            ai: None,
            corpse: None,
            raised_by: None,
        }
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_attack(mut self, attack: AttackProfile) -> Self {
        self.natural_attack = Some(attack);
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn with_status(mut self, status: StatusEffects) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_ai(mut self, ai: AiState) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn facing(mut self, direction: Direction) -> Self {
        self.facing = Some(direction);
        self
    }

    /// Alive flag set and hit points above zero.
    pub fn is_alive(&self) -> bool {
        self.alive && self.stats.as_ref().is_none_or(|stats| !stats.is_dead())
    }

    /// Monster-controlled entities are the ones carrying an AI component.
    pub fn is_monster(&self) -> bool {
        self.ai.is_some()
    }

    pub fn is_hostile_to(&self, other: &Entity) -> bool {
        self.faction != other.faction
    }

    pub fn immunities(&self) -> Immunities {
        self.equipment
            .as_ref()
            .map_or(Immunities::empty(), Equipment::immunities)
    }

    pub fn has_status(&self, kind: super::StatusEffectKind) -> bool {
        self.status.as_ref().is_some_and(|status| status.has(kind))
    }

    /// Wielded weapon profile, else the natural attack.
    pub fn attack_profile(&self) -> Option<AttackProfile> {
        self.equipment
            .as_ref()
            .and_then(|eq| eq.weapon.as_ref())
            .map(AttackProfile::from_weapon)
            .or_else(|| self.natural_attack.clone())
    }

    /// Corpse that can still be raised.
    pub fn raisable_corpse(&self) -> Option<&CorpseComponent> {
        if self.alive {
            return None;
        }
        self.corpse.as_ref().filter(|corpse| corpse.can_be_raised())
    }
}

/// Every entity in the session, sorted by id.
///
/// Dead entities stay in the list so corpses remain addressable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for EntitiesState {
    fn default() -> Self {
        Self::new()
    }
}

impl EntitiesState {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: EntityId::PLAYER.0 + 1,
        }
    }

    /// Installs the player under [`EntityId::PLAYER`], replacing any previous
    /// player record.
    pub fn set_player(&mut self, mut player: Entity) {
        player.id = EntityId::PLAYER;
        match self.index_of(EntityId::PLAYER) {
            Ok(idx) => self.entities[idx] = player,
            Err(idx) => self.entities.insert(idx, player),
        }
    }

    /// Adds an entity under a freshly allocated id.
    pub fn spawn(&mut self, mut entity: Entity) -> Result<EntityId, StateError> {
        if self.entities.len() >= GameConfig::MAX_ENTITIES {
            return Err(StateError::EntityLimit {
                max: GameConfig::MAX_ENTITIES,
            });
        }
        let id = EntityId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StateError::EntityLimit {
                max: GameConfig::MAX_ENTITIES,
            })?;
        entity.id = id;
        // Ids grow monotonically, so pushing keeps the list sorted.
        self.entities.push(entity);
        Ok(id)
    }

    fn index_of(&self, id: EntityId) -> Result<usize, usize> {
        self.entities.binary_search_by_key(&id, |entity| entity.id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).ok().map(|idx| &self.entities[idx])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).ok().map(move |idx| &mut self.entities[idx])
    }

    pub fn require(&self, id: EntityId) -> Result<&Entity, StateError> {
        self.get(id).ok_or(StateError::EntityNotFound(id))
    }

    pub fn require_mut(&mut self, id: EntityId) -> Result<&mut Entity, StateError> {
        self.get_mut(id).ok_or(StateError::EntityNotFound(id))
    }

    pub fn player(&self) -> Option<&Entity> {
        self.get(EntityId::PLAYER)
    }

    /// Entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Ids of entities that are alive, in ascending order.
    pub fn living_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| entity.is_alive())
            .map(|entity| entity.id)
            .collect()
    }

    /// Ids of living AI-controlled entities, in ascending order.
    pub fn living_monster_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| entity.is_alive() && entity.is_monster())
            .map(|entity| entity.id)
            .collect()
    }

    /// Living entity standing on `position`. Corpses never block.
    pub fn occupant_at(&self, position: Position) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|entity| entity.is_alive() && entity.position == position)
            .map(|entity| entity.id)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupant_at(position).is_some()
    }

    /// Dead entities whose corpse can still be raised, in ascending id order.
    pub fn raisable_corpses(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|entity| entity.raisable_corpse().is_some())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
