//! Player input implementations for tests and automated play.

use std::collections::VecDeque;

use delve_core::{Action, GameEnv, GameState, Position, StatusEffectKind};

use super::ai::context::proximity_key;
use crate::api::PlayerInput;

/// Plays the obvious game: attack the nearest visible hostile in reach,
/// otherwise walk toward it, otherwise wait.
///
/// Never routes through portals, so its path only depends on the map and the
/// positions of living entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPlayer;

impl AutoPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl PlayerInput for AutoPlayer {
    fn next_action(&mut self, state: &GameState, env: GameEnv<'_>) -> Action {
        let Some(player) = state.entities.player().filter(|p| p.is_alive()) else {
            return Action::Wait;
        };
        let here = player.position;
        let reach = player.attack_profile().map_or(1, |profile| profile.reach);

        let Some(target) = state
            .entities
            .iter()
            .filter(|e| e.is_alive() && e.is_hostile_to(player))
            .filter(|e| !e.has_status(StatusEffectKind::Invisibility))
            .min_by_key(|e| proximity_key(here, e))
        else {
            return Action::Wait;
        };

        if here.chebyshev(target.position) <= reach {
            return Action::attack(target.id);
        }
        let occupied =
            |pos: Position| pos != here && state.entities.is_occupied(pos);
        env.map
            .next_step_toward(here, target.position, false, &occupied)
            .filter(|&step| step != target.position)
            .map_or(Action::Wait, |to| Action::Move { to })
    }
}

/// Replays a fixed list of actions, then waits forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    actions: VecDeque<Action>,
}

impl ScriptedInput {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl PlayerInput for ScriptedInput {
    fn next_action(&mut self, _state: &GameState, _env: GameEnv<'_>) -> Action {
        self.actions.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridMap;
    use delve_content::ArchetypeCatalog;
    use delve_core::{
        AbilityParams, AiState, Archetype, AttackProfile, CombatStats, DamageType, DiceExpr,
        Entity, EntityId, Faction, GameConfig, NullMetrics, PcgRng,
    };

    fn setup(monster_at: Position) -> GameState {
        let mut state = GameState::new(5);
        state.entities.set_player(
            Entity::new("Hero", Position::new(1, 1), Faction::Player)
                .with_stats(CombatStats::new(20, 0, 0))
                .with_attack(AttackProfile::natural(
                    "sword",
                    DiceExpr::new(1, 8, 0),
                    DamageType::Slashing,
                )),
        );
        state
            .entities
            .spawn(
                Entity::new("orc", monster_at, Faction::Monsters)
                    .with_stats(CombatStats::new(8, 0, 0))
                    .with_ai(AiState::new(Archetype::Brute, "orc", AbilityParams::default(), 8)),
            )
            .expect("spawn");
        state
    }

    #[test]
    fn auto_player_closes_in_then_attacks() {
        let config = GameConfig::default();
        let map = GridMap::open(8, 8);
        let catalog = ArchetypeCatalog::new();
        let env = GameEnv::new(&config, &map, &catalog, &PcgRng, &NullMetrics);
        let mut input = AutoPlayer::new();

        let far = setup(Position::new(5, 1));
        assert_eq!(
            input.next_action(&far, env),
            Action::Move {
                to: Position::new(2, 1)
            }
        );

        let near = setup(Position::new(2, 2));
        assert_eq!(input.next_action(&near, env), Action::attack(EntityId(1)));
    }

    #[test]
    fn script_runs_out_into_waits() {
        let config = GameConfig::default();
        let map = GridMap::open(4, 4);
        let catalog = ArchetypeCatalog::new();
        let env = GameEnv::new(&config, &map, &catalog, &PcgRng, &NullMetrics);
        let state = GameState::new(1);
        let step = Action::Move {
            to: Position::new(1, 0),
        };
        let mut input = ScriptedInput::new([step]);

        assert_eq!(input.next_action(&state, env), step);
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.next_action(&state, env), Action::Wait);
    }
}
