//! The behaviors that make up each archetype's priority list.
//!
//! Every behavior is a precondition plus an effect. In a tree they become
//! `guard(precondition, effect)` under one selector, so the first entry whose
//! precondition holds gets to act. An effect that fails (a cornered retreat,
//! an unreachable corpse) hands control to the next entry.

use behavior_tree::{Behavior, BoxedBehavior, Status, guard, node};
use delve_core::{Action, Entity, is_behind};

use super::AiContext;
use super::context::proximity_key;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BehaviorKind {
    /// Raise the nearest raisable corpse within ability range.
    RaiseDead,
    /// Walk toward a raisable corpse without entering the danger radius.
    SeekCorpse,
    /// Step away from a player inside the danger radius.
    Retreat,
    /// Cover the player's area in the archetype's hazard.
    CastHazard,
    /// Surprise attack from behind right after a portal hop.
    Ambush,
    /// Attack in reach, else chase a visible hostile, else wait.
    Fallback,
}

impl BehaviorKind {
    pub fn precondition(self, ctx: &AiContext<'_>) -> bool {
        match self {
            BehaviorKind::RaiseDead => raise_target(ctx).is_some(),
            BehaviorKind::SeekCorpse => seek_target(ctx).is_some(),
            BehaviorKind::Retreat => ctx.in_danger_at(ctx.position()),
            BehaviorKind::CastHazard => cast_target(ctx).is_some(),
            BehaviorKind::Ambush => ambush_target(ctx).is_some(),
            BehaviorKind::Fallback => true,
        }
    }

    pub fn execute(self, ctx: &mut AiContext<'_>) -> Status {
        match self {
            BehaviorKind::RaiseDead => raise_dead(ctx),
            BehaviorKind::SeekCorpse => seek_corpse(ctx),
            BehaviorKind::Retreat => retreat(ctx),
            BehaviorKind::CastHazard => cast_hazard(ctx),
            BehaviorKind::Ambush => ambush(ctx),
            BehaviorKind::Fallback => fallback(ctx),
        }
    }

    /// `guard(precondition, effect)` for this behavior.
    pub fn node<'w>(self) -> BoxedBehavior<'w, AiContext<'w>> {
        guard(node(Precondition(self)), node(Effect(self)))
    }
}

struct Precondition(BehaviorKind);

impl<'w> Behavior<AiContext<'w>> for Precondition {
    fn tick(&self, ctx: &mut AiContext<'w>) -> Status {
        self.0.precondition(ctx).into()
    }
}

struct Effect(BehaviorKind);

impl<'w> Behavior<AiContext<'w>> for Effect {
    fn tick(&self, ctx: &mut AiContext<'w>) -> Status {
        let status = self.0.execute(ctx);
        tracing::trace!(
            target: "runtime::ai",
            actor = %ctx.actor,
            behavior = ?self.0,
            ?status,
            "behavior ran"
        );
        status
    }
}

// ---------------------------------------------------------------------------
// targets
// ---------------------------------------------------------------------------

fn raise_target<'a>(ctx: &AiContext<'a>) -> Option<&'a Entity> {
    if !ctx.ai.ability_ready() {
        return None;
    }
    let here = ctx.position();
    let range = ctx.ai.abilities.range;
    ctx.raisable_corpses()
        .into_iter()
        .find(|body| body.position != here && here.chebyshev(body.position) <= range)
}

/// Corpses already in raise range are left to `RaiseDead`, so a necromancer
/// waiting out its cooldown does not shuffle onto them. The one exception is
/// a corpse underfoot, which needs a step off before it can rise.
fn seek_target<'a>(ctx: &AiContext<'a>) -> Option<&'a Entity> {
    let here = ctx.position();
    let range = ctx.ai.abilities.range;
    ctx.raisable_corpses().into_iter().find(|body| {
        if body.position == here {
            !ctx.open_neighbors().is_empty()
        } else {
            here.chebyshev(body.position) > range && ctx.step_toward(body.position).is_some()
        }
    })
}

fn cast_target<'a>(ctx: &AiContext<'a>) -> Option<&'a Entity> {
    if !ctx.ai.ability_ready() || ctx.ai.abilities.hazard.is_none() {
        return None;
    }
    let player = ctx.hostile_player()?;
    let in_range = ctx.position().chebyshev(player.position) <= ctx.ai.abilities.range;
    (in_range && ctx.can_see(player)).then_some(player)
}

fn ambush_target<'a>(ctx: &AiContext<'a>) -> Option<&'a Entity> {
    if !ctx.ai.used_portal {
        return None;
    }
    let here = ctx.position();
    ctx.visible_hostiles()
        .into_iter()
        .filter(|target| here.chebyshev(target.position) == 1)
        .find(|target| is_behind(here, target.position, target.facing))
}

// ---------------------------------------------------------------------------
// effects
// ---------------------------------------------------------------------------

fn raise_dead(ctx: &mut AiContext<'_>) -> Status {
    let Some(body) = raise_target(ctx) else {
        return Status::Failure;
    };
    ctx.ai.corpse_target = Some(body.id);
    ctx.decide(Action::RaiseDead { corpse: body.id }, BehaviorKind::RaiseDead);
    Status::Success
}

fn seek_corpse(ctx: &mut AiContext<'_>) -> Status {
    let Some(body) = seek_target(ctx) else {
        return Status::Failure;
    };
    ctx.ai.corpse_target = Some(body.id);
    let goal = body.position;
    let here = ctx.position();

    if goal == here {
        let off = ctx
            .open_neighbors()
            .into_iter()
            .find(|&step| !ctx.in_danger_at(step));
        let action = off.map_or(Action::Wait, |to| Action::Move { to });
        ctx.decide(action, BehaviorKind::SeekCorpse);
        return Status::Success;
    }

    let Some(greedy) = ctx.step_toward(goal) else {
        return Status::Failure;
    };
    if !ctx.in_danger_at(greedy) {
        ctx.decide(Action::Move { to: greedy }, BehaviorKind::SeekCorpse);
        return Status::Success;
    }

    // Axis-aligned alternatives that still close the distance.
    let dx = (goal.x - here.x).signum();
    let dy = (goal.y - here.y).signum();
    let alternatives = [here.offset(dx, 0), here.offset(0, dy)];
    let safe = alternatives
        .into_iter()
        .filter(|&step| step != here && step != greedy)
        .find(|&step| ctx.can_step(step) && !ctx.in_danger_at(step));

    let action = safe.map_or(Action::Wait, |to| Action::Move { to });
    ctx.decide(action, BehaviorKind::SeekCorpse);
    Status::Success
}

fn retreat(ctx: &mut AiContext<'_>) -> Status {
    let Some(player) = ctx.hostile_player() else {
        return Status::Failure;
    };
    let threat = player.position;
    let current = ctx.position().chebyshev(threat);

    let best = ctx
        .open_neighbors()
        .into_iter()
        .filter(|step| step.chebyshev(threat) > current)
        .max_by_key(|step| {
            let (row, col) = step.row_major();
            (step.chebyshev(threat), step.manhattan(threat), -row, -col)
        });
    match best {
        Some(to) => {
            ctx.decide(Action::Move { to }, BehaviorKind::Retreat);
            Status::Success
        }
        None => Status::Failure,
    }
}

fn cast_hazard(ctx: &mut AiContext<'_>) -> Status {
    let Some(spell) = ctx.ai.abilities.hazard else {
        return Status::Failure;
    };
    let Some(player) = cast_target(ctx) else {
        return Status::Failure;
    };
    ctx.decide(
        Action::CastHazard {
            kind: spell.kind,
            center: player.position,
        },
        BehaviorKind::CastHazard,
    );
    Status::Success
}

fn ambush(ctx: &mut AiContext<'_>) -> Status {
    let Some(target) = ambush_target(ctx) else {
        return Status::Failure;
    };
    ctx.decide(
        Action::Attack {
            target: target.id,
            surprise: true,
        },
        BehaviorKind::Ambush,
    );
    Status::Success
}

fn fallback(ctx: &mut AiContext<'_>) -> Status {
    let here = ctx.position();
    let reach = ctx
        .me()
        .and_then(Entity::attack_profile)
        .map(|profile| profile.reach);
    let hostiles = ctx.visible_hostiles();

    if let Some(reach) = reach {
        if let Some(target) = hostiles
            .iter()
            .copied()
            .filter(|target| here.chebyshev(target.position) <= reach)
            .min_by_key(|target| proximity_key(here, target))
        {
            ctx.decide(Action::attack(target.id), BehaviorKind::Fallback);
            return Status::Success;
        }
    }

    let chase = hostiles
        .first()
        .and_then(|target| ctx.step_toward(target.position))
        .map_or(Action::Wait, |to| Action::Move { to });
    ctx.decide(chase, BehaviorKind::Fallback);
    Status::Success
}

