//! Priority lists for each monster archetype.
//!
//! Each archetype's AI is a selector over guarded behaviors, highest priority
//! first. `Fallback` always closes the list, so every tree produces an
//! action.
//!
//! ```text
//! necromancer()
//!   └─ Selector
//!       ├─ Guard(RaiseDead)
//!       ├─ Guard(SeekCorpse)
//!       ├─ Guard(Retreat)
//!       └─ Guard(Fallback)
//! ```

use behavior_tree::{BoxedBehavior, selector};
use delve_core::Archetype;

use super::{AiContext, BehaviorKind};

const NECROMANCER: &[BehaviorKind] = &[
    BehaviorKind::RaiseDead,
    BehaviorKind::SeekCorpse,
    BehaviorKind::Retreat,
    BehaviorKind::Fallback,
];

const PYROMANCER: &[BehaviorKind] = &[
    BehaviorKind::CastHazard,
    BehaviorKind::Retreat,
    BehaviorKind::Fallback,
];

const SHADE: &[BehaviorKind] = &[BehaviorKind::Ambush, BehaviorKind::Fallback];

const MELEE: &[BehaviorKind] = &[BehaviorKind::Fallback];

/// Behaviors for `archetype`, highest priority first.
pub fn priorities(archetype: Archetype) -> &'static [BehaviorKind] {
    match archetype {
        Archetype::Necromancer => NECROMANCER,
        Archetype::Pyromancer => PYROMANCER,
        Archetype::Shade => SHADE,
        Archetype::Brute | Archetype::Thrall => MELEE,
    }
}

/// Builds the selector tree for `archetype`.
pub fn tree<'w>(archetype: Archetype) -> BoxedBehavior<'w, AiContext<'w>> {
    selector(
        priorities(archetype)
            .iter()
            .map(|kind| kind.node())
            .collect(),
    )
}
