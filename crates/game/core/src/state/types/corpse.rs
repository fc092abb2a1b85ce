//! Corpse component and its raise lifecycle.
//!
//! ```text
//! fresh ──consume──► partially_raised ──consume──► consumed (terminal)
//!   └────────────────────consume (max_raises == 1)──────┘
//! ```
//!
//! `raise_count` never decreases and `consumed` is never cleared. A corpse
//! stays attached to its entity for the rest of the session.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::EntityId;

/// Errors returned by [`CorpseComponent::consume`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CorpseError {
    #[error("corpse has already been consumed")]
    Consumed,

    #[error("corpse cannot be raised ({raise_count}/{max_raises} raises used)")]
    NotRaisable { raise_count: u32, max_raises: u32 },
}

impl GameError for CorpseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Consumed => "CORPSE_CONSUMED",
            Self::NotRaisable { .. } => "CORPSE_NOT_RAISABLE",
        }
    }
}

/// Observable lifecycle stage of a corpse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorpseStage {
    Fresh,
    PartiallyRaised,
    Consumed,
}

/// Raise bookkeeping for a dead entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorpseComponent {
    /// Archetype template id used to look up stats on resurrection.
    pub original_monster_id: String,
    pub death_turn: u64,
    pub raise_count: u32,
    pub max_raises: u32,
    pub consumed: bool,
    /// Entity that performed the most recent raise.
    pub last_raiser: Option<EntityId>,
}

impl CorpseComponent {
    pub fn new(original_monster_id: impl Into<String>, death_turn: u64) -> Self {
        Self::with_max_raises(original_monster_id, death_turn, GameConfig::DEFAULT_MAX_RAISES)
    }

    pub fn with_max_raises(
        original_monster_id: impl Into<String>,
        death_turn: u64,
        max_raises: u32,
    ) -> Self {
        Self {
            original_monster_id: original_monster_id.into(),
            death_turn,
            raise_count: 0,
            max_raises,
            consumed: false,
            last_raiser: None,
        }
    }

    /// `!consumed && raise_count < max_raises`.
    pub fn can_be_raised(&self) -> bool {
        !self.consumed && self.raise_count < self.max_raises
    }

    pub fn stage(&self) -> CorpseStage {
        if self.consumed {
            CorpseStage::Consumed
        } else if self.raise_count == 0 {
            CorpseStage::Fresh
        } else {
            CorpseStage::PartiallyRaised
        }
    }

    /// Records one raise by `raiser`.
    ///
    /// Increments `raise_count` and sets `consumed` once the count reaches
    /// `max_raises`. Fails without mutating anything when the corpse is not
    /// raisable.
    pub fn consume(&mut self, raiser: EntityId) -> Result<CorpseStage, CorpseError> {
        if self.consumed {
            return Err(CorpseError::Consumed);
        }
        if !self.can_be_raised() {
            return Err(CorpseError::NotRaisable {
                raise_count: self.raise_count,
                max_raises: self.max_raises,
            });
        }

        self.raise_count += 1;
        self.last_raiser = Some(raiser);
        if self.raise_count >= self.max_raises {
            self.consumed = true;
        }
        Ok(self.stage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_raise_consumes() {
        let mut corpse = CorpseComponent::new("orc", 3);
        assert_eq!(corpse.stage(), CorpseStage::Fresh);
        assert_eq!(corpse.consume(EntityId(7)), Ok(CorpseStage::Consumed));
        assert!(corpse.consumed);
        assert_eq!(corpse.raise_count, 1);

        let before = corpse.clone();
        assert_eq!(corpse.consume(EntityId(8)), Err(CorpseError::Consumed));
        assert_eq!(corpse, before);
    }

    #[test]
    fn multi_raise_passes_through_partial() {
        let mut corpse = CorpseComponent::with_max_raises("troll", 0, 3);
        assert_eq!(corpse.consume(EntityId(1)), Ok(CorpseStage::PartiallyRaised));
        assert_eq!(corpse.consume(EntityId(1)), Ok(CorpseStage::PartiallyRaised));
        assert_eq!(corpse.consume(EntityId(2)), Ok(CorpseStage::Consumed));
        assert_eq!(corpse.raise_count, corpse.max_raises);
        assert_eq!(corpse.last_raiser, Some(EntityId(2)));
    }

    #[test]
    fn zero_max_raises_is_never_raisable() {
        let mut corpse = CorpseComponent::with_max_raises("thrall", 0, 0);
        assert!(!corpse.can_be_raised());
        assert!(matches!(
            corpse.consume(EntityId(1)),
            Err(CorpseError::NotRaisable { .. })
        ));
        assert_eq!(corpse.raise_count, 0);
        assert!(!corpse.consumed);
    }

    #[test]
    fn round_trips_through_bincode() {
        let mut corpse = CorpseComponent::with_max_raises("skeleton", 12, 2);
        corpse.consume(EntityId(4)).ok();
        let bytes = bincode::serialize(&corpse).expect("serialize");
        let decoded: CorpseComponent = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(decoded, corpse);
    }

    proptest! {
        #[test]
        fn raise_count_never_exceeds_limit(max in 0u32..5, attempts in 0u32..10) {
            let mut corpse = CorpseComponent::with_max_raises("ghoul", 0, max);
            for raiser in 1..=attempts {
                let _ = corpse.consume(EntityId(raiser));
                prop_assert!(corpse.raise_count <= corpse.max_raises);
            }
            prop_assert_eq!(corpse.consumed, max > 0 && attempts >= max);
        }
    }
}
