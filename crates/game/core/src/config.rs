/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Natural d20 roll at or above which an attack is critical, unless the
    /// weapon overrides it (keen weapons lower this).
    pub default_crit_threshold: u8,

    /// Turn period of passive regeneration granted by equipment.
    ///
    /// A ring heals on turns where `turn_number % period == 0`, never on turn 0.
    pub regeneration_period: u64,

    /// Hit points restored by one passive regeneration pulse.
    pub regeneration_amount: i32,

    /// Default Chebyshev sight range for monsters whose template omits one.
    pub sight_range: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of tracked entities, living and dead.
    pub const MAX_ENTITIES: usize = 256;
    /// One slot per [`StatusEffectKind`](crate::state::StatusEffectKind).
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_RINGS: usize = 2;

    // ===== fixed rules =====
    /// Hazard damage staircase, in percent of base damage, across the three
    /// equal thirds of a hazard's configured duration.
    pub const HAZARD_DECAY_STEPS: [u32; 3] = [100, 66, 33];
    pub const DEFAULT_MAX_RAISES: u32 = 1;
    /// Turns of poison applied by a venom ring proc.
    pub const VENOM_DURATION: u32 = 3;
    /// Armor class before dexterity, armor, and other bonuses.
    pub const BASE_ARMOR_CLASS: i32 = 10;
    /// Armor class penalty while raging.
    pub const RAGE_AC_PENALTY: i32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRIT_THRESHOLD: u8 = 20;
    pub const DEFAULT_REGENERATION_PERIOD: u64 = 5;
    pub const DEFAULT_REGENERATION_AMOUNT: i32 = 1;
    pub const DEFAULT_SIGHT_RANGE: u32 = 8;

    pub fn new() -> Self {
        Self {
            default_crit_threshold: Self::DEFAULT_CRIT_THRESHOLD,
            regeneration_period: Self::DEFAULT_REGENERATION_PERIOD,
            regeneration_amount: Self::DEFAULT_REGENERATION_AMOUNT,
            sight_range: Self::DEFAULT_SIGHT_RANGE,
        }
    }

    pub fn with_regeneration_period(mut self, period: u64) -> Self {
        self.regeneration_period = period;
        self
    }

    pub fn with_sight_range(mut self, sight_range: u32) -> Self {
        self.sight_range = sight_range;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
