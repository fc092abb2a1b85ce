//! Attack resolution.
//!
//! - [`hit`]: armor class and the d20 check
//! - [`result`]: attack profiles and the pure dice roll
//! - [`damage`]: resistance and hit point changes
//! - [`positional`]: backstab geometry
//! - [`death`]: death signals consumed by the runtime death pipeline
//! - [`resolver`]: [`CombatResolver`], which applies one attack to the state
//!
//! Everything except the resolver is a pure function of its inputs.

pub mod damage;
pub mod death;
pub mod hit;
pub mod positional;
pub mod resolver;
pub mod result;

pub use damage::{DamageReport, apply_damage, apply_resistance, heal};
pub use death::{DeathCause, DeathEvent};
pub use hit::{HitRoll, armor_class, check_hit};
pub use positional::is_behind;
pub use resolver::CombatResolver;
pub use result::{AttackOutcome, AttackProfile, AttackResult, AttackRoll, roll_attack};
