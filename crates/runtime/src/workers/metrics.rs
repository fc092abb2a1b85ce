//! Balance metrics collected while a session plays out.
//!
//! Tracks attack accuracy and damage for both sides, special ability usage,
//! reanimations, and deaths. The combat resolver and executor report through
//! the core's [`MetricsSink`] trait; harness runs merge snapshots afterwards.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use delve_core::{Archetype, AttackerKind, MetricsSink};

/// Per-side attack counters.
#[derive(Debug, Default)]
struct AttackCounters {
    attempts: AtomicU64,
    hits: AtomicU64,
    raw_damage: AtomicU64,
}

impl AttackCounters {
    fn record(&self, landed: bool, raw_damage: i32) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if landed {
            self.hits.fetch_add(1, Ordering::Relaxed);
            self.raw_damage
                .fetch_add(raw_damage.max(0) as u64, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> AttackStats {
        AttackStats {
            attempts: self.attempts.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            raw_damage: self.raw_damage.load(Ordering::Relaxed),
        }
    }

    fn restore(&self, stats: &AttackStats) {
        self.attempts.store(stats.attempts, Ordering::Relaxed);
        self.hits.store(stats.hits, Ordering::Relaxed);
        self.raw_damage.store(stats.raw_damage, Ordering::Relaxed);
    }
}

/// Session metrics sink.
///
/// Uses atomics for lock-free access, so one instance can be shared between
/// the session and whoever reads it.
#[derive(Debug, Default)]
pub struct SessionMetrics {
    player_attacks: AttackCounters,
    monster_attacks: AttackCounters,
    specials_attempted: AtomicU64,
    specials_succeeded: AtomicU64,
    hazard_casts: AtomicU64,
    reanimations: AtomicU64,
    player_deaths: AtomicU64,
    monster_deaths: AtomicU64,
    hazard_deaths: AtomicU64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a sink from a saved snapshot.
    pub fn from_snapshot(snapshot: &MetricsSnapshot) -> Self {
        let metrics = Self::new();
        metrics.restore(snapshot);
        metrics
    }

    /// Overwrites every counter with the values in `snapshot`.
    pub fn restore(&self, snapshot: &MetricsSnapshot) {
        self.player_attacks.restore(&snapshot.player_attacks);
        self.monster_attacks.restore(&snapshot.monster_attacks);
        self.specials_attempted
            .store(snapshot.specials_attempted, Ordering::Relaxed);
        self.specials_succeeded
            .store(snapshot.specials_succeeded, Ordering::Relaxed);
        self.hazard_casts
            .store(snapshot.hazard_casts, Ordering::Relaxed);
        self.reanimations
            .store(snapshot.reanimations, Ordering::Relaxed);
        self.player_deaths
            .store(snapshot.player_deaths, Ordering::Relaxed);
        self.monster_deaths
            .store(snapshot.monster_deaths, Ordering::Relaxed);
        self.hazard_deaths
            .store(snapshot.hazard_deaths, Ordering::Relaxed);
    }

    /// Creates a snapshot of all metrics for display or aggregation.
    ///
    /// Note: not atomic across fields. Sessions are single-threaded, so a
    /// snapshot taken between steps is consistent.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            player_attacks: self.player_attacks.snapshot(),
            monster_attacks: self.monster_attacks.snapshot(),
            specials_attempted: self.specials_attempted.load(Ordering::Relaxed),
            specials_succeeded: self.specials_succeeded.load(Ordering::Relaxed),
            hazard_casts: self.hazard_casts.load(Ordering::Relaxed),
            reanimations: self.reanimations.load(Ordering::Relaxed),
            player_deaths: self.player_deaths.load(Ordering::Relaxed),
            monster_deaths: self.monster_deaths.load(Ordering::Relaxed),
            hazard_deaths: self.hazard_deaths.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSink for SessionMetrics {
    fn record_attack(&self, attacker: AttackerKind, landed: bool, raw_damage: i32) {
        match attacker {
            AttackerKind::Player => self.player_attacks.record(landed, raw_damage),
            AttackerKind::Monster => self.monster_attacks.record(landed, raw_damage),
        }
    }

    fn record_special(&self, archetype: Archetype, succeeded: bool) {
        self.specials_attempted.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            return;
        }
        self.specials_succeeded.fetch_add(1, Ordering::Relaxed);
        // Successful raises are counted once, by `record_reanimation`.
        if archetype == Archetype::Pyromancer {
            self.hazard_casts.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_reanimation(&self) {
        self.reanimations.fetch_add(1, Ordering::Relaxed);
    }

    fn record_death(&self, player: bool) {
        if player {
            self.player_deaths.fetch_add(1, Ordering::Relaxed);
        } else {
            self.monster_deaths.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_hazard_death(&self) {
        self.hazard_deaths.fetch_add(1, Ordering::Relaxed);
    }
}

/// Attack counters for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackStats {
    pub attempts: u64,
    pub hits: u64,
    /// Sum of damage rolled on hits, before resistances.
    pub raw_damage: u64,
}

impl AttackStats {
    /// Hit rate as a percentage (0-100). Zero attempts report 0.
    pub fn hit_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            (self.hits as f64 / self.attempts as f64) * 100.0
        }
    }

    /// Average raw damage per landed hit.
    pub fn average_damage(&self) -> f64 {
        if self.hits == 0 {
            0.0
        } else {
            self.raw_damage as f64 / self.hits as f64
        }
    }

    fn merge(&mut self, other: &AttackStats) {
        self.attempts += other.attempts;
        self.hits += other.hits;
        self.raw_damage += other.raw_damage;
    }
}

/// Snapshot of session metrics at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub player_attacks: AttackStats,
    pub monster_attacks: AttackStats,
    pub specials_attempted: u64,
    pub specials_succeeded: u64,
    pub hazard_casts: u64,
    pub reanimations: u64,
    pub player_deaths: u64,
    pub monster_deaths: u64,
    pub hazard_deaths: u64,
}

impl MetricsSnapshot {
    /// Adds every counter in `other` to this snapshot.
    pub fn merge(&mut self, other: &MetricsSnapshot) {
        self.player_attacks.merge(&other.player_attacks);
        self.monster_attacks.merge(&other.monster_attacks);
        self.specials_attempted += other.specials_attempted;
        self.specials_succeeded += other.specials_succeeded;
        self.hazard_casts += other.hazard_casts;
        self.reanimations += other.reanimations;
        self.player_deaths += other.player_deaths;
        self.monster_deaths += other.monster_deaths;
        self.hazard_deaths += other.hazard_deaths;
    }

    pub fn attacks(&self, attacker: AttackerKind) -> &AttackStats {
        match attacker {
            AttackerKind::Player => &self.player_attacks,
            AttackerKind::Monster => &self.monster_attacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attacks_split_by_side() {
        let metrics = SessionMetrics::new();
        metrics.record_attack(AttackerKind::Player, true, 7);
        metrics.record_attack(AttackerKind::Player, false, 0);
        metrics.record_attack(AttackerKind::Monster, true, 3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.player_attacks.attempts, 2);
        assert_eq!(snapshot.player_attacks.hits, 1);
        assert_eq!(snapshot.player_attacks.raw_damage, 7);
        assert_eq!(snapshot.player_attacks.hit_rate(), 50.0);
        assert_eq!(snapshot.attacks(AttackerKind::Monster).average_damage(), 3.0);
    }

    #[test]
    fn failed_specials_count_as_attempts_only() {
        let metrics = SessionMetrics::new();
        metrics.record_special(Archetype::Necromancer, false);
        metrics.record_special(Archetype::Necromancer, true);
        metrics.record_special(Archetype::Pyromancer, true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.specials_attempted, 3);
        assert_eq!(snapshot.specials_succeeded, 2);
        assert_eq!(snapshot.hazard_casts, 1);
        assert_eq!(snapshot.reanimations, 0);

        metrics.record_reanimation();
        assert_eq!(metrics.snapshot().reanimations, 1);
    }

    #[test]
    fn deaths_and_merge() {
        let metrics = SessionMetrics::new();
        metrics.record_death(false);
        metrics.record_hazard_death();
        metrics.record_death(true);
        metrics.record_reanimation();

        let mut total = metrics.snapshot();
        total.merge(&metrics.snapshot());
        assert_eq!(total.monster_deaths, 2);
        assert_eq!(total.player_deaths, 2);
        assert_eq!(total.hazard_deaths, 2);
        assert_eq!(total.reanimations, 2);
    }

    #[test]
    fn restore_round_trips_through_snapshot() {
        let metrics = SessionMetrics::new();
        metrics.record_attack(AttackerKind::Monster, true, 4);
        metrics.record_special(Archetype::Pyromancer, true);
        let snapshot = metrics.snapshot();

        let restored = SessionMetrics::from_snapshot(&snapshot);
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn empty_rates_are_zero() {
        let stats = AttackStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.average_damage(), 0.0);
    }
}
