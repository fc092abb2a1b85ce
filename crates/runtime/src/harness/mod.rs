//! Balance harness: many independent seeded sessions, one aggregate report.
//!
//! Every run gets its own state, rng seed, and metrics collector and plays on
//! tokio's blocking pool, since a session is synchronous CPU work. Runs share
//! only the read-only scenario, archetypes, and config.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use delve_core::{ArchetypeOracle, GameConfig, MapOracle};

use crate::api::{Result, RuntimeError};
use crate::providers::AutoPlayer;
use crate::runtime::{Session, SessionOutcome};
use crate::scenario::Scenario;
use crate::workers::MetricsSnapshot;

/// Result of one harness run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub outcome: SessionOutcome,
    pub turns: u64,
    pub metrics: MetricsSnapshot,
}

/// Aggregate over every run, in seed order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HarnessReport {
    pub runs: u32,
    pub wins: u32,
    pub losses: u32,
    /// Runs still going at the turn limit.
    pub timeouts: u32,
    pub average_turns: f64,
    pub metrics: MetricsSnapshot,
    pub summaries: Vec<RunSummary>,
}

impl HarnessReport {
    pub fn from_runs(mut summaries: Vec<RunSummary>) -> Self {
        summaries.sort_by_key(|run| run.seed);

        let mut report = Self {
            runs: summaries.len() as u32,
            ..Self::default()
        };
        let mut total_turns = 0u64;
        for run in &summaries {
            match run.outcome {
                SessionOutcome::Victory => report.wins += 1,
                SessionOutcome::Defeat => report.losses += 1,
                SessionOutcome::Ongoing => report.timeouts += 1,
            }
            total_turns += run.turns;
            report.metrics.merge(&run.metrics);
        }
        if report.runs > 0 {
            report.average_turns = total_turns as f64 / f64::from(report.runs);
        }
        report.summaries = summaries;
        report
    }

    pub fn win_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.runs)
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs one scenario under many seeds with [`AutoPlayer`] at the controls.
#[derive(Clone)]
pub struct BalanceHarness {
    scenario: Arc<Scenario>,
    map: Arc<dyn MapOracle>,
    archetypes: Arc<dyn ArchetypeOracle>,
    config: GameConfig,
    max_turns: u64,
}

impl BalanceHarness {
    pub const DEFAULT_MAX_TURNS: u64 = 200;

    pub fn new(scenario: Scenario, archetypes: Arc<dyn ArchetypeOracle>) -> Result<Self> {
        let map: Arc<dyn MapOracle> = Arc::new(scenario.grid_map()?);
        Ok(Self {
            scenario: Arc::new(scenario),
            map,
            archetypes,
            config: GameConfig::default(),
            max_turns: Self::DEFAULT_MAX_TURNS,
        })
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u64) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// `runs` per-run seeds derived from `master`.
    pub fn seeds(master: u64, runs: usize) -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(master);
        (0..runs).map(|_| rng.r#gen()).collect()
    }

    /// Plays one seed to completion or the turn limit.
    pub fn run_one(&self, seed: u64) -> Result<RunSummary> {
        let mut session = Session::builder()
            .config(self.config.clone())
            .seed(seed)
            .scenario((*self.scenario).clone())
            .map(self.map.clone())
            .archetypes(self.archetypes.clone())
            .build()?;
        let outcome = session.run(&mut AutoPlayer::new(), self.max_turns)?;
        Ok(RunSummary {
            seed,
            outcome,
            turns: session.turn(),
            metrics: session.metrics(),
        })
    }

    /// Runs every seed in parallel and aggregates the results.
    ///
    /// The first failing run aborts the rest.
    pub async fn run(&self, seeds: &[u64]) -> Result<HarnessReport> {
        let mut tasks = JoinSet::new();
        for &seed in seeds {
            let harness = self.clone();
            tasks.spawn_blocking(move || harness.run_one(seed));
        }

        let mut summaries = Vec::with_capacity(seeds.len());
        while let Some(joined) = tasks.join_next().await {
            let summary = joined.map_err(RuntimeError::HarnessJoin)??;
            tracing::debug!(
                target: "runtime::harness",
                seed = summary.seed,
                outcome = ?summary.outcome,
                turns = summary.turns,
                "run finished"
            );
            summaries.push(summary);
        }

        let report = HarnessReport::from_runs(summaries);
        tracing::info!(
            target: "runtime::harness",
            scenario = %self.scenario.name,
            runs = report.runs,
            wins = report.wins,
            losses = report.losses,
            timeouts = report.timeouts,
            average_turns = report.average_turns,
            "harness finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(seed: u64, outcome: SessionOutcome, turns: u64) -> RunSummary {
        RunSummary {
            seed,
            outcome,
            turns,
            metrics: MetricsSnapshot::default(),
        }
    }

    #[test]
    fn seeds_are_reproducible() {
        assert_eq!(BalanceHarness::seeds(9, 4), BalanceHarness::seeds(9, 4));
        assert_ne!(BalanceHarness::seeds(9, 4), BalanceHarness::seeds(10, 4));
        assert_eq!(BalanceHarness::seeds(9, 0), Vec::<u64>::new());
    }

    #[test]
    fn report_aggregates_outcomes() {
        let report = HarnessReport::from_runs(vec![
            summary(3, SessionOutcome::Defeat, 10),
            summary(1, SessionOutcome::Victory, 20),
            summary(2, SessionOutcome::Ongoing, 30),
            summary(4, SessionOutcome::Victory, 40),
        ]);
        assert_eq!(report.runs, 4);
        assert_eq!((report.wins, report.losses, report.timeouts), (2, 1, 1));
        assert_eq!(report.average_turns, 25.0);
        assert_eq!(report.win_rate(), 0.5);
        let seeds: Vec<u64> = report.summaries.iter().map(|s| s.seed).collect();
        assert_eq!(seeds, vec![1, 2, 3, 4]);

        let json = report.to_json().expect("json");
        assert!(json.contains("\"wins\": 2"));
    }

    #[test]
    fn empty_report_is_zeroed() {
        let report = HarnessReport::from_runs(Vec::new());
        assert_eq!(report.runs, 0);
        assert_eq!(report.win_rate(), 0.0);
        assert_eq!(report.average_turns, 0.0);
    }
}
