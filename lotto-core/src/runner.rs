use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::config::SimConfig;
use crate::error::Result;
use crate::form::TicketForm;
use crate::state::{ResultState, RoundReport};

/// Submits a round every `interval` while the run flag stays set.
///
/// The flag starts armed and is shared so another thread can clear it, even
/// before `run` is called; a round that has started always finishes before
/// the flag is looked at again. `run` never re-arms it, use `rearm`.
pub struct AutoRunner {
    interval: Duration,
    max_rounds: Option<u64>,
    running: Arc<AtomicBool>,
}

impl AutoRunner {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_rounds: None,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.auto_run_interval())
    }

    pub fn with_max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn rearm(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    /// Returns the number of rounds played.
    pub fn run(
        &self,
        state: &mut ResultState,
        forms: &[TicketForm],
        config: &SimConfig,
        rng: &mut impl Rng,
        mut on_round: impl FnMut(&RoundReport, &ResultState),
    ) -> Result<u64> {
        if forms.is_empty() {
            log::warn!("Auto-run requested with no valid forms, nothing to play");
            return Ok(0);
        }
        if self.max_rounds == Some(0) {
            return Ok(0);
        }

        if !self.is_running() {
            log::info!("Auto-run stopped before it started");
            return Ok(0);
        }
        log::info!(
            "Auto-run started: {} forms every {:?}",
            forms.len(),
            self.interval
        );

        let mut rounds = 0u64;
        while self.is_running() {
            let report = match state.submit(forms, config, rng) {
                Ok(report) => report,
                Err(e) => {
                    self.stop();
                    return Err(e);
                }
            };
            rounds += 1;
            on_round(&report, state);

            if self.max_rounds.is_some_and(|max| rounds >= max) {
                self.stop();
                break;
            }
            if self.is_running() && !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }

        log::info!("Auto-run stopped after {} rounds", rounds);
        Ok(rounds)
    }
}
