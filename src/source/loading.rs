use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use super::clock::{Clock, TimerGuard};
use super::voice::Activation;
use crate::catalog::LOADING_PHASES;

/// Progress and caption at one tick of the loading screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadingSnapshot {
    pub progress: u8,
    pub phase: usize,
    pub caption: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingTick {
    Advanced(LoadingSnapshot),
    /// Progress was already at 100; the interval should stop.
    Finished,
}

/// Fixed-step progress counter behind the loading screen.
///
/// The caption phase of a tick is taken from the progress before that tick's
/// increment, so captions trail the bar by one step.
#[derive(Debug, Clone)]
pub struct LoadingProgress {
    progress: u8,
    phase: usize,
    step: u8,
}

impl LoadingProgress {
    pub const DONE: u8 = 100;

    pub fn new(step: u8) -> Self {
        Self {
            progress: 0,
            phase: 0,
            step: step.max(1),
        }
    }

    pub fn tick(&mut self) -> LoadingTick {
        if self.progress >= Self::DONE {
            return LoadingTick::Finished;
        }
        self.phase = phase_for(self.progress);
        self.progress = self.progress.saturating_add(self.step).min(Self::DONE);
        LoadingTick::Advanced(self.snapshot())
    }

    pub fn snapshot(&self) -> LoadingSnapshot {
        LoadingSnapshot {
            progress: self.progress,
            phase: self.phase,
            caption: LOADING_PHASES[self.phase],
        }
    }
}

/// One phase per 20%, with 100% staying on the last phase.
pub fn phase_for(progress: u8) -> usize {
    (progress as usize / 20).min(LOADING_PHASES.len() - 1)
}

/// Timing of the loading screen.
#[derive(Debug, Clone, Copy)]
pub struct LoadingTiming {
    pub tick: Duration,
    pub step: u8,
    pub complete_delay: Duration,
}

/// Drives [`LoadingProgress`] on a timer and signals completion once.
///
/// Each tick reports a snapshot; the tick after reaching 100% stops the
/// interval, and `on_complete` fires after `complete_delay`. Starting while a
/// run is in flight is ignored. `stop` and drop release the timer.
pub struct LoadingScreen<C: Clock> {
    clock: C,
    timing: LoadingTiming,
    running: Arc<AtomicBool>,
    timer: Option<TimerGuard>,
}

impl<C: Clock> LoadingScreen<C> {
    pub fn new(clock: C, timing: LoadingTiming) -> Self {
        Self {
            clock,
            timing,
            running: Arc::new(AtomicBool::new(false)),
            timer: None,
        }
    }

    /// True from `start` until the completion callback is about to run.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn start<P, F>(&mut self, mut on_progress: P, on_complete: F) -> Activation
    where
        P: FnMut(LoadingSnapshot) + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        if self.is_running() {
            debug!("loading already running, ignoring start");
            return Activation::AlreadyPending;
        }

        let clock = self.clock.clone();
        let timing = self.timing;
        let running = self.running.clone();
        running.store(true, Ordering::SeqCst);
        self.timer = Some(TimerGuard::spawn(async move {
            let mut progress = LoadingProgress::new(timing.step);
            loop {
                clock.sleep(timing.tick).await;
                match progress.tick() {
                    LoadingTick::Advanced(snapshot) => on_progress(snapshot),
                    LoadingTick::Finished => break,
                }
            }
            clock.sleep(timing.complete_delay).await;
            running.store(false, Ordering::SeqCst);
            info!("loading complete");
            on_complete();
        }));
        Activation::Started
    }

    pub fn stop(&mut self) -> bool {
        self.timer = None;
        self.running.swap(false, Ordering::SeqCst)
    }
}
