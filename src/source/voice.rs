use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info};

use super::clock::{Clock, TimerGuard};
use super::random::RandomSource;

/// Result of asking a simulated source to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Started,
    /// A run is still pending; the request was ignored and its callback dropped.
    AlreadyPending,
}

/// Simulated speech capture: after a delay, resolves to one of a fixed set of
/// transcripts.
///
/// Activating while a capture is pending is ignored. `cancel` and dropping the
/// source both release the pending timer, so the callback never fires after
/// teardown.
pub struct VoiceInput<C: Clock, R: RandomSource> {
    clock: C,
    rng: R,
    delay: Duration,
    samples: Vec<String>,
    pending: Arc<AtomicBool>,
    timer: Option<TimerGuard>,
}

impl<C: Clock, R: RandomSource> VoiceInput<C, R> {
    pub fn new(clock: C, rng: R, delay: Duration, samples: &[&str]) -> Self {
        Self {
            clock,
            rng,
            delay,
            samples: samples.iter().map(|s| s.to_string()).collect(),
            pending: Arc::new(AtomicBool::new(false)),
            timer: None,
        }
    }

    /// True from activation until the callback is about to run.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Start listening. `on_resolved` runs at most once, with the transcript.
    pub fn activate<F>(&mut self, on_resolved: F) -> Activation
    where
        F: FnOnce(String) + Send + 'static,
    {
        if self.is_pending() {
            debug!("voice capture already pending, ignoring activation");
            return Activation::AlreadyPending;
        }

        let transcript = if self.samples.is_empty() {
            String::new()
        } else {
            self.samples[self.rng.pick(self.samples.len())].clone()
        };
        let clock = self.clock.clone();
        let delay = self.delay;
        let pending = self.pending.clone();
        pending.store(true, Ordering::SeqCst);

        self.timer = Some(TimerGuard::spawn(async move {
            clock.sleep(delay).await;
            pending.store(false, Ordering::SeqCst);
            info!(%transcript, "voice capture resolved");
            on_resolved(transcript);
        }));
        debug!(delay_ms = delay.as_millis() as u64, "voice capture started");
        Activation::Started
    }

    /// Stop a pending capture. Returns false if nothing was pending.
    pub fn cancel(&mut self) -> bool {
        self.timer = None;
        let was_pending = self.pending.swap(false, Ordering::SeqCst);
        if was_pending {
            debug!("voice capture cancelled");
        }
        was_pending
    }
}

/// Preferences collected from resolved transcripts.
#[derive(Debug, Clone)]
pub struct PreferenceList {
    items: Vec<String>,
    transcript: Option<String>,
    threshold: usize,
}

impl PreferenceList {
    /// Number of quick suggestions offered before anything is captured.
    pub const SUGGESTIONS: usize = 4;

    pub fn new(threshold: usize) -> Self {
        Self {
            items: Vec::new(),
            transcript: None,
            threshold,
        }
    }

    pub fn set_transcript(&mut self, transcript: impl Into<String>) {
        self.transcript = Some(transcript.into());
    }

    #[allow(dead_code)]
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Keep the current transcript if it is new and non-empty. Duplicates are
    /// dropped without clearing the transcript.
    pub fn commit(&mut self) -> bool {
        match self.transcript.take() {
            Some(text) if !text.trim().is_empty() && !self.items.contains(&text) => {
                self.items.push(text);
                true
            }
            other => {
                self.transcript = other;
                false
            }
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Enough preferences to go looking for roommates.
    pub fn is_ready(&self) -> bool {
        self.items.len() >= self.threshold
    }

    pub fn suggestions<'a>(samples: &'a [&'a str]) -> &'a [&'a str] {
        &samples[..samples.len().min(Self::SUGGESTIONS)]
    }
}
