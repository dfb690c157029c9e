//! Countdown engine for the next boundary.
//!
//! This module provides the live countdown:
//! - A one-second tick with tokio::time::interval
//! - Remaining time recomputed from the wall clock on every tick
//! - A single `Expired` event per boundary, guarded by an armed flag
//! - Re-derivation of the following boundary after expiry
//! - Cancel-on-drop task handle

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, NaiveTime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::types::{BoundaryKind, DailyTimings, NextEvent};

use super::clock::Clock;
use super::next_event::{next_event, time_remaining};

/// Tick period of the countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// CountdownEvent
// ============================================================================

/// Events published by the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    /// The countdown started towards its first target
    Started {
        /// First target
        next: NextEvent,
    },
    /// One tick elapsed
    Tick {
        /// Time left until `next`
        remaining: Duration,
        /// Current target
        next: NextEvent,
    },
    /// A boundary was reached. Published once per boundary.
    Expired {
        /// The boundary that just elapsed
        kind: BoundaryKind,
    },
    /// A new target was derived after an expiry
    Retargeted {
        /// New target
        next: NextEvent,
    },
}

// ============================================================================
// CountdownState
// ============================================================================

/// Result of observing the countdown at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// `max(0, target - now)`
    pub remaining: Duration,
    /// Set only on the first zero reading of an armed target
    pub expired: Option<BoundaryKind>,
}

/// Target plus the fire-once flag.
///
/// The flag is cleared by the first zero reading and set again only by
/// [`CountdownState::retarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    target: NextEvent,
    armed: bool,
}

impl CountdownState {
    /// Creates an armed state for the given target.
    pub fn new(target: NextEvent) -> Self {
        Self {
            target,
            armed: true,
        }
    }

    /// Returns the current target.
    pub fn target(&self) -> NextEvent {
        self.target
    }

    /// Returns true if the next zero reading will report an expiry.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Computes the remaining time at `now` and reports an expiry at most once.
    pub fn observe(&mut self, now: NaiveDateTime) -> Observation {
        let remaining = time_remaining(self.target.at, now);
        let expired = if remaining.is_zero() && self.armed {
            self.armed = false;
            Some(self.target.kind)
        } else {
            None
        };
        Observation { remaining, expired }
    }

    /// Installs a new target and re-arms.
    pub fn retarget(&mut self, target: NextEvent) {
        self.target = target;
        self.armed = true;
    }
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Drives the countdown for one load cycle's timings.
pub struct CountdownEngine<C: Clock> {
    /// Fajr clock time of the load cycle
    fajr: NaiveTime,
    /// Maghrib clock time of the load cycle
    maghrib: NaiveTime,
    /// Current target and fire-once flag
    state: CountdownState,
    /// Wall-clock source
    clock: C,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<CountdownEvent>,
}

impl<C: Clock> CountdownEngine<C> {
    /// Creates an engine targeting the boundary that follows `clock.now()`.
    pub fn new(
        timings: &DailyTimings,
        clock: C,
        event_tx: mpsc::UnboundedSender<CountdownEvent>,
    ) -> Self {
        let target = next_event(timings.fajr, timings.maghrib, clock.now());
        Self {
            fajr: timings.fajr,
            maghrib: timings.maghrib,
            state: CountdownState::new(target),
            clock,
            event_tx,
        }
    }

    /// Returns the current target.
    pub fn target(&self) -> NextEvent {
        self.state.target()
    }

    /// Runs the countdown loop.
    ///
    /// Ticks every second until the event receiver is dropped or the task is
    /// aborted. It should be spawned as a separate tokio task.
    pub async fn run(&mut self) -> Result<()> {
        self.event_tx
            .send(CountdownEvent::Started {
                next: self.state.target(),
            })
            .context("Failed to send started event")?;

        let mut ticker = interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.step()?;
        }
    }

    /// Performs one tick: observe, publish, and handle expiry.
    pub fn step(&mut self) -> Result<Observation> {
        let now = self.clock.now();
        let observation = self.state.observe(now);

        self.event_tx
            .send(CountdownEvent::Tick {
                remaining: observation.remaining,
                next: self.state.target(),
            })
            .context("Failed to send tick event")?;

        if let Some(kind) = observation.expired {
            self.handle_expiry(kind, now)?;
        }

        Ok(observation)
    }

    /// Publishes the expiry and derives the following boundary.
    fn handle_expiry(&mut self, kind: BoundaryKind, now: NaiveDateTime) -> Result<()> {
        info!("Boundary reached: {}", kind.as_str());

        self.event_tx
            .send(CountdownEvent::Expired { kind })
            .context("Failed to send expired event")?;

        let next = next_event(self.fajr, self.maghrib, now);
        self.state.retarget(next);
        debug!("Next boundary: {} at {}", next.kind.as_str(), next.at);

        self.event_tx
            .send(CountdownEvent::Retargeted { next })
            .context("Failed to send retargeted event")?;

        Ok(())
    }
}

// ============================================================================
// CountdownHandle
// ============================================================================

/// Owns the spawned countdown task. Dropping it cancels the task.
#[derive(Debug)]
pub struct CountdownHandle {
    task: JoinHandle<Result<()>>,
}

impl CountdownHandle {
    /// Spawns the engine's run loop on the current runtime.
    pub fn spawn<C>(mut engine: CountdownEngine<C>) -> Self
    where
        C: Clock + 'static,
    {
        let task = tokio::spawn(async move { engine.run().await });
        Self { task }
    }

    /// Stops the countdown. No further events are published.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Returns true once the task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ============================================================================
// Tests
// ============================================================================
