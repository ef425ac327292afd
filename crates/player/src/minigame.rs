//! The tension minigame state machine.
//!
//! One attempt is a fixed-interval tick loop over a single `held` input.
//! Tension rises while held and falls while released; the player's job is
//! to keep it inside the safe zone long enough to land the fish. All the
//! timing lives in tick counts, so the machine never reads a clock and a
//! test can step it deterministically.
//!
//! Landing rule: accumulating the target amount of in-zone time hooks the
//! fish. The attempt keeps running from there, and whatever ends it next
//! (drifting out of the zone, the danger threshold, an input held or
//! released too long) finalizes the catch. Time banked past the target at
//! that moment is the quality margin.

use driftline_domain::CastQuality;

/// Milliseconds between ticks.
pub const TICK_MS: u32 = 50;

/// Tension change per tick, up while held, down while released.
const TENSION_DELTA: f64 = 2.0;

const TENSION_START: f64 = 50.0;
const TENSION_MIN: f64 = 0.0;
const TENSION_MAX: f64 = 100.0;

/// Inclusive bounds of the safe zone.
const ZONE_FLOOR: f64 = 40.0;
const ZONE_CEIL: f64 = 70.0;

/// Tension at or above this ends the attempt immediately.
const DANGER_THRESHOLD: f64 = 90.0;

/// Longest continuous hold before the line snaps.
const MAX_HOLD_MS: u32 = 2000;

/// Longest continuous release before the fish slips off.
const MAX_RELEASE_MS: u32 = 1500;

/// In-zone time needed to hook the fish.
const TARGET_PROGRESS_MS: u32 = 3000;

/// Out-of-zone decay per tick, half the in-zone gain.
const PROGRESS_DECAY_MS: u32 = TICK_MS / 2;

/// Margin past the target for each quality tier.
const PERFECT_MARGIN_MS: u32 = 1000;
const GOOD_MARGIN_MS: u32 = 400;

/// How long a terminal result is displayed before the machine resets.
const RESULT_COOLDOWN_MS: u32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first press.
    Idle,
    /// An attempt is running.
    Active,
    /// Terminal: the fish was landed at the given quality.
    Caught(CastQuality),
    /// Terminal: the fish got away.
    Escaped,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Caught(_) | Phase::Escaped)
    }
}

#[derive(Debug)]
pub struct TensionGame {
    phase: Phase,
    tension: f64,
    progress_ms: u32,
    hold_ms: u32,
    release_ms: u32,
    cooldown_ms: u32,
}

impl TensionGame {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            tension: TENSION_START,
            progress_ms: 0,
            hold_ms: 0,
            release_ms: 0,
            cooldown_ms: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current tension, for rendering.
    pub fn tension(&self) -> f64 {
        self.tension
    }

    /// Fraction of the target banked so far, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        f64::from(self.progress_ms.min(TARGET_PROGRESS_MS)) / f64::from(TARGET_PROGRESS_MS)
    }

    /// Advance one tick. Returns the phase after the tick.
    pub fn tick(&mut self, held: bool) -> Phase {
        match self.phase {
            Phase::Idle => {
                if held {
                    self.begin_attempt();
                }
            }
            Phase::Active => self.tick_active(held),
            Phase::Caught(_) | Phase::Escaped => {
                self.cooldown_ms = self.cooldown_ms.saturating_sub(TICK_MS);
                if self.cooldown_ms == 0 {
                    *self = Self::new();
                }
            }
        }
        self.phase
    }

    fn begin_attempt(&mut self) {
        self.phase = Phase::Active;
        self.tension = TENSION_START;
        self.progress_ms = 0;
        self.hold_ms = 0;
        self.release_ms = 0;
    }

    fn tick_active(&mut self, held: bool) {
        let delta = if held { TENSION_DELTA } else { -TENSION_DELTA };
        self.tension = (self.tension + delta).clamp(TENSION_MIN, TENSION_MAX);

        // Each accumulator resets the moment the opposing input resumes.
        if held {
            self.hold_ms += TICK_MS;
            self.release_ms = 0;
        } else {
            self.release_ms += TICK_MS;
            self.hold_ms = 0;
        }

        let in_zone = (ZONE_FLOOR..=ZONE_CEIL).contains(&self.tension);
        let hooked = self.progress_ms >= TARGET_PROGRESS_MS;
        let failure = self.tension >= DANGER_THRESHOLD
            || self.hold_ms > MAX_HOLD_MS
            || self.release_ms > MAX_RELEASE_MS;

        if hooked {
            // The threshold was reached first, so anything that ends the
            // attempt now lands the fish.
            if failure || !in_zone {
                self.finish(Phase::Caught(self.classify()));
            } else {
                self.progress_ms += TICK_MS;
            }
            return;
        }

        if failure {
            self.finish(Phase::Escaped);
            return;
        }

        if in_zone {
            self.progress_ms += TICK_MS;
        } else {
            self.progress_ms = self.progress_ms.saturating_sub(PROGRESS_DECAY_MS);
        }
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.cooldown_ms = RESULT_COOLDOWN_MS;
    }

    fn classify(&self) -> CastQuality {
        let margin = self.progress_ms - TARGET_PROGRESS_MS;
        if margin >= PERFECT_MARGIN_MS {
            CastQuality::Perfect
        } else if margin >= GOOD_MARGIN_MS {
            CastQuality::Good
        } else {
            CastQuality::Normal
        }
    }
}

impl Default for TensionGame {
    fn default() -> Self {
        Self::new()
    }
}
