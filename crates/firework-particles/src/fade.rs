//! Time-based opacity fades
//!
//! A fade is a plain descriptor sampled against the simulation clock during
//! the update pass. There is no scheduler: assigning a new descriptor to a
//! particle is all it takes to cancel the old one.

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized fade progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^2`: fast start, gentle finish
    #[default]
    QuadOut,
}

impl Easing {
    /// Map `t` in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
        }
    }
}

/// What happens to the particle when its fade completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeAction {
    /// Return the particle's slot to the pool
    Release,
}

/// Interpolates alpha from `from` to `to` over `[start, start + duration]` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    pub start: f64,
    pub duration: f64,
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
    pub on_complete: Option<FadeAction>,
}

impl Fade {
    pub fn new(start: f64, duration: f64, from: f32, to: f32, easing: Easing) -> Self {
        Self {
            start,
            duration,
            from,
            to,
            easing,
            on_complete: None,
        }
    }

    pub fn on_complete(mut self, action: FadeAction) -> Self {
        self.on_complete = Some(action);
        self
    }

    /// Normalized progress in [0, 1] at time `now`
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Alpha value at time `now`
    pub fn sample(&self, now: f64) -> f32 {
        if self.is_finished(now) {
            return self.to;
        }
        let t = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.start >= self.duration
    }

    pub fn end_time(&self) -> f64 {
        self.start + self.duration
    }
}
