//! Frame scheduling strategies.
//!
//! A [`FrameSource`] decides when the next frame is due and reports the real
//! time elapsed since the previous one. The variant is picked once at
//! startup from the terminal's capabilities and never re-evaluated.

use std::env;
use std::io::{self, IsTerminal};
use std::time::{Duration, Instant};

use snowfall_config::FrameSourceKind;

/// What the output terminal can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Output is an interactive terminal able to keep up with refresh-rate frames.
    pub interactive: bool,
}

impl Capabilities {
    /// Inspect stdout and `TERM`.
    pub fn detect() -> Self {
        let dumb = env::var("TERM").is_ok_and(|term| term == "dumb");
        Self {
            interactive: io::stdout().is_terminal() && !dumb,
        }
    }
}

/// Frame durations for each strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
    /// Target frame time for native pacing.
    pub frame_budget: Duration,
    /// Period of the fixed-interval timer.
    pub interval: Duration,
}

/// Source of animation frames.
#[derive(Debug, Clone)]
pub enum FrameSource {
    /// Paced at the display refresh budget, relative to the previous frame.
    Native {
        budget: Duration,
        last_frame: Option<Instant>,
    },
    /// Fixed-interval timer. Deadlines stay on a fixed grid and missed ticks
    /// are dropped, not replayed.
    Interval {
        period: Duration,
        last_frame: Option<Instant>,
        next_deadline: Option<Instant>,
    },
}

impl FrameSource {
    /// Pick a frame source. `Auto` prefers native pacing on interactive
    /// terminals and falls back to the interval timer.
    pub fn select(kind: FrameSourceKind, caps: Capabilities, timing: FrameTiming) -> Self {
        let native = match kind {
            FrameSourceKind::Native => true,
            FrameSourceKind::Interval => false,
            FrameSourceKind::Auto => caps.interactive,
        };
        if native {
            Self::native(timing.frame_budget)
        } else {
            Self::interval(timing.interval)
        }
    }

    pub fn native(budget: Duration) -> Self {
        Self::Native {
            budget,
            last_frame: None,
        }
    }

    pub fn interval(period: Duration) -> Self {
        Self::Interval {
            period,
            last_frame: None,
            next_deadline: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Native { .. } => "native",
            Self::Interval { .. } => "interval",
        }
    }

    /// Forget the previous frame: the next one is due immediately and
    /// reports a zero delta.
    pub fn reset(&mut self) {
        match self {
            Self::Native { last_frame, .. } => *last_frame = None,
            Self::Interval {
                last_frame,
                next_deadline,
                ..
            } => {
                *last_frame = None;
                *next_deadline = None;
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        match self {
            Self::Native { budget, last_frame } => last_frame.map(|t| t + *budget),
            Self::Interval { next_deadline, .. } => *next_deadline,
        }
    }

    /// How long until the next frame is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_deadline()
            .map_or(Duration::ZERO, |deadline| deadline.saturating_duration_since(now))
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.time_until_next(now).is_zero()
    }

    /// Record a frame at `now` and return the milliseconds elapsed since the
    /// previous one (zero for the first frame).
    pub fn mark_frame(&mut self, now: Instant) -> f64 {
        let (last_frame, delta) = match self {
            Self::Native { last_frame, .. } => {
                let delta = elapsed_ms(*last_frame, now);
                (last_frame, delta)
            }
            Self::Interval {
                period,
                last_frame,
                next_deadline,
            } => {
                let delta = elapsed_ms(*last_frame, now);
                let mut next = next_deadline.unwrap_or(now) + *period;
                while next <= now {
                    next += *period;
                }
                *next_deadline = Some(next);
                (last_frame, delta)
            }
        };
        *last_frame = Some(now);
        delta
    }
}

fn elapsed_ms(last_frame: Option<Instant>, now: Instant) -> f64 {
    last_frame.map_or(0.0, |t| now.saturating_duration_since(t).as_secs_f64() * 1000.0)
}
