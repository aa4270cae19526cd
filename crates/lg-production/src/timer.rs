//! Progress bar driving every time-consuming process.

use std::fmt;

/// Lifecycle of a producer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProductionState {
    /// Not yet configured.
    #[default]
    Idle,
    Working,
    /// Manually halted; timers do not advance and producers are skipped.
    Paused,
    /// An assembler could not pull its recipe inputs.
    WaitingForResources,
    /// A cycle finished but its output did not fit.
    OutputFull,
}

impl fmt::Display for ProductionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProductionState::Idle                => "idle",
            ProductionState::Working             => "working",
            ProductionState::Paused              => "paused",
            ProductionState::WaitingForResources => "waiting_for_resources",
            ProductionState::OutputFull          => "output_full",
        };
        f.write_str(s)
    }
}

/// A progress bar that fills at `speed` units per millisecond until it
/// reaches `cost`.
///
/// `progress` never exceeds `cost`; the timer stays completed until
/// [`reset`](Self::reset).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductionTimer {
    pub progress: i32,
    pub cost:     i32,
    pub speed:    f32,
    pub state:    ProductionState,
}

impl ProductionTimer {
    /// A `Working` timer that completes after `cost / speed` milliseconds.
    pub fn new(cost: i32, speed: f32) -> Self {
        Self {
            progress: 0,
            cost,
            speed,
            state: ProductionState::Working,
        }
    }

    /// Same as [`new`](Self::new) but starting in `state`.
    pub fn with_state(cost: i32, speed: f32, state: ProductionState) -> Self {
        Self { state, ..Self::new(cost, speed) }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.progress >= self.cost
    }

    #[inline]
    pub fn reset(&mut self) {
        self.progress = 0;
    }

    /// Fill by `elapsed_ms * speed`, clamped to `cost`.
    ///
    /// No-op unless `Working` and not yet completed.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.is_completed() || self.state != ProductionState::Working {
            return;
        }
        let gained = (elapsed_ms as f32 * self.speed) as i32;
        self.progress = self.progress.saturating_add(gained).min(self.cost);
    }

    /// Switch to `state`, returning the previous state if it changed.
    pub fn set_state(&mut self, state: ProductionState) -> Option<ProductionState> {
        if self.state == state {
            return None;
        }
        let previous = self.state;
        self.state = state;
        Some(previous)
    }
}
