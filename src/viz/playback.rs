//! Auto-advance through recorded iterations.

use std::time::Duration;

use tracing::debug;

/// Playback speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    Quarter,
    Half,
    Normal,
    Double,
    Quadruple,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 5] = [
        PlaybackSpeed::Quarter,
        PlaybackSpeed::Half,
        PlaybackSpeed::Normal,
        PlaybackSpeed::Double,
        PlaybackSpeed::Quadruple,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            PlaybackSpeed::Quarter => 0.25,
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Quadruple => 4.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackSpeed::Quarter => "0.25×",
            PlaybackSpeed::Half => "0.5×",
            PlaybackSpeed::Normal => "1×",
            PlaybackSpeed::Double => "2×",
            PlaybackSpeed::Quadruple => "4×",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
    Finished,
}

/// Cursor over the recorded iteration keys that emits the next key on a fixed interval.
///
/// Playback only proposes iterations; the caller feeds them to the transition controller.
#[derive(Debug, Clone)]
pub struct Playback {
    iterations: Vec<u64>,
    cursor: usize,
    state: PlaybackState,
    speed: PlaybackSpeed,
    interval: Duration,
    elapsed: f64,
    loop_enabled: bool,
}

impl Playback {
    pub fn new(iterations: impl IntoIterator<Item = u64>, interval: Duration) -> Self {
        Self {
            iterations: iterations.into_iter().collect(),
            cursor: 0,
            state: PlaybackState::Stopped,
            speed: PlaybackSpeed::Normal,
            interval,
            elapsed: 0.0,
            loop_enabled: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current(&self) -> Option<u64> {
        self.iterations.get(self.cursor).copied()
    }

    /// Starts playing; from the last iteration it rewinds to the first one.
    pub fn play(&mut self) -> Option<u64> {
        let mut rewound = None;
        if self.cursor + 1 >= self.iterations.len() {
            self.cursor = 0;
            rewound = self.current();
        }
        self.elapsed = 0.0;
        self.state = PlaybackState::Playing;
        rewound
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn stop(&mut self) -> Option<u64> {
        self.cursor = 0;
        self.elapsed = 0.0;
        self.state = PlaybackState::Stopped;
        self.current()
    }

    /// Moves the cursor to a recorded iteration; unrecorded values are ignored.
    pub fn seek(&mut self, iteration: u64) {
        if let Ok(position) = self.iterations.binary_search(&iteration) {
            self.cursor = position;
            self.elapsed = 0.0;
        }
    }

    pub fn step_forward(&mut self) -> Option<u64> {
        if self.cursor + 1 < self.iterations.len() {
            self.cursor += 1;
        } else if self.loop_enabled && !self.iterations.is_empty() {
            self.cursor = 0;
        } else {
            if self.state == PlaybackState::Playing {
                self.state = PlaybackState::Finished;
            }
            return None;
        }
        self.current()
    }

    pub fn step_backward(&mut self) -> Option<u64> {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.loop_enabled && !self.iterations.is_empty() {
            self.cursor = self.iterations.len() - 1;
        } else {
            return None;
        }
        self.elapsed = 0.0;
        self.current()
    }

    /// Advances the playback clock and returns the iteration to select, if one is due.
    pub fn tick(&mut self, delta_seconds: f64) -> Option<u64> {
        if self.state != PlaybackState::Playing {
            return None;
        }

        let interval = self.interval.as_secs_f64() / self.speed.multiplier();
        self.elapsed += delta_seconds.max(0.0);
        if self.elapsed < interval {
            return None;
        }
        self.elapsed = 0.0;

        let next = self.step_forward();
        match next {
            Some(iteration) => debug!(iteration, "playback advanced"),
            None => debug!("playback finished"),
        }
        next
    }

    /// Fraction of the recorded iterations already passed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.iterations.len() <= 1 {
            1.0
        } else {
            self.cursor as f64 / (self.iterations.len() - 1) as f64
        }
    }
}
