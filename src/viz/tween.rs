//! Clock-driven node animation with in-flight retargeting.

use std::time::Duration;

use tracing::warn;

use crate::util::lerp;

use super::mapper::NodeFrame;
use super::transition::RenderSurface;

pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Clone, Copy, Debug)]
struct Track {
    from: NodeFrame,
    to: NodeFrame,
    start: f64,
    duration: f64,
}

impl Track {
    fn settled(frame: NodeFrame) -> Self {
        Self {
            from: frame,
            to: frame,
            start: 0.0,
            duration: 0.0,
        }
    }

    fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            ((now - self.start) / self.duration).clamp(0.0, 1.0)
        }
    }

    fn sample(&self, now: f64) -> NodeFrame {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }

        let eased = ease_cubic_in_out(progress);
        NodeFrame {
            id: self.to.id,
            x: lerp(self.from.x, self.to.x, eased),
            y: lerp(self.from.y, self.to.y, eased),
            color: self.from.color.lerp(self.to.color, eased),
        }
    }
}

/// Per-node tweens sampled against an explicit clock in seconds.
///
/// Retargeting a running track restarts it from the currently sampled frame, so the
/// newest target always wins and nothing is queued.
#[derive(Clone, Debug, Default)]
pub struct NodeAnimator {
    tracks: Vec<Track>,
    now: f64,
}

impl NodeAnimator {
    pub fn new(frames: impl IntoIterator<Item = NodeFrame>) -> Self {
        let mut animator = Self::default();
        for frame in frames {
            animator.place(frame);
        }
        animator
    }

    /// Moves the clock forward to `now`; the clock never runs backwards.
    pub fn set_time(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tracks
            .iter()
            .any(|track| track.progress(self.now) < 1.0)
    }

    pub fn frames(&self) -> impl Iterator<Item = NodeFrame> + '_ {
        self.tracks.iter().map(|track| track.sample(self.now))
    }

    fn place(&mut self, frame: NodeFrame) {
        while self.tracks.len() < frame.id {
            let id = self.tracks.len();
            self.tracks.push(Track::settled(NodeFrame { id, ..frame }));
        }

        match self.tracks.get_mut(frame.id) {
            Some(track) => *track = Track::settled(frame),
            None => self.tracks.push(Track::settled(frame)),
        }
    }
}

impl RenderSurface for NodeAnimator {
    fn animate_to(&mut self, frame: NodeFrame, duration: Duration) {
        let Some(track) = self.tracks.get_mut(frame.id) else {
            warn!(id = frame.id, "animation target for unknown node, placing it directly");
            self.place(frame);
            return;
        };

        if track.to == frame {
            return;
        }

        let current = track.sample(self.now);
        *track = Track {
            from: current,
            to: frame,
            start: self.now,
            duration: duration.as_secs_f64(),
        };
    }
}

#[cfg(test)]
impl NodeAnimator {
    pub fn advance(&mut self, delta_seconds: f64) {
        self.set_time(self.now + delta_seconds.max(0.0));
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Completes every running track immediately.
    pub fn settle(&mut self) {
        for track in &mut self.tracks {
            *track = Track::settled(track.to);
        }
    }

    pub fn sample(&self, id: usize) -> Option<NodeFrame> {
        self.tracks.get(id).map(|track| track.sample(self.now))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }
}
