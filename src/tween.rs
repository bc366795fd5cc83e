//! Cosmetic value animations
//!
//! One slot per kind: starting a tween replaces whatever was running in that
//! slot, so two animations never drive the same display value. Game state is
//! always updated immediately; tweens only affect what is shown meanwhile.

use std::collections::BTreeMap;

/// Display values that can animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TweenKind {
    /// Points counter rolling toward the new balance
    Points,
    /// Pulse on a freshly solved word
    Highlight,
}

/// Linear interpolation from `from` to `to` over `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        self.from + (self.to - self.from) * (self.elapsed / self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }
}

/// Running tweens, at most one per kind
#[derive(Debug, Clone, Default)]
pub struct Tweens {
    active: BTreeMap<TweenKind, Tween>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween, returning the one it superseded
    pub fn start(&mut self, kind: TweenKind, tween: Tween) -> Option<Tween> {
        self.active.insert(kind, tween)
    }

    pub fn value(&self, kind: TweenKind) -> Option<f32> {
        self.active.get(&kind).map(Tween::value)
    }

    pub fn is_running(&self, kind: TweenKind) -> bool {
        self.active.contains_key(&kind)
    }

    /// Advance every tween and drop the finished ones
    pub fn tick(&mut self, dt: f32) {
        for tween in self.active.values_mut() {
            tween.advance(dt);
        }
        self.active.retain(|_, t| !t.is_finished());
    }
}
