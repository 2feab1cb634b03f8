//! Baked animation output
//!
//! A finished simulation is handed to a player as one keyframe track per body,
//! all meant to play in parallel. Times are normalized to [0, 1] over the
//! simulated duration; values are absolute translate/rotation channel values.

use serde::{Deserialize, Serialize};

use super::body::BodyId;
use crate::error::Result;
use crate::shape::Bounds;

/// A single (time, value) sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Normalized time in [0, 1]
    pub t: f32,
    pub value: f32,
}

/// Keyframes for one animated property, in ascending time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub keys: Vec<Keyframe>,
}

impl Channel {
    /// Append a key. Callers record in time order.
    pub fn push(&mut self, t: f32, value: f32) {
        debug_assert!(self.keys.last().is_none_or(|k| k.t <= t));
        self.keys.push(Keyframe { t, value });
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn first(&self) -> Option<f32> {
        self.keys.first().map(|k| k.value)
    }

    pub fn last(&self) -> Option<f32> {
        self.keys.last().map(|k| k.value)
    }

    /// (min, max) over all values
    pub fn range(&self) -> Option<(f32, f32)> {
        let first = self.first()?;
        Some(
            self.keys
                .iter()
                .fold((first, first), |(lo, hi), k| (lo.min(k.value), hi.max(k.value))),
        )
    }

    /// Linearly interpolated value at `t`, held constant outside the keyed range
    pub fn sample(&self, t: f32) -> Option<f32> {
        let first = self.keys.first()?;
        if t <= first.t {
            return Some(first.value);
        }
        let next = self.keys.partition_point(|k| k.t <= t);
        if next >= self.keys.len() {
            return self.last();
        }
        let (k0, k1) = (self.keys[next - 1], self.keys[next]);
        let span = k1.t - k0.t;
        if span <= 0.0 {
            return Some(k1.value);
        }
        let u = (t - k0.t) / span;
        Some(k0.value + (k1.value - k0.value) * u)
    }
}

/// Motion of one body over a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack {
    pub body: BodyId,
    pub translate_x: Channel,
    pub translate_y: Channel,
    /// Radians
    pub rotation: Channel,
    /// Area swept by the body's shape over the run (ignores rotation)
    pub bounds: Bounds,
}

/// Per-body tracks played in parallel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BakedAnimation {
    pub tracks: Vec<KeyframeTrack>,
    /// Union of every track's swept bounds; `None` for an empty world
    pub bounds: Option<Bounds>,
}

impl BakedAnimation {
    pub fn new(tracks: Vec<KeyframeTrack>) -> Self {
        let bounds = tracks
            .iter()
            .map(|t| t.bounds)
            .reduce(|acc, b| acc.union(&b));
        Self { tracks, bounds }
    }

    pub fn track(&self, body: BodyId) -> Option<&KeyframeTrack> {
        self.tracks.iter().find(|t| t.body == body)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(keys: &[(f32, f32)]) -> Channel {
        let mut c = Channel::default();
        for &(t, v) in keys {
            c.push(t, v);
        }
        c
    }

    #[test]
    fn test_sample_interpolates() {
        let c = channel(&[(0.0, 0.0), (0.5, 10.0), (1.0, 30.0)]);
        assert_eq!(c.sample(0.25), Some(5.0));
        assert_eq!(c.sample(0.75), Some(20.0));
        assert_eq!(c.sample(0.5), Some(10.0));
    }

    #[test]
    fn test_sample_clamps() {
        let c = channel(&[(0.1, 4.0), (0.9, 8.0)]);
        assert_eq!(c.sample(0.0), Some(4.0));
        assert_eq!(c.sample(1.0), Some(8.0));
        assert_eq!(Channel::default().sample(0.5), None);
    }

    #[test]
    fn test_range() {
        let c = channel(&[(0.0, 3.0), (0.5, -2.0), (1.0, 7.0)]);
        assert_eq!(c.range(), Some((-2.0, 7.0)));
        assert_eq!(Channel::default().range(), None);
    }

    #[test]
    fn test_animation_bounds_union() {
        let track = |body, bounds| KeyframeTrack {
            body,
            translate_x: Channel::default(),
            translate_y: Channel::default(),
            rotation: Channel::default(),
            bounds,
        };
        let anim = BakedAnimation::new(vec![
            track(0, Bounds::new(0.0, 0.0, 10.0, 10.0)),
            track(1, Bounds::new(20.0, -5.0, 5.0, 5.0)),
        ]);
        assert_eq!(anim.bounds, Some(Bounds::new(0.0, -5.0, 25.0, 15.0)));
        assert!(anim.track(1).is_some());
        assert!(anim.track(2).is_none());

        assert_eq!(BakedAnimation::new(Vec::new()).bounds, None);
    }

    #[test]
    fn test_to_json() {
        let anim = BakedAnimation::new(Vec::new());
        let json = anim.to_json().unwrap();
        let back: BakedAnimation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, anim);
    }
}
