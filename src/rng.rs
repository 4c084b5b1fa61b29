//! Random number generation
//!
//! Seedable RNG wrapper plus a lazily-created global instance for code that
//! just wants "a random number" without threading an `Rng` through.

use macroquad::prelude::{Color, Vec2};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng as _, SeedableRng};
use std::sync::Mutex;
use crate::render::Rect;

/// Seedable random number generator
///
/// Same seed always produces the same sequence, which makes replays and
/// procedural content reproducible.
#[derive(Debug, Clone)]
pub struct Rng {
    inner: SmallRng,
    seed: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// Seed this generator was created (or last reseeded) with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the sequence from a new seed
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Random integer in `min..=max` (bounds may be given in either order)
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.inner.gen_range(lo..=hi)
    }

    /// Random float in `min..max`, or `min` for an empty range
    ///
    /// Non-finite bounds return `min`.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if min == max || !min.is_finite() || !max.is_finite() {
            return min;
        }
        let (lo, hi) = if min < max { (min, max) } else { (max, min) };
        let t = self.inner.gen::<f32>();
        let span = hi - lo;
        let value = if span.is_finite() { lo + span * t } else { lo * (1.0 - t) + hi * t };
        // Rounding can land exactly on `hi`
        if value < hi { value } else { lo }
    }

    /// True with probability `p` (clamped to 0..1)
    pub fn chance(&mut self, p: f32) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.inner.gen::<f32>() < p
    }

    /// Random element, `None` for an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Pick an index with probability proportional to its weight
    ///
    /// Negative weights count as zero. Returns `None` when nothing has weight.
    pub fn weighted_index(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.inner.gen::<f32>() * total;
        let mut last_positive = None;
        for (i, w) in weights.iter().enumerate() {
            let w = w.max(0.0);
            if w <= 0.0 {
                continue;
            }
            last_positive = Some(i);
            if roll < w {
                return Some(i);
            }
            roll -= w;
        }
        // Float rounding can leave a sliver past the last bucket
        last_positive
    }

    /// Random direction of length 1
    pub fn unit_vec2(&mut self) -> Vec2 {
        let angle = self.range_f32(0.0, std::f32::consts::TAU);
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Random point inside a rect
    pub fn point_in(&mut self, rect: Rect) -> Vec2 {
        Vec2::new(
            self.range_f32(rect.x, rect.right()),
            self.range_f32(rect.y, rect.bottom()),
        )
    }

    /// Random opaque-ish color with the given alpha
    pub fn color(&mut self, alpha: f32) -> Color {
        Color::new(
            self.inner.gen::<f32>(),
            self.inner.gen::<f32>(),
            self.inner.gen::<f32>(),
            alpha.clamp(0.0, 1.0),
        )
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::from_time()
    }
}

fn time_seed() -> u64 {
    // miniquad's clock works on both native and wasm
    let now = macroquad::miniquad::date::now();
    (now * 1_000_000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}

lazy_static::lazy_static! {
    static ref GLOBAL: Mutex<Rng> = Mutex::new(Rng::from_time());
}

/// Run `f` with the global generator
pub fn with<R>(f: impl FnOnce(&mut Rng) -> R) -> R {
    // A panic while holding the lock leaves the RNG itself intact
    let mut rng = GLOBAL.lock().unwrap_or_else(|e| e.into_inner());
    f(&mut rng)
}

/// Reseed the global generator
pub fn reseed(seed: u64) {
    with(|rng| rng.reseed(seed));
}

/// Global `Rng::range_i32`
pub fn range_i32(min: i32, max: i32) -> i32 {
    with(|rng| rng.range_i32(min, max))
}

/// Global `Rng::range_f32`
pub fn range_f32(min: f32, max: f32) -> f32 {
    with(|rng| rng.range_f32(min, max))
}

/// Global `Rng::chance`
pub fn chance(p: f32) -> bool {
    with(|rng| rng.chance(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..32 {
            assert_eq!(a.range_i32(0, 1000), b.range_i32(0, 1000));
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut rng = Rng::new(7);
        let first: Vec<i32> = (0..8).map(|_| rng.range_i32(0, 100)).collect();
        rng.reseed(7);
        let second: Vec<i32> = (0..8).map(|_| rng.range_i32(0, 100)).collect();
        assert_eq!(first, second);
        assert_eq!(rng.seed(), 7);
    }

    #[test]
    fn test_range_i32_inclusive_and_swapped() {
        let mut rng = Rng::new(1);
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..500 {
            let v = rng.range_i32(3, 1);
            assert!((1..=3).contains(&v));
            saw_min |= v == 1;
            saw_max |= v == 3;
        }
        assert!(saw_min && saw_max);
        assert_eq!(rng.range_i32(5, 5), 5);
    }

    #[test]
    fn test_range_f32_bounds() {
        let mut rng = Rng::new(2);
        for _ in 0..200 {
            let v = rng.range_f32(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&v));
        }
        assert_eq!(rng.range_f32(2.5, 2.5), 2.5);
    }

    #[test]
    fn test_range_f32_extreme_bounds() {
        let mut rng = Rng::new(1);
        for _ in 0..50 {
            let v = rng.range_f32(f32::MIN, f32::MAX);
            assert!(v.is_finite());
            assert!((f32::MIN..f32::MAX).contains(&v));
        }
        assert_eq!(rng.range_f32(1.0, f32::INFINITY), 1.0);
        assert!(rng.range_f32(f32::NAN, 1.0).is_nan());
        assert_eq!(rng.range_f32(-3.0, f32::NAN), -3.0);

        let p = rng.point_in(Rect::new(f32::MIN, f32::MIN, f32::MAX, f32::MAX));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = Rng::new(3);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
        assert!(!rng.chance(-3.0));
    }

    #[test]
    fn test_pick_and_weighted() {
        let mut rng = Rng::new(4);
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
        assert!(rng.pick(&[1, 2, 3]).is_some());

        assert_eq!(rng.weighted_index(&[]), None);
        assert_eq!(rng.weighted_index(&[0.0, -1.0]), None);
        for _ in 0..100 {
            assert_eq!(rng.weighted_index(&[0.0, 5.0, -2.0]), Some(1));
        }
    }

    #[test]
    fn test_unit_vec_and_point_in() {
        let mut rng = Rng::new(5);
        let v = rng.unit_vec2();
        assert!((v.length() - 1.0).abs() < 0.001);

        let rect = Rect::new(10.0, 20.0, 5.0, 5.0);
        let p = rng.point_in(rect);
        assert!(rect.contains(p.x, p.y));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = Rng::new(6);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        items.sort();
        assert_eq!(items, (0..20).collect::<Vec<_>>());
    }
}
