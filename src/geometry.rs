//! Axis-aligned geometry and random helpers shared by generation and AI.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A rectangle in world units, anchored at its top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check that `other` lies entirely within this rectangle (edges may coincide)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// AABB collision test.
///
/// Separation is tested with strict inequalities, so rectangles that only
/// share an edge (or a corner) are reported as colliding.
pub fn collides(a: &Rect, b: &Rect) -> bool {
    !(a.bottom() < b.y || a.y > b.bottom() || a.right() < b.x || a.x > b.right())
}

/// Check if a point lies strictly inside a rectangle (points on the border are outside)
pub fn is_inside(point: (i32, i32), rect: &Rect) -> bool {
    let (x, y) = point;
    x > rect.x && x < rect.right() && y > rect.y && y < rect.bottom()
}

pub fn positions_match(a: (i32, i32), b: (i32, i32)) -> bool {
    a.0 == b.0 && a.1 == b.1
}

/// Straight-line distance between two points
pub fn distance(a: (i32, i32), b: (i32, i32)) -> f32 {
    Vec2::new(a.0 as f32, a.1 as f32).distance(Vec2::new(b.0 as f32, b.1 as f32))
}

/// Uniform integer in `[min, max]`, both ends inclusive
pub fn random_int_in_range(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Uniform pick from a slice, `None` when it is empty
pub fn random_item<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use proptest::prelude::*;

    #[test]
    fn test_edge_touching_rects_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(collides(&a, &b));
        assert!(collides(&b, &a));
    }

    #[test]
    fn test_corner_touching_rects_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 10, 5, 5);
        assert!(collides(&a, &b));
    }

    #[test]
    fn test_separated_rects_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!collides(&a, &Rect::new(11, 0, 10, 10)));
        assert!(!collides(&a, &Rect::new(0, 11, 10, 10)));
        assert!(!collides(&a, &Rect::new(-11, 0, 10, 10)));
        assert!(!collides(&a, &Rect::new(0, -11, 10, 10)));
    }

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(collides(&a, &Rect::new(5, 5, 10, 10)));
        assert!(collides(&a, &Rect::new(2, 2, 2, 2)));
    }

    #[test]
    fn test_is_inside_excludes_border() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(is_inside((5, 5), &rect));
        assert!(!is_inside((0, 5), &rect));
        assert!(!is_inside((10, 5), &rect));
        assert!(!is_inside((5, 10), &rect));
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance((0, 0), (3, 4)), 5.0);
        assert_eq!(distance((2, 2), (2, 2)), 0.0);
    }

    #[test]
    fn test_positions_match() {
        assert!(positions_match((3, 4), (3, 4)));
        assert!(!positions_match((3, 4), (4, 3)));
    }

    #[test]
    fn test_random_item_empty() {
        let mut rng = GameRng::new(1);
        let empty: [i32; 0] = [];
        assert!(random_item(&mut rng, &empty).is_none());
    }

    #[test]
    fn test_rect_center() {
        assert_eq!(Rect::new(0, 0, 10, 10).center(), (5, 5));
        assert_eq!(Rect::new(5, 5, 4, 6).center(), (7, 8));
    }

    proptest! {
        #[test]
        fn random_int_stays_in_range(seed in any::<u64>(), a in -50i32..50, b in -50i32..50) {
            let mut rng = GameRng::new(seed);
            let value = random_int_in_range(&mut rng, a, b);
            prop_assert!(value >= a.min(b) && value <= a.max(b));
        }

        #[test]
        fn collides_is_symmetric(
            ax in -20i32..20, ay in -20i32..20, aw in 1i32..20, ah in 1i32..20,
            bx in -20i32..20, by in -20i32..20, bw in 1i32..20, bh in 1i32..20,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }
    }
}
