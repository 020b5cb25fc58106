//! Axis-aligned collision detection
//!
//! The flyer and both halves of every gate are axis-aligned rectangles, so
//! the whole collision story is one overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict overlap test: rectangles that merely touch along an edge do not
/// collide. Symmetric in its arguments.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overlapping_rects_hit() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn disjoint_rects_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));

        // Overlap on one axis only is still a miss
        let c = Rect::new(5.0, 30.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn touching_edges_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));

        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn rect_overlaps_itself() {
        let a = Rect::new(-3.0, 7.5, 12.0, 4.0);
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn containment_is_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..400.0, ah in 0.0f32..400.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.0f32..400.0, bh in 0.0f32..400.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn nonempty_rect_overlaps_itself(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 0.1f32..400.0, h in 0.1f32..400.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(overlaps(&r, &r));
        }
    }
}
