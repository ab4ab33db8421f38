//! Axis-aligned bounding box collision
//!
//! Every gameplay entity is a square. Two boxes overlap only when all four
//! half-plane tests pass strictly, so boxes that merely touch do not collide.
//!
//! All pairs are checked every frame (player × obstacles, player × power-ups,
//! projectiles × obstacles). Entity counts stay in the tens, so there is no
//! spatial partitioning.

use glam::Vec2;

/// A square region, top-left corner plus side length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: f32,
}

impl Aabb {
    /// Box from its top-left corner
    #[inline]
    pub fn square(min: Vec2, size: f32) -> Self {
        Self { min, size }
    }

    /// Box centered on `center` (projectiles are tracked by their center)
    #[inline]
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self {
            min: center - Vec2::splat(size / 2.0),
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + Vec2::splat(self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + Vec2::splat(self.size / 2.0)
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Anything with a collision box
pub trait Bounded {
    fn bounds(&self) -> Aabb;
}

/// Check whether two entities' boxes overlap
#[inline]
pub fn collides<A: Bounded + ?Sized, B: Bounded + ?Sized>(a: &A, b: &B) -> bool {
    a.bounds().overlaps(&b.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 30.0);
        let b = Aabb::square(Vec2::new(20.0, 20.0), 30.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 30.0);
        let right = Aabb::square(Vec2::new(30.0, 0.0), 30.0);
        let below = Aabb::square(Vec2::new(0.0, 30.0), 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 30.0);
        let b = Aabb::square(Vec2::new(10.0, 100.0), 30.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_centered_box() {
        let shot = Aabb::centered(Vec2::new(130.0, 335.0), 10.0);
        assert_eq!(shot.min, Vec2::new(125.0, 330.0));
        assert_eq!(shot.center(), Vec2::new(130.0, 335.0));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, asz in 1.0f32..80.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bsz in 1.0f32..80.0,
        ) {
            let a = Aabb::square(Vec2::new(ax, ay), asz);
            let b = Aabb::square(Vec2::new(bx, by), bsz);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_box_overlaps_itself(x in -500.0f32..500.0, y in -500.0f32..500.0, size in 1.0f32..80.0) {
            let a = Aabb::square(Vec2::new(x, y), size);
            prop_assert!(a.overlaps(&a));
        }
    }
}
