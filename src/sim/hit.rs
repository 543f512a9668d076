//! Spatial hit query
//!
//! Answers "what is under this point" for live objects. Results are tagged
//! with the owning object's id, so a bomb child resolves to its container by
//! lookup rather than through a parent pointer.

use glam::Vec2;

use super::state::{HitPart, SpawnedObject};
use crate::point_in_circle;

/// One object region under a query point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    /// Owning object in the registry
    pub object_id: u32,
    pub part: HitPart,
}

/// All live hit regions containing `point`, in registry order
pub fn targets_at(objects: &[SpawnedObject], point: Vec2) -> Vec<HitTarget> {
    objects
        .iter()
        .filter(|o| o.alive && point_in_circle(point, o.target_center(), o.target.radius))
        .map(|o| HitTarget {
            object_id: o.id,
            part: o.target.part,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObjectKind;

    fn object(id: u32, kind: ObjectKind, x: f32) -> SpawnedObject {
        SpawnedObject::new(id, kind, Vec2::new(x, 300.0), Vec2::ZERO, 0.0, 64.0)
    }

    #[test]
    fn test_overlapping_objects_all_hit() {
        let objects = vec![
            object(1, ObjectKind::Enemy, 100.0),
            object(2, ObjectKind::Enemy, 140.0),
            object(3, ObjectKind::BombContainer, 500.0),
        ];
        let hits = targets_at(&objects, Vec2::new(120.0, 300.0));
        assert_eq!(
            hits,
            vec![
                HitTarget { object_id: 1, part: HitPart::Enemy },
                HitTarget { object_id: 2, part: HitPart::Enemy },
            ]
        );
    }

    #[test]
    fn test_bomb_hit_names_container() {
        let objects = vec![object(7, ObjectKind::BombContainer, 500.0)];
        let hits = targets_at(&objects, Vec2::new(510.0, 290.0));
        assert_eq!(hits, vec![HitTarget { object_id: 7, part: HitPart::Bomb }]);
    }

    #[test]
    fn test_dead_objects_are_skipped() {
        let mut dead = object(1, ObjectKind::Enemy, 100.0);
        dead.alive = false;
        assert!(targets_at(&[dead], Vec2::new(100.0, 300.0)).is_empty());
    }
}
