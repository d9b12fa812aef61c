//! Movement domain: avian2d-backed collision probe and pushable scan.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::host::CollisionQuery;
use crate::movement::probe::{Bounds, CollisionProbe, ContactKind, PushableTarget, Side};
use crate::movement::{GameLayer, MovementTuning};

/// Most bodies reported per side by the pushable scan.
const MAX_SIDE_HITS: u32 = 8;

/// Trims the ground box so hugging a wall does not read as standing on it.
const GROUND_PROBE_SKIN: f32 = 1.0;

/// Spatial queries for one player, borrowed for a single motor tick.
pub(crate) struct AvianCollisions<'a, 'w, 's> {
    pub spatial: &'a SpatialQuery<'w, 's>,
    pub player: Entity,
    /// Current velocity of a body if it is tagged `Pushable`.
    pub crate_velocity: &'a dyn Fn(Entity) -> Option<Vec2>,
}

impl AvianCollisions<'_, '_, '_> {
    fn terrain_filter(&self) -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall])
            .with_excluded_entities([self.player])
    }

    fn wall_distance(&self, bounds: Bounds, direction: Dir2, reach: f32) -> Option<f32> {
        self.spatial
            .cast_ray(bounds.center, direction, reach, true, &self.terrain_filter())
            .map(|hit| hit.distance)
    }

    fn side_contacts(
        &self,
        bounds: Bounds,
        side: Side,
        reach: f32,
    ) -> Vec<PushableTarget<Entity>> {
        let direction = match side {
            Side::Left => Dir2::NEG_X,
            Side::Right => Dir2::X,
        };
        let filter = SpatialQueryFilter::from_mask([
            GameLayer::Pushable,
            GameLayer::Ground,
            GameLayer::Wall,
        ])
        .with_excluded_entities([self.player]);

        let mut hits =
            self.spatial
                .ray_hits(bounds.center, direction, reach, MAX_SIDE_HITS, true, &filter);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        hits.into_iter()
            .map(|hit| match (self.crate_velocity)(hit.entity) {
                Some(velocity) => PushableTarget {
                    handle: hit.entity,
                    side,
                    kind: ContactKind::Pushable,
                    velocity,
                },
                None => PushableTarget {
                    handle: hit.entity,
                    side,
                    kind: ContactKind::Solid,
                    velocity: Vec2::ZERO,
                },
            })
            .collect()
    }
}

impl CollisionQuery for AvianCollisions<'_, '_, '_> {
    type Handle = Entity;

    fn probe(&self, bounds: Bounds, tuning: &MovementTuning) -> CollisionProbe {
        let filter = SpatialQueryFilter::from_mask([
            GameLayer::Ground,
            GameLayer::Wall,
            GameLayer::Pushable,
        ])
        .with_excluded_entities([self.player]);

        // Box cast the collider shape a short distance down
        let box_width = (bounds.size.x - 2.0 * GROUND_PROBE_SKIN).max(1.0);
        let ground_box = Collider::rectangle(box_width, bounds.size.y);
        let grounded = self
            .spatial
            .cast_shape(
                &ground_box,
                bounds.center,
                0.0,
                Dir2::NEG_Y,
                &ShapeCastConfig::from_max_distance(tuning.ground_probe_distance),
                &filter,
            )
            .is_some();

        let reach = tuning.wall_reach(bounds.half_width());
        CollisionProbe {
            grounded,
            left_wall: self.wall_distance(bounds, Dir2::NEG_X, reach),
            right_wall: self.wall_distance(bounds, Dir2::X, reach),
        }
    }

    fn pushables(&self, bounds: Bounds, tuning: &MovementTuning) -> Vec<PushableTarget<Entity>> {
        let reach = tuning.wall_reach(bounds.half_width());
        let mut contacts = self.side_contacts(bounds, Side::Left, reach);
        contacts.extend(self.side_contacts(bounds, Side::Right, reach));
        contacts
    }
}
