use crate::constants::SCORE_NUMERATOR;
use crate::entities::Entity;

/// Axis-aligned overlap between two entities' bounding boxes. Touching edges
/// count as a hit. Ignores the active flag; see [`collides`].
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Entity + ?Sized,
    B: Entity + ?Sized,
{
    a.bounds().intersects(&b.bounds())
}

/// Overlap between two entities that are both still in play.
pub fn collides<A, B>(a: &A, b: &B) -> bool
where
    A: Entity + ?Sized,
    B: Entity + ?Sized,
{
    a.is_active() && b.is_active() && overlaps(a, b)
}

/// Points for destroying an enemy of the given radius; smaller enemies are
/// worth more.
pub fn score_delta(enemy_radius: f64) -> u32 {
    if enemy_radius <= 0.0 {
        return 0;
    }
    (SCORE_NUMERATOR / enemy_radius).floor() as u32
}
