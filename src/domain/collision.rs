// Axis-aligned overlap tests for craft and projectile hit checks.

use crate::domain::geometry::Rect;

/// True when the two boxes overlap on both axes. Strict comparisons, so
/// boxes sharing only an edge do not count as touching.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.right > b.left && a.left < b.right && a.bottom > b.top && a.top < b.bottom
}
