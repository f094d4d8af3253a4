//! Brute-force spatial queries
//!
//! Hit-testing for interactive editing. Every query is a linear scan over the
//! arena's raw position arrays; no spatial index is built or cached, so
//! results are valid only until the next mutation.

use crate::graph::{EdgeIndex, GraphArena, NodeIndex, Point};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Box spanning two arbitrary corners (e.g. a rubber-band drag)
    pub fn from_corners(a: Point, b: Point) -> Self {
        BoundingBox {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }
}

/// Squared-distance limit for an optional search radius.
///
/// `None` when nothing can match: no distance lies within a negative or NaN
/// limit.
pub(crate) fn limit_sq(max_dist: Option<f32>) -> Option<f32> {
    match max_dist {
        None => Some(f32::INFINITY),
        Some(d) if d >= 0.0 => Some(d * d),
        Some(_) => None,
    }
}

/// Nearest node to `(x, y)` within `max_dist` (unbounded when `None`).
///
/// Compares squared distances; on equal distance the lower index wins.
pub fn find_nearest_node(
    arena: &GraphArena,
    x: f32,
    y: f32,
    max_dist: Option<f32>,
) -> Option<NodeIndex> {
    let limit = limit_sq(max_dist)?;
    let mut best: Option<(NodeIndex, f32)> = None;

    for (i, (&nx, &ny)) in arena.xs().iter().zip(arena.ys()).enumerate() {
        let dx = nx - x;
        let dy = ny - y;
        let d = dx * dx + dy * dy;
        if d > limit {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }

    best.map(|(i, _)| i)
}

/// All nodes within `radius` of `(x, y)`, boundary included, ascending
pub fn find_nodes_in_radius(arena: &GraphArena, x: f32, y: f32, radius: f32) -> Vec<NodeIndex> {
    let Some(limit) = limit_sq(Some(radius)) else {
        return Vec::new();
    };
    let center = Point::new(x, y);
    arena
        .xs()
        .iter()
        .zip(arena.ys())
        .enumerate()
        .filter(|(_, (&nx, &ny))| center.distance_sq(Point::new(nx, ny)) <= limit)
        .map(|(i, _)| i)
        .collect()
}

/// All nodes inside `bbox`, boundary included, ascending
pub fn find_nodes_in_box(arena: &GraphArena, bbox: &BoundingBox) -> Vec<NodeIndex> {
    arena
        .xs()
        .iter()
        .zip(arena.ys())
        .enumerate()
        .filter(|(_, (&nx, &ny))| bbox.contains(Point::new(nx, ny)))
        .map(|(i, _)| i)
        .collect()
}

/// Squared distance from `p` to the segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]`; a zero-length segment
/// degenerates to the distance to `a`.
pub fn point_segment_distance_sq(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_sq(a);
    }

    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance_sq(Point::new(a.x + t * abx, a.y + t * aby))
}

pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f32 {
    point_segment_distance_sq(p, a, b).sqrt()
}

/// Edge whose segment passes closest to `(x, y)` within `max_dist`
/// (unbounded when `None`). On equal distance the lower index wins.
pub fn find_nearest_edge(
    arena: &GraphArena,
    x: f32,
    y: f32,
    max_dist: Option<f32>,
) -> Option<EdgeIndex> {
    let limit = limit_sq(max_dist)?;
    let p = Point::new(x, y);
    let (xs, ys) = (arena.xs(), arena.ys());
    let mut best: Option<(EdgeIndex, f32)> = None;

    for (e, (&s, &t)) in arena.sources().iter().zip(arena.targets()).enumerate() {
        let (s, t) = (s as usize, t as usize);
        let a = Point::new(xs[s], ys[s]);
        let b = Point::new(xs[t], ys[t]);
        let d = point_segment_distance_sq(p, a, b);
        if d > limit {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((e, d)),
        }
    }

    best.map(|(e, _)| e)
}

/// Extent of all live nodes, `None` for an empty arena
pub fn bounds(arena: &GraphArena) -> Option<BoundingBox> {
    let mut iter = arena.xs().iter().zip(arena.ys());
    let (&x0, &y0) = iter.next()?;
    let mut bbox = BoundingBox {
        min: Point::new(x0, y0),
        max: Point::new(x0, y0),
    };
    for (&x, &y) in iter {
        bbox.min.x = bbox.min.x.min(x);
        bbox.min.y = bbox.min.y.min(y);
        bbox.max.x = bbox.max.x.max(x);
        bbox.max.y = bbox.max.y.max(y);
    }
    Some(bbox)
}
