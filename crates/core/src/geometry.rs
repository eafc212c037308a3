//! Polygon helpers: centroid, bounding box, triangulation, placement and mirroring.

use serde::{Deserialize, Serialize};

use crate::error::InkError;
use crate::point::{Point, Polyline};

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Mean of all points.
pub fn midpoint(points: &[Point]) -> Result<Point, InkError> {
    if points.is_empty() {
        return Err(InkError::InsufficientPoints { needed: 1, got: 0 });
    }
    let n = points.len() as f64;
    Ok(points
        .iter()
        .fold(Point::ORIGIN, |acc, p| Point::new(acc.x + p.x / n, acc.y + p.y / n)))
}

/// Smallest axis-aligned box containing every point.
pub fn bounding_box(points: &[Point]) -> Result<BoundingBox, InkError> {
    let first = points
        .first()
        .ok_or(InkError::InsufficientPoints { needed: 1, got: 0 })?;
    let init = BoundingBox {
        min_x: first.x,
        max_x: first.x,
        min_y: first.y,
        max_y: first.y,
    };
    Ok(points.iter().fold(init, |b, p| BoundingBox {
        min_x: b.min_x.min(p.x),
        max_x: b.max_x.max(p.x),
        min_y: b.min_y.min(p.y),
        max_y: b.max_y.max(p.y),
    }))
}

/// Moves a locally built polyline so its origin lands on `origin`.
pub fn to_global(origin: Point, points: &[Point]) -> Polyline {
    let by = origin - Point::ORIGIN;
    points.iter().map(|&p| p + by).collect()
}

/// Mirrors points horizontally about the vertical line `x = axis`.
pub fn flip_horizontal(points: &[Point], axis: f64) -> Polyline {
    points.iter().map(|p| Point::new(2.0 * axis - p.x, p.y)).collect()
}

/// Triangulation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangulateConfig {
    /// If set, triangles larger than this are split at their longest edge
    /// until none is, or until [`MAX_REFINE_DEPTH`] halvings. Triangles
    /// whose area is not finite are kept as they are.
    pub max_area: Option<f64>,
}

/// Most times a single triangle is halved during `max_area` refinement.
pub const MAX_REFINE_DEPTH: u32 = 12;

/// A triangle as three corner points.
pub type Triangle = [Point; 3];

/// Unsigned area of a triangle.
pub fn triangle_area(t: &Triangle) -> f64 {
    cross(t[0], t[1], t[2]).abs() / 2.0
}

/// Ear-clipping triangulation of a simple polygon in either winding.
///
/// A repeated closing point is ignored. Collinear runs that leave no valid
/// ear are finished with a fan so the call always terminates.
pub fn triangulate(
    polygon: &[Point],
    config: &TriangulateConfig,
) -> Result<Vec<Triangle>, InkError> {
    if let Some(limit) = config.max_area {
        if limit.is_nan() || limit <= 0.0 {
            return Err(InkError::InvalidParameter {
                name: "max_area".into(),
                reason: "must be positive".into(),
            });
        }
    }

    let mut ring: Vec<Point> = polygon.to_vec();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 {
        return Err(InkError::InsufficientPoints {
            needed: 3,
            got: ring.len(),
        });
    }
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }

    let mut triangles = Vec::with_capacity(ring.len() - 2);
    while ring.len() > 3 {
        match find_ear(&ring) {
            Some(i) => {
                let n = ring.len();
                triangles.push([ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]]);
                ring.remove(i);
            }
            None => {
                for i in 1..ring.len() - 1 {
                    triangles.push([ring[0], ring[i], ring[i + 1]]);
                }
                ring.clear();
            }
        }
    }
    if ring.len() == 3 {
        triangles.push([ring[0], ring[1], ring[2]]);
    }

    Ok(match config.max_area {
        Some(limit) => triangles
            .into_iter()
            .flat_map(|t| refine(t, limit, MAX_REFINE_DEPTH))
            .collect(),
        None => triangles,
    })
}

/// Twice the signed area; positive for counter-clockwise in a y-up frame.
fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn find_ear(ring: &[Point]) -> Option<usize> {
    let n = ring.len();
    (0..n).find(|&i| {
        let (a, b, c) = (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]);
        if cross(a, b, c) <= 0.0 {
            return false;
        }
        ring.iter().enumerate().all(|(j, &p)| {
            j == i || j == (i + n - 1) % n || j == (i + 1) % n || !inside(a, b, c, p)
        })
    })
}

fn inside(a: Point, b: Point, c: Point, p: Point) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

fn refine(t: Triangle, limit: f64, depth: u32) -> Vec<Triangle> {
    let area = triangle_area(&t);
    if depth == 0 || !area.is_finite() || area <= limit {
        return vec![t];
    }
    let edge = (0..3)
        .max_by(|&i, &j| {
            let li = t[i].distance(t[(i + 1) % 3]);
            let lj = t[j].distance(t[(j + 1) % 3]);
            li.total_cmp(&lj)
        })
        .unwrap_or(0);
    let (a, b, c) = (t[edge], t[(edge + 1) % 3], t[(edge + 2) % 3]);
    let m = a.lerp(b, 0.5);
    let mut out = refine([a, m, c], limit, depth - 1);
    out.extend(refine([m, b, c], limit, depth - 1));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    fn total_area(ts: &[Triangle]) -> f64 {
        ts.iter().map(triangle_area).sum()
    }

    #[test]
    fn midpoint_is_mean() {
        assert_eq!(midpoint(&square()).unwrap(), Point::new(5.0, 5.0));
        assert!(midpoint(&[]).is_err());
    }

    #[test]
    fn bounding_box_of_square() {
        let b = bounding_box(&square()).unwrap();
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 10.0);
        assert_eq!(b.center(), Point::new(5.0, 5.0));
        assert!(b.contains(Point::new(3.0, 7.0)));
        assert!(!b.contains(Point::new(-1.0, 7.0)));
    }

    #[test]
    fn bounding_box_of_empty_is_error() {
        assert!(bounding_box(&[]).is_err());
    }

    #[test]
    fn to_global_places_local_origin() {
        let local = vec![Point::ORIGIN, Point::new(1.0, -2.0)];
        let placed = to_global(Point::new(100.0, 200.0), &local);
        assert_eq!(placed, vec![Point::new(100.0, 200.0), Point::new(101.0, 198.0)]);
    }

    #[test]
    fn flip_mirrors_about_axis_and_is_involutive() {
        let pts = vec![Point::new(2.0, 1.0), Point::new(7.0, 3.0)];
        let flipped = flip_horizontal(&pts, 5.0);
        assert_eq!(flipped, vec![Point::new(8.0, 1.0), Point::new(3.0, 3.0)]);
        assert_eq!(flip_horizontal(&flipped, 5.0), pts);
    }

    #[test]
    fn square_triangulates_into_two() {
        let ts = triangulate(&square(), &TriangulateConfig::default()).unwrap();
        assert_eq!(ts.len(), 2);
        assert!((total_area(&ts) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn clockwise_and_closed_input_is_accepted() {
        let mut ring = square();
        ring.reverse();
        ring.push(ring[0]);
        let ts = triangulate(&ring, &TriangulateConfig::default()).unwrap();
        assert_eq!(ts.len(), 2);
    }

    #[test]
    fn concave_polygon_area_is_preserved() {
        // L-shape, area 75
        let l = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let ts = triangulate(&l, &TriangulateConfig::default()).unwrap();
        assert_eq!(ts.len(), 4);
        assert!((total_area(&ts) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn max_area_refines_large_triangles() {
        let config = TriangulateConfig {
            max_area: Some(10.0),
        };
        let ts = triangulate(&square(), &config).unwrap();
        assert!(ts.len() > 2);
        assert!(ts.iter().all(|t| triangle_area(t) <= 10.0));
        assert!((total_area(&ts) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn refinement_stops_on_overflowing_coordinates() {
        let huge = vec![
            Point::new(-1e200, 0.0),
            Point::new(1e200, 0.0),
            Point::new(0.0, 1e200),
        ];
        let config = TriangulateConfig {
            max_area: Some(1.0),
        };
        let ts = triangulate(&huge, &config).unwrap();
        assert_eq!(ts.len(), 1);
    }

    #[test]
    fn refinement_depth_is_capped() {
        let big = vec![
            Point::new(0.0, 0.0),
            Point::new(1e6, 0.0),
            Point::new(0.0, 1e6),
        ];
        let config = TriangulateConfig {
            max_area: Some(1e-6),
        };
        let ts = triangulate(&big, &config).unwrap();
        assert_eq!(ts.len(), 1 << MAX_REFINE_DEPTH);
        assert!((total_area(&ts) - 5e11).abs() < 1e3);
    }

    #[test]
    fn non_positive_max_area_is_rejected() {
        let config = TriangulateConfig {
            max_area: Some(0.0),
        };
        assert!(triangulate(&square(), &config).is_err());
    }

    #[test]
    fn collinear_ring_terminates() {
        let line = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        let ts = triangulate(&line, &TriangulateConfig::default()).unwrap();
        assert_eq!(ts.len(), 2);
        assert!(total_area(&ts) < 1e-12);
    }

    #[test]
    fn too_few_points_is_error() {
        let two = vec![Point::ORIGIN, Point::new(1.0, 1.0)];
        assert!(triangulate(&two, &TriangulateConfig::default()).is_err());
    }
}
