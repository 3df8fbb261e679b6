use std::f32::consts::TAU;

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Largest allowed distance between a true circle and its polyline outline.
const CIRCLE_TOLERANCE: f32 = 0.25;
const MIN_CIRCLE_SEGMENTS: usize = 16;

/// Shapes built from a single drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Polygon,
}

/// Geometry computed from a drag's start and end points.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: Pos2, radius: f32 },
    /// `size` may be negative on either axis when dragged up or left.
    Rectangle { corner: Pos2, size: Vec2 },
    /// Regular polygon; `vertices` already ends on its first vertex.
    Polygon { vertices: Vec<Pos2> },
}

impl Shape {
    pub fn from_drag(kind: ShapeKind, start: Pos2, end: Pos2, sides: usize) -> Self {
        match kind {
            ShapeKind::Circle => Self::circle(start, end),
            ShapeKind::Rectangle => Self::rectangle(start, end),
            ShapeKind::Polygon => Self::polygon(start, end, sides),
        }
    }

    /// Circle whose diameter is the drag.
    pub fn circle(start: Pos2, end: Pos2) -> Self {
        Self::Circle {
            center: start.lerp(end, 0.5),
            radius: start.distance(end) / 2.0,
        }
    }

    pub fn rectangle(start: Pos2, end: Pos2) -> Self {
        Self::Rectangle {
            corner: start,
            size: end - start,
        }
    }

    /// Regular polygon centered on `start` with a circumradius of the drag length.
    /// The first vertex sits at angle zero.
    pub fn polygon(start: Pos2, end: Pos2, sides: usize) -> Self {
        let sides = sides.max(3);
        let radius = start.distance(end);
        let step = TAU / sides as f32;
        let vertices = (0..=sides)
            .map(|i| {
                if i == sides {
                    // Close exactly on the first vertex.
                    start + Vec2::new(radius, 0.0)
                } else {
                    start + Vec2::angled(i as f32 * step) * radius
                }
            })
            .collect();
        Self::Polygon { vertices }
    }

    /// Axis-aligned bounds of the geometry, ignoring stroke width.
    pub fn bounding_rect(&self) -> Rect {
        match self {
            Self::Circle { center, radius } => Rect::from_center_size(*center, Vec2::splat(radius * 2.0)),
            Self::Rectangle { corner, size } => Rect::from_two_pos(*corner, *corner + *size),
            Self::Polygon { vertices } => Rect::from_points(vertices),
        }
    }

    /// Closed polyline tracing the outline.
    pub fn outline(&self) -> Vec<Pos2> {
        match self {
            Self::Circle { center, radius } => circle_outline(*center, *radius),
            Self::Rectangle { corner, size } => {
                let far = *corner + *size;
                vec![
                    *corner,
                    Pos2::new(far.x, corner.y),
                    far,
                    Pos2::new(corner.x, far.y),
                    *corner,
                ]
            }
            Self::Polygon { vertices } => vertices.clone(),
        }
    }
}

fn circle_outline(center: Pos2, radius: f32) -> Vec<Pos2> {
    if radius <= CIRCLE_TOLERANCE {
        return vec![center];
    }
    let max_step = 2.0 * (1.0 - CIRCLE_TOLERANCE / radius).clamp(-1.0, 1.0).acos();
    let segments = ((TAU / max_step).ceil() as usize).max(MIN_CIRCLE_SEGMENTS);
    (0..=segments)
        .map(|i| {
            let angle = if i == segments { 0.0 } else { i as f32 * TAU / segments as f32 };
            center + Vec2::angled(angle) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_from_drag() {
        let shape = Shape::from_drag(ShapeKind::Circle, Pos2::new(0.0, 0.0), Pos2::new(20.0, 0.0), 5);
        assert_eq!(
            shape,
            Shape::Circle {
                center: Pos2::new(10.0, 0.0),
                radius: 10.0
            }
        );
    }

    #[test]
    fn test_rectangle_bounds_ignore_drag_direction() {
        let forward = Shape::rectangle(Pos2::new(10.0, 10.0), Pos2::new(50.0, 40.0));
        let backward = Shape::rectangle(Pos2::new(50.0, 40.0), Pos2::new(10.0, 10.0));

        let expected = Rect::from_min_max(Pos2::new(10.0, 10.0), Pos2::new(50.0, 40.0));
        assert_eq!(forward.bounding_rect(), expected);
        assert_eq!(backward.bounding_rect(), expected);
    }

    #[test]
    fn test_rectangle_outline_is_closed() {
        let outline = Shape::rectangle(Pos2::new(50.0, 40.0), Pos2::new(10.0, 10.0)).outline();
        assert_eq!(outline.len(), 5);
        assert_eq!(outline.first(), outline.last());
        assert!(outline.contains(&Pos2::new(10.0, 10.0)));
    }

    #[test]
    fn test_pentagon_vertices() {
        let start = Pos2::new(100.0, 100.0);
        let Shape::Polygon { vertices } = Shape::polygon(start, Pos2::new(100.0, 130.0), 5) else {
            panic!("expected polygon");
        };

        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0], Pos2::new(130.0, 100.0));
        assert_eq!(vertices[0], vertices[5]);
        for vertex in &vertices {
            assert!((vertex.distance(start) - 30.0).abs() < 1e-3);
        }
        // Second vertex is 72 degrees around.
        let expected = start + Vec2::angled(TAU / 5.0) * 30.0;
        assert!(vertices[1].distance(expected) < 1e-3);
    }

    #[test]
    fn test_circle_outline_stays_on_circle() {
        let center = Pos2::new(40.0, 40.0);
        let outline = circle_outline(center, 25.0);
        assert!(outline.len() > MIN_CIRCLE_SEGMENTS);
        assert_eq!(outline.first(), outline.last());
        for point in &outline {
            assert!((point.distance(center) - 25.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_degenerate_circle_is_a_dot() {
        let shape = Shape::circle(Pos2::new(5.0, 5.0), Pos2::new(5.0, 5.0));
        assert_eq!(shape.outline(), vec![Pos2::new(5.0, 5.0)]);
    }
}
