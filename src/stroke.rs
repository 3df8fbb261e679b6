use egui::{Color32, Pos2};

/// The path being laid down by one freehand gesture.
///
/// Lives from pointer-down to pointer-up; the pixels are already on the
/// surface by the time it is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSession {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

impl StrokeSession {
    pub fn begin(start: Pos2, color: Color32, width: f32) -> Self {
        Self {
            points: vec![start],
            color,
            width,
        }
    }

    /// Extend the path and return the new segment that needs painting.
    pub fn extend_to(&mut self, point: Pos2) -> Option<(Pos2, Pos2)> {
        let last = *self.points.last()?;
        if last == point {
            return None;
        }
        self.points.push(point);
        Some((last, point))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_yields_segments() {
        let mut stroke = StrokeSession::begin(Pos2::new(1.0, 1.0), Color32::BLACK, 2.0);
        assert_eq!(
            stroke.extend_to(Pos2::new(4.0, 5.0)),
            Some((Pos2::new(1.0, 1.0), Pos2::new(4.0, 5.0)))
        );
        assert_eq!(stroke.extend_to(Pos2::new(4.0, 5.0)), None);
        assert_eq!(stroke.points().len(), 2);
    }
}
