/// Drawing interface consumed by the render pipeline
use nalgebra::Point2;

use crate::shading::Color;

/// A 2D surface that accepts primitives in screen coordinates.
///
/// Primitives arrive in painter's order; later ones cover earlier ones.
pub trait DrawTarget {
    fn fill_polygon(&mut self, points: &[Point2<f32>], color: Color);

    fn outline_polygon(&mut self, points: &[Point2<f32>], color: Color, width: f32);

    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color, width: f32);

    /// Circle outline marking a single point
    fn marker(&mut self, center: Point2<f32>, radius: f32, color: Color);
}

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillPolygon {
        points: Vec<Point2<f32>>,
        color: Color,
    },
    OutlinePolygon {
        points: Vec<Point2<f32>>,
        color: Color,
        width: f32,
    },
    Line {
        from: Point2<f32>,
        to: Point2<f32>,
        color: Color,
        width: f32,
    },
    Marker {
        center: Point2<f32>,
        radius: f32,
        color: Color,
    },
}

/// Draw target that records every primitive in submission order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Filled polygons in the order they were drawn
    pub fn fills(&self) -> impl Iterator<Item = (&[Point2<f32>], Color)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillPolygon { points, color } => Some((points.as_slice(), *color)),
            _ => None,
        })
    }

    /// Replay the recorded primitives onto another target
    pub fn replay<T: DrawTarget + ?Sized>(&self, target: &mut T) {
        for command in &self.commands {
            match command {
                DrawCommand::FillPolygon { points, color } => target.fill_polygon(points, *color),
                DrawCommand::OutlinePolygon {
                    points,
                    color,
                    width,
                } => target.outline_polygon(points, *color, *width),
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => target.line(*from, *to, *color, *width),
                DrawCommand::Marker {
                    center,
                    radius,
                    color,
                } => target.marker(*center, *radius, *color),
            }
        }
    }
}

impl DrawTarget for DrawList {
    fn fill_polygon(&mut self, points: &[Point2<f32>], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn outline_polygon(&mut self, points: &[Point2<f32>], color: Color, width: f32) {
        self.commands.push(DrawCommand::OutlinePolygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn marker(&mut self, center: Point2<f32>, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Marker {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut list = DrawList::new();
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let c = Point2::new(0.0, 10.0);

        list.fill_polygon(&[a, b, c], Color::WHITE);
        list.outline_polygon(&[a, b, c], Color::GREEN, 2.0);
        list.line(a, b, Color::GREEN, 1.0);
        list.marker(c, 3.0, Color::RED);

        assert_eq!(list.len(), 4);
        assert!(matches!(list.commands()[0], DrawCommand::FillPolygon { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::OutlinePolygon { width, .. } if width == 2.0));
        assert!(matches!(list.commands()[2], DrawCommand::Line { .. }));
        assert!(matches!(list.commands()[3], DrawCommand::Marker { radius, .. } if radius == 3.0));

        let fills: Vec<_> = list.fills().collect();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].1, Color::WHITE);
    }

    #[test]
    fn test_replay_and_clear() {
        let mut list = DrawList::new();
        list.line(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0), Color::RED, 1.0);
        list.fill_polygon(&[Point2::new(0.0, 0.0); 3], Color::BLACK);

        let mut copy = DrawList::new();
        list.replay(&mut copy);
        assert_eq!(copy.commands(), list.commands());

        list.clear();
        assert!(list.is_empty());
        assert_eq!(copy.len(), 2);
    }
}
