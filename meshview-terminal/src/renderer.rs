/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use log::trace;
use meshview_core::{Camera, Color, DrawTarget};
use nalgebra::Point2;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Character used for vertex markers
const MARKER: char = 'o';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Option<Color>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        character: ' ',
        color: None,
    };
}

/// Rasterizes draw primitives into a grid of coloured terminal cells.
///
/// Primitives arrive in screen coordinates of the camera's virtual raster and
/// are scaled onto the grid. Later primitives overwrite earlier ones; there is
/// no depth buffer.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    virtual_width: f32,
    virtual_height: f32,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, camera: &Camera) -> Self {
        Self {
            width,
            height,
            virtual_width: camera.width as f32,
            virtual_height: camera.height as f32,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::EMPTY; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Character at a grid position, `None` outside the grid
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].character)
    }

    /// Colour at a grid position, `None` for empty cells
    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height)
            .then(|| self.cells[y * self.width + x].color)
            .flatten()
    }

    fn to_grid(&self, point: Point2<f32>) -> Point2<f32> {
        Point2::new(
            point.x * self.width as f32 / self.virtual_width,
            point.y * self.height as f32 / self.virtual_height,
        )
    }

    fn plot(&mut self, x: i32, y: i32, character: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Cell {
            character,
            color: Some(color),
        };
    }

    fn rasterize_triangle(&mut self, v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>, character: char, color: Color) {
        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, character, color);
                    }
                }
            }
        }
    }

    /// DDA line between two grid points, clipped to the grid first
    fn rasterize_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) {
        if !all_finite(&[from, to]) {
            return;
        }
        let character = line_char(to.x - from.x, to.y - from.y);
        let Some((from, to)) = clip_segment(from, to, self.width as f64, self.height as f64) else {
            return;
        };

        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;

        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let point = from + delta * t;
            self.plot(point.x.floor() as i32, point.y.floor() as i32, character, color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if cell.color != current {
                    match cell.color {
                        Some(Color { r, g, b }) => writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?,
                        None => writer.queue(ResetColor)?,
                    };
                    current = cell.color;
                }
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawTarget for AsciiRenderer {
    fn fill_polygon(&mut self, points: &[Point2<f32>], color: Color) {
        if points.len() < 3 || !all_finite(points) {
            trace!("skipping degenerate polygon {points:?}");
            return;
        }

        let character = ramp_char(color.brightness());
        let grid: Vec<_> = points.iter().map(|&point| self.to_grid(point)).collect();
        if !all_finite(&grid) {
            return;
        }
        for i in 1..grid.len() - 1 {
            self.rasterize_triangle(grid[0], grid[i], grid[i + 1], character, color);
        }
    }

    fn outline_polygon(&mut self, points: &[Point2<f32>], color: Color, _width: f32) {
        if points.len() < 2 || !all_finite(points) {
            return;
        }

        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            let (from, to) = (self.to_grid(from), self.to_grid(to));
            self.rasterize_line(from, to, color);
        }
    }

    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color, _width: f32) {
        if !all_finite(&[from, to]) {
            return;
        }
        let (from, to) = (self.to_grid(from), self.to_grid(to));
        self.rasterize_line(from, to, color);
    }

    fn marker(&mut self, center: Point2<f32>, _radius: f32, color: Color) {
        if !all_finite(&[center]) {
            return;
        }
        let cell = self.to_grid(center);
        self.plot(cell.x.floor() as i32, cell.y.floor() as i32, MARKER, color);
    }
}

fn all_finite(points: &[Point2<f32>]) -> bool {
    points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
}

/// Liang-Barsky clip of a segment against `[0, width] x [0, height]`.
///
/// Works in f64 so endpoints far off-grid still clip to the right cells.
fn clip_segment(
    from: Point2<f32>,
    to: Point2<f32>,
    width: f64,
    height: f64,
) -> Option<(Point2<f32>, Point2<f32>)> {
    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [(-dx, x0), (dx, width - x0), (-dy, y0), (dy, height - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        Point2::new(
            (x0 + dx * t).clamp(0.0, width) as f32,
            (y0 + dy * t).clamp(0.0, height) as f32,
        )
    };
    Some((at(t0), at(t1)))
}

/// Map brightness in `[0, 1]` onto the luminosity ramp
fn ramp_char(brightness: f32) -> char {
    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Pick a stroke character from a line's direction on a y-down grid
fn line_char(dx: f32, dy: f32) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if dx * dy > 0.0 {
        '\\'
    } else {
        '/'
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
    p: Point2<f32>,
) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
