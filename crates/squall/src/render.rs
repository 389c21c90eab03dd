//! Terminal rendering of a particle field.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use squall_core::{Bounds, ParticleKind};
use squall_field::{Field, Heading, Particle};

use crate::chars::{CLOUD_CHARS, RAIN_CHARS, SNOW_CHARS};

/// Field units per terminal column.
pub const CELL_WIDTH: f32 = 8.0;

/// Field units per terminal row. Cells are about twice as tall as wide.
pub const CELL_HEIGHT: f32 = 16.0;

/// Cloud height relative to its width.
const CLOUD_ASPECT: f32 = 0.45;

/// Field size covering a terminal area of `width` x `height` cells.
pub fn field_bounds(width: u16, height: u16) -> Bounds {
    Bounds::new(width as f32 * CELL_WIDTH, height as f32 * CELL_HEIGHT)
}

/// Character grid particles are painted into.
#[derive(Debug)]
struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Option<(char, Color)>>,
}

impl Canvas {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Cell under a field position, if on screen.
    fn cell_at(&self, fx: f32, fy: f32) -> Option<usize> {
        let cx = (fx / CELL_WIDTH).floor();
        let cy = (fy / CELL_HEIGHT).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.width as f32 || cy >= self.height as f32 {
            return None;
        }
        Some(cy as usize * self.width as usize + cx as usize)
    }

    /// Length of the canvas diagonal in field units.
    fn diagonal(&self) -> f32 {
        (self.width as f32 * CELL_WIDTH).hypot(self.height as f32 * CELL_HEIGHT)
    }

    fn put(&mut self, fx: f32, fy: f32, ch: char, color: Color) {
        if let Some(idx) = self.cell_at(fx, fy) {
            self.cells[idx] = Some((ch, color));
        }
    }

    #[cfg(test)]
    fn get(&self, x: u16, y: u16) -> Option<(char, Color)> {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some((ch, color)) => Span::styled(ch.to_string(), Style::new().fg(*color)),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Streak glyph for a rain tilt in degrees.
fn rain_char(tilt: f32) -> char {
    let lean = tilt.abs();
    if lean < 20.0 {
        RAIN_CHARS[0]
    } else if lean > 70.0 {
        RAIN_CHARS[3]
    } else if tilt < 0.0 {
        RAIN_CHARS[1]
    } else {
        RAIN_CHARS[2]
    }
}

fn paint_rain(canvas: &mut Canvas, p: &Particle, heading: &Heading) {
    let ch = rain_char(heading.tilt_degrees());
    // wide streaks are brighter
    let color = if p.breadth > 1.0 {
        Color::Rgb(170, 200, 240)
    } else {
        Color::Rgb(100, 130, 180)
    };
    let step = CELL_WIDTH / 2.0;
    // nothing past the canvas diagonal can land on screen
    let longest = canvas.diagonal() / step;
    let cells = (p.size / step).clamp(0.0, longest) as usize;
    for i in 0..=cells {
        let s = i as f32 * step;
        canvas.put(p.x + s * heading.cos, p.y + s * heading.sin, ch, color);
    }
}

fn paint_snow(canvas: &mut Canvas, p: &Particle) {
    let (ch, color) = match p.size {
        s if s < 9.0 => (SNOW_CHARS[0], Color::Rgb(70, 100, 160)),
        s if s < 13.0 => (SNOW_CHARS[1], Color::Rgb(65, 105, 225)),
        s if s < 17.0 => (SNOW_CHARS[2], Color::Rgb(30, 144, 255)),
        _ => (SNOW_CHARS[3], Color::Rgb(180, 210, 255)),
    };
    canvas.put(p.x + p.size / 2.0, p.y + p.size / 2.0, ch, color);
}

fn paint_cloud(canvas: &mut Canvas, p: &Particle, dark: bool) {
    let (body, edge) = if dark {
        (Color::Rgb(90, 95, 110), Color::Rgb(70, 72, 85))
    } else {
        (Color::Rgb(175, 180, 190), Color::Rgb(130, 135, 145))
    };
    let body_char = if dark { CLOUD_CHARS[2] } else { CLOUD_CHARS[1] };
    let height = p.breadth * CLOUD_ASPECT;

    let mut fy = p.y;
    while fy < p.y + height {
        let mut fx = p.x;
        while fx < p.x + p.size {
            let on_edge = fx < p.x + CELL_WIDTH
                || fx + CELL_WIDTH >= p.x + p.size
                || fy + CELL_HEIGHT >= p.y + height;
            if on_edge {
                canvas.put(fx, fy, CLOUD_CHARS[0], edge);
            } else {
                canvas.put(fx, fy, body_char, body);
            }
            fx += CELL_WIDTH;
        }
        fy += CELL_HEIGHT;
    }
}

fn paint(canvas: &mut Canvas, field: &Field) {
    let heading = field.heading();
    for p in field.particles() {
        match field.kind() {
            ParticleKind::Rain => paint_rain(canvas, p, &heading),
            ParticleKind::Snow => paint_snow(canvas, p),
            ParticleKind::Cloud => paint_cloud(canvas, p, false),
            ParticleKind::CloudDark => paint_cloud(canvas, p, true),
        }
    }
}

/// Draw the field over `area`. Nothing is drawn before the field is spawned.
pub fn render_field(frame: &mut Frame, area: Rect, field: Option<&Field>) {
    let Some(field) = field else {
        return;
    };
    let mut canvas = Canvas::new(area.width, area.height);
    paint(&mut canvas, field);
    frame.render_widget(Paragraph::new(canvas.into_lines()), area);
}
