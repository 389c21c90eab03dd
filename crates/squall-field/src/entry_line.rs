//! Re-entry segment for particles that left the field.

use squall_core::Bounds;

use crate::heading::Heading;

/// Segment particles are placed on when they wrap around.
///
/// Obtained by projecting the field corners along the heading, so that a
/// particle starting anywhere on it crosses the whole field. For straight
/// down and sideways headings it lies on the field edge; for oblique
/// headings it sits partly outside the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryLine {
    pub start: (f32, f32),
    pub end: (f32, f32),
}

impl EntryLine {
    /// Derive the entry line for a heading and field size.
    pub fn derive(heading: &Heading, bounds: Bounds) -> Self {
        let Bounds { width, height } = bounds;
        let (cos, sin) = (heading.cos, heading.sin);

        let a = cos * width;
        let x1 = (cos * a).trunc();
        let y1 = (sin * a).trunc();
        let a2 = sin * height;
        let x2 = (cos * a2).trunc();
        let y2 = (sin * a2).trunc();

        if heading.to_left {
            Self {
                start: (x1, y1),
                end: (width - x2, height - y2),
            }
        } else {
            Self {
                start: (width - x1, -y1),
                end: (-x2, height - y2),
            }
        }
    }

    /// Point at fraction `t` (0..=1) from `start` to `end`.
    pub fn point_at(&self, t: f32) -> (f32, f32) {
        let dist_x = self.end.0 - self.start.0;
        let dist_y = self.end.1 - self.start.1;
        (self.start.0 + t * dist_x, self.start.1 + t * dist_y)
    }
}
