//! Glyphs used to draw particles.

/// Rain streaks: upright, leaning right, leaning left, flat.
pub const RAIN_CHARS: [char; 4] = ['|', '\\', '/', '-'];

/// Snow flakes from smallest to largest.
pub const SNOW_CHARS: [char; 4] = ['·', '•', '*', '❄'];

/// Cloud shading: edge, light body, dark body.
pub const CLOUD_CHARS: [char; 3] = ['░', '▒', '▓'];
