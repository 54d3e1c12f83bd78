//! Style normalization: turns computed CSS strings into the canonical
//! color, gradient and border model.
//!
//! Malformed input never errors. Anything that cannot be understood is
//! reported as absent (`None`) so callers fall through to their defaults.

pub mod color;
pub mod gradient;
mod syntax;
pub mod values;

pub use color::{first_color_in, parse_color};
pub use gradient::{parse_direction, parse_gradient};
pub use values::{
    is_bold, is_italic, normalize_text_align, parse_border_side, parse_border_style,
    parse_font_size_pt, parse_length, parse_px, primary_font_family,
};
