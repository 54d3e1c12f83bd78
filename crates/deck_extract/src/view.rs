//! Typed accessors over a node's raw computed style.

use crate::ExtractOptions;
use deck_core::{BorderSet, Color, Edge, Gradient, Rect, TextAlign, TextRun};
use deck_snapshot::SnapshotNode;
use deck_style::{
    is_bold, is_italic, normalize_text_align, parse_border_side, parse_color, parse_gradient,
    parse_length, parse_px, primary_font_family,
};

/// Read-only style view of one snapshot node.
#[derive(Debug, Clone, Copy)]
pub struct StyleView<'node> {
    node: &'node SnapshotNode,
}

impl<'node> StyleView<'node> {
    #[inline]
    #[must_use]
    pub const fn new(node: &'node SnapshotNode) -> Self {
        Self { node }
    }

    #[inline]
    #[must_use]
    pub const fn node(&self) -> &'node SnapshotNode {
        self.node
    }

    #[inline]
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.node.rect
    }

    #[inline]
    fn prop(&self, name: &str) -> &'node str {
        self.node.prop(name)
    }

    /// `background-color` as parsed, transparency kept.
    #[must_use]
    pub fn background_color(&self) -> Option<Color> {
        parse_color(self.prop("background-color"), None)
    }

    /// `background-color` when it actually paints something.
    #[must_use]
    pub fn visible_background(&self) -> Option<Color> {
        self.background_color().filter(|color| color.is_visible())
    }

    /// Most prominent gradient from `background-image`, else `background`.
    #[must_use]
    pub fn background_gradient(&self, backdrop: Option<Color>) -> Option<Gradient> {
        ["background-image", "background"]
            .into_iter()
            .map(|name| self.prop(name))
            .filter(|raw| raw.contains("gradient"))
            .find_map(|raw| parse_gradient(raw, backdrop))
    }

    /// First solid color named inside `background-image`.
    #[must_use]
    pub fn background_image_color(&self) -> Option<Color> {
        parse_color(self.prop("background-image"), None)
    }

    /// All four border sides. Transparent sides are kept.
    #[must_use]
    pub fn borders(&self) -> BorderSet {
        let mut set = BorderSet::default();
        for edge in Edge::ALL {
            let side = edge.css_name();
            set.set(
                edge,
                parse_border_side(
                    self.prop(&format!("border-{side}-width")),
                    self.prop(&format!("border-{side}-style")),
                    self.prop(&format!("border-{side}-color")),
                ),
            );
        }
        set
    }

    /// Computed color of one edge whatever its width or style.
    #[must_use]
    pub fn border_color(&self, edge: Edge) -> Option<Color> {
        parse_color(self.prop(&format!("border-{}-color", edge.css_name())), None)
    }

    /// Border width of one edge, 0 when absent.
    #[must_use]
    pub fn border_width(&self, edge: Edge) -> f32 {
        parse_px(self.prop(&format!("border-{}-width", edge.css_name()))).unwrap_or(0.0)
    }

    /// Top-left corner radius in pixels. Percentages resolve against the
    /// smaller box dimension.
    #[must_use]
    pub fn corner_radius(&self) -> f32 {
        let raw = match self.prop("border-top-left-radius") {
            "" => self.prop("border-radius"),
            corner => corner,
        };
        parse_length(raw, self.rect().min_dimension())
            .filter(|radius| radius.is_finite() && *radius > 0.0)
            .unwrap_or(0.0)
    }

    /// Text painted by a gradient clipped to the glyphs.
    #[must_use]
    pub fn is_gradient_text(&self) -> bool {
        let clip = match self.prop("-webkit-background-clip") {
            "" => self.prop("background-clip"),
            value => value,
        };
        let fill = match self.prop("-webkit-text-fill-color") {
            "" => self.prop("color"),
            value => value,
        };
        clip.trim() == "text" && parse_color(fill, None).is_some_and(Color::is_transparent)
    }

    /// Gradient of gradient text, stops flattened onto white.
    #[must_use]
    pub fn text_gradient(&self) -> Option<Gradient> {
        if !self.is_gradient_text() {
            return None;
        }
        self.background_gradient(Some(Color::WHITE))
    }

    #[must_use]
    pub fn text_color(&self) -> Option<Color> {
        parse_color(self.prop("color"), None)
    }

    #[must_use]
    pub fn alignment(&self) -> TextAlign {
        normalize_text_align(self.prop("text-align"), self.prop("direction"))
    }

    /// Font size in CSS pixels, 16 when unknown.
    #[must_use]
    pub fn font_px(&self) -> f32 {
        parse_px(self.prop("font-size")).unwrap_or(16.0)
    }

    #[must_use]
    pub fn list_style_type(&self) -> &'node str {
        self.prop("list-style-type").trim()
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.node.is_hidden()
    }

    /// A run of `content` in this node's font. `default_color` applies when
    /// the node's `color` cannot be read.
    #[must_use]
    pub fn run(&self, content: String, default_color: Color, options: &ExtractOptions) -> TextRun {
        TextRun {
            content,
            font_family: primary_font_family(self.prop("font-family"), &options.default_font_family),
            font_size_pt: (self.font_px() * options.px_to_pt).round(),
            bold: is_bold(self.prop("font-weight")),
            italic: is_italic(self.prop("font-style")),
            color: self.text_color().unwrap_or(default_color),
            alignment: self.alignment(),
            gradient_overlay: None,
        }
    }
}
