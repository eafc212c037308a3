//! Styled leaf elements: closed polygons and text.

use inkwash_core::{InkError, Point, Polyline, Rgba};

use crate::markup::{attribute_string, escape, format_points, style_string};
use crate::node::Render;

/// Fill, stroke and stroke width of an element.
///
/// Colors are opaque strings; the only check is that they are non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    fill: String,
    stroke: String,
    stroke_width: f64,
}

impl Style {
    /// Returns `InkError::EmptyColor` if either color is empty.
    pub fn new(
        fill: impl Into<String>,
        stroke: impl Into<String>,
        stroke_width: f64,
    ) -> Result<Self, InkError> {
        let fill = fill.into();
        let stroke = stroke.into();
        if fill.is_empty() || stroke.is_empty() {
            return Err(InkError::EmptyColor);
        }
        Ok(Self {
            fill,
            stroke,
            stroke_width,
        })
    }

    /// Fill and stroke in one color with no outline width.
    pub fn solid(color: Rgba) -> Self {
        Self::from_colors(color, color, 0.0)
    }

    /// Builds a style from [`Rgba`] values, which always render non-empty.
    pub fn from_colors(fill: Rgba, stroke: Rgba, stroke_width: f64) -> Self {
        Self {
            fill: fill.to_css(),
            stroke: stroke.to_css(),
            stroke_width,
        }
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn stroke(&self) -> &str {
        &self.stroke
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    fn pairs(&self) -> Vec<(String, String)> {
        vec![
            ("fill".into(), self.fill.clone()),
            ("stroke".into(), self.stroke.clone()),
            ("strokeWidth".into(), self.stroke_width.to_string()),
        ]
    }
}

impl Default for Style {
    /// Transparent fill and stroke.
    fn default() -> Self {
        Self::solid(Rgba::gray(0, 0.0))
    }
}

/// What a leaf element draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Polyline),
    Text { content: String, position: Point },
}

/// A leaf of the scene tree.
///
/// Extra attributes keep their insertion order and use camel-case keys;
/// they are written in kebab case.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    shape: Shape,
    style: Style,
    attrs: Vec<(String, String)>,
}

impl Element {
    pub fn polygon(points: Polyline, style: Style) -> Self {
        Self {
            shape: Shape::Polygon(points),
            style,
            attrs: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>, position: Point, style: Style) -> Self {
        Self {
            shape: Shape::Text {
                content: content.into(),
                position,
            },
            style,
            attrs: Vec::new(),
        }
    }

    /// Adds a presentation attribute such as `textAnchor` or `transform`.
    /// Setting a key twice replaces the earlier value in place.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// The polygon's points, or `None` for text.
    pub fn points(&self) -> Option<&[Point]> {
        match &self.shape {
            Shape::Polygon(points) => Some(points),
            Shape::Text { .. } => None,
        }
    }
}

impl Render for Element {
    fn render(&self) -> String {
        let style = escape(&style_string(&self.style.pairs()));
        let extra = attribute_string(&self.attrs);
        match &self.shape {
            Shape::Polygon(points) => {
                let (points, replaced) = format_points(points);
                if replaced > 0 {
                    tracing::debug!(replaced, "normalized non-finite polygon points");
                }
                format!("<polygon points=\"{points}\" style=\"{style}\"{extra}/>")
            }
            Shape::Text { content, position } => {
                let p = position.finite_or_origin();
                format!(
                    "<text x=\"{:.1}\" y=\"{:.1}\" style=\"{style}\"{extra}>{}</text>",
                    p.x,
                    p.y,
                    escape(content)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polyline {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn style_rejects_empty_colors() {
        assert!(matches!(
            Style::new("", "black", 1.0),
            Err(InkError::EmptyColor)
        ));
        assert!(matches!(
            Style::new("white", "", 1.0),
            Err(InkError::EmptyColor)
        ));
    }

    #[test]
    fn style_accepts_any_non_empty_string() {
        let style = Style::new("not-a-color", "#zzz", 0.5).unwrap();
        assert_eq!(style.fill(), "not-a-color");
        assert_eq!(style.stroke(), "#zzz");
        assert_eq!(style.stroke_width(), 0.5);
    }

    #[test]
    fn polygon_renders_points_and_kebab_style() {
        let el = Element::polygon(square(), Style::new("white", "black", 2.0).unwrap());
        assert_eq!(
            el.render(),
            "<polygon points=\"0.0,0.0 10.0,0.0 10.0,10.0 0.0,10.0\" \
             style=\"fill:white;stroke:black;stroke-width:2\"/>"
        );
    }

    #[test]
    fn polygon_with_rgba_style() {
        let el = Element::polygon(
            vec![Point::new(1.26, 2.0)],
            Style::from_colors(Rgba::gray(255, 1.0), Rgba::gray(100, 0.3), 1.5),
        );
        assert_eq!(
            el.render(),
            "<polygon points=\"1.3,2.0\" \
             style=\"fill:rgba(255,255,255,1);stroke:rgba(100,100,100,0.3);stroke-width:1.5\"/>"
        );
    }

    #[test]
    fn polygon_normalizes_non_finite_points() {
        let el = Element::polygon(
            vec![Point::new(f64::INFINITY, 1.0), Point::new(2.0, 2.0)],
            Style::default(),
        );
        assert!(el.render().starts_with("<polygon points=\"0.0,0.0 2.0,2.0\""));
    }

    #[test]
    fn text_renders_escaped_content_and_attrs() {
        let el = Element::text("Fish & <rice>", Point::new(5.0, 7.5), Style::default())
            .with_attr("textAnchor", "middle")
            .with_attr("transform", "rotate(90)");
        assert_eq!(
            el.render(),
            "<text x=\"5.0\" y=\"7.5\" \
             style=\"fill:rgba(0,0,0,0);stroke:rgba(0,0,0,0);stroke-width:0\" \
             text-anchor=\"middle\" transform=\"rotate(90)\">Fish &amp; &lt;rice&gt;</text>"
        );
    }

    #[test]
    fn with_attr_replaces_existing_key_in_place() {
        let el = Element::text("a", Point::ORIGIN, Style::default())
            .with_attr("fontSize", "10")
            .with_attr("textAnchor", "start")
            .with_attr("fontSize", "12");
        assert_eq!(
            el.attrs(),
            &[
                ("fontSize".to_string(), "12".to_string()),
                ("textAnchor".to_string(), "start".to_string()),
            ]
        );
    }

    #[test]
    fn points_accessor_distinguishes_shapes() {
        let poly = Element::polygon(square(), Style::default());
        assert_eq!(poly.points().map(<[Point]>::len), Some(4));
        let text = Element::text("x", Point::ORIGIN, Style::default());
        assert!(text.points().is_none());
    }

    #[test]
    fn style_values_are_escaped_in_markup() {
        let el = Element::polygon(square(), Style::new("url(\"#g\")", "black", 1.0).unwrap());
        assert!(el.render().contains("fill:url(&quot;#g&quot;)"));
    }
}
