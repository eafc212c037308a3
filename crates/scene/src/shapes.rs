//! Styled element wrappers around the core shape generators.

use inkwash_core::{
    blob_points, stroke_points, BlobConfig, Branch, InkError, LatticeNoise, Point, Prng, Rgba,
    StrokeConfig,
};

use crate::element::{Element, Style};

/// A brush stroke along `centerline`, filled and outlined in `color`.
///
/// The outline is drawn `config.outline_width` wide.
pub fn stroke(
    rng: &mut Prng,
    noise: &LatticeNoise,
    centerline: &[Point],
    config: &StrokeConfig,
    color: Rgba,
) -> Result<Element, InkError> {
    let outline = stroke_points(rng, noise, centerline, config)?;
    Ok(Element::polygon(outline, Style::from_colors(color, color, config.outline_width)))
}

/// A blob at `center` in a single solid color.
pub fn blob(
    rng: &mut Prng,
    noise: &LatticeNoise,
    center: Point,
    config: &BlobConfig,
    color: Rgba,
) -> Result<Element, InkError> {
    let outline = blob_points(rng, noise, center, config)?;
    Ok(Element::polygon(outline, Style::solid(color)))
}

/// The closed outline of a branch.
pub fn branch_outline(branch: &Branch, style: Style) -> Element {
    Element::polygon(branch.outline(), style)
}
