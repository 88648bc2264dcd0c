//! SVG → PNG rasterization.

use anyhow::{Context, Result};

/// Rasterize an SVG document to PNG bytes at the given scale factor.
///
/// Text resolves against the system font database; on a machine without
/// fonts the chart still renders, just without labels.
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).context("failed to parse figure SVG")?;

    let size = tree.size();
    let w = (size.width() * scale).ceil() as u32;
    let h = (size.height() * scale).ceil() as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(w, h).context("failed to allocate figure pixmap")?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    pixmap.encode_png().context("failed to encode figure PNG")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="#ffffff"/><polyline points="0,0 100,50" fill="none" stroke="#1f77b4"/></svg>"##;

    #[test]
    fn renders_png_signature() {
        let png = svg_to_png(MINIMAL_SVG, 1.0).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn scale_doubles_dimensions() {
        let small = svg_to_png(MINIMAL_SVG, 1.0).unwrap();
        let large = svg_to_png(MINIMAL_SVG, 2.0).unwrap();
        // Larger raster → more bytes; exact sizes are encoder-dependent.
        assert!(large.len() >= small.len());
    }

    #[test]
    fn invalid_svg_is_an_error() {
        assert!(svg_to_png("not svg at all", 1.0).is_err());
    }
}
