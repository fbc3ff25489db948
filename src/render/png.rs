use std::io::Cursor;
use std::sync::Arc;

use crate::error::RenderError;
use crate::models::SceneDescription;
use crate::render::fonts::FontCache;
use crate::render::svg::SvgRenderer;
use crate::render::{OutputFormat, SceneRenderer};

/// Rasterises the SVG rendition, so both backends draw the same picture.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    fonts: Arc<FontCache>,
}

impl PngRenderer {
    pub fn new(fonts: Arc<FontCache>) -> Self {
        Self { fonts }
    }

    /// Straight-alpha RGBA8 pixels, row-major.
    pub fn render_rgba(&self, scene: &SceneDescription) -> Result<Vec<u8>, RenderError> {
        let markup = SvgRenderer.render_markup(scene);

        let mut opt = usvg::Options::default();
        opt.fontdb = self.fonts.database();
        let tree = usvg::Tree::from_str(&markup, &opt)?;

        let (width, height) = (scene.width, scene.height);
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or(RenderError::Pixmap { width, height })?;
        resvg::render(&tree, resvg::tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let mut rgba = pixmap.data().to_vec();
        unpremultiply_in_place(&mut rgba);
        Ok(rgba)
    }
}

impl SceneRenderer for PngRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn render(&self, scene: &SceneDescription) -> Result<Vec<u8>, RenderError> {
        let rgba = self.render_rgba(scene)?;
        let (width, height) = (scene.width, scene.height);
        let img = image::RgbaImage::from_raw(width, height, rgba)
            .ok_or(RenderError::Pixmap { width, height })?;

        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)?;
        log::debug!("png: {}x{} -> {} bytes", width, height, out.len());
        Ok(out)
    }
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scene::{CircleNode, Paint, VerticalGradient};
    use crate::models::{Color, Node};

    fn scene() -> SceneDescription {
        SceneDescription {
            width: 40,
            height: 80,
            background: VerticalGradient {
                top: Color::rgb(0x02, 0x08, 0x17),
                mid: Color::rgb(0x02, 0x08, 0x17),
                bottom: Color::rgb(0x02, 0x08, 0x17),
            },
            nodes: vec![Node::Circle(CircleNode {
                cx: 20.0,
                cy: 40.0,
                r: 10.0,
                paint: Paint::fill(Color::rgb(0xD4, 0xA8, 0x47)),
            })],
        }
    }

    fn renderer() -> PngRenderer {
        PngRenderer::new(FontCache::isolated(Vec::new()).shared())
    }

    #[test]
    fn rasterises_background_and_shapes() {
        let rgba = renderer().render_rgba(&scene()).unwrap();
        assert_eq!(rgba.len(), 40 * 80 * 4);

        let near = |x: usize, y: usize, want: [u8; 4]| {
            let i = (y * 40 + x) * 4;
            for (got, want) in rgba[i..i + 4].iter().zip(want) {
                assert!(got.abs_diff(want) <= 1, "pixel ({x},{y}): {got} vs {want}");
            }
        };
        near(1, 1, [0x02, 0x08, 0x17, 0xFF]);
        near(20, 40, [0xD4, 0xA8, 0x47, 0xFF]);
    }

    #[test]
    fn encodes_png_signature() {
        let bytes = renderer().render(&scene()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        let mut px = [64u8, 32, 0, 128, 9, 9, 9, 0];
        unpremultiply_in_place(&mut px);
        assert_eq!(px, [128, 64, 0, 128, 0, 0, 0, 0]);
    }
}
