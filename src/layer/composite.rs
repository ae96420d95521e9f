//! Canvas allocation and back-to-front layer compositing.

use image::{ImageFormat, Rgba, RgbaImage};

use super::LayerSelection;
use crate::catalog::AssetCatalog;
use crate::error::{AvatarError, Result};

/// Width and height of every avatar, in pixels.
pub const CANVAS_SIZE: u32 = 400;

/// Allocates a fully transparent `CANVAS_SIZE` square canvas.
pub fn new_canvas() -> RgbaImage {
    RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE)
}

// ============================================================================
// Compose
// ============================================================================

/// Decodes every selected layer and stacks it onto a fresh canvas.
///
/// Layers are painted in selection order (background first, eye last), each
/// anchored at the canvas origin. The first read or decode failure aborts the
/// whole composition; a partial canvas is never returned.
///
/// Layers are expected to be `CANVAS_SIZE` square with an alpha channel.
/// Anything larger is clipped, anything smaller covers only the top-left
/// corner.
pub fn compose(catalog: &AssetCatalog, selection: &LayerSelection) -> Result<RgbaImage> {
    let mut canvas = new_canvas();
    for layer in selection.layers() {
        let bytes = catalog.read(&layer.asset)?;
        let decoded = decode_layer(&layer.asset, &bytes)?;
        composite_over(&mut canvas, &decoded, 0, 0);
        tracing::debug!(
            category = %layer.category,
            asset = %layer.asset,
            width = decoded.width(),
            height = decoded.height(),
            "layer composited"
        );
    }
    Ok(canvas)
}

/// Decodes one asset, picking the codec from its extension and falling back
/// to content sniffing when the extension is unknown.
fn decode_layer(asset: &str, bytes: &[u8]) -> Result<RgbaImage> {
    let decoded = match ImageFormat::from_path(asset) {
        Ok(format) => image::load_from_memory_with_format(bytes, format),
        Err(_) => image::load_from_memory(bytes),
    };
    decoded
        .map(|img| img.to_rgba8())
        .map_err(|source| AvatarError::Decode {
            asset: asset.to_string(),
            source,
        })
}

// ============================================================================
// Blending
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses source-over blending on straight (non-premultiplied) alpha. Pixels
/// falling outside the destination are skipped.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let dst_pixel = dest.get_pixel_mut(dx as u32, dy as u32);
        *dst_pixel = alpha_blend(*src_pixel, *dst_pixel);
    }
}

/// Source-over blend of two straight-alpha pixels in integer arithmetic.
///
/// Exact for the opaque and fully transparent cases and bit-identical on
/// every platform.
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src[3]);
    let da = u32::from(dst[3]);

    match sa {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    // Output alpha scaled by 255: sa + da * (1 - sa).
    let out_a = sa * 255 + da * (255 - sa);
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let num = u32::from(s) * sa * 255 + u32::from(d) * da * (255 - sa);
        ((num + out_a / 2) / out_a) as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        ((out_a + 127) / 255) as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================
