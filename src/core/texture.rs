use log::warn;

use super::render_target::RenderTarget;
use crate::math::Color;

/// Decode an image slide into a render target.
///
/// A slide that cannot be decoded resolves to a solid placeholder so the
/// grid is always fully constructible; the failure is logged, never fatal.
pub fn load_slide_texture(path: &str, size: u32, placeholder: Color) -> RenderTarget {
    match image::open(path) {
        Ok(img) => {
            let img = img.resize_exact(size, size, image::imageops::FilterType::Triangle);
            let rgba = img.to_rgba8();
            let mut target = RenderTarget::new(size, size);
            target.pixels_mut().copy_from_slice(rgba.as_raw());
            target
        }
        Err(err) => {
            warn!("slide image {path} failed to load, using placeholder: {err}");
            RenderTarget::solid(size, size, placeholder)
        }
    }
}
