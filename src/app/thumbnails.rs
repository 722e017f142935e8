use std::path::Path;

use anyhow::{Context as _, Result};
use eframe::egui::{Context, TextureHandle, TextureOptions};
use image::RgbaImage;

use crate::optics::ImageListEntry;

use super::render_utils::to_color_image;

pub(super) const THUMBNAIL_SIZE: u32 = 128;

fn load_thumbnail(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(image.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE).to_rgba8())
}

/// Thumbnails for the current image list, index-aligned with its entries.
#[derive(Default)]
pub(super) struct ThumbnailSet {
    textures: Vec<Option<TextureHandle>>,
}

impl ThumbnailSet {
    pub(super) fn build(ctx: &Context, entries: &[ImageListEntry]) -> Self {
        let mut failed = 0usize;
        let textures = entries
            .iter()
            .map(|entry| match load_thumbnail(Path::new(&entry.path)) {
                Ok(image) => Some(ctx.load_texture(
                    format!("thumbnail-{}", entry.optics_position),
                    to_color_image(&image),
                    TextureOptions::LINEAR,
                )),
                Err(error) => {
                    failed += 1;
                    log::warn!("{error:#}");
                    None
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "loaded {} thumbnails, {failed} failed",
            textures.len() - failed
        );
        Self { textures }
    }

    pub(super) fn get(&self, index: usize) -> Option<&TextureHandle> {
        self.textures.get(index).and_then(Option::as_ref)
    }

    pub(super) fn failed_count(&self) -> usize {
        self.textures.iter().filter(|texture| texture.is_none()).count()
    }
}
