use std::path::Path;
use raylib::prelude::*;

pub const ICON_FILE: &str = "icon.png";
pub const WATERMARK_FILE: &str = "unemblem.png";

/// Artwork used by the page. Either texture may be missing; the renderer
/// draws a plain shape in its place.
pub struct Assets {
    pub icon: Option<Texture2D>,
    pub watermark: Option<Texture2D>,
}

impl Assets {
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, dir: &Path) -> Self {
        Self {
            icon: load_optional_texture(rl, thread, dir, ICON_FILE),
            watermark: load_optional_texture(rl, thread, dir, WATERMARK_FILE),
        }
    }
}

// --- Load a texture if present, warn otherwise ---
pub fn load_optional_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    dir: &Path,
    file_name: &str,
) -> Option<Texture2D> {
    let path = dir.join(file_name);
    if !path.is_file() {
        log::warn!("{} not found, drawing a placeholder instead", path.display());
        return None;
    }

    let Some(path_str) = path.to_str() else {
        log::warn!("{} is not valid UTF-8, skipping", path.display());
        return None;
    };

    match rl.load_texture(thread, path_str) {
        Ok(texture) => {
            log::debug!("loaded {} ({}x{})", path.display(), texture.width(), texture.height());
            Some(texture)
        }
        Err(e) => {
            log::warn!("failed to load {}: {}", path.display(), e);
            None
        }
    }
}
