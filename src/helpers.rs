use macroquad::prelude::*;
use std::collections::HashMap;

/// Path-keyed texture cache: repeated loads of the same path hand out
/// clones of one handle. Failed loads are logged and come back as `None`
/// (callers draw nothing for a missing texture). Cleared explicitly on
/// level reload.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&mut self, path: &str) -> Option<Texture2D> {
        if let Some(texture) = self.textures.get(path) {
            return Some(texture.clone());
        }
        match load_texture(path).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Nearest);
                self.textures.insert(path.to_string(), texture.clone());
                Some(texture)
            }
            Err(err) => {
                eprintln!("texture load failed for {path}: {err}");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

/// Draw frame `frame` of a horizontal sprite sheet at `pos`, rotated by
/// `angle_deg` about the sprite center.
pub fn draw_sheet_frame(texture: &Texture2D, frame: usize, frame_size: Vec2, pos: Vec2, angle_deg: f32) {
    draw_texture_ex(
        texture,
        pos.x,
        pos.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(frame_size),
            source: Some(Rect::new(
                frame as f32 * frame_size.x,
                0.0,
                frame_size.x,
                frame_size.y,
            )),
            rotation: angle_deg.to_radians(),
            ..Default::default()
        },
    );
}
