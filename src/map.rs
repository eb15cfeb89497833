use anyhow::Context;
use macroquad::file::load_string;
use macroquad::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::helpers::TextureCache;
use crate::math::{tile_dest_rect, transformed_aabb};

const FLIP_H_BIT: u32 = 0x8000_0000;
const FLIP_V_BIT: u32 = 0x4000_0000;
const FLIP_D_BIT: u32 = 0x2000_0000;

/// Mask stripping the three flip/rotation flag bits from a raw tile id.
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// Two-axis flip state of a placed tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileFlip {
    pub x: bool,
    pub y: bool,
}

/// Decode a raw 32-bit tile id into (base id, rotation in degrees, flip).
///
/// The high three bits are independent horizontal/vertical/diagonal flips;
/// each of the 8 combinations reduces to exactly one rotation in
/// {0, 90, 270} plus a two-axis flip.
pub fn decode_gid(raw: u32) -> (u32, f32, TileFlip) {
    let id = raw & GID_MASK;
    let flip_h = raw & FLIP_H_BIT != 0;
    let flip_v = raw & FLIP_V_BIT != 0;
    let flip_d = raw & FLIP_D_BIT != 0;

    if !flip_d {
        return (id, 0.0, TileFlip { x: flip_h, y: flip_v });
    }
    let (rotation, flip) = match (flip_h, flip_v) {
        (true, true) => (90.0, TileFlip { x: true, y: false }),
        (true, false) => (270.0, TileFlip { x: true, y: true }),
        (false, true) => (90.0, TileFlip { x: true, y: true }),
        (false, false) => (90.0, TileFlip { x: false, y: true }),
    };
    (id, rotation, flip)
}

fn default_layer_kind() -> String {
    "tilelayer".to_string()
}

#[derive(Deserialize)]
struct LevelDoc {
    tilewidth: f32,
    tileheight: f32,
    #[serde(default)]
    tilesets: Vec<TilesetDoc>,
    #[serde(default)]
    layers: Vec<LayerDoc>,
}

#[derive(Deserialize)]
struct TilesetDoc {
    image: String,
    firstgid: u32,
    tilewidth: f32,
    tileheight: f32,
    columns: u32,
}

#[derive(Deserialize)]
struct LayerDoc {
    #[serde(rename = "type", default = "default_layer_kind")]
    kind: String,
    #[serde(default)]
    name: String,
    width: usize,
    height: usize,
    #[serde(default)]
    data: Vec<u32>,
}

pub struct Tileset {
    pub first_gid: u32,
    pub tile_w: f32,
    pub tile_h: f32,
    pub columns: u32,
    pub texture: Option<Texture2D>,
}

/// One tile layer: three parallel row-major grids, all width*height long.
pub struct TileLayer {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<u32>,
    pub flips: Vec<TileFlip>,
    pub rotations: Vec<f32>,
}

pub struct TileMap {
    pub tile_w: f32,
    pub tile_h: f32,
    pub layers: Vec<TileLayer>,
    tilesets: Vec<Tileset>,
    collision: Vec<Rect>,
    bounds: Rect,
}

fn is_solid_layer(name: &str) -> bool {
    name.contains("wall") || name == "window"
}

fn tileset_for(tilesets: &[Tileset], id: u32) -> Option<&Tileset> {
    // Tilesets are sorted by ascending first gid; scan from the highest.
    tilesets.iter().rev().find(|ts| id >= ts.first_gid)
}

impl TileMap {
    pub fn empty() -> Self {
        Self {
            tile_w: 0.0,
            tile_h: 0.0,
            layers: Vec::new(),
            tilesets: Vec::new(),
            collision: Vec::new(),
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Parse a level straight from JSON text, without touching the
    /// filesystem or GPU. Tileset textures stay unset.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let doc: LevelDoc = serde_json::from_str(text).context("parsing level JSON")?;
        let tilesets = doc
            .tilesets
            .iter()
            .map(|ts| Tileset {
                first_gid: ts.firstgid,
                tile_w: ts.tilewidth,
                tile_h: ts.tileheight,
                columns: ts.columns,
                texture: None,
            })
            .collect();
        Ok(Self::build(doc, tilesets))
    }

    /// Load a level file and its tileset images. A tileset whose image
    /// fails to load is dropped (its tiles are skipped for rendering and
    /// collision); the rest of the map still comes up.
    pub async fn load(path: &str, cache: &mut TextureCache) -> anyhow::Result<Self> {
        let text = load_string(path)
            .await
            .with_context(|| format!("reading level file {path}"))?;
        let doc: LevelDoc =
            serde_json::from_str(&text).with_context(|| format!("parsing level file {path}"))?;

        let base = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
        let mut tilesets = Vec::with_capacity(doc.tilesets.len());
        for ts in &doc.tilesets {
            let image_path = base.join(&ts.image);
            let image_path = image_path.to_str().unwrap_or(&ts.image);
            match cache.get(image_path).await {
                Some(texture) => tilesets.push(Tileset {
                    first_gid: ts.firstgid,
                    tile_w: ts.tilewidth,
                    tile_h: ts.tileheight,
                    columns: ts.columns,
                    texture: Some(texture),
                }),
                None => eprintln!("skipping tileset '{}' in {path}", ts.image),
            }
        }

        Ok(Self::build(doc, tilesets))
    }

    fn build(doc: LevelDoc, mut tilesets: Vec<Tileset>) -> Self {
        tilesets.sort_by_key(|ts| ts.first_gid);

        let mut layers = Vec::new();
        for layer_doc in &doc.layers {
            if layer_doc.kind != "tilelayer" {
                continue;
            }
            let cells = layer_doc.width * layer_doc.height;
            if layer_doc.data.len() != cells {
                eprintln!(
                    "layer '{}' has {} tiles, expected {}; layer skipped",
                    layer_doc.name,
                    layer_doc.data.len(),
                    cells
                );
                continue;
            }

            let mut layer = TileLayer {
                name: layer_doc.name.clone(),
                width: layer_doc.width,
                height: layer_doc.height,
                tiles: Vec::with_capacity(cells),
                flips: Vec::with_capacity(cells),
                rotations: Vec::with_capacity(cells),
            };
            for &raw in &layer_doc.data {
                let (id, rotation, flip) = decode_gid(raw);
                layer.tiles.push(id);
                layer.flips.push(flip);
                layer.rotations.push(rotation);
            }
            layers.push(layer);
        }

        let mut collision = Vec::new();
        for layer in &layers {
            if !is_solid_layer(&layer.name) {
                continue;
            }
            for row in 0..layer.height {
                for col in 0..layer.width {
                    let idx = row * layer.width + col;
                    let id = layer.tiles[idx];
                    if id == 0 {
                        continue;
                    }
                    let Some(ts) = tileset_for(&tilesets, id) else {
                        continue;
                    };
                    let rotation = layer.rotations[idx];
                    let dest = tile_dest_rect(
                        col,
                        row,
                        doc.tilewidth,
                        doc.tileheight,
                        ts.tile_w,
                        ts.tile_h,
                        rotation,
                    );
                    let pivot = vec2(dest.x, dest.y + dest.h);
                    collision.push(transformed_aabb(dest, rotation, pivot, layer.flips[idx]));
                }
            }
        }

        let width_px = layers
            .iter()
            .map(|l| l.width as f32 * doc.tilewidth)
            .fold(0.0, f32::max);
        let height_px = layers
            .iter()
            .map(|l| l.height as f32 * doc.tileheight)
            .fold(0.0, f32::max);

        Self {
            tile_w: doc.tilewidth,
            tile_h: doc.tileheight,
            layers,
            tilesets,
            collision,
            bounds: Rect::new(0.0, 0.0, width_px, height_px),
        }
    }

    pub fn tileset_for(&self, id: u32) -> Option<&Tileset> {
        tileset_for(&self.tilesets, id)
    }

    /// Wall rectangles, fixed at load time.
    pub fn collision_rects(&self) -> &[Rect] {
        &self.collision
    }

    /// Pixel extent of the map; projectiles die outside it.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn draw(&self) {
        for layer in &self.layers {
            for row in 0..layer.height {
                for col in 0..layer.width {
                    let idx = row * layer.width + col;
                    let id = layer.tiles[idx];
                    if id == 0 {
                        continue;
                    }
                    let Some(ts) = tileset_for(&self.tilesets, id) else {
                        continue;
                    };
                    let Some(texture) = &ts.texture else {
                        continue;
                    };
                    let local = id - ts.first_gid;
                    let columns = ts.columns.max(1);
                    let src = Rect::new(
                        (local % columns) as f32 * ts.tile_w,
                        (local / columns) as f32 * ts.tile_h,
                        ts.tile_w,
                        ts.tile_h,
                    );

                    let rotation = layer.rotations[idx];
                    let flip = layer.flips[idx];
                    let dest = tile_dest_rect(
                        col,
                        row,
                        self.tile_w,
                        self.tile_h,
                        ts.tile_w,
                        ts.tile_h,
                        rotation,
                    );
                    // Same placement, pivot and rotation as the collision
                    // derivation, so what is drawn is what collides.
                    draw_texture_ex(
                        texture,
                        dest.x,
                        dest.y,
                        WHITE,
                        DrawTextureParams {
                            dest_size: Some(vec2(dest.w, dest.h)),
                            source: Some(src),
                            rotation: rotation.to_radians(),
                            pivot: Some(vec2(dest.x, dest.y + dest.h)),
                            flip_x: flip.x,
                            flip_y: flip.y,
                            ..Default::default()
                        },
                    );
                }
            }
        }
    }
}
