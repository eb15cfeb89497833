use macroquad::prelude::*;

use crate::map::TileFlip;

/// Where a tile of `tile_w` x `tile_h` pixels lands when placed in the grid
/// cell at (`col`, `row`). Tiles are anchored at the bottom-left of their
/// nominal cell, so oversized tiles grow upward; 90/270 degree tiles get
/// their anchor shifted so the rotated sprite still covers the cell.
pub fn tile_dest_rect(
    col: usize,
    row: usize,
    map_tile_w: f32,
    map_tile_h: f32,
    tile_w: f32,
    tile_h: f32,
    rotation: f32,
) -> Rect {
    let mut x = col as f32 * map_tile_w;
    let mut y = (row as f32 + 1.0) * map_tile_h - tile_h;
    if rotation == 270.0 {
        x += tile_h;
    }
    if rotation == 90.0 {
        y -= tile_w;
    }
    Rect::new(x, y, tile_w, tile_h)
}

/// Axis-aligned bounding box of `rect` after flipping it in place and
/// rotating it about `pivot`. The flip mirrors the rect about its own
/// center, matching how `draw_texture_ex` flips sampling inside the dest
/// rect, so the box here is exactly the footprint of the drawn tile.
pub fn transformed_aabb(rect: Rect, rotation: f32, pivot: Vec2, flip: TileFlip) -> Rect {
    let center = vec2(rect.x + rect.w * 0.5, rect.y + rect.h * 0.5);
    let mut corners = [
        vec2(rect.x, rect.y),
        vec2(rect.x + rect.w, rect.y),
        vec2(rect.x, rect.y + rect.h),
        vec2(rect.x + rect.w, rect.y + rect.h),
    ];

    for corner in &mut corners {
        if flip.x {
            corner.x = 2.0 * center.x - corner.x;
        }
        if flip.y {
            corner.y = 2.0 * center.y - corner.y;
        }
    }

    let (sin, cos) = rotation.to_radians().sin_cos();
    for corner in &mut corners {
        let local = *corner - pivot;
        *corner = vec2(
            pivot.x + local.x * cos - local.y * sin,
            pivot.y + local.x * sin + local.y * cos,
        );
    }

    let mut min = corners[0];
    let mut max = corners[0];
    for corner in &corners[1..] {
        min = min.min(*corner);
        max = max.max(*corner);
    }
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}
