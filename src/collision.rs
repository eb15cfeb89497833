use macroquad::prelude::*;

pub const SPRITE_SIZE: f32 = 54.0;
pub const COLLIDER_OFFSET: Vec2 = Vec2::new(19.0, 19.0);
pub const COLLIDER_SIZE: Vec2 = Vec2::new(16.0, 16.0);

/// Exclusive-bounds AABB overlap: rectangles that merely share an edge (or
/// have zero-area overlap) do not collide. Every wall, combatant and bullet
/// check in the game routes through here.
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

pub fn hits_any(probe: Rect, rects: &[Rect]) -> bool {
    rects.iter().any(|r| intersects(probe, *r))
}

/// World collision box for a combatant sprite at `pos` (sprite top-left).
/// The box is inset from the 54x54 sprite so corridors stay walkable.
pub fn inset_collider(pos: Vec2) -> Rect {
    Rect::new(
        pos.x + COLLIDER_OFFSET.x,
        pos.y + COLLIDER_OFFSET.y,
        COLLIDER_SIZE.x,
        COLLIDER_SIZE.y,
    )
}
