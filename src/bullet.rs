use macroquad::prelude::*;

const BULLET_SIZE: f32 = 5.0;

pub struct Bullet {
    pos: Vec2,
    dir: Vec2,
    speed: f32,
    active: bool,
}

impl Bullet {
    /// `dir` is expected to be a unit vector; the weapon normalizes it.
    pub fn new(pos: Vec2, dir: Vec2, speed: f32) -> Self {
        Self {
            pos,
            dir,
            speed,
            active: true,
        }
    }

    pub fn advance(&mut self, dt: f32, bounds: Rect) {
        if !self.active {
            return;
        }
        self.pos += self.dir * self.speed * dt;
        if self.pos.x < bounds.x
            || self.pos.x > bounds.x + bounds.w
            || self.pos.y < bounds.y
            || self.pos.y > bounds.y + bounds.h
        {
            self.active = false;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_SIZE, BULLET_SIZE)
    }

    pub fn draw(&self) {
        draw_rectangle(self.pos.x, self.pos.y, BULLET_SIZE, BULLET_SIZE, YELLOW);
    }
}
