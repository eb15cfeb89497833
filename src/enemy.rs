use macroquad::prelude::*;

use crate::anim::FrameTicker;
use crate::bullet::Bullet;
use crate::collision::{self, SPRITE_SIZE};
use crate::helpers::draw_sheet_frame;
use crate::weapon::Weapon;

const ENEMY_SPEED: f32 = 50.0;
pub const DETECTION_RADIUS: f32 = 200.0;
const RUN_FRAMES: usize = 8;
const DEATH_FRAMES: usize = 8;
const FRAME_CADENCE: u32 = 3;
const MAX_HEALTH: i32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Patrolling,
    Attacking,
    Dead,
}

#[derive(Clone, Default)]
pub struct EnemySprites {
    pub idle: Option<Texture2D>,
    pub run: Option<Texture2D>,
    pub dead: Option<Texture2D>,
}

pub struct Enemy {
    pos: Vec2,
    /// Signed patrol speed; the sign is the current heading.
    speed: f32,
    health: i32,
    state: EnemyState,
    angle: f32,
    run_anim: FrameTicker,
    death_anim: FrameTicker,
    death_done: bool,
    fire_timer: f32,
    weapon: Option<Weapon>,
    sprites: EnemySprites,
}

impl Enemy {
    pub fn new(pos: Vec2, sprites: EnemySprites) -> Self {
        Self {
            pos,
            speed: ENEMY_SPEED,
            health: MAX_HEALTH,
            state: EnemyState::Patrolling,
            angle: 0.0,
            run_anim: FrameTicker::new(RUN_FRAMES, FRAME_CADENCE),
            death_anim: FrameTicker::new(DEATH_FRAMES, FRAME_CADENCE),
            death_done: false,
            fire_timer: 0.0,
            weapon: None,
            sprites,
        }
    }

    pub fn equip(&mut self, weapon: Weapon) {
        self.weapon = Some(weapon);
    }

    pub fn update(
        &mut self,
        dt: f32,
        player_box: Rect,
        player_alive: bool,
        walls: &[Rect],
        bullets: &mut Vec<Bullet>,
    ) {
        if self.state == EnemyState::Dead {
            // Run out the one-shot death animation, then hold the corpse
            // on its last frame.
            if !self.death_done && self.death_anim.advance_once() {
                self.death_done = true;
            }
            return;
        }

        let center = self.center();
        let player_center = vec2(
            player_box.x + player_box.w * 0.5,
            player_box.y + player_box.h * 0.5,
        );
        let offset = player_center - center;

        if offset.length() < DETECTION_RADIUS {
            if self.state != EnemyState::Attacking {
                self.state = EnemyState::Attacking;
                // Face the player on entry; held until the state changes.
                self.angle = offset.y.atan2(offset.x).to_degrees();
            }
            if player_alive {
                self.fire_timer += dt;
                let rate = self
                    .weapon
                    .as_ref()
                    .map(|w| w.fire_rate())
                    .unwrap_or(f32::INFINITY);
                if self.fire_timer >= rate {
                    if let Some(weapon) = &mut self.weapon {
                        if weapon.fire(bullets, center, player_center) {
                            self.fire_timer = 0.0;
                        }
                    }
                }
            }
        } else {
            self.state = EnemyState::Patrolling;
            self.fire_timer = 0.0;
            self.patrol(dt, walls);
            self.run_anim.advance_loop();
        }

        if let Some(weapon) = &mut self.weapon {
            weapon.update(dt);
        }
    }

    fn patrol(&mut self, dt: f32, walls: &[Rect]) {
        let next = vec2(self.pos.x + self.speed * dt, self.pos.y);
        if collision::hits_any(collision::inset_collider(next), walls) {
            // Reverse direction on collision.
            self.speed = -self.speed;
        } else {
            self.pos = next;
        }
        self.angle = if self.speed > 0.0 { 0.0 } else { 180.0 };
    }

    pub fn take_damage(&mut self, amount: i32) {
        if self.state == EnemyState::Dead || amount <= 0 {
            return;
        }
        self.health = (self.health - amount).max(0);
        if self.health == 0 {
            self.state = EnemyState::Dead;
            self.death_anim.reset();
            self.death_done = false;
        }
    }

    /// A dead enemy gives up its weapon exactly once, repositioned to the
    /// corpse's center. Live enemies keep theirs.
    pub fn take_weapon(&mut self) -> Option<Weapon> {
        if self.state != EnemyState::Dead {
            return None;
        }
        let mut weapon = self.weapon.take()?;
        weapon.set_pos(self.center());
        Some(weapon)
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn is_melee_attacking(&self) -> bool {
        self.weapon.as_ref().is_some_and(|w| w.is_attacking())
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(SPRITE_SIZE * 0.5)
    }

    pub fn collider(&self) -> Rect {
        collision::inset_collider(self.pos)
    }

    pub fn draw(&self) {
        let size = Vec2::splat(SPRITE_SIZE);
        match self.state {
            EnemyState::Dead => {
                if let Some(dead) = &self.sprites.dead {
                    draw_sheet_frame(dead, self.death_anim.frame(), size, self.pos, 0.0);
                }
            }
            EnemyState::Patrolling => {
                if let Some(run) = &self.sprites.run {
                    draw_sheet_frame(run, self.run_anim.frame(), size, self.pos, self.angle);
                }
            }
            EnemyState::Attacking => {
                if let Some(idle) = &self.sprites.idle {
                    draw_sheet_frame(idle, 0, size, self.pos, self.angle);
                }
                if let Some(weapon) = &self.weapon {
                    weapon.draw_held(self.pos, self.angle);
                }
            }
        }
    }
}
