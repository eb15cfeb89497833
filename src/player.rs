use macroquad::prelude::*;

use crate::anim::FrameTicker;
use crate::bullet::Bullet;
use crate::collision::{self, SPRITE_SIZE};
use crate::helpers::draw_sheet_frame;
use crate::input::PlayerIntent;
use crate::weapon::Weapon;

const PLAYER_SPEED: f32 = 180.0;
const MAX_HEALTH: i32 = 100;
const POSE_FRAMES: usize = 8;
const POSE_CADENCE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Idle,
    Running,
    Attacking,
}

#[derive(Clone, Default)]
pub struct PlayerSprites {
    pub idle: Option<Texture2D>,
    pub run: Option<Texture2D>,
    pub attack: Option<Texture2D>,
}

pub struct Player {
    pos: Vec2,
    angle: f32,
    health: i32,
    pose: Pose,
    anim: FrameTicker,
    weapon: Option<Weapon>,
    sprites: PlayerSprites,
}

impl Player {
    pub fn new(pos: Vec2, sprites: PlayerSprites) -> Self {
        Self {
            pos,
            angle: 0.0,
            health: MAX_HEALTH,
            pose: Pose::Idle,
            anim: FrameTicker::new(POSE_FRAMES, POSE_CADENCE),
            weapon: None,
            sprites,
        }
    }

    pub fn update(
        &mut self,
        intent: &PlayerIntent,
        walls: &[Rect],
        dt: f32,
        bullets: &mut Vec<Bullet>,
        ground: &mut Vec<Weapon>,
    ) {
        if !self.alive() {
            return;
        }

        let mut vel = intent.move_dir * PLAYER_SPEED;
        if vel.x != 0.0 && vel.y != 0.0 {
            vel *= std::f32::consts::FRAC_1_SQRT_2;
        }
        let moving = vel != Vec2::ZERO;

        let look = intent.aim - self.center();
        if look != Vec2::ZERO {
            self.angle = look.y.atan2(look.x).to_degrees();
        }

        // Per-axis resolution: a blocked axis never cancels the other one,
        // so the player slides along walls.
        let step = vel * dt;
        let try_x = vec2(self.pos.x + step.x, self.pos.y);
        if !collision::hits_any(collision::inset_collider(try_x), walls) {
            self.pos.x = try_x.x;
        }
        let try_y = vec2(self.pos.x, self.pos.y + step.y);
        if !collision::hits_any(collision::inset_collider(try_y), walls) {
            self.pos.y = try_y.y;
        }

        if intent.drop {
            self.drop_weapon(ground);
        }
        if intent.pickup {
            self.pickup_weapon(ground);
        }
        if intent.fire {
            self.fire(bullets, intent.aim);
        }

        if let Some(weapon) = &mut self.weapon {
            weapon.update(dt);
        }
        self.advance_pose(moving);
    }

    fn fire(&mut self, bullets: &mut Vec<Bullet>, aim: Vec2) {
        let center = self.center();
        match &mut self.weapon {
            Some(weapon) => {
                weapon.fire(bullets, center, aim);
            }
            // Unarmed: throw a punch.
            None => {
                if self.pose != Pose::Attacking {
                    self.pose = Pose::Attacking;
                    self.anim.reset();
                }
            }
        }
    }

    fn advance_pose(&mut self, moving: bool) {
        if self.pose == Pose::Attacking {
            if self.anim.advance_once() {
                self.pose = if moving { Pose::Running } else { Pose::Idle };
                self.anim.reset();
            }
            return;
        }
        self.pose = if moving { Pose::Running } else { Pose::Idle };
        if self.pose == Pose::Running {
            self.anim.advance_loop();
        } else {
            self.anim.reset();
        }
    }

    /// Drop the held weapon at the player's center onto the ground pile.
    /// No-op when unarmed.
    pub fn drop_weapon(&mut self, ground: &mut Vec<Weapon>) {
        if let Some(mut weapon) = self.weapon.take() {
            weapon.set_pos(self.center());
            ground.push(weapon);
        }
    }

    /// Pick up the first ground weapon in reach. A weapon already in hand
    /// is dropped in place first; a given weapon is only ever held by one
    /// owner or on the ground, never both.
    pub fn pickup_weapon(&mut self, ground: &mut Vec<Weapon>) {
        let me = self.collider();
        let Some(idx) = ground
            .iter()
            .position(|w| collision::intersects(me, w.pickup_box()))
        else {
            return;
        };
        let mut picked = ground.swap_remove(idx);
        picked.on_pickup();
        if let Some(mut held) = self.weapon.replace(picked) {
            held.set_pos(self.center());
            ground.push(held);
        }
    }

    pub fn equip(&mut self, mut weapon: Weapon) {
        weapon.on_pickup();
        self.weapon = Some(weapon);
    }

    pub fn has_weapon(&self) -> bool {
        self.weapon.is_some()
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    /// True while a melee hit can land: either the held melee weapon is
    /// mid-swing or the unarmed punch animation is playing.
    pub fn is_melee_attacking(&self) -> bool {
        match &self.weapon {
            Some(weapon) => weapon.is_attacking(),
            None => self.pose == Pose::Attacking,
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.health = (self.health - amount).max(0);
    }

    pub fn alive(&self) -> bool {
        self.health > 0
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.health = MAX_HEALTH;
        self.pose = Pose::Idle;
        self.anim.reset();
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(SPRITE_SIZE * 0.5)
    }

    pub fn collider(&self) -> Rect {
        collision::inset_collider(self.pos)
    }

    pub fn draw(&self) {
        let texture = match self.pose {
            Pose::Attacking => self.sprites.attack.as_ref(),
            Pose::Running => self.sprites.run.as_ref(),
            Pose::Idle => self.sprites.idle.as_ref(),
        };
        if let Some(texture) = texture {
            draw_sheet_frame(
                texture,
                self.anim.frame(),
                Vec2::splat(SPRITE_SIZE),
                self.pos,
                self.angle,
            );
        }
        if let Some(weapon) = &self.weapon {
            weapon.draw_held(self.pos, self.angle);
        }
    }
}
