use anyhow::Context;
use macroquad::file::load_string;
use macroquad::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use crate::anim::FrameTicker;
use crate::bullet::Bullet;
use crate::helpers::{draw_sheet_frame, TextureCache};

const FIRE_FRAMES: usize = 4;
const ATTACK_FRAMES: usize = 8;
const FLASH_CADENCE: u32 = 3;
const HELD_SIZE: f32 = 54.0;
const FLASH_SIZE: f32 = 16.0;
const MUZZLE_OFFSET: f32 = 25.0;
const PICKUP_REACH: f32 = 32.0;

/// Unlimited ammo marker, used by melee weapons and cheat rosters alike.
pub const AMMO_UNLIMITED: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Ranged,
    Melee,
}

#[derive(Clone, Default, Deserialize)]
pub struct WeaponSpriteDef {
    #[serde(default)]
    pub held: Option<String>,
    #[serde(default)]
    pub dropped: Option<String>,
    /// Muzzle-flash sheet for ranged weapons, swing sheet for melee.
    #[serde(default)]
    pub effect: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct WeaponDef {
    pub id: String,
    pub kind: WeaponKind,
    #[serde(default = "default_ammo")]
    pub ammo: i32,
    pub fire_rate: f32,
    #[serde(default)]
    pub bullet_speed: f32,
    #[serde(default = "default_damage")]
    pub damage: i32,
    #[serde(default)]
    pub sprites: Option<WeaponSpriteDef>,
}

fn default_ammo() -> i32 {
    AMMO_UNLIMITED
}

fn default_damage() -> i32 {
    1
}

#[derive(Clone, Default)]
pub struct WeaponSprites {
    pub held: Option<Texture2D>,
    pub dropped: Option<Texture2D>,
    pub effect: Option<Texture2D>,
}

pub struct Weapon {
    id: String,
    kind: WeaponKind,
    ammo: i32,
    fire_rate: f32,
    bullet_speed: f32,
    damage: i32,
    cooldown: f32,
    active: bool,
    anim: FrameTicker,
    pos: Vec2,
    sprites: WeaponSprites,
}

impl Weapon {
    pub fn new(def: &WeaponDef) -> Self {
        let frames = match def.kind {
            WeaponKind::Ranged => FIRE_FRAMES,
            WeaponKind::Melee => ATTACK_FRAMES,
        };
        Self {
            id: def.id.clone(),
            kind: def.kind,
            ammo: def.ammo,
            fire_rate: def.fire_rate,
            bullet_speed: def.bullet_speed,
            damage: def.damage,
            // Ready to fire immediately after construction.
            cooldown: def.fire_rate,
            active: false,
            anim: FrameTicker::new(frames, FLASH_CADENCE),
            pos: Vec2::ZERO,
            sprites: WeaponSprites::default(),
        }
    }

    pub fn with_sprites(mut self, sprites: WeaponSprites) -> Self {
        self.sprites = sprites;
        self
    }

    /// Attempt to fire toward `aim` from `origin` (the firer's center).
    /// Gated by the fire-rate cooldown; ranged weapons also need ammo and a
    /// non-degenerate aim vector. Melee weapons start their swing instead
    /// of spawning a bullet. Returns whether the attempt succeeded.
    pub fn fire(&mut self, bullets: &mut Vec<Bullet>, origin: Vec2, aim: Vec2) -> bool {
        if self.cooldown < self.fire_rate {
            return false;
        }
        match self.kind {
            WeaponKind::Melee => {
                if self.active {
                    return false;
                }
            }
            WeaponKind::Ranged => {
                if self.ammo == 0 {
                    return false;
                }
                let dir = aim - origin;
                if dir.length_squared() == 0.0 {
                    return false;
                }
                bullets.push(Bullet::new(origin, dir.normalize(), self.bullet_speed));
                if self.ammo > 0 {
                    self.ammo -= 1;
                }
            }
        }
        self.active = true;
        self.anim.reset();
        self.cooldown = 0.0;
        true
    }

    pub fn update(&mut self, dt: f32) {
        self.cooldown += dt;
        if self.active && self.anim.advance_once() {
            self.active = false;
            self.anim.reset();
        }
    }

    /// Restart cooldown and animation state when changing hands.
    pub fn on_pickup(&mut self) {
        self.cooldown = 0.0;
        self.active = false;
        self.anim.reset();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn is_melee(&self) -> bool {
        self.kind == WeaponKind::Melee
    }

    /// Mid-swing melee attack; the session resolves overlap damage while
    /// this holds.
    pub fn is_attacking(&self) -> bool {
        self.kind == WeaponKind::Melee && self.active
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0 || self.ammo == AMMO_UNLIMITED
    }

    pub fn ammo(&self) -> i32 {
        self.ammo
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn fire_rate(&self) -> f32 {
        self.fire_rate
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Reach box around a dropped weapon for pickup checks.
    pub fn pickup_box(&self) -> Rect {
        Rect::new(
            self.pos.x - PICKUP_REACH * 0.5,
            self.pos.y - PICKUP_REACH * 0.5,
            PICKUP_REACH,
            PICKUP_REACH,
        )
    }

    pub fn draw_held(&self, owner_pos: Vec2, angle_deg: f32) {
        if let Some(held) = &self.sprites.held {
            draw_sheet_frame(held, 0, vec2(HELD_SIZE, HELD_SIZE), owner_pos, angle_deg);
        }
        if !self.active {
            return;
        }
        let Some(effect) = &self.sprites.effect else {
            return;
        };
        match self.kind {
            WeaponKind::Ranged => {
                // Muzzle flash at the barrel tip, along the facing angle.
                let rad = angle_deg.to_radians();
                let center = owner_pos + vec2(HELD_SIZE, HELD_SIZE) * 0.5;
                let tip = center + vec2(rad.cos(), rad.sin()) * MUZZLE_OFFSET;
                draw_sheet_frame(
                    effect,
                    self.anim.frame(),
                    vec2(FLASH_SIZE, FLASH_SIZE),
                    tip - vec2(FLASH_SIZE, FLASH_SIZE) * 0.5,
                    angle_deg,
                );
            }
            WeaponKind::Melee => {
                draw_sheet_frame(
                    effect,
                    self.anim.frame(),
                    vec2(HELD_SIZE, HELD_SIZE),
                    owner_pos,
                    angle_deg,
                );
            }
        }
    }

    pub fn draw_dropped(&self) {
        if let Some(dropped) = &self.sprites.dropped {
            draw_texture(dropped, self.pos.x, self.pos.y, WHITE);
        }
    }
}

/// The weapon roster: definitions loaded from YAML (or the built-in
/// fallback set) plus their textures once loaded.
pub struct WeaponDb {
    defs: Vec<WeaponDef>,
    lookup: HashMap<String, usize>,
    sprites: HashMap<String, WeaponSprites>,
}

impl WeaponDb {
    pub async fn load(path: &str) -> anyhow::Result<Self> {
        let text = load_string(path)
            .await
            .with_context(|| format!("reading weapon roster {path}"))?;
        let defs: Vec<WeaponDef> =
            serde_yaml::from_str(&text).with_context(|| format!("parsing weapon roster {path}"))?;
        Ok(Self::from_defs(defs))
    }

    pub fn builtin() -> Self {
        let ranged = |id: &str, ammo: i32, fire_rate: f32, bullet_speed: f32| WeaponDef {
            id: id.to_string(),
            kind: WeaponKind::Ranged,
            ammo,
            fire_rate,
            bullet_speed,
            damage: 1,
            sprites: None,
        };
        let melee = |id: &str| WeaponDef {
            id: id.to_string(),
            kind: WeaponKind::Melee,
            ammo: AMMO_UNLIMITED,
            fire_rate: 0.3,
            bullet_speed: 0.0,
            damage: 1,
            sprites: None,
        };
        Self::from_defs(vec![
            ranged("pistol", 10, 0.5, 720.0),
            ranged("shotgun", 5, 1.0, 600.0),
            ranged("smg", 20, 0.2, 840.0),
            melee("bat"),
            melee("knife"),
            melee("fists"),
        ])
    }

    fn from_defs(defs: Vec<WeaponDef>) -> Self {
        let lookup = defs
            .iter()
            .enumerate()
            .map(|(i, def)| (def.id.clone(), i))
            .collect();
        Self {
            defs,
            lookup,
            sprites: HashMap::new(),
        }
    }

    pub async fn load_sprites(&mut self, cache: &mut TextureCache) {
        for def in &self.defs {
            let Some(paths) = &def.sprites else {
                continue;
            };
            let mut sprites = WeaponSprites::default();
            if let Some(path) = &paths.held {
                sprites.held = cache.get(path).await;
            }
            if let Some(path) = &paths.dropped {
                sprites.dropped = cache.get(path).await;
            }
            if let Some(path) = &paths.effect {
                sprites.effect = cache.get(path).await;
            }
            self.sprites.insert(def.id.clone(), sprites);
        }
    }

    pub fn spawn(&self, id: &str) -> Option<Weapon> {
        let def = &self.defs[*self.lookup.get(id)?];
        let weapon = Weapon::new(def);
        match self.sprites.get(id) {
            Some(sprites) => Some(weapon.with_sprites(sprites.clone())),
            None => Some(weapon),
        }
    }

    pub fn defs(&self) -> &[WeaponDef] {
        &self.defs
    }
}
