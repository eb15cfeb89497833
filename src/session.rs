use macroquad::prelude::*;

use crate::bullet::Bullet;
use crate::collision;
use crate::enemy::Enemy;
use crate::input::PlayerIntent;
use crate::map::TileMap;
use crate::player::Player;
use crate::weapon::Weapon;

/// Simulation step; rendering interpolation is not done, the tick is short
/// enough that it never shows.
pub const TICK_DT: f32 = 1.0 / 60.0;

/// Damage dealt by one bullet or melee hit. Tuned for one-hit kills.
pub const HIT_DAMAGE: i32 = 9999;

const CAMERA_DRAG: f32 = 5.0;

pub struct EnemySpawn {
    pub pos: (f32, f32),
    pub weapon: &'static str,
    /// Bosses are ordinary enemies wearing the boss skin.
    pub boss: bool,
}

pub struct LevelSpec {
    pub map: &'static str,
    pub player_spawn: (f32, f32),
    pub enemies: &'static [EnemySpawn],
}

pub const LEVELS: &[LevelSpec] = &[
    LevelSpec {
        map: "assets/map/level1.json",
        player_spawn: (96.0, 96.0),
        enemies: &[
            EnemySpawn {
                pos: (640.0, 160.0),
                weapon: "pistol",
                boss: false,
            },
            EnemySpawn {
                pos: (960.0, 460.0),
                weapon: "bat",
                boss: false,
            },
        ],
    },
    LevelSpec {
        map: "assets/map/level2.json",
        player_spawn: (96.0, 600.0),
        enemies: &[
            EnemySpawn {
                pos: (480.0, 128.0),
                weapon: "smg",
                boss: false,
            },
            EnemySpawn {
                pos: (800.0, 320.0),
                weapon: "pistol",
                boss: false,
            },
            EnemySpawn {
                pos: (1056.0, 608.0),
                weapon: "knife",
                boss: false,
            },
            EnemySpawn {
                pos: (608.0, 480.0),
                weapon: "shotgun",
                boss: true,
            },
        ],
    },
];

/// Owns the live world: map, entities, projectiles and the camera target.
/// `update` runs one fixed tick; `draw` renders whatever state is current.
pub struct GameSession {
    pub map: TileMap,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub ground_weapons: Vec<Weapon>,
    pub camera: Vec2,
    pub level: usize,
    pub paused: bool,
    pub won: bool,
    level_cleared: bool,
    cleared_event: bool,
}

impl GameSession {
    pub fn new(map: TileMap, player: Player) -> Self {
        let camera = player.center();
        Self {
            map,
            player,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            ground_weapons: Vec::new(),
            camera,
            level: 0,
            paused: false,
            won: false,
            level_cleared: false,
            cleared_event: false,
        }
    }

    /// Install a freshly loaded level. The player keeps their held weapon
    /// across levels; everything else is reset.
    pub fn enter_level(&mut self, level: usize, map: TileMap, spawn: Vec2, enemies: Vec<Enemy>) {
        self.map = map;
        self.level = level;
        self.enemies = enemies;
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.ground_weapons.clear();
        self.player.respawn(spawn);
        self.camera = self.player.center();
        self.level_cleared = false;
        self.cleared_event = false;
    }

    /// Fires once, the tick the last enemy dies; consumed by the caller to
    /// drive the level transition.
    pub fn take_level_cleared(&mut self) -> bool {
        std::mem::take(&mut self.cleared_event)
    }

    pub fn update(&mut self, intent: &PlayerIntent, dt: f32) {
        // The camera eases toward the player even while paused or dead, so
        // the view settles instead of freezing mid-pan.
        let follow = 1.0 - (-CAMERA_DRAG * dt).exp();
        self.camera += (self.player.center() - self.camera) * follow;

        if self.paused || self.won || !self.player.alive() {
            return;
        }

        let walls = self.map.collision_rects();
        self.player.update(
            intent,
            walls,
            dt,
            &mut self.player_bullets,
            &mut self.ground_weapons,
        );

        let player_box = self.player.collider();
        let player_alive = self.player.alive();
        for enemy in &mut self.enemies {
            enemy.update(dt, player_box, player_alive, walls, &mut self.enemy_bullets);
        }

        let bounds = self.map.bounds();
        for bullet in &mut self.player_bullets {
            bullet.advance(dt, bounds);
            if !bullet.is_active() {
                continue;
            }
            if collision::hits_any(bullet.hitbox(), walls) {
                bullet.deactivate();
                continue;
            }
            for enemy in &mut self.enemies {
                if enemy.is_dead() {
                    continue;
                }
                if collision::intersects(bullet.hitbox(), enemy.collider()) {
                    bullet.deactivate();
                    enemy.take_damage(HIT_DAMAGE);
                    if let Some(dropped) = enemy.take_weapon() {
                        self.ground_weapons.push(dropped);
                    }
                    break;
                }
            }
        }

        for bullet in &mut self.enemy_bullets {
            bullet.advance(dt, bounds);
            if !bullet.is_active() {
                continue;
            }
            if collision::hits_any(bullet.hitbox(), walls) {
                bullet.deactivate();
                continue;
            }
            if collision::intersects(bullet.hitbox(), player_box) {
                bullet.deactivate();
                self.player.take_damage(HIT_DAMAGE);
            }
        }

        if self.player.is_melee_attacking() {
            for enemy in &mut self.enemies {
                if enemy.is_dead() {
                    continue;
                }
                if collision::intersects(player_box, enemy.collider()) {
                    enemy.take_damage(HIT_DAMAGE);
                    if let Some(dropped) = enemy.take_weapon() {
                        self.ground_weapons.push(dropped);
                    }
                }
            }
        }
        for enemy in &self.enemies {
            if enemy.is_dead() || !enemy.is_melee_attacking() {
                continue;
            }
            if collision::intersects(player_box, enemy.collider()) {
                self.player.take_damage(HIT_DAMAGE);
            }
        }

        self.player_bullets.retain(|b| b.is_active());
        self.enemy_bullets.retain(|b| b.is_active());

        if !self.level_cleared
            && !self.enemies.is_empty()
            && self.enemies.iter().all(|e| e.is_dead())
        {
            self.level_cleared = true;
            self.cleared_event = true;
        }
    }

    pub fn draw(&self) {
        self.map.draw();
        for weapon in &self.ground_weapons {
            weapon.draw_dropped();
        }
        for enemy in &self.enemies {
            enemy.draw();
        }
        self.player.draw();
        for bullet in &self.player_bullets {
            bullet.draw();
        }
        for bullet in &self.enemy_bullets {
            bullet.draw();
        }
    }
}
