use macroquad::prelude::*;
use miniquad::conf::Platform;

use gunmetal::enemy::{Enemy, EnemySprites};
use gunmetal::helpers::TextureCache;
use gunmetal::input::PlayerIntent;
use gunmetal::map::TileMap;
use gunmetal::player::{Player, PlayerSprites};
use gunmetal::session::{GameSession, LevelSpec, LEVELS, TICK_DT};
use gunmetal::weapon::WeaponDb;

const CAMERA_FOV: f32 = 768.0;
const STARTING_WEAPON: &str = "pistol";
/// Cap on real time folded into the simulation per frame, so a dragged
/// window or debugger pause does not spiral the tick loop.
const MAX_FRAME_TIME: f32 = 0.25;

fn window_conf() -> Conf {
    Conf {
        window_title: "gunmetal".to_owned(),
        window_width: 1200,
        window_height: 768,
        sample_count: 1,
        platform: Platform {
            linux_wm_class: "gunmetal",
            ..Default::default()
        },
        ..Default::default()
    }
}

fn camera_zoom_for_fov(view_height: f32) -> Vec2 {
    let view_h = view_height.max(1.0);
    let aspect = screen_width().max(1.0) / screen_height().max(1.0);
    vec2(2.0 / (view_h * aspect), 2.0 / view_h)
}

async fn load_player_sprites(cache: &mut TextureCache) -> PlayerSprites {
    PlayerSprites {
        idle: cache.get("assets/player/idle.png").await,
        run: cache.get("assets/player/run.png").await,
        attack: cache.get("assets/player/attack.png").await,
    }
}

async fn load_enemy_sprites(cache: &mut TextureCache) -> EnemySprites {
    EnemySprites {
        idle: cache.get("assets/enemy/idle.png").await,
        run: cache.get("assets/enemy/run.png").await,
        dead: cache.get("assets/enemy/death.png").await,
    }
}

async fn load_boss_sprites(cache: &mut TextureCache) -> EnemySprites {
    EnemySprites {
        idle: cache.get("assets/enemy/boss_idle.png").await,
        run: cache.get("assets/enemy/boss_run.png").await,
        dead: cache.get("assets/enemy/boss_death.png").await,
    }
}

async fn load_level(
    spec: &LevelSpec,
    cache: &mut TextureCache,
    db: &WeaponDb,
    enemy_sprites: &EnemySprites,
    boss_sprites: &EnemySprites,
) -> (TileMap, Vec2, Vec<Enemy>) {
    let map = match TileMap::load(spec.map, cache).await {
        Ok(map) => map,
        Err(err) => {
            eprintln!("level load failed: {err}");
            TileMap::empty()
        }
    };
    let enemies = spec
        .enemies
        .iter()
        .map(|spawn| {
            let skin = if spawn.boss { boss_sprites } else { enemy_sprites };
            let mut enemy = Enemy::new(spawn.pos.into(), skin.clone());
            if let Some(weapon) = db.spawn(spawn.weapon) {
                enemy.equip(weapon);
            }
            enemy
        })
        .collect();
    (map, spec.player_spawn.into(), enemies)
}

fn draw_hud(session: &GameSession) {
    draw_text(
        &format!(
            "HP: {}   Level {}/{}",
            session.player.health(),
            session.level + 1,
            LEVELS.len()
        ),
        20.0,
        40.0,
        30.0,
        WHITE,
    );
    if let Some(weapon) = session.player.weapon() {
        let ammo = if weapon.is_melee() || weapon.ammo() < 0 {
            "--".to_string()
        } else {
            weapon.ammo().to_string()
        };
        draw_text(
            &format!("{}  {}", weapon.id(), ammo),
            20.0,
            70.0,
            30.0,
            WHITE,
        );
    }

    let banner = if session.won {
        Some("YOU WIN")
    } else if !session.player.alive() {
        Some("YOU DIED - press R to retry")
    } else if session.paused {
        Some("PAUSED")
    } else {
        None
    };
    if let Some(text) = banner {
        let size = measure_text(text, None, 48, 1.0);
        draw_text(
            text,
            (screen_width() - size.width) * 0.5,
            screen_height() * 0.5,
            48.0,
            WHITE,
        );
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut cache = TextureCache::new();

    let mut db = WeaponDb::load("assets/weapons.yaml")
        .await
        .unwrap_or_else(|err| {
            eprintln!("weapon roster load failed: {err}");
            WeaponDb::builtin()
        });
    db.load_sprites(&mut cache).await;

    let player_sprites = load_player_sprites(&mut cache).await;
    let enemy_sprites = load_enemy_sprites(&mut cache).await;
    let boss_sprites = load_boss_sprites(&mut cache).await;

    let (map, spawn, enemies) =
        load_level(&LEVELS[0], &mut cache, &db, &enemy_sprites, &boss_sprites).await;
    let mut session = GameSession::new(TileMap::empty(), Player::new(spawn, player_sprites));
    session.enter_level(0, map, spawn, enemies);
    if let Some(weapon) = db.spawn(STARTING_WEAPON) {
        session.player.equip(weapon);
    }

    let mut camera = Camera2D {
        target: session.camera,
        zoom: camera_zoom_for_fov(CAMERA_FOV),
        ..Default::default()
    };

    let mut accumulator = 0.0f32;
    loop {
        camera.zoom = camera_zoom_for_fov(CAMERA_FOV);
        let mut intent = PlayerIntent::poll(&camera);

        if intent.toggle_pause && session.player.alive() && !session.won {
            session.paused = !session.paused;
        }
        if intent.restart && !session.player.alive() {
            let level = session.level;
            cache.clear();
            db.load_sprites(&mut cache).await;
            let (map, spawn, enemies) =
                load_level(&LEVELS[level], &mut cache, &db, &enemy_sprites, &boss_sprites).await;
            session.enter_level(level, map, spawn, enemies);
        }

        accumulator += get_frame_time().min(MAX_FRAME_TIME);
        while accumulator >= TICK_DT {
            session.update(&intent, TICK_DT);
            intent.clear_edges();
            accumulator -= TICK_DT;
        }

        if session.take_level_cleared() {
            let next = session.level + 1;
            if next >= LEVELS.len() {
                session.won = true;
            } else {
                cache.clear();
                db.load_sprites(&mut cache).await;
                let (map, spawn, enemies) =
                    load_level(&LEVELS[next], &mut cache, &db, &enemy_sprites, &boss_sprites).await;
                session.enter_level(next, map, spawn, enemies);
            }
        }

        camera.target = session.camera;

        set_camera(&camera);
        clear_background(BLACK);
        session.draw();

        set_default_camera();
        draw_hud(&session);

        next_frame().await;
    }
}
