use gunmetal::weapon::{Weapon, WeaponDb, WeaponDef, WeaponKind, AMMO_UNLIMITED};
use macroquad::prelude::vec2;

fn pistol() -> Weapon {
    WeaponDb::builtin().spawn("pistol").unwrap()
}

fn bat() -> Weapon {
    WeaponDb::builtin().spawn("bat").unwrap()
}

#[test]
fn fresh_weapon_fires_immediately() {
    let mut weapon = pistol();
    let mut bullets = Vec::new();
    assert!(weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(100.0, 0.0)));
    assert_eq!(bullets.len(), 1);
    assert_eq!(weapon.ammo(), 9);
}

#[test]
fn bullet_direction_is_normalized_toward_aim() {
    let mut weapon = pistol();
    let mut bullets = Vec::new();
    weapon.fire(&mut bullets, vec2(10.0, 10.0), vec2(10.0, 110.0));
    let before = bullets[0].pos();
    bullets[0].advance(1.0, macroquad::prelude::Rect::new(-1e6, -1e6, 2e6, 2e6));
    let moved = bullets[0].pos() - before;
    assert!((moved.x).abs() < 1e-3);
    assert!((moved.y - 720.0).abs() < 1e-1);
}

#[test]
fn fire_rate_gates_successive_shots() {
    let mut weapon = pistol();
    let mut bullets = Vec::new();
    assert!(weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(100.0, 0.0)));
    assert!(!weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(100.0, 0.0)));
    weapon.update(0.3);
    assert!(!weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(100.0, 0.0)));
    weapon.update(0.3);
    assert!(weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(100.0, 0.0)));
    assert_eq!(bullets.len(), 2);
}

#[test]
fn degenerate_aim_is_a_no_op() {
    let mut weapon = pistol();
    let mut bullets = Vec::new();
    assert!(!weapon.fire(&mut bullets, vec2(5.0, 5.0), vec2(5.0, 5.0)));
    assert!(bullets.is_empty());
    assert_eq!(weapon.ammo(), 10);
    // The failed attempt must not consume the cooldown.
    assert!(weapon.fire(&mut bullets, vec2(5.0, 5.0), vec2(6.0, 5.0)));
}

#[test]
fn empty_weapon_refuses_to_fire() {
    let def = WeaponDef {
        id: "derringer".to_string(),
        kind: WeaponKind::Ranged,
        ammo: 1,
        fire_rate: 0.1,
        bullet_speed: 500.0,
        damage: 1,
        sprites: None,
    };
    let mut weapon = Weapon::new(&def);
    let mut bullets = Vec::new();
    assert!(weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0)));
    assert_eq!(weapon.ammo(), 0);
    assert!(!weapon.has_ammo());
    weapon.update(1.0);
    assert!(!weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0)));
    assert_eq!(bullets.len(), 1);
}

#[test]
fn unlimited_ranged_ammo_never_exhausts() {
    let def = WeaponDef {
        id: "raygun".to_string(),
        kind: WeaponKind::Ranged,
        ammo: AMMO_UNLIMITED,
        fire_rate: 0.1,
        bullet_speed: 500.0,
        damage: 1,
        sprites: None,
    };
    let mut weapon = Weapon::new(&def);
    let mut bullets = Vec::new();
    for _ in 0..50 {
        assert!(weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0)));
        weapon.update(0.2);
    }
    assert_eq!(bullets.len(), 50);
    assert_eq!(weapon.ammo(), AMMO_UNLIMITED);
    assert!(weapon.has_ammo());
}

#[test]
fn melee_swings_without_spawning_bullets() {
    let mut weapon = bat();
    let mut bullets = Vec::new();
    assert!(weapon.is_melee());
    assert!(weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0)));
    assert!(bullets.is_empty());
    assert!(weapon.is_attacking());
    assert_eq!(weapon.ammo(), AMMO_UNLIMITED);
    // Mid-swing attempts are rejected.
    weapon.update(1.0);
    assert!(weapon.is_attacking());
    assert!(!weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0)));
}

#[test]
fn melee_swing_ends_after_its_animation() {
    let mut weapon = bat();
    let mut bullets = Vec::new();
    weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0));
    // 8 swing frames at a cadence of 3 ticks.
    for _ in 0..24 {
        weapon.update(1.0 / 60.0);
    }
    assert!(!weapon.is_attacking());
    assert!(weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0)));
}

#[test]
fn pickup_restarts_the_cooldown() {
    let mut weapon = pistol();
    let mut bullets = Vec::new();
    weapon.update(1.0);
    weapon.on_pickup();
    assert!(!weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0)));
    weapon.update(0.3);
    weapon.update(0.3);
    assert!(weapon.fire(&mut bullets, vec2(0.0, 0.0), vec2(1.0, 0.0)));
}

#[test]
fn roster_yaml_parses_with_defaults() {
    let yaml = r#"
- id: pistol
  kind: ranged
  ammo: 12
  fire_rate: 0.5
  bullet_speed: 720.0
- id: crowbar
  kind: melee
  fire_rate: 0.4
"#;
    let defs: Vec<WeaponDef> = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].kind, WeaponKind::Ranged);
    assert_eq!(defs[0].ammo, 12);
    assert_eq!(defs[1].kind, WeaponKind::Melee);
    assert_eq!(defs[1].ammo, AMMO_UNLIMITED);
    assert_eq!(defs[1].damage, 1);
}

#[test]
fn bullets_fly_straight_and_die_at_the_map_edge() {
    use gunmetal::bullet::Bullet;
    use macroquad::prelude::Rect;

    let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
    let mut bullet = Bullet::new(vec2(100.0, 100.0), vec2(1.0, 0.0), 10.0);
    for _ in 0..5 {
        bullet.advance(1.0, bounds);
    }
    assert!(bullet.is_active());
    assert_eq!(bullet.pos(), vec2(150.0, 100.0));

    for _ in 0..20 {
        bullet.advance(1.0, bounds);
    }
    assert!(!bullet.is_active());
    // Deactivation is permanent; an inactive bullet no longer moves.
    let parked = bullet.pos();
    bullet.advance(1.0, bounds);
    assert!(!bullet.is_active());
    assert_eq!(bullet.pos(), parked);
}

#[test]
fn unknown_roster_id_spawns_nothing() {
    let db = WeaponDb::builtin();
    assert!(db.spawn("railgun").is_none());
    assert!(db.spawn("smg").is_some());
}
