use gunmetal::enemy::{Enemy, EnemySprites, EnemyState};
use gunmetal::session::HIT_DAMAGE;
use gunmetal::weapon::WeaponDb;
use macroquad::prelude::{vec2, Rect};

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy::new(vec2(x, y), EnemySprites::default())
}

// A 16x16 collider whose center sits at (cx, cy), like a combatant's.
fn body_at(cx: f32, cy: f32) -> Rect {
    Rect::new(cx - 8.0, cy - 8.0, 16.0, 16.0)
}

const FAR_AWAY: (f32, f32) = (5000.0, 5000.0);

#[test]
fn patrols_when_the_player_is_out_of_range() {
    let mut enemy = enemy_at(0.0, 0.0);
    let mut bullets = Vec::new();
    enemy.update(1.0, body_at(FAR_AWAY.0, FAR_AWAY.1), true, &[], &mut bullets);
    assert_eq!(enemy.state(), EnemyState::Patrolling);
    assert!((enemy.pos().x - 50.0).abs() < 1e-3);
    assert_eq!(enemy.pos().y, 0.0);
    assert_eq!(enemy.angle(), 0.0);
    assert!(bullets.is_empty());
}

#[test]
fn reverses_patrol_direction_at_walls() {
    let mut enemy = enemy_at(0.0, 0.0);
    let mut bullets = Vec::new();
    // Collider spans x 19..35; this wall blocks the very next step right.
    let walls = [Rect::new(36.0, 0.0, 32.0, 64.0)];
    enemy.update(0.1, body_at(FAR_AWAY.0, FAR_AWAY.1), true, &walls, &mut bullets);
    assert_eq!(enemy.pos().x, 0.0);
    assert_eq!(enemy.angle(), 180.0);
    enemy.update(0.1, body_at(FAR_AWAY.0, FAR_AWAY.1), true, &walls, &mut bullets);
    assert!((enemy.pos().x + 5.0).abs() < 1e-3);
}

#[test]
fn locks_facing_toward_the_player_on_detection() {
    let mut enemy = enemy_at(0.0, 0.0);
    let mut bullets = Vec::new();
    // Enemy center is (27, 27); this player center is 100px to the right.
    enemy.update(0.1, body_at(127.0, 27.0), true, &[], &mut bullets);
    assert_eq!(enemy.state(), EnemyState::Attacking);
    assert!(enemy.angle().abs() < 1e-3);
    // The facing is frozen on entry; a moving player does not re-aim it.
    enemy.update(0.1, body_at(27.0, 127.0), true, &[], &mut bullets);
    assert_eq!(enemy.state(), EnemyState::Attacking);
    assert!(enemy.angle().abs() < 1e-3);
}

#[test]
fn reacquires_facing_after_losing_the_player() {
    let mut enemy = enemy_at(0.0, 0.0);
    let mut bullets = Vec::new();
    enemy.update(0.1, body_at(127.0, 27.0), true, &[], &mut bullets);
    enemy.update(0.1, body_at(FAR_AWAY.0, FAR_AWAY.1), true, &[], &mut bullets);
    assert_eq!(enemy.state(), EnemyState::Patrolling);
    // Coming back from below re-enters Attacking with a fresh angle.
    let below = enemy.center() + vec2(0.0, 100.0);
    enemy.update(0.1, body_at(below.x, below.y), true, &[], &mut bullets);
    assert_eq!(enemy.state(), EnemyState::Attacking);
    assert!((enemy.angle() - 90.0).abs() < 1e-3);
}

#[test]
fn fires_at_the_players_rate_while_in_range() {
    let mut enemy = enemy_at(0.0, 0.0);
    enemy.equip(WeaponDb::builtin().spawn("pistol").unwrap());
    let mut bullets = Vec::new();
    let player = body_at(127.0, 27.0);
    // Pistol fire rate is 0.5s; two 0.3s ticks cross it.
    enemy.update(0.3, player, true, &[], &mut bullets);
    assert!(bullets.is_empty());
    enemy.update(0.3, player, true, &[], &mut bullets);
    assert_eq!(bullets.len(), 1);
    // The timer restarts after each shot.
    enemy.update(0.3, player, true, &[], &mut bullets);
    assert_eq!(bullets.len(), 1);
}

#[test]
fn holds_fire_once_the_player_is_dead() {
    let mut enemy = enemy_at(0.0, 0.0);
    enemy.equip(WeaponDb::builtin().spawn("pistol").unwrap());
    let mut bullets = Vec::new();
    let player = body_at(127.0, 27.0);
    for _ in 0..10 {
        enemy.update(0.3, player, false, &[], &mut bullets);
    }
    assert_eq!(enemy.state(), EnemyState::Attacking);
    assert!(bullets.is_empty());
}

#[test]
fn unarmed_enemies_never_fire() {
    let mut enemy = enemy_at(0.0, 0.0);
    let mut bullets = Vec::new();
    for _ in 0..100 {
        enemy.update(0.3, body_at(127.0, 27.0), true, &[], &mut bullets);
    }
    assert!(bullets.is_empty());
}

#[test]
fn lethal_damage_is_terminal() {
    let mut enemy = enemy_at(0.0, 0.0);
    enemy.take_damage(HIT_DAMAGE);
    assert!(enemy.is_dead());
    assert_eq!(enemy.health(), 0);
    // Dead enemies stay put and quiet.
    let mut bullets = Vec::new();
    let before = enemy.pos();
    for _ in 0..30 {
        enemy.update(0.3, body_at(27.0, 27.0), true, &[], &mut bullets);
    }
    assert_eq!(enemy.pos(), before);
    assert!(bullets.is_empty());
    assert_eq!(enemy.state(), EnemyState::Dead);
    // Further damage is ignored.
    enemy.take_damage(HIT_DAMAGE);
    assert_eq!(enemy.health(), 0);
}

#[test]
fn partial_damage_wounds_without_killing() {
    let mut enemy = enemy_at(0.0, 0.0);
    enemy.take_damage(30);
    assert!(!enemy.is_dead());
    assert_eq!(enemy.health(), 70);
    enemy.take_damage(0);
    enemy.take_damage(-5);
    assert_eq!(enemy.health(), 70);
}

#[test]
fn corpse_yields_its_weapon_exactly_once() {
    let mut enemy = enemy_at(100.0, 100.0);
    enemy.equip(WeaponDb::builtin().spawn("bat").unwrap());
    assert!(enemy.take_weapon().is_none());
    enemy.take_damage(HIT_DAMAGE);
    let weapon = enemy.take_weapon().unwrap();
    assert_eq!(weapon.id(), "bat");
    assert_eq!(weapon.pos(), enemy.center());
    assert!(enemy.take_weapon().is_none());
}
