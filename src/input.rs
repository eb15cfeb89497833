use macroquad::prelude::*;

/// One frame's worth of player intent, decoupled from the input device so
/// tests can drive the simulation directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerIntent {
    /// Raw movement axes, each in {-1, 0, 1}.
    pub move_dir: Vec2,
    /// Aim point in world coordinates.
    pub aim: Vec2,
    pub fire: bool,
    pub pickup: bool,
    pub drop: bool,
    pub restart: bool,
    pub toggle_pause: bool,
}

impl PlayerIntent {
    pub fn poll(camera: &Camera2D) -> Self {
        let mut dir = Vec2::ZERO;
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            dir.x += 1.0;
        }
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            dir.x -= 1.0;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            dir.y += 1.0;
        }
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            dir.y -= 1.0;
        }

        Self {
            move_dir: dir,
            aim: camera.screen_to_world(mouse_position().into()),
            fire: is_mouse_button_down(MouseButton::Left),
            pickup: is_key_pressed(KeyCode::E),
            drop: is_key_pressed(KeyCode::G),
            restart: is_key_pressed(KeyCode::R),
            toggle_pause: is_key_pressed(KeyCode::Escape),
        }
    }

    /// Edge-triggered intents only apply to the first simulation tick of a
    /// rendered frame.
    pub fn clear_edges(&mut self) {
        self.pickup = false;
        self.drop = false;
        self.restart = false;
        self.toggle_pause = false;
    }
}
