/// Sprite-sheet frame counter advanced at a fixed cadence of simulation
/// ticks (not wall-clock time). Shared by the player pose animation, enemy
/// run/death animations and weapon fire/attack flashes.
pub struct FrameTicker {
    frame: usize,
    tick: u32,
    frames: usize,
    cadence: u32,
}

impl FrameTicker {
    pub fn new(frames: usize, cadence: u32) -> Self {
        Self {
            frame: 0,
            tick: 0,
            frames: frames.max(1),
            cadence: cadence.max(1),
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.tick = 0;
    }

    /// Advance one tick, wrapping back to the first frame.
    pub fn advance_loop(&mut self) {
        self.tick += 1;
        if self.tick >= self.cadence {
            self.tick = 0;
            self.frame = (self.frame + 1) % self.frames;
        }
    }

    /// Advance one tick, holding on the last frame. Returns true once the
    /// last frame has played out for a full cadence, and keeps returning
    /// true until `reset`.
    pub fn advance_once(&mut self) -> bool {
        if self.frame + 1 == self.frames && self.tick >= self.cadence {
            return true;
        }
        self.tick += 1;
        if self.tick >= self.cadence {
            if self.frame + 1 < self.frames {
                self.tick = 0;
                self.frame += 1;
            } else {
                // Leave tick saturated so completion latches.
                return true;
            }
        }
        false
    }
}
