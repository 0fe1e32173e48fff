/// One pointer-move or pointer-up event for a card drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    /// Pointer is still held.
    pub down: bool,
    /// Horizontal displacement since the drag started.
    pub movement_x: f32,
    /// Horizontal component of the latest movement; only its sign matters.
    pub direction_x: f32,
    /// Speed of the latest movement in points per millisecond.
    pub velocity: f32,
}

impl GestureSample {
    pub fn held(movement_x: f32, direction_x: f32, velocity: f32) -> Self {
        Self { down: true, movement_x, direction_x, velocity }
    }

    pub fn released(movement_x: f32, direction_x: f32, velocity: f32) -> Self {
        Self { down: false, movement_x, direction_x, velocity }
    }

    pub fn is_flick(&self, threshold: f32) -> bool {
        self.velocity > threshold
    }

    /// -1 for leftward movement, 1 otherwise.
    pub fn direction_sign(&self) -> f32 {
        if self.direction_x < 0.0 {
            -1.0
        } else {
            1.0
        }
    }
}
