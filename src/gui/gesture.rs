use eframe::egui::Response;

use crate::core::GestureSample;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    index: usize,
    origin_x: f32,
    movement_x: f32,
    direction_x: f32,
}

impl ActiveDrag {
    fn new(index: usize, origin_x: f32) -> Self {
        Self { index, origin_x, movement_x: 0.0, direction_x: 0.0 }
    }

    /// `pointer_x` is `None` once the pointer is gone (touch lifted); the last
    /// displacement is kept. A zero `delta_x` keeps the previous direction.
    fn advance(
        &mut self,
        down: bool,
        pointer_x: Option<f32>,
        delta_x: f32,
        speed_per_sec: f32,
    ) -> GestureSample {
        if let Some(x) = pointer_x {
            self.movement_x = x - self.origin_x;
        }
        if delta_x != 0.0 {
            self.direction_x = delta_x;
        }

        GestureSample {
            down,
            movement_x: self.movement_x,
            direction_x: self.direction_x,
            velocity: speed_per_sec / 1000.0,
        }
    }
}

/// Turns egui drag responses into gesture samples. Tracks one drag at a time.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample for card `index` this frame, if it is being dragged or was just released.
    pub fn sample(&mut self, index: usize, response: &Response) -> Option<GestureSample> {
        let (press_origin, pointer, delta, velocity) = response.ctx.input(|i| {
            (i.pointer.press_origin(), i.pointer.interact_pos(), i.pointer.delta(), i.pointer.velocity())
        });

        if response.drag_started() {
            let origin = press_origin.or(pointer).map(|p| p.x).unwrap_or_default();
            self.active = Some(ActiveDrag::new(index, origin));
        }

        let released = response.drag_stopped();
        if !response.dragged() && !released {
            return None;
        }

        let drag = self.active.as_mut().filter(|drag| drag.index == index)?;
        let sample = drag.advance(!released, pointer.map(|p| p.x), delta.x, velocity.length());
        if released {
            self.active = None;
        }
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_is_relative_to_press_origin() {
        let mut drag = ActiveDrag::new(2, 100.0);

        let sample = drag.advance(true, Some(160.0), 4.0, 300.0);
        assert!(sample.down);
        assert_eq!(sample.movement_x, 60.0);
        assert_eq!(sample.direction_x, 4.0);
        assert!((sample.velocity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_release_without_pointer_keeps_last_movement_and_direction() {
        let mut drag = ActiveDrag::new(0, 50.0);
        drag.advance(true, Some(20.0), -6.0, 900.0);

        let sample = drag.advance(false, None, 0.0, 800.0);
        assert!(!sample.down);
        assert_eq!(sample.movement_x, -30.0);
        assert_eq!(sample.direction_sign(), -1.0);
        assert!(sample.is_flick(0.2));
    }

    #[test]
    fn test_direction_defaults_to_right() {
        let mut drag = ActiveDrag::new(0, 0.0);
        let sample = drag.advance(false, Some(0.0), 0.0, 0.0);
        assert_eq!(sample.direction_sign(), 1.0);
        assert!(!sample.is_flick(0.2));
    }
}
