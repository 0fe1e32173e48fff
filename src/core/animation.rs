use std::time::{
    Duration,
    Instant,
};

// Longest settle time handed to the UI animator, so a degenerate spring still finishes.
const MAX_SETTLE_SECS: f32 = 2.0;

/// Stiffness of the spring driving a card toward its target pose.
///
/// The crate never integrates the spring itself; `settle_time` reduces the
/// configuration to the duration the UI animator should take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub tension: f32,
    pub friction: f32,
}

impl SpringConfig {
    pub const FRICTION: f32 = 50.0;

    /// Card under the pointer: tracks the finger tightly.
    pub const HELD: Self = Self { tension: 800.0, friction: Self::FRICTION };

    /// Card leaving the screen after a flick.
    pub const FLYING: Self = Self { tension: 200.0, friction: Self::FRICTION };

    /// Card snapping back after a released drag.
    pub const RETURNING: Self = Self { tension: 500.0, friction: Self::FRICTION };

    /// Mount and deck reset.
    pub const GENTLE: Self = Self { tension: 170.0, friction: 26.0 };

    /// Approximate seconds for a unit-mass spring to come within ~2% of its target.
    pub fn settle_time(&self) -> f32 {
        let omega = self.tension.max(f32::EPSILON).sqrt();
        let zeta = self.friction.max(0.0) / (2.0 * omega);
        let decay = if zeta < 1.0 {
            zeta * omega
        } else {
            omega * (zeta - (zeta * zeta - 1.0).sqrt())
        };

        if decay <= f32::EPSILON {
            MAX_SETTLE_SECS
        } else {
            (4.0 / decay).min(MAX_SETTLE_SECS)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub rot: f32,
    pub scale: f32,
}

impl CardPose {
    /// Off the top of the screen and oversized, where every card starts.
    pub fn fly_in() -> Self {
        Self { x: 0.0, y: -1000.0, rot: 0.0, scale: 1.5 }
    }

    /// Idle position of card `index` in the fanned stack.
    pub fn fan(index: usize, rot: f32) -> Self {
        Self { x: 0.0, y: index as f32 * -4.0, rot, scale: 1.0 }
    }
}

/// Where a card is headed, and when it starts heading there.
///
/// Until `delay` has passed since `issued_at` the card keeps aiming at `from`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardAnimation {
    pub from: CardPose,
    pub to: CardPose,
    pub delay: Duration,
    pub spring: SpringConfig,
    pub issued_at: Instant,
}

impl CardAnimation {
    pub fn new(
        from: CardPose,
        to: CardPose,
        delay: Duration,
        spring: SpringConfig,
        issued_at: Instant,
    ) -> Self {
        Self { from, to, delay, spring, issued_at }
    }

    pub fn pose_at(&self, now: Instant) -> CardPose {
        if self.started(now) {
            self.to
        } else {
            self.from
        }
    }

    pub fn started(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) >= self.delay
    }

    /// New target effective immediately, starting from wherever this one aims now.
    pub fn retarget(&self, to: CardPose, spring: SpringConfig, now: Instant) -> Self {
        Self::new(self.pose_at(now), to, Duration::ZERO, spring, now)
    }

    /// New target that waits `delay` before taking over.
    pub fn retarget_after(
        &self,
        to: CardPose,
        delay: Duration,
        spring: SpringConfig,
        now: Instant,
    ) -> Self {
        Self::new(self.pose_at(now), to, delay, spring, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_settles_faster_than_returning_and_flying() {
        let held = SpringConfig::HELD.settle_time();
        let returning = SpringConfig::RETURNING.settle_time();
        let flying = SpringConfig::FLYING.settle_time();

        assert!(held < returning, "held {held} returning {returning}");
        assert!(returning < flying, "returning {returning} flying {flying}");
        assert!(flying <= MAX_SETTLE_SECS);
    }

    #[test]
    fn test_degenerate_springs_are_capped() {
        assert_eq!(SpringConfig { tension: 0.0, friction: 50.0 }.settle_time(), MAX_SETTLE_SECS);
        assert_eq!(SpringConfig { tension: 300.0, friction: 0.0 }.settle_time(), MAX_SETTLE_SECS);
    }

    #[test]
    fn test_delayed_animation_holds_from_pose() {
        let start = Instant::now();
        let anim = CardAnimation::new(
            CardPose::fly_in(),
            CardPose::fan(2, 4.0),
            Duration::from_millis(200),
            SpringConfig::GENTLE,
            start,
        );

        assert_eq!(anim.pose_at(start), CardPose::fly_in());
        assert_eq!(anim.pose_at(start + Duration::from_millis(199)), CardPose::fly_in());
        assert_eq!(anim.pose_at(start + Duration::from_millis(200)), CardPose::fan(2, 4.0));
    }

    #[test]
    fn test_retarget_before_delay_starts_from_held_pose() {
        let start = Instant::now();
        let anim = CardAnimation::new(
            CardPose::fly_in(),
            CardPose::fan(1, -3.0),
            Duration::from_millis(100),
            SpringConfig::GENTLE,
            start,
        );
        let target = CardPose { x: 40.0, y: -4.0, rot: 0.4, scale: 1.1 };

        let early = anim.retarget(target, SpringConfig::HELD, start + Duration::from_millis(50));
        assert_eq!(early.from, CardPose::fly_in());
        assert_eq!(early.delay, Duration::ZERO);

        let late = anim.retarget(target, SpringConfig::HELD, start + Duration::from_millis(150));
        assert_eq!(late.from, CardPose::fan(1, -3.0));
        assert_eq!(late.pose_at(start + Duration::from_millis(150)), target);
    }
}
