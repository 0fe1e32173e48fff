use std::{
    collections::BTreeSet,
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use rand::Rng;
use tracing::{
    debug,
    info,
    warn,
};

use super::{
    animation::{
        CardAnimation,
        CardPose,
        SpringConfig,
    },
    gesture::GestureSample,
    models::{
        Deck,
        DeckTuning,
    },
};

const HELD_SCALE: f32 = 1.1;
const FAN_ROTATION_SPREAD: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Resting,
    Held,
    /// Released without a flick, heading back to rest.
    Returning,
    /// Flicked away. Stays here until the deck resets.
    FlyingAway,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub index: usize,
    pub animation: CardAnimation,
    pub phase: CardPhase,
}

/// Immutable view of the deck after one update.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSnapshot {
    pub revision: u64,
    pub cards: Vec<CardState>,
    pub removed: BTreeSet<usize>,
    pub caption_index: usize,
    pub reset_at: Option<Instant>,
}

impl DeckSnapshot {
    pub fn card(&self, index: usize) -> Option<&CardState> {
        self.cards.get(index)
    }

    pub fn is_removed(&self, index: usize) -> bool {
        self.removed.contains(&index)
    }
}

/// Owns the deck state and turns drag gestures into card animation targets.
pub struct DeckController {
    deck: Deck,
    tuning: DeckTuning,
    resting: Vec<CardPose>,
    cards: Vec<CardState>,
    removed: BTreeSet<usize>,
    caption_index: usize,
    held: Option<usize>,
    viewport_width: f32,
    reset_at: Option<Instant>,
    revision: u64,
    snapshot: Arc<DeckSnapshot>,
}

impl DeckController {
    pub fn new<R: Rng>(
        deck: Deck,
        tuning: DeckTuning,
        rng: &mut R,
        now: Instant,
    ) -> Self {
        let resting: Vec<CardPose> = (0..deck.len())
            .map(|i| {
                let rot = -FAN_ROTATION_SPREAD / 2.0 + rng.random::<f32>() * FAN_ROTATION_SPREAD;
                CardPose::fan(i, rot)
            })
            .collect();

        let cards = resting
            .iter()
            .enumerate()
            .map(|(index, pose)| CardState {
                index,
                animation: CardAnimation::new(
                    CardPose::fly_in(),
                    *pose,
                    tuning.stagger(index),
                    SpringConfig::GENTLE,
                    now,
                ),
                phase: CardPhase::Resting,
            })
            .collect();

        let mut controller = Self {
            deck,
            tuning,
            resting,
            cards,
            removed: BTreeSet::new(),
            caption_index: 0,
            held: None,
            viewport_width: 0.0,
            reset_at: None,
            revision: 0,
            snapshot: Arc::new(DeckSnapshot {
                revision: 0,
                cards: Vec::new(),
                removed: BTreeSet::new(),
                caption_index: 0,
                reset_at: None,
            }),
        };
        controller.publish();
        info!(cards = controller.len(), "Deck ready");
        controller
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn tuning(&self) -> &DeckTuning {
        &self.tuning
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn snapshot(&self) -> Arc<DeckSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn caption_index(&self) -> usize {
        self.caption_index
    }

    pub fn caption(&self) -> &str {
        self.deck.caption(self.caption_index)
    }

    pub fn removed(&self) -> &BTreeSet<usize> {
        &self.removed
    }

    pub fn is_removed(&self, index: usize) -> bool {
        self.removed.contains(&index)
    }

    pub fn phase(&self, index: usize) -> Option<CardPhase> {
        self.cards.get(index).map(|card| card.phase)
    }

    pub fn held(&self) -> Option<usize> {
        self.held
    }

    pub fn resting_pose(&self, index: usize) -> Option<CardPose> {
        self.resting.get(index).copied()
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_at.is_some()
    }

    pub fn time_until_reset(&self, now: Instant) -> Option<Duration> {
        self.reset_at.map(|at| at.saturating_duration_since(now))
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
    }

    /// Applies one drag event to card `index`. Returns whether anything changed.
    pub fn handle_gesture(&mut self, index: usize, sample: GestureSample, now: Instant) -> bool {
        if index >= self.cards.len() {
            warn!(index, cards = self.cards.len(), "Ignoring gesture for unknown card");
            return false;
        }

        match self.held {
            Some(held) if held != index => {
                debug!(index, held, "Ignoring gesture while another card is held");
                return false;
            }
            _ => {}
        }
        self.held = if sample.down { Some(index) } else { None };

        let trigger = sample.is_flick(self.tuning.flick_velocity);
        let dir = sample.direction_sign();

        if !sample.down && trigger && self.removed.insert(index) {
            info!(index, velocity = sample.velocity, dir, "Card flicked away");
        }
        let gone = self.removed.contains(&index);

        let x = if gone {
            (self.tuning.offscreen_margin + self.viewport_width) * dir
        } else if sample.down {
            sample.movement_x
        } else {
            0.0
        };
        let rot = sample.movement_x / 100.0 + if gone { dir * 10.0 * sample.velocity } else { 0.0 };
        let scale = if sample.down { HELD_SCALE } else { 1.0 };
        let spring = if sample.down {
            SpringConfig::HELD
        } else if gone {
            SpringConfig::FLYING
        } else {
            SpringConfig::RETURNING
        };

        let card = &mut self.cards[index];
        let to = CardPose { x, y: card.animation.to.y, rot, scale };
        card.animation = card.animation.retarget(to, spring, now);
        card.phase = if gone {
            CardPhase::FlyingAway
        } else if sample.down {
            CardPhase::Held
        } else {
            CardPhase::Returning
        };

        if !sample.down {
            self.caption_index = index;
            if self.removed.len() == self.cards.len() {
                self.schedule_reset(now);
            }
        }

        self.publish();
        true
    }

    /// Runs the deferred reset once it is due. Returns whether the deck was reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(at) if now >= at => {
                self.reset(now);
                true
            }
            _ => false,
        }
    }

    fn schedule_reset(&mut self, now: Instant) {
        if let Some(at) = self.reset_at {
            debug!(remaining = ?at.saturating_duration_since(now), "Deck reset already pending");
            return;
        }

        let delay = self.tuning.reset_delay();
        self.reset_at = Some(now + delay);
        info!(?delay, "All cards gone, deck reset scheduled");
    }

    fn reset(&mut self, now: Instant) {
        self.removed.clear();
        self.reset_at = None;
        self.held = None;

        for card in &mut self.cards {
            card.animation = card.animation.retarget_after(
                self.resting[card.index],
                self.tuning.stagger(card.index),
                SpringConfig::GENTLE,
                now,
            );
            card.phase = CardPhase::Resting;
        }

        info!(cards = self.cards.len(), "Deck reset");
        self.publish();
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.snapshot = Arc::new(DeckSnapshot {
            revision: self.revision,
            cards: self.cards.clone(),
            removed: self.removed.clone(),
            caption_index: self.caption_index,
            reset_at: self.reset_at,
        });
    }
}
