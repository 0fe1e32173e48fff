use std::time::{
    Duration,
    Instant,
};

use eframe::egui;
use tracing::debug;

use super::{
    caption::CaptionPanel,
    card_view::{
        animate_pose,
        card_id,
        seed_pose,
        CardPainter,
        CardTransform,
        DeckLayout,
    },
    gesture::DragTracker,
    theme::{
        set_theme,
        Theme,
    },
};
use crate::core::{
    Deck,
    DeckController,
    DeckSnapshot,
    DeckTuning,
};

pub struct FlickDeckApp {
    controller: DeckController,
    theme: Theme,
    painter: CardPainter,
    drag: DragTracker,
    mounted: bool,
}

impl FlickDeckApp {
    pub fn new(cc: &eframe::CreationContext<'_>, deck: Deck, tuning: DeckTuning) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, &theme);

        let controller = DeckController::new(deck, tuning, &mut rand::rng(), Instant::now());

        Self {
            controller,
            theme,
            painter: CardPainter::new(),
            drag: DragTracker::new(),
            mounted: false,
        }
    }

    fn show_deck(&mut self, ui: &mut egui::Ui, now: Instant) {
        let ctx = ui.ctx().clone();
        let layout = DeckLayout::new(ui.max_rect());
        let snapshot = self.controller.snapshot();

        // The first frame pins every card to its fly-in pose.
        if !self.mounted {
            for card in &snapshot.cards {
                seed_pose(&ctx, card.index, card.animation.from);
            }
            self.mounted = true;
        }

        for card in &snapshot.cards {
            let pose = animate_pose(&ctx, card.index, &card.animation, now);
            let image = self.controller.deck().card(card.index).and_then(|c| c.image.as_deref());
            let bounds = self.painter.paint(ui, &self.theme, layout, card.index, image, pose);

            if snapshot.is_removed(card.index) {
                continue;
            }

            let response = ui.interact(bounds, card_id(card.index), egui::Sense::drag());
            if response.dragged() {
                ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            } else if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Grab);
            }

            let Some(sample) = self.drag.sample(card.index, &response) else {
                continue;
            };
            if self.controller.handle_gesture(card.index, sample, now) && !sample.down {
                if let Some(state) = self.controller.snapshot().card(card.index) {
                    let target = state.animation.to;
                    debug!(
                        index = card.index,
                        phase = ?state.phase,
                        transform = %CardTransform::new(target.rot, target.scale),
                        "Card released"
                    );
                }
            }
        }
    }

    /// Delayed targets and the pending reset change nothing on screen until
    /// their time comes, so wake up for them explicitly.
    fn schedule_repaint(&self, ctx: &egui::Context, snapshot: &DeckSnapshot, now: Instant) {
        let next_start = snapshot
            .cards
            .iter()
            .filter(|card| !card.animation.started(now))
            .map(|card| {
                (card.animation.issued_at + card.animation.delay).saturating_duration_since(now)
            })
            .min();

        let wait: Option<Duration> =
            [next_start, self.controller.time_until_reset(now)].into_iter().flatten().min();
        if let Some(wait) = wait {
            ctx.request_repaint_after(wait);
        }
    }
}

impl eframe::App for FlickDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.tick(now);
        self.controller.set_viewport_width(ctx.screen_rect().width());

        CaptionPanel::show(ctx, &self.theme, self.controller.caption());

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.theme.background(ctx)))
            .show(ctx, |ui| {
                self.show_deck(ui, now);
            });

        let snapshot = self.controller.snapshot();
        self.schedule_repaint(ctx, &snapshot, now);
    }
}
