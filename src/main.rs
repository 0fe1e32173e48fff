use eframe::egui;
use flickdeck::{
    gui::FlickDeckApp,
    persistence::load_deck,
};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flickdeck=info")),
        )
        .init();

    let (deck, tuning) = load_deck();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("flickdeck")
            .with_inner_size([900.0, 820.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "flickdeck",
        options,
        Box::new(move |cc| Ok(Box::new(FlickDeckApp::new(cc, deck, tuning)))),
    )
}
