pub mod app;
pub mod caption;
pub mod card_view;
pub mod gesture;
pub mod theme;

pub use app::FlickDeckApp;
