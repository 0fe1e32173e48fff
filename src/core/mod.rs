pub mod animation;
pub mod deck;
pub mod errors;
pub mod gesture;
pub mod models;

pub use animation::{
    CardAnimation,
    CardPose,
    SpringConfig,
};
pub use deck::{
    CardPhase,
    CardState,
    DeckController,
    DeckSnapshot,
};
pub use errors::FlickDeckError;
pub use gesture::GestureSample;
pub use models::{
    Card,
    Deck,
    DeckConfig,
    DeckTuning,
};
