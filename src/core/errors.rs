use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlickDeckError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck lists {images} images but {captions} captions")]
    MismatchedLengths { images: usize, captions: usize },

    #[error("Deck must contain at least one card")]
    EmptyDeck,
}

impl From<std::io::Error> for FlickDeckError {
    fn from(error: std::io::Error) -> Self {
        FlickDeckError::Io(Box::new(error))
    }
}
