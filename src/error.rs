// MIT License

/// All errors that can occur in the housecat library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store has no sensor with this id. Sensors are never created
    /// implicitly; register them with `add_sensor` first.
    #[error("Unknown sensor: {id}")]
    UnknownSensor { id: String },

    /// An image with zero dimensions or no pixel data was submitted for
    /// detection. Distinct from a valid image that simply contains no cat.
    #[error("Empty camera image")]
    EmptyImage,

    /// The status store backend failed.
    #[error("Store failure: {reason}")]
    Store { reason: String },

    /// The cat detector failed to analyze an image.
    #[error("Detector failure: {reason}")]
    Detector { reason: String },
}

impl Error {
    /// Whether this error was caused by the caller's input rather than a
    /// collaborator failure.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::UnknownSensor { .. } | Error::EmptyImage)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
