pub type PlaygroundResult<T> = Result<T, PlaygroundError>;

#[derive(thiserror::Error, Debug)]
pub enum PlaygroundError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("routing error: {0}")]
    Routing(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("image error: {0}")]
    Image(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaygroundError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn routing(msg: impl Into<String>) -> Self {
        Self::Routing(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }
}

impl From<serde_json::Error> for PlaygroundError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

impl From<image::ImageError> for PlaygroundError {
    fn from(err: image::ImageError) -> Self {
        Self::image(err.to_string())
    }
}
