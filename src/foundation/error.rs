/// Convenience result type used across deckhand.
pub type DeckResult<T> = Result<T, DeckError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum DeckError {
    /// Invalid user-provided deck or theme data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a scene into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeckError {
    /// Build a [`DeckError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DeckError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DeckError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_map_to_variants() {
        assert!(matches!(
            DeckError::validation("x"),
            DeckError::Validation(_)
        ));
        assert!(matches!(DeckError::render("x"), DeckError::Render(_)));
        assert!(matches!(DeckError::serde("x"), DeckError::Serde(_)));
    }

    #[test]
    fn display_includes_category() {
        let e = DeckError::validation("deck must contain at least one slide");
        assert!(e.to_string().starts_with("validation error:"));
    }
}
