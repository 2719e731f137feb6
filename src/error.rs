pub type BetamotionResult<T> = Result<T, BetamotionError>;

#[derive(thiserror::Error, Debug)]
pub enum BetamotionError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BetamotionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            BetamotionError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            BetamotionError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            BetamotionError::evaluation("x")
                .to_string()
                .contains("evaluation error:")
        );
        assert!(
            BetamotionError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = BetamotionError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
