use crate::{SigningAlgorithm, SigningSecret};

/// Default clock-skew tolerance applied to `exp`
pub const DEFAULT_LEEWAY_SECS: u64 = 60;

/// Settings for [`crate::TokenCodec`]
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    pub secret: SigningSecret,
    pub algorithm: SigningAlgorithm,
    /// Clock-skew tolerance in seconds
    pub leeway_secs: u64,
    /// When set, issued tokens carry `aud` and decoding requires it
    pub audience: Option<String>,
}

impl TokenCodecConfig {
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            algorithm: SigningAlgorithm::default(),
            leeway_secs: DEFAULT_LEEWAY_SECS,
            audience: None,
        }
    }
}
