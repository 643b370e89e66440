//! Error types
//!
//! Most of the pixel pipeline never surfaces these: generators and post
//! effects treat a texture that cannot be locked as "nothing to do". The
//! types exist for the places where a caller genuinely needs to know, such
//! as `TextureHandle::try_lock`, custom effect callbacks and config loading.

use thiserror::Error;

/// Why a texture could not be handed out for writing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// Someone else currently holds the lock on this buffer.
    #[error("texture is already locked")]
    Locked,

    /// The resource layer released the buffer; the handle is stale.
    #[error("texture has been released")]
    Released,

    /// Zero-sized buffers are not valid textures.
    #[error("texture dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Row stride shorter than a row of pixels.
    #[error("pitch {pitch} is smaller than width {width}")]
    PitchTooSmall {
        /// Requested width in pixels.
        width: u32,
        /// Requested row stride in pixels.
        pitch: u32,
    },
}

/// Returned by an effect update callback that cannot continue.
///
/// The scheduler removes the faulting entry and carries on with the rest of
/// the frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectFault {
    /// Free-form failure reported by a custom callback.
    #[error("effect update failed: {0}")]
    Failed(String),

    /// The callback needed its texture and could not get it.
    #[error("effect texture unavailable: {0}")]
    Texture(#[from] TextureError),
}

impl EffectFault {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Configuration loading and validation failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_errors_render_readable_messages() {
        let err = TextureError::ZeroDimension {
            width: 0,
            height: 16,
        };
        assert_eq!(
            err.to_string(),
            "texture dimensions must be non-zero (got 0x16)"
        );
        assert_eq!(TextureError::Locked.to_string(), "texture is already locked");
    }

    #[test]
    fn texture_error_converts_into_fault() {
        let fault: EffectFault = TextureError::Released.into();
        assert_eq!(fault, EffectFault::Texture(TextureError::Released));
        assert_eq!(
            EffectFault::failed("boom").to_string(),
            "effect update failed: boom"
        );
    }
}
