//! Procedural texture synthesis and animation
//!
//! - [`noise`] and [`color`]: deterministic scalar fields and ARGB color math
//! - [`procedural`]: one-shot texture generators
//! - [`effects`]: time-driven effects (lava, water, fire, plasma, ...)
//! - [`post`]: in-place filters over existing textures
//! - [`uv`]: texture-coordinate transform matrices
//! - [`manager`]: the frame-budgeted scheduler that drives animated effects
//!
//! Pixels are `0xAARRGGBB` words in pitched rows behind a [`TextureHandle`].
//! Every operation that writes pixels takes the handle's lock first and
//! quietly does nothing when the lock is unavailable.

pub mod color;
pub mod effects;
pub mod error;
pub mod manager;
pub mod noise;
pub mod post;
pub mod procedural;
pub mod texture;
pub mod util;
pub mod uv;

pub use color::Color;
pub use effects::AnimatedEffect;
pub use error::{ConfigError, EffectFault, TextureError};
pub use manager::{DemoConfig, EffectManager, FrameSchedule, ManagerConfig};
pub use texture::{PixelBuffer, TextureHandle};
