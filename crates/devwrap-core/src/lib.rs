pub mod error;
pub mod format;
pub mod share;
pub mod slides;
pub mod tier;
pub mod types;

pub use error::DecodeError;
pub use share::{ShareMessage, ShareParams};
pub use slides::derive_slides;
pub use tier::{classify, Tier};
pub use types::*;
