pub mod traits;

pub use traits::Surface;

#[cfg(test)]
pub(crate) use traits::recording::{DrawCall, RecordingSurface};
