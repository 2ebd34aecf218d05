pub mod state;
pub mod style;

#[cfg(test)]
mod tests;

pub use state::{CardState, ImageRef};
pub use style::{FrameStyle, SealKind, Tone};
