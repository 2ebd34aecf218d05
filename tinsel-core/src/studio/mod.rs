pub mod actor;
pub mod events;
pub mod requests;

#[cfg(test)]
mod tests;

pub use actor::{StudioActor, StudioMessage};
pub use events::{RequestKind, StudioEvent, StudioNote};
