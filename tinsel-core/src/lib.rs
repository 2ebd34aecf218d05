pub mod ai;
pub mod audio;
pub mod card;
pub mod export;
pub mod settings;
pub mod share;
pub mod studio;

// Public library API - if you are using tinsel as a library, I will aim to
// keep these types more stable (but everything is public so go nuts).
pub use ai::provider::CreativeProvider;
pub use card::state::{CardState, ImageRef};
pub use card::style::{FrameStyle, SealKind, Tone};
pub use settings::{Settings, SettingsManager};
pub use studio::actor::{StudioActor, StudioMessage};
pub use studio::events::{RequestKind, StudioEvent};
