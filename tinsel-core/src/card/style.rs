use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Mood selector driving both the greeting prompt and the artwork prompt.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    #[default]
    Heartfelt,
    Funny,
    Professional,
    Poetic,
    #[strum(to_string = "Short & Sweet", serialize = "short")]
    #[serde(rename = "Short & Sweet")]
    ShortAndSweet,
}

impl Tone {
    /// Natural-language style prompt sent to the image model for this mood.
    pub fn art_style_prompt(&self) -> &'static str {
        match self {
            Tone::Heartfelt => {
                "A high-definition masterpiece of Santa Claus quietly placing gifts under a \
                 glowing Christmas tree in a cozy living room with a fireplace, warm golden \
                 lighting, nostalgia, 8k resolution, cinematic."
            }
            Tone::Funny => {
                "A humorous 3D Pixar-style scene of Santa Claus accidentally getting stuck in a \
                 chimney with reindeer laughing nearby, bright colors, expressive faces, snowy \
                 roof background."
            }
            Tone::Professional => {
                "A minimalist and luxury illustration of a golden sleigh flying across a moonlit \
                 sky over a silhouette of a pine forest, elegant gold foil texture, deep navy \
                 blue background, high-end art."
            }
            Tone::Poetic => {
                "A dreamy, ethereal winter scene. An ice-sculpture of a reindeer in a magical \
                 forest under the Aurora Borealis, glowing sparkles, soft watercolor textures, \
                 enchanting and serene."
            }
            Tone::ShortAndSweet => {
                "A cute and charming illustration of Santa's hat resting on a pile of \
                 beautifully wrapped gifts, soft festive colors, clean vector art, heartwarming \
                 holiday design."
            }
        }
    }

    /// Stock image substituted when the image endpoint fails.
    pub fn fallback_image_url(&self) -> &'static str {
        match self {
            Tone::Heartfelt => {
                "https://images.unsplash.com/photo-1543589077-47d816067ce1?q=80&w=1000&auto=format&fit=crop"
            }
            Tone::Funny => {
                "https://images.unsplash.com/photo-1512433990356-47065c86f7e3?q=80&w=1000&auto=format&fit=crop"
            }
            Tone::Professional => {
                "https://images.unsplash.com/photo-1482517967863-00e15c9b44be?q=80&w=1000&auto=format&fit=crop"
            }
            Tone::Poetic => {
                "https://images.unsplash.com/photo-1418985227304-f32df7d84e39?q=80&w=1000&auto=format&fit=crop"
            }
            Tone::ShortAndSweet => {
                "https://images.unsplash.com/photo-1544273677-2415152ef55b?q=80&w=1000&auto=format&fit=crop"
            }
        }
    }
}

/// Decorative border treatment applied to the rendered poster.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum FrameStyle {
    #[default]
    Classic,
    #[strum(to_string = "Candy Cane", serialize = "candy")]
    #[serde(rename = "Candy Cane")]
    CandyCane,
    #[strum(to_string = "Winter Frost", serialize = "frost")]
    #[serde(rename = "Winter Frost")]
    WinterFrost,
    #[strum(to_string = "Forest Pine", serialize = "pine")]
    #[serde(rename = "Forest Pine")]
    ForestPine,
    #[strum(to_string = "Midnight Sleigh", serialize = "midnight")]
    #[serde(rename = "Midnight Sleigh")]
    MidnightSleigh,
    #[strum(to_string = "Santa's Workshop", serialize = "workshop")]
    #[serde(rename = "Santa's Workshop")]
    SantasWorkshop,
}

/// Wax-seal emblem stamped next to the signature.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SealKind {
    Reindeer,
    Snowflake,
    Tree,
    Star,
    Heart,
    #[default]
    None,
}
