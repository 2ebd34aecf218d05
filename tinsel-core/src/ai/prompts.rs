use crate::card::style::Tone;

/// Substituted when the text endpoint fails outright, for any
/// recipient/sender/tone combination.
pub const FALLBACK_MESSAGE: &str = "Wishing you a magical holiday season filled with love, joy, \
                                    and peace. May the spirit of Christmas bring you warmth and \
                                    happiness. Merry Christmas!";

/// Substituted when the text endpoint succeeds but returns nothing usable.
pub const EMPTY_RESPONSE_MESSAGE: &str =
    "Wishing you a very Merry Christmas and a Happy New Year filled with joy and laughter!";

/// Aspect-ratio hint sent with every artwork request. Posters are vertical.
pub const ARTWORK_ASPECT_RATIO: &str = "9:16";

pub fn message_prompt(recipient: &str, sender: &str, tone: Tone) -> String {
    format!(
        "Write a beautiful and touching Christmas card message (30-50 words) for {recipient} \
         from {sender}. The tone should be {tone}. CRITICAL: Do not use any markdown formatting \
         like asterisks (*), hashtags (#), or bolding. Just plain elegant text. Incorporate warm \
         festive imagery like sleigh bells, North Pole magic, or Santa's journey if appropriate \
         for the tone."
    )
}

pub fn artwork_prompt(tone: Tone) -> String {
    format!(
        "{} NO ROADS, NO CARS. EXTREME CHRISTMAS VIBES, SNOW, MAGIC.",
        tone.art_style_prompt()
    )
}
