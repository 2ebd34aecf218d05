//! Share links, clipboard copy, and the framed message they both embed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::card::state::CardState;

/// Ready-to-open share URLs for the known destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinks {
    pub whatsapp: String,
    pub facebook: String,
    pub x: String,
    pub email: String,
}

/// The message as it appears in shared posts and emails.
pub fn framed_message(message: &str, sender: &str) -> String {
    format!("\u{1f384} Merry Christmas! \u{1f385}\n\n\"{message}\"\n\n- Love, {sender}")
}

pub fn share_links(card: &CardState) -> Result<ShareLinks> {
    let text = framed_message(&card.message, &card.sender);

    let mut whatsapp = Url::parse("https://wa.me/").context("whatsapp base url")?;
    whatsapp.query_pairs_mut().append_pair("text", &text);

    let mut facebook =
        Url::parse("https://www.facebook.com/sharer/sharer.php").context("facebook base url")?;
    facebook.query_pairs_mut().append_pair("quote", &text);

    let mut x = Url::parse("https://twitter.com/intent/tweet").context("x base url")?;
    x.query_pairs_mut().append_pair("text", &text);

    let mut email = Url::parse("mailto:").context("mailto base url")?;
    email
        .query_pairs_mut()
        .append_pair("subject", "Merry Christmas!")
        .append_pair("body", &text);

    Ok(ShareLinks {
        whatsapp: whatsapp.to_string(),
        facebook: facebook.to_string(),
        x: x.to_string(),
        email: email.to_string(),
    })
}

/// Copy the raw message text to the system clipboard. Best effort: headless
/// environments have no clipboard and the caller downgrades the failure to a
/// warning.
pub fn copy_message(card: &CardState) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(card.message.clone())
        .context("failed to write clipboard")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> CardState {
        CardState {
            message: "Joy & cheer to all".to_string(),
            sender: "Cousin Eddie".to_string(),
            ..CardState::default()
        }
    }

    #[test]
    fn framed_message_wraps_text_and_signs_it() {
        let framed = framed_message("Ho ho ho", "Santa");
        assert!(framed.contains("\"Ho ho ho\""));
        assert!(framed.ends_with("- Love, Santa"));
        assert!(framed.starts_with("\u{1f384} Merry Christmas!"));
    }

    #[test]
    fn links_point_at_known_destinations() {
        let links = share_links(&sample_card()).unwrap();
        assert!(links.whatsapp.starts_with("https://wa.me/?text="));
        assert!(links
            .facebook
            .starts_with("https://www.facebook.com/sharer/sharer.php?quote="));
        assert!(links.x.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(links.email.starts_with("mailto:?subject="));
    }

    #[test]
    fn message_and_sender_are_percent_encoded() {
        let links = share_links(&sample_card()).unwrap();
        // '&' in the message must not leak as a query separator.
        assert!(links.whatsapp.contains("Joy+%26+cheer"));
        assert!(links.whatsapp.contains("Cousin+Eddie"));

        let url = Url::parse(&links.whatsapp).unwrap();
        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(text.contains("\"Joy & cheer to all\""));
        assert!(text.ends_with("- Love, Cousin Eddie"));
    }
}
