use std::str::FromStr;

use tinsel_core::card::style::{FrameStyle, SealKind, Tone};
use tinsel_core::studio::{RequestKind, StudioMessage};

/// What the event loop should wait for after sending a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFor {
    /// The actor finished handling the input message.
    Processing,
    /// A request of this kind finished (its busy flag cleared).
    Request(RequestKind),
}

pub enum CommandAction {
    Send {
        message: StudioMessage,
        wait: WaitFor,
    },
    ShowCard,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP_TEXT: &str = "\
Poster fields:
  /recipient <name>    who the poster is for
  /sender <name>       who it is from
  /tone <tone>         Heartfelt, Funny, Professional, Poetic, Short & Sweet
  /frame <style>       Classic, Candy Cane, Winter Frost, Forest Pine,
                       Midnight Sleigh, Santa's Workshop
  /seal <kind>         Reindeer, Snowflake, Tree, Star, Heart, None
  /message <text>      set the greeting by hand (bare text works too)

Generation:
  /wish                generate the greeting with AI
  /art                 generate poster artwork with AI
  /speak               read the greeting aloud
  /chime               ring the notification chime

Output:
  /export              save the poster as a PNG
  /print               send the poster to the printer
  /share               print share links
  /copy                copy the greeting to the clipboard

Other:
  /card                show the current poster
  /settings            show settings
  /help                this text
  /quit                exit";

/// Parse one line of user input. Bare (non-slash) text edits the message,
/// matching how the original poster form was mostly typed into.
pub fn parse_input(input: &str) -> CommandAction {
    let Some(command) = input.strip_prefix('/') else {
        return CommandAction::Send {
            message: StudioMessage::SetMessage(input.to_string()),
            wait: WaitFor::Processing,
        };
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "recipient" => set_field(rest, "recipient", StudioMessage::SetRecipient),
        "sender" => set_field(rest, "sender", StudioMessage::SetSender),
        "message" => set_field(rest, "message", StudioMessage::SetMessage),

        "tone" => match Tone::from_str(rest) {
            Ok(tone) => send_now(StudioMessage::SetTone(tone)),
            Err(_) => CommandAction::Invalid(format!(
                "Unknown tone '{rest}'. Try Heartfelt, Funny, Professional, Poetic, or Short & Sweet."
            )),
        },
        "frame" => match FrameStyle::from_str(rest) {
            Ok(frame) => send_now(StudioMessage::SetFrame(frame)),
            Err(_) => CommandAction::Invalid(format!(
                "Unknown frame '{rest}'. Try Classic, Candy Cane, Winter Frost, Forest Pine, Midnight Sleigh, or Santa's Workshop."
            )),
        },
        "seal" => match SealKind::from_str(rest) {
            Ok(seal) => send_now(StudioMessage::SetSeal(seal)),
            Err(_) => CommandAction::Invalid(format!(
                "Unknown seal '{rest}'. Try Reindeer, Snowflake, Tree, Star, Heart, or None."
            )),
        },

        "wish" => CommandAction::Send {
            message: StudioMessage::GenerateMessage,
            wait: WaitFor::Request(RequestKind::Message),
        },
        "art" => CommandAction::Send {
            message: StudioMessage::GenerateArtwork,
            wait: WaitFor::Request(RequestKind::Artwork),
        },
        "speak" => CommandAction::Send {
            message: StudioMessage::GenerateSpeech,
            wait: WaitFor::Request(RequestKind::Speech),
        },
        "chime" => send_now(StudioMessage::PlayChime),

        "export" => CommandAction::Send {
            message: StudioMessage::Export,
            wait: WaitFor::Request(RequestKind::Export),
        },
        "print" => send_now(StudioMessage::Print),
        "share" => send_now(StudioMessage::Share),
        "copy" => send_now(StudioMessage::CopyMessage),

        "card" => CommandAction::ShowCard,
        "settings" => send_now(StudioMessage::GetSettings),

        "help" => CommandAction::Help,
        "quit" | "exit" => CommandAction::Quit,

        other => CommandAction::Invalid(format!("Unknown command '/{other}'. Try /help.")),
    }
}

fn set_field(
    value: &str,
    field: &str,
    build: impl FnOnce(String) -> StudioMessage,
) -> CommandAction {
    if value.is_empty() {
        CommandAction::Invalid(format!("Usage: /{field} <text>"))
    } else {
        send_now(build(value.to_string()))
    }
}

fn send_now(message: StudioMessage) -> CommandAction {
    CommandAction::Send {
        message,
        wait: WaitFor::Processing,
    }
}
