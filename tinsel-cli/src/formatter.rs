use tinsel_core::card::state::{CardState, ImageRef};
use tinsel_core::share::ShareLinks;
use tinsel_core::studio::events::NoteLevel;
use tinsel_core::studio::StudioNote;

const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Terminal rendering for studio events. Plain line-based output.
pub struct Formatter;

impl Formatter {
    pub fn new() -> Self {
        Formatter
    }

    pub fn print_system(&self, text: &str) {
        println!("{DIM}{text}{RESET}");
    }

    pub fn print_success(&self, text: &str) {
        println!("{GREEN}{text}{RESET}");
    }

    pub fn print_error(&self, text: &str) {
        eprintln!("{RED}! {text}{RESET}");
    }

    pub fn print_note(&self, note: &StudioNote) {
        match note.level {
            NoteLevel::Info => self.print_system(&note.text),
            NoteLevel::Warning => println!("{YELLOW}{}{RESET}", note.text),
        }
    }

    pub fn print_card(&self, card: &CardState) {
        let image = match &card.image {
            ImageRef::Inline { mime, data } => {
                format!("inline artwork ({mime}, {} KiB)", data.len() / 1024)
            }
            ImageRef::Remote { url } => format!("stock image {url}"),
        };
        let audio = match &card.audio {
            Some(payload) => format!("{} KiB PCM16", payload.len() / 1024),
            None => "none".to_string(),
        };

        println!("┌─ Poster ──────────────────────────────");
        println!("│ To:      {}", card.recipient);
        println!("│ From:    {}", card.sender);
        println!("│ Tone:    {}", card.tone);
        println!("│ Frame:   {}", card.frame);
        println!("│ Seal:    {}", card.seal);
        println!("│ Art:     {image}");
        println!("│ Audio:   {audio}");
        println!("│ Message:");
        for line in textwrap(&card.message, 60) {
            println!("│   {line}");
        }
        println!("└───────────────────────────────────────");
    }

    pub fn print_links(&self, links: &ShareLinks) {
        self.print_system("Share your poster:");
        println!("  WhatsApp: {}", links.whatsapp);
        println!("  Facebook: {}", links.facebook);
        println!("  X:        {}", links.x);
        println!("  Email:    {}", links.email);
    }
}

fn textwrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
