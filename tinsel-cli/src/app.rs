use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc;

use tinsel_core::card::state::{CardState, ImageRef};
use tinsel_core::settings::SettingsManager;
use tinsel_core::studio::actor::{StudioActor, StudioMessage};
use tinsel_core::studio::events::StudioEvent;
use tinsel_core::studio::RequestKind;

use crate::banner::print_banner;
use crate::commands::{parse_input, CommandAction, WaitFor, HELP_TEXT};
use crate::formatter::Formatter;

pub struct InteractiveApp {
    actor: StudioActor,
    event_rx: mpsc::UnboundedReceiver<StudioEvent>,
    formatter: Formatter,
    last_card: Option<CardState>,
}

impl InteractiveApp {
    pub async fn new(settings_path: Option<PathBuf>) -> Result<Self> {
        let settings_manager = match settings_path {
            Some(path) => SettingsManager::from_path(path)?,
            None => SettingsManager::new()?,
        };

        let (actor, event_rx) = StudioActor::launch(settings_manager);
        let formatter = Formatter::new();

        print_banner();
        formatter.print_system("Type /help for commands, /card to see the poster, /quit to exit");

        Ok(Self {
            actor,
            event_rx,
            formatter,
            last_card: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            let line = match rl.readline("\x1b[31m❄\x1b[0m ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(_) => break,
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            rl.add_history_entry(&line)?;

            match parse_input(input) {
                CommandAction::Help => self.formatter.print_system(HELP_TEXT),
                CommandAction::Quit => break,
                CommandAction::Invalid(msg) => self.formatter.print_error(&msg),
                CommandAction::ShowCard => {
                    self.actor.send(StudioMessage::GetCard)?;
                    self.wait_for(WaitFor::Processing).await;
                    if let Some(card) = &self.last_card {
                        self.formatter.print_card(card);
                    }
                }
                CommandAction::Send { message, wait } => {
                    self.actor.send(message)?;
                    self.wait_for(wait).await;
                }
            }
        }

        println!("\nMerry Christmas!");
        Ok(())
    }

    /// Drain events until the command completes. Generation commands wait on
    /// their busy flag clearing; everything else waits for the actor to go
    /// idle. Ctrl-C stops waiting (the request itself keeps running - there
    /// is no cancellation).
    async fn wait_for(&mut self, wait: WaitFor) {
        use tokio::signal;

        let spinner = match wait {
            WaitFor::Request(kind) => Some(busy_spinner(kind)),
            WaitFor::Processing => None,
        };

        loop {
            tokio::select! {
                recv = self.event_rx.recv() => {
                    let Some(event) = recv else { break };
                    let done = match (&event, wait) {
                        (StudioEvent::Processing(processing), WaitFor::Processing) => !processing,
                        (StudioEvent::BusyChanged { kind, busy }, WaitFor::Request(wanted)) => {
                            *kind == wanted && !busy
                        }
                        _ => false,
                    };
                    self.render_event(event);
                    if done {
                        break;
                    }
                }
                _ = signal::ctrl_c() => {
                    self.formatter.print_system("(still working in the background)");
                    break;
                }
            }
        }

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    }

    fn render_event(&mut self, event: StudioEvent) {
        match event {
            StudioEvent::CardChanged(card) => self.last_card = Some(card),
            StudioEvent::Processing(_) | StudioEvent::BusyChanged { .. } => {}
            StudioEvent::MessageReady { message, fallback } => {
                if fallback {
                    self.formatter
                        .print_system("The muse was out; used the classic greeting instead:");
                }
                self.formatter.print_success(&format!("\u{201c}{message}\u{201d}"));
            }
            StudioEvent::ArtworkReady { image, fallback } => {
                if fallback {
                    self.formatter
                        .print_system("Artwork generation failed; using a stock image.");
                }
                match image {
                    ImageRef::Inline { mime, .. } => self
                        .formatter
                        .print_success(&format!("Fresh artwork painted ({mime}).")),
                    ImageRef::Remote { url } => {
                        self.formatter.print_system(&format!("Artwork: {url}"))
                    }
                }
            }
            StudioEvent::SpeechReady { samples } => {
                if samples > 0 {
                    self.formatter.print_success("Reading your greeting aloud...");
                }
            }
            StudioEvent::ExportFinished { path } => {
                self.formatter
                    .print_success(&format!("Poster saved to {}", path.display()));
            }
            StudioEvent::PrintSubmitted { path } => {
                self.formatter
                    .print_success(&format!("Sent {} to the printer", path.display()));
            }
            StudioEvent::ShareLinksReady(links) => self.formatter.print_links(&links),
            StudioEvent::MessageCopied => self.formatter.print_system("Greeting copied to clipboard"),
            StudioEvent::Settings(settings) => {
                match serde_json::to_string_pretty(&settings) {
                    Ok(pretty) => self.formatter.print_system(&pretty),
                    Err(_) => self.formatter.print_system(&settings.to_string()),
                }
            }
            StudioEvent::Note(note) => self.formatter.print_note(&note),
            StudioEvent::Error(error) => self.formatter.print_error(&error),
        }
    }
}

fn busy_spinner(kind: RequestKind) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .expect("static spinner template")
            .tick_strings(&["❄", "❅", "❆", "❅"]),
    );
    spinner.set_message(match kind {
        RequestKind::Message => "Writing your greeting...",
        RequestKind::Artwork => "Artisan painting...",
        RequestKind::Speech => "Warming up the choir...",
        RequestKind::Export => "Rendering your poster...",
    });
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner
}
