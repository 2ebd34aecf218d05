//! Non-interactive compose mode: apply flags, optionally generate, export.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;

use tinsel_core::card::style::{FrameStyle, Tone};
use tinsel_core::settings::SettingsManager;
use tinsel_core::studio::actor::{StudioActor, StudioMessage};
use tinsel_core::studio::events::StudioEvent;
use tinsel_core::studio::RequestKind;

use crate::Args;

pub async fn run_compose(args: Args) -> Result<()> {
    let settings_manager = match args.settings {
        Some(path) => SettingsManager::from_path(path)?,
        None => SettingsManager::new()?,
    };
    let (actor, mut event_rx) = StudioActor::launch(settings_manager);

    if let Some(recipient) = args.recipient {
        actor.send(StudioMessage::SetRecipient(recipient))?;
    }
    if let Some(sender) = args.sender {
        actor.send(StudioMessage::SetSender(sender))?;
    }
    if let Some(tone) = args.tone {
        let tone = Tone::from_str(&tone).map_err(|_| anyhow!("unknown tone '{tone}'"))?;
        actor.send(StudioMessage::SetTone(tone))?;
    }
    if let Some(frame) = args.frame {
        let frame = FrameStyle::from_str(&frame).map_err(|_| anyhow!("unknown frame '{frame}'"))?;
        actor.send(StudioMessage::SetFrame(frame))?;
    }
    if let Some(message) = args.message {
        actor.send(StudioMessage::SetMessage(message))?;
    }

    if args.wish {
        actor.send(StudioMessage::GenerateMessage)?;
        wait_for_request(&mut event_rx, RequestKind::Message).await?;
    }
    if args.art {
        actor.send(StudioMessage::GenerateArtwork)?;
        wait_for_request(&mut event_rx, RequestKind::Artwork).await?;
    }

    actor.send(StudioMessage::Export)?;
    wait_for_request(&mut event_rx, RequestKind::Export).await?;
    Ok(())
}

async fn wait_for_request(
    event_rx: &mut mpsc::UnboundedReceiver<StudioEvent>,
    wanted: RequestKind,
) -> Result<()> {
    while let Some(event) = event_rx.recv().await {
        match event {
            StudioEvent::BusyChanged { kind, busy } if kind == wanted && !busy => return Ok(()),
            StudioEvent::MessageReady { message, .. } => println!("Greeting: {message}"),
            StudioEvent::ExportFinished { path } => println!("Poster saved to {}", path.display()),
            StudioEvent::Error(error) => return Err(anyhow!(error)),
            _ => {}
        }
    }
    Err(anyhow!("studio exited before the request finished"))
}
