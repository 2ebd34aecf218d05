use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod app;
mod banner;
mod commands;
mod compose;
mod formatter;

use crate::app::InteractiveApp;

#[derive(Parser, Debug)]
#[command(name = "tinsel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tinsel - festive poster studio for the terminal")]
struct Args {
    /// Load settings from a specific file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Compose mode: apply the flags below, export a poster, and exit
    #[arg(long)]
    export: bool,

    /// Recipient name (compose mode)
    #[arg(long)]
    recipient: Option<String>,

    /// Sender name (compose mode)
    #[arg(long)]
    sender: Option<String>,

    /// Poster mood: Heartfelt, Funny, Professional, Poetic, or "Short & Sweet"
    #[arg(long)]
    tone: Option<String>,

    /// Border treatment, e.g. Classic or "Candy Cane"
    #[arg(long)]
    frame: Option<String>,

    /// Message text; skipped when --wish is given
    #[arg(long)]
    message: Option<String>,

    /// Generate the greeting with AI before exporting (compose mode)
    #[arg(long)]
    wish: bool,

    /// Generate artwork with AI before exporting (compose mode)
    #[arg(long)]
    art: bool,
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let local = tokio::task::LocalSet::new();
        local.run_until(async_main()).await
    })
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    info!(
        "CLI startup: export={}, settings={:?}, wish={}, art={}",
        args.export, args.settings, args.wish, args.art
    );

    if args.export {
        return compose::run_compose(args).await;
    }

    let mut app = InteractiveApp::new(args.settings).await?;
    app.run().await
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    // Create trace directory in user's home
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    let trace_dir = PathBuf::from(home).join(".tinsel").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("tinsel.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(EnvFilter::new("info"))
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
