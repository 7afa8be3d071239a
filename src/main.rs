mod chat;
mod cli;
mod config;
mod content;
mod llm;
mod logging;
mod render;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use llm::{ChatError, Transport};
use logging::LogTarget;
use render::{html::HtmlMath, terminal};
use std::{path::Path, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env().with_model_override(cli.model);

    let log_target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Some(_)) => LogTarget::Stderr,
        (None, None) => LogTarget::Discard,
    };
    logging::init(log_target)?;

    match cli.command {
        Some(Commands::Ask {
            message,
            html,
            raw,
            dark,
        }) => {
            let client = config.build_client()?;
            let prompt = message.join(" ");

            if raw {
                let reply = client.send(&prompt).await.map_err(user_facing)?;
                println!("{}", reply);
                return Ok(());
            }

            let transport: Arc<dyn Transport> = Arc::new(client);
            let mut session = chat::Session::new(Ok(transport));
            let record = session
                .submit(&prompt)
                .await
                .context("Nothing to send")?;

            if record.sender == chat::Sender::Error {
                anyhow::bail!("{}", record.text().unwrap_or(llm::UNKNOWN_ERROR_MESSAGE));
            }

            println!("{}", terminal::plain_text(&terminal::record_lines(record, None)));
            if let Some(path) = html {
                write_page(&path, &record.segments(), HtmlMath { dark })?;
            }
        }
        Some(Commands::Segment { text, html, dark }) => {
            let text = text.join(" ");
            let sanitized = content::sanitize(&text);
            let segments = content::segment(&sanitized);

            for segment in &segments {
                let kind = match segment.kind {
                    content::SegmentKind::Text => "text",
                    content::SegmentKind::Math => "math",
                };
                println!("{kind}: {}", segment.content);
            }
            if let Some(path) = html {
                write_page(&path, &segments, HtmlMath { dark })?;
            }
        }
        None => {
            let transport = config
                .build_client()
                .map(|client| Arc::new(client) as Arc<dyn Transport>);
            tui::run(chat::Session::new(transport)).await?;
        }
    }

    Ok(())
}

fn user_facing(err: ChatError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

fn write_page(
    path: &Path,
    segments: &[content::Segment<'_>],
    surface: HtmlMath,
) -> Result<()> {
    let page = surface.page(segments);
    std::fs::write(path, page).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote HTML page");
    Ok(())
}
