use anyhow::Context;
use moodlog::config::loader::ConfigLoader;
use moodlog::models::moment::MomentId;
use moodlog::observability::init_tracing;
use moodlog::services::SessionDriver;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "\
Type journal text line by line. Commands:
  :commit             save the draft as a moment
  :edit <id> <text>   replace a moment's text
  :list               print all moments
  :finish             finish the entry without saving
  :reset              start a fresh session
  :quit              exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config)?;
    let _guard = init_tracing(&config.logging)?;

    info!(
        "Starting {} ({} environment)",
        config.app_name, config.environment
    );

    let driver = SessionDriver::start(config.engine.clone());
    let mut events = driver.subscribe();

    tokio::spawn(async move {
        while let Ok(effect) = events.recv().await {
            match serde_json::to_string(&effect) {
                Ok(json) => println!("timer: {}", json),
                Err(e) => warn!("Failed to encode timer event: {}", e),
            }
        }
    });

    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut draft = String::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest)) {
            (":quit", _) => break,
            (":commit", _) => {
                match driver.on_commit_requested().await {
                    Some(moment) => println!("saved: {}", serde_json::to_string(&moment)?),
                    None => println!("nothing to save"),
                }
                draft.clear();
            }
            (":edit", rest) => {
                let Some((id, text)) = rest.split_once(' ') else {
                    println!("usage: :edit <id> <text>");
                    continue;
                };
                let Ok(id) = id.parse::<u64>() else {
                    println!("invalid moment id: {}", id);
                    continue;
                };
                match driver.on_edit_requested(MomentId(id), text).await {
                    Ok(moment) => println!("edited: {}", serde_json::to_string(&moment)?),
                    Err(e) => println!("error [{}]: {}", e.code(), e),
                }
            }
            (":list", _) => {
                let moments = driver.list_moments().await;
                println!("{}", serde_json::to_string_pretty(&moments)?);
            }
            (":finish", _) => match driver.finish_entry().await {
                Ok(()) => {
                    draft.clear();
                    println!("entry finished");
                }
                Err(e) => println!("{}", e),
            },
            (":reset", _) => {
                driver.reset_session().await;
                draft.clear();
                println!("session reset");
            }
            _ => {
                draft.push_str(line);
                draft.push(' ');
                let snapshot = driver.on_text_changed(&draft).await;
                println!("{}", serde_json::to_string(&snapshot)?);
            }
        }
    }

    driver.shutdown();
    info!("Goodbye");
    Ok(())
}
