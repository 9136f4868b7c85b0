//! tmibot - minimal Twitch chat bot.
//!
//! Echoes every chat message to the log, greets the channel on join, and
//! replies to each sender.

use tmi_bot::{Bot, Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_GREETING: &str = "Hello chat!";

fn usage(program: &str) -> String {
    format!("usage: {program} [--config <path>] <username> <password> <channel>")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut args: Vec<String> = std::env::args().collect();
    let program = args.remove(0);

    // Optional config file; credentials stay on the command line.
    let mut config = Config::default();
    if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            eprintln!("{}", usage(&program));
            std::process::exit(2);
        }
        args.remove(0);
        let path = args.remove(0);
        config = Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "failed to load config");
            e
        })?;
    }

    if args.len() < 3 {
        eprintln!("{}", usage(&program));
        std::process::exit(2);
    }
    let username = args.remove(0);
    let password = args.remove(0);
    let channel = args.remove(0);

    let greeting = config
        .greeting
        .clone()
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    let mut bot =
        Bot::new(&username, &password).with_server(&config.server.host, config.server.port);

    bot.on_join(move |handle| {
        handle.say(&greeting);
    });

    bot.on_message(|handle, sender, text| {
        info!(sender = %sender, text = %text, "chat message");
        handle.say(&format!("Hi @{sender}"));
    });

    info!(user = %username, channel = %channel, "starting tmibot");
    bot.connect_to(&channel).await?;

    info!("session ended");
    Ok(())
}
