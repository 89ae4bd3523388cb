use std::collections::BTreeMap;
use std::sync::Arc;

use futures::StreamExt;

use reframe::api::SimulatedClient;
use reframe::channels::{Channel, CliChannel};
use reframe::chat::ChatEngine;
use reframe::config::AppConfig;
use reframe::credentials::{CredentialStore, FileCredentialStore, verify_key};
use reframe::speech::SpeechCapabilities;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("🧠 Reframe v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Transform limiting beliefs and develop personal power.");
    eprintln!("   Tell me what you'd like to work on, or type /help for commands.\n");

    let credentials: Arc<dyn CredentialStore> =
        Arc::new(FileCredentialStore::new(&config.credential_path));
    match credentials.get() {
        Ok(Some(_)) => {}
        Ok(None) => {
            // Non-blocking: everything except AI analysis works without a key.
            eprintln!("   (No API key set — AI analysis is disabled. /key <value> to set one.)\n");
        }
        Err(e) => tracing::warn!("Could not read credential store: {e}"),
    }

    let api = Arc::new(SimulatedClient::new(
        Arc::clone(&credentials),
        config.response_delay,
    ));
    let engine = ChatEngine::new(api, config.response_delay);
    let speech = SpeechCapabilities::detect(config.speak_instructions);

    let channel = CliChannel::new();
    let mut input = channel.start().await?;

    while let Some(line) = input.next().await {
        if let Some(command) = line.strip_prefix('/') {
            if !handle_command(command, &engine, &credentials, &config, &channel).await? {
                break;
            }
            continue;
        }

        for message in engine.send(&line).await {
            channel.respond(&message.content).await?;
            if let Some(synthesizer) = &speech.synthesizer {
                if let Err(e) = synthesizer.speak(&message.content).await {
                    tracing::warn!("Speech synthesis failed: {e}");
                }
            }
        }
    }

    Ok(())
}

/// Handle a `/command`. Returns `false` when the REPL should exit.
async fn handle_command(
    command: &str,
    engine: &ChatEngine,
    credentials: &Arc<dyn CredentialStore>,
    config: &AppConfig,
    channel: &CliChannel,
) -> Result<bool, Box<dyn std::error::Error>> {
    let (name, args) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "quit" | "exit" => return Ok(false),
        "help" => {
            channel
                .notify(
                    "Commands: /key <value> | /key clear | /analyze [1-10] <belief> | \
                     /assess <dim>=<score> ... | /start <script-id> | /back | /reset | /quit",
                )
                .await?;
        }
        "key" => match args.trim() {
            "" => {
                let status = match credentials.get()? {
                    Some(_) => "An API key is set.",
                    None => "No API key is set.",
                };
                channel.notify(status).await?;
            }
            "clear" => {
                credentials.clear()?;
                channel.notify("API key cleared.").await?;
            }
            key => {
                if verify_key(key, config.response_delay).await {
                    credentials.set(key)?;
                    channel.notify("API key saved.").await?;
                } else {
                    channel.notify("That key doesn't look valid.").await?;
                }
            }
        },
        "analyze" => {
            let (intensity, belief) = parse_analyze_args(args);
            if belief.is_empty() {
                channel
                    .notify("Usage: /analyze [intensity 1-10] <belief>")
                    .await?;
            } else {
                for message in engine.analyze(belief, intensity).await {
                    channel.respond(&message.content).await?;
                }
            }
        }
        "assess" => {
            let answers: BTreeMap<String, f32> = args
                .split_whitespace()
                .filter_map(|pair| {
                    let (dim, score) = pair.split_once('=')?;
                    Some((dim.to_string(), score.parse().ok()?))
                })
                .collect();
            if answers.is_empty() {
                channel
                    .notify("Usage: /assess self-awareness=7 vision=6 ...")
                    .await?;
            } else {
                for message in engine.assess(answers).await {
                    channel.respond(&message.content).await?;
                }
            }
        }
        "start" => {
            for message in engine.start_script(args.trim()).await {
                channel.respond(&message.content).await?;
            }
        }
        "back" => {
            for message in engine.previous_step().await {
                channel.respond(&message.content).await?;
            }
        }
        "reset" => {
            engine.reset().await;
            channel.notify("Chat reset.").await?;
        }
        other => {
            channel
                .notify(&format!("Unknown command: /{other} — try /help"))
                .await?;
        }
    }
    Ok(true)
}

/// Split `/analyze` arguments into an intensity and the belief text. An
/// optional leading number in 1-10 sets the intensity; otherwise the whole
/// input is the belief and the intensity defaults to 7.
fn parse_analyze_args(args: &str) -> (u8, &str) {
    let args = args.trim();
    if let Some((first, rest)) = args.split_once(' ') {
        if let Ok(intensity) = first.parse::<u8>() {
            if (1..=10).contains(&intensity) {
                return (intensity, rest.trim());
            }
        }
    }
    (7, args)
}
