//! Vigil monitor entrypoint.
//!
//! Wires CLI arguments into a monitor runtime with the reference
//! collaborators: filesystem marker probe, seedable phrase picker, aplay
//! sound player, and the dry-run transport. Stdin lines are treated as
//! utterances from the configured channel so the full dispatch path can be
//! exercised locally; SIGUSR2 is relayed as the doorbell event.

mod bootstrap_helpers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use vigil_cli::Cli;
use vigil_runtime::{
    default_alert_phrases, default_unknown_activity_phrases, start_monitor_runtime,
    AplaySoundPlayer, CommandMatcher, CommandOrigin, DryRunTransport, FileMarkerProbe,
    MonitorInboundEvent, MonitorRuntime, MonitorRuntimeConfig, NoopSoundPlayer, PhrasePicker,
    RandomPhrasePicker, SoundPlayer,
};

const CONSOLE_SENDER: &str = "console";

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap_helpers::init_tracing();
    let cli = Cli::parse();

    let alert_phrases = if cli.alert_phrases.is_empty() {
        default_alert_phrases()
    } else {
        cli.alert_phrases.clone()
    };
    let unknown_activity_phrases = if cli.unknown_activity_phrases.is_empty() {
        default_unknown_activity_phrases()
    } else {
        cli.unknown_activity_phrases.clone()
    };

    let config = MonitorRuntimeConfig {
        channel: cli.channel.clone(),
        poll_interval: Duration::from_secs(cli.poll_interval_seconds),
        topic_header: cli.topic_header.clone(),
        topic_delimiter: cli.topic_delimiter.clone(),
        alert_phrases,
        unknown_activity_phrases,
        state_path: cli.state_path.clone(),
    };

    let matcher =
        CommandMatcher::new(&cli.bot_ident_pattern).context("invalid bot identity pattern")?;
    let transport = Arc::new(DryRunTransport::new(&cli.initial_topic));
    let presence = Box::new(FileMarkerProbe::new(cli.marker_path.clone()));
    let phrases: Box<dyn PhrasePicker> = match cli.phrase_seed {
        Some(seed) => Box::new(RandomPhrasePicker::seeded(seed)),
        None => Box::new(RandomPhrasePicker::from_entropy()),
    };
    let sounds: Box<dyn SoundPlayer> = match cli.sound_dir.clone() {
        Some(sound_dir) => Box::new(AplaySoundPlayer::new(sound_dir, cli.doorbell_sound.clone())),
        None => Box::new(NoopSoundPlayer),
    };

    let runtime = MonitorRuntime::new(config, transport, presence, phrases, sounds);
    let (event_tx, event_rx) = mpsc::channel::<MonitorInboundEvent>(64);
    let mut handle = start_monitor_runtime(runtime, event_rx)?;

    println!(
        "vigil monitor started: channel={} marker={} interval_s={}",
        cli.channel,
        cli.marker_path.display(),
        cli.poll_interval_seconds
    );

    let stdin_task = tokio::spawn(relay_stdin_commands(
        event_tx.clone(),
        matcher,
        cli.channel.clone(),
    ));
    #[cfg(unix)]
    let doorbell_task = tokio::spawn(relay_doorbell_signals(event_tx.clone()));
    // event_tx stays alive here so stdin EOF cannot close the event channel
    // and stop the polling loop.

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    println!("vigil monitor shutdown requested");

    stdin_task.abort();
    #[cfg(unix)]
    doorbell_task.abort();
    handle.shutdown().await;
    Ok(())
}

async fn relay_stdin_commands(
    event_tx: mpsc::Sender<MonitorInboundEvent>,
    matcher: CommandMatcher,
    channel: String,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                eprintln!("stdin read failed: {error}");
                break;
            }
        };
        let Some(command) = matcher.parse(&line) else {
            continue;
        };
        let origin = CommandOrigin {
            channel: channel.clone(),
            sender: CONSOLE_SENDER.to_string(),
        };
        if event_tx
            .send(MonitorInboundEvent::Command { origin, command })
            .await
            .is_err()
        {
            break;
        }
    }
}

#[cfg(unix)]
async fn relay_doorbell_signals(event_tx: mpsc::Sender<MonitorInboundEvent>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut doorbell = match signal(SignalKind::user_defined2()) {
        Ok(stream) => stream,
        Err(error) => {
            eprintln!("doorbell signal hook failed: {error}");
            return;
        }
    };
    while doorbell.recv().await.is_some() {
        if event_tx
            .send(MonitorInboundEvent::DoorbellSignal)
            .await
            .is_err()
        {
            break;
        }
    }
}
