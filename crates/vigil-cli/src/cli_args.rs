use std::path::PathBuf;

use clap::Parser;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "vigil",
    about = "Occupancy monitor bot that mirrors room state and activity reports into a channel topic",
    version
)]
/// Public struct `Cli` used across Vigil components.
pub struct Cli {
    #[arg(
        long,
        env = "VIGIL_MARKER_PATH",
        default_value = "/run/open",
        help = "Sentinel marker file whose presence means the room is open."
    )]
    pub marker_path: PathBuf,

    #[arg(
        long,
        env = "VIGIL_POLL_INTERVAL_SECONDS",
        default_value_t = 10,
        value_parser = parse_positive_u64,
        help = "Seconds between presence samples."
    )]
    pub poll_interval_seconds: u64,

    #[arg(
        long,
        env = "VIGIL_CHANNEL",
        default_value = "#clubroom",
        help = "Channel that owns the status topic and accepts commands."
    )]
    pub channel: String,

    #[arg(
        long,
        env = "VIGIL_BOT_IDENT_PATTERN",
        default_value = r"[Vv]igil(?:,\s?|:\s?|\s)",
        help = "Regex prefix recognizing utterances addressed to the bot."
    )]
    pub bot_ident_pattern: String,

    #[arg(
        long = "alert-phrase",
        env = "VIGIL_ALERT_PHRASES",
        value_delimiter = ',',
        help = "Phrases broadcast when the room opens. Defaults to the built-in set when omitted."
    )]
    pub alert_phrases: Vec<String>,

    #[arg(
        long = "unknown-activity-phrase",
        env = "VIGIL_UNKNOWN_ACTIVITY_PHRASES",
        value_delimiter = ',',
        help = "Status replies used while open with no report filed. Defaults to the built-in set when omitted."
    )]
    pub unknown_activity_phrases: Vec<String>,

    #[arg(
        long,
        env = "VIGIL_TOPIC_HEADER",
        default_value = "Current activity",
        help = "Literal leading the bot-owned status segment of the topic."
    )]
    pub topic_header: String,

    #[arg(
        long,
        env = "VIGIL_TOPIC_DELIMITER",
        default_value = " | ",
        help = "Delimiter separating topic segments."
    )]
    pub topic_delimiter: String,

    #[arg(
        long,
        env = "VIGIL_SOUND_DIR",
        help = "Directory holding playback sounds. Doorbell playback is disabled when omitted."
    )]
    pub sound_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "VIGIL_DOORBELL_SOUND",
        default_value = "doorbell.wav",
        help = "Sound file (under the sound directory) played on the doorbell signal."
    )]
    pub doorbell_sound: String,

    #[arg(
        long,
        env = "VIGIL_PHRASE_SEED",
        help = "Optional seed for deterministic phrase selection."
    )]
    pub phrase_seed: Option<u64>,

    #[arg(
        long,
        env = "VIGIL_STATE_PATH",
        help = "Optional path for the write-only diagnostics status snapshot."
    )]
    pub state_path: Option<PathBuf>,

    #[arg(
        long,
        env = "VIGIL_INITIAL_TOPIC",
        default_value = "",
        help = "Initial topic seeded into the dry-run transport."
    )]
    pub initial_topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cli_defaults_match_reference_configuration() {
        let cli = Cli::try_parse_from(["vigil"]).expect("parse defaults");
        assert_eq!(cli.marker_path, PathBuf::from("/run/open"));
        assert_eq!(cli.poll_interval_seconds, 10);
        assert_eq!(cli.channel, "#clubroom");
        assert_eq!(cli.topic_header, "Current activity");
        assert_eq!(cli.topic_delimiter, " | ");
        assert!(cli.alert_phrases.is_empty());
        assert!(cli.sound_dir.is_none());
        assert!(cli.phrase_seed.is_none());
    }

    #[test]
    fn unit_cli_parses_phrase_lists_with_delimiter() {
        let cli = Cli::try_parse_from([
            "vigil",
            "--alert-phrase",
            "Doors open,Lights on",
            "--unknown-activity-phrase",
            "Who knows",
        ])
        .expect("parse phrase lists");
        assert_eq!(
            cli.alert_phrases,
            vec!["Doors open".to_string(), "Lights on".to_string()]
        );
        assert_eq!(cli.unknown_activity_phrases, vec!["Who knows".to_string()]);
    }

    #[test]
    fn regression_zero_poll_interval_is_rejected() {
        assert!(Cli::try_parse_from(["vigil", "--poll-interval-seconds", "0"]).is_err());
    }
}
