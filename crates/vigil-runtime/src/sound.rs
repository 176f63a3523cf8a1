use std::path::PathBuf;

use anyhow::{Context, Result};

/// Trait contract for `SoundPlayer` behavior.
pub trait SoundPlayer: Send + Sync {
    /// Plays the doorbell sound. Best-effort; callers log failures.
    fn play_doorbell(&self) -> Result<()>;
}

/// Player that does nothing; used when no sound directory is configured.
pub struct NoopSoundPlayer;

impl SoundPlayer for NoopSoundPlayer {
    fn play_doorbell(&self) -> Result<()> {
        Ok(())
    }
}

/// Plays sounds by spawning `aplay` against files under a sound directory.
///
/// The child is fire-and-forget; tokio reaps it in the background so the
/// dispatch loop never waits on playback.
pub struct AplaySoundPlayer {
    sound_dir: PathBuf,
    doorbell_sound: String,
}

impl AplaySoundPlayer {
    pub fn new(sound_dir: PathBuf, doorbell_sound: String) -> Self {
        Self {
            sound_dir,
            doorbell_sound,
        }
    }
}

impl SoundPlayer for AplaySoundPlayer {
    fn play_doorbell(&self) -> Result<()> {
        if self.doorbell_sound.is_empty() {
            return Ok(());
        }
        let sound_path = self.sound_dir.join(&self.doorbell_sound);
        tokio::process::Command::new("aplay")
            .arg(&sound_path)
            .spawn()
            .with_context(|| format!("failed to spawn aplay for {}", sound_path.display()))?;
        Ok(())
    }
}
