//! Audio cues keyed by verification outcome.
//!
//! Playback is always fire-and-forget. A sink may fail, but the feedback
//! channel swallows the error and carries on.

use crate::error::AudioError;
use crate::models::VerificationOutcome;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Pass,
    Fail,
}

impl From<VerificationOutcome> for AudioCue {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Pass => AudioCue::Pass,
            VerificationOutcome::Fail => AudioCue::Fail,
        }
    }
}

/// Trait for audio playback backends
pub trait AudioSink: Send + Sync {
    /// Start playing `cue`. Must return promptly; never waits for playback.
    fn play(&self, cue: AudioCue) -> Result<(), AudioError>;
}

/// Used when audio is disabled in the configuration
pub struct SilentAudioSink;

impl AudioSink for SilentAudioSink {
    fn play(&self, _cue: AudioCue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Plays sound files through an external player process (e.g. `paplay`)
pub struct CommandAudioSink {
    player: String,
    pass_sound: PathBuf,
    fail_sound: PathBuf,
}

impl CommandAudioSink {
    pub fn new(player: impl Into<String>, pass_sound: PathBuf, fail_sound: PathBuf) -> Self {
        Self {
            player: player.into(),
            pass_sound,
            fail_sound,
        }
    }

    fn sound_for(&self, cue: AudioCue) -> &PathBuf {
        match cue {
            AudioCue::Pass => &self.pass_sound,
            AudioCue::Fail => &self.fail_sound,
        }
    }
}

impl AudioSink for CommandAudioSink {
    fn play(&self, cue: AudioCue) -> Result<(), AudioError> {
        let sound = self.sound_for(cue);
        if !sound.exists() {
            return Err(AudioError::SoundMissing(sound.display().to_string()));
        }

        let mut child = Command::new(&self.player)
            .arg(sound)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AudioError::PlayerUnavailable {
                player: self.player.clone(),
                reason: e.to_string(),
            })?;

        // Reap the player off-thread so playback never blocks the caller
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

/// In-memory sink that records every cue, optionally failing each call.
/// Used by headless runs and tests.
#[derive(Default)]
pub struct RecordingAudioSink {
    cues: Mutex<Vec<AudioCue>>,
    fail_playback: bool,
}

impl RecordingAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that records the attempt and then reports the player as missing
    pub fn failing() -> Self {
        Self {
            cues: Mutex::new(Vec::new()),
            fail_playback: true,
        }
    }

    pub fn cues(&self) -> Vec<AudioCue> {
        self.cues
            .lock()
            .map(|cues| cues.clone())
            .unwrap_or_default()
    }
}

impl AudioSink for RecordingAudioSink {
    fn play(&self, cue: AudioCue) -> Result<(), AudioError> {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
        if self.fail_playback {
            return Err(AudioError::PlayerUnavailable {
                player: "recording".to_string(),
                reason: "playback disabled".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sound_file_is_an_error_not_a_panic() {
        let sink = CommandAudioSink::new(
            "paplay",
            PathBuf::from("/nonexistent/pass.wav"),
            PathBuf::from("/nonexistent/fail.wav"),
        );
        assert!(matches!(
            sink.play(AudioCue::Pass),
            Err(AudioError::SoundMissing(_))
        ));
    }

    #[test]
    fn test_missing_player_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sound = dir.path().join("pass.wav");
        std::fs::write(&sound, b"RIFF").expect("write sound");
        let sink = CommandAudioSink::new(
            "scanmatch-no-such-player",
            sound.clone(),
            sound,
        );
        assert!(matches!(
            sink.play(AudioCue::Fail),
            Err(AudioError::PlayerUnavailable { .. })
        ));
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingAudioSink::new();
        sink.play(AudioCue::Pass).expect("record");
        sink.play(AudioCue::Fail).expect("record");
        assert_eq!(sink.cues(), vec![AudioCue::Pass, AudioCue::Fail]);
    }
}
