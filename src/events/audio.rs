//! Audio cues and the sink they are played on.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::event::GameEvent;
use crate::core::{Outcome, SoundError};

/// Categorical sound cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    Start,
    Flip,
    Win,
    Lose,
}

impl AudioCue {
    /// Win or lose sting for a resolved round. Neutral rounds are silent.
    #[must_use]
    pub const fn for_outcome(outcome: &Outcome) -> Option<Self> {
        if outcome.is_win() {
            Some(AudioCue::Win)
        } else if outcome.is_loss() {
            Some(AudioCue::Lose)
        } else {
            None
        }
    }
}

/// Fire-and-forget audio output.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue) -> Result<(), SoundError>;
}

/// Discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Play every cue in `events`, in order. Failures are logged and skipped.
///
/// Returns how many cues played successfully.
pub fn play_cues(sink: &mut dyn AudioSink, events: &[GameEvent]) -> usize {
    let mut played = 0;
    for cue in events.iter().filter_map(GameEvent::cue) {
        match sink.play(cue) {
            Ok(()) => played += 1,
            Err(err) => warn!(?cue, error = %err, "sound cue failed"),
        }
    }
    played
}
