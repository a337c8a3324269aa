//! Commands in, events out.
//!
//! Games are driven by explicit `Command`s instead of UI callbacks and
//! report what happened as `GameEvent`s. Audio is the only collaborator the
//! engine calls directly, and only through [`play_cues`].

mod audio;
mod command;
mod event;

pub use audio::{play_cues, AudioCue, AudioSink, NullAudio};
pub use command::{Command, CommandKind};
pub use event::GameEvent;
