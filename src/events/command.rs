//! Player commands.
//!
//! Every user action reaches a game as a `Command`, consumed by a single
//! transition function (see [`crate::rules::RoundRules::apply`]).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{ArcadeError, Result};
use crate::race::RacerId;

/// A request from the presentation layer or a scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Pay the entry cost and start a round.
    StartRound,
    /// Flip the card at this index.
    SelectSlot(usize),
    /// Back a racer for the next race.
    SelectRacer(RacerId),
    /// Wall-clock time has passed.
    Tick(Duration),
    /// Abandon the round in flight.
    Cancel,
}

/// Payload-free command discriminant, for listing legal commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    StartRound,
    SelectSlot,
    SelectRacer,
    Tick,
    Cancel,
}

impl CommandKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CommandKind::StartRound => "start_round",
            CommandKind::SelectSlot => "select_slot",
            CommandKind::SelectRacer => "select_racer",
            CommandKind::Tick => "tick",
            CommandKind::Cancel => "cancel",
        }
    }
}

impl Command {
    /// A `Tick` from fractional seconds, as host timers report them.
    pub fn tick_secs(seconds: f64) -> Result<Self> {
        Duration::try_from_secs_f64(seconds)
            .map(Command::Tick)
            .map_err(|err| ArcadeError::InvalidDuration(format!("{seconds}s: {err}")))
    }

    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::StartRound => CommandKind::StartRound,
            Command::SelectSlot(_) => CommandKind::SelectSlot,
            Command::SelectRacer(_) => CommandKind::SelectRacer,
            Command::Tick(_) => CommandKind::Tick,
            Command::Cancel => CommandKind::Cancel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(Command::SelectSlot(4).kind(), CommandKind::SelectSlot);
        assert_eq!(
            Command::SelectRacer(RacerId::new("hydra")).kind().name(),
            "select_racer"
        );
        assert_eq!(Command::Tick(Duration::from_millis(16)).kind(), CommandKind::Tick);
    }

    #[test]
    fn test_tick_from_seconds() {
        assert_eq!(
            Command::tick_secs(0.25).unwrap(),
            Command::Tick(Duration::from_millis(250))
        );
        assert_eq!(Command::tick_secs(0.0).unwrap(), Command::Tick(Duration::ZERO));

        for bad in [-0.016, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Command::tick_secs(bad),
                Err(ArcadeError::InvalidDuration(_))
            ));
        }
    }

    #[test]
    fn test_command_serde() {
        let cmd = Command::SelectRacer(RacerId::new("dragon"));
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"SelectRacer":"dragon"}"#);
        assert_eq!(serde_json::from_str::<Command>(&json).unwrap(), cmd);
    }
}
