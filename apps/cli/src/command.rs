use std::str::FromStr;

use game_core::Move;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Restart,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" => Ok(Command::Play(Move::Rock)),
            "p" => Ok(Command::Play(Move::Paper)),
            "s" => Ok(Command::Play(Move::Scissors)),
            "restart" | "new" => Ok(Command::Restart),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => other
                .parse::<Move>()
                .map(Command::Play)
                .map_err(|_| format!("Unknown command '{other}'. Type 'help' for options.")),
        }
    }
}

pub const HELP: &str = "\
Commands:
  rock | r        throw rock
  paper | p       throw paper
  scissors | s    throw scissors
  restart         start a new game once this one is over
  help            show this help
  quit            leave";
