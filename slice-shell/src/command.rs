//! Shell commands

use std::str::FromStr;

use kinesin_slice::CyclicView;
use thiserror::Error;

pub const HELP: &str = "\
*******************************************************************
quit --------- Quit this program.
help --------- Print this help.
move N ------- Move the slice N steps.
headshift N -- Shift the head of the slice N steps.
tailshift N -- Shift the tail of the slice N steps.
rotate N ----- Rotate the slice N steps.
rev ---------- Reverse the range covered by the slice.
set N c ------ Set the slice component at index N to character 'c'.
get N -------- Print the slice component at index N.
size --------- Print the number of components in the slice.
*******************************************************************";

/// a parsed shell command
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Quit,
    Help,
    /// move both boundaries
    Move(isize),
    /// move head boundary
    HeadShift(isize),
    /// move tail boundary
    TailShift(isize),
    Rotate(isize),
    Reverse,
    /// set element at index
    Set(usize, char),
    Get(usize),
    Size,
}

/// errors from parsing or executing a command
#[derive(PartialEq, Eq, Debug, Error)]
pub enum CommandError {
    #[error("unknown command \"{0}\"")]
    Unknown(String),
    #[error("expecting an argument for command \"{0}\"")]
    MissingArgument(&'static str),
    #[error("argument is not an integer: {0}")]
    NotAnInteger(String),
    #[error("argument is not a valid index: {0}")]
    NotAnIndex(String),
    #[error("expected one character, received {0}")]
    NotOneCharacter(usize),
    #[error(transparent)]
    View(#[from] kinesin_slice::Error),
}

/// what the shell should do after a command ran
#[derive(PartialEq, Eq, Debug)]
pub enum Outcome {
    /// nothing beyond printing the view
    Done,
    /// print a line before the view
    Output(String),
    Help,
    Quit,
}

/// parse next token as a number, mapping failure with `bad`
fn argument<T: FromStr>(
    command: &'static str,
    token: Option<&str>,
    bad: fn(String) -> CommandError,
) -> Result<T, CommandError> {
    let token = token.ok_or(CommandError::MissingArgument(command))?;
    token.parse().map_err(|_| bad(token.to_owned()))
}

fn delta(command: &'static str, token: Option<&str>) -> Result<isize, CommandError> {
    argument(command, token, CommandError::NotAnInteger)
}

fn index(command: &'static str, token: Option<&str>) -> Result<usize, CommandError> {
    argument(command, token, CommandError::NotAnIndex)
}

impl Command {
    /// parse one line of input, returning `None` if it is blank
    ///
    /// Command names are case-insensitive. Extra trailing tokens are ignored.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "quit" => Command::Quit,
            "help" => Command::Help,
            "rev" => Command::Reverse,
            "size" => Command::Size,
            "move" => Command::Move(delta("move", tokens.next())?),
            "headshift" => Command::HeadShift(delta("headshift", tokens.next())?),
            "tailshift" => Command::TailShift(delta("tailshift", tokens.next())?),
            "rotate" => Command::Rotate(delta("rotate", tokens.next())?),
            "get" => Command::Get(index("get", tokens.next())?),
            "set" => {
                let at = index("set", tokens.next())?;
                let value = tokens.next().ok_or(CommandError::MissingArgument("set"))?;
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Command::Set(at, c),
                    _ => return Err(CommandError::NotOneCharacter(value.chars().count())),
                }
            }
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };
        Ok(Some(command))
    }

    /// run command against a view
    pub fn execute(&self, view: &mut CyclicView<'_, char>) -> Result<Outcome, CommandError> {
        match *self {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => return Ok(Outcome::Help),
            Command::Move(delta) => view.move_by(delta),
            Command::HeadShift(delta) => view.move_head_pointer(delta),
            Command::TailShift(delta) => view.move_tail_pointer(delta),
            Command::Rotate(delta) => view.rotate(delta),
            Command::Reverse => view.reverse(),
            Command::Set(index, value) => {
                view.set(index, value)?;
            }
            Command::Get(index) => return Ok(Outcome::Output(view.get(index)?.to_string())),
            Command::Size => return Ok(Outcome::Output(view.len().to_string())),
        }
        Ok(Outcome::Done)
    }
}
