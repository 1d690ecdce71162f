use matside::bout::{ReasonCode, ScoreField, Side};
use std::fmt;

/// Operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    ResetScores,
    /// Set the bout length in seconds
    Duration(u32),
    /// Correct the remaining time in seconds
    Time(u32),
    Adjust {
        side: Side,
        field: ScoreField,
        delta: i32,
    },
    /// Winner and reason are optional here; the bout rejects incomplete results
    Finish {
        winner: Option<Side>,
        reason: Option<ReasonCode>,
        description: Option<String>,
    },
    Status,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not a whole number of seconds or an `MM:SS` clock value.
    InvalidSeconds(String),
    /// Score delta is not a signed integer.
    InvalidDelta(String),
    /// Score column is not points, adv or pen.
    InvalidField(String),
    /// Side is not `a` or `b`.
    InvalidSide(String),
    /// Unknown reason code.
    InvalidReason(String),
    /// Command needs an argument that was not given.
    MissingArgument(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSeconds(value) => write!(
                f,
                "Invalid time '{}'. Use seconds or MM:SS (e.g., 'time 2:30')",
                value
            ),
            Self::InvalidDelta(value) => write!(
                f,
                "Invalid score change '{}'. Use a signed number (e.g., 'a points +2')",
                value
            ),
            Self::InvalidField(value) => write!(
                f,
                "Unknown score column '{}'. Use points, adv or pen",
                value
            ),
            Self::InvalidSide(value) => write!(f, "Unknown side '{}'. Use a or b", value),
            Self::InvalidReason(value) => write!(
                f,
                "Unknown reason '{}'. Use submission, points, decision, dq or other",
                value
            ),
            Self::MissingArgument(usage) => write!(f, "Missing argument. Usage: {}", usage),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one line of operator input.
///
/// Keywords are case-insensitive; a `finish` description keeps its case.
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    let Some(head) = parts.first() else {
        return Err(ParseError::UnrecognizedCommand(String::new()));
    };

    match head.to_ascii_lowercase().as_str() {
        "start" | "go" => Ok(Command::Start),
        "pause" | "stop" => Ok(Command::Pause),
        "reset" => Ok(Command::Reset),
        "reset-scores" => Ok(Command::ResetScores),
        "status" | "s" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "duration" => parse_seconds(parts.get(1), "duration SECONDS|MM:SS").map(Command::Duration),
        "time" => parse_seconds(parts.get(1), "time SECONDS|MM:SS").map(Command::Time),
        "finish" => parse_finish(&parts),
        "a" | "b" => parse_adjust(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

fn parse_side(value: &str) -> Result<Side, ParseError> {
    match value.to_ascii_lowercase().as_str() {
        "a" => Ok(Side::A),
        "b" => Ok(Side::B),
        _ => Err(ParseError::InvalidSide(value.to_string())),
    }
}

/// Seconds, either `150` or `2:30`
fn parse_seconds(value: Option<&&str>, usage: &'static str) -> Result<u32, ParseError> {
    let value = value.ok_or(ParseError::MissingArgument(usage))?;
    let invalid = || ParseError::InvalidSeconds(value.to_string());

    match value.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
            let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
            if seconds >= 60 {
                return Err(invalid());
            }
            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .ok_or_else(invalid)
        }
        None => value.parse().map_err(|_| invalid()),
    }
}

/// Parse a score command: "a|b points|adv|pen +N|-N"
fn parse_adjust(parts: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "a|b points|adv|pen +N|-N";

    let side = parse_side(parts[0])?;
    let field = match parts.get(1).map(|f| f.to_ascii_lowercase()) {
        Some(f) if f == "points" || f == "pts" => ScoreField::Points,
        Some(f) if f == "adv" || f == "advantages" => ScoreField::Advantages,
        Some(f) if f == "pen" || f == "penalties" => ScoreField::Penalties,
        Some(_) => return Err(ParseError::InvalidField(parts[1].to_string())),
        None => return Err(ParseError::MissingArgument(USAGE)),
    };
    let raw = parts.get(2).ok_or(ParseError::MissingArgument(USAGE))?;
    let delta = raw
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidDelta(raw.to_string()))?;

    Ok(Command::Adjust { side, field, delta })
}

/// Parse a finish command: "finish [a|b] [REASON] [description...]"
fn parse_finish(parts: &[&str]) -> Result<Command, ParseError> {
    let winner = parts.get(1).map(|s| parse_side(s)).transpose()?;
    let reason = parts
        .get(2)
        .map(|r| r.parse::<ReasonCode>().map_err(|_| ParseError::InvalidReason(r.to_string())))
        .transpose()?;
    let description = (parts.len() > 3).then(|| parts[3..].join(" "));

    Ok(Command::Finish {
        winner,
        reason,
        description,
    })
}
