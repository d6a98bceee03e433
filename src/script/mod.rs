//! A small line-based language for driving a [`Rover`] from a text file.
//!
//! ```text
//! # patrol the crater rim
//! mission 3
//! name Rimwalker
//! color orange
//! forward 120
//! right 90
//! forward 60
//! sample
//! ```
//!
//! One command per line; `#` starts a comment. The whole script is parsed
//! before anything runs, so a typo on line 40 doesn't leave a half-driven
//! rover behind.
use crate::display::DisplaySink;
use crate::errors::{Result, RoverError};
use crate::rover::Rover;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Forward(i64),
    Backward(i64),
    Right(f64),
    Left(f64),
    SetX(i64),
    SetY(i64),
    Goto(i64, i64),
    Speed(i64),
    Name(String),
    PenColor(String),
    BackgroundColor(String),
    Width(i64),
    Show,
    Hide,
    PenUp,
    PenDown,
    Sample,
    Heading,
    Travel,
    Go,
    Mission(i64),
}

/// A command together with the script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

pub type Script = Vec<Step>;

fn integer(arg: Option<&str>, what: &str) -> std::result::Result<i64, String> {
    let arg = arg.ok_or_else(|| format!("missing {}", what))?;
    arg.parse::<i64>()
        .map_err(|_| format!("{} should be an integer, got '{}'", what, arg))
}

fn number(arg: Option<&str>, what: &str) -> std::result::Result<f64, String> {
    let arg = arg.ok_or_else(|| format!("missing {}", what))?;
    arg.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("{} should be a number, got '{}'", what, arg))
}

fn parse_command(text: &str) -> std::result::Result<Command, String> {
    let mut words = text.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let rest: Vec<&str> = words.collect();
    let arg = rest.first().copied();

    let command = match verb.as_str() {
        "forward" | "fd" => Command::Forward(integer(arg, "units")?),
        "backward" | "back" | "bk" => Command::Backward(integer(arg, "units")?),
        "right" | "rt" => Command::Right(number(arg, "degrees")?),
        "left" | "lt" => Command::Left(number(arg, "degrees")?),
        "setx" => Command::SetX(integer(arg, "x position")?),
        "sety" => Command::SetY(integer(arg, "y position")?),
        "goto" => Command::Goto(
            integer(arg, "x position")?,
            integer(rest.get(1).copied(), "y position")?,
        ),
        "speed" => Command::Speed(integer(arg, "speed")?),
        "width" => Command::Width(integer(arg, "width")?),
        "mission" => Command::Mission(integer(arg, "mission id")?),
        // Names may contain spaces; quotes around them are optional.
        "name" => Command::Name(rest.join(" ").trim_matches('"').to_string()),
        "color" | "pencolor" => {
            Command::PenColor(arg.ok_or("missing color")?.to_string())
        }
        "bgcolor" => Command::BackgroundColor(arg.ok_or("missing color")?.to_string()),
        "show" | "showturtle" => Command::Show,
        "hide" | "hideturtle" => Command::Hide,
        "penup" | "pu" => Command::PenUp,
        "pendown" | "pd" => Command::PenDown,
        "sample" => Command::Sample,
        "heading" => Command::Heading,
        "travel" => Command::Travel,
        "go" => Command::Go,
        other => return Err(format!("unknown command '{}'", other)),
    };

    let takes = match command {
        Command::Name(_) => usize::MAX,
        Command::Goto(..) => 2,
        Command::Forward(_)
        | Command::Backward(_)
        | Command::Right(_)
        | Command::Left(_)
        | Command::SetX(_)
        | Command::SetY(_)
        | Command::Speed(_)
        | Command::Width(_)
        | Command::Mission(_)
        | Command::PenColor(_)
        | Command::BackgroundColor(_) => 1,
        _ => 0,
    };
    if rest.len() > takes {
        return Err(format!("too many arguments for '{}'", verb));
    }
    Ok(command)
}

/// Drops a trailing comment. A `#` glued to a word (`#ff0000`) is a color,
/// not a comment.
fn strip_comment(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return "";
    }
    let bytes = line.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        let ends = bytes.get(i + 1).map_or(true, |next| next.is_ascii_whitespace());
        if *b == b'#' && ends {
            return &line[..i];
        }
    }
    line
}

/// Parses a whole script. Errors carry the 1-based line number.
pub fn parse(text: &str) -> Result<Script> {
    let mut script = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let command = parse_command(line).map_err(|message| RoverError::Script {
            line: index + 1,
            message,
        })?;
        script.push(Step {
            line: index + 1,
            command,
        });
    }
    Ok(script)
}

impl Command {
    /// Runs the command. Queries (`sample`, `heading`, `travel`) hand back
    /// what they read.
    pub fn apply<S: DisplaySink>(&self, rover: &mut Rover<S>) -> Result<Option<String>> {
        match self {
            Command::Forward(units) => rover.forward(*units).map(|_| None),
            Command::Backward(units) => rover.backward(*units).map(|_| None),
            Command::Right(deg) => rover.right(*deg).map(|_| None),
            Command::Left(deg) => rover.left(*deg).map(|_| None),
            Command::SetX(x) => rover.set_x(*x).map(|_| None),
            Command::SetY(y) => rover.set_y(*y).map(|_| None),
            Command::Goto(x, y) => rover.goto(*x, *y).map(|_| None),
            Command::Speed(speed) => rover.set_speed(*speed).map(|_| None),
            Command::Name(name) => rover.set_name(name).map(|_| None),
            Command::PenColor(color) => rover.set_pen_color(color).map(|_| None),
            Command::BackgroundColor(color) => rover.set_background_color(color).map(|_| None),
            Command::Width(width) => rover.set_width(*width).map(|_| None),
            Command::Show => rover.show().map(|_| None),
            Command::Hide => rover.hide().map(|_| None),
            Command::PenUp => rover.pen_up().map(|_| None),
            Command::PenDown => rover.pen_down().map(|_| None),
            Command::Go => rover.go().map(|_| None),
            Command::Mission(id) => rover.start_mission(*id).map(|_| None),
            Command::Sample => Ok(Some(rover.sample().to_string())),
            Command::Heading => rover.heading_report().map(Some),
            Command::Travel => rover.travel().map(|t| Some(format!("{}", t))),
        }
    }
}

/// Runs every step in order and collects the query outputs. Stops at the
/// first failing step; bad arguments are reported with their line number.
pub fn run<S: DisplaySink>(rover: &mut Rover<S>, script: &Script) -> Result<Vec<String>> {
    let mut output = Vec::new();
    for step in script {
        match step.command.apply(rover) {
            Ok(Some(text)) => output.push(text),
            Ok(None) => {}
            Err(RoverError::InvalidArgument(message)) => {
                return Err(RoverError::Script {
                    line: step.line,
                    message,
                })
            }
            Err(err) => return Err(err),
        }
    }
    Ok(output)
}
