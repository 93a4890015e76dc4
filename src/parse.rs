// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::str::FromStr;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::*;
use crate::util::parse_float;

#[derive(Parser)]
#[grammar = "gcode.pest"]
pub struct GcodeParser;

/// First characters of lines that can carry a command.
pub const FAMILY_MARKERS: [char; 2] = ['G', 'M'];

/// Known command words, in matching order.  The no-op comes first so that it
/// always wins over the arc commands sharing its leading characters.
const COMMANDS: &[(&str, Command)] = &[
    ("G21", Command::Ignored),
    ("G0", Command::Move),
    ("G1", Command::Move),
    ("G2", Command::ArcCw),
    ("G3", Command::ArcCcw),
];

/// A fatal problem with a single input line.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {lineno}: {kind}")]
pub struct ParseError {
    pub lineno: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("malformed number {value:?} after {letter}")]
    MalformedNumber { letter: Letter, value: String },
    #[error("invalid syntax: {0}")]
    Syntax(String),
}

/// Strip leading zeros from the numeric part of a command word (`G01` → `G1`).
pub fn normalize_token(raw: &str) -> String {
    let mut chars = raw.chars();
    let family = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    let code = chars.as_str();
    let trimmed = code.trim_start_matches('0');
    if trimmed.is_empty() || trimmed.starts_with('.') {
        // keep one zero for "G0", "G00" and friends
        if code.is_empty() {
            family.to_string()
        } else {
            format!("{}0{}", family, trimmed)
        }
    } else {
        format!("{}{}", family, trimmed)
    }
}

/// Classify a normalized command word.
pub fn classify(token: &str) -> Command {
    COMMANDS.iter()
            .find(|(known, _)| *known == token)
            .map_or(Command::Unrecognized, |&(_, cmd)| cmd)
}

/// Parse one input line.
///
/// Returns `Ok(None)` for lines that are empty or do not start with a command
/// family marker; these never reach classification.
pub fn parse_line(lineno: usize, text: &str) -> Result<Option<MotionLine>, ParseError> {
    if !text.starts_with(&FAMILY_MARKERS[..]) {
        return Ok(None);
    }
    let err = |kind| ParseError { lineno, kind };

    let mut pairs = GcodeParser::parse(Rule::line, text)
        .map_err(|e| err(ParseErrorKind::Syntax(e.to_string())))?;
    let mut inner = pairs.next().expect("line rule").into_inner();
    let token = normalize_token(inner.next().expect("command word").as_str());
    let mut motion = MotionLine::new(lineno, token, Command::Unrecognized);
    motion.command = classify(&motion.token);

    for pair in inner {
        match pair.as_rule() {
            Rule::word => {
                // the letter is always a single ASCII character
                let (letter, value) = pair.as_str().split_at(1);
                set_param(&mut motion, letter, value).map_err(err)?;
            }
            Rule::junk => trace!(lineno, junk = pair.as_str(), "skipping word"),
            Rule::EOI => (),
            _ => unreachable!()
        }
    }
    Ok(Some(motion))
}

fn set_param(line: &mut MotionLine, letter: &str, value: &str) -> Result<(), ParseErrorKind> {
    // F, S, T, ... and lowercase words (e.g. M117 messages) are not interpreted
    let letter = match Letter::from_str(letter) {
        Ok(letter) => letter,
        Err(_) => return Ok(()),
    };
    if letter == Letter::E {
        line.extruding = true;
        return Ok(());
    }
    if line.has(letter) {
        trace!(lineno = line.lineno, %letter, "repeated word ignored");
        return Ok(());
    }
    let num = parse_float(value).ok_or_else(|| ParseErrorKind::MalformedNumber {
        letter,
        value: value.into(),
    })?;
    match letter {
        Letter::X => line.x = Some(num),
        Letter::Y => line.y = Some(num),
        Letter::Z => line.z = Some(num),
        Letter::I => line.i = Some(num),
        Letter::J => line.j = Some(num),
        Letter::E => unreachable!(),
    }
    Ok(())
}

/// Parse a whole file, keeping only the lines that carry a command.
pub fn parse(filename: &str, input: &str) -> Result<Program, ParseError> {
    let mut prog = Program { filename: filename.into(), lines: vec![] };
    for (n, text) in input.lines().enumerate() {
        match parse_line(n + 1, text)? {
            Some(line) => prog.lines.push(line),
            None if !text.trim().is_empty() => debug!(lineno = n + 1, text, "discarded line"),
            None => (),
        }
    }
    Ok(prog)
}
