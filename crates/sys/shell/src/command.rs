//! Command parsing: one pass from line to typed command.
//!
//! The head token selects the command; the rest of the line is consumed
//! according to that command's argument shape. Dispatch then matches the
//! resulting `Command` exhaustively; there is no prefix matching and no
//! ordering to tie-break.

use crate::tokenizer::{parse_int, Tokenizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Cls,
    Help,
    Shutdown,
    SysInfo,
    Pause,
    SetColor { fg: &'a str, bg: &'a str },
    TicTacToe,
    Move { row: i32, col: i32 },
    Calc { a: i32, op: &'a str, b: i32 },
    SetSplash { text: &'a str },
    SetColorSplash { color: &'a str },
    PrintColorText { color: &'a str, text: &'a str },
    CreateVar { name: &'a str, value: &'a str },
    ShowVars,
    Fill { glyph: u8, fg: &'a str, bg: &'a str, height: i32, width: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand,
    /// Wrong argument shape; carries the usage line to report.
    Usage(&'static str),
}

const USAGE_SETCOLOR: &str = "Invalid syntax! Use setcolor <foreground> <background>.";
const USAGE_MOVE: &str = "Invalid syntax! Use move <row> <col>.";
const USAGE_CALC: &str = "Invalid syntax! Use calc <a> <op> <b>.";
const USAGE_SETSPLASH: &str = "Invalid syntax! Use setsplash <text>.";
const USAGE_SETCOLORSPLASH: &str = "Invalid syntax! Use setcolorsplash <color>.";
const USAGE_PRINTCOLORTEXT: &str = "Invalid syntax! Use printcolortext <color> <text>.";
const USAGE_CREATEVAR: &str = "Invalid syntax! Use createvar <name> <value>.";
const USAGE_FILL: &str = "Invalid syntax! Use fill <char> <fg> <bg> <height> <width>.";

/// Parse one submitted line. An empty line is an unknown command, as is
/// any head token outside the table.
pub fn parse(line: &str) -> Result<Command<'_>, ParseError> {
    let mut tok = Tokenizer::new(line);
    let name = tok.next().ok_or(ParseError::UnknownCommand)?;

    match name {
        "cls" => Ok(Command::Cls),
        "help" => Ok(Command::Help),
        "shutdown" => Ok(Command::Shutdown),
        "sysinfo" => Ok(Command::SysInfo),
        "pause" => Ok(Command::Pause),
        "tictactoe" => Ok(Command::TicTacToe),
        "showvars" => Ok(Command::ShowVars),
        "setcolor" => {
            let fg = tok.next().ok_or(ParseError::Usage(USAGE_SETCOLOR))?;
            let bg = tok.next().ok_or(ParseError::Usage(USAGE_SETCOLOR))?;
            Ok(Command::SetColor { fg, bg })
        }
        "move" => {
            let row = tok.next().ok_or(ParseError::Usage(USAGE_MOVE))?;
            let col = tok.next().ok_or(ParseError::Usage(USAGE_MOVE))?;
            Ok(Command::Move {
                row: parse_int(row),
                col: parse_int(col),
            })
        }
        "calc" => {
            let a = tok.next().ok_or(ParseError::Usage(USAGE_CALC))?;
            let op = tok.next().ok_or(ParseError::Usage(USAGE_CALC))?;
            let b = tok.next().ok_or(ParseError::Usage(USAGE_CALC))?;
            Ok(Command::Calc {
                a: parse_int(a),
                op,
                b: parse_int(b),
            })
        }
        "setsplash" => {
            let text = tok.rest();
            if text.is_empty() {
                return Err(ParseError::Usage(USAGE_SETSPLASH));
            }
            Ok(Command::SetSplash { text })
        }
        "setcolorsplash" => {
            let color = tok.next().ok_or(ParseError::Usage(USAGE_SETCOLORSPLASH))?;
            Ok(Command::SetColorSplash { color })
        }
        "printcolortext" => {
            let color = tok.next().ok_or(ParseError::Usage(USAGE_PRINTCOLORTEXT))?;
            let text = tok.rest();
            if text.is_empty() {
                return Err(ParseError::Usage(USAGE_PRINTCOLORTEXT));
            }
            Ok(Command::PrintColorText { color, text })
        }
        "createvar" | "var" => {
            let name = tok.next().ok_or(ParseError::Usage(USAGE_CREATEVAR))?;
            let value = tok.rest();
            if value.is_empty() {
                return Err(ParseError::Usage(USAGE_CREATEVAR));
            }
            Ok(Command::CreateVar { name, value })
        }
        "fill" => {
            let glyph = tok.next().ok_or(ParseError::Usage(USAGE_FILL))?;
            let fg = tok.next().ok_or(ParseError::Usage(USAGE_FILL))?;
            let bg = tok.next().ok_or(ParseError::Usage(USAGE_FILL))?;
            let height = tok.next().ok_or(ParseError::Usage(USAGE_FILL))?;
            let width = tok.next().ok_or(ParseError::Usage(USAGE_FILL))?;
            Ok(Command::Fill {
                glyph: glyph.as_bytes()[0],
                fg,
                bg,
                height: parse_int(height),
                width: parse_int(width),
            })
        }
        _ => Err(ParseError::UnknownCommand),
    }
}
