use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;

use crate::error::GameweekInputError;
use crate::window_context::WindowContext;

pub const PROMPT: &str = "Enter current GW: ";

// The window has to start at gameweek 1 or later, and the current gameweek can't be past the end of the season.
pub fn validate_gameweek(input: &str, ctx: &WindowContext) -> Result<u32, GameweekInputError> {
    let gw = parse_int(input.trim())?;

    let first_valid = i64::from(ctx.buffer) + 1;
    if gw < first_valid || gw > i64::from(ctx.max_gameweek) {
        return Err(GameweekInputError::OutOfRange);
    }

    u32::try_from(gw).map_err(|_| GameweekInputError::OutOfRange)
}

// Single underscores between digits are allowed ("1_0"). An integer too big for i64 is still an
// integer, so it's out of range rather than not an int.
fn parse_int(raw: &str) -> Result<i64, GameweekInputError> {
    let digits = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(GameweekInputError::NotAnInt);
    }

    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    cleaned.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => GameweekInputError::OutOfRange,
        _ => GameweekInputError::NotAnInt,
    })
}

/// Keeps asking for the current gameweek until a valid one is entered.
/// Runs out of input => UnexpectedEof, otherwise there's no retry limit.
pub fn prompt_gameweek<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, ctx: &WindowContext) -> io::Result<u32> {
    let mut line = String::new();

    loop {
        write!(writer, "{PROMPT}")?;
        writer.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no gameweek entered"));
        }

        match validate_gameweek(&line, ctx) {
            Ok(gw) => return Ok(gw),
            Err(e) => writeln!(writer, "{e}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_prompt(input: &str, ctx: &WindowContext) -> (io::Result<u32>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let res = prompt_gameweek(&mut reader, &mut out, ctx);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_accepts_whole_valid_range() {
        let ctx = WindowContext::default();
        for gw in 6..=38 {
            assert_eq!(validate_gameweek(&gw.to_string(), &ctx), Ok(gw));

            let (res, out) = run_prompt(&format!("{gw}\n"), &ctx);
            assert_eq!(res.unwrap(), gw);
            assert_eq!(out, PROMPT);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        let ctx = WindowContext::default();
        assert_eq!(validate_gameweek("5", &ctx), Err(GameweekInputError::OutOfRange));
        assert_eq!(validate_gameweek("39", &ctx), Err(GameweekInputError::OutOfRange));
        assert_eq!(validate_gameweek("-2", &ctx), Err(GameweekInputError::OutOfRange));
    }

    #[test]
    fn test_extreme_integers_are_out_of_range() {
        let ctx = WindowContext::default();
        for huge in [
            "-9223372036854775808",
            "9223372036854775807",
            "99999999999999999999",
            "-99999999999999999999",
            "4294967306",
        ] {
            assert_eq!(validate_gameweek(huge, &ctx), Err(GameweekInputError::OutOfRange));
        }

        let (res, out) = run_prompt("-9223372036854775808\n99999999999999999999\n7\n", &ctx);
        assert_eq!(res.unwrap(), 7);
        assert_eq!(
            out,
            "Enter current GW: Enter a valid GW\n\
             Enter current GW: Enter a valid GW\n\
             Enter current GW: "
        );
    }

    #[test]
    fn test_digit_separators() {
        let ctx = WindowContext::default();
        assert_eq!(validate_gameweek("1_0", &ctx), Ok(10));
        assert_eq!(validate_gameweek("+2_0", &ctx), Ok(20));
        for bad in ["_10", "10_", "1__0", "-_10", "_"] {
            assert_eq!(validate_gameweek(bad, &ctx), Err(GameweekInputError::NotAnInt));
        }
    }

    #[test]
    fn test_rejects_non_integers() {
        let ctx = WindowContext::default();
        for bad in ["", "ten", "7.5", "7 8", "0x10"] {
            assert_eq!(validate_gameweek(bad, &ctx), Err(GameweekInputError::NotAnInt));
        }
        assert_eq!(validate_gameweek("  12\r\n", &ctx), Ok(12));
    }

    #[test]
    fn test_reprompts_once_per_bad_entry() {
        let ctx = WindowContext::default();
        let (res, out) = run_prompt("abc\n\n3\n40\n10\n", &ctx);
        assert_eq!(res.unwrap(), 10);
        assert_eq!(
            out,
            "Enter current GW: Enter an int\n\
             Enter current GW: Enter an int\n\
             Enter current GW: Enter a valid GW\n\
             Enter current GW: Enter a valid GW\n\
             Enter current GW: "
        );
    }

    #[test]
    fn test_buffer_moves_lower_bound() {
        let mut ctx = WindowContext::default();
        ctx.buffer = 1;
        assert_eq!(validate_gameweek("2", &ctx), Ok(2));
        assert_eq!(validate_gameweek("1", &ctx), Err(GameweekInputError::OutOfRange));
    }

    #[test]
    fn test_eof_ends_loop() {
        let ctx = WindowContext::default();
        let (res, out) = run_prompt("nope\n", &ctx);
        assert_eq!(res.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(out, "Enter current GW: Enter an int\nEnter current GW: ");
    }
}
