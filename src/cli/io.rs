//! JSON I/O handling for CLI
//!
//! - Input: JSON via stdin, UTF-8 only
//! - Output: one JSON object per line via stdout

use std::io::{self, BufRead, Read, Write};

use serde::Serialize;

use super::errors::{CliError, CliResult};
use crate::schema::AnswerMap;

/// Read one answer map (a JSON object of field id → text) from stdin
pub fn read_answers() -> CliResult<AnswerMap> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_answers(&input)
}

fn parse_answers(input: &str) -> CliResult<AnswerMap> {
    if input.trim().is_empty() {
        return Err(CliError::EmptyAnswers);
    }
    Ok(serde_json::from_str(input)?)
}

/// Request lines from stdin, blank lines skipped
pub fn read_lines() -> impl Iterator<Item = CliResult<String>> {
    io::stdin()
        .lock()
        .lines()
        .filter(|line| line.as_ref().map(|l| !l.trim().is_empty()).unwrap_or(true))
        .map(|line| line.map_err(CliError::from))
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    #[derive(Serialize)]
    struct Envelope<'a, T> {
        status: &'static str,
        data: &'a T,
    }

    let line = serde_json::to_string(&Envelope { status: "ok", data })?;
    write_json(&line)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    #[derive(Serialize)]
    struct Envelope<'a> {
        status: &'static str,
        code: &'a str,
        message: &'a str,
    }

    let line = serde_json::to_string(&Envelope {
        status: "error",
        code,
        message,
    })?;
    write_json(&line)
}

/// Write a raw JSON line to stdout
pub fn write_json(json_str: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json_str)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answers_keeps_order() {
        let answers = parse_answers(r#"{"b":"2","a":"1"}"#).unwrap();
        let keys: Vec<_> = answers.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_answers_rejects_empty_and_non_text() {
        assert!(parse_answers("  \n").is_err());
        assert!(parse_answers(r#"{"a":1}"#).is_err());
    }
}
