//! Keyboard commands read line by line from the terminal.

use std::io::ErrorKind;
use tokio::io::{AsyncBufRead, Lines};

use crate::logging::{log, obj, v_str, Domain, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Audit,
    Stress,
    Dismiss,
    Quit,
    Redraw,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "a" => Command::Audit,
            "s" => Command::Stress,
            "d" => Command::Dismiss,
            "q" => Command::Quit,
            _ => Command::Redraw,
        }
    }
}

/// Next command, or `None` once input ends. Lines that are not valid UTF-8
/// are logged and skipped; any other read error ends input.
///
/// Only awaits `next_line`, so it is safe to use as a `select!` branch.
pub async fn next_command<R>(lines: &mut Lines<R>) -> Option<Command>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => return Some(Command::parse(&line)),
            Ok(None) => return None,
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                log(
                    Level::Warn,
                    Domain::System,
                    "input_skipped",
                    obj(&[("error", v_str(&err.to_string()))]),
                );
            }
            Err(err) => {
                log(
                    Level::Warn,
                    Domain::System,
                    "input_closed",
                    obj(&[("error", v_str(&err.to_string()))]),
                );
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, BufReader};

    #[test]
    fn test_parse_trims_and_defaults_to_redraw() {
        assert_eq!(Command::parse("a"), Command::Audit);
        assert_eq!(Command::parse(" s \r"), Command::Stress);
        assert_eq!(Command::parse("d"), Command::Dismiss);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Redraw);
        assert_eq!(Command::parse("audit"), Command::Redraw);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let mut lines = BufReader::new(&b"\xff\xfe\na\nq\n"[..]).lines();
        assert_eq!(next_command(&mut lines).await, Some(Command::Audit));
        assert_eq!(next_command(&mut lines).await, Some(Command::Quit));
        assert_eq!(next_command(&mut lines).await, None);
    }

    #[tokio::test]
    async fn test_end_of_input() {
        let mut lines = BufReader::new(&b""[..]).lines();
        assert_eq!(next_command(&mut lines).await, None);
    }
}
