//! Workflow commands understood by the CI runner.

use std::io::{self, Write};
use tracing::debug;

/// Writes the step's failure reason. The caller is responsible for the non-zero exit.
pub fn set_failed(message: &str) {
    error(message);
}

pub fn error(message: &str) {
    issue_command("error", message);
}

pub fn warning(message: &str) {
    issue_command("warning", message);
}

fn issue_command(command: &str, message: &str) {
    if let Err(e) = write_command(&mut io::stdout().lock(), command, message) {
        debug!(error = %e, command = command, "Could not write workflow command");
    }
}

pub fn write_command(out: &mut impl Write, command: &str, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format_command(command, message))
}

pub fn format_command(command: &str, message: &str) -> String {
    format!("::{}::{}", command, escape_data(message))
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_error_command() {
        assert_eq!(
            format_command("error", "Environment not found"),
            "::error::Environment not found"
        );
    }

    #[test]
    fn escapes_newlines_and_percent() {
        assert_eq!(
            format_command("warning", "100% broken\r\nsecond line"),
            "::warning::100%25 broken%0D%0Asecond line"
        );
    }

    #[test]
    fn writes_one_line_per_command() {
        let mut out = Vec::new();
        write_command(&mut out, "error", "a\nb").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "::error::a%0Ab\n");
    }

    #[test]
    fn warning_and_error_annotations_stay_separate() {
        let mut out = Vec::new();
        write_command(&mut out, "warning", "Using non-default base URL: https://staging.example.com").unwrap();
        write_command(&mut out, "error", "Failed to update environment state after retries").unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "::warning::Using non-default base URL: https://staging.example.com\n\
             ::error::Failed to update environment state after retries\n"
        );
    }

    #[test]
    fn reports_broken_sink() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_command(&mut Closed, "warning", "ignored").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
