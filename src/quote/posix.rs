//! POSIX `sh` escaping.

use shell_quote::{QuoteRefExt, Sh};

use super::closing_quote;

pub(super) fn quote(arg: &str) -> String {
    let bytes = arg.quoted(Sh);
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            debug_assert!(false, "quoted args must be valid UTF-8: {err}");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

/// Backslash-escape metacharacters. Quotes are left alone when they pair up
/// and escaped otherwise.
pub(super) fn escape_command(command: &str) -> String {
    let chars: Vec<char> = command.chars().collect();
    let mut buf = String::with_capacity(command.len() + 8);
    let mut pending_close: Option<usize> = None;
    for (idx, &ch) in chars.iter().enumerate() {
        match ch {
            '"' | '\'' => {
                if pending_close.is_none()
                    && let Some(close) = closing_quote(&chars, idx, ch)
                {
                    pending_close = Some(close);
                } else if pending_close == Some(idx) {
                    pending_close = None;
                } else {
                    buf.push('\\');
                }
                buf.push(ch);
            }
            '#' | '&' | ';' | '`' | '|' | '*' | '?' | '~' | '<' | '>' | '^' | '(' | ')'
            | '[' | ']' | '{' | '}' | '$' | '\\' | '\n' => {
                buf.push('\\');
                buf.push(ch);
            }
            _ => buf.push(ch),
        }
    }
    buf
}
