//! `cmd.exe` escaping.

use super::{QuoteError, closing_quote};

pub(super) fn quote(arg: &str) -> Result<String, QuoteError> {
    if arg.chars().any(|ch| matches!(ch, '\n' | '\r')) {
        return Err(QuoteError::ContainsLineBreak);
    }

    if arg.is_empty() {
        return Ok("\"\"".to_owned());
    }

    let needs_quotes = arg.chars().any(|ch| {
        matches!(
            ch,
            ' ' | '\t' | '"' | '^' | '&' | '|' | '<' | '>' | '%' | '!'
        )
    });
    if !needs_quotes {
        return Ok(arg.to_owned());
    }

    let mut buf = String::with_capacity(arg.len() + 2);
    buf.push('"');
    for ch in arg.chars() {
        match ch {
            '"' | '^' | '&' | '|' | '<' | '>' | '!' => {
                buf.push('^');
                buf.push(ch);
            }
            '%' => buf.push_str("%%"),
            _ => buf.push(ch),
        }
    }
    buf.push('"');
    Ok(buf)
}

/// Caret-escape metacharacters, including `%`, `!` and unpaired quotes.
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
                    buf.push('^');
                }
                buf.push(ch);
            }
            '%' | '!' | '#' | '&' | ';' | '`' | '|' | '*' | '?' | '~' | '<' | '>' | '^'
            | '(' | ')' | '[' | ']' | '{' | '}' | '$' | '\n' => {
                buf.push('^');
                buf.push(ch);
            }
            _ => buf.push(ch),
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};

    #[test]
    fn quote_escapes_cmd_metacharacters() -> Result<()> {
        let success_cases = [
            ("simple", "simple"),
            ("", "\"\""),
            ("needs space", "\"needs space\""),
            ("pipe|test", "\"pipe^|test\""),
            ("redir<test", "\"redir^<test\""),
            ("caret^test", "\"caret^^test\""),
            ("tab\ttab", "\"tab\ttab\""),
            ("report&del *.txt", "\"report^&del *.txt\""),
            ("%TEMP%", "\"%%TEMP%%\""),
            ("echo!boom", "\"echo^!boom\""),
            ("say \"hi\"", "\"say ^\"hi^\"\""),
        ];

        for (input, expected) in success_cases {
            let actual = quote(input)?;
            ensure!(
                actual == expected,
                "quote({input:?}) -> {actual:?}, expected {expected:?}"
            );
        }
        Ok(())
    }

    #[test]
    fn quote_rejects_line_breaks() {
        assert_eq!(quote("line\nbreak"), Err(QuoteError::ContainsLineBreak));
        assert_eq!(quote("carriage\rreturn"), Err(QuoteError::ContainsLineBreak));
    }

    #[test]
    fn escape_command_uses_carets() {
        assert_eq!(escape_command("foo; bar -baz"), "foo^; bar -baz");
        assert_eq!(escape_command("echo %PATH%!"), "echo ^%PATH^%^!");
        assert_eq!(escape_command("say \"hi\""), "say \"hi\"");
        assert_eq!(escape_command("it's"), "it^'s");
        assert_eq!(escape_command("C:\\tools\\run.exe"), "C:\\tools\\run.exe");
    }
}
