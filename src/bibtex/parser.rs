// Tolerant BibTeX entry parser.
//
// Handles `@type{key, name = value, ...}` with `{}` or `()` delimiters, where a
// value is a braced group, a quoted string, or a bare token, optionally
// joined with `#`. @comment, @preamble and @string blocks are skipped, and
// @string macros are not expanded. A malformed entry is logged and skipped;
// parsing resumes at the next `@`.

use std::collections::BTreeMap;

use tracing::warn;

use super::latex::to_plain_text;
use super::BibEntry;

/// Parse every well-formed entry in `input`, in file order.
pub fn parse(input: &str) -> Vec<BibEntry> {
    let mut cursor = Cursor::new(input);
    let mut entries = Vec::new();

    while cursor.seek('@') {
        let start = cursor.pos;
        match cursor.entry() {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(reason) => {
                warn!(
                    line = cursor.line_of(start),
                    reason, "Skipping malformed BibTeX entry"
                );
                // Resume scanning just past the failed entry's '@'
                cursor.pos = start + 1;
            }
        }
    }

    entries
}

type Step<T> = Result<T, &'static str>;

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Advance to the next `target`, leaving the cursor on it.
    fn seek(&mut self, target: char) -> bool {
        while let Some(c) = self.peek() {
            if c == target {
                return true;
            }
            self.pos += 1;
        }
        false
    }

    fn line_of(&self, pos: usize) -> usize {
        1 + self.chars[..pos.min(self.chars.len())]
            .iter()
            .filter(|&&c| c == '\n')
            .count()
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&keep) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Parse one block starting at '@'. `None` for skipped block types.
    fn entry(&mut self) -> Step<Option<BibEntry>> {
        self.bump(); // '@'
        self.skip_whitespace();
        let entry_type = self
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_')
            .to_ascii_lowercase();
        if entry_type.is_empty() {
            return Err("missing entry type");
        }
        self.skip_whitespace();

        let close = match self.bump() {
            Some('{') => '}',
            Some('(') => ')',
            _ => return Err("expected '{' or '(' after entry type"),
        };

        if matches!(entry_type.as_str(), "comment" | "preamble" | "string") {
            self.skip_block(close)?;
            return Ok(None);
        }

        self.skip_whitespace();
        let key = self
            .take_while(|c| c != ',' && c != close && !c.is_whitespace());
        if key.is_empty() {
            return Err("missing citation key");
        }

        let mut fields = BTreeMap::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    continue;
                }
                Some(c) if c == close => {
                    self.pos += 1;
                    break;
                }
                Some('@') => return Err("entry is not closed before the next '@'"),
                None => return Err("unexpected end of input inside entry"),
                Some(_) => {}
            }

            let name = self
                .take_while(|c| !c.is_whitespace() && c != '=' && c != ',' && c != close)
                .to_ascii_lowercase();
            if name.is_empty() {
                return Err("missing field name");
            }
            self.skip_whitespace();
            if self.bump() != Some('=') {
                return Err("expected '=' after field name");
            }
            let value = self.value(close)?;
            fields.insert(name, to_plain_text(&value));
        }

        Ok(Some(BibEntry {
            entry_type,
            key,
            fields,
        }))
    }

    /// A field value: one or more parts joined by '#'.
    fn value(&mut self, close: char) -> Step<String> {
        let mut value = String::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('{') => {
                    self.pos += 1;
                    value.push_str(&self.braced()?);
                }
                Some('"') => {
                    self.pos += 1;
                    value.push_str(&self.quoted()?);
                }
                Some(c) if c != ',' && c != close && c != '#' => {
                    value.push_str(&self.take_while(|c| {
                        !c.is_whitespace() && c != ',' && c != close && c != '#'
                    }));
                }
                _ => return Err("missing field value"),
            }
            self.skip_whitespace();
            if self.peek() == Some('#') {
                self.pos += 1;
            } else {
                return Ok(value);
            }
        }
    }

    /// Contents of a braced group (opening brace already consumed).
    /// Inner braces are kept so LaTeX conversion can see them.
    fn braced(&mut self) -> Step<String> {
        let mut depth = 0usize;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    out.push(c);
                    if let Some(escaped) = self.bump() {
                        out.push(escaped);
                    }
                    continue;
                }
                '{' => depth += 1,
                '}' if depth == 0 => return Ok(out),
                '}' => depth -= 1,
                _ => {}
            }
            out.push(c);
        }
        Err("unterminated braced value")
    }

    /// Contents of a quoted string (opening quote already consumed).
    /// A quote inside braces does not end the string.
    fn quoted(&mut self) -> Step<String> {
        let mut depth = 0usize;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    out.push(c);
                    if let Some(escaped) = self.bump() {
                        out.push(escaped);
                    }
                    continue;
                }
                '"' if depth == 0 => return Ok(out),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
            out.push(c);
        }
        Err("unterminated quoted value")
    }

    /// Skip a balanced block whose opening delimiter was consumed.
    fn skip_block(&mut self, close: char) -> Step<()> {
        let open = if close == '}' { '{' } else { '(' };
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            if c == open {
                depth += 1;
            } else if c == close {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
        }
        Err("unterminated block")
    }
}
