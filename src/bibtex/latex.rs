// LaTeX markup to plain Unicode text for BibTeX field values.
//
// Covers what shows up in exported abstracts and titles: accent commands,
// a handful of special letters, escaped punctuation, and protective braces.
// Any other command (\emph, \textbf, ...) is dropped and its argument kept.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

/// `\'e`, `\"{o}`, `{\^a}`, `\'{\i}`; the letter follows the accent directly
/// or sits in braces, so `2\. Then` is not an accent
static SYMBOL_ACCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{?\\([`'^"~=.])(?:\{\s*\\?([A-Za-z])\s*\}|\\?([A-Za-z]))\}?"#).unwrap()
});

/// `\c{c}`, `\v{s}`, `{\H{o}}`; letter accents need braces so `\cite` is left alone
static LETTER_ACCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{?\\([uvHc])\{\s*([A-Za-z])\s*\}\}?").unwrap());

/// `\emph`, `\ss`, and single-character escapes such as `\&`, `\{`, `\\`
static COMMAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:([A-Za-z]+)\s*|(.))").unwrap());

// Escaped braces stand in as private-use chars while protective braces are stripped.
const OPEN_BRACE: char = '\u{E000}';
const CLOSE_BRACE: char = '\u{E001}';

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Convert a raw BibTeX value to plain text.
pub fn to_plain_text(raw: &str) -> String {
    let accented = |caps: &Captures| {
        let accent = caps[1].chars().next().unwrap_or(' ');
        let letter = caps
            .get(2)
            .or_else(|| caps.get(3))
            .and_then(|m| m.as_str().chars().next())
            .unwrap_or(' ');
        compose(accent, letter)
    };
    let text = SYMBOL_ACCENT_RE.replace_all(raw, accented);
    let text = LETTER_ACCENT_RE.replace_all(&text, accented);

    let text = COMMAND_RE.replace_all(&text, |caps: &Captures| match caps.get(1) {
        Some(name) => symbol(name.as_str()).to_string(),
        None => caps
            .get(2)
            .and_then(|m| m.as_str().chars().next())
            .map_or_else(String::new, escaped),
    });

    let text = text
        .replace("---", "\u{2014}")
        .replace("--", "\u{2013}")
        .replace('~', " ");
    let text: String = text
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| match c {
            OPEN_BRACE => '{',
            CLOSE_BRACE => '}',
            c => c,
        })
        .collect();
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Replacement for a backslash followed by one non-letter character.
fn escaped(c: char) -> String {
    match c {
        '{' => OPEN_BRACE.to_string(),
        '}' => CLOSE_BRACE.to_string(),
        // line break, thin space, control space
        '\\' | ',' | ' ' => " ".to_string(),
        // italic correction, hyphenation hint
        '/' | '-' | '@' => String::new(),
        c => c.to_string(),
    }
}

/// Replacement for a bare command; unknown commands vanish.
fn symbol(name: &str) -> &'static str {
    match name {
        "ss" => "ß",
        "ae" => "æ",
        "AE" => "Æ",
        "oe" => "œ",
        "OE" => "Œ",
        "aa" => "å",
        "AA" => "Å",
        "o" => "ø",
        "O" => "Ø",
        "l" => "ł",
        "L" => "Ł",
        "ldots" | "dots" => "…",
        "textendash" => "\u{2013}",
        "textemdash" => "\u{2014}",
        _ => "",
    }
}

fn compose(accent: char, letter: char) -> String {
    let composed = match (accent, letter) {
        ('"', 'a') => 'ä',
        ('"', 'e') => 'ë',
        ('"', 'i') => 'ï',
        ('"', 'o') => 'ö',
        ('"', 'u') => 'ü',
        ('"', 'y') => 'ÿ',
        ('"', 'A') => 'Ä',
        ('"', 'E') => 'Ë',
        ('"', 'I') => 'Ï',
        ('"', 'O') => 'Ö',
        ('"', 'U') => 'Ü',
        ('\'', 'a') => 'á',
        ('\'', 'e') => 'é',
        ('\'', 'i') => 'í',
        ('\'', 'o') => 'ó',
        ('\'', 'u') => 'ú',
        ('\'', 'y') => 'ý',
        ('\'', 'c') => 'ć',
        ('\'', 'n') => 'ń',
        ('\'', 's') => 'ś',
        ('\'', 'z') => 'ź',
        ('\'', 'A') => 'Á',
        ('\'', 'E') => 'É',
        ('\'', 'I') => 'Í',
        ('\'', 'O') => 'Ó',
        ('\'', 'U') => 'Ú',
        ('`', 'a') => 'à',
        ('`', 'e') => 'è',
        ('`', 'i') => 'ì',
        ('`', 'o') => 'ò',
        ('`', 'u') => 'ù',
        ('`', 'A') => 'À',
        ('`', 'E') => 'È',
        ('^', 'a') => 'â',
        ('^', 'e') => 'ê',
        ('^', 'i') => 'î',
        ('^', 'o') => 'ô',
        ('^', 'u') => 'û',
        ('~', 'a') => 'ã',
        ('~', 'n') => 'ñ',
        ('~', 'o') => 'õ',
        ('~', 'N') => 'Ñ',
        ('c', 'c') => 'ç',
        ('c', 'C') => 'Ç',
        ('c', 's') => 'ş',
        ('v', 'c') => 'č',
        ('v', 's') => 'š',
        ('v', 'z') => 'ž',
        ('v', 'r') => 'ř',
        ('v', 'e') => 'ě',
        ('v', 'C') => 'Č',
        ('v', 'S') => 'Š',
        ('v', 'Z') => 'Ž',
        ('H', 'o') => 'ő',
        ('H', 'u') => 'ű',
        ('u', 'g') => 'ğ',
        ('.', 'z') => 'ż',
        ('=', 'a') => 'ā',
        ('=', 'e') => 'ē',
        _ => return format!("{letter}{}", combining_mark(accent)),
    };
    composed.to_string()
}

/// Unicode combining diacritic for accents without a precomposed letter here.
fn combining_mark(accent: char) -> char {
    match accent {
        '`' => '\u{0300}',
        '\'' => '\u{0301}',
        '^' => '\u{0302}',
        '~' => '\u{0303}',
        '=' => '\u{0304}',
        'u' => '\u{0306}',
        '.' => '\u{0307}',
        '"' => '\u{0308}',
        'H' => '\u{030b}',
        'v' => '\u{030c}',
        'c' => '\u{0327}',
        _ => '\u{034f}',
    }
}
