//! Script sentence splitting.
//!
//! When an authoritative script accompanies a video, its plain text is split
//! into sentence strings independently of any timing. Splitting is heuristic:
//! a terminator only closes a sentence when what follows looks like the start
//! of a new one, which keeps abbreviation periods inside ordinary prose from
//! producing spurious breaks.

/// Split script text into trimmed sentence strings.
///
/// A sentence ends at a newline, or at `.`/`!`/`?` when the next non-space
/// character is a capital letter, digit, quote, or opening bracket (or the
/// text ends there). Empty input yields an empty list.
pub fn split_sentences(script: &str) -> Vec<String> {
    let normalized = normalize_text(script);
    let chars: Vec<char> = normalized.chars().collect();

    let mut sentences: Vec<String> = Vec::new();
    let mut buffer = String::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            flush(&mut buffer, &mut sentences);
            i += 1;
            continue;
        }

        buffer.push(c);

        if is_terminator(c) && starts_new_sentence(&chars, i + 1) {
            flush(&mut buffer, &mut sentences);
        }

        i += 1;
    }

    flush(&mut buffer, &mut sentences);
    sentences
}

/// Normalize line endings and collapse runs of blank lines.
fn normalize_text(script: &str) -> String {
    let unified = script.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    let mut blank_run = 0;
    for line in unified.split('\n') {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// After a terminator, does the following text look like a sentence start?
///
/// Skips the whitespace run after position `from`; end of text counts as a
/// sentence start.
fn starts_new_sentence(chars: &[char], from: usize) -> bool {
    let mut j = from;
    while j < chars.len() && chars[j].is_whitespace() && chars[j] != '\n' {
        j += 1;
    }
    match chars.get(j) {
        None => true,
        Some('\n') => true,
        Some(&c) => {
            c.is_uppercase()
                || c.is_ascii_digit()
                || matches!(c, '"' | '\'' | '\u{201C}' | '\u{2018}' | '(' | '[' | '{')
        }
    }
}

fn flush(buffer: &mut String, sentences: &mut Vec<String>) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    buffer.clear();
}
