/// Character that starts every escape sequence.
pub const ESCAPE_MARKER: char = '\u{1A}';

/// Punctuation that a backslash escapes.
pub const ESCAPABLE: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '-', '.', '!', '<', '>', '|',
    '~', '"',
];

/// Escape sequences are the marker followed by a private-use character
/// indexed into [`ESCAPABLE`].
const CODE_BASE: u32 = 0xE000;

fn encode(ch: char) -> Option<char> {
    let index = ESCAPABLE.iter().position(|candidate| *candidate == ch)?;
    char::from_u32(CODE_BASE + index as u32)
}

fn decode(code: char) -> Option<char> {
    let index = (code as u32).checked_sub(CODE_BASE)?;
    ESCAPABLE.get(index as usize).copied()
}

/// Replaces every backslash-escaped punctuation character with its escape
/// sequence, so that no grammar rule can match it.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(code) = chars.peek().copied().and_then(encode) {
                chars.next();
                out.push(ESCAPE_MARKER);
                out.push(code);
                continue;
            }
        }
        out.push(ch);
    }

    out
}

/// Exact inverse of [`escape`]: sequences turn back into backslash + punctuation.
///
/// Used for verbatim content such as code, where backslashes are not escapes.
pub fn unescape(text: &str) -> String {
    restore(text, true)
}

/// Like [`unescape`] but drops the backslash, yielding the character the
/// author meant literally.
pub fn to_literal(text: &str) -> String {
    restore(text, false)
}

fn restore(text: &str, keep_backslash: bool) -> String {
    if !text.contains(ESCAPE_MARKER) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE_MARKER {
            if let Some(original) = chars.peek().copied().and_then(decode) {
                chars.next();
                if keep_backslash {
                    out.push('\\');
                }
                out.push(original);
                continue;
            }
        }
        out.push(ch);
    }

    out
}
