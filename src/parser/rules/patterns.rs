use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub(crate) static ref ATX_HEADER: Regex =
        Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").expect("ATX header pattern");
    pub(crate) static ref SETEXT_UNDERLINE: Regex =
        Regex::new(r"^ {0,3}(={3,}|-{3,})[ \t]*$").expect("setext underline pattern");
    pub(crate) static ref BLOCKQUOTE: Regex = Regex::new(r"^ {0,3}> ?").expect("blockquote pattern");
    pub(crate) static ref INDENTED: Regex = Regex::new(r"^(?: {4}|\t)").expect("indent pattern");
    pub(crate) static ref FENCE_OPEN: Regex =
        Regex::new(r"^ {0,3}(`{3,}|~{3,})[ \t]*([^\s`]*)[^`]*$").expect("fence open pattern");
    pub(crate) static ref FENCE_CLOSE: Regex =
        Regex::new(r"^ {0,3}(`{3,}|~{3,})[ \t]*$").expect("fence close pattern");
    pub(crate) static ref LIST_MARKER: Regex =
        Regex::new(r"^( {0,3})([*+-]|\d{1,9}\.)(?:([ \t]+)(.*))?$").expect("list marker pattern");
    pub(crate) static ref HORIZONTAL_RULE: Regex =
        Regex::new(r"^ {0,3}(?:[-*_][ \t]*){3,}$").expect("horizontal rule pattern");
    pub(crate) static ref HTML_OPEN: Regex =
        Regex::new(r"^ {0,3}<([A-Za-z][A-Za-z0-9-]*)(?:[\s/>]|$)").expect("html open pattern");
    pub(crate) static ref HTML_COMMENT_OPEN: Regex =
        Regex::new(r"^ {0,3}<!--").expect("html comment pattern");
    pub(crate) static ref DEFINITION_START: Regex =
        Regex::new(r"^ {0,3}\[[^\]]+\]:").expect("link definition pattern");
}

/// True if `line` opens a block that cannot continue a paragraph-like run:
/// headers, quotes, fences, list items, rules and HTML.
pub(crate) fn starts_other_block(line: &str) -> bool {
    ATX_HEADER.is_match(line)
        || BLOCKQUOTE.is_match(line)
        || FENCE_OPEN.is_match(line)
        || LIST_MARKER.is_match(line)
        || HORIZONTAL_RULE.is_match(line)
        || HTML_OPEN.is_match(line)
        || HTML_COMMENT_OPEN.is_match(line)
}

/// Strips up to `width` leading spaces, or a single leading tab.
pub(crate) fn strip_indent(line: &str, width: usize) -> &str {
    if let Some(rest) = line.strip_prefix('\t') {
        return rest;
    }
    let spaces = line.len() - line.trim_start_matches(' ').len();
    &line[spaces.min(width)..]
}
