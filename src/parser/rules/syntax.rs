//! nom parsers for the structured parts of link syntax.
use nom::branch::alt;
use nom::bytes::complete::{is_not, take_till, take_while_m_n};
use nom::character::complete::{char, multispace0, multispace1, space0, space1};
use nom::combinator::{eof, map, opt};
use nom::error::{Error, ErrorKind};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::{Err as NomErr, IResult};

/// Parsed `[id]: href "title"` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefinitionLine<'a> {
    pub id: &'a str,
    pub href: &'a str,
    pub title: Option<&'a str>,
}

/// Link destination: `<...>` or a run of non-space characters with balanced
/// parentheses.
fn destination(input: &str) -> IResult<&str, &str> {
    alt((delimited(char('<'), is_not(">\n"), char('>')), bare_destination))(input)
}

fn bare_destination(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    let mut end = input.len();

    for (offset, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => {
                end = offset;
                break;
            }
            ')' => depth -= 1,
            ch if ch.is_whitespace() => {
                end = offset;
                break;
            }
            _ => {}
        }
    }

    if end == 0 {
        return Err(NomErr::Error(Error::new(input, ErrorKind::TakeWhile1)));
    }
    Ok((&input[end..], &input[..end]))
}

/// Quoted or parenthesised link title.
fn title(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
        delimited(char('('), take_till(|c: char| c == ')'), char(')')),
    ))(input)
}

/// `(href "title")` following the display text of an inline link.
///
/// Returns the href (possibly empty) and optional title.
pub(crate) fn link_tail(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    delimited(
        pair(char('('), multispace0),
        pair(
            map(opt(destination), |href| href.unwrap_or("")),
            opt(preceded(multispace1, title)),
        ),
        pair(multispace0, char(')')),
    )(input)
}

/// A complete link definition line.
pub(crate) fn definition_line(input: &str) -> IResult<&str, DefinitionLine<'_>> {
    map(
        terminated(
            tuple((
                preceded(
                    take_while_m_n(0, 3, |c: char| c == ' '),
                    delimited(char('['), is_not("]\n"), char(']')),
                ),
                preceded(pair(char(':'), space0), destination),
                opt(preceded(space1, title)),
            )),
            pair(space0, eof),
        ),
        |(id, href, title)| DefinitionLine { id, href, title },
    )(input)
}

/// A line holding nothing but an indented title, continuing a definition.
pub(crate) fn title_line(input: &str) -> IResult<&str, &str> {
    delimited(space1, title, pair(space0, eof))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_tail_with_title() {
        let (rest, (href, title)) = link_tail(r#"(http://a.b "T") more"#).expect("tail");
        assert_eq!(href, "http://a.b");
        assert_eq!(title, Some("T"));
        assert_eq!(rest, " more");
    }

    #[test]
    fn link_tail_balances_parentheses() {
        let (rest, (href, title)) = link_tail("(/wiki/A_(b))").expect("tail");
        assert_eq!(href, "/wiki/A_(b)");
        assert_eq!(title, None);
        assert_eq!(rest, "");
    }

    #[test]
    fn link_tail_accepts_angle_brackets_and_empty_href() {
        assert_eq!(link_tail("(<a b>)").expect("tail").1, ("a b", None));
        assert_eq!(link_tail("()").expect("tail").1, ("", None));
        assert!(link_tail("(a b c)").is_err());
    }

    #[test]
    fn definition_line_variants() {
        let (_, line) = definition_line(r#"[1]: http://e.com "T""#).expect("definition");
        assert_eq!(
            line,
            DefinitionLine {
                id: "1",
                href: "http://e.com",
                title: Some("T"),
            }
        );

        let (_, line) = definition_line("  [id]: <https://x.y>").expect("definition");
        assert_eq!(line.href, "https://x.y");
        assert_eq!(line.title, None);

        assert!(definition_line("[id]: a b").is_err());
        assert!(definition_line("[id] a").is_err());
    }

    #[test]
    fn title_on_its_own_line() {
        assert_eq!(title_line("   'Title'").expect("title").1, "Title");
        assert!(title_line("Title").is_err());
    }
}
