pub(crate) mod recovery;
pub(crate) mod scanner;
pub mod types;

use recovery::SequenceRecovery;
use types::{Comment, Document, Line, PrecedingComment, SyntaxError, Token, TokenKind};

/// Splits `source` on `\n`, dropping a `\r` before it. The segment after the
/// last newline is always present, even when empty.
pub fn split_lines(source: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, segment) in source.split('\n').enumerate() {
        let terminated = start + segment.len() < source.len();
        let text = if terminated {
            segment.strip_suffix('\r').unwrap_or(segment)
        } else {
            segment
        };
        lines.push(Line {
            number: i + 1,
            start,
            end: start + text.len(),
            text,
            terminated,
        });
        start += segment.len() + 1;
    }
    lines
}

/// Turns raw text into lines, comments and a repaired token stream.
///
/// A syntax error truncates all three views at the failure position.
pub fn build(source: &str) -> Document<'_> {
    let mut lines = split_lines(source);
    let scanned = scanner::scan(source, &lines);
    let syntax_error = earliest(
        scanned.error,
        scanner::check_syntax(&scanned.input, source, &lines),
    );

    let raw = scanned.tokens.into_iter().take_while(|token| {
        token.kind == TokenKind::StreamStart
            || syntax_error.as_ref().is_none_or(|e| {
                (token.start.line, token.start.column) < (e.mark.line, e.mark.column)
            })
    });
    let tokens: Vec<Token> = SequenceRecovery::new(raw).collect();
    let comments = extract_comments(source, &lines, &tokens);

    if let Some(error) = &syntax_error {
        lines.truncate(error.mark.line + 1);
    }

    Document {
        source,
        lines,
        comments,
        tokens,
        syntax_error,
    }
}

fn earliest(a: Option<SyntaxError>, b: Option<SyntaxError>) -> Option<SyntaxError> {
    match (a, b) {
        (Some(a), Some(b)) => {
            if (b.mark.line, b.mark.column) < (a.mark.line, a.mark.column) {
                Some(b)
            } else {
                Some(a)
            }
        }
        (a, b) => a.or(b),
    }
}

fn extract_comments<'a>(source: &'a str, lines: &[Line<'a>], tokens: &[Token]) -> Vec<Comment<'a>> {
    let mut comments = Vec::new();
    for pair in tokens.windows(2) {
        comments_between(source, lines, &pair[0], &pair[1], &mut comments);
    }
    comments
}

/// Collects the comments in the gap between two consecutive tokens. Two
/// tokens on one line leave no room for a comment, except around the
/// stream boundaries.
fn comments_between<'a>(
    source: &'a str,
    lines: &[Line<'a>],
    before: &Token,
    after: &Token,
    out: &mut Vec<Comment<'a>>,
) {
    if before.end.line == after.start.line
        && before.kind != TokenKind::StreamStart
        && after.kind != TokenKind::StreamEnd
    {
        return;
    }
    let Some(gap) = source.get(before.end.index..after.start.index) else {
        return;
    };

    let token_before_end = (before.kind != TokenKind::StreamStart).then_some(before.end);
    let token_before_line_indent = match before.kind {
        TokenKind::StreamStart => 0,
        _ => lines
            .get(before.start.line)
            .map_or(0, |l| line_indent(l.text)),
    };
    let end_of_document = after.start.index >= source.len();
    let token_after_column = if after.kind == TokenKind::StreamEnd {
        0
    } else {
        after.start.column
    };

    let mut line_no = before.end.line;
    let mut column = before.end.column;
    let mut offset = before.end.index;
    let mut comment_before = None;

    for segment in gap.split('\n') {
        if let (Some(pos), Some(line)) = (segment.find('#'), lines.get(line_no)) {
            let hash = offset + pos;
            let inline = source
                .get(line.start..hash)
                .is_some_and(|before| !before.trim().is_empty());
            let comment_column = column + segment[..pos].chars().count() + 1;
            out.push(Comment {
                line: line_no + 1,
                column: comment_column,
                index: hash,
                text: source.get(hash + 1..line.end).unwrap_or(""),
                inline,
                end_of_document,
                token_before_end,
                token_before_line_indent,
                token_after_column,
                comment_before,
            });
            comment_before = Some(PrecedingComment {
                column: comment_column,
                inline,
            });
        }
        offset += segment.len() + 1;
        line_no += 1;
        column = 0;
    }
}

/// Number of leading spaces.
pub(crate) fn line_indent(text: &str) -> usize {
    text.bytes().take_while(|&b| b == b' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_keeps_last_segment() {
        let lines = split_lines("a: 1\nb: 2\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "a: 1");
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[1].start, 5);
        assert_eq!(lines[2].text, "");
        assert!(!lines[2].terminated);
        assert!(lines[1].terminated);
    }

    #[test]
    fn test_split_lines_without_trailing_newline() {
        let lines = split_lines("a: 1");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].end, 4);
        assert!(!lines[0].terminated);
    }

    #[test]
    fn test_split_lines_crlf() {
        let lines = split_lines("a: 1\r\nb: 2\r\n");
        assert_eq!(lines[0].text, "a: 1");
        assert_eq!(lines[0].end, 4);
        assert_eq!(lines[1].start, 6);
    }

    #[test]
    fn test_empty_source() {
        let doc = build("");
        assert_eq!(doc.lines.len(), 1);
        assert!(doc.comments.is_empty());
        assert!(doc.syntax_error.is_none());
        assert_eq!(doc.tokens.first().unwrap().kind, TokenKind::StreamStart);
        assert_eq!(doc.tokens.last().unwrap().kind, TokenKind::StreamEnd);
    }

    #[test]
    fn test_comments_collected() {
        let source = "# head\nkey: value  # inline\n# own line\nother: 1\n";
        let doc = build(source);
        assert_eq!(doc.comments.len(), 3);

        let head = &doc.comments[0];
        assert_eq!((head.line, head.column), (1, 1));
        assert_eq!(head.text, " head");
        assert!(!head.inline);
        assert_eq!(head.token_before_end, None);
        assert_eq!(head.index, 0);

        let inline = &doc.comments[1];
        assert_eq!((inline.line, inline.column), (2, 13));
        assert_eq!(inline.text, " inline");
        assert!(inline.inline);

        let own = &doc.comments[2];
        assert_eq!((own.line, own.column), (3, 1));
        assert!(!own.inline);
        assert_eq!(
            own.comment_before,
            Some(PrecedingComment {
                column: 13,
                inline: true
            })
        );
        assert_eq!(own.token_after_column, 0);
    }

    #[test]
    fn test_hash_inside_scalar_is_not_a_comment() {
        let doc = build("key: 'a # b'\nurl: http://x#y\n");
        assert!(doc.comments.is_empty());
    }

    #[test]
    fn test_trailing_comment_is_end_of_document() {
        let doc = build("key: value\n# bye\n");
        assert_eq!(doc.comments.len(), 1);
        assert!(doc.comments[0].end_of_document);
        assert_eq!(
            doc.comments[0].token_before_end.map(|m| m.line + 1),
            Some(1)
        );
    }

    #[test]
    fn test_events_expose_neighbours() {
        let doc = build("key: val\n");
        let events: Vec<_> = doc.events().collect();
        assert_eq!(events.len(), doc.tokens.len());
        assert!(events[0].prev.is_none());
        assert_eq!(events[0].next.unwrap().kind, TokenKind::BlockMappingStart);
        assert_eq!(events[0].next_next.unwrap().kind, TokenKind::Key);
        let last = events.last().unwrap();
        assert!(last.next.is_none());
        assert_eq!(last.prev.unwrap().kind, TokenKind::BlockEnd);
    }

    #[test]
    fn test_syntax_error_truncates_stream() {
        let doc = build("---\nthis is not: valid: YAML\nnext: line   \n");
        let error = doc.syntax_error.as_ref().unwrap();
        assert_eq!((error.mark.line, error.mark.column), (1, 18));
        assert_eq!(doc.lines.len(), 2);
        assert!(doc
            .tokens
            .iter()
            .all(|t| (t.start.line, t.start.column) < (1, 18)));
    }

    #[test]
    fn test_unterminated_flow_is_syntax_error() {
        let doc = build("key: [a, b\n");
        assert!(doc.syntax_error.is_some());
    }

    #[test]
    fn test_crlf_comments_and_tokens() {
        let doc = build("# head\r\nkey: val  # note\r\nother: 2\r\n");
        assert!(doc.syntax_error.is_none());
        let positions: Vec<_> = doc.comments.iter().map(|c| (c.line, c.column)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 11)]);
        assert_eq!(doc.comments[1].text, " note");
        let other = doc.tokens.iter().find(|t| t.value() == "other").unwrap();
        assert_eq!((other.start.line, other.start.column), (2, 0));
    }

    #[test]
    fn test_empty_flow_value_is_not_a_syntax_error() {
        let doc = build("---\n{a:}\n");
        assert!(doc.syntax_error.is_none());
        assert!(doc.tokens.iter().any(|t| t.kind == TokenKind::FlowMappingEnd));
    }

    #[test]
    fn test_line_indent() {
        assert_eq!(line_indent("    - a"), 4);
        assert_eq!(line_indent("a"), 0);
        assert_eq!(line_indent("\tb"), 0);
    }
}
