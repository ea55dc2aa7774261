use crate::emit;
use crate::parser::types::Comment;
use crate::rules::{CommentRule, Report};

/// Block comments must line up with the content before or after them.
pub struct CommentsIndentation;

impl CommentRule for CommentsIndentation {
    fn check(&self, comment: &Comment<'_>, report: &mut Report) {
        // Comments trailing the token before them are not block comments.
        if comment
            .token_before_end
            .is_some_and(|end| end.line + 1 == comment.line)
        {
            return;
        }

        let next_indent = comment.token_after_column;
        let mut prev_indent = comment.token_before_line_indent.max(next_indent);

        // Once a comment has dedented, the ones after it must follow.
        if let Some(before) = comment.comment_before.filter(|c| !c.inline) {
            prev_indent = before.column - 1;
        }

        let indent = comment.column - 1;
        if indent != prev_indent && indent != next_indent {
            emit!(report, comment.line, comment.column, "comment not indented like content");
        }
    }
}
