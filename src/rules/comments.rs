use crate::config::rules::CommentsOptions;
use crate::emit;
use crate::parser::types::Comment;
use crate::rules::{CommentRule, Report};

pub struct Comments {
    options: CommentsOptions,
}

impl Comments {
    pub fn new(options: CommentsOptions) -> Self {
        Self { options }
    }
}

impl CommentRule for Comments {
    fn check(&self, comment: &Comment<'_>, report: &mut Report) {
        if let (Some(min), true, Some(before)) = (
            self.options.min_spaces_from_content.0,
            comment.inline,
            comment.token_before_end,
        ) {
            if comment.index.saturating_sub(before.index) < min {
                emit!(report, comment.line, comment.column, "too few spaces before comment");
            }
        }

        if self.options.require_starting_space {
            let text = comment.text.trim_start_matches('#');
            let hashes = comment.text.len() - text.len();
            let shebang = self.options.ignore_shebangs
                && comment.line == 1
                && comment.column == 1
                && text.starts_with('!');
            if !text.is_empty() && !shebang && !text.starts_with(' ') {
                emit!(
                    report,
                    comment.line,
                    comment.column + hashes + 1,
                    "missing starting space in comment"
                );
            }
        }
    }
}
