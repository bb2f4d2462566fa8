use clap::ValueEnum;
use gometrics_engine::line_counter::CommentStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CommentStyleArg {
    /// A line is a comment when its first non-blank byte is '/' or '#'
    Prefix,
    /// Go-aware: block comments, strings and raw strings are tracked
    Lexical,
}

impl From<CommentStyleArg> for CommentStyle {
    fn from(value: CommentStyleArg) -> Self {
        match value {
            CommentStyleArg::Prefix => CommentStyle::Prefix,
            CommentStyleArg::Lexical => CommentStyle::Lexical,
        }
    }
}
