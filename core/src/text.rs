//! Indentation helpers shared by every human-readable rendering.

/// One nesting level.
pub const INDENT: &str = "\t";

/// Indent every line after the first by one level.
///
/// Used for text placed after a bullet: the first line continues the bullet,
/// the following lines move one level in.
pub fn indent(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + INDENT.len());
    let mut lines = text.split_inclusive('\n');
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push_str(INDENT);
        out.push_str(line);
    }
    out
}

/// Indent every line by one level.
pub fn indent_block(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + INDENT.len());
    for line in text.split_inclusive('\n') {
        out.push_str(INDENT);
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_leaves_the_first_line_alone() {
        assert_eq!(indent("head\nbody\n"), "head\n\tbody\n");
        assert_eq!(indent("single"), "single");
        assert_eq!(indent(""), "");
    }

    #[test]
    fn indent_does_not_dangle_after_a_trailing_newline() {
        assert_eq!(indent("a\nb\n"), "a\n\tb\n");
        assert!(!indent("a\n").ends_with(INDENT));
    }

    #[test]
    fn indent_block_prefixes_every_line() {
        assert_eq!(indent_block("one\ntwo"), "\tone\n\ttwo");
        assert_eq!(indent_block("one\n"), "\tone\n");
    }

    #[test]
    fn indent_composes_per_level() {
        let inner = "Flow c:\n\t- log: n\n";
        let once = indent(inner);
        assert_eq!(once, "Flow c:\n\t\t- log: n\n");
        assert_eq!(indent(&once), "Flow c:\n\t\t\t- log: n\n");
    }
}
