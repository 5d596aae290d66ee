//! Directive parser
//!
//! Scans model replies for bracketed tool-invocation tokens of the shape
//! `[TOOL:<name>|<arg1>|<arg2>|...]`. The scanner is total: a malformed
//! token simply does not match and stays in the text as literal content.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\[TOOL:(\w+)\|([^\]]*)\]").expect("directive pattern is valid")
});

/// One tool call lifted out of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDirective {
    pub name: String,
    pub args: Vec<String>,
    /// Verbatim matched substring
    pub raw: String,
    /// Byte offsets of `raw` inside the source reply. Substitution works
    /// on these offsets, never on find-and-replace, so identical directive
    /// text occurring twice is spliced once per occurrence.
    pub span: Range<usize>,
}

/// Extract directives in left-to-right order of appearance.
///
/// Pure: the same input always yields the same sequence. Repeats are kept,
/// nothing is deduplicated.
pub fn extract_directives(reply: &str) -> Vec<ParsedDirective> {
    DIRECTIVE_RE
        .captures_iter(reply)
        .map(|caps| {
            #[allow(clippy::expect_used)]
            let m = caps.get(0).expect("whole match always present");
            let args = caps[2].split('|').map(str::to_string).collect();
            ParsedDirective {
                name: caps[1].to_string(),
                args,
                raw: m.as_str().to_string(),
                span: m.range(),
            }
        })
        .collect()
}

/// Remove any directive tokens still present and trim the result.
pub fn strip_directives(text: &str) -> String {
    DIRECTIVE_RE.replace_all(text, "").trim().to_string()
}

/// Render a directive token. Inverse of the scanner for names and
/// arguments free of `|` and `]`.
pub fn format_directive(name: &str, args: &[&str]) -> String {
    format!("[TOOL:{name}|{}]", args.join("|"))
}

/// Rebuild the reply in a single pass, splicing `replacements[i]` over
/// `directives[i]`'s span. Both slices must be index-aligned and the
/// directives ordered as produced by [extract_directives].
pub fn splice_replacements(
    reply: &str,
    directives: &[ParsedDirective],
    replacements: &[String],
) -> String {
    debug_assert_eq!(directives.len(), replacements.len());

    let mut out = String::with_capacity(reply.len());
    let mut cursor = 0;
    for (directive, replacement) in directives.iter().zip(replacements) {
        out.push_str(&reply[cursor..directive.span.start]);
        out.push_str(replacement);
        cursor = directive.span.end;
    }
    out.push_str(&reply[cursor..]);
    out
}
