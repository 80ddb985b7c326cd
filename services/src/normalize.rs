//! Release-metadata cleanup for artist, track, and album titles
//!
//! Cleaning runs in two passes. The first deletes bracketed segments whose contents name a junk
//! keyword, e.g. `"Song (Remastered 2009)"` or `"Title [Live at Wembley]"`. The second truncates
//! unbracketed suffixes such as `"Song - Remastered 2011"` or `"Song feat. Someone"`. The first pass
//! must finish before the second starts, since removing a bracket can leave a suffix exposed.

use std::sync::LazyLock;

use regex::Regex;

/// Words marking a bracketed segment as release metadata. Matched case-insensitively as regex
/// fragments, so literal punctuation has to be escaped.
const JUNK_KEYWORDS: &[&str] = &[
    "Remaster",
    "Live",
    "Mono",
    "Stereo",
    "Mix",
    "Version",
    "Edit",
    "Deluxe",
    "Expanded",
    "Anniversary",
    "feat",
    r"ft\.",
];

static JUNK_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){}", JUNK_KEYWORDS.join("|"))).unwrap());

/// Applied in order, each truncating from its first match to the end of the string
static SUFFIX_JUNK: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?is)\s-\s.*Remaster.*").unwrap(),
        Regex::new(r"(?is)\s-\s.*Live.*").unwrap(),
        Regex::new(r"(?is)\s(?:feat\.|ft\.).*").unwrap(),
    ]
});


/// Strips remaster tags, live markers, and featured-artist credits from a title
///
/// Never fails; absent or empty input gives an empty string, as does input that is nothing but
/// junk (`"(Live)"`). Cleaning an already cleaned string returns it unchanged.
pub fn clean<'t>(text: impl Into<Option<&'t str>>) -> String {
    let Some(text) = text.into().filter(|t| !t.is_empty()) else {
        return String::new();
    };

    let mut cleaned = strip_bracketed(text);
    for rule in SUFFIX_JUNK.iter() {
        cleaned = rule.replace(&cleaned, "").into_owned();
    }

    cleaned.trim().to_owned()
}


/// An open `(` or `[` awaiting its closer
struct Segment {
    close: char,
    /// Offset of the opening bracket in the output
    start: usize,
    /// Start of the text since the last kept inner segment, not yet searched for keywords
    run: usize,
    junk: bool,
}

/// Removes every `(...)` or `[...]` pair whose contents hold a junk keyword, together with the
/// whitespace before it
///
/// One pass, innermost segments first. A removed inner segment splices its neighbours together,
/// so `"(Li(Live)ve)"` goes entirely, while a kept inner segment splits the text around it. Each
/// character is searched at most once. A closer that doesn't match the innermost opener leaves
/// every open segment unclosed.
fn strip_bracketed(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut open: Vec<Segment> = Vec::new();

    for c in text.chars() {
        match c {
            '(' | '[' => {
                open.push(Segment {
                    close: if c == '(' { ')' } else { ']' },
                    start: out.len(),
                    run: out.len() + 1,
                    junk: false,
                });
                out.push(c);
            },
            ')' | ']' => match open.pop() {
                Some(seg) if seg.close == c => {
                    if seg.junk || JUNK_KEYWORD.is_match(&out[seg.run..]) {
                        out.truncate(seg.start);
                        out.truncate(out.trim_end().len());
                    } else {
                        if let Some(parent) = open.last_mut() {
                            parent.junk = parent.junk || JUNK_KEYWORD.is_match(&out[parent.run..seg.start]);
                            parent.run = out.len() + 1;
                        }
                        out.push(c);
                    }
                },
                _ => {
                    open.clear();
                    out.push(c);
                },
            },
            _ => out.push(c),
        }
    }

    out
}


#[cfg(test)]
mod tests;
