//! Inline emoji tokens: `"hi {smile} there"` splits into text and emoji runs.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Emoji { name: String },
}

fn token_pattern() -> Option<&'static Regex> {
    static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\{([^{}]+)\}").ok()).as_ref()
}

/// Split a dialogue line into text and `{name}` emoji segments.
///
/// Text between tokens is kept verbatim and emoji names are trimmed.
/// Never returns an empty list: a line with nothing in it is one empty text run.
pub fn tokenize(input: &str) -> Vec<Segment> {
    let Some(pattern) = token_pattern() else {
        return vec![Segment::Text(input.to_string())];
    };

    let mut out = Vec::new();
    let mut cursor = 0;
    for caps in pattern.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            out.push(Segment::Text(input[cursor..whole.start()].to_string()));
        }
        out.push(Segment::Emoji {
            name: name.as_str().trim().to_string(),
        });
        cursor = whole.end();
    }
    if cursor < input.len() {
        out.push(Segment::Text(input[cursor..].to_string()));
    }

    if out.is_empty() {
        out.push(Segment::Text(input.to_string()));
    }
    out
}

/// Emoji names referenced by a line, in order.
pub fn emoji_names(segments: &[Segment]) -> impl Iterator<Item = &str> {
    segments.iter().filter_map(|s| match s {
        Segment::Emoji { name } => Some(name.as_str()),
        Segment::Text(_) => None,
    })
}
