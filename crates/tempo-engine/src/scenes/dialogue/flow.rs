//! Which line is showing, who is speaking it, and what it says.

use super::payload::{DialogueLine, DialoguePayload};
use super::segments::{emoji_names, tokenize, Segment};

/// Position report for the line just shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub index: usize,
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub is_first: bool,
    pub is_last: bool,
}

/// A line ready to present: resolved speaker plus tokenized text.
#[derive(Debug, Clone, PartialEq)]
pub struct ShownLine {
    pub progress: Progress,
    /// Slot that speaks the line. Differs from `line.name` for unknown speakers.
    pub speaker: String,
    pub line: DialogueLine,
    pub segments: Vec<Segment>,
}

/// Cycles through the dialogue lines in order, wrapping after the last one.
#[derive(Debug, Clone)]
pub struct DialogueFlow {
    payload: DialoguePayload,
    speakers: Vec<String>,
    fallback_speaker: String,
    fallback_emoji: String,
    index: Option<usize>,
}

impl DialogueFlow {
    pub fn new(
        payload: DialoguePayload,
        speakers: Vec<String>,
        fallback_speaker: impl Into<String>,
        fallback_emoji: impl Into<String>,
    ) -> Self {
        Self {
            payload,
            speakers,
            fallback_speaker: fallback_speaker.into(),
            fallback_emoji: fallback_emoji.into(),
            index: None,
        }
    }

    /// Replace the lines and start over.
    pub fn set_payload(&mut self, payload: DialoguePayload) {
        self.payload = payload;
        self.index = None;
    }

    pub fn payload(&self) -> &DialoguePayload {
        &self.payload
    }

    pub fn has_lines(&self) -> bool {
        !self.payload.dialogue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.payload.dialogue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.dialogue.is_empty()
    }

    /// Index of the line on screen, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The next `show_next` will show the first line.
    pub fn reset_index(&mut self) {
        self.index = None;
    }

    /// Advance to the next line, wrapping to the first. None with no lines.
    pub fn show_next(&mut self) -> Option<ShownLine> {
        let total = self.payload.dialogue.len();
        if total == 0 {
            return None;
        }
        let index = self.index.map_or(0, |i| (i + 1) % total);
        self.index = Some(index);

        let line = self.payload.dialogue[index].clone();
        let speaker = self.resolve_speaker(&line.name).to_string();
        let segments = tokenize(&line.text);
        for name in emoji_names(&segments).filter(|n| self.payload.emoji(n).is_none()) {
            log::warn!("unknown emoji {:?} on line {}; showing {:?}", name, index, self.fallback_emoji);
        }
        Some(ShownLine {
            progress: Progress {
                index,
                position: index + 1,
                total,
                is_first: index == 0,
                is_last: index == total - 1,
            },
            speaker,
            line,
            segments,
        })
    }

    /// Speakers without a slot are voiced by the fallback speaker.
    pub fn resolve_speaker<'a>(&'a self, name: &'a str) -> &'a str {
        if self.speakers.iter().any(|s| s == name) {
            name
        } else {
            &self.fallback_speaker
        }
    }

    /// Image url for an emoji name, falling back to the fallback emoji.
    pub fn emoji_url(&self, name: &str) -> Option<&str> {
        self.payload
            .emoji(name)
            .or_else(|| self.payload.emoji(&self.fallback_emoji))
            .map(|e| e.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::dialogue::payload::NamedAsset;

    fn payload(lines: &[(&str, &str)]) -> DialoguePayload {
        DialoguePayload {
            avatars: Vec::new(),
            emojis: vec![
                NamedAsset { name: "satisfied".into(), url: "sat.png".into() },
                NamedAsset { name: "sad".into(), url: "sad.png".into() },
            ],
            dialogue: lines
                .iter()
                .map(|(n, t)| DialogueLine { name: n.to_string(), text: t.to_string() })
                .collect(),
        }
    }

    fn flow(lines: &[(&str, &str)]) -> DialogueFlow {
        DialogueFlow::new(
            payload(lines),
            vec!["Sheldon".into(), "Penny".into(), "Leonard".into()],
            "Leonard",
            "satisfied",
        )
    }

    #[test]
    fn cycles_and_reports_progress() {
        let mut f = flow(&[("Sheldon", "a"), ("Penny", "b"), ("Leonard", "c")]);
        let first = f.show_next().unwrap();
        assert_eq!(first.progress.position, 1);
        assert!(first.progress.is_first);
        f.show_next();
        let third = f.show_next().unwrap();
        assert!(third.progress.is_last);
        assert_eq!(third.progress.total, 3);
        let wrapped = f.show_next().unwrap();
        assert_eq!(wrapped.progress.index, 0);
    }

    #[test]
    fn reset_starts_from_first_line() {
        let mut f = flow(&[("Sheldon", "a"), ("Penny", "b")]);
        f.show_next();
        f.show_next();
        f.reset_index();
        assert_eq!(f.index(), None);
        assert_eq!(f.show_next().unwrap().progress.index, 0);
    }

    #[test]
    fn unknown_speaker_uses_fallback() {
        let mut f = flow(&[("Neighbour", "hello {sad}")]);
        let shown = f.show_next().unwrap();
        assert_eq!(shown.speaker, "Leonard");
        assert_eq!(shown.line.name, "Neighbour");
        assert_eq!(shown.segments.len(), 2);
    }

    #[test]
    fn empty_dialogue_shows_nothing() {
        let mut f = flow(&[]);
        assert!(!f.has_lines());
        assert!(f.show_next().is_none());
        assert_eq!(f.index(), None);
    }

    #[test]
    fn emoji_lookup_falls_back() {
        let f = flow(&[]);
        assert_eq!(f.emoji_url("sad"), Some("sad.png"));
        assert_eq!(f.emoji_url("unknown"), Some("sat.png"));
    }
}
