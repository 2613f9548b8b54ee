use serde::{Deserialize, Serialize};

/// Greedy word wrap to at most `width` characters per line.
///
/// Words longer than `width` are split across lines. Whitespace runs
/// collapse to a single space. Empty input yields no lines.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// A headed text card with a fixed number of visible lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeCard {
    pub heading: String,
    /// The untruncated text.
    pub full_text: String,
    /// Wrapped lines that fit on the card, at most `max_lines`.
    pub lines: Vec<String>,
    pub max_lines: usize,
}

impl NarrativeCard {
    pub fn new(heading: &str, text: &str, width: usize, max_lines: usize) -> Self {
        let mut lines = wrap_lines(text, width);
        lines.truncate(max_lines);
        NarrativeCard {
            heading: heading.to_string(),
            full_text: text.to_string(),
            lines,
            max_lines,
        }
    }

    /// Whether the visible lines drop part of the text.
    pub fn is_truncated(&self) -> bool {
        let count = |s: &str| s.chars().filter(|c| !c.is_whitespace()).count();
        let shown: usize = self.lines.iter().map(|l| count(l)).sum();
        shown < count(&self.full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap_lines("pH ideal", 20), vec!["pH ideal"]);
    }

    #[test]
    fn test_wrap_breaks_at_word_boundary() {
        let lines = wrap_lines("aaa bbb ccc ddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let lines = wrap_lines("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        let lines = wrap_lines("ação ação", 9);
        assert_eq!(lines, vec!["ação ação"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_lines("   ", 10).is_empty());
    }

    #[test]
    fn test_card_truncates_but_keeps_full_text() {
        let text = "um dois tres quatro cinco seis sete oito";
        let card = NarrativeCard::new("ANALISE", text, 10, 2);
        assert_eq!(card.lines.len(), 2);
        assert_eq!(card.full_text, text);
        assert!(card.is_truncated());

        let short = NarrativeCard::new("ANALISE", "curto", 10, 2);
        assert!(!short.is_truncated());
    }
}
