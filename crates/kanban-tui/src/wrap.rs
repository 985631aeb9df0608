use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Greedy word wrap into lines at most `width` terminal cells wide. Words
/// wider than a line are split between characters. Always yields at least
/// one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if !current.is_empty() && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        for c in word.chars() {
            let cells = c.width().unwrap_or(0);
            if !current.is_empty() && current_width + cells > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += cells;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap_text("Buy milk", 20), vec!["Buy milk"]);
    }

    #[test]
    fn test_wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("write the quarterly report", 10),
            vec!["write the", "quarterly", "report"]
        );
    }

    #[test]
    fn test_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wide_characters_count_two_cells() {
        let lines = wrap_text("日本語のタスク名です", 10);
        assert_eq!(lines, vec!["日本語のタ", "スク名です"]);
        assert!(lines.iter().all(|l| l.width() <= 10));

        assert_eq!(wrap_text("買う 牛乳", 5), vec!["買う", "牛乳"]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("anything", 0), vec![""]);
    }
}
