//! Token-bound enforcement: oversized chunk text is split on paragraph
//! boundaries into "Part N" pieces labelled with the original chunk name.

use docmatch_core::constants::{CHARS_PER_TOKEN, MAX_CHUNK_TOKENS};

/// Split `text` into pieces that each fit the token bound.
///
/// Texts within the bound come back as a single unlabelled piece.
/// Oversized texts are split greedily on blank-line paragraph boundaries;
/// every piece is prefixed with `"{name} (Part N)"` so the origin stays
/// visible after splitting. A single paragraph larger than the bound is
/// hard-split on char boundaries.
pub fn split_oversized(name: &str, text: &str) -> Vec<String> {
    let max_chars = MAX_CHUNK_TOKENS * CHARS_PER_TOKEN;
    if text.len() <= max_chars {
        return vec![text.to_string()];
    }

    // Reserve room for the part label.
    let budget = max_chars.saturating_sub(name.len() + 16);

    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        for piece in hard_split(paragraph, budget) {
            if !current.is_empty() && current.len() + 2 + piece.len() > budget {
                parts.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(piece);
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }

    parts
        .into_iter()
        .enumerate()
        .map(|(i, body)| format!("{} (Part {})\n{}", name, i + 1, body))
        .collect()
}

/// Split a paragraph that alone exceeds the budget into char-boundary pieces.
fn hard_split(paragraph: &str, budget: usize) -> Vec<&str> {
    if paragraph.len() <= budget {
        return vec![paragraph];
    }
    let mut pieces = Vec::new();
    let mut rest = paragraph;
    while rest.len() > budget {
        let mut cut = budget;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_text_is_untouched() {
        let parts = split_oversized("Login", "Screen: Login\nDescription: short");
        assert_eq!(parts.len(), 1);
        assert!(!parts[0].contains("Part"));
    }

    #[test]
    fn oversized_text_splits_on_paragraphs() {
        let paragraph = "word ".repeat(300); // ~1500 chars
        let text = (0..4).map(|_| paragraph.clone()).collect::<Vec<_>>().join("\n\n");
        let parts = split_oversized("Login", &text);
        assert!(parts.len() > 1);
        for (i, part) in parts.iter().enumerate() {
            assert!(part.starts_with(&format!("Login (Part {})", i + 1)));
            assert!(part.len() <= MAX_CHUNK_TOKENS * CHARS_PER_TOKEN);
        }
    }

    #[test]
    fn giant_single_paragraph_is_hard_split() {
        let text = "x".repeat(MAX_CHUNK_TOKENS * CHARS_PER_TOKEN * 2 + 17);
        let parts = split_oversized("Blob", &text);
        assert!(parts.len() >= 2);
        let total: usize = parts
            .iter()
            .map(|p| p.lines().skip(1).map(str::len).sum::<usize>())
            .sum();
        assert_eq!(total, text.len());
    }
}
