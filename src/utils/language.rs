//! Coarse English-likeness check for transcripts.
//!
//! The pipeline only needs a yes/no gate before the word-count threshold, so
//! this is a lexical heuristic rather than a statistical language model:
//! mostly-ASCII text with a normal density of English function words passes.

use std::collections::HashSet;
use std::sync::LazyLock;

/// High-frequency English function words. Transcripts of spoken English sit
/// well above the density threshold on these alone.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "be", "been", "to",
        "of", "in", "on", "at", "for", "with", "that", "this", "these", "those", "it", "its",
        "you", "your", "we", "our", "they", "their", "i", "my", "me", "he", "she", "his", "her",
        "not", "no", "do", "does", "did", "have", "has", "had", "will", "would", "can", "could",
        "should", "what", "when", "where", "how", "why", "which", "who", "so", "if", "as", "by",
        "from", "about", "into", "out", "up", "down", "just", "more", "some", "all", "there",
    ]
    .into_iter()
    .collect()
});

/// Minimum fraction of ASCII-alphabetic characters among non-whitespace.
const MIN_ASCII_RATIO: f64 = 0.6;

/// Minimum fraction of words that are English function words.
const MIN_STOPWORD_RATIO: f64 = 0.12;

/// Minimum words before the check is meaningful at all.
const MIN_WORDS: usize = 20;

/// Returns `true` when `text` looks like English prose.
///
/// Short texts (under 20 words) never pass; the caller cannot build a post
/// from them anyway.
pub fn looks_english(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < MIN_WORDS {
        return false;
    }

    let mut ascii_alpha = 0usize;
    let mut non_space = 0usize;
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        non_space += 1;
        if c.is_ascii_alphabetic() {
            ascii_alpha += 1;
        }
    }
    if non_space == 0 || (ascii_alpha as f64 / non_space as f64) < MIN_ASCII_RATIO {
        return false;
    }

    let stopword_hits = words
        .iter()
        .filter(|w| {
            let normalized: String = w
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .collect::<String>()
                .to_lowercase();
            STOPWORDS.contains(normalized.as_str())
        })
        .count();

    (stopword_hits as f64 / words.len() as f64) >= MIN_STOPWORD_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_prose_passes() {
        let text = "In this video we are going to talk about the best ways to lose weight \
                    and how you can keep the results for the long term without extreme diets \
                    or complicated routines that nobody can follow";
        assert!(looks_english(text));
    }

    #[test]
    fn test_short_text_fails() {
        assert!(!looks_english("hello world"));
        assert!(!looks_english(""));
    }

    #[test]
    fn test_non_latin_fails() {
        let text = "这 是 一 段 中文 文本 用来 测试 语言 检测 功能 的 内容 \
                    它 应该 被 判定 为 非 英文 因为 没有 英文 词汇 出现 在 这里";
        assert!(!looks_english(text));
    }

    #[test]
    fn test_latin_non_english_fails() {
        // Spanish: Latin script but few English function words
        let text = "hoy vamos a hablar sobre las mejores maneras de perder peso y como \
                    puedes mantener los resultados durante mucho tiempo sin dietas extremas \
                    ni rutinas complicadas que nadie puede seguir cada dia";
        assert!(!looks_english(text));
    }
}
