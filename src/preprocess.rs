use itertools::Itertools;
use lazy_regex::regex;
use std::{collections::HashSet, fmt};

/// Text with punctuation removed, whitespace collapsed and stop words dropped.
///
/// Only [`clean`] builds one, so holding a `CleanedText` means the text went
/// through the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedText(String);

impl CleanedText {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|w| !w.is_empty())
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Clean extracted article text.
///
/// Non-word characters become spaces, whitespace runs collapse to a single
/// space, whitespace tokens that are exact members of `stop_words` are dropped
/// and the result is trimmed.
pub fn clean(raw_text: &str, stop_words: &HashSet<String>) -> CleanedText {
    let text = regex!(r"[^\w\s]").replace_all(raw_text, " ");
    let text = regex!(r"\s+").replace_all(&text, " ");
    let text = text
        .split_whitespace()
        .filter(|word| !stop_words.contains(*word))
        .join(" ");

    CleanedText(text.trim().to_string())
}

/// Parse a space separated stop-word field into a set.
pub fn parse_stop_words(input: &str) -> HashSet<String> {
    input.split_whitespace().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stop_words(words: &[&str]) -> HashSet<String> {
        words.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn removes_punctuation_and_collapses_whitespace() {
        let cleaned = clean("  안녕하세요,   세계!\n\n뉴스\t기사...  ", &HashSet::new());
        assert_eq!(cleaned.as_str(), "안녕하세요 세계 뉴스 기사");
    }

    #[test]
    fn keeps_digits_and_underscores() {
        let cleaned = clean("2024년 snake_case (test)", &HashSet::new());
        assert_eq!(cleaned.as_str(), "2024년 snake_case test");
    }

    #[test]
    fn drops_exact_stop_words_only() {
        let cleaned = clean(
            "기사 댓글 바로가기 기사를 읽고 댓글",
            &stop_words(&["기사", "댓글", "바로가기"]),
        );
        assert_eq!(cleaned.as_str(), "기사를 읽고");
    }

    #[test]
    fn stop_words_match_after_punctuation_is_removed() {
        let cleaned = clean("[기사] 속보: 경제", &stop_words(&["기사", "속보"]));
        assert_eq!(cleaned.as_str(), "경제");
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(clean("", &HashSet::new()).is_empty());
        assert!(clean(" \n\t ", &HashSet::new()).is_empty());
        assert!(clean("!!! ... ???", &HashSet::new()).is_empty());
        assert!(clean("기사 댓글", &stop_words(&["기사", "댓글"])).is_empty());
    }

    #[test]
    fn clean_is_idempotent() {
        let samples = [
            "",
            "Hello, world! Hello... world?",
            "  정부는 11일(현지시간) \"경제 정책\"을 발표했다.  ",
            "a-b-c d_e_f 1,000원 3.14",
            "기사 입력 2024.01.01 · 수정 댓글 바로가기",
        ];
        let sets = [
            HashSet::new(),
            stop_words(&["기사", "댓글", "바로가기"]),
            stop_words(&["Hello", "a", "1"]),
        ];

        for text in samples {
            for set in &sets {
                let once = clean(text, set);
                let twice = clean(once.as_str(), set);
                assert_eq!(once, twice, "not idempotent for {:?}", text);
            }
        }
    }

    #[test]
    fn cleaned_text_has_no_stop_words() {
        let set = stop_words(&["기사", "입력", "수정", "the"]);
        let samples = [
            "기사 입력 2024.01.01 · 수정 기사",
            "the cat, the dog; the end",
            "입력입력 입력 (입력)",
        ];

        for text in samples {
            let cleaned = clean(text, &set);
            for word in cleaned.words() {
                assert!(!set.contains(word), "{:?} survived in {:?}", word, cleaned);
            }
        }
    }

    #[test]
    fn parses_stop_word_field() {
        assert_eq!(
            parse_stop_words("  기사 댓글   바로가기 기사 "),
            stop_words(&["기사", "댓글", "바로가기"])
        );
        assert!(parse_stop_words("   ").is_empty());
    }
}
