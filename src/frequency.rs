use crate::{nouns::NounExtractor, preprocess::CleanedText, AnalyzerError};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

/// Noun occurrence counts, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, noun: &str) {
        match self.index.get(noun) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(noun.to_string(), self.entries.len());
                self.entries.push((noun.to_string(), 1));
            }
        }
    }

    pub fn get(&self, noun: &str) -> Option<u32> {
        self.index.get(noun).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for noun in iter {
            table.add(noun.as_ref());
        }
        table
    }
}

/// Counts nouns in cleaned text with an injected tokenizer.
#[derive(Clone)]
pub struct FrequencyAnalyzer {
    extractor: Arc<dyn NounExtractor>,
}

impl FrequencyAnalyzer {
    /// Nouns of a single character carry too little meaning to count.
    pub const MIN_NOUN_CHARS: usize = 2;

    pub fn new(extractor: Arc<dyn NounExtractor>) -> Self {
        Self { extractor }
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    pub fn analyze(&self, text: &CleanedText) -> Result<FrequencyTable, AnalyzerError> {
        if text.is_empty() {
            return Ok(FrequencyTable::new());
        }

        let nouns = self.extractor.nouns(text.as_str())?;
        let table: FrequencyTable = nouns
            .iter()
            .filter(|noun| noun.chars().count() >= Self::MIN_NOUN_CHARS)
            .collect();

        debug!(
            "{} nouns, {} distinct ({})",
            table.total(),
            table.len(),
            self.extractor.name()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nouns::ParticleNounExtractor, preprocess::clean};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    /// Treats every whitespace token as a noun.
    struct EveryWord;

    impl NounExtractor for EveryWord {
        fn name(&self) -> &'static str {
            "every-word"
        }

        fn nouns(&self, text: &str) -> Result<Vec<String>, AnalyzerError> {
            Ok(text.split_whitespace().map(ToString::to_string).collect())
        }
    }

    struct Broken;

    impl NounExtractor for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn nouns(&self, _text: &str) -> Result<Vec<String>, AnalyzerError> {
            Err(AnalyzerError::TokenizerError("dictionary missing".into()))
        }
    }

    #[test]
    fn counts_in_first_seen_order() {
        let analyzer = FrequencyAnalyzer::new(Arc::new(EveryWord));
        let text = clean("고양이 강아지 고양이 거북이 강아지 고양이", &HashSet::new());
        let table = analyzer.analyze(&text).unwrap();

        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![("고양이", 3), ("강아지", 2), ("거북이", 1)]
        );
        assert_eq!(table.get("강아지"), Some(2));
        assert_eq!(table.get("토끼"), None);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn single_character_tokens_are_dropped() {
        let analyzer = FrequencyAnalyzer::new(Arc::new(EveryWord));
        let text = clean("Hello there world a b 집 집 나라", &HashSet::new());
        let table = analyzer.analyze(&text).unwrap();

        assert!(table.iter().all(|(w, _)| w.chars().count() >= 2));
        assert_eq!(table.get("집"), None);
        assert_eq!(table.get("나라"), Some(1));
    }

    #[test]
    fn fallback_div_text_has_no_single_character_nouns() {
        let analyzer = FrequencyAnalyzer::new(Arc::new(ParticleNounExtractor));
        let table = analyzer
            .analyze(&clean("Hello there world", &HashSet::new()))
            .unwrap();

        assert!(table.iter().all(|(w, c)| w.chars().count() >= 2 && c >= 1));
    }

    #[test]
    fn keys_are_unique_and_counts_positive() {
        let analyzer = FrequencyAnalyzer::new(Arc::new(ParticleNounExtractor));
        let text = clean(
            "정부는 경제를 논의했다. 정부의 경제 정책은 경제에 영향을 준다.",
            &HashSet::new(),
        );
        let table = analyzer.analyze(&text).unwrap();

        let keys: HashSet<_> = table.iter().map(|(w, _)| w).collect();
        assert_eq!(keys.len(), table.len());
        assert!(table.iter().all(|(w, c)| w.chars().count() >= 2 && c >= 1));
        assert_eq!(table.get("경제"), Some(3));
        assert_eq!(table.get("정부"), Some(2));
    }

    #[test]
    fn empty_text_is_an_empty_table() {
        let analyzer = FrequencyAnalyzer::new(Arc::new(Broken));
        let table = analyzer.analyze(&clean("", &HashSet::new())).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn tokenizer_errors_propagate() {
        let analyzer = FrequencyAnalyzer::new(Arc::new(Broken));
        let res = analyzer.analyze(&clean("뉴스 기사", &HashSet::new()));
        assert!(matches!(res, Err(AnalyzerError::TokenizerError(_))));
    }
}
