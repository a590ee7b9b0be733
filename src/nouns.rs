use crate::AnalyzerError;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Morphological tokenizer that pulls nouns out of Korean text.
pub trait NounExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn nouns(&self, text: &str) -> Result<Vec<String>, AnalyzerError>;
}

// Longest first, so "에서는" is stripped before "는".
const PARTICLES: &[&str] = &[
    "에서부터", "으로부터", "에게서", "에서는", "에서도", "으로는", "이라는", "라는", "까지",
    "부터", "에서", "에게", "한테", "으로", "처럼", "보다", "마다", "이나", "이랑", "와는",
    "과는", "은", "는", "이", "가", "을", "를", "의", "에", "도", "만", "와", "과", "로", "랑",
];

/// Dictionary-free approximation, used when the `ko-dic` feature is off.
///
/// Whitespace tokens lose a trailing postposition only when the stem keeps at
/// least two syllables. One-syllable particles (이, 가, 도, 로, ...) also end
/// plenty of nouns, so those are stripped only when the same text shows the
/// stem in another form: "정부는" becomes "정부" next to "정부가", while a lone
/// "고양이" stays whole. Tokens made only of digits are not nouns.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParticleNounExtractor;

impl ParticleNounExtractor {
    fn split_particle(word: &str) -> Option<(&str, &'static str)> {
        PARTICLES
            .iter()
            .find_map(|p| word.strip_suffix(p).map(|stem| (stem, *p)))
            .filter(|(stem, _)| stem.chars().count() >= 2)
    }
}

impl NounExtractor for ParticleNounExtractor {
    fn name(&self) -> &'static str {
        "particle"
    }

    fn nouns(&self, text: &str) -> Result<Vec<String>, AnalyzerError> {
        let words = text.split_whitespace().collect_vec();

        // stem -> distinct surface forms that reduce to it
        let mut forms: HashMap<&str, HashSet<&str>> = HashMap::new();
        for &word in &words {
            forms.entry(word).or_default().insert(word);
            if let Some((stem, _)) = Self::split_particle(word) {
                forms.entry(stem).or_default().insert(word);
            }
        }

        Ok(words
            .iter()
            .map(|&word| match Self::split_particle(word) {
                Some((stem, particle)) if particle.chars().count() >= 2 => stem,
                Some((stem, _)) if forms.get(stem).map_or(0, HashSet::len) >= 2 => stem,
                _ => word,
            })
            .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
            .map(ToString::to_string)
            .collect_vec())
    }
}

#[cfg(feature = "ko-dic")]
pub use self::ko_dic::KoDicNounExtractor;

#[cfg(feature = "ko-dic")]
mod ko_dic {
    use super::NounExtractor;
    use crate::AnalyzerError;
    use lindera::{
        dictionary::{load_dictionary_from_kind, DictionaryKind},
        mode::Mode,
        segmenter::Segmenter,
        tokenizer::Tokenizer,
    };

    // mecab-ko-dic tags: common, proper and bound nouns, pronouns.
    const NOUN_TAGS: &[&str] = &["NNG", "NNP", "NNB", "NP"];

    /// Noun extraction backed by lindera and the embedded mecab-ko-dic.
    pub struct KoDicNounExtractor {
        tokenizer: Tokenizer,
    }

    impl KoDicNounExtractor {
        pub fn new() -> Result<Self, AnalyzerError> {
            let dictionary = load_dictionary_from_kind(DictionaryKind::KoDic)
                .map_err(|e| AnalyzerError::TokenizerError(e.to_string()))?;
            let segmenter = Segmenter::new(Mode::Normal, dictionary, None);
            Ok(Self {
                tokenizer: Tokenizer::new(segmenter),
            })
        }
    }

    impl NounExtractor for KoDicNounExtractor {
        fn name(&self) -> &'static str {
            "ko-dic"
        }

        fn nouns(&self, text: &str) -> Result<Vec<String>, AnalyzerError> {
            let mut tokens = self
                .tokenizer
                .tokenize(text)
                .map_err(|e| AnalyzerError::TokenizerError(e.to_string()))?;

            let mut nouns = vec![];
            for token in tokens.iter_mut() {
                let is_noun = token
                    .details()
                    .first()
                    .map(|tag| NOUN_TAGS.contains(tag))
                    .unwrap_or(false);
                if is_noun {
                    nouns.push(token.text.to_string());
                }
            }
            Ok(nouns)
        }
    }
}

/// The dictionary tokenizer when `ko-dic` is compiled in (the default),
/// otherwise [`ParticleNounExtractor`].
pub fn default_extractor() -> Result<Box<dyn NounExtractor>, AnalyzerError> {
    #[cfg(feature = "ko-dic")]
    {
        Ok(Box::new(KoDicNounExtractor::new()?))
    }
    #[cfg(not(feature = "ko-dic"))]
    {
        Ok(Box::new(ParticleNounExtractor))
    }
}
