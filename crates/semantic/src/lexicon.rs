use crate::error::{Result, SemanticError};
use rust_stemmers::Algorithm;
use std::collections::HashSet;
use std::path::Path;

/// Reduces a token to its stem
pub trait Stemmer: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn stem(&self, token: &str) -> String {
        self(token)
    }
}

/// Snowball English stemmer (the revised Porter algorithm)
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

/// A fixed set of lowercase words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Read one word per line; blank lines are ignored
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SemanticError::WordList {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_words(text.lines());
        log::debug!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    /// Built-in English stop words
    pub fn english_stop_words() -> Self {
        Self::from_words(ENGLISH_STOP_WORDS)
    }

    /// Built-in Java reserved words and literals
    pub fn java_keywords() -> Self {
        Self::from_words(JAVA_KEYWORDS)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Word lists and stemmer applied to every document
pub struct Lexicon {
    stop_words: WordList,
    keywords: WordList,
    stemmer: Box<dyn Stemmer>,
}

impl Lexicon {
    pub fn new(stop_words: WordList, keywords: WordList, stemmer: impl Stemmer + 'static) -> Self {
        Self {
            stop_words,
            keywords,
            stemmer: Box::new(stemmer),
        }
    }

    /// English stop words, Java keywords, Snowball English stemming
    pub fn java() -> Self {
        Self::new(
            WordList::english_stop_words(),
            WordList::java_keywords(),
            SnowballStemmer::english(),
        )
    }

    /// Same as [`Lexicon::java`] with a keyword list read from disk
    pub fn with_keyword_file(path: &Path) -> Result<Self> {
        Ok(Self::new(
            WordList::english_stop_words(),
            WordList::load(path)?,
            SnowballStemmer::english(),
        ))
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn is_keyword(&self, token: &str) -> bool {
        self.keywords.contains(token)
    }

    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::java()
    }
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "be", "became", "because", "become", "becomes", "becoming", "been",
    "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "does", "doing", "done",
    "down", "during", "each", "either", "else", "elsewhere", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "further", "had", "has", "have", "having", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "i", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just",
    "last", "latter", "latterly", "least", "less", "many", "may", "meanwhile", "might", "more",
    "moreover", "most", "mostly", "much", "must", "my", "myself", "namely", "neither", "never",
    "nevertheless", "next", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now",
    "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps",
    "please", "rather", "same", "seem", "seemed", "seeming", "seems", "several", "she",
    "should", "since", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "this", "those", "though", "through",
    "throughout", "thru", "thus", "to", "together", "too", "toward", "towards", "under",
    "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who",
    "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without", "would",
    "yet", "you", "your", "yours", "yourself", "yourselves",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "var", "record",
    "yield", "sealed", "permits",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_lists_cover_common_words() {
        let lexicon = Lexicon::java();
        assert!(lexicon.is_stop_word("therefore"));
        assert!(lexicon.is_stop_word("with"));
        assert!(!lexicon.is_stop_word("invoice"));
        assert!(lexicon.is_keyword("synchronized"));
        assert!(lexicon.is_keyword("boolean"));
        assert!(!lexicon.is_keyword("invoice"));
    }

    #[test]
    fn snowball_stemmer_reduces_inflections() {
        let stemmer = SnowballStemmer::english();
        assert_eq!(stemmer.stem("connections"), "connect");
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("accounts"), "account");
    }

    #[test]
    fn closures_act_as_stemmers() {
        let lexicon = Lexicon::new(WordList::default(), WordList::default(), |t: &str| t.to_uppercase());
        assert_eq!(lexicon.stem("order"), "ORDER");
    }

    #[test]
    fn word_list_file_ignores_blank_lines_and_case() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Abstract\n\n  while  \nrecord").unwrap();
        let list = WordList::load(file.path()).unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.contains("abstract"));
        assert!(list.contains("while"));
    }

    #[test]
    fn missing_word_list_reports_path() {
        let err = WordList::load(Path::new("/nonexistent/keywords.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/keywords.txt"));
    }
}
