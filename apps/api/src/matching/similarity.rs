//! Skill similarity: TF-IDF cosine similarity over a two-document corpus.
//!
//! Vectorization: lowercase, tokens of two or more word characters, smoothed
//! IDF `ln((1 + n) / (1 + df)) + 1`, raw term counts, L2 norm. Tokens found
//! in [`ENGLISH_STOP_WORDS`] are dropped before counting.
//!
//! Known weakness: with only two documents the IDF term can take two values.
//! A term found in both documents weighs 1.0, a term found in one weighs
//! `ln(3/2) + 1`. Rarity across a real corpus is not captured.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

/// Reasons a text pair cannot be vectorized. Never surfaced past
/// [`skill_similarity`], which scores these pairs as 0.0.
#[derive(Debug, Error, PartialEq)]
pub enum DegenerateInput {
    #[error("input text is empty")]
    EmptyText,

    #[error("no terms left after stop-word removal")]
    EmptyVocabulary,
}

/// Hand-picked English function words and fillers (articles, pronouns,
/// auxiliaries, prepositions, quantifiers). Kept sorted for binary search.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "be", "became", "because", "become", "becomes", "been", "before",
    "beforehand", "behind", "being", "below", "beside", "besides", "between", "beyond", "both",
    "but", "by", "can", "cannot", "could", "did", "do", "does", "done", "down", "due", "during",
    "each", "eg", "either", "else", "elsewhere", "enough", "etc", "even", "ever", "every",
    "everyone", "everything", "everywhere", "except", "few", "for", "former", "formerly",
    "from", "further", "had", "has", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hers", "herself", "him", "himself", "his", "how", "however", "ie",
    "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "last", "latter",
    "least", "less", "ltd", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "much", "must", "my", "myself", "namely", "neither", "never",
    "nevertheless", "next", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now",
    "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps",
    "please", "rather", "re", "same", "seem", "seemed", "seeming", "seems", "several", "she",
    "should", "since", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "thereupon", "these", "they", "this", "those", "though", "through", "throughout", "thru",
    "thus", "to", "together", "too", "toward", "towards", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Lowercases and splits on anything that is not a word character,
/// keeping tokens of two or more characters that are not stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() >= 2)
        .filter(|s| ENGLISH_STOP_WORDS.binary_search(s).is_err())
        .map(|s| s.to_string())
        .collect()
}

/// Similarity of two texts in `[0, 1]`. Degenerate pairs score 0.0.
pub fn skill_similarity(a: &str, b: &str) -> f64 {
    match tfidf_cosine(a, b) {
        Ok(score) => score,
        Err(reason) => {
            debug!("Skill similarity scored 0.0: {reason}");
            0.0
        }
    }
}

/// TF-IDF cosine similarity with the degenerate cases reported explicitly.
pub fn tfidf_cosine(a: &str, b: &str) -> Result<f64, DegenerateInput> {
    if a.trim().is_empty() || b.trim().is_empty() {
        return Err(DegenerateInput::EmptyText);
    }

    let counts_a = term_counts(a);
    let counts_b = term_counts(b);
    if counts_a.is_empty() && counts_b.is_empty() {
        return Err(DegenerateInput::EmptyVocabulary);
    }

    let vec_a = tfidf_vector(&counts_a, &counts_b);
    let vec_b = tfidf_vector(&counts_b, &counts_a);

    Ok(cosine_similarity(&vec_a, &vec_b).clamp(0.0, 1.0))
}

fn term_counts(text: &str) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0.0) += 1.0;
    }
    counts
}

/// Weights `own` terms against the two-document corpus `{own, other}`.
fn tfidf_vector(own: &HashMap<String, f64>, other: &HashMap<String, f64>) -> HashMap<String, f64> {
    const TOTAL_DOCS: f64 = 2.0;

    own.iter()
        .map(|(term, &tf)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            let idf = ((1.0 + TOTAL_DOCS) / (1.0 + df)).ln() + 1.0;
            (term.clone(), tf * idf)
        })
        .collect()
}

pub fn cosine_similarity(vec_a: &HashMap<String, f64>, vec_b: &HashMap<String, f64>) -> f64 {
    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (term, weight) in vec_a {
        norm_a += weight * weight;
        if let Some(weight_b) = vec_b.get(term) {
            dot_product += weight * weight_b;
        }
    }

    for weight in vec_b.values() {
        norm_b += weight * weight;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(skill_similarity("", "python"), 0.0);
        assert_eq!(skill_similarity("python", ""), 0.0);
        assert_eq!(skill_similarity("   \n\t", "python sql"), 0.0);
        assert_eq!(skill_similarity("", ""), 0.0);
    }

    #[test]
    fn test_empty_input_is_reported_as_degenerate() {
        assert_eq!(tfidf_cosine(" ", "rust"), Err(DegenerateInput::EmptyText));
    }

    #[test]
    fn test_stop_words_only_is_empty_vocabulary() {
        assert_eq!(
            tfidf_cosine("the and of", "to be or not"),
            Err(DegenerateInput::EmptyVocabulary)
        );
        assert_eq!(skill_similarity("the and of", "to be or not"), 0.0);
    }

    #[test]
    fn test_identical_text_scores_one() {
        let text = "Senior Rust engineer, Tokio, PostgreSQL, distributed systems";
        let score = skill_similarity(text, text);
        assert!((score - 1.0).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_disjoint_terms_score_zero() {
        let score = skill_similarity("python flask", "haskell ocaml");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_zero_and_one() {
        let score = skill_similarity(
            "Python backend engineer, Flask, SQL",
            "5 years Python, some SQL, no Flask",
        );
        assert!(score > 0.0 && score < 1.0, "Score was {score}");
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = "rust tokio axum postgres";
        let b = "rust actix postgres redis";
        assert!((skill_similarity(a, b) - skill_similarity(b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        let tokens = tokenize("I have 5 years of C and Go_lang, plus SQL!");
        assert_eq!(tokens, vec!["years", "go_lang", "plus", "sql"]);
    }

    #[test]
    fn test_stop_words_sorted_and_unique() {
        assert!(ENGLISH_STOP_WORDS.windows(2).all(|w| w[0] < w[1]));
        for word in ["the", "and", "of", "with", "yourselves"] {
            assert!(tokenize(word).is_empty(), "{word} should be dropped");
        }
    }

    #[test]
    fn test_shared_terms_weigh_less_than_unique_terms() {
        let own = term_counts("rust kafka");
        let other = term_counts("rust");
        let vector = tfidf_vector(&own, &other);
        assert!((vector["rust"] - 1.0).abs() < 1e-12);
        assert!(vector["kafka"] > vector["rust"]);
    }
}
