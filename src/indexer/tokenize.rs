//! Normalization and tokenization for indexed documents and queries
//! (`spec.md` §4.3 step 2, §6 "Allowed alphabet").

/// The 31-character Slavic alphabet this engine indexes: lowercase letters
/// with diacritics, plus space. Anything outside this set is dropped before
/// the text is split into words.
pub const ALLOWED_ALPHABET: &str = "abcčćdđeéfghijklmnoópqrsštuvwxyzž ";

/// Lowercases `text`, drops every character outside [`ALLOWED_ALPHABET`],
/// and splits the result on whitespace.
///
/// This is the normalizer both the indexer (per document) and the query
/// engine (per query string) use, so a query token and an indexed word are
/// always compared on the same footing.
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let filtered: String = lowered.chars().filter(|c| ALLOWED_ALPHABET.contains(*c)).collect();
    filtered.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_disallowed_characters() {
        assert_eq!(normalize("Kava, čaj!"), vec!["kava", "čaj"]);
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("kava   čaj\tmleko"), vec!["kava", "čaj", "mleko"]);
    }

    #[test]
    fn lowercases_before_filtering() {
        assert_eq!(normalize("ŽIV-ŽAL"), vec!["živžal"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(normalize("").is_empty());
        assert!(normalize("123 !!! ???").is_empty());
    }
}
