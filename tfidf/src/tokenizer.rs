use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Alternation order matters: anchor spans, then any other tag, then word runs.
    static ref RE: Regex = Regex::new(r"<a.*?</a>|<[^>]*>|[\w'@#]+").expect("valid regex");
}

/// Tokenize text into lower-cased terms, keeping anchor spans and tags as whole tokens.
///
/// Tokens come back in left-to-right scan order and may repeat.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Distinct terms of `text`, as used for document-frequency counting.
pub fn distinct_terms(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("The girl said hello, over the PHONE!");
        assert_eq!(t, vec!["the", "girl", "said", "hello", "over", "the", "phone"]);
    }

    #[test]
    fn keeps_apostrophes_mentions_and_hashtags() {
        let t = tokenize("don't @alice #rust_lang");
        assert_eq!(t, vec!["don't", "@alice", "#rust_lang"]);
    }

    #[test]
    fn anchor_span_is_one_token() {
        let t = tokenize(r#"see <A HREF="http://x.org">the Site</A> now"#);
        assert_eq!(t, vec!["see", r#"<a href="http://x.org">the site</a>"#, "now"]);
    }

    #[test]
    fn other_tags_are_one_token() {
        let t = tokenize("<b>bold</b> <br/>");
        assert_eq!(t, vec!["<b>", "bold", "</b>", "<br/>"]);
    }

    #[test]
    fn empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn distinct_collapses_repeats() {
        let d = distinct_terms("moon moon MOON said");
        assert_eq!(d.len(), 2);
        assert!(d.contains("moon"));
    }
}
