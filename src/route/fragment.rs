/// Fragment codec
///
/// Converts between a structured navigation intent and the location
/// fragment string. The grammar is:
///
/// ```text
/// #/[<digits>][?search=<form-urlencoded text>]
/// ```
///
/// Both segments are optional and independent. Anything that does not match
/// decodes to an empty intent; the codec never fails loudly.

use std::fmt::Write;
use std::sync::OnceLock;

use regex::Regex;

use crate::state::data::ProductId;

/// Name of the query parameter carrying the search term
const SEARCH_PARAM: &str = "search";

/// The decoded meaning of a fragment.
///
/// Recomputed on every fragment change and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationIntent {
    /// Product named by the path segment, if any
    pub product_id: Option<ProductId>,
    /// Search term carried in the query, if present and non-empty
    pub search_term: Option<String>,
}

impl NavigationIntent {
    /// The search term, or an empty string when the fragment carries none
    pub fn search_or_empty(&self) -> &str {
        self.search_term.as_deref().unwrap_or("")
    }
}

fn fragment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/([0-9]+)?(?:\?(.*))?$").expect("fragment pattern is a valid regex")
    })
}

/// Decode a fragment string into a navigation intent.
///
/// The leading `#` is optional. Malformed fragments (missing leading slash,
/// extra path segments, non-digit ids) yield the empty intent. An id too
/// large to represent is dropped while the search term is kept.
pub fn decode(fragment: &str) -> NavigationIntent {
    let stripped = fragment.strip_prefix('#').unwrap_or(fragment);

    let Some(captures) = fragment_pattern().captures(stripped) else {
        return NavigationIntent::default();
    };

    let product_id = captures
        .get(1)
        .and_then(|digits| digits.as_str().parse::<ProductId>().ok());

    let search_term = captures.get(2).and_then(|query| {
        form_urlencoded::parse(query.as_str().as_bytes())
            .find(|(key, _)| key == SEARCH_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    });

    NavigationIntent {
        product_id,
        search_term,
    }
}

/// Encode a product id and search term into the canonical fragment form.
///
/// The query segment is only emitted when the term is non-empty after
/// trimming. Output is deterministic so callers can compare fragments
/// byte-for-byte to skip no-op writes.
pub fn encode(product_id: Option<ProductId>, search_term: Option<&str>) -> String {
    let mut fragment = String::from("#/");

    if let Some(id) = product_id {
        // Writing into a String cannot fail
        let _ = write!(fragment, "{id}");
    }

    if let Some(term) = search_term.filter(|term| !term.trim().is_empty()) {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(SEARCH_PARAM, term)
            .finish();
        fragment.push('?');
        fragment.push_str(&query);
    }

    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn intent(product_id: Option<ProductId>, search_term: Option<&str>) -> NavigationIntent {
        NavigationIntent {
            product_id,
            search_term: search_term.map(str::to_string),
        }
    }

    #[test]
    fn test_decode_id_and_search() {
        assert_eq!(decode("#/7?search=ale"), intent(Some(7), Some("ale")));
    }

    #[test]
    fn test_decode_segments_are_independent() {
        assert_eq!(decode("#/"), intent(None, None));
        assert_eq!(decode("#/12"), intent(Some(12), None));
        assert_eq!(decode("#/?search=99"), intent(None, Some("99")));
    }

    #[test]
    fn test_decode_without_hash_prefix() {
        assert_eq!(decode("/3"), intent(Some(3), None));
    }

    #[test]
    fn test_decode_plus_and_percent_escapes() {
        assert_eq!(
            decode("#/?search=pale+ale%21"),
            intent(None, Some("pale ale!"))
        );
    }

    #[test]
    fn test_decode_ignores_other_query_params() {
        assert_eq!(
            decode("#/4?sort=ibu&search=stout"),
            intent(Some(4), Some("stout"))
        );
    }

    #[test]
    fn test_decode_malformed_is_empty_intent() {
        for fragment in ["", "#", "#7", "#/abc", "#/7/extra", "#/7x?search=ale", "#//"] {
            assert_eq!(decode(fragment), NavigationIntent::default(), "{fragment}");
        }
    }

    #[test]
    fn test_decode_empty_search_is_none() {
        assert_eq!(decode("#/5?search="), intent(Some(5), None));
    }

    #[test]
    fn test_decode_overflowing_id_keeps_search() {
        assert_eq!(
            decode("#/99999999999999999999999?search=ale"),
            intent(None, Some("ale"))
        );
    }

    #[test]
    fn test_encode_canonical_forms() {
        assert_eq!(encode(None, None), "#/");
        assert_eq!(encode(Some(7), None), "#/7");
        assert_eq!(encode(None, Some("99")), "#/?search=99");
        assert_eq!(encode(Some(7), Some("ale")), "#/7?search=ale");
    }

    #[test]
    fn test_encode_omits_blank_search() {
        assert_eq!(encode(Some(2), Some("")), "#/2");
        assert_eq!(encode(Some(2), Some("   ")), "#/2");
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        assert_eq!(encode(None, Some("a&b=c")), "#/?search=a%26b%3Dc");
        assert_eq!(encode(None, Some("pale ale")), "#/?search=pale+ale");
    }

    proptest! {
        #[test]
        fn test_round_trip_law(id in proptest::option::of(any::<ProductId>()), term in proptest::option::of(".*")) {
            let fragment = encode(id, term.as_deref());
            let expected = term.filter(|t| !t.trim().is_empty());
            prop_assert_eq!(decode(&fragment), NavigationIntent { product_id: id, search_term: expected });
        }

        #[test]
        fn test_encode_is_deterministic(id in proptest::option::of(any::<ProductId>()), term in ".*") {
            prop_assert_eq!(encode(id, Some(&term)), encode(id, Some(&term)));
        }
    }
}
