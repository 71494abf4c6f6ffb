// crates/wagemap-core/src/text.rs

//! Name folding used by county resolution and county search.

/// Legal suffixes stripped from county names, applied in this order.
///
/// Each suffix is removed at most once, so "James City County" folds to
/// "james".
pub const COUNTY_SUFFIXES: [&str; 5] = [" county", " parish", " borough", " census area", " city"];

/// Transliterate to ASCII and lowercase.
///
/// ```rust
/// use wagemap_core::text::fold_key;
///
/// assert_eq!(fold_key("Doña Ana"), "dona ana");
/// assert_eq!(fold_key("ST. LOUIS"), "st. louis");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Normalize a county name for tolerant matching.
///
/// Folds case and diacritics (`ñ` becomes `n`), strips one trailing
/// occurrence of each suffix in [`COUNTY_SUFFIXES`], removes `.` and `'`,
/// and trims whitespace.
///
/// ```rust
/// use wagemap_core::text::normalize_county;
///
/// assert_eq!(normalize_county("St. Mary's Parish"), "st marys");
/// assert_eq!(normalize_county("Bethel Census Area"), "bethel");
/// assert_eq!(normalize_county("Doña Ana County"), "dona ana");
/// ```
pub fn normalize_county(name: &str) -> String {
    let mut s = fold_key(name.trim());
    for suffix in COUNTY_SUFFIXES {
        if s.ends_with(suffix) {
            s.truncate(s.len() - suffix.len());
        }
    }
    s.retain(|c| c != '.' && c != '\'');
    s.trim().to_string()
}

/// Exact lookup key: the raw name and state, untouched.
pub fn exact_key(name: &str, state: &str) -> String {
    format!("{name}|{state}")
}

/// Normalized lookup key built from [`normalize_county`] and the
/// upper-cased state abbreviation.
pub fn normalized_key(name: &str, state: &str) -> String {
    compose_key(&normalize_county(name), state)
}

pub(crate) fn compose_key(normalized_name: &str, state: &str) -> String {
    format!("{}|{}", normalized_name, state.trim().to_ascii_uppercase())
}

/// Saint/St. spelling variants of an already normalized name.
///
/// A word `st` followed by another word yields a `saint` variant, and a
/// word `saint` followed by another word yields an `st` variant. Words that
/// merely end in "st" ("west") are left alone.
///
/// ```rust
/// use wagemap_core::text::saint_variants;
///
/// assert_eq!(saint_variants("st francis"), vec!["saint francis".to_string()]);
/// assert_eq!(saint_variants("saint louis"), vec!["st louis".to_string()]);
/// assert!(saint_variants("west baton rouge").is_empty());
/// ```
pub fn saint_variants(normalized: &str) -> Vec<String> {
    let mut out = Vec::new();
    for (from, to) in [("st", "saint"), ("saint", "st")] {
        if let Some(variant) = replace_word(normalized, from, to) {
            out.push(variant);
        }
    }
    out
}

fn replace_word(s: &str, from: &str, to: &str) -> Option<String> {
    let words: Vec<&str> = s.split(' ').collect();
    let last = words.len().saturating_sub(1);
    let mut changed = false;
    let replaced: Vec<&str> = words
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            // "st " requires a following word
            if i < last && w == from {
                changed = true;
                to
            } else {
                w
            }
        })
        .collect();
    changed.then(|| replaced.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_each_suffix_once() {
        assert_eq!(normalize_county("Orleans Parish"), "orleans");
        assert_eq!(normalize_county("Juneau City and Borough"), "juneau city and");
        assert_eq!(normalize_county("Kodiak Island Borough"), "kodiak island");
        assert_eq!(normalize_county("Baltimore city"), "baltimore");
        assert_eq!(normalize_county("County County"), "county");
    }

    #[test]
    fn removes_punctuation_and_whitespace() {
        assert_eq!(normalize_county("  Prince George's County "), "prince georges");
        assert_eq!(normalize_county("Ste. Genevieve County"), "ste genevieve");
    }

    #[test]
    fn keys_are_state_qualified() {
        assert_eq!(exact_key("St. Francis County", "AR"), "St. Francis County|AR");
        assert_eq!(normalized_key("St. Francis County", " ar"), "st francis|AR");
    }

    #[test]
    fn saint_variant_needs_a_following_word() {
        assert!(saint_variants("east st").is_empty());
        assert_eq!(
            saint_variants("st john the baptist"),
            vec!["saint john the baptist".to_string()]
        );
    }
}
