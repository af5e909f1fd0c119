//! Conversion of free-text test descriptions into method identifiers.

/// Characters stripped from descriptions before they become identifiers.
const DISALLOWED: [char; 4] = [' ', '.', '-', '\n'];

/// Convert a free-text description line into a `test`-prefixed identifier.
///
/// The whole line is lowercased first, then the first letter of every word is
/// capitalized, disallowed characters are stripped, and the result is
/// prefixed with `test`. Whitespace and the disallowed characters both end a
/// word, so `"the Thing-right.now"` becomes `TheThingRightNow`. Lowercasing
/// before capitalization means acronyms do not survive: `"parse HTTP"`
/// becomes `testParseHttp`.
///
/// Degenerate input is not rejected: an empty or symbol-only description
/// yields `test` plus whatever survives filtering.
#[must_use]
pub fn sanitize(description: &str) -> String {
    let mut out = String::with_capacity(description.len() + 4);
    out.push_str("test");

    let mut at_word_start = true;
    for ch in description.to_lowercase().chars() {
        if ch.is_whitespace() || DISALLOWED.contains(&ch) {
            at_word_start = true;
            if DISALLOWED.contains(&ch) {
                continue;
            }
        }
        if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}
