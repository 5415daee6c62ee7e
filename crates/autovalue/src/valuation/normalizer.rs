/// Lower-cases and collapses whitespace so table keys compare cleanly.
pub(crate) fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Token view of free text used for whole-word keyword matching.
///
/// Punctuation other than `-` separates tokens. A hyphenated token is kept whole and followed by its
/// pieces, so `"EX-L"` yields `ex-l ex l` and `"Sport-Touring"` yields `sport-touring sport touring`.
/// The result is padded with a space on both sides.
pub(crate) fn token_phrase(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut tokens = Vec::new();
    for token in lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|token| token.chars().any(char::is_alphanumeric))
    {
        tokens.push(token);
        if token.contains('-') {
            tokens.extend(token.split('-').filter(|piece| !piece.is_empty()));
        }
    }
    if tokens.is_empty() {
        return String::new();
    }
    format!(" {} ", tokens.join(" "))
}

/// Whole-token (or whole multi-token phrase) containment against a padded phrase.
pub(crate) fn contains_phrase(padded: &str, keyword: &str) -> bool {
    if padded.is_empty() || keyword.is_empty() {
        return false;
    }
    padded.contains(&format!(" {keyword} "))
}
