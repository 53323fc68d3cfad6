//! Instrument label normalization.

/// Match a free-text label against the configured instrument list.
///
/// Returns the first configured instrument whose (lower-cased) name occurs
/// in the lower-cased label, or `None` when nothing matches. Used to fold
/// part labels like "2nd Trombone" onto the canonical instrument set.
pub fn normalize_instrument<'a>(label: &str, instruments: &'a [String]) -> Option<&'a str> {
    let haystack = label.to_lowercase();
    instruments
        .iter()
        .find(|instrument| haystack.contains(&instrument.to_lowercase()))
        .map(String::as_str)
}
