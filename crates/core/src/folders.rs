//! Custom folder list normalization and its stored encoding.
//!
//! Folder lists are persisted as one string joined with a sentinel
//! separator; [`join`] and [`split`] are inverses for any normalized list.

/// Separator used in the stored joined form. Names containing it are
/// dropped during normalization so the encoding stays reversible.
pub const SEPARATOR: &str = "|||";

/// Normalize a raw folder list: trim entries, drop empties and names
/// containing the separator, and de-duplicate keeping the first
/// occurrence.
pub fn normalize<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() || trimmed.contains(SEPARATOR) {
            continue;
        }
        if out.iter().any(|existing| existing == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

/// Join a normalized folder list into its stored form.
pub fn join(names: &[String]) -> String {
    names.join(SEPARATOR)
}

/// Split a stored folder string back into the list.
///
/// Inverse of [`join`] for distinct, non-empty, trimmed names; the empty
/// string yields `[]`.
pub fn split(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(SEPARATOR).map(str::to_string).collect()
}
