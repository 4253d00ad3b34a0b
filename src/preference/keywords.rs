//! Keyword list maintenance: case-folded, unique, non-empty, capped.

use crate::error::Rejection;

/// Trim and lowercase a user-entered keyword. Returns `None` if nothing is left.
pub fn normalize_keyword(raw: &str) -> Option<String> {
    let k = raw.trim().to_lowercase();
    (!k.is_empty()).then_some(k)
}

/// Append `raw` to `keywords` after normalization.
pub fn add_keyword(keywords: &mut Vec<String>, raw: &str, limit: usize) -> Result<String, Rejection> {
    let k = normalize_keyword(raw).ok_or(Rejection::EmptyKeyword)?;
    if keywords.contains(&k) {
        return Err(Rejection::DuplicateKeyword(k));
    }
    if keywords.len() >= limit {
        return Err(Rejection::KeywordLimitReached { limit });
    }
    keywords.push(k.clone());
    Ok(k)
}

/// Remove `raw` (matched case-insensitively) from `keywords`.
pub fn remove_keyword(keywords: &mut Vec<String>, raw: &str) -> Result<String, Rejection> {
    let k = normalize_keyword(raw).ok_or(Rejection::EmptyKeyword)?;
    match keywords.iter().position(|existing| existing == &k) {
        Some(idx) => Ok(keywords.remove(idx)),
        None => Err(Rejection::UnknownKeyword(k)),
    }
}

/// Re-normalize a loaded list: drop empties and duplicates, keep the first
/// `limit` entries.
pub fn sanitize_keywords(keywords: &[String], limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len().min(limit));
    for raw in keywords {
        if out.len() >= limit {
            break;
        }
        if let Some(k) = normalize_keyword(raw) {
            if !out.contains(&k) {
                out.push(k);
            }
        }
    }
    out
}
