use crate::error::ReportError;

/// Resolves an abbreviated keyword against a list of candidates.
///
/// An exact match always wins; otherwise the key must be the prefix of exactly one candidate.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String, ReportError> {
    let key = key.trim().to_lowercase();

    if candidates.contains(&key.as_str()) {
        return Ok(key);
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key.as_str()))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(ReportError::UnknownKey(key)),
        _ => Err(ReportError::AmbiguousKey {
            key,
            candidates: matches.iter().map(|m| m.to_string()).collect(),
        }),
    }
}
