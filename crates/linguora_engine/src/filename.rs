/// Marker put in front of every translated file name.
pub const ARTIFACT_PREFIX: &str = "translated_";

const MAX_STEM_CHARS: usize = 80;

/// Name for the translated copy of `original`: `translated_{sanitized}`.
///
/// The extension is kept (lowercased) so the result opens with the same
/// application; the stem loses path separators and characters Windows or
/// share targets reject.
pub fn artifact_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);
    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (base, None),
    };

    let stem = sanitize_stem(stem);
    match ext.map(sanitize_extension).filter(|ext| !ext.is_empty()) {
        Some(ext) => format!("{ARTIFACT_PREFIX}{stem}.{ext}"),
        None => format!("{ARTIFACT_PREFIX}{stem}"),
    }
}

fn sanitize_stem(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    let trimmed = compacted.trim_matches(&['_', ' ', '.'][..]);
    let mut stem: String = trimmed.chars().take(MAX_STEM_CHARS).collect();
    if stem.is_empty() {
        stem = "document".to_string();
    }
    stem
}

fn sanitize_extension(ext: &str) -> String {
    ext.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
