// SPDX-License-Identifier: Apache-2.0

/// URL-safe identifier derived from a display name: Unicode-lowercased,
/// Turkish characters transliterated (ı→i ğ→g ü→u ş→s ö→o ç→c), each
/// whitespace run replaced by a single hyphen.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            pending_hyphen = true;
            continue;
        }
        if pending_hyphen {
            out.push('-');
            pending_hyphen = false;
        }
        out.push(match ch {
            'ı' => 'i',
            'ğ' => 'g',
            'ü' => 'u',
            'ş' => 's',
            'ö' => 'o',
            'ç' => 'c',
            other => other,
        });
    }
    if pending_hyphen {
        out.push('-');
    }
    out
}

/// Splits a comma-separated tag string: entries are trimmed, empties
/// dropped, order and duplicates preserved.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
