use std::sync::OnceLock;

use crate::models::Rating;

/// Label given to anything that cannot be mapped to a known license.
pub const UNKNOWN: &str = "Unknown";

const TRUSTED: &[&str] = &[
    "MIT",
    "MIT-0",
    "Apache-1.1",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-3-Clause-Clear",
    "BSD-4-Clause",
    "0BSD",
    "ISC",
    "PSF-2.0",
    "Python-2.0",
    "Zlib",
    "Unlicense",
    "CC0-1.0",
    "CC-BY-3.0",
    "CC-BY-4.0",
    "WTFPL",
    "BSL-1.0",
    "BlueOak-1.0.0",
    "Artistic-2.0",
    "UPL-1.0",
    "PostgreSQL",
    "HPND",
    "X11",
];

const CAUTION: &[&str] = &[
    "LGPL",
    "LGPL-2.0",
    "LGPL-2.0-only",
    "LGPL-2.0-or-later",
    "LGPL-2.1",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "MPL-1.1",
    "MPL-2.0",
    "MPL-2.0-no-copyleft-exception",
    "EPL-1.0",
    "EPL-2.0",
    "CDDL-1.0",
    "CDDL-1.1",
    "CPL-1.0",
    "EUPL-1.2",
    "APSL-2.0",
    "OSL-3.0",
    "MS-RL",
];

const RISKY: &[&str] = &[
    "GPL",
    "GPL-2.0",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "AGPL",
    "AGPL-3.0",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "SSPL-1.0",
    "EUPL-1.1",
    "CC-BY-NC-4.0",
    "Proprietary",
    "Other",
    UNKNOWN,
];

/// Common non-SPDX spellings (lowercase) mapped to their canonical identifier.
const ALIASES: &[(&str, &str)] = &[
    ("mit license", "MIT"),
    ("the mit license", "MIT"),
    ("the mit license (mit)", "MIT"),
    ("expat", "MIT"),
    ("apache", "Apache-2.0"),
    ("apache 2", "Apache-2.0"),
    ("apache 2.0", "Apache-2.0"),
    ("apache-2", "Apache-2.0"),
    ("apache2", "Apache-2.0"),
    ("apache license 2.0", "Apache-2.0"),
    ("apache license version 2.0", "Apache-2.0"),
    ("apache license, version 2.0", "Apache-2.0"),
    ("apache software license", "Apache-2.0"),
    ("the apache license, version 2.0", "Apache-2.0"),
    ("the apache software license, version 2.0", "Apache-2.0"),
    ("bsd", "BSD-3-Clause"),
    ("bsd license", "BSD-3-Clause"),
    ("bsd-3", "BSD-3-Clause"),
    ("bsd 3-clause", "BSD-3-Clause"),
    ("bsd 3-clause license", "BSD-3-Clause"),
    ("new bsd", "BSD-3-Clause"),
    ("new bsd license", "BSD-3-Clause"),
    ("modified bsd", "BSD-3-Clause"),
    ("revised bsd", "BSD-3-Clause"),
    ("bsd-2", "BSD-2-Clause"),
    ("bsd 2-clause", "BSD-2-Clause"),
    ("bsd 2-clause license", "BSD-2-Clause"),
    ("simplified bsd", "BSD-2-Clause"),
    ("freebsd", "BSD-2-Clause"),
    ("isc license", "ISC"),
    ("isc license (iscl)", "ISC"),
    ("psf", "PSF-2.0"),
    ("psf license", "PSF-2.0"),
    ("python software foundation license", "PSF-2.0"),
    ("cc0", "CC0-1.0"),
    ("cc0 1.0 universal", "CC0-1.0"),
    ("public domain", "CC0-1.0"),
    ("the unlicense", "Unlicense"),
    ("zlib license", "Zlib"),
    ("boost software license", "BSL-1.0"),
    ("boost software license 1.0", "BSL-1.0"),
    ("lgplv2.1", "LGPL-2.1"),
    ("lgpl v2.1", "LGPL-2.1"),
    ("gnu lgpl v2.1", "LGPL-2.1"),
    ("gnu lesser general public license v2.1", "LGPL-2.1"),
    ("lgplv3", "LGPL-3.0"),
    ("lgpl v3", "LGPL-3.0"),
    ("gnu lgpl v3", "LGPL-3.0"),
    ("gnu lesser general public license v3", "LGPL-3.0"),
    ("gnu lesser general public license", "LGPL"),
    ("gnu library or lesser general public license (lgpl)", "LGPL"),
    ("mpl", "MPL-2.0"),
    ("mpl 2.0", "MPL-2.0"),
    ("mplv2", "MPL-2.0"),
    ("mozilla public license 2.0", "MPL-2.0"),
    ("mozilla public license 2.0 (mpl 2.0)", "MPL-2.0"),
    ("epl", "EPL-2.0"),
    ("eclipse public license", "EPL-2.0"),
    ("eclipse public license 2.0", "EPL-2.0"),
    ("eclipse public license - v 2.0", "EPL-2.0"),
    ("eclipse public license 1.0", "EPL-1.0"),
    ("eclipse public license - v 1.0", "EPL-1.0"),
    ("cddl", "CDDL-1.0"),
    ("common development and distribution license", "CDDL-1.0"),
    ("gplv2", "GPL-2.0"),
    ("gpl v2", "GPL-2.0"),
    ("gnu gpl v2", "GPL-2.0"),
    ("gnu general public license v2", "GPL-2.0"),
    ("gnu general public license v2 (gplv2)", "GPL-2.0"),
    ("gplv3", "GPL-3.0"),
    ("gpl v3", "GPL-3.0"),
    ("gnu gpl v3", "GPL-3.0"),
    ("gnu general public license v3", "GPL-3.0"),
    ("gnu general public license v3 (gplv3)", "GPL-3.0"),
    ("gnu general public license", "GPL"),
    ("agplv3", "AGPL-3.0"),
    ("agpl v3", "AGPL-3.0"),
    ("gnu agpl v3", "AGPL-3.0"),
    ("gnu affero general public license v3", "AGPL-3.0"),
    ("server side public license", "SSPL-1.0"),
    ("commercial", "Proprietary"),
];

/// Aliases matched only as the whole string, never searched for inside text.
const EXACT_ONLY_ALIASES: &[&str] = &["commercial"];

/// Minimum normalized Levenshtein similarity for a fuzzy alias match.
const FUZZY_CUTOFF: f64 = 0.7;

/// Look up the tier of a canonical identifier.
pub fn tier_of(id: &str) -> Option<Rating> {
    if TRUSTED.contains(&id) {
        Some(Rating::Trusted)
    } else if CAUTION.contains(&id) {
        Some(Rating::Caution)
    } else if RISKY.contains(&id) {
        Some(Rating::Risky)
    } else {
        None
    }
}

/// Normalize a single license name (no expression operators) to a canonical identifier.
///
/// Tries, in order: a known identifier, a known alias, a known name appearing as
/// whole words inside longer text, and a fuzzy match against the alias keys.
pub fn normalize(raw: &str) -> Option<&'static str> {
    if let Some(id) = lookup(raw) {
        return Some(id);
    }
    let lower = raw.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some(id) = earliest_term(&lower) {
        return Some(id);
    }

    fuzzy_match(&lower)
}

/// Exact lookup: a known identifier (case-insensitive) or a known alias.
pub fn lookup(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(id) = identifiers().find(|id| id.eq_ignore_ascii_case(trimmed)) {
        return Some(id);
    }
    let lower = trimmed.to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, id)| *id)
}

/// The known name that appears first in `lower`; at equal positions the longest wins.
fn earliest_term(lower: &str) -> Option<&'static str> {
    let mut best: Option<(usize, &'static str)> = None;
    for (term, id) in search_terms() {
        if let Some(pos) = find_words(lower, term) {
            if best.map_or(true, |(p, _)| pos < p) {
                best = Some((pos, *id));
            }
        }
    }
    best.map(|(_, id)| id)
}

fn identifiers() -> impl Iterator<Item = &'static str> {
    TRUSTED
        .iter()
        .chain(CAUTION.iter())
        .chain(RISKY.iter())
        .copied()
}

/// Every identifier and alias as a lowercase search term, longest first.
fn search_terms() -> &'static [(String, &'static str)] {
    static TERMS: OnceLock<Vec<(String, &'static str)>> = OnceLock::new();
    TERMS.get_or_init(|| {
        let mut terms: Vec<(String, &'static str)> = identifiers()
            .filter(|id| *id != UNKNOWN && *id != "Other")
            .map(|id| (id.to_lowercase(), id))
            .chain(
                ALIASES
                    .iter()
                    .filter(|(alias, _)| !EXACT_ONLY_ALIASES.contains(alias))
                    .map(|(alias, id)| (alias.to_string(), *id)),
            )
            .collect();
        terms.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        terms
    })
}

/// Byte offset of the first occurrence of `needle` in `haystack` delimited by
/// non-alphanumeric characters.
fn find_words(haystack: &str, needle: &str) -> Option<usize> {
    haystack.match_indices(needle).map(|(start, _)| start).find(|&start| {
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

fn fuzzy_match(lower: &str) -> Option<&'static str> {
    // Very short strings match everything and nothing.
    if lower.chars().count() < 4 {
        return None;
    }

    let mut best: Option<(f64, &'static str)> = None;
    for (term, id) in search_terms() {
        let score = strsim::normalized_levenshtein(lower, term);
        if score >= FUZZY_CUTOFF && best.map_or(true, |(s, _)| score > s) {
            best = Some((score, *id));
        }
    }
    best.map(|(_, id)| id)
}
