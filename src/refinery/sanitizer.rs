// * Text Sanitization
// * Strips embedded markup and the provider's relative-time lead-in from short descriptions.

use regex::Regex;
use std::sync::LazyLock;

static PATTERN_MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid markup tag regex"));

// * "há 3 horas ..." lead-ins, in priority order. Both the correct "há" and the
// * mis-decoded UTF-8-as-Latin-1 "hÃ¡" arrive from the feed.
static LEAD_IN_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)^(?:há|hÃ¡)\s+\d+\s+(?:horas?|dias?|semanas?|meses?)(?:\s*\.{3}|\s+\.\.\.|…)\s*")
            .expect("Invalid lead-in regex"),
        Regex::new(r"(?i)^h[aá]\s+\d+\s+(?:horas?|dias?|semanas?|meses?)(?:\s*\.{3}|\s+\.\.\.|…)\s*")
            .expect("Invalid fallback lead-in regex"),
    ]
});

/// Removes every `<...>` tag, keeping the text between them
pub fn strip_tags(text: &str) -> String {
    PATTERN_MARKUP_TAG.replace_all(text, "").into_owned()
}

/// Drops the first matching relative-time lead-in; other text passes through
pub fn clean_description(description: Option<&str>) -> String {
    let Some(description) = description else {
        return String::new();
    };

    for pattern in LEAD_IN_PATTERNS.iter() {
        if let Some(found) = pattern.find(description) {
            return description[found.end()..].to_string();
        }
    }

    description.to_string()
}
