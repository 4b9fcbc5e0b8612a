use url::Url;

use crate::config::FeedConfig;

// * Repairs the provider's malformed article links into one absolute URL.
// *
// * Logic:
// * 1. Prefer `fullUrl` when present.
// * 2. Apply the repair table, in order, to `url`.
// * 3. Prefix the homepage when the result is neither provider-qualified nor absolute.
// * 4. Fall back to the homepage when nothing usable remains.

/// One string-substitution repair, applied to every occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlRepairRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

impl UrlRepairRule {
    pub fn apply(&self, url: &str) -> String {
        url.replace(self.pattern, self.replacement)
    }
}

// * Observed upstream defects. Order matters: the double-slash variant must run first.
// ! Add new defects here, not as branches in `canonicalize`.
pub const URL_REPAIR_RULES: &[UrlRepairRule] = &[
    UrlRepairRule {
        name: "domain_glued_to_protocol_double_slash",
        pattern: "https://www.publico.pthttps//",
        replacement: "https://",
    },
    UrlRepairRule {
        name: "domain_glued_to_protocol_single_slash",
        pattern: "https://www.publico.pthttps/",
        replacement: "https://",
    },
    UrlRepairRule {
        name: "scheme_missing_colon",
        pattern: "https//",
        replacement: "https://",
    },
];

/// Picks and repairs the browsable URL of an article
#[derive(Debug, Clone)]
pub struct UrlCanonicalizer {
    homepage: String,
    domain: String,
    rules: &'static [UrlRepairRule],
}

impl UrlCanonicalizer {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            homepage: config.homepage_url.trim_end_matches('/').to_string(),
            domain: config.provider_domain.clone(),
            rules: URL_REPAIR_RULES,
        }
    }

    /// Returns an absolute URL; never fails, degrades to the homepage
    pub fn canonicalize(&self, full_url: Option<&str>, url: Option<&str>) -> String {
        let candidate = match (non_blank(full_url), non_blank(url)) {
            (Some(full), _) => full.to_string(),
            (None, Some(url)) => self.repair(url),
            (None, None) => return self.homepage.clone(),
        };

        if Url::parse(&candidate).is_err() {
            tracing::debug!(url = %candidate, "Unusable article URL, using homepage");
            return self.homepage.clone();
        }

        candidate
    }

    /// Applies the repair table and domain qualification to a raw `url` field
    pub fn repair(&self, url: &str) -> String {
        let mut fixed = self
            .rules
            .iter()
            .fold(url.trim().to_string(), |acc, rule| rule.apply(&acc));

        if !fixed.contains(self.domain.as_str()) && !fixed.starts_with("http") {
            let separator = if fixed.starts_with('/') { "" } else { "/" };
            fixed = format!("{}{}{}", self.homepage, separator, fixed);
        }

        fixed
    }

    pub fn homepage(&self) -> &str {
        &self.homepage
    }
}

impl Default for UrlCanonicalizer {
    fn default() -> Self {
        Self::new(&FeedConfig::default())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
