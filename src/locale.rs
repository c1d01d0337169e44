//! Decimal separator lookup for the locale-decimal TK11 variant.

use log::{debug, warn};

pub const DEFAULT_FALLBACK_LOCALE: &str = "en_US.UTF-8";

/// Languages whose conventional decimal separator is a comma.
const COMMA_LANGUAGES: &[&str] = &[
    "af", "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fo",
    "fr", "gl", "hr", "hu", "hy", "id", "is", "it", "ka", "kk", "ky", "lt", "lv", "mk", "mn",
    "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk",
    "uz", "vi",
];

/// Languages whose conventional decimal separator is a dot.
const DOT_LANGUAGES: &[&str] = &[
    "ar", "bn", "cy", "en", "ga", "gu", "he", "hi", "ja", "kn", "ko", "ml", "mr", "ms", "mt",
    "ne", "pa", "si", "ta", "te", "th", "tl", "ur", "zh",
];

/// `(language, territory, separator)` overrides of the language default.
const TERRITORY_EXCEPTIONS: &[(&str, &str, char)] = &[
    ("de", "CH", '.'),
    ("de", "LI", '.'),
    ("it", "CH", '.'),
    ("es", "MX", '.'),
    ("es", "US", '.'),
    ("es", "PR", '.'),
    ("es", "GT", '.'),
    ("es", "DO", '.'),
    ("en", "ZA", ','),
    ("en", "DK", ','),
];

pub trait DecimalSeparator {
    fn decimal_separator(&self) -> char;
}

/// Always answers with the same separator.
#[derive(Clone, Copy, Debug)]
pub struct FixedSeparator(pub char);

impl DecimalSeparator for FixedSeparator {
    fn decimal_separator(&self) -> char {
        self.0
    }
}

/// Separator taken from the process locale (`LC_ALL`, `LC_NUMERIC`, `LANG`).
pub struct EnvLocale<F = fn(&str) -> Option<String>> {
    lookup: F,
    fallback: String,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl EnvLocale {
    pub fn new(fallback: &str) -> Self {
        EnvLocale { lookup: process_env, fallback: fallback.to_string() }
    }
}

impl<F> EnvLocale<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Use `lookup` instead of the process environment.
    pub fn with_lookup(lookup: F, fallback: &str) -> Self {
        EnvLocale { lookup, fallback: fallback.to_string() }
    }

    fn configured_locale(&self) -> Option<String> {
        ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|key| (self.lookup)(key))
            .find(|v| !v.trim().is_empty())
    }
}

impl<F> DecimalSeparator for EnvLocale<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn decimal_separator(&self) -> char {
        let configured = self.configured_locale();
        if let Some(sep) = configured.as_deref().and_then(separator_for) {
            debug!("locale {:?} -> decimal separator {:?}", configured, sep);
            return sep;
        }
        warn!(
            "could not resolve decimal separator for locale {:?}; trying fallback locale {}",
            configured.as_deref().unwrap_or("<unset>"),
            self.fallback
        );
        if let Some(sep) = separator_for(&self.fallback) {
            return sep;
        }
        warn!("fallback locale {} unknown; using '.'", self.fallback);
        '.'
    }
}

/// Decimal separator for a POSIX locale name such as `de_DE.UTF-8@euro`.
pub fn separator_for(locale: &str) -> Option<char> {
    let name = locale.trim();
    let name = name.split(['.', '@']).next().unwrap_or(name);
    if name == "C" || name == "POSIX" {
        return Some('.');
    }
    let (lang, territory) = match name.split_once(['_', '-']) {
        Some((l, t)) => (l, Some(t)),
        None => (name, None),
    };
    let lang = lang.to_ascii_lowercase();
    if let Some(t) = territory {
        let t = t.to_ascii_uppercase();
        if let Some((_, _, sep)) = TERRITORY_EXCEPTIONS
            .iter()
            .find(|(l, terr, _)| *l == lang && *terr == t)
        {
            return Some(*sep);
        }
    }
    if COMMA_LANGUAGES.contains(&lang.as_str()) {
        Some(',')
    } else if DOT_LANGUAGES.contains(&lang.as_str()) {
        Some('.')
    } else {
        None
    }
}
