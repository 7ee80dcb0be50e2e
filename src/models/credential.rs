use crate::constants;
use std::fmt;
use zeroize::Zeroizing;

/// API key sent to the node. Zeroed on drop, never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Wrap a raw value, trimming surrounding whitespace.
    /// Returns `None` when nothing is left.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(trimmed.to_string())))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked rendering: every character but the last four replaced by `*`.
    pub fn masked(&self) -> String {
        mask(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// `max(0, n-4)` asterisks followed by the last `min(4, n)` characters.
pub fn mask(value: &str) -> String {
    let total = value.chars().count();
    let hidden = total.saturating_sub(constants::MASK_VISIBLE_SUFFIX);
    let suffix: String = value.chars().skip(hidden).collect();
    format!("{}{}", "*".repeat(hidden), suffix)
}
