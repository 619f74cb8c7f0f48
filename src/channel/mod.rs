//! Channel data types
//!
//! A channel is a named log category. Its identity is the case-insensitive
//! name; its state is a three-way enablement override resolved against the
//! registry-wide default by [`ChannelEnabled::resolve`], plus a display-only
//! color tag.

mod color;

pub use color::{is_hex_color_tag, is_valid_color_tag, ColorPalette, DEFAULT_PALETTE};

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Per-channel enablement override
///
/// `Default` defers to the registry-wide default; the two force states pin
/// the channel regardless of it. Precedence lives in one place:
/// [`ChannelEnabled::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ChannelEnabled {
    /// Defer to the registry-wide default
    #[default]
    Default,
    /// Channel is enabled regardless of the registry-wide default
    ForceEnabled,
    /// Channel is disabled regardless of the registry-wide default
    ForceDisabled,
}

impl ChannelEnabled {
    /// Resolve this override against the registry-wide default to the final
    /// enabled/disabled outcome.
    pub fn resolve(self, enabled_by_default: bool) -> bool {
        match self {
            ChannelEnabled::ForceDisabled => false,
            ChannelEnabled::ForceEnabled => true,
            ChannelEnabled::Default => enabled_by_default,
        }
    }
}

// Persisted snapshots survive hand edits and partial corruption: any value
// that doesn't name a known state deserializes as `Default` rather than
// failing the whole document.
impl<'de> Deserialize<'de> for ChannelEnabled {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EnabledVisitor;

        impl<'de> Visitor<'de> for EnabledVisitor {
            type Value = ChannelEnabled;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a channel enablement state")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
                if value.eq_ignore_ascii_case("ForceEnabled") {
                    Ok(ChannelEnabled::ForceEnabled)
                } else if value.eq_ignore_ascii_case("ForceDisabled") {
                    Ok(ChannelEnabled::ForceDisabled)
                } else {
                    Ok(ChannelEnabled::Default)
                }
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
                match value {
                    1 => Ok(ChannelEnabled::ForceEnabled),
                    2 => Ok(ChannelEnabled::ForceDisabled),
                    _ => Ok(ChannelEnabled::Default),
                }
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Self::Value, E> {
                if value < 0 {
                    Ok(ChannelEnabled::Default)
                } else {
                    self.visit_u64(value as u64)
                }
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(ChannelEnabled::Default)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(ChannelEnabled::Default)
            }
        }

        deserializer.deserialize_any(EnabledVisitor)
    }
}

/// A registered log channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Canonical display name (first-seen casing)
    pub name: String,

    /// Enablement override state
    pub enabled: ChannelEnabled,

    /// Display color: a named color or a `#RRGGBB` hex string. Has no effect
    /// on enablement.
    pub color_tag: String,
}

impl Channel {
    /// Create a new channel record
    pub fn new(name: impl Into<String>, enabled: ChannelEnabled, color_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled,
            color_tag: color_tag.into(),
        }
    }

    /// Resolve this channel's final enabled/disabled outcome against the
    /// registry-wide default.
    pub fn is_enabled(&self, enabled_by_default: bool) -> bool {
        self.enabled.resolve(enabled_by_default)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Map-key form of a channel name: case-insensitive identity.
pub(crate) fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Contract checks for channel names passed by callers.
///
/// Names must be non-empty, pre-trimmed and must not start with `[` (a
/// leading bracket means the caller handed us a raw message prefix instead of
/// a channel name). Violations are programmer errors: debug builds fail fast
/// here, release builds proceed permissively because logging infrastructure
/// must never take the host process down.
pub(crate) fn debug_validate_name(name: &str) {
    debug_assert!(!name.is_empty(), "channel name must not be empty");
    debug_assert!(
        !name.starts_with('['),
        "channel name must not start with '[': {name:?}"
    );
    debug_assert!(
        name == name.trim(),
        "channel name must be pre-trimmed: {name:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        assert!(ChannelEnabled::ForceEnabled.resolve(false));
        assert!(ChannelEnabled::ForceEnabled.resolve(true));
        assert!(!ChannelEnabled::ForceDisabled.resolve(true));
        assert!(!ChannelEnabled::ForceDisabled.resolve(false));
        assert!(ChannelEnabled::Default.resolve(true));
        assert!(!ChannelEnabled::Default.resolve(false));
    }

    #[test]
    fn test_channel_resolution_delegates() {
        let ch = Channel::new("net", ChannelEnabled::ForceDisabled, "#FF0000");
        assert!(!ch.is_enabled(true));

        let ch = Channel::new("net", ChannelEnabled::Default, "#FF0000");
        assert!(ch.is_enabled(true));
        assert!(!ch.is_enabled(false));
    }

    #[test]
    fn test_lenient_deserialize_known_strings() {
        let e: ChannelEnabled = serde_json::from_str("\"ForceEnabled\"").unwrap();
        assert_eq!(e, ChannelEnabled::ForceEnabled);
        let e: ChannelEnabled = serde_json::from_str("\"forcedisabled\"").unwrap();
        assert_eq!(e, ChannelEnabled::ForceDisabled);
        let e: ChannelEnabled = serde_json::from_str("\"Default\"").unwrap();
        assert_eq!(e, ChannelEnabled::Default);
    }

    #[test]
    fn test_lenient_deserialize_garbage_defaults() {
        let e: ChannelEnabled = serde_json::from_str("\"SomethingElse\"").unwrap();
        assert_eq!(e, ChannelEnabled::Default);
        let e: ChannelEnabled = serde_json::from_str("null").unwrap();
        assert_eq!(e, ChannelEnabled::Default);
        let e: ChannelEnabled = serde_json::from_str("2").unwrap();
        assert_eq!(e, ChannelEnabled::ForceDisabled);
        let e: ChannelEnabled = serde_json::from_str("-7").unwrap();
        assert_eq!(e, ChannelEnabled::Default);
        let e: ChannelEnabled = serde_json::from_str("99").unwrap();
        assert_eq!(e, ChannelEnabled::Default);
    }

    #[test]
    fn test_serialize_roundtrip_names() {
        let json = serde_json::to_string(&ChannelEnabled::ForceEnabled).unwrap();
        assert_eq!(json, "\"ForceEnabled\"");
        let back: ChannelEnabled = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChannelEnabled::ForceEnabled);
    }

    #[test]
    fn test_name_key_case_insensitive() {
        assert_eq!(name_key("UI"), name_key("ui"));
        assert_eq!(name_key("Net"), "net");
    }
}
