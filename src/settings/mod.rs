//! Project settings
//!
//! Static configuration for the channel registry: the default enablement for
//! unlisted channels, the advisory ignore-unlisted flag and the list of
//! pre-declared channels with their colors and per-channel defaults. Loaded
//! once at startup from a JSON document and applied to a registry; also
//! re-applied by [`ChannelRegistry::reset_to_defaults`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::channel::is_valid_color_tag;
use crate::error::{ChanRegError, Result};
use crate::registry::ChannelRegistry;

fn default_true() -> bool {
    true
}

/// One pre-declared channel in project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSetting {
    /// Channel name. Whitespace-only entries are skipped on apply.
    pub id: String,

    /// Display color tag; empty means "assign from the palette"
    #[serde(default)]
    pub color: String,

    /// Seed the channel force-enabled (`true`) or force-disabled (`false`)
    #[serde(default = "default_true")]
    pub enabled_by_default: bool,
}

/// User-level override of how the registry-wide default is determined,
/// normally persisted as a host preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnabledChannelsMode {
    /// Take the default from [`ProjectSettings::unlisted_channels_enabled_by_default`]
    #[default]
    UseProjectSettings,
    /// All `Default`-state channels enabled, regardless of project settings
    AllEnabledByDefault,
    /// All `Default`-state channels disabled, regardless of project settings
    AllDisabledByDefault,
}

/// Static project configuration for the channel registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Default outcome for channels not pinned by a force override
    #[serde(default = "default_true")]
    pub unlisted_channels_enabled_by_default: bool,

    /// Advisory: skip auto-registering channels discovered only via
    /// message-prefix parsing
    #[serde(default)]
    pub ignore_unlisted_channel_prefixes: bool,

    /// Pre-declared channels, in numeric-id order (the first entry is
    /// channel id 1)
    #[serde(default)]
    pub channels: Vec<ChannelSetting>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            unlisted_channels_enabled_by_default: true,
            ignore_unlisted_channel_prefixes: false,
            channels: Vec::new(),
        }
    }
}

impl ProjectSettings {
    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ChanRegError::SettingsLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ChanRegError::InvalidSettings {
            reason: e.to_string(),
        })
    }

    /// Apply this configuration to a registry, taking the registry-wide
    /// default from the project settings.
    pub fn apply(&self, registry: &mut ChannelRegistry) {
        self.apply_with_mode(registry, EnabledChannelsMode::UseProjectSettings);
    }

    /// Apply this configuration with a user-level override of how the
    /// registry-wide default is determined.
    ///
    /// Seeds each configured channel's color and force state, the numeric
    /// channel-index table (configuration order, 1-based) and the advisory
    /// ignore-unlisted flag.
    pub fn apply_with_mode(&self, registry: &mut ChannelRegistry, mode: EnabledChannelsMode) {
        let default_enabled = match mode {
            EnabledChannelsMode::UseProjectSettings => self.unlisted_channels_enabled_by_default,
            EnabledChannelsMode::AllEnabledByDefault => true,
            EnabledChannelsMode::AllDisabledByDefault => false,
        };
        registry.set_all_channels_enabled_by_default(default_enabled);

        let mut index = Vec::new();
        for setting in &self.channels {
            let id = setting.id.trim();
            // blank entries keep their id slot so positional numeric ids stay
            // stable, but seed nothing
            index.push(id.to_string());
            if id.is_empty() {
                continue;
            }

            let color = setting.color.trim();
            if color.is_empty() {
                registry.register_channel(id);
            } else {
                if !is_valid_color_tag(color) {
                    tracing::warn!(channel = id, color, "configured color tag looks undisplayable");
                }
                registry.set_channel_color(id, color);
            }
            registry.set_channel_enabled(id, setting.enabled_by_default);
        }

        registry.set_channel_index(index);
        registry.set_ignore_unlisted_channels(self.ignore_unlisted_channel_prefixes);
        tracing::debug!(
            channels = self.channels.len(),
            default_enabled,
            "applied channel project settings"
        );
    }
}
