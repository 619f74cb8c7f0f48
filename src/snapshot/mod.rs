//! Persistence snapshot
//!
//! The registry's dynamic channel state exports to an ordered sequence of
//! flat `{name, enabled, color_tag}` records and imports back from the same
//! shape, used to persist user overrides across sessions. The snapshot is the
//! single authoritative conversion invoked at persistence boundaries; there
//! is no continuously-maintained serialized mirror of the live map.
//!
//! Import is deliberately forgiving of hand edits and partial corruption:
//! unknown enablement values fall back to `Default`, a missing color tag
//! falls back to the empty string, and records without a usable name are
//! skipped. Only a document that is not a record list at all is reported as
//! an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::channel::{name_key, Channel, ChannelEnabled};
use crate::error::{ChanRegError, Result};
use crate::registry::ChannelRegistry;

/// One exported channel record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    /// Canonical channel name at export time
    #[serde(default)]
    pub name: String,

    /// Override state; anything unparseable imports as `Default`
    #[serde(default)]
    pub enabled: ChannelEnabled,

    /// Display color tag; missing imports as the empty string
    #[serde(default)]
    pub color_tag: String,
}

impl From<&Channel> for ChannelSnapshot {
    fn from(channel: &Channel) -> Self {
        Self {
            name: channel.name.clone(),
            enabled: channel.enabled,
            color_tag: channel.color_tag.clone(),
        }
    }
}

impl ChannelRegistry {
    /// Export the channel map as an ordered record list, one entry per known
    /// channel in name sort order. Registry-wide flags, the palette and its
    /// cursor are not part of the snapshot.
    pub fn export(&self) -> Vec<ChannelSnapshot> {
        self.channels().values().map(ChannelSnapshot::from).collect()
    }

    /// Import a record list, replacing the entire channel map (not a merge).
    ///
    /// Channels absent from the records are gone afterwards. The palette
    /// cursor is recomputed as `count % palette_len` so subsequently
    /// auto-created channels continue the rotation. Always notifies after the
    /// replacement, even if the new map is behaviorally identical.
    pub fn import(&mut self, records: Vec<ChannelSnapshot>) {
        let mut channels = BTreeMap::new();
        for record in records {
            let name = record.name.trim();
            if name.is_empty() || name.starts_with('[') {
                tracing::warn!(name = %record.name, "skipping snapshot record with unusable name");
                continue;
            }
            // duplicate names under case-insensitive identity: last record wins
            channels.insert(
                name_key(name),
                Channel::new(name, record.enabled, record.color_tag),
            );
        }
        tracing::debug!(channels = channels.len(), "imported channel snapshot");
        self.replace_channels(channels);
        self.notify_changed();
    }

    /// Export to a pretty-printed JSON document
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export()).map_err(|e| ChanRegError::InvalidSnapshot {
            reason: e.to_string(),
        })
    }

    /// Import from a JSON document; returns the number of channels imported.
    ///
    /// Field-level corruption degrades per the rules above. A document that
    /// does not parse as a record list is an error and leaves the registry
    /// untouched.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let records: Vec<ChannelSnapshot> =
            serde_json::from_str(json).map_err(|e| ChanRegError::InvalidSnapshot {
                reason: e.to_string(),
            })?;
        self.import(records);
        Ok(self.len())
    }
}
