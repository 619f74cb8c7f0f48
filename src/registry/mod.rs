//! Channel Registry
//!
//! The registry is an ordered-by-name mapping from channel name to channel
//! metadata, plus the registry-wide defaults that the resolution rule falls
//! back to. It is the single authority a logging facade consults before
//! emitting a message, the target a settings loader seeds at startup, and the
//! model a debug UI enumerates and toggles.
//!
//! Identity is the case-insensitive channel name; the first-seen casing is
//! kept as the canonical display form. Channels are registered lazily: the
//! first operation that references an unseen name creates it with the next
//! palette color and notifies change listeners. Resolution entry points
//! therefore take `&mut self`: the lazy registration is a real mutation and
//! the signature says so. Only [`ChannelRegistry::exists`] and the
//! enumeration APIs are guaranteed side-effect free.
//!
//! There is no internal locking: `&mut self` is the single-writer invariant.
//! Hosts that log from several threads wrap the registry in a `Mutex` or
//! `RwLock`.

use std::collections::BTreeMap;
use std::fmt;

use crate::channel::{debug_validate_name, name_key, Channel, ChannelEnabled, ColorPalette};
use crate::settings::ProjectSettings;

/// Change listener invoked whenever the effective enabled/disabled outcome of
/// any channel could have changed.
pub type ChangeListener = Box<dyn Fn(&ChannelRegistry) + Send + Sync>;

/// Registry of log channels and the enablement policy over them
pub struct ChannelRegistry {
    /// Channels keyed by lowercased name; iteration order is the key's
    /// natural sort order for deterministic enumeration.
    channels: BTreeMap<String, Channel>,

    /// Outcome for any channel whose own state is `Default`
    all_channels_enabled_by_default: bool,

    /// Outcome for a message tagged with zero channels
    messages_with_no_channels_enabled: bool,

    /// Advisory policy flag: callers may skip auto-registering channels
    /// discovered via message-prefix parsing when this is set. The registry
    /// exposes it but does not enforce it.
    ignore_unlisted_channels: bool,

    /// Rotation of color tags handed to newly discovered channels
    palette: ColorPalette,

    /// 1-based numeric id -> channel name table, seeded from settings
    channel_index: Vec<String>,

    /// Subscribers notified on enablement-relevant changes
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelRegistry")
            .field("channels", &self.channels)
            .field("all_channels_enabled_by_default", &self.all_channels_enabled_by_default)
            .field("messages_with_no_channels_enabled", &self.messages_with_no_channels_enabled)
            .field("ignore_unlisted_channels", &self.ignore_unlisted_channels)
            .field("palette", &self.palette)
            .field("channel_index", &self.channel_index)
            .field("listeners", &format_args!("<{} listener(s)>", self.listeners.len()))
            .finish()
    }
}

impl ChannelRegistry {
    /// Create a registry with the default nine-hue palette and all defaults
    /// enabled.
    pub fn new() -> Self {
        Self::with_palette(ColorPalette::new())
    }

    /// Create a registry with a custom color palette
    pub fn with_palette(palette: ColorPalette) -> Self {
        Self {
            channels: BTreeMap::new(),
            all_channels_enabled_by_default: true,
            messages_with_no_channels_enabled: true,
            ignore_unlisted_channels: true,
            palette,
            channel_index: Vec::new(),
            listeners: Vec::new(),
        }
    }

    // ── change notification ────────────────────────────────────────────────

    /// Subscribe to enablement-relevant changes.
    ///
    /// Fires at most once per logically-distinct change: flag setters compare
    /// against the current value first, enable/disable compare the resolved
    /// outcome before and after, and display-only mutations (color updates on
    /// existing channels, the ignore-unlisted flag, the index table) never
    /// fire.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: Fn(&ChannelRegistry) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub(crate) fn notify_changed(&self) {
        for listener in &self.listeners {
            listener(self);
        }
    }

    // ── registry-wide defaults ─────────────────────────────────────────────

    /// Default outcome for channels in `Default` state
    pub fn all_channels_enabled_by_default(&self) -> bool {
        self.all_channels_enabled_by_default
    }

    /// Set the default outcome. A flip changes the resolved state of every
    /// `Default`-state channel, so any real change notifies; setting the
    /// current value is a no-op.
    pub fn set_all_channels_enabled_by_default(&mut self, value: bool) {
        if self.all_channels_enabled_by_default == value {
            return;
        }
        self.all_channels_enabled_by_default = value;
        self.notify_changed();
    }

    /// Outcome for messages tagged with zero channels
    pub fn messages_with_no_channels_enabled(&self) -> bool {
        self.messages_with_no_channels_enabled
    }

    /// Set the zero-channel outcome; notifies only on a real change.
    pub fn set_messages_with_no_channels_enabled(&mut self, value: bool) {
        if self.messages_with_no_channels_enabled == value {
            return;
        }
        self.messages_with_no_channels_enabled = value;
        self.notify_changed();
    }

    /// Advisory flag: skip auto-registering channels found only via
    /// message-prefix parsing.
    pub fn ignore_unlisted_channels(&self) -> bool {
        self.ignore_unlisted_channels
    }

    /// Set the advisory flag. Display/policy hint only; never notifies.
    pub fn set_ignore_unlisted_channels(&mut self, value: bool) {
        self.ignore_unlisted_channels = value;
    }

    /// Replace the color rotation used for newly discovered channels
    pub fn set_palette(&mut self, options: Vec<String>) {
        self.palette.set_options(options);
    }

    /// Replace the 1-based numeric id -> channel name table
    pub fn set_channel_index(&mut self, names: Vec<String>) {
        self.channel_index = names;
    }

    // ── lookup and lazy registration ───────────────────────────────────────

    /// Check whether a channel with this (case-insensitive) name is
    /// registered. Never creates the channel.
    pub fn exists(&self, name: &str) -> bool {
        debug_validate_name(name);
        self.channels.contains_key(&name_key(name.trim()))
    }

    /// Non-creating inspection of a channel, for enumeration UIs
    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&name_key(name.trim()))
    }

    /// Ensure a channel with this name is registered, assigning the next
    /// palette color on first sight; used by logging facades when a channel
    /// prefix is first parsed out of a message.
    pub fn register_channel(&mut self, name: &str) {
        debug_validate_name(name);
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.ensure_channel(name);
    }

    /// Insert the channel if absent and return its map key. Creation assigns
    /// the next palette color and notifies listeners.
    fn ensure_channel(&mut self, name: &str) -> String {
        let key = name_key(name);
        if !self.channels.contains_key(&key) {
            let color_tag = self.palette.next_color();
            tracing::debug!(channel = name, color = %color_tag, "registered log channel");
            self.channels
                .insert(key.clone(), Channel::new(name, ChannelEnabled::Default, color_tag));
            self.notify_changed();
        }
        key
    }

    fn get_or_create(&mut self, name: &str) -> Option<&Channel> {
        debug_validate_name(name);
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let key = self.ensure_channel(name);
        self.channels.get(&key)
    }

    // ── display helpers ────────────────────────────────────────────────────

    /// Color tag of the channel, registering it on first sight
    pub fn channel_color(&mut self, name: &str) -> String {
        self.get_or_create(name)
            .map(|channel| channel.color_tag.clone())
            .unwrap_or_default()
    }

    /// Upsert of display color only.
    ///
    /// Mutating an existing channel's color never notifies (display-only).
    /// Creating a previously-unseen channel through this path does notify:
    /// bulk configuration load seeds many channels before any message is
    /// logged and downstream UIs must refresh their listings.
    pub fn set_channel_color(&mut self, name: &str, color_tag: &str) {
        debug_validate_name(name);
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let key = name_key(name);
        if let Some(channel) = self.channels.get_mut(&key) {
            channel.color_tag = color_tag.to_string();
            return;
        }
        self.channels
            .insert(key, Channel::new(name, ChannelEnabled::Default, color_tag));
        self.notify_changed();
    }

    /// Colorized channel label, e.g. `<color=#008080>[net]</color>`.
    /// Registers the channel on first sight. An empty name yields a bare
    /// `[]` with no color wrapper and no registration.
    pub fn rich_text_prefix(&mut self, name: &str) -> String {
        debug_validate_name(name);
        let name = name.trim();
        if name.is_empty() {
            return "[]".to_string();
        }
        let color = self.channel_color(name);
        format!("<color={color}>[{name}]</color>")
    }

    /// Colorized label for a numeric channel id (see [`Self::name_for_index`])
    pub fn rich_text_prefix_for_index(&mut self, channel: i32) -> String {
        let name = self.name_for_index(channel);
        if name.is_empty() {
            return "[]".to_string();
        }
        self.rich_text_prefix(&name)
    }

    /// Map a 1-based numeric channel id to a name via the index table.
    ///
    /// Id `<= 0` yields the empty name; an id past the end of the table
    /// yields the decimal id itself as a literal channel name. Defined
    /// fallbacks, not errors.
    pub fn name_for_index(&self, channel: i32) -> String {
        if channel <= 0 {
            return String::new();
        }
        match self.channel_index.get((channel - 1) as usize) {
            Some(name) => name.clone(),
            None => channel.to_string(),
        }
    }

    // ── enablement resolution ──────────────────────────────────────────────

    /// Resolve a channel's final enabled/disabled outcome.
    ///
    /// `ForceDisabled` -> `false`, `ForceEnabled` -> `true`, `Default` ->
    /// the registry-wide default. An unseen name is registered first and so
    /// resolves exactly like a `Default`-state channel.
    pub fn is_enabled(&mut self, name: &str) -> bool {
        debug_validate_name(name);
        let name = name.trim();
        if name.is_empty() {
            return self.all_channels_enabled_by_default;
        }
        let key = self.ensure_channel(name);
        let default = self.all_channels_enabled_by_default;
        self.channels
            .get(&key)
            .map(|channel| channel.is_enabled(default))
            .unwrap_or(default)
    }

    /// Resolve a numeric channel id; id `0` denotes "no channel" and resolves
    /// to the registry-wide default.
    pub fn is_enabled_by_index(&mut self, channel: i32) -> bool {
        if channel == 0 {
            return self.all_channels_enabled_by_default;
        }
        let name = self.name_for_index(channel);
        if name.is_empty() {
            return self.all_channels_enabled_by_default;
        }
        self.is_enabled(&name)
    }

    /// OR-combine two numeric channel ids, short-circuiting on the first
    /// channel that resolves enabled.
    pub fn is_either_enabled(&mut self, channel1: i32, channel2: i32) -> bool {
        if channel1 == 0 {
            return self.all_channels_enabled_by_default;
        }
        if self.is_enabled_by_index(channel1) {
            return true;
        }
        if channel2 == 0 {
            return false;
        }
        self.is_enabled_by_index(channel2)
    }

    /// The primary gate a logging facade calls before formatting a message:
    /// `true` if any tagged channel resolves enabled. A message with no
    /// channel tags resolves to the zero-channel default.
    pub fn should_show_message_with_channels<S: AsRef<str>>(&mut self, message_channels: &[S]) -> bool {
        if message_channels.is_empty() {
            return self.messages_with_no_channels_enabled;
        }
        for name in message_channels.iter().rev() {
            if self.is_enabled(name.as_ref()) {
                return true;
            }
        }
        false
    }

    /// Raw override state, for inspection and persistence. Registers the
    /// channel on first sight.
    pub fn force_enabled_state(&mut self, name: &str) -> ChannelEnabled {
        self.get_or_create(name)
            .map(|channel| channel.enabled)
            .unwrap_or_default()
    }

    // ── overrides ──────────────────────────────────────────────────────────

    /// Pin the channel enabled or disabled regardless of the registry-wide
    /// default.
    pub fn set_channel_enabled(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.enable_channel(name);
        } else {
            self.disable_channel(name);
        }
    }

    /// Force-enable the channel. Notifies only if the resolved outcome
    /// actually changed.
    pub fn enable_channel(&mut self, name: &str) {
        self.force_channel(name, ChannelEnabled::ForceEnabled);
    }

    /// Force-disable the channel. Notifies only if the resolved outcome
    /// actually changed.
    pub fn disable_channel(&mut self, name: &str) {
        self.force_channel(name, ChannelEnabled::ForceDisabled);
    }

    fn force_channel(&mut self, name: &str, state: ChannelEnabled) {
        debug_validate_name(name);
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let key = self.ensure_channel(name);
        let default = self.all_channels_enabled_by_default;
        let mut outcome_changed = false;
        if let Some(channel) = self.channels.get_mut(&key) {
            let was_enabled = channel.is_enabled(default);
            channel.enabled = state;
            outcome_changed = was_enabled != channel.is_enabled(default);
        }
        if outcome_changed {
            self.notify_changed();
        }
    }

    // ── lifecycle ──────────────────────────────────────────────────────────

    /// Empty the channel map and restore both boolean defaults to `true`.
    /// Always notifies, even if the map was already empty. The palette
    /// cursor is left where it was.
    pub fn clear(&mut self) {
        self.channels.clear();
        self.all_channels_enabled_by_default = true;
        self.messages_with_no_channels_enabled = true;
        tracing::debug!("channel registry cleared");
        self.notify_changed();
    }

    /// As [`Self::clear`], then reapply static project configuration so the
    /// registry returns to its configured startup state.
    pub fn reset_to_defaults(&mut self, settings: &ProjectSettings) {
        self.channels.clear();
        self.all_channels_enabled_by_default = true;
        self.messages_with_no_channels_enabled = true;
        settings.apply(self);
        self.notify_changed();
    }

    // ── enumeration ────────────────────────────────────────────────────────

    /// Channels in name sort order (deterministic listing for UIs; the order
    /// carries no semantic weight)
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Canonical channel names in sort order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.values().map(|channel| channel.name.as_str())
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if no channels are registered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub(crate) fn channels(&self) -> &BTreeMap<String, Channel> {
        &self.channels
    }

    pub(crate) fn replace_channels(&mut self, channels: BTreeMap<String, Channel>) {
        self.channels = channels;
        self.palette.set_cursor(self.channels.len());
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a ChannelRegistry {
    type Item = &'a Channel;
    type IntoIter = std::collections::btree_map::Values<'a, String, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.values()
    }
}
