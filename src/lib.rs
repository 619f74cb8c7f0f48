//! # chanreg - Log-Channel Gating & Enablement Policy
//!
//! chanreg decides whether a log message tagged with a set of channel names
//! should be shown, and keeps the channel registry that answers the question
//! populated, configured and consistent:
//!
//! - **Channels** are named log categories with case-insensitive identity.
//!   Each carries a three-way override (`Default` / `ForceEnabled` /
//!   `ForceDisabled`) and a display color tag assigned round-robin from a
//!   palette.
//! - **Resolution** combines the per-channel override with the registry-wide
//!   defaults: a force state pins the channel, `Default` defers to the
//!   global default, and a message resolves shown if *any* of its tagged
//!   channels resolves enabled.
//! - **Snapshots** export the dynamic channel state as flat records for
//!   persistence across sessions and import them back, replacing the map.
//!
//! The registry is an ordinary value: construct one at startup and hand it to
//! the logging facade, settings loader and debug UI. There is no global
//! instance.
//!
//! ## Example
//!
//! ```rust
//! use chanreg::{ChannelRegistry, ProjectSettings};
//!
//! let mut registry = ChannelRegistry::new();
//!
//! // Seed from static project configuration
//! let settings = ProjectSettings::from_json(r##"{
//!     "unlisted_channels_enabled_by_default": true,
//!     "channels": [
//!         { "id": "net", "color": "#008080" },
//!         { "id": "audio", "enabled_by_default": false }
//!     ]
//! }"##).unwrap();
//! settings.apply(&mut registry);
//!
//! // The logging facade gates messages on their channel tags
//! assert!(registry.should_show_message_with_channels(&["net"]));
//! assert!(!registry.should_show_message_with_channels(&["audio"]));
//! assert!(registry.should_show_message_with_channels(&["audio", "net"]));
//!
//! // A debug UI toggles channels and renders colorized labels
//! registry.disable_channel("net");
//! assert!(!registry.should_show_message_with_channels(&["net"]));
//! assert_eq!(registry.rich_text_prefix("net"), "<color=#008080>[net]</color>");
//!
//! // Persist user overrides across sessions
//! let saved = registry.export_json().unwrap();
//! let mut restored = ChannelRegistry::new();
//! restored.import_json(&saved).unwrap();
//! assert!(!restored.should_show_message_with_channels(&["net"]));
//! ```

pub mod channel;
pub mod error;
pub mod registry;
pub mod settings;
pub mod snapshot;

// Re-export main types
pub use channel::{
    is_hex_color_tag, is_valid_color_tag, Channel, ChannelEnabled, ColorPalette, DEFAULT_PALETTE,
};
pub use error::{ChanRegError, ErrorCategory, Result};
pub use registry::{ChangeListener, ChannelRegistry};
pub use settings::{ChannelSetting, EnabledChannelsMode, ProjectSettings};
pub use snapshot::ChannelSnapshot;
