//! Engine configuration.

use std::env;

/// Configuration for the feed engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether a successful reaction immediately surfaces the next unseen
    /// item. When false the viewer stays on the confirmation and browses
    /// on via the menu.
    pub auto_advance: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { auto_advance: true }
    }
}

impl EngineConfig {
    /// Create a config from environment variables.
    ///
    /// `PALETTE_AUTO_ADVANCE` - set to `0` or `false` to disable
    /// auto-advance after a reaction (default: enabled).
    pub fn from_env() -> Self {
        let auto_advance = match env::var("PALETTE_AUTO_ADVANCE") {
            Ok(value) => !matches!(value.trim(), "0" | "false" | "no"),
            Err(_) => true,
        };

        Self { auto_advance }
    }
}
