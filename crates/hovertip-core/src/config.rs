// SPDX-License-Identifier: MIT

//! Tooltip configuration: defaults, partial overrides, the shared
//! global store, and effective-value resolution.
//!
//! Resolution order for every field, independently:
//!
//! 1. the instance's explicit value, when one was supplied;
//! 2. the current global configuration snapshot;
//! 3. the built-in default.
//!
//! "Explicitly supplied" is modeled with `Option` on [`PartialConfig`]:
//! `Some(false)` and `Some(Duration::ZERO)` are explicit values and
//! never fall through to a global or default. Resolution happens on
//! every read, so a global-config write after mount is observed by the
//! next read — there is no snapshot-at-mount.

#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;

use crate::placement::Position;

/// How the tooltip is opened and closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Trigger {
    /// Show on pointer enter, hide on pointer leave.
    Hover,
    /// Show on focus-in, hide on focus-out (keyboard navigation).
    Focus,
    /// Hover and focus semantics simultaneously.
    #[default]
    Both,
    /// Toggle on click; outside clicks close.
    Click,
}

/// Dark-mode behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DarkMode {
    /// Follow the host's color-scheme detection.
    #[default]
    Auto,
    /// Force dark styling.
    Dark,
    /// Force light styling.
    Light,
}

/// A fully-resolved tooltip configuration.
///
/// Every field has a concrete value; produced by
/// [`ConfigResolver::resolve`] or used directly as a defaults table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipConfig {
    /// Desired position relative to the trigger.
    pub position: Position,
    /// Interaction that opens/closes the tooltip.
    pub trigger: Trigger,
    /// Delay before showing.
    pub show_delay: Duration,
    /// Delay before hiding.
    pub hide_delay: Duration,
    /// When set, show/hide/toggle requests have no effect.
    pub disabled: bool,
    /// Maximum width as a CSS length.
    pub max_width: String,
    /// Extra class applied to the tooltip surface.
    pub tooltip_class: String,
    /// Whether the arrow is rendered.
    pub show_arrow: bool,
    /// Gap between trigger and tooltip in pixels.
    pub offset: f64,
    /// Dark-mode behavior.
    pub dark: DarkMode,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            position: Position::Auto,
            trigger: Trigger::Both,
            show_delay: Duration::from_millis(100),
            hide_delay: Duration::from_millis(100),
            disabled: false,
            max_width: "250px".to_string(),
            tooltip_class: String::new(),
            show_arrow: true,
            offset: 8.0,
            dark: DarkMode::Auto,
        }
    }
}

/// A configuration where every field is optional.
///
/// Used for instance-level overrides, global configuration, and
/// directive values. `None` means "not supplied" — distinct from any
/// explicit value, including falsy ones like `Some(false)`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartialConfig {
    pub position: Option<Position>,
    pub trigger: Option<Trigger>,
    pub show_delay: Option<Duration>,
    pub hide_delay: Option<Duration>,
    pub disabled: Option<bool>,
    pub max_width: Option<String>,
    pub tooltip_class: Option<String>,
    pub show_arrow: Option<bool>,
    pub offset: Option<f64>,
    pub dark: Option<DarkMode>,
}

impl PartialConfig {
    /// An empty partial configuration (nothing supplied).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no field was supplied.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set the desired position.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the trigger behavior.
    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Set the show delay.
    #[must_use]
    pub fn show_delay(mut self, delay: Duration) -> Self {
        self.show_delay = Some(delay);
        self
    }

    /// Set the hide delay.
    #[must_use]
    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = Some(delay);
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Set the maximum width.
    #[must_use]
    pub fn max_width(mut self, max_width: impl Into<String>) -> Self {
        self.max_width = Some(max_width.into());
        self
    }

    /// Set the extra tooltip class.
    #[must_use]
    pub fn tooltip_class(mut self, class: impl Into<String>) -> Self {
        self.tooltip_class = Some(class.into());
        self
    }

    /// Set whether the arrow is rendered.
    #[must_use]
    pub fn show_arrow(mut self, show_arrow: bool) -> Self {
        self.show_arrow = Some(show_arrow);
        self
    }

    /// Set the trigger/tooltip gap.
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the dark-mode behavior.
    #[must_use]
    pub fn dark(mut self, dark: DarkMode) -> Self {
        self.dark = Some(dark);
        self
    }

    /// Overlay `self` on top of `base`: fields supplied here win,
    /// everything else falls through to `base`.
    #[must_use]
    pub fn merge_over(&self, base: &PartialConfig) -> PartialConfig {
        PartialConfig {
            position: self.position.or(base.position),
            trigger: self.trigger.or(base.trigger),
            show_delay: self.show_delay.or(base.show_delay),
            hide_delay: self.hide_delay.or(base.hide_delay),
            disabled: self.disabled.or(base.disabled),
            max_width: self.max_width.clone().or_else(|| base.max_width.clone()),
            tooltip_class: self
                .tooltip_class
                .clone()
                .or_else(|| base.tooltip_class.clone()),
            show_arrow: self.show_arrow.or(base.show_arrow),
            offset: self.offset.or(base.offset),
            dark: self.dark.or(base.dark),
        }
    }

    /// Resolve against a defaults table, field by field.
    #[must_use]
    pub fn resolve_with(&self, defaults: &TooltipConfig) -> TooltipConfig {
        TooltipConfig {
            position: self.position.unwrap_or(defaults.position),
            trigger: self.trigger.unwrap_or(defaults.trigger),
            show_delay: self.show_delay.unwrap_or(defaults.show_delay),
            hide_delay: self.hide_delay.unwrap_or(defaults.hide_delay),
            disabled: self.disabled.unwrap_or(defaults.disabled),
            max_width: self
                .max_width
                .clone()
                .unwrap_or_else(|| defaults.max_width.clone()),
            tooltip_class: self
                .tooltip_class
                .clone()
                .unwrap_or_else(|| defaults.tooltip_class.clone()),
            show_arrow: self.show_arrow.unwrap_or(defaults.show_arrow),
            offset: self.offset.unwrap_or(defaults.offset),
            dark: self.dark.unwrap_or(defaults.dark),
        }
    }
}

/// Shared, mutable configuration store.
///
/// Writers replace the whole snapshot atomically; readers always see a
/// complete snapshot, never a torn mix of two writes. Intended to be
/// injected (one per process in production, one per test case in
/// tests) rather than reached for ambiently.
#[derive(Debug, Default)]
pub struct ConfigStore {
    inner: ArcSwap<PartialConfig>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration wholesale.
    ///
    /// Keys omitted from `config` revert to unset — this never merges
    /// with the previous snapshot.
    pub fn set(&self, config: PartialConfig) {
        self.inner.store(Arc::new(config));
    }

    /// A copy of the current snapshot.
    pub fn get(&self) -> PartialConfig {
        PartialConfig::clone(&self.inner.load())
    }

    /// Clear the store back to empty.
    pub fn reset(&self) {
        self.inner.store(Arc::new(PartialConfig::default()));
    }

    /// Cheap read access to the current snapshot.
    pub fn load(&self) -> Arc<PartialConfig> {
        self.inner.load_full()
    }
}

/// Resolves effective values for one tooltip instance.
///
/// Holds the instance's explicit overrides plus a handle to the shared
/// store; every read consults the store, so global changes after mount
/// are reflected immediately.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    explicit: PartialConfig,
    store: Arc<ConfigStore>,
    defaults: TooltipConfig,
}

impl ConfigResolver {
    /// Create a resolver with the built-in defaults table.
    pub fn new(explicit: PartialConfig, store: Arc<ConfigStore>) -> Self {
        Self {
            explicit,
            store,
            defaults: TooltipConfig::default(),
        }
    }

    /// Swap in a different defaults table (the directive uses its own).
    #[must_use]
    pub fn with_defaults(mut self, defaults: TooltipConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the instance's explicit overrides.
    pub fn set_explicit(&mut self, explicit: PartialConfig) {
        self.explicit = explicit;
    }

    /// The instance's explicit overrides.
    pub fn explicit(&self) -> &PartialConfig {
        &self.explicit
    }

    /// Resolve the full effective configuration.
    pub fn resolve(&self) -> TooltipConfig {
        let global = self.store.load();
        self.explicit
            .merge_over(&global)
            .resolve_with(&self.defaults)
    }

    /// Effective desired position.
    pub fn position(&self) -> Position {
        self.explicit
            .position
            .or(self.store.load().position)
            .unwrap_or(self.defaults.position)
    }

    /// Effective trigger behavior.
    pub fn trigger(&self) -> Trigger {
        self.explicit
            .trigger
            .or(self.store.load().trigger)
            .unwrap_or(self.defaults.trigger)
    }

    /// Effective show delay.
    pub fn show_delay(&self) -> Duration {
        self.explicit
            .show_delay
            .or(self.store.load().show_delay)
            .unwrap_or(self.defaults.show_delay)
    }

    /// Effective hide delay.
    pub fn hide_delay(&self) -> Duration {
        self.explicit
            .hide_delay
            .or(self.store.load().hide_delay)
            .unwrap_or(self.defaults.hide_delay)
    }

    /// Effective disabled flag.
    pub fn disabled(&self) -> bool {
        self.explicit
            .disabled
            .or(self.store.load().disabled)
            .unwrap_or(self.defaults.disabled)
    }

    /// Effective trigger/tooltip gap.
    pub fn offset(&self) -> f64 {
        self.explicit
            .offset
            .or(self.store.load().offset)
            .unwrap_or(self.defaults.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_table() {
        let d = TooltipConfig::default();
        assert_eq!(d.position, Position::Auto);
        assert_eq!(d.trigger, Trigger::Both);
        assert_eq!(d.show_delay, Duration::from_millis(100));
        assert_eq!(d.hide_delay, Duration::from_millis(100));
        assert!(!d.disabled);
        assert_eq!(d.max_width, "250px");
        assert_eq!(d.tooltip_class, "");
        assert!(d.show_arrow);
        assert_eq!(d.offset, 8.0);
        assert_eq!(d.dark, DarkMode::Auto);
    }

    #[test]
    fn explicit_false_is_not_absent() {
        let store = Arc::new(ConfigStore::new());
        store.set(PartialConfig::new().show_arrow(true));
        let resolver =
            ConfigResolver::new(PartialConfig::new().show_arrow(false), Arc::clone(&store));
        // Explicit false wins over both the global true and the default true.
        assert!(!resolver.resolve().show_arrow);
    }

    #[test]
    fn explicit_zero_delay_is_not_absent() {
        let store = Arc::new(ConfigStore::new());
        store.set(PartialConfig::new().show_delay(Duration::from_millis(500)));
        let resolver = ConfigResolver::new(
            PartialConfig::new().show_delay(Duration::ZERO),
            Arc::clone(&store),
        );
        assert_eq!(resolver.show_delay(), Duration::ZERO);
    }

    #[test]
    fn global_fills_unsupplied_fields() {
        let store = Arc::new(ConfigStore::new());
        store.set(
            PartialConfig::new()
                .trigger(Trigger::Click)
                .max_width("400px"),
        );
        let resolver = ConfigResolver::new(PartialConfig::new(), Arc::clone(&store));
        let effective = resolver.resolve();
        assert_eq!(effective.trigger, Trigger::Click);
        assert_eq!(effective.max_width, "400px");
        // Untouched fields fall through to the defaults.
        assert_eq!(effective.show_delay, Duration::from_millis(100));
    }

    #[test]
    fn instance_beats_global_beats_default() {
        let store = Arc::new(ConfigStore::new());
        store.set(
            PartialConfig::new()
                .position(Position::Top)
                .offset(20.0),
        );
        let resolver =
            ConfigResolver::new(PartialConfig::new().position(Position::Left), Arc::clone(&store));
        assert_eq!(resolver.position(), Position::Left);
        assert_eq!(resolver.offset(), 20.0);
        assert_eq!(resolver.trigger(), Trigger::Both);
    }

    #[test]
    fn set_replaces_never_merges() {
        let store = ConfigStore::new();
        store.set(
            PartialConfig::new()
                .position(Position::Top)
                .show_delay(Duration::from_millis(50)),
        );
        store.set(PartialConfig::new().trigger(Trigger::Click));
        let snapshot = store.get();
        assert_eq!(snapshot.trigger, Some(Trigger::Click));
        // The first write's keys reverted to unset.
        assert_eq!(snapshot.position, None);
        assert_eq!(snapshot.show_delay, None);
    }

    #[test]
    fn reset_clears_to_empty() {
        let store = ConfigStore::new();
        store.set(PartialConfig::new().disabled(true));
        store.reset();
        assert!(store.get().is_empty());
    }

    #[test]
    fn get_returns_a_copy() {
        let store = ConfigStore::new();
        store.set(PartialConfig::new().offset(4.0));
        let mut copy = store.get();
        copy.offset = Some(99.0);
        assert_eq!(store.get().offset, Some(4.0));
    }

    #[test]
    fn resolution_reflects_later_global_writes() {
        let store = Arc::new(ConfigStore::new());
        let resolver = ConfigResolver::new(PartialConfig::new(), Arc::clone(&store));
        assert_eq!(resolver.show_delay(), Duration::from_millis(100));

        // A write after the resolver exists is observed on the next read.
        store.set(PartialConfig::new().show_delay(Duration::from_millis(700)));
        assert_eq!(resolver.show_delay(), Duration::from_millis(700));

        store.reset();
        assert_eq!(resolver.show_delay(), Duration::from_millis(100));
    }

    #[test]
    fn merge_over_prefers_self() {
        let top = PartialConfig::new().position(Position::Top).disabled(false);
        let base = PartialConfig::new()
            .position(Position::Bottom)
            .trigger(Trigger::Hover)
            .disabled(true);
        let merged = top.merge_over(&base);
        assert_eq!(merged.position, Some(Position::Top));
        assert_eq!(merged.trigger, Some(Trigger::Hover));
        // Explicit false survives the merge.
        assert_eq!(merged.disabled, Some(false));
    }

    #[test]
    fn custom_defaults_table() {
        let store = Arc::new(ConfigStore::new());
        let directive_defaults = TooltipConfig {
            trigger: Trigger::Hover,
            show_delay: Duration::from_millis(300),
            hide_delay: Duration::from_millis(200),
            ..TooltipConfig::default()
        };
        let resolver = ConfigResolver::new(PartialConfig::new(), Arc::clone(&store))
            .with_defaults(directive_defaults);
        assert_eq!(resolver.trigger(), Trigger::Hover);
        assert_eq!(resolver.show_delay(), Duration::from_millis(300));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_deserializes_sparse_json() {
        let parsed: PartialConfig =
            serde_json::from_str(r#"{"position":"top","show_arrow":false}"#).unwrap();
        assert_eq!(parsed.position, Some(Position::Top));
        assert_eq!(parsed.show_arrow, Some(false));
        assert_eq!(parsed.trigger, None);
    }
}
