// SPDX-License-Identifier: MIT

//! Attachable tooltip behavior for arbitrary host elements.
//!
//! The directive takes a value — plain text or a partial configuration —
//! plus dotted [`Modifiers`] (`"click.fast"`), and manages one
//! [`TooltipController`] per attached element inside a shared
//! [`DirectiveRegistry`]. Attachment is in-place: the registry keeps a
//! reference to the host element as an external trigger and never
//! wraps, clones, or reparents it.
//!
//! Resolution order: modifier > explicit value > global config >
//! directive default.

#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Duration;

use ahash::AHashMap;
use bitflags::bitflags;

use hovertip_core::config::{ConfigResolver, ConfigStore, PartialConfig, TooltipConfig, Trigger};
use hovertip_core::placement::Position;
use hovertip_host::ElementHandle;
use hovertip_runtime::TooltipController;

use crate::{Error, Result};

/// Defaults the directive resolves against. Hover-only with lazier
/// timing than the component defaults, matching how attached tooltips
/// are typically used on dense UI.
pub fn directive_defaults() -> TooltipConfig {
    TooltipConfig {
        trigger: Trigger::Hover,
        show_delay: Duration::from_millis(300),
        hide_delay: Duration::from_millis(200),
        ..TooltipConfig::default()
    }
}

bitflags! {
    /// Dotted directive modifiers.
    ///
    /// Later flags in a group win when several are combined, mirroring
    /// how the flags are applied in declaration order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u16 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const AUTO = 1 << 4;
        const HOVER = 1 << 5;
        const FOCUS = 1 << 6;
        const BOTH = 1 << 7;
        const CLICK = 1 << 8;
        const FAST = 1 << 9;
        const SLOW = 1 << 10;
        const DISABLED = 1 << 11;
    }
}

impl Modifiers {
    /// Parse a dotted modifier list (`"click.fast"`, `"top"`, `""`).
    pub fn parse(list: &str) -> Result<Self> {
        let mut flags = Self::empty();
        for name in list.split('.').filter(|s| !s.is_empty()) {
            flags |= match name {
                "top" => Self::TOP,
                "bottom" => Self::BOTTOM,
                "left" => Self::LEFT,
                "right" => Self::RIGHT,
                "auto" => Self::AUTO,
                "hover" => Self::HOVER,
                "focus" => Self::FOCUS,
                "both" => Self::BOTH,
                "click" => Self::CLICK,
                "fast" => Self::FAST,
                "slow" => Self::SLOW,
                "disabled" => Self::DISABLED,
                other => return Err(Error::UnknownModifier(other.to_string())),
            };
        }
        Ok(flags)
    }

    /// Overlay these modifiers on a partial configuration.
    ///
    /// Within each group the last-declared flag wins: `auto` beats the
    /// cardinal positions, `click` beats the other triggers, `slow`
    /// beats `fast`.
    #[must_use]
    pub fn apply(self, mut config: PartialConfig) -> PartialConfig {
        if self.contains(Self::TOP) {
            config.position = Some(Position::Top);
        }
        if self.contains(Self::BOTTOM) {
            config.position = Some(Position::Bottom);
        }
        if self.contains(Self::LEFT) {
            config.position = Some(Position::Left);
        }
        if self.contains(Self::RIGHT) {
            config.position = Some(Position::Right);
        }
        if self.contains(Self::AUTO) {
            config.position = Some(Position::Auto);
        }

        if self.contains(Self::HOVER) {
            config.trigger = Some(Trigger::Hover);
        }
        if self.contains(Self::FOCUS) {
            config.trigger = Some(Trigger::Focus);
        }
        if self.contains(Self::BOTH) {
            config.trigger = Some(Trigger::Both);
        }
        if self.contains(Self::CLICK) {
            config.trigger = Some(Trigger::Click);
        }

        if self.contains(Self::FAST) {
            config.show_delay = Some(Duration::from_millis(10));
            config.hide_delay = Some(Duration::from_millis(50));
        }
        if self.contains(Self::SLOW) {
            config.show_delay = Some(Duration::from_millis(1000));
            config.hide_delay = Some(Duration::from_millis(500));
        }

        if self.contains(Self::DISABLED) {
            config.disabled = Some(true);
        }

        config
    }
}

/// The directive's bound value.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    /// Plain text content; all configuration comes from modifiers,
    /// global config, and defaults.
    Text(String),
    /// Explicit configuration; content is carried separately by the
    /// host when it needs rich content.
    Config(PartialConfig),
}

impl From<&str> for DirectiveValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DirectiveValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<PartialConfig> for DirectiveValue {
    fn from(config: PartialConfig) -> Self {
        Self::Config(config)
    }
}

impl DirectiveValue {
    fn into_parts(self) -> (PartialConfig, Option<String>) {
        match self {
            Self::Text(text) => (PartialConfig::new(), Some(text)),
            Self::Config(config) => (config, None),
        }
    }
}

/// Optional host teardown hook invoked when an instance is detached.
type TeardownHook<E> = Box<dyn Fn(&TooltipController<E>) -> Result<()>>;

/// Shared rendering host for all directive-attached tooltips.
///
/// One registry per host application; each attached element gets its
/// own [`TooltipController`] keyed by a host-chosen key. Detachment is
/// tolerant: a failing host teardown hook is logged as a warning and
/// never propagated, so cleanup cannot throw on an already-gone
/// instance.
pub struct DirectiveRegistry<K, E: ElementHandle> {
    store: Arc<ConfigStore>,
    entries: AHashMap<K, TooltipController<E>>,
    on_teardown: Option<TeardownHook<E>>,
}

impl<K, E> DirectiveRegistry<K, E>
where
    K: std::hash::Hash + Eq,
    E: ElementHandle,
{
    /// Create a registry resolving against the process-wide global
    /// configuration.
    pub fn new() -> Self {
        Self::with_store(crate::global_config())
    }

    /// Create a registry resolving against an injected store.
    pub fn with_store(store: Arc<ConfigStore>) -> Self {
        Self {
            store,
            entries: AHashMap::new(),
            on_teardown: None,
        }
    }

    /// Register a host teardown hook, called once per detached entry.
    #[must_use]
    pub fn on_teardown(mut self, hook: TeardownHook<E>) -> Self {
        self.on_teardown = Some(hook);
        self
    }

    /// Attach a tooltip to an element.
    ///
    /// Replaces any existing instance under the same key (tearing the
    /// old one down first).
    pub fn attach(&mut self, key: K, element: E, value: DirectiveValue, modifiers: Modifiers) {
        let (explicit, content) = value.into_parts();
        let explicit = modifiers.apply(explicit);
        let resolver = ConfigResolver::new(explicit, Arc::clone(&self.store))
            .with_defaults(directive_defaults());
        let mut controller = TooltipController::with_resolver(resolver);
        controller.set_content(content);
        controller.attach_trigger(element);

        if let Some(old) = self.entries.insert(key, controller) {
            self.teardown(old);
        }
    }

    /// Re-create the instance under `key` with a new value/modifiers,
    /// tearing the previous one down first.
    pub fn update(&mut self, key: K, element: E, value: DirectiveValue, modifiers: Modifiers) {
        self.detach(&key);
        self.attach(key, element, value, modifiers);
    }

    /// Detach and dispose the instance under `key`, if any.
    pub fn detach(&mut self, key: &K) {
        if let Some(controller) = self.entries.remove(key) {
            self.teardown(controller);
        }
    }

    /// Detach every instance.
    pub fn detach_all(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        for (_, controller) in entries {
            self.teardown(controller);
        }
    }

    /// The controller attached under `key`, if any.
    pub fn get(&self, key: &K) -> Option<&TooltipController<E>> {
        self.entries.get(key)
    }

    /// Mutable access to the controller attached under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut TooltipController<E>> {
        self.entries.get_mut(key)
    }

    /// Number of attached instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no instance is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn teardown(&self, mut controller: TooltipController<E>) {
        if let Some(hook) = &self.on_teardown {
            if let Err(err) = hook(&controller) {
                tracing::warn!(
                    tooltip_id = %controller.tooltip_id(),
                    error = %err,
                    "tooltip teardown hook failed; continuing cleanup"
                );
            }
        }
        controller.dispose();
    }
}

impl<K, E> Default for DirectiveRegistry<K, E>
where
    K: std::hash::Hash + Eq,
    E: ElementHandle,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E: ElementHandle> Drop for DirectiveRegistry<K, E> {
    fn drop(&mut self) {
        for (_, controller) in self.entries.iter_mut() {
            controller.dispose();
        }
    }
}
