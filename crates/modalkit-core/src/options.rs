#![forbid(unsafe_code)]

//! Per-modal dismissal options and store configuration.
//!
//! Both structs deserialize with `#[serde(default)]`, so a partial JSON
//! object only overrides the fields it names:
//!
//! ```
//! use modalkit_core::options::ModalOptions;
//!
//! let opts: ModalOptions = serde_json::from_str(r#"{"static_backdrop": true}"#).unwrap();
//! assert!(opts.static_backdrop);
//! assert!(opts.close_on_escape);
//! ```

use serde::{Deserialize, Serialize};

use crate::trigger::ResolveTrigger;

/// A built-in dismissal gesture reported by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Click on the backdrop.
    Backdrop,
    /// Escape key.
    Escape,
    /// Click outside the modal boundary.
    ClickOutside,
    /// The explicit close control.
    CloseButton,
}

impl Gesture {
    /// The trigger a modal dismissed by this gesture resolves with.
    #[must_use]
    pub const fn trigger(self) -> ResolveTrigger {
        match self {
            Self::Backdrop => ResolveTrigger::Backdrop,
            Self::Escape => ResolveTrigger::Escape,
            Self::ClickOutside => ResolveTrigger::ClickOutside,
            Self::CloseButton => ResolveTrigger::CloseButton,
        }
    }
}

/// Which gestures may dismiss a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalOptions {
    /// Backdrop clicks are ignored.
    pub static_backdrop: bool,
    pub close_on_escape: bool,
    pub close_on_click_outside: bool,
    /// Show (and honor) the explicit close control.
    pub close_button: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            static_backdrop: false,
            close_on_escape: true,
            close_on_click_outside: true,
            close_button: true,
        }
    }
}

impl ModalOptions {
    /// Default options: every gesture dismisses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options where no gesture dismisses; only the store API or the
    /// hosted component can resolve the modal.
    #[must_use]
    pub const fn locked() -> Self {
        Self {
            static_backdrop: true,
            close_on_escape: false,
            close_on_click_outside: false,
            close_button: false,
        }
    }

    /// Set whether backdrop clicks are ignored.
    #[must_use]
    pub fn static_backdrop(mut self, value: bool) -> Self {
        self.static_backdrop = value;
        self
    }

    /// Set whether Escape dismisses.
    #[must_use]
    pub fn close_on_escape(mut self, value: bool) -> Self {
        self.close_on_escape = value;
        self
    }

    /// Set whether clicks outside the modal dismiss.
    #[must_use]
    pub fn close_on_click_outside(mut self, value: bool) -> Self {
        self.close_on_click_outside = value;
        self
    }

    /// Set whether the close control is shown.
    #[must_use]
    pub fn close_button(mut self, value: bool) -> Self {
        self.close_button = value;
        self
    }

    /// Whether `gesture` may dismiss a modal with these options.
    #[must_use]
    pub const fn allows(&self, gesture: Gesture) -> bool {
        match gesture {
            Gesture::Backdrop => !self.static_backdrop,
            Gesture::Escape => self.close_on_escape,
            Gesture::ClickOutside => self.close_on_click_outside,
            Gesture::CloseButton => self.close_button,
        }
    }
}

/// Store-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Options applied to pushes that don't carry their own.
    pub default_options: ModalOptions,
}

impl StoreConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default per-modal options.
    #[must_use]
    pub fn default_options(mut self, options: ModalOptions) -> Self {
        self.default_options = options;
        self
    }
}
