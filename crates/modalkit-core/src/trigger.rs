#![forbid(unsafe_code)]

//! Resolution triggers and payloads.
//!
//! Every modal resolves with a [`ResolvedValue`]: a [`ResolveTrigger`] tag
//! saying *why* it closed, plus any extra fields the hosted component chose
//! to attach. On the wire (and in `serde_json`) the value is a flat object:
//!
//! ```text
//! { "trigger": "custom", "confirmed": true }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ModalError;

/// Why a modal resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveTrigger {
    /// The backdrop behind the modal was clicked.
    Backdrop,
    /// The explicit close control was used.
    #[serde(rename = "x")]
    CloseButton,
    /// Escape was pressed.
    Escape,
    /// A click landed outside the modal boundary.
    ClickOutside,
    /// The modal was popped programmatically.
    Pop,
    /// The hosted component resolved itself.
    Custom,
}

impl ResolveTrigger {
    /// All triggers, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Backdrop,
        Self::CloseButton,
        Self::Escape,
        Self::ClickOutside,
        Self::Pop,
        Self::Custom,
    ];

    /// The wire tag for this trigger.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backdrop => "backdrop",
            Self::CloseButton => "x",
            Self::Escape => "escape",
            Self::ClickOutside => "click-outside",
            Self::Pop => "pop",
            Self::Custom => "custom",
        }
    }

    /// Whether the trigger came from a built-in dismissal gesture.
    #[must_use]
    pub const fn is_dismissal(self) -> bool {
        matches!(
            self,
            Self::Backdrop | Self::CloseButton | Self::Escape | Self::ClickOutside
        )
    }
}

impl fmt::Display for ResolveTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolveTrigger {
    type Err = ModalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModalError::InvalidPayload(format!("unknown trigger '{s}'")))
    }
}

/// Key of the trigger tag in the flat encoding.
const TRIGGER_KEY: &str = "trigger";

/// The value a modal resolves with.
///
/// The extra fields hold everything other than `trigger`; the store passes
/// them through untouched. They never contain a `trigger` key, so the flat
/// encoding has exactly one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResolvedValue {
    pub trigger: ResolveTrigger,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ResolvedValue {
    /// A value carrying only a trigger.
    #[must_use]
    pub fn new(trigger: ResolveTrigger) -> Self {
        Self {
            trigger,
            extra: Map::new(),
        }
    }

    /// Shorthand for a `custom` resolution.
    #[must_use]
    pub fn custom() -> Self {
        Self::new(ResolveTrigger::Custom)
    }

    /// Attach an extra field.
    ///
    /// A `"trigger"` key is ignored; set [`trigger`](Self::trigger) instead.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != TRIGGER_KEY {
            self.extra.insert(key, value.into());
        }
        self
    }

    /// Every field other than `trigger`.
    #[inline]
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Look up an extra field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Decode a raw payload emitted by a hosted component.
    ///
    /// # Errors
    ///
    /// [`ModalError::InvalidPayload`] if the payload is not an object, has no
    /// `trigger`, or names an unknown trigger.
    pub fn from_json(value: Value) -> Result<Self, ModalError> {
        if !value.is_object() {
            return Err(ModalError::InvalidPayload(
                "payload must be a JSON object".to_owned(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Encode as a flat JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map: Map<String, Value> = self
            .fields()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        map.insert(
            TRIGGER_KEY.to_owned(),
            Value::String(self.trigger.as_str().to_owned()),
        );
        Value::Object(map)
    }

    /// Extra fields as encoded: anything keyed `trigger` is skipped.
    fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.extra.iter().filter(|(key, _)| key.as_str() != TRIGGER_KEY)
    }
}

impl Serialize for ResolvedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TRIGGER_KEY, &self.trigger)?;
        for (key, value) in self.fields() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl From<ResolveTrigger> for ResolvedValue {
    fn from(trigger: ResolveTrigger) -> Self {
        Self::new(trigger)
    }
}

impl TryFrom<Value> for ResolvedValue {
    type Error = ModalError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}
