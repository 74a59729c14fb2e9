//! Device configuration record exchanged with the backend
//!
//! The backend owns the configuration; the client mirrors it only while the
//! operator is editing. The set of keys is fixed and described by
//! [`CONFIG_FIELDS`], which also drives the editor form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Value type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Text,
    Boolean,
}

/// Static description of one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, label, kind }
}

/// Every configuration key the client knows, in form order.
pub const CONFIG_FIELDS: &[FieldSpec] = &[
    field("frequency_hz", "Frequency (Hz)", FieldKind::Number),
    field("gain", "Gain", FieldKind::Number),
    field("if_gain", "IF Gain", FieldKind::Number),
    field("callsign_source", "Source Callsign", FieldKind::Text),
    field("callsign_dest", "Destination Callsign", FieldKind::Text),
    field("flags_before", "Flags Before", FieldKind::Number),
    field("flags_after", "Flags After", FieldKind::Number),
    field("send_ip", "Send IP", FieldKind::Text),
    field("send_port", "Send Port", FieldKind::Number),
    field("carrier_only", "Carrier Only", FieldKind::Boolean),
    field("device_index", "Device Index", FieldKind::Number),
];

/// Look up a field description by key.
pub fn field_spec(key: &str) -> Option<&'static FieldSpec> {
    CONFIG_FIELDS.iter().find(|f| f.key == key)
}

/// A typed configuration value.
///
/// The wire format is plain JSON numbers, strings, booleans and `null`.
/// Integral numbers are written without a fractional part, so ports and
/// device indices reach the backend as integers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl ConfigValue {
    /// Text shown in an editor input for this value.
    pub fn to_input_text(&self) -> String {
        match self {
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Number(n) => format_number(*n),
            ConfigValue::Text(s) => s.clone(),
            ConfigValue::Null => String::new(),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            ConfigValue::Bool(b) => *b,
            ConfigValue::Number(n) => *n != 0.0,
            ConfigValue::Text(s) => !s.is_empty(),
            ConfigValue::Null => false,
        }
    }

    /// Coerce a JSON value received from the backend into the declared kind.
    fn from_json(kind: FieldKind, value: &Value) -> Self {
        match (kind, value) {
            (_, Value::Null) => ConfigValue::Null,
            (FieldKind::Boolean, v) => ConfigValue::Bool(truthy(v)),
            (FieldKind::Number, Value::Number(n)) => {
                n.as_f64().map(ConfigValue::Number).unwrap_or(ConfigValue::Null)
            }
            (FieldKind::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(ConfigValue::Number)
                .unwrap_or(ConfigValue::Null),
            (FieldKind::Text, Value::String(s)) => ConfigValue::Text(s.clone()),
            (FieldKind::Text, other) => ConfigValue::Text(other.to_string()),
            (FieldKind::Number, _) => ConfigValue::Null,
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Number(n) => match as_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            ConfigValue::Text(s) => serializer.serialize_str(s),
            ConfigValue::Null => serializer.serialize_unit(),
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

/// Integral values small enough to survive an `i64` round trip.
fn as_integer(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15).then_some(n as i64)
}

/// Render a number without a trailing `.0` when it is integral.
pub fn format_number(n: f64) -> String {
    match as_integer(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}

/// Parse an editor input for a field of the given kind.
///
/// Empty number inputs become `null`; text is trimmed.
pub fn parse_input(spec: &FieldSpec, input: &str) -> Result<ConfigValue> {
    match spec.kind {
        FieldKind::Number => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(ConfigValue::Null);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(ConfigValue::Number)
                .ok_or_else(|| Error::invalid_field(spec.key, format!("'{}' is not a number", trimmed)))
        }
        FieldKind::Text => Ok(ConfigValue::Text(input.trim().to_string())),
        FieldKind::Boolean => match input.trim() {
            "true" | "1" | "yes" | "on" => Ok(ConfigValue::Bool(true)),
            "false" | "0" | "no" | "off" | "" => Ok(ConfigValue::Bool(false)),
            other => Err(Error::invalid_field(
                spec.key,
                format!("'{}' is not a boolean", other),
            )),
        },
    }
}

/// Mapping from known keys to typed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigRecord {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a backend JSON object.
    ///
    /// Known keys are coerced to their declared kind; missing keys are left
    /// absent and unknown keys are dropped with a debug log.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::config("configuration payload is not an object"))?;

        let mut record = Self::new();
        for (key, raw) in object {
            match field_spec(key) {
                Some(spec) => {
                    record
                        .values
                        .insert(key.clone(), ConfigValue::from_json(spec.kind, raw));
                }
                None => tracing::debug!("Dropping unknown configuration key '{}'", key),
            }
        }
        Ok(record)
    }

    /// Set a value for a known key.
    pub fn set(&mut self, key: &str, value: ConfigValue) -> Result<()> {
        if field_spec(key).is_none() {
            return Err(Error::invalid_field(key, "unknown configuration key"));
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// JSON body for `POST /api/config`.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
