use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

/// One entry from a character, setting, or event pool: a flat map of
/// field name to text.
///
/// Built from a JSON object. String values are kept verbatim, other
/// scalars keep their JSON spelling, and `null` is treated as if the field
/// were absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: FxHashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion, mostly for tests and fixtures.
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.fields.insert(field.to_string(), value.to_string());
        self
    }

    /// The record held by a pool entry, or `None` when the entry is not a
    /// JSON object.
    pub fn from_value(value: &Value) -> Option<Record> {
        match value {
            Value::Object(map) => Some(Record::from(map.clone())),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field value, or `default` when the record does not carry it.
    pub fn get_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.get(field).unwrap_or(default)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();
        Self { fields }
    }
}

/// The four kinds of data pool the press draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Characters,
    Settings,
    Events,
    Templates,
}

impl PoolKind {
    pub const ALL: [PoolKind; 4] = [
        PoolKind::Characters,
        PoolKind::Settings,
        PoolKind::Events,
        PoolKind::Templates,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Settings => "settings",
            Self::Events => "events",
            Self::Templates => "templates",
        }
    }

    /// Prefix used by this kind's keys in the substitution mapping.
    /// Templates contribute no keys.
    pub fn key_prefix(&self) -> Option<&'static str> {
        match self {
            Self::Characters => Some("character"),
            Self::Settings => Some("setting"),
            Self::Events => Some("event"),
            Self::Templates => None,
        }
    }
}
