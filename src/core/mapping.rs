/// The fixed set of template keys and the defaults behind them.
use rustc_hash::FxHashMap;

use crate::schema::record::{PoolKind, Record};

/// One template key: where its value comes from and what to use when the
/// record does not have it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefault {
    pub key: &'static str,
    pub source: PoolKind,
    pub field: &'static str,
    pub default: &'static str,
}

const fn entry(
    key: &'static str,
    source: PoolKind,
    field: &'static str,
    default: &'static str,
) -> FieldDefault {
    FieldDefault {
        key,
        source,
        field,
        default,
    }
}

/// Every key a template may reference.
pub static FIELD_DEFAULTS: [FieldDefault; 14] = [
    entry("character_name", PoolKind::Characters, "name", "A mysterious figure"),
    entry("character_type", PoolKind::Characters, "type", "of unknown origin"),
    entry("character_trait", PoolKind::Characters, "trait", "a peculiar disposition"),
    entry("character_goal", PoolKind::Characters, "goal", "an unknown objective"),
    entry("character_quote", PoolKind::Characters, "quote", "..."),
    entry("setting_name", PoolKind::Settings, "name", "A desolate place"),
    entry("setting_description", PoolKind::Settings, "description", "lost to time"),
    entry("setting_feature", PoolKind::Settings, "feature", "a strange landmark"),
    entry("setting_atmosphere", PoolKind::Settings, "atmosphere", "an unsettling silence"),
    entry("event_type", PoolKind::Events, "type", "A peculiar incident"),
    entry("event_action_present", PoolKind::Events, "action_present", "causes"),
    entry("event_action_past", PoolKind::Events, "action_past", "caused"),
    entry("event_object_catalyst", PoolKind::Events, "object_catalyst", "something strange"),
    entry("event_consequence", PoolKind::Events, "consequence", "unforeseen results"),
];

pub fn is_known_key(key: &str) -> bool {
    FIELD_DEFAULTS.iter().any(|d| d.key == key)
}

/// Documented fields for records of `kind`.
pub fn fields_of(kind: PoolKind) -> impl Iterator<Item = &'static str> {
    FIELD_DEFAULTS
        .iter()
        .filter(move |d| d.source == kind)
        .map(|d| d.field)
}

/// The merged key → value table used to fill one template.
///
/// Always holds all fourteen keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMapping<'a> {
    values: FxHashMap<&'static str, &'a str>,
}

impl<'a> SubstitutionMapping<'a> {
    pub fn build(character: &'a Record, setting: &'a Record, event: &'a Record) -> Self {
        let values = FIELD_DEFAULTS
            .iter()
            .map(|d| {
                let record = match d.source {
                    PoolKind::Characters => character,
                    PoolKind::Settings => setting,
                    // Templates never source a key.
                    PoolKind::Events | PoolKind::Templates => event,
                };
                (d.key, record.get_or(d.field, d.default))
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> FxHashMap<&str, &str> {
        self.values.iter().map(|(k, v)| (*k, *v)).collect()
    }
}
