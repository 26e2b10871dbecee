/// The snippet generator: pools → random picks → filled template.
///
/// Every call re-reads the pools from disk, so edits to the data files show
/// up on the next snippet without restarting anything.
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DataConfig;
use crate::core::loader::Pools;
use crate::core::mapping::SubstitutionMapping;
use crate::core::selector::{RandomSelector, Selector};
use crate::core::template::{Template, TemplateError};
use crate::schema::record::{PoolKind, Record};

/// Why a snippet could not be produced. The `Display` text is what the
/// reader sees in place of the story.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnippetError {
    #[error("Error: Missing essential data. Please check your JSON files.")]
    MissingData,
    #[error("Error: Failed to select one or more story components. Check data integrity.")]
    SelectionFailed,
    #[error(
        "Error: Template formatting error. Missing key: '{0}'. Check your template and JSON data fields."
    )]
    MissingKey(String),
    #[error("An unexpected error occurred during template formatting: {0}")]
    Formatting(String),
}

impl From<TemplateError> for SnippetError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::MissingKey(key) => SnippetError::MissingKey(key),
            other => SnippetError::Formatting(other.to_string()),
        }
    }
}

/// Produce one snippet from already-loaded pools.
pub fn compose<S: Selector>(pools: &Pools, selector: &mut S) -> Result<String, SnippetError> {
    if !pools.is_complete() {
        return Err(SnippetError::MissingData);
    }

    let (Some(character), Some(setting), Some(event), Some(template)) = (
        selector.pick(&pools.characters),
        selector.pick(&pools.settings),
        selector.pick(&pools.events),
        selector.pick(&pools.templates),
    ) else {
        return Err(SnippetError::SelectionFailed);
    };

    // An empty record or empty template is still a selection: the record
    // renders with every default, the template as an empty story.
    let character = record_entry(PoolKind::Characters, character)?;
    let setting = record_entry(PoolKind::Settings, setting)?;
    let event = record_entry(PoolKind::Events, event)?;
    let template = template.as_str().ok_or_else(|| {
        SnippetError::Formatting(format!("template entry is not a string: {}", template))
    })?;

    let mapping = SubstitutionMapping::build(&character, &setting, &event);
    let parsed = Template::parse(template)?;
    Ok(parsed.render(&mapping.as_map())?)
}

fn record_entry(kind: PoolKind, entry: &Value) -> Result<Record, SnippetError> {
    Record::from_value(entry).ok_or_else(|| {
        SnippetError::Formatting(format!(
            "{} entry is not a JSON object: {}",
            kind.name(),
            entry
        ))
    })
}

/// Generates snippets from the pools described by a `DataConfig`.
pub struct SnippetGenerator<S = RandomSelector> {
    config: DataConfig,
    selector: S,
}

impl SnippetGenerator<RandomSelector> {
    /// Generator with entropy-seeded random selection.
    pub fn new(config: DataConfig) -> Self {
        Self::with_selector(config, RandomSelector::from_entropy())
    }

    /// Generator whose picks are reproducible for a given seed.
    pub fn seeded(config: DataConfig, seed: u64) -> Self {
        Self::with_selector(config, RandomSelector::seeded(seed))
    }
}

impl<S: Selector> SnippetGenerator<S> {
    pub fn with_selector(config: DataConfig, selector: S) -> Self {
        Self { config, selector }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Load the pools and compose one snippet, keeping the error typed.
    pub fn try_generate(&mut self) -> Result<String, SnippetError> {
        let pools = Pools::load(&self.config);
        debug!(
            characters = pools.characters.len(),
            settings = pools.settings.len(),
            events = pools.events.len(),
            templates = pools.templates.len(),
            "pools loaded"
        );
        compose(&pools, &mut self.selector)
    }

    /// One snippet, or the text of whatever went wrong.
    pub fn generate(&mut self) -> String {
        self.try_generate().unwrap_or_else(|err| {
            warn!(error = ?err, "snippet generation failed");
            err.to_string()
        })
    }

    /// `count` snippets in order, each from a fresh read of the pools.
    pub fn generate_many(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.generate()).collect()
    }
}
