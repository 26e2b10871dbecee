/// Story templates — `{placeholder}` parsing and substitution.
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::format_spec::{convert, FormatSpec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("missing key '{0}'")]
    MissingKey(String),
    /// Bad conversion or format spec, found while rendering.
    #[error("{0}")]
    Format(String),
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Named value looked up in the substitution mapping:
    /// `{name}`, `{name!r}`, `{name:^12}`, `{name!s:>8}`.
    Placeholder {
        name: String,
        conversion: Option<char>,
        spec: Option<String>,
    },
}

/// A parsed template — a sequence of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{name}`, `{name!conv}`, `{name:spec}`, `{name!conv:spec}` → `Placeholder`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    ///
    /// Conversions and specs are only checked at render time, after the
    /// name has been looked up.
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            match chars[i] {
                '{' if i + 1 < len && chars[i + 1] == '{' => {
                    literal_buf.push('{');
                    i += 2;
                }
                '{' => {
                    if !literal_buf.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(
                            &mut literal_buf,
                        )));
                    }

                    let start = i + 1;
                    let mut end = start;
                    while end < len && chars[end] != '}' {
                        if chars[end] == '{' {
                            return Err(TemplateError::Parse(
                                "nested braces are not allowed".to_string(),
                            ));
                        }
                        end += 1;
                    }
                    if end == len {
                        return Err(TemplateError::Parse("unclosed brace".to_string()));
                    }

                    let content: String = chars[start..end].iter().collect();
                    segments.push(Self::parse_placeholder(&content)?);
                    i = end + 1;
                }
                '}' if i + 1 < len && chars[i + 1] == '}' => {
                    literal_buf.push('}');
                    i += 2;
                }
                '}' => {
                    return Err(TemplateError::Parse(
                        "unmatched closing brace".to_string(),
                    ));
                }
                c => {
                    literal_buf.push(c);
                    i += 1;
                }
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    fn parse_placeholder(content: &str) -> Result<TemplateSegment, TemplateError> {
        if content.is_empty() {
            return Err(TemplateError::Parse("empty braces".to_string()));
        }
        let (name, rest) = match content.find(&[':', '!'][..]) {
            Some(pos) => content.split_at(pos),
            None => (content, ""),
        };
        if name.is_empty() {
            return Err(TemplateError::Parse(format!(
                "placeholder '{{{}}}' has no name",
                content
            )));
        }

        let (conversion, spec) = if let Some(after) = rest.strip_prefix('!') {
            let mut chars = after.chars();
            let conversion = chars.next().ok_or_else(|| {
                TemplateError::Parse(
                    "end of string while looking for conversion specifier".to_string(),
                )
            })?;
            let tail = chars.as_str();
            let spec = if tail.is_empty() {
                None
            } else if let Some(spec) = tail.strip_prefix(':') {
                Some(spec.to_string())
            } else {
                return Err(TemplateError::Parse(
                    "expected ':' after conversion specifier".to_string(),
                ));
            };
            (Some(conversion), spec)
        } else {
            (None, rest.strip_prefix(':').map(str::to_string))
        };

        Ok(TemplateSegment::Placeholder {
            name: name.to_string(),
            conversion,
            spec,
        })
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|seg| match seg {
            TemplateSegment::Placeholder { name, .. } => Some(name.as_str()),
            TemplateSegment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder from `values`.
    ///
    /// Placeholders are handled left to right. For each one the name is
    /// looked up first (`TemplateError::MissingKey`), then the conversion and
    /// spec are applied (`TemplateError::Format`). The first failure aborts.
    pub fn render(&self, values: &FxHashMap<&str, &str>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Placeholder {
                    name,
                    conversion,
                    spec,
                } => {
                    let value = values
                        .get(name.as_str())
                        .ok_or_else(|| TemplateError::MissingKey(name.clone()))?;
                    let converted = match conversion {
                        Some(c) => convert(value, *c)?,
                        None => value.to_string(),
                    };
                    match spec {
                        Some(spec) => out.push_str(&FormatSpec::parse(spec)?.apply(&converted)),
                        None => out.push_str(&converted),
                    }
                }
            }
        }
        Ok(out)
    }
}
