/// Conversions and format specs applied to placeholder text.
///
/// Covers the string side of the `str.format` mini-language:
/// `!s` / `!r` / `!a` conversions and `[[fill]align][0][width][.precision][s]`.
/// Anything that only makes sense for numbers is an error.
use crate::core::template::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A parsed format spec for a text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Align,
    pub width: usize,
    pub precision: Option<usize>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: Align::Left,
            width: 0,
            precision: None,
        }
    }
}

fn format_error(msg: impl Into<String>) -> TemplateError {
    TemplateError::Format(msg.into())
}

fn is_align(c: char) -> bool {
    matches!(c, '<' | '>' | '^' | '=')
}

impl FormatSpec {
    /// Parse the text after the `:` of a placeholder.
    pub fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
        let chars: Vec<char> = spec.chars().collect();
        let len = chars.len();
        let mut out = FormatSpec::default();
        let mut i = 0;
        let mut align_char = None;
        let mut explicit_fill = false;

        if len >= 2 && is_align(chars[1]) {
            out.fill = chars[0];
            explicit_fill = true;
            align_char = Some(chars[1]);
            i = 2;
        } else if len >= 1 && is_align(chars[0]) {
            align_char = Some(chars[0]);
            i = 1;
        }

        out.align = match align_char {
            None | Some('<') => Align::Left,
            Some('>') => Align::Right,
            Some('^') => Align::Center,
            Some(_) => {
                return Err(format_error(
                    "'=' alignment not allowed in string format specifier",
                ))
            }
        };

        if i < len {
            match chars[i] {
                '+' | '-' | ' ' => {
                    return Err(format_error("Sign not allowed in string format specifier"))
                }
                'z' => {
                    return Err(format_error(
                        "Negative zero coercion (z) not allowed in format specifier",
                    ))
                }
                '#' => {
                    return Err(format_error(
                        "Alternate form (#) not allowed in string format specifier",
                    ))
                }
                _ => {}
            }
        }

        if i < len && chars[i] == '0' {
            if !explicit_fill {
                out.fill = '0';
            }
            i += 1;
        }

        let (width, next) = read_number(&chars, i)?;
        out.width = width.unwrap_or(0);
        i = next;

        if i < len && (chars[i] == ',' || chars[i] == '_') {
            return Err(format_error(format!("Cannot specify '{}' with 's'.", chars[i])));
        }

        if i < len && chars[i] == '.' {
            let (precision, next) = read_number(&chars, i + 1)?;
            if precision.is_none() {
                return Err(format_error("Format specifier missing precision"));
            }
            out.precision = precision;
            i = next;
        }

        if i < len {
            let code = chars[i];
            if code != 's' {
                return Err(format_error(format!(
                    "Unknown format code '{}' for object of type 'str'",
                    code
                )));
            }
            i += 1;
        }

        if i < len {
            return Err(format_error(format!(
                "Invalid format specifier '{}' for object of type 'str'",
                spec
            )));
        }

        Ok(out)
    }

    /// Truncate to the precision, then pad to the width.
    pub fn apply(&self, value: &str) -> String {
        let text: String = match self.precision {
            Some(p) => value.chars().take(p).collect(),
            None => value.to_string(),
        };
        let len = text.chars().count();
        if len >= self.width {
            return text;
        }
        let pad = self.width - len;
        let (left, right) = match self.align {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };
        let mut out = String::with_capacity(text.len() + pad * self.fill.len_utf8());
        out.extend(std::iter::repeat(self.fill).take(left));
        out.push_str(&text);
        out.extend(std::iter::repeat(self.fill).take(right));
        out
    }
}

fn read_number(chars: &[char], start: usize) -> Result<(Option<usize>, usize), TemplateError> {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return Ok((None, start));
    }
    let digits: String = chars[start..end].iter().collect();
    let n = digits
        .parse::<usize>()
        .map_err(|_| format_error("Too many decimal digits in format string"))?;
    Ok((Some(n), end))
}

/// Apply a `!` conversion to a value.
pub fn convert(value: &str, conversion: char) -> Result<String, TemplateError> {
    match conversion {
        's' => Ok(value.to_string()),
        'r' => Ok(repr(value, false)),
        'a' => Ok(repr(value, true)),
        other => Err(format_error(format!(
            "Unknown conversion specifier {}",
            other
        ))),
    }
}

/// Quoted, escaped rendering of a string, as `!r` shows it. With
/// `ascii_only`, every non-ASCII character is escaped too.
fn repr(value: &str, ascii_only: bool) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() || (ascii_only && !c.is_ascii()) => {
                out.push_str(&escape_code_point(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn escape_code_point(c: char) -> String {
    let n = c as u32;
    if n <= 0xff {
        format!("\\x{:02x}", n)
    } else if n <= 0xffff {
        format!("\\u{:04x}", n)
    } else {
        format!("\\U{:08x}", n)
    }
}
