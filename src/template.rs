//! `{{NAME}}` placeholder scanning and substitution.
//!
//! The build script includes this file with `#[path]`, so it must only use `core`.

use core::fmt::{self, Write};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A `{{NAME}}` token found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub name: &'a str,
    /// Byte offset of the opening braces
    pub start: usize,
    /// Byte offset just past the closing braces
    pub end: usize,
}

/// Iterator over the placeholders of a string, in order.
pub struct Placeholders<'a> {
    input: &'a str,
    pos: usize,
}

/// Counters returned by [`render`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rendered {
    pub substituted: usize,
    pub unresolved: usize,
}

pub fn placeholders(input: &str) -> Placeholders<'_> {
    Placeholders { input, pos: 0 }
}

/// Returns true when no placeholder is left in `input`.
pub fn is_resolved(input: &str) -> bool {
    placeholders(input).next().is_none()
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.input[self.pos..].find(OPEN) {
            let start = self.pos + offset;
            let name_start = start + OPEN.len();
            let rest = &self.input[name_start..];
            let name_len = rest.bytes().take_while(|b| is_name_byte(*b)).count();

            if name_len > 0 && rest[name_len..].starts_with(CLOSE) {
                let end = name_start + name_len + CLOSE.len();
                self.pos = end;
                return Some(Placeholder {
                    name: &rest[..name_len],
                    start,
                    end,
                });
            }

            // "{" is one byte, so this stays on a char boundary
            self.pos = start + 1;
        }

        self.pos = self.input.len();
        None
    }
}

/// Writes `template` into `out`, replacing each placeholder for which `lookup`
/// returns a value. Placeholders without a value are copied verbatim.
/// Substituted text is not scanned again.
pub fn render<W, F, V>(template: &str, mut lookup: F, out: &mut W) -> Result<Rendered, fmt::Error>
where
    W: Write,
    F: FnMut(&str) -> Option<V>,
    V: AsRef<str>,
{
    let mut rendered = Rendered::default();
    let mut copied = 0;

    for placeholder in placeholders(template) {
        out.write_str(&template[copied..placeholder.start])?;
        match lookup(placeholder.name) {
            Some(value) => {
                out.write_str(value.as_ref())?;
                rendered.substituted += 1;
            }
            None => {
                out.write_str(&template[placeholder.start..placeholder.end])?;
                rendered.unresolved += 1;
            }
        }
        copied = placeholder.end;
    }

    out.write_str(&template[copied..])?;
    Ok(rendered)
}
