//! Unicode character names.
use std::fmt;

use crate::glyph::WidthClass;

/// Printed in place of a name the database does not know.
pub const NO_NAME: &str = "<no name>";

/// Lookup of a code point's Unicode name.
pub trait CharNames {
    fn name(&self, ch: char) -> Option<String>;

    fn name_or_marker(&self, ch: char) -> String {
        self.name(ch).unwrap_or_else(|| NO_NAME.to_string())
    }
}

/// Knows no names at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoNames;

impl CharNames for NoNames {
    fn name(&self, _ch: char) -> Option<String> {
        None
    }
}

/// Names from the Unicode character database.
#[cfg(feature = "names")]
#[derive(Copy, Clone, Debug, Default)]
pub struct UnicodeNames;

#[cfg(feature = "names")]
impl CharNames for UnicodeNames {
    fn name(&self, ch: char) -> Option<String> {
        unicode_names2::name(ch).map(|n| n.to_string())
    }
}

/// The richest name source compiled in.
pub fn default_names() -> Box<dyn CharNames> {
    #[cfg(feature = "names")]
    {
        Box::new(UnicodeNames)
    }
    #[cfg(not(feature = "names"))]
    {
        Box::new(NoNames)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodepointInfo {
    pub codepoint: u32,
    pub width: WidthClass,
    pub name: String,
}

impl fmt::Display for CodepointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = match char::from_u32(self.codepoint) {
            Some(ch) if self.width != WidthClass::Control => ch,
            _ => ' ',
        };
        write!(
            f,
            "U+{:04x} {:2} a {} b {}",
            self.codepoint,
            self.width.as_i8(),
            shown,
            self.name
        )
    }
}

/// Width and name of every code point in `start..end`.
pub fn describe_range(
    start: u32,
    end: u32,
    names: &dyn CharNames,
) -> impl Iterator<Item = CodepointInfo> + '_ {
    (start..end).map(move |codepoint| {
        let name = char::from_u32(codepoint)
            .and_then(|ch| names.name(ch))
            .unwrap_or_else(|| NO_NAME.to_string());
        CodepointInfo {
            codepoint,
            width: WidthClass::of_codepoint(codepoint),
            name,
        }
    })
}
