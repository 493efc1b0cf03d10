//! Placeholder scanning.
//!
//! A placeholder is the marker `?` followed by one kind letter:
//!
//! | Letter | Kind |
//! |---|---|
//! | `i` | integer |
//! | `d` | float |
//! | `s` | string |
//! | `S` | string escaped for `LIKE` |
//! | `n` | `NULL` |
//! | `f` | identifier |
//! | `a` | ordered array |
//! | `A` | associative array |
//!
//! A `?` at the very end of the template, or followed by any other character,
//! is ordinary text. Array kinds take a suffix: an element letter (`?ai`,
//! `?As`) or a bracket list of sub-templates (`?a[?i, "?s"]`).

use std::fmt;

/// The placeholder marker character.
pub const MARKER: char = '?';

/// Byte length of a marker plus its kind letter.
pub(crate) const MARKER_LEN: usize = 2;

/// Placeholder kind selected by the letter after the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    Int,
    Float,
    String,
    /// String with `%` and `_` escaped for the `LIKE` operator.
    StringLike,
    Null,
    Identifier,
    ArrayList,
    ArrayMap,
}

impl PlaceholderKind {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'i' => Some(Self::Int),
            'd' => Some(Self::Float),
            's' => Some(Self::String),
            'S' => Some(Self::StringLike),
            'n' => Some(Self::Null),
            'f' => Some(Self::Identifier),
            'a' => Some(Self::ArrayList),
            'A' => Some(Self::ArrayMap),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::Int => 'i',
            Self::Float => 'd',
            Self::String => 's',
            Self::StringLike => 'S',
            Self::Null => 'n',
            Self::Identifier => 'f',
            Self::ArrayList => 'a',
            Self::ArrayMap => 'A',
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, Self::ArrayList | Self::ArrayMap)
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::StringLike => "string (LIKE)",
            Self::Null => "NULL",
            Self::Identifier => "identifier",
            Self::ArrayList => "array",
            Self::ArrayMap => "associative array",
        };
        f.write_str(name)
    }
}

/// Element type of a uniform array placeholder (`?ai`, `?as`, `?ad`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int,
    String,
    Float,
}

impl ElementType {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'i' => Some(Self::Int),
            's' => Some(Self::String),
            'd' => Some(Self::Float),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::Int => 'i',
            Self::String => 's',
            Self::Float => 'd',
        }
    }

    /// The scalar placeholder kind each element is bound as.
    pub fn kind(self) -> PlaceholderKind {
        match self {
            Self::Int => PlaceholderKind::Int,
            Self::String => PlaceholderKind::String,
            Self::Float => PlaceholderKind::Float,
        }
    }
}

/// What follows an array placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArraySuffix {
    /// Every element bound with the same scalar kind.
    Uniform(ElementType),
    /// One trimmed sub-template per element, in order.
    Bracket(Vec<String>),
}

impl fmt::Display for ArraySuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(element) => write!(f, "{}", element.letter()),
            Self::Bracket(subs) => write!(f, "[{}]", subs.join(", ")),
        }
    }
}

/// A marker found by [`next_placeholder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Byte offset of the `?`.
    pub offset: usize,
    pub kind: PlaceholderKind,
}

/// Find the next placeholder at or after byte offset `from`.
pub fn next_placeholder(template: &str, from: usize) -> Option<Marker> {
    let mut offset = from;
    loop {
        let pos = offset + template.get(offset..)?.find(MARKER)?;
        let after = pos + MARKER.len_utf8();
        // A trailing marker has no kind letter.
        let letter = template[after..].chars().next()?;
        if let Some(kind) = PlaceholderKind::from_letter(letter) {
            return Some(Marker { offset: pos, kind });
        }
        offset = after;
    }
}

/// Parse the suffix of the array placeholder whose marker sits at `offset`.
///
/// Returns the suffix and the byte offset just past it. A bracket list ends at
/// the first `]`; its content is split on `,` with every piece trimmed.
/// `None` means there is no element letter and no terminated bracket list.
pub fn parse_array_suffix(template: &str, offset: usize) -> Option<(ArraySuffix, usize)> {
    let start = offset + MARKER_LEN;
    let rest = template.get(start..)?;
    match rest.chars().next()? {
        '[' => {
            let close = rest[1..].find(']')?;
            let subs = rest[1..1 + close]
                .trim()
                .split(',')
                .map(|sub| sub.trim().to_string())
                .collect();
            Some((ArraySuffix::Bracket(subs), start + close + 2))
        }
        letter => ElementType::from_letter(letter)
            .map(|element| (ArraySuffix::Uniform(element), start + letter.len_utf8())),
    }
}

/// Full description of a placeholder occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpec {
    pub kind: PlaceholderKind,
    /// Parsed array suffix; `None` for scalar kinds and for malformed arrays.
    pub suffix: Option<ArraySuffix>,
}

impl fmt::Display for PlaceholderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", MARKER, self.kind.letter())?;
        if let Some(suffix) = &self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

/// A placeholder located in a template, as listed by [`scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub offset: usize,
    /// Byte offset just past the placeholder and its suffix.
    pub end: usize,
    pub spec: PlaceholderSpec,
}

/// List every top-level placeholder without binding anything.
///
/// Bracket sub-templates belong to their array placeholder and are not listed
/// separately.
pub fn scan(template: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(marker) = next_placeholder(template, cursor) {
        let (suffix, end) = if marker.kind.is_array() {
            match parse_array_suffix(template, marker.offset) {
                Some((suffix, end)) => (Some(suffix), end),
                None => (None, marker.offset + MARKER_LEN),
            }
        } else {
            (None, marker.offset + MARKER_LEN)
        };
        found.push(Placeholder {
            offset: marker.offset,
            end,
            spec: PlaceholderSpec {
                kind: marker.kind,
                suffix,
            },
        });
        cursor = end;
    }
    found
}
