//! Key-case conversion between `snake_case` and `camelCase`
//!
//! The two conversions are deliberately not inverses of each other for every
//! input: [`str_to_camel_case`] lower-cases the whole text first, and
//! [`str_to_snake_case`] only splits before ASCII upper-case letters.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Naming convention applied to mapping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCase {
    /// `camelCase` keys
    #[default]
    Camel,
    /// `snake_case` keys
    Snake,
}

impl KeyCase {
    /// Name used in configuration (`"camel"` / `"snake"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Camel => "camel",
            Self::Snake => "snake",
        }
    }

    /// Convert a single key to this case.
    pub fn apply(&self, key: &str) -> String {
        match self {
            Self::Camel => str_to_camel_case(key),
            Self::Snake => str_to_snake_case(key),
        }
    }
}

impl fmt::Display for KeyCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyCase {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camel" => Ok(Self::Camel),
            "snake" => Ok(Self::Snake),
            _ => Err(CoreError::UnknownKeyCase(s.to_string())),
        }
    }
}

/// Convert `snake_case` text to `camelCase`.
///
/// The text is lower-cased first, then every `_` followed by a character is
/// replaced by that character in upper case. A trailing `_` is kept.
///
/// ```rust
/// use sakusou_core::str_to_camel_case;
///
/// assert_eq!(str_to_camel_case("user_id"), "userId");
/// assert_eq!(str_to_camel_case("USER_NAME"), "userName");
/// ```
pub fn str_to_camel_case(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut chars = lowered.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_'
            && let Some(&next) = chars.peek()
            && next != '\n'
        {
            chars.next();
            out.extend(next.to_uppercase());
            continue;
        }
        out.push(c);
    }

    out
}

/// Convert `camelCase` text to `snake_case`.
///
/// Scanning left to right without overlap, each character followed by an
/// ASCII upper-case letter gets a `_` inserted between the two; the result is
/// lower-cased.
///
/// ```rust
/// use sakusou_core::str_to_snake_case;
///
/// assert_eq!(str_to_snake_case("userId"), "user_id");
/// assert_eq!(str_to_snake_case("createdAtUtc"), "created_at_utc");
/// ```
pub fn str_to_snake_case(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match chars.get(i + 1) {
            Some(&next) if c != '\n' && next.is_ascii_uppercase() => {
                out.push(c);
                out.push('_');
                out.push(next);
                i += 2;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out.to_lowercase()
}
