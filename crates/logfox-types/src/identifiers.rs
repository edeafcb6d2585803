//! Type-safe identifiers: colors, hotkeys, call sites and subscription handles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{LogFoxError, Result};

/// An RGB display color, written `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Build a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) string.
    pub fn parse(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LogFoxError::Validation(format!(
                "Invalid color '{}': expected #RRGGBB",
                s
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| LogFoxError::Validation(format!("Invalid color '{}': {}", s, e)))
        };

        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A single key bound to the viewer visibility toggle.
///
/// # Example
///
/// ```
/// use logfox_types::Hotkey;
///
/// let key: Hotkey = "F3".parse().unwrap();
/// assert_eq!(key, Hotkey::Function(3));
/// assert_eq!(key.to_string(), "F3");
///
/// assert!("F99".parse::<Hotkey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Hotkey {
    /// A function key, `F1` through `F24`
    Function(u8),
    /// A printable character key
    Char(char),
}

impl Hotkey {
    /// Highest function key number accepted.
    pub const MAX_FUNCTION_KEY: u8 = 24;
}

impl Default for Hotkey {
    fn default() -> Self {
        Hotkey::Function(3)
    }
}

impl FromStr for Hotkey {
    type Err = LogFoxError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() && !c.is_whitespace() => {
                return Ok(Hotkey::Char(c));
            }
            (Some('F' | 'f'), Some(_)) => {
                if let Ok(n) = s[1..].parse::<u8>() {
                    if (1..=Self::MAX_FUNCTION_KEY).contains(&n) {
                        return Ok(Hotkey::Function(n));
                    }
                }
            }
            _ => {}
        }

        Err(LogFoxError::Validation(format!(
            "Invalid hotkey '{}': expected F1-F{} or a single printable character",
            s,
            Self::MAX_FUNCTION_KEY
        )))
    }
}

impl TryFrom<String> for Hotkey {
    type Error = LogFoxError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Hotkey> for String {
    fn from(key: Hotkey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hotkey::Function(n) => write!(f, "F{}", n),
            Hotkey::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Handle returned when registering a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wrap a raw registration index.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw registration index.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// The caller context attached to every log line.
///
/// `source_name` is the declaring scope (a type for methods, a module for
/// free functions), `member` the calling function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    /// Declaring type or module
    pub source_name: String,
    /// Calling function
    pub member: String,
    /// Source line of the call
    pub line: u32,
}

impl CallSite {
    /// Build a call site from explicit parts.
    pub fn new(source_name: impl Into<String>, member: impl Into<String>, line: u32) -> Self {
        Self {
            source_name: source_name.into(),
            member: member.into(),
            line,
        }
    }

    /// Resolve a call site from a fully qualified function path such as
    /// `game::engine::Engine::boot`.
    ///
    /// Closure frames (`{{closure}}`) are skipped so a call inside a closure
    /// reports the enclosing function. Trait-qualified paths
    /// (`<game::Engine as core::fmt::Debug>::fmt`) resolve to the implementing
    /// type, and generic arguments (`game::Pool<alloc::string::String>::take`)
    /// are dropped from it.
    ///
    /// # Errors
    ///
    /// Returns [`LogFoxError::ContextCapture`] when the path is too shallow to
    /// name both a declaring scope and a member.
    ///
    /// # Example
    ///
    /// ```
    /// use logfox_types::CallSite;
    ///
    /// let site = CallSite::from_function_path("game::engine::Engine::boot", 42).unwrap();
    /// assert_eq!(site.source_name, "Engine");
    /// assert_eq!(site.member, "boot");
    /// assert_eq!(site.line, 42);
    ///
    /// assert!(CallSite::from_function_path("main", 1).is_err());
    /// ```
    pub fn from_function_path(path: &str, line: u32) -> Result<Self> {
        let path = strip_generic_args(&unqualify_trait_impl(path.trim()));
        let mut segments: Vec<&str> = path
            .split("::")
            .filter(|segment| !segment.is_empty())
            .collect();

        while segments.last() == Some(&"{{closure}}") {
            segments.pop();
        }

        match segments.as_slice() {
            [.., source, member] => Ok(Self::new(*source, *member, line)),
            _ => Err(LogFoxError::ContextCapture(format!(
                "call path '{}' is too shallow to resolve a declaring scope",
                path
            ))),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}:{}", self.source_name, self.member, self.line)
    }
}

// `<a::Type as b::Trait>::method` -> `a::Type::method`
fn unqualify_trait_impl(path: &str) -> String {
    let Some(rest) = path.strip_prefix('<') else {
        return path.to_string();
    };

    let mut depth = 1usize;
    let mut prev = '<';
    for (i, c) in rest.char_indices() {
        let after_dash = prev == '-';
        prev = c;
        match c {
            '<' => depth += 1,
            '>' if after_dash => {}
            '>' => {
                depth -= 1;
                if depth == 0 {
                    let inner = &rest[..i];
                    let self_ty = inner.split(" as ").next().unwrap_or(inner);
                    return format!("{}{}", self_ty, &rest[i + 1..]);
                }
            }
            _ => {}
        }
    }

    path.to_string()
}

// `a::Pool<b::Item<u8>>::take` -> `a::Pool::take`
fn strip_generic_args(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    let mut prev = '\0';

    for c in path.chars() {
        match c {
            '<' => depth += 1,
            // `->` inside `fn(..) -> T` arguments
            '>' if prev == '-' => {}
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
        prev = c;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        let color = Color::parse("#F38BA8").unwrap();
        assert_eq!(color, Color::rgb(0xF3, 0x8B, 0xA8));
        assert_eq!(Color::parse("94e2d5").unwrap().to_string(), "#94E2D5");

        assert!(Color::parse("#FFF").is_err());
        assert!(Color::parse("#GG0000").is_err());
    }

    #[test]
    fn test_hotkey_parsing() {
        assert_eq!("F3".parse::<Hotkey>().unwrap(), Hotkey::Function(3));
        assert_eq!("f12".parse::<Hotkey>().unwrap(), Hotkey::Function(12));
        assert_eq!("`".parse::<Hotkey>().unwrap(), Hotkey::Char('`'));
        assert_eq!("F".parse::<Hotkey>().unwrap(), Hotkey::Char('F'));

        assert!("F0".parse::<Hotkey>().is_err());
        assert!("F25".parse::<Hotkey>().is_err());
        assert!("".parse::<Hotkey>().is_err());
        assert!("ctrl".parse::<Hotkey>().is_err());
    }

    #[test]
    fn test_hotkey_default_is_f3() {
        assert_eq!(Hotkey::default(), Hotkey::Function(3));
    }

    #[test]
    fn test_hotkey_serde() {
        let key: Hotkey = serde_json::from_str("\"F5\"").unwrap();
        assert_eq!(key, Hotkey::Function(5));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"F5\"");
        assert!(serde_json::from_str::<Hotkey>("\"F42\"").is_err());
    }

    #[test]
    fn test_call_site_from_method_path() {
        let site = CallSite::from_function_path("game::engine::Engine::boot", 42).unwrap();
        assert_eq!(site, CallSite::new("Engine", "boot", 42));
    }

    #[test]
    fn test_call_site_skips_closures() {
        let path = "game::net::connect::{{closure}}::{{closure}}";
        let site = CallSite::from_function_path(path, 7).unwrap();
        assert_eq!(site.source_name, "net");
        assert_eq!(site.member, "connect");
    }

    #[test]
    fn test_call_site_trait_impl() {
        let path = "<game::world::World as core::fmt::Debug>::fmt";
        let site = CallSite::from_function_path(path, 3).unwrap();
        assert_eq!(site.source_name, "World");
        assert_eq!(site.member, "fmt");
    }

    #[test]
    fn test_call_site_generic_type_impl() {
        let site = CallSite::from_function_path(
            "game::pool::Pool<alloc::string::String>::take::{{closure}}",
            11,
        )
        .unwrap();
        assert_eq!(site, CallSite::new("Pool", "take", 11));

        let site = CallSite::from_function_path("game::Cache<T>::get", 2).unwrap();
        assert_eq!(site.source_name, "Cache");

        let site = CallSite::from_function_path(
            "<game::Pool<std::vec::Vec<fn(u8) -> u8>> as core::fmt::Debug>::fmt",
            5,
        )
        .unwrap();
        assert_eq!(site, CallSite::new("Pool", "fmt", 5));
    }

    #[test]
    fn test_call_site_too_shallow() {
        let err = CallSite::from_function_path("main", 1).unwrap_err();
        assert!(matches!(err, LogFoxError::ContextCapture(_)));

        assert!(CallSite::from_function_path("", 1).is_err());
        assert!(CallSite::from_function_path("{{closure}}", 1).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn closure_frames_resolve_to_enclosing_fn(
                modules in proptest::collection::vec("[a-z][a-z0-9_]{0,8}", 1..4),
                member in "[a-z][a-z0-9_]{0,8}",
                closures in 0usize..4,
                line in any::<u32>(),
            ) {
                let mut path = format!("{}::{}", modules.join("::"), member);
                for _ in 0..closures {
                    path.push_str("::{{closure}}");
                }

                let site = CallSite::from_function_path(&path, line).unwrap();
                prop_assert_eq!(&site.source_name, modules.last().unwrap());
                prop_assert_eq!(site.member, member);
                prop_assert_eq!(site.line, line);
            }
        }
    }
}
