//! Field descriptors: the seam between a provider and the host engine that
//! owns the struct being populated.
//!
//! A provider never inspects the target struct. It asks a [`Field`] for the
//! tag registered under its own key, and hands the resolved string back
//! through [`Field::set_from_str`]. Type coercion lives entirely behind that
//! call.
//!
//! [`TaggedField`] is a ready-made descriptor over a `&mut T` for any
//! `T: FromConfigStr`, which covers strings, paths, booleans, integers,
//! floats and [`Duration`]s.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::YamlfigError;

/// A single annotated field as seen by a provider.
pub trait Field {
    /// Field name, used in error messages.
    fn name(&self) -> &str;

    /// The tag value registered under `key`, if any.
    fn tag(&self, key: &str) -> Option<&str>;

    /// Coerce `value` into the field's type and store it.
    fn set_from_str(&mut self, value: &str) -> Result<(), YamlfigError>;
}

/// Types that can be parsed from a provider-supplied string.
pub trait FromConfigStr: Sized {
    fn from_config_str(s: &str) -> Result<Self, String>;
}

/// A [`Field`] writing into a borrowed value.
///
/// ```ignore
/// let mut timeout = Duration::ZERO;
/// let mut field = TaggedField::new("Timeout", &mut timeout)
///     .with_tag("file_yml", "service.timeout");
/// provider.provide(&mut field)?;
/// ```
pub struct TaggedField<'a, T> {
    name: String,
    tags: Vec<(String, String)>,
    target: &'a mut T,
}

impl<'a, T: FromConfigStr> TaggedField<'a, T> {
    pub fn new(name: &str, target: &'a mut T) -> Self {
        Self {
            name: name.to_string(),
            tags: Vec::new(),
            target,
        }
    }

    /// Register a tag. A later tag with the same key replaces the earlier one.
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.retain(|(k, _)| k != key);
        self.tags.push((key.to_string(), value.to_string()));
        self
    }

    /// Register every `key:"value"` pair of a struct-tag style string, e.g.
    /// `file_yml:"service.timeout" env:"TIMEOUT"`. Malformed trailing input
    /// is ignored.
    pub fn with_tags(mut self, raw: &str) -> Self {
        for (key, value) in parse_struct_tag(raw) {
            self = self.with_tag(key, value);
        }
        self
    }
}

impl<T: FromConfigStr> Field for TaggedField<'_, T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set_from_str(&mut self, value: &str) -> Result<(), YamlfigError> {
        *self.target =
            T::from_config_str(value).map_err(|reason| YamlfigError::InvalidValue {
                key: self.name.clone(),
                reason,
            })?;
        Ok(())
    }
}

/// Split `a:"x" b:"y"` into `[("a", "x"), ("b", "y")]`.
fn parse_struct_tag(raw: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    let mut rest = raw.trim_start();
    while let Some((key, after)) = rest.split_once(":\"") {
        let Some((value, tail)) = after.split_once('"') else {
            break;
        };
        if !key.is_empty() && !key.contains(char::is_whitespace) {
            pairs.push((key, value));
        }
        rest = tail.trim_start();
    }
    pairs
}

impl FromConfigStr for String {
    fn from_config_str(s: &str) -> Result<Self, String> {
        Ok(s.to_string())
    }
}

impl FromConfigStr for PathBuf {
    fn from_config_str(s: &str) -> Result<Self, String> {
        Ok(PathBuf::from(s))
    }
}

/// Accepts `1`/`0`, `t`/`f`, `true`/`false` and the YAML 1.1 words
/// `yes`/`no`, `y`/`n`, `on`/`off`, in any case. The YAML parser keeps those
/// words as strings, so they arrive here unconverted.
impl FromConfigStr for bool {
    fn from_config_str(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "t" | "true" | "y" | "yes" | "on" => Ok(true),
            "0" | "f" | "false" | "n" | "no" | "off" => Ok(false),
            _ => Err(format!("'{s}' is not a boolean")),
        }
    }
}

macro_rules! from_config_str_via_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromConfigStr for $ty {
                fn from_config_str(s: &str) -> Result<Self, String> {
                    s.trim()
                        .parse::<$ty>()
                        .map_err(|e| format!("'{s}': {e}"))
                }
            }
        )*
    };
}

from_config_str_via_parse!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl FromConfigStr for Duration {
    fn from_config_str(s: &str) -> Result<Self, String> {
        parse_duration(s)
    }
}

/// An empty string (a null in the document) becomes `None`.
impl<T: FromConfigStr> FromConfigStr for Option<T> {
    fn from_config_str(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            Ok(None)
        } else {
            T::from_config_str(s).map(Some)
        }
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration such as `15ms`, `1h30m` or `1.5s`.
///
/// Each component is a decimal number followed by one of `ns`, `us` (or
/// `µs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted. Negative durations are
/// rejected since [`Duration`] cannot hold them.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let invalid = || format!("invalid duration '{input}'");

    let mut s = input.strip_prefix('+').unwrap_or(input);
    if s.starts_with('-') {
        return Err(format!("negative duration '{input}' is not supported"));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let num_end = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        let number = &s[..num_end];
        s = &s[num_end..];

        let unit_end = s
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(s.len());
        let unit = &s[..unit_end];
        s = &s[unit_end..];

        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            "" => return Err(format!("missing unit in duration '{input}'")),
            other => return Err(format!("unknown unit '{other}' in duration '{input}'")),
        };

        let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        // Digits past nanosecond precision cannot change the result.
        let frac = &frac[..frac.len().min(18)];
        let frac_nanos = if frac.is_empty() {
            0
        } else {
            let digits: u128 = frac.parse().map_err(|_| invalid())?;
            digits * scale / 10u128.pow(frac.len() as u32)
        };

        total = whole
            .checked_mul(scale)
            .and_then(|n| n.checked_add(frac_nanos))
            .and_then(|n| total.checked_add(n))
            .ok_or_else(|| format!("duration '{input}' overflows"))?;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC)
        .map_err(|_| format!("duration '{input}' overflows"))?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}
