//! Argument model and the key/value resolution rules.

use crate::flags::PrependStyle;
use crate::quote::Shell;

use super::error::CommandError;

/// Switch prefixes recognised on caller-supplied keys, longest first.
const SWITCH_PREFIXES: [&str; 3] = ["--", "-", "/"];

/// A scalar that can be rendered as one argument value.
pub trait ArgValue {
    /// Render the value as the text passed to the shell.
    fn into_value(self) -> String;
}

impl ArgValue for &str {
    fn into_value(self) -> String {
        self.to_owned()
    }
}

impl ArgValue for String {
    fn into_value(self) -> String {
        self
    }
}

impl ArgValue for &String {
    fn into_value(self) -> String {
        self.clone()
    }
}

/// `true` renders as `1` and `false` as an empty value.
impl ArgValue for bool {
    fn into_value(self) -> String {
        if self { "1".to_owned() } else { String::new() }
    }
}

impl From<bool> for Values {
    fn from(value: bool) -> Self {
        Self(vec![value.into_value()])
    }
}

macro_rules! display_arg_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArgValue for $ty {
                fn into_value(self) -> String {
                    self.to_string()
                }
            }

            impl From<$ty> for Values {
                fn from(value: $ty) -> Self {
                    Self(vec![value.into_value()])
                }
            }
        )*
    };
}

display_arg_value!(
    char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Ordered values attached to an argument.
///
/// Built from nothing (`()` or `None`), a single scalar, or a sequence of
/// scalars.
///
/// ```
/// use cmdkit::Values;
///
/// assert!(Values::from(()).is_empty());
/// assert_eq!(Values::from("a.txt").as_slice(), ["a.txt"]);
/// assert_eq!(Values::from(vec![1, 2]).as_slice(), ["1", "2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values(Vec<String>);

impl Values {
    /// No values: the argument is a bare switch.
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Whether there are no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values in order.
    #[must_use]
    pub const fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }

    /// Take ownership of the values.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<()> for Values {
    fn from((): ()) -> Self {
        Self::none()
    }
}

impl From<&str> for Values {
    fn from(value: &str) -> Self {
        Self(vec![value.into_value()])
    }
}

impl From<String> for Values {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<&String> for Values {
    fn from(value: &String) -> Self {
        Self(vec![value.clone()])
    }
}

impl<T: ArgValue> From<Option<T>> for Values {
    fn from(value: Option<T>) -> Self {
        Self(value.map(ArgValue::into_value).into_iter().collect())
    }
}

impl<T: ArgValue> From<Vec<T>> for Values {
    fn from(values: Vec<T>) -> Self {
        Self(values.into_iter().map(ArgValue::into_value).collect())
    }
}

impl<T: ArgValue, const N: usize> From<[T; N]> for Values {
    fn from(values: [T; N]) -> Self {
        Self(values.into_iter().map(ArgValue::into_value).collect())
    }
}

impl<T: ArgValue + Clone> From<&[T]> for Values {
    fn from(values: &[T]) -> Self {
        Self(values.iter().cloned().map(ArgValue::into_value).collect())
    }
}

/// One command-line switch and its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    key: String,
    values: Vec<String>,
    escape: bool,
}

impl Argument {
    /// Display key as it appears in the built command line.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Values as they appear in the built command line.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether the key and values were escaped on insertion.
    #[must_use]
    pub const fn is_escaped(&self) -> bool {
        self.escape
    }

    /// Tokens this argument contributes: the key alone, or `key value` once
    /// per value.
    pub(super) fn tokens(&self) -> Vec<&str> {
        if self.values.is_empty() {
            return vec![self.key.as_str()];
        }
        self.values
            .iter()
            .flat_map(|value| [self.key.as_str(), value.as_str()])
            .collect()
    }
}

/// Outcome of [`resolve_argument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgument {
    /// Bare key used to index the argument.
    pub lookup_key: String,
    /// The stored argument.
    pub argument: Argument,
}

/// Apply the prefix and escaping rules to a raw key and its values.
///
/// The lookup key is `raw_key` without its leading `--`, `-` or `/`. The
/// display key keeps a caller-supplied prefix, or receives one from `style`.
/// When `escape` is set every value is quoted, and so is any key the caller
/// did not prefix. A prefix from `style` goes in front of the quoted key.
///
/// # Errors
///
/// Returns [`CommandError::InvalidArgument`] for an empty key, or when a key
/// or value cannot be represented on a command line.
///
/// # Examples
///
/// ```
/// use cmdkit::{PrependStyle, Shell, resolve_argument};
///
/// let resolved = resolve_argument("foo", "x".into(), false, Some(PrependStyle::Unix), Shell::Posix)?;
/// assert_eq!(resolved.lookup_key, "foo");
/// assert_eq!(resolved.argument.key(), "--foo");
/// # Ok::<(), cmdkit::CommandError>(())
/// ```
pub fn resolve_argument(
    raw_key: &str,
    values: Values,
    escape: bool,
    style: Option<PrependStyle>,
    shell: Shell,
) -> Result<ResolvedArgument, CommandError> {
    if raw_key.is_empty() {
        return Err(CommandError::invalid("argument keys cannot be empty"));
    }

    let lookup = lookup_key(raw_key);
    let caller_prefixed = has_switch_prefix(raw_key);
    let style = style.filter(|_| !caller_prefixed);

    let (key, values) = if escape {
        let key = if caller_prefixed {
            raw_key.to_owned()
        } else {
            let quoted = shell.quote_argument(raw_key)?;
            let prefix = style.map_or("", |chosen| chosen.prefix(raw_key));
            format!("{prefix}{quoted}")
        };
        let quoted = values
            .into_vec()
            .iter()
            .map(|value| shell.quote_argument(value))
            .collect::<Result<Vec<_>, _>>()?;
        (key, quoted)
    } else {
        let key = style.map_or_else(|| raw_key.to_owned(), |chosen| chosen.apply(raw_key));
        let raw = values.into_vec();
        if key.contains('\0') || raw.iter().any(|value| value.contains('\0')) {
            return Err(CommandError::invalid(
                "arguments cannot contain NUL bytes",
            ));
        }
        (key, raw)
    };

    Ok(ResolvedArgument {
        lookup_key: lookup.to_owned(),
        argument: Argument {
            key,
            values,
            escape,
        },
    })
}

/// Remove a leading switch prefix, if any.
fn strip_switch_prefix(key: &str) -> Option<&str> {
    SWITCH_PREFIXES
        .iter()
        .find_map(|prefix| key.strip_prefix(prefix))
}

fn has_switch_prefix(key: &str) -> bool {
    strip_switch_prefix(key).is_some()
}

/// Lookup key for a caller-supplied key.
pub(super) fn lookup_key(key: &str) -> &str {
    match strip_switch_prefix(key) {
        Some(bare) if !bare.is_empty() => bare,
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolve(
        key: &str,
        values: impl Into<Values>,
        escape: bool,
        style: Option<PrependStyle>,
    ) -> ResolvedArgument {
        resolve_argument(key, values.into(), escape, style, Shell::Posix)
            .expect("argument should resolve")
    }

    #[rstest]
    #[case("f", Some(PrependStyle::Unix), "f", "-f")]
    #[case("foo", Some(PrependStyle::Unix), "foo", "--foo")]
    #[case("f", Some(PrependStyle::Windows), "f", "/f")]
    #[case("/foo", Some(PrependStyle::Windows), "foo", "/foo")]
    #[case("--foo", Some(PrependStyle::Windows), "foo", "--foo")]
    #[case("-r", None, "r", "-r")]
    #[case("foo", None, "foo", "foo")]
    #[case("-", Some(PrependStyle::Unix), "-", "-")]
    fn keys_resolve_to_lookup_and_display_forms(
        #[case] key: &str,
        #[case] style: Option<PrependStyle>,
        #[case] lookup: &str,
        #[case] display: &str,
    ) {
        let resolved = resolve(key, "value.txt", false, style);
        assert_eq!(resolved.lookup_key, lookup);
        assert_eq!(resolved.argument.key(), display);
        assert_eq!(resolved.argument.values(), ["value.txt"]);
    }

    #[test]
    fn escaping_quotes_bare_keys_and_every_value() {
        let resolved = resolve("foo&&bar", vec!["some foo", "x;y"], true, None);
        assert_eq!(resolved.lookup_key, "foo&&bar");
        let key = resolved.argument.key();
        assert_eq!(shlex::split(key), Some(vec!["foo&&bar".to_owned()]));
        for (value, expected) in resolved.argument.values().iter().zip(["some foo", "x;y"]) {
            assert_eq!(shlex::split(value), Some(vec![expected.to_owned()]));
        }
        assert!(resolved.argument.is_escaped());
    }

    #[test]
    fn escaping_leaves_prefixed_keys_alone() {
        let resolved = resolve("-r", "echo 'hello';", true, None);
        assert_eq!(resolved.argument.key(), "-r");
        let value = resolved.argument.values().first().expect("one value");
        assert_eq!(shlex::split(value), Some(vec!["echo 'hello';".to_owned()]));

    }

    #[rstest]
    #[case("out dir", PrependStyle::Unix, "--out dir")]
    #[case("x;echo INJECTED", PrependStyle::Unix, "--x;echo INJECTED")]
    #[case("$(id)", PrependStyle::Windows, "/$(id)")]
    #[case("a", PrependStyle::Unix, "-a")]
    fn styled_keys_are_quoted_before_prefixing(
        #[case] key: &str,
        #[case] style: PrependStyle,
        #[case] word: &str,
    ) {
        let resolved = resolve(key, (), true, Some(style));
        assert_eq!(resolved.lookup_key, key);
        let display = resolved.argument.key();
        assert!(display.starts_with(style.prefix(key)), "unexpected key {display}");
        assert_eq!(shlex::split(display), Some(vec![word.to_owned()]));
    }

    #[test]
    fn unescaped_styled_keys_are_prefixed_verbatim() {
        let resolved = resolve("out dir", (), false, Some(PrependStyle::Unix));
        assert_eq!(resolved.argument.key(), "--out dir");
    }

    #[test]
    fn empty_keys_are_rejected() {
        let err = resolve_argument("", Values::none(), true, None, Shell::Posix)
            .expect_err("empty key should fail");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn nul_bytes_are_rejected_even_without_escaping() {
        let err = resolve_argument("k", "a\0b".into(), false, None, Shell::Posix)
            .expect_err("NUL should fail");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn cmd_line_breaks_surface_as_invalid_arguments() {
        let err = resolve_argument("k", "a\nb".into(), true, None, Shell::Cmd)
            .expect_err("line break should fail under cmd.exe");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn values_normalise_scalars_and_sequences() {
        assert!(Values::from(None::<&str>).is_empty());
        assert_eq!(Values::from(Some(3_u8)).as_slice(), ["3"]);
        assert_eq!(Values::from(["a", "b"]).as_slice(), ["a", "b"]);
        assert_eq!(Values::from(&["x".to_owned()][..]).as_slice(), ["x"]);
        assert_eq!(Values::from(1.5).as_slice(), ["1.5"]);
        assert_eq!(Values::from(true).as_slice(), ["1"]);
        assert_eq!(Values::from(false).as_slice(), [""]);
        assert_eq!(Values::from(vec![true, false]).as_slice(), ["1", ""]);
    }

    #[test]
    fn tokens_repeat_the_key_before_each_value() {
        let multi = resolve("baz", vec!["v1", "v2"], false, None).argument;
        assert_eq!(multi.tokens(), ["baz", "v1", "baz", "v2"]);
        let flag = resolve("verbose", (), false, None).argument;
        assert_eq!(flag.tokens(), ["verbose"]);
    }
}
