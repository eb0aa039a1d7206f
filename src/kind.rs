/*!
# Flagstaff: Kinds and Values

Every flag has one of six [`Kind`]s, fixed at definition time. The kind
decides how raw command-line text is coerced into a [`Value`], and how
repeat occurrences are merged.

The zero-sized markers in this module — [`Str`], [`Int`], [`Num`], [`Bool`],
[`List`], and [`Multi`] — tie each kind to its native Rust type so that
defaults and validators can be strongly typed.
*/

use crate::FlagError;
use std::fmt;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Flag Kind.
pub enum Kind {
	/// # Arbitrary Text.
	String,

	/// # Base-10 Integer.
	Integer,

	/// # Floating-Point Number.
	Number,

	/// # Boolean Switch.
	///
	/// Supports the bare `--name` and negated `--noname` shorthands.
	Boolean,

	/// # Comma-Separated List.
	///
	/// Each occurrence replaces the previous value entirely.
	StringList,

	/// # Repeatable String.
	///
	/// Each occurrence is appended to the list.
	MultiString,
}

impl fmt::Display for Kind {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Kind {
	#[must_use]
	/// # As String Slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Integer => "integer",
			Self::Number => "number",
			Self::Boolean => "boolean",
			Self::StringList => "string list",
			Self::MultiString => "multi-string",
		}
	}

	/// # Coerce.
	///
	/// Convert raw command-line text into a value of this kind. `raw` is
	/// `None` when the flag appeared without any value at all.
	///
	/// A valueless boolean is `true`; a valueless string is set to nothing
	/// (`Ok(None)`); every other kind requires text.
	///
	/// Multi-string coercion yields a single-entry list; merging with prior
	/// occurrences is the caller's business.
	///
	/// ## Errors
	///
	/// Returns [`FlagError::TypeCoercion`] if the text is missing or cannot
	/// be represented.
	pub(crate) fn coerce(self, name: &str, raw: Option<&str>)
	-> Result<Option<Value>, FlagError> {
		let bad = || FlagError::TypeCoercion {
			name: name.to_owned(),
			kind: self,
			value: raw.map(str::to_owned),
		};

		match (self, raw) {
			(Self::String, None) => Ok(None),
			(Self::String, Some(s)) => Ok(Some(Value::String(s.to_owned()))),
			(Self::Boolean, None) => Ok(Some(Value::Boolean(true))),
			(Self::Boolean, Some(s)) => parse_bool(s)
				.map(|b| Some(Value::Boolean(b)))
				.ok_or_else(bad),
			(Self::Integer, Some(s)) => s.parse::<i64>()
				.map(|n| Some(Value::Integer(n)))
				.map_err(|_| bad()),
			(Self::Number, Some(s)) => match s.parse::<f64>() {
				// Words like "inf" and "NaN" parse, but aren't numbers.
				Ok(n) if n.is_finite() => Ok(Some(Value::Number(n))),
				_ => Err(bad()),
			},
			(Self::StringList, Some(s)) => Ok(Some(Value::StringList(split_list(s)))),
			(Self::MultiString, Some(s)) => Ok(Some(Value::MultiString(vec![s.to_owned()]))),
			(Self::Integer | Self::Number | Self::StringList | Self::MultiString, None) =>
				Err(bad()),
		}
	}
}



#[derive(Debug, Clone, PartialEq)]
/// # Flag Value.
///
/// A tagged value, one variant per [`Kind`].
pub enum Value {
	/// # String.
	String(String),

	/// # Integer.
	Integer(i64),

	/// # Number.
	Number(f64),

	/// # Boolean.
	Boolean(bool),

	/// # String List.
	StringList(Vec<String>),

	/// # Multi-String.
	MultiString(Vec<String>),
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::String(s) => f.write_str(s),
			Self::Integer(n) => write!(f, "{n}"),
			Self::Number(n) => write!(f, "{n}"),
			Self::Boolean(b) => write!(f, "{b}"),
			Self::StringList(v) | Self::MultiString(v) => f.write_str(&v.join(",")),
		}
	}
}

impl Value {
	#[must_use]
	/// # Kind.
	pub const fn kind(&self) -> Kind {
		match self {
			Self::String(_) => Kind::String,
			Self::Integer(_) => Kind::Integer,
			Self::Number(_) => Kind::Number,
			Self::Boolean(_) => Kind::Boolean,
			Self::StringList(_) => Kind::StringList,
			Self::MultiString(_) => Kind::MultiString,
		}
	}

	#[must_use]
	/// # As String Slice.
	pub fn as_str(&self) -> Option<&str> {
		if let Self::String(s) = self { Some(s) }
		else { None }
	}

	#[must_use]
	/// # As Integer.
	pub const fn as_int(&self) -> Option<i64> {
		if let Self::Integer(n) = self { Some(*n) }
		else { None }
	}

	#[must_use]
	/// # As Number.
	///
	/// Integers are widened for convenience.
	#[expect(clippy::cast_precision_loss, reason = "Widening is best-effort.")]
	pub fn as_num(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			Self::Integer(n) => Some(*n as f64),
			_ => None,
		}
	}

	#[must_use]
	/// # As Boolean.
	pub const fn as_bool(&self) -> Option<bool> {
		if let Self::Boolean(b) = self { Some(*b) }
		else { None }
	}

	#[must_use]
	/// # As List.
	///
	/// This works for both string lists and multi-strings.
	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			Self::StringList(v) | Self::MultiString(v) => Some(v.as_slice()),
			_ => None,
		}
	}
}



/// # Flag Kind Marker.
///
/// This links a [`Kind`] to the native type its values are held as. It is
/// implemented by the zero-sized markers in this module, and is what lets
/// [`Flags::define`](crate::Flags::define) hand back a strongly-typed
/// [`Flag`](crate::Flag) builder.
pub trait FlagKind {
	/// # Native Type.
	type Value: Clone;

	/// # Kind.
	const KIND: Kind;

	/// # Wrap Native Value.
	fn wrap(value: Self::Value) -> Value;

	/// # Peek Native Value.
	///
	/// Return the native value if the tag matches.
	fn peek(value: &Value) -> Option<&Self::Value>;
}

/// # Helper: Kind Markers.
macro_rules! marker {
	($( $(#[$meta:meta])* $marker:ident $kind:ident $ty:ty; )+) => ($(
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
		pub struct $marker;

		impl FlagKind for $marker {
			type Value = $ty;
			const KIND: Kind = Kind::$kind;

			#[inline]
			fn wrap(value: Self::Value) -> Value { Value::$kind(value) }

			#[inline]
			fn peek(value: &Value) -> Option<&Self::Value> {
				if let Value::$kind(v) = value { Some(v) }
				else { None }
			}
		}
	)+);
}

marker! {
	/// # String Marker.
	Str String String;

	/// # Integer Marker.
	Int Integer i64;

	/// # Number Marker.
	Num Number f64;

	/// # Boolean Marker.
	Bool Boolean bool;

	/// # String List Marker.
	List StringList Vec<String>;

	/// # Multi-String Marker.
	Multi MultiString Vec<String>;
}



/// # Parse Boolean.
///
/// Case-insensitive `true`, `false`, `t`, `f`, `1`, or `0`.
fn parse_bool(raw: &str) -> Option<bool> {
	match raw.as_bytes() {
		[b'1'] => Some(true),
		[b'0'] => Some(false),
		[b't' | b'T'] => Some(true),
		[b'f' | b'F'] => Some(false),
		_ if raw.eq_ignore_ascii_case("true") => Some(true),
		_ if raw.eq_ignore_ascii_case("false") => Some(false),
		_ => None,
	}
}

/// # Split List.
///
/// An empty string is an empty list.
fn split_list(raw: &str) -> Vec<String> {
	if raw.is_empty() { Vec::new() }
	else { raw.split(',').map(str::to_owned).collect() }
}
