/*!
# Flagstaff: Flag Registry

This module contains [`Flags`], the registry that owns every flag
definition, parses argument lists into typed values, and answers lookups
afterward.
*/

use crate::{
	Flag,
	FlagDefinition,
	FlagError,
	FlagKind,
	Kind,
	kind::{
		Bool,
		Int,
		List,
		Multi,
		Num,
		Str,
	},
	Value,
};
use std::{
	collections::{
		BTreeMap,
		BTreeSet,
	},
	iter::Peekable,
};
use tracing::{
	debug,
	error,
	trace,
	warn,
};



#[derive(Debug)]
/// # Flag Registry.
///
/// `Flags` holds a set of named, typed flag definitions, parses command-line
/// arguments against them, and exposes the results.
///
/// Its life follows three phases:
/// 1. Flags are declared via [`Flags::define`] or one of the kind-specific
///    helpers like [`Flags::define_string`];
/// 2. The arguments are parsed once via [`Flags::parse`] (or
///    [`Flags::parse_env`]), after which no more flags may be defined;
/// 3. Values are read back via [`Flags::get`], [`Flags::get_as`], and
///    [`Flags::is_set`].
///
/// [`Flags::reset`] returns the registry to its initial state.
///
/// ## Syntax
///
/// Only long-style keys are recognized:
/// * `--name=value` and `--name value` assign a value;
/// * `--name` alone sets a boolean to `true`;
/// * `--noname` sets a boolean to `false`;
/// * `--` ends parsing; everything after it is returned as-is.
///
/// A value token is only consumed by the two-token form if it does not
/// itself begin with `--`. Booleans never consume a following token.
///
/// ## Errors
///
/// By default, any definition or parse error is printed to STDERR and the
/// process exits with status `1`. Call [`Flags::set_exit_on_error`] with
/// `false` to receive the [`FlagError`] instead.
///
/// Parsing is not transactional: if a flag fails, any flags matched earlier
/// in the same call keep the values they were assigned.
///
/// ## Examples
///
/// ```
/// use flagstaff::{Flags, Value};
///
/// let mut flags = Flags::new();
/// flags.set_exit_on_error(false);
///
/// flags.define_string("one", Some("111"), None).unwrap();
/// flags.define_integer("two", Some(2), None).unwrap();
/// flags.define_boolean("three", None, None).unwrap();
///
/// let rest = flags.parse(["--two", "22", "--three", "--", "--one=x"], false)
///     .unwrap();
///
/// assert_eq!(flags.get("one").unwrap(), Some(&Value::String("111".to_owned())));
/// assert_eq!(flags.get_as::<flagstaff::kind::Int>("two").unwrap(), Some(&22));
/// assert!(flags.is_set("three"));
/// assert_eq!(rest, vec!["--one=x".to_owned()]);
/// ```
pub struct Flags {
	/// # Definitions by Name.
	definitions: BTreeMap<String, FlagDefinition>,

	/// # Parsed Yet?
	parsed: bool,

	/// # Exit on Error?
	exit_on_error: bool,
}

impl Default for Flags {
	#[inline]
	fn default() -> Self {
		Self {
			definitions: BTreeMap::new(),
			parsed: false,
			exit_on_error: true,
		}
	}
}

/// ## Setup.
impl Flags {
	#[must_use]
	#[inline]
	/// # New.
	///
	/// Return an empty registry. Errors will terminate the process until
	/// [`Flags::set_exit_on_error`] says otherwise.
	pub fn new() -> Self { Self::default() }

	#[must_use]
	/// # Exit on Error?
	pub const fn exit_on_error(&self) -> bool { self.exit_on_error }

	/// # Set Exit on Error.
	///
	/// When `true` (the default), definition and parse errors are printed to
	/// STDERR and the process exits. When `false`, they are returned to the
	/// caller.
	///
	/// This may be changed at any time.
	pub fn set_exit_on_error(&mut self, exit: bool) { self.exit_on_error = exit; }

	/// # Reset.
	///
	/// Remove all definitions and clear the parsed state, restoring the
	/// registry to how it was at creation. The exit-on-error preference is
	/// left alone.
	pub fn reset(&mut self) {
		debug!(flags = self.definitions.len(), "Resetting flag registry.");
		self.definitions.clear();
		self.parsed = false;
	}
}

/// ## Definitions.
impl Flags {
	/// # Define.
	///
	/// Declare a new flag of kind `K` — one of the markers from
	/// [`kind`](crate::kind) — returning a [`Flag`] builder that can be used
	/// to further configure it.
	///
	/// Boolean flags without an explicit default default to `false`.
	///
	/// ## Examples
	///
	/// ```
	/// use flagstaff::{Flags, kind::Num};
	///
	/// let mut flags = Flags::new();
	/// flags.define::<Num>("ratio", Some(0.5), Some("The ratio."))
	///     .unwrap()
	///     .set_validator(|n: &f64| {
	///         if (0.0..=1.0).contains(n) { Ok(()) }
	///         else { Err("The ratio must be between zero and one.") }
	///     });
	/// ```
	///
	/// ## Errors
	///
	/// Returns an error if the name has already been defined, or the registry
	/// has already been parsed. (If exit-on-error is enabled, the process
	/// terminates instead.)
	pub fn define<K: FlagKind + 'static>(
		&mut self,
		name: &str,
		default: Option<K::Value>,
		description: Option<&str>,
	) -> Result<Flag<'_, K>, FlagError> {
		if self.parsed {
			return Err(self.fail(FlagError::DefineAfterParse(name.to_owned())));
		}
		if self.definitions.contains_key(name) {
			return Err(self.fail(FlagError::Duplicate(name.to_owned())));
		}

		let default = default.map(K::wrap).or(
			if K::KIND == Kind::Boolean { Some(Value::Boolean(false)) }
			else { None }
		);

		debug!(flag = name, kind = %K::KIND, "Defined flag.");
		let def = self.definitions.entry(name.to_owned())
			.or_insert_with(|| FlagDefinition::new(
				name.to_owned(),
				K::KIND,
				default,
				description.map(str::to_owned),
			));

		Ok(Flag::new(def))
	}

	/// # Define String.
	///
	/// ## Errors
	///
	/// See [`Flags::define`].
	pub fn define_string(&mut self, name: &str, default: Option<&str>, description: Option<&str>)
	-> Result<Flag<'_, Str>, FlagError> {
		self.define::<Str>(name, default.map(str::to_owned), description)
	}

	/// # Define Integer.
	///
	/// ## Errors
	///
	/// See [`Flags::define`].
	pub fn define_integer(&mut self, name: &str, default: Option<i64>, description: Option<&str>)
	-> Result<Flag<'_, Int>, FlagError> {
		self.define::<Int>(name, default, description)
	}

	/// # Define Number.
	///
	/// ## Errors
	///
	/// See [`Flags::define`].
	pub fn define_number(&mut self, name: &str, default: Option<f64>, description: Option<&str>)
	-> Result<Flag<'_, Num>, FlagError> {
		self.define::<Num>(name, default, description)
	}

	/// # Define Boolean.
	///
	/// ## Errors
	///
	/// See [`Flags::define`].
	pub fn define_boolean(&mut self, name: &str, default: Option<bool>, description: Option<&str>)
	-> Result<Flag<'_, Bool>, FlagError> {
		self.define::<Bool>(name, default, description)
	}

	/// # Define String List.
	///
	/// Values are split on commas, and each occurrence replaces the last.
	///
	/// ## Errors
	///
	/// See [`Flags::define`].
	pub fn define_string_list(
		&mut self,
		name: &str,
		default: Option<Vec<String>>,
		description: Option<&str>,
	) -> Result<Flag<'_, List>, FlagError> {
		self.define::<List>(name, default, description)
	}

	/// # Define Multi-String.
	///
	/// Each occurrence is appended to the list.
	///
	/// ## Errors
	///
	/// See [`Flags::define`].
	pub fn define_multi_string(
		&mut self,
		name: &str,
		default: Option<Vec<String>>,
		description: Option<&str>,
	) -> Result<Flag<'_, Multi>, FlagError> {
		self.define::<Multi>(name, default, description)
	}
}

/// ## Parsing.
impl Flags {
	/// # Parse.
	///
	/// Parse `args` against the defined flags, returning any arguments that
	/// followed an end-of-command separator (`--`), verbatim.
	///
	/// If `ignore_unrecognized` is `true`, tokens that don't match a defined
	/// flag — along with stray positional arguments — are skipped instead
	/// of triggering an error.
	///
	/// Once called, the registry is considered parsed and will refuse new
	/// definitions until [`Flags::reset`]. Parsing again is allowed; it
	/// simply runs against the current state, though multi-string flags
	/// start their lists over.
	///
	/// ## Errors
	///
	/// Returns an error if a flag is unrecognized, its value cannot be
	/// coerced into the right type, or its validator rejects it. (If
	/// exit-on-error is enabled, the process terminates instead.)
	pub fn parse<I, S>(&mut self, args: I, ignore_unrecognized: bool)
	-> Result<Vec<String>, FlagError>
	where I: IntoIterator<Item=S>, S: Into<String> {
		self.parsed = true;
		self.try_parse(args.into_iter().map(Into::into).peekable(), ignore_unrecognized)
			.map_err(|e| self.fail(e))
	}

	/// # Parse Environment.
	///
	/// Same as [`Flags::parse`], but using the arguments passed to the
	/// current process (sans the command path). Arguments that aren't
	/// valid UTF-8 are converted lossily.
	///
	/// ## Errors
	///
	/// See [`Flags::parse`].
	pub fn parse_env(&mut self, ignore_unrecognized: bool) -> Result<Vec<String>, FlagError> {
		self.parse(
			std::env::args_os().skip(1).map(|a| a.to_string_lossy().into_owned()),
			ignore_unrecognized,
		)
	}

	/// # Try Parse.
	///
	/// This is the workhorse behind [`Flags::parse`].
	fn try_parse<I>(&mut self, mut iter: Peekable<I>, ignore: bool)
	-> Result<Vec<String>, FlagError>
	where I: Iterator<Item=String> {
		let mut residual = Vec::new();
		let mut multi = BTreeSet::new();
		let mut matched = 0_usize;

		while let Some(arg) = iter.next() {
			let (name, inline) = match Token::from(arg.as_str()) {
				// Everything else is somebody else's problem.
				Token::Break => {
					residual.extend(iter.by_ref());
					break;
				},
				Token::Long(name, inline) => (name, inline),
				Token::Other => {
					unrecognized(arg.as_str(), ignore)?;
					continue;
				},
			};

			let Some((def, negated)) = resolve(&mut self.definitions, name, inline.is_none())
			else {
				unrecognized(arg.as_str(), ignore)?;
				continue;
			};

			// Find the value, if any.
			let next =
				if inline.is_some() || negated || def.kind() == Kind::Boolean { None }
				else { iter.next_if(|v| ! v.starts_with("--")) };
			let raw =
				if negated { Some("false") }
				else { inline.or(next.as_deref()) };

			// Multi-strings start over once per parse.
			let fresh = def.kind() == Kind::MultiString && multi.insert(def.name().to_owned());
			apply(def, raw, fresh)?;
			matched += 1;
		}

		// Multi-strings are validated as a whole.
		for name in &multi {
			if let Some(def) = self.definitions.get(name) {
				if let Some(value) = def.current() { def.validate(value)?; }
			}
		}

		debug!(matched, residual = residual.len(), "Parsed flags.");
		Ok(residual)
	}

	/// # Fail.
	///
	/// Terminate the process if exit-on-error is enabled, otherwise hand
	/// the error back.
	fn fail(&self, err: FlagError) -> FlagError {
		if self.exit_on_error {
			error!(flag = err.name(), kind = err.as_str(), "{err}");
			eprintln!("Error: {err}");
			std::process::exit(err.exit_code());
		}

		err
	}
}

/// ## Queries.
impl Flags {
	#[must_use]
	/// # Length.
	///
	/// Return the number of defined flags.
	pub fn len(&self) -> usize { self.definitions.len() }

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.definitions.is_empty() }

	#[must_use]
	/// # Is Parsed?
	pub const fn is_parsed(&self) -> bool { self.parsed }

	#[must_use]
	/// # Flag Definition.
	///
	/// Return the full definition for `name`, if any.
	pub fn flag(&self, name: &str) -> Option<&FlagDefinition> { self.definitions.get(name) }

	/// # Iterate Definitions.
	///
	/// Loop through all defined flags, ordered by name.
	pub fn iter(&self) -> impl Iterator<Item=&FlagDefinition> { self.definitions.values() }

	/// # Get Value.
	///
	/// Return the value received for `name` if it was set, otherwise its
	/// default. `None` means neither exists (or the flag was set to nothing,
	/// as with a valueless `--string` flag).
	///
	/// ## Errors
	///
	/// Returns [`FlagError::UnknownFlag`] if `name` was never defined. This
	/// never terminates the process.
	pub fn get(&self, name: &str) -> Result<Option<&Value>, FlagError> {
		self.definitions.get(name)
			.map(FlagDefinition::value)
			.ok_or_else(|| FlagError::UnknownFlag(name.to_owned()))
	}

	/// # Get Typed Value.
	///
	/// Same as [`Flags::get`], but returning the native value for kind `K`.
	/// A flag of some other kind yields `None`.
	///
	/// ## Errors
	///
	/// Returns [`FlagError::UnknownFlag`] if `name` was never defined.
	pub fn get_as<K: FlagKind>(&self, name: &str) -> Result<Option<&K::Value>, FlagError> {
		self.get(name).map(|v| v.and_then(K::peek))
	}

	#[must_use]
	/// # Is Set?
	///
	/// Returns `true` if `name` appeared on the command line. Unknown flags
	/// are never set.
	pub fn is_set(&self, name: &str) -> bool {
		self.definitions.get(name).is_some_and(FlagDefinition::is_set)
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Token Kinds.
///
/// This is the shape of a single raw argument.
enum Token<'a> {
	/// # End-of-Command Separator.
	Break,

	/// # Long Key.
	///
	/// The name sans dashes, and the value after the first `=`, if any.
	Long(&'a str, Option<&'a str>),

	/// # Anything Else.
	Other,
}

impl<'a> From<&'a str> for Token<'a> {
	fn from(raw: &'a str) -> Self {
		if raw == "--" { Self::Break }
		else if let Some(key) = raw.strip_prefix("--") {
			match key.split_once('=') {
				Some((k, v)) => Self::Long(k, Some(v)),
				None => Self::Long(key, None),
			}
		}
		else { Self::Other }
	}
}



/// # Resolve Flag.
///
/// Find the definition matching `name`. If there is no direct hit and the
/// key is `bare`, a `no` prefix negating a boolean flag is also checked, in
/// which case the second value is `true`.
fn resolve<'a>(defs: &'a mut BTreeMap<String, FlagDefinition>, name: &str, bare: bool)
-> Option<(&'a mut FlagDefinition, bool)> {
	if defs.contains_key(name) {
		return defs.get_mut(name).map(|d| (d, false));
	}

	if bare {
		let stem = name.strip_prefix("no")?;
		return defs.get_mut(stem)
			.filter(|d| d.kind() == Kind::Boolean)
			.map(|d| (d, true));
	}

	None
}

/// # Apply Value.
///
/// Coerce, validate, and assign. Multi-string validation is deferred until
/// the end of the parse.
fn apply(def: &mut FlagDefinition, raw: Option<&str>, fresh: bool) -> Result<(), FlagError> {
	let value = def.kind().coerce(def.name(), raw)
		.map_err(|e| if def.is_secret() { e.redacted() } else { e })?;

	match value {
		Some(Value::MultiString(v)) => { def.append(v, fresh); },
		Some(v) => {
			def.validate(&v)?;
			def.assign(Some(v));
		},
		None => { def.assign(None); },
	}

	trace!(flag = def.name(), value = %def.loggable(), "Matched flag.");
	Ok(())
}

/// # Unrecognized Argument.
///
/// ## Errors
///
/// Returns [`FlagError::UnknownFlag`] unless `ignore` is set.
fn unrecognized(raw: &str, ignore: bool) -> Result<(), FlagError> {
	if ignore {
		warn!(arg = raw, "Ignoring unrecognized argument.");
		Ok(())
	}
	else { Err(FlagError::UnknownFlag(raw.to_owned())) }
}



#[cfg(test)]
mod test {
	use super::*;

	/// # Helper: Test Registry.
	fn flags() -> Flags {
		let mut flags = Flags::new();
		flags.set_exit_on_error(false);
		flags
	}

	/// # Helper: Owned Strings.
	fn owned(src: &[&str]) -> Vec<String> {
		src.iter().map(|s| (*s).to_owned()).collect()
	}

	#[test]
	fn t_token() {
		assert_eq!(Token::from("--"), Token::Break);
		assert_eq!(Token::from("--one"), Token::Long("one", None));
		assert_eq!(Token::from("--one="), Token::Long("one", Some("")));
		assert_eq!(Token::from("--one=a=b"), Token::Long("one", Some("a=b")));
		assert_eq!(Token::from("---one"), Token::Long("-one", None));
		assert_eq!(Token::from("-o"), Token::Other);
		assert_eq!(Token::from("one"), Token::Other);
		assert_eq!(Token::from(""), Token::Other);
	}

	#[test]
	fn t_strings() {
		let mut flags = flags();
		flags.define_string("one", Some("111"), None).unwrap();
		flags.define_string("two", Some("222"), None).unwrap();
		flags.define_string("three", Some("333"), None).unwrap();
		assert_eq!(flags.parse(["--one", "--two=dos"], false), Ok(Vec::new()));

		assert_eq!(flags.get("one"), Ok(None));
		assert_eq!(flags.get_as::<Str>("two"), Ok(Some(&"dos".to_owned())));
		assert_eq!(flags.get_as::<Str>("three"), Ok(Some(&"333".to_owned())));

		assert!(flags.is_set("one"));
		assert!(flags.is_set("two"));
		assert!(! flags.is_set("three"));
	}

	#[test]
	fn t_strings_spaced() {
		let mut flags = flags();
		flags.define_string("one", Some("111"), None).unwrap();
		flags.define_string("two", Some("222"), None).unwrap();
		flags.parse(["--one", "aaa", "--two", "bbb"], false).unwrap();

		assert_eq!(flags.get_as::<Str>("one"), Ok(Some(&"aaa".to_owned())));
		assert_eq!(flags.get_as::<Str>("two"), Ok(Some(&"bbb".to_owned())));
		assert_eq!(flags.get("one").map(|v| v.and_then(Value::as_str)), Ok(Some("aaa")));
	}

	#[test]
	fn t_integers() {
		let mut flags = flags();
		flags.define_integer("one", Some(11), None).unwrap();
		flags.define_integer("two", Some(22), None).unwrap();
		flags.define_integer("three", Some(33), None).unwrap();
		flags.parse(["--one=111", "--three", "-3"], false).unwrap();

		assert_eq!(flags.get_as::<Int>("one"), Ok(Some(&111)));
		assert_eq!(flags.get_as::<Int>("two"), Ok(Some(&22)));
		assert_eq!(flags.get_as::<Int>("three"), Ok(Some(&-3)));
		assert!(! flags.is_set("two"));

		for bad in ["--one=xxx", "--one=1.123", "--one"] {
			flags.reset();
			flags.define_integer("one", Some(11), None).unwrap();
			assert!(
				matches!(flags.parse([bad], false), Err(FlagError::TypeCoercion { .. })),
				"Bug: {bad:?} should fail coercion.",
			);
		}
	}

	#[test]
	fn t_numbers() {
		let mut flags = flags();
		flags.define_number("one", Some(1.1), None).unwrap();
		flags.define_number("two", Some(2.2), None).unwrap();
		flags.parse(["--one=1.234"], false).unwrap();

		assert_eq!(flags.get_as::<Num>("one"), Ok(Some(&1.234)));
		assert_eq!(flags.get_as::<Num>("two"), Ok(Some(&2.2)));

		// The two-token form is the same thing.
		flags.parse(["--one", "1.234", "--two", "-0.5"], false).unwrap();
		assert_eq!(flags.get_as::<Num>("one"), Ok(Some(&1.234)));
		assert_eq!(flags.get_as::<Num>("two"), Ok(Some(&-0.5)));

		flags.reset();
		flags.define_number("one", Some(1.1), None).unwrap();
		assert!(matches!(
			flags.parse(["--one=xxx"], false),
			Err(FlagError::TypeCoercion { kind: Kind::Number, .. }),
		));
	}

	#[test]
	fn t_booleans() {
		let mut flags = flags();
		flags.define_boolean("a", None, None).unwrap();
		flags.define_boolean("b", Some(false), None).unwrap();
		flags.define_boolean("c", None, None).unwrap().set_default(false);
		flags.define_boolean("d", Some(false), None).unwrap();
		flags.define_boolean("e", None, None).unwrap().set_default(true);
		flags.define_boolean("f", Some(true), None).unwrap();
		flags.define_boolean("g", Some(true), None).unwrap();
		flags.define_boolean("h", Some(true), None).unwrap();
		flags.define_boolean("i", None, None).unwrap();

		flags.parse(
			["--a", "--b=true", "--c=t", "--d=1", "--noe", "--f=false", "--g=0", "--h=f"],
			false,
		).unwrap();

		for k in ["a", "b", "c", "d"] {
			assert_eq!(flags.get_as::<Bool>(k), Ok(Some(&true)), "Bug: {k} should be true.");
		}
		for k in ["e", "f", "g", "h", "i"] {
			assert_eq!(flags.get_as::<Bool>(k), Ok(Some(&false)), "Bug: {k} should be false.");
		}
		assert!(! flags.is_set("i"));

		flags.reset();
		flags.define_boolean("a", Some(false), None).unwrap();
		assert!(flags.parse(["--a=xxx"], false).is_err());
	}

	#[test]
	fn t_booleans_no_consume() {
		let mut flags = flags();
		flags.define_boolean("a", None, None).unwrap();

		// The bare boolean must not gobble up "false".
		assert_eq!(
			flags.parse(["--a", "false"], false),
			Err(FlagError::UnknownFlag("false".to_owned())),
		);
		assert_eq!(flags.get_as::<Bool>("a"), Ok(Some(&true)));

		flags.reset();
		flags.define_boolean("a", None, None).unwrap();
		assert_eq!(flags.parse(["--a", "false"], true), Ok(Vec::new()));
		assert_eq!(flags.get_as::<Bool>("a"), Ok(Some(&true)));
	}

	#[test]
	fn t_negation() {
		let mut flags = flags();
		flags.define_string("s", None, None).unwrap();
		flags.define_boolean("nob", Some(true), None).unwrap();
		flags.define_boolean("b", Some(true), None).unwrap();

		// Negation only works for booleans.
		assert_eq!(flags.parse(["--nos=x"], false), Err(FlagError::UnknownFlag("--nos=x".to_owned())));
		assert_eq!(flags.parse(["--nos"], false), Err(FlagError::UnknownFlag("--nos".to_owned())));

		// Direct hits win.
		flags.parse(["--nob"], false).unwrap();
		assert_eq!(flags.get_as::<Bool>("nob"), Ok(Some(&true)));
		assert_eq!(flags.get_as::<Bool>("b"), Ok(Some(&true)));
		assert!(! flags.is_set("b"));

		// Negation with a value is nonsense.
		flags.reset();
		flags.define_boolean("b", Some(true), None).unwrap();
		assert!(flags.parse(["--nob=true"], false).is_err());
		flags.parse(["--nob"], false).unwrap();
		assert_eq!(flags.get_as::<Bool>("b"), Ok(Some(&false)));
	}

	#[test]
	fn t_string_list() {
		let mut flags = flags();
		flags.define_string_list("one", Some(Vec::new()), None).unwrap();
		flags.define_string_list("two", Some(owned(&["x"])), None).unwrap();
		flags.parse(["--one=a,b,c,d"], false).unwrap();

		assert_eq!(flags.get_as::<List>("one"), Ok(Some(&owned(&["a", "b", "c", "d"]))));
		assert_eq!(flags.get_as::<List>("two"), Ok(Some(&owned(&["x"]))));

		// Last one wins.
		flags.parse(["--one=a,b", "--one", "c"], false).unwrap();
		assert_eq!(flags.get_as::<List>("one"), Ok(Some(&owned(&["c"]))));
	}

	#[test]
	fn t_multi_string() {
		let mut flags = flags();
		flags.define_multi_string("one", Some(Vec::new()), None).unwrap();
		flags.parse(["--one=a", "--one=b", "--one", "c", "--one=d"], false).unwrap();
		assert_eq!(flags.get_as::<Multi>("one"), Ok(Some(&owned(&["a", "b", "c", "d"]))));

		// A second parse starts over.
		flags.parse(["--one=e"], false).unwrap();
		assert_eq!(flags.get_as::<Multi>("one"), Ok(Some(&owned(&["e"]))));

		// Missing values are bad.
		assert!(matches!(
			flags.parse(["--one"], false),
			Err(FlagError::TypeCoercion { kind: Kind::MultiString, value: None, .. }),
		));
	}

	#[test]
	fn t_multi_string_validator() {
		let mut flags = flags();
		flags.define_multi_string("one", None, None)
			.unwrap()
			.set_validator(|v: &Vec<String>|
				if v.len() <= 2 { Ok(()) } else { Err(format!("Too many: {}", v.len())) }
			);

		assert_eq!(flags.parse(["--one=a", "--one=b"], false), Ok(Vec::new()));
		assert_eq!(
			flags.parse(["--one=a", "--one=b", "--one=c"], false),
			Err(FlagError::Validation {
				name: "one".to_owned(),
				message: "Too many: 3".to_owned(),
			}),
		);
	}

	#[test]
	fn t_unrecognized() {
		let mut flags = flags();
		assert_eq!(flags.parse(["--one"], false), Err(FlagError::UnknownFlag("--one".to_owned())));

		flags.reset();
		flags.define_string("two", None, None).unwrap();
		assert_eq!(
			flags.parse(["--one=1", "stray", "--two=2", "--", "--three"], true),
			Ok(owned(&["--three"])),
		);
		assert_eq!(flags.get_as::<Str>("two"), Ok(Some(&"2".to_owned())));

		// Strays are a problem when not ignoring.
		assert_eq!(flags.parse(["stray"], false), Err(FlagError::UnknownFlag("stray".to_owned())));
	}

	#[test]
	fn t_duplicates() {
		let mut flags = flags();
		flags.define_string("one", Some(""), None).unwrap();
		assert!(matches!(
			flags.define_string("one", Some(""), None),
			Err(FlagError::Duplicate(_)),
		));
		assert!(matches!(
			flags.define_boolean("one", None, None),
			Err(FlagError::Duplicate(_)),
		));
		assert_eq!(flags.len(), 1);
	}

	#[test]
	fn t_define_after_parse() {
		let mut flags = flags();
		assert!(! flags.is_parsed());
		assert_eq!(flags.parse(Vec::<String>::new(), false), Ok(Vec::new()));
		assert!(flags.is_parsed());
		assert!(matches!(
			flags.define_string("one", Some(""), None),
			Err(FlagError::DefineAfterParse(_)),
		));

		// Reset fixes it.
		flags.reset();
		assert!(! flags.is_parsed());
		assert!(flags.define_string("one", Some(""), None).is_ok());
	}

	#[test]
	fn t_validators() {
		fn setup(flags: &mut Flags) {
			flags.reset();
			flags.define_string("one", None, None)
				.unwrap()
				.set_validator(|v: &String|
					if v.starts_with("xxx") { Ok(()) } else { Err("Bad Input") }
				);
		}

		let mut flags = flags();
		setup(&mut flags);
		assert!(flags.parse(["--one=xxxyyy"], false).is_ok());

		setup(&mut flags);
		assert_eq!(
			flags.parse(["--one=yyyxxx"], false),
			Err(FlagError::Validation {
				name: "one".to_owned(),
				message: "Bad Input".to_owned(),
			}),
		);
		assert!(! flags.is_set("one"));
	}

	#[test]
	fn t_break() {
		let mut flags = flags();
		flags.define_string("one", Some(""), None).unwrap();
		flags.define_string("two", Some(""), None).unwrap();

		assert_eq!(
			flags.parse(["--one=2", "--two=3", "--", "something", "else"], false),
			Ok(owned(&["something", "else"])),
		);
		assert_eq!(flags.parse(["--one=2", "--two=3", "--"], false), Ok(Vec::new()));
		assert_eq!(flags.parse(["--one=2", "--two=3"], false), Ok(Vec::new()));

		// Nothing after the break is parsed.
		assert_eq!(
			flags.parse(["--one=4", "--", "--two=5", "--", "--nope"], false),
			Ok(owned(&["--two=5", "--", "--nope"])),
		);
		assert_eq!(flags.get_as::<Str>("two"), Ok(Some(&"3".to_owned())));

		// A two-token value cannot be a break.
		assert_eq!(flags.parse(["--one", "--", "x"], false), Ok(owned(&["x"])));
		assert_eq!(flags.get("one"), Ok(None));
	}

	#[test]
	fn t_partial() {
		let mut flags = flags();
		flags.define_integer("one", None, None).unwrap();
		flags.define_integer("two", None, None).unwrap();

		// Earlier values stick around.
		assert!(flags.parse(["--one=1", "--two=x"], false).is_err());
		assert_eq!(flags.get_as::<Int>("one"), Ok(Some(&1)));
		assert!(! flags.is_set("two"));
	}

	#[test]
	fn t_lookups() {
		let mut flags = flags();
		flags.define_integer("one", Some(1), Some("Number one."))
			.unwrap()
			.set_secret(true);
		flags.define_integer("two", Some(2), None).unwrap();
		flags.parse(["--one=11"], false).unwrap();

		assert!(flags.is_set("one"));
		assert!(! flags.is_set("two"));
		assert!(! flags.is_set("three"));
		assert_eq!(flags.get("three"), Err(FlagError::UnknownFlag("three".to_owned())));
		assert_eq!(flags.get_as::<Str>("one"), Ok(None));

		let def = flags.flag("one").expect("Missing definition.");
		assert_eq!(def.description(), Some("Number one."));
		assert!(def.is_secret());
		assert_eq!(def.default(), Some(&Value::Integer(1)));
		assert_eq!(def.current(), Some(&Value::Integer(11)));

		let names: Vec<&str> = flags.iter().map(FlagDefinition::name).collect();
		assert_eq!(names, ["one", "two"]);
		assert!(! flags.is_empty());
	}

	#[test]
	fn t_exit_on_error() {
		let mut flags = Flags::new();
		assert!(flags.exit_on_error(), "Exit-on-error should be the default.");
		flags.set_exit_on_error(false);
		assert!(! flags.exit_on_error());

		// Reset doesn't touch it.
		flags.reset();
		assert!(! flags.exit_on_error());
	}

	#[test]
	fn t_secret_redacted() {
		let mut flags = flags();
		flags.define_integer("pin", None, None).unwrap().set_secret(true);
		flags.define_integer("num", None, None).unwrap();

		let err = flags.parse(["--pin=hunter2"], false)
			.expect_err("The pin should not coerce.");
		assert!(! err.to_string().contains("hunter2"), "Secret leaked: {err}");
		assert_eq!(
			err,
			FlagError::TypeCoercion {
				name: "pin".to_owned(),
				kind: Kind::Integer,
				value: Some("***".to_owned()),
			},
		);

		// Non-secrets are left alone.
		let err = flags.parse(["--num=hunter2"], false)
			.expect_err("The num should not coerce.");
		assert!(err.to_string().contains("hunter2"), "Value missing: {err}");
	}

	#[test]
	/// # Exit-on-Error Subprocess.
	///
	/// This only does anything when spawned by `t_exit_on_error_status`.
	fn t_exit_on_error_child() {
		if std::env::var_os("FLAGSTAFF_EXIT_CHILD").is_none() { return; }

		let mut flags = Flags::new();
		flags.define_integer("times", Some(1), None).unwrap().set_secret(true);
		let _res = flags.parse(["--times=x"], false);

		// Unreachable if the process exited.
		std::process::exit(0);
	}

	#[test]
	fn t_exit_on_error_status() {
		let out = std::process::Command::new(std::env::current_exe().expect("Missing test binary."))
			.args(["--exact", "flags::test::t_exit_on_error_child", "--nocapture", "--test-threads=1"])
			.env("FLAGSTAFF_EXIT_CHILD", "1")
			.output()
			.expect("Unable to run child process.");

		assert_eq!(out.status.code(), Some(1), "The child should have exited with 1.");

		let stderr = String::from_utf8_lossy(&out.stderr);
		let line = stderr.lines()
			.find(|l| l.starts_with("Error:"))
			.expect("Missing error line.");
		assert_eq!(line, "Error: Invalid integer value for --times: ***");
	}
}
