/*!
# Flagstaff: Flag Definitions
*/

use crate::{
	FlagError,
	FlagKind,
	Kind,
	Value,
};
use std::{
	fmt,
	marker::PhantomData,
	ops::Deref,
};



/// # Boxed Validator.
///
/// Validators are type-erased once stored; the typed wrapper is built by
/// [`Flag::set_validator`].
type Validator = Box<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;



/// # Flag Definition.
///
/// This holds everything the registry knows about a single named flag: its
/// kind, default, optional description and validator, and whatever value
/// (if any) was received from the command line.
///
/// Definitions are owned by [`Flags`](crate::Flags); use
/// [`Flags::flag`](crate::Flags::flag) or [`Flags::iter`](crate::Flags::iter)
/// to look at them.
pub struct FlagDefinition {
	/// # Name (sans dashes).
	name: String,

	/// # Kind.
	kind: Kind,

	/// # Default Value.
	default: Option<Value>,

	/// # Description.
	description: Option<String>,

	/// # Validator.
	validator: Option<Validator>,

	/// # Current Value.
	current: Option<Value>,

	/// # Seen on the Command Line?
	is_set: bool,

	/// # Sensitive?
	secret: bool,
}

impl fmt::Debug for FlagDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FlagDefinition")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("default", &self.default)
			.field("description", &self.description)
			.field("validator", &self.validator.is_some())
			.field("current", &self.current)
			.field("is_set", &self.is_set)
			.field("secret", &self.secret)
			.finish()
	}
}

impl FlagDefinition {
	/// # New.
	pub(crate) fn new(
		name: String,
		kind: Kind,
		default: Option<Value>,
		description: Option<String>,
	) -> Self {
		Self {
			name,
			kind,
			default,
			description,
			validator: None,
			current: None,
			is_set: false,
			secret: false,
		}
	}

	#[must_use]
	/// # Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Kind.
	pub const fn kind(&self) -> Kind { self.kind }

	#[must_use]
	/// # Default Value.
	pub const fn default(&self) -> Option<&Value> { self.default.as_ref() }

	#[must_use]
	/// # Description.
	pub fn description(&self) -> Option<&str> { self.description.as_deref() }

	#[must_use]
	/// # Current Value.
	///
	/// This is the value received from the command line, if any. Note that a
	/// valueless string flag (`--name`) is set, but has no current value.
	pub const fn current(&self) -> Option<&Value> { self.current.as_ref() }

	#[must_use]
	/// # Is Set?
	///
	/// Returns `true` if the flag appeared on the command line.
	pub const fn is_set(&self) -> bool { self.is_set }

	#[must_use]
	/// # Is Secret?
	///
	/// This is purely informational; consumers may use it to keep values
	/// out of logs and the like.
	pub const fn is_secret(&self) -> bool { self.secret }

	#[must_use]
	/// # Effective Value.
	///
	/// The current value if the flag was set, otherwise the default.
	pub const fn value(&self) -> Option<&Value> {
		if self.is_set { self.current.as_ref() }
		else { self.default.as_ref() }
	}

	/// # Validate.
	///
	/// Run the validator, if any, against `value`.
	///
	/// ## Errors
	///
	/// Returns [`FlagError::Validation`] if the value is rejected.
	pub(crate) fn validate(&self, value: &Value) -> Result<(), FlagError> {
		match self.validator.as_ref() {
			Some(cb) => cb(value).map_err(|message| FlagError::Validation {
				name: self.name.clone(),
				message,
			}),
			None => Ok(()),
		}
	}

	/// # Assign.
	///
	/// Record a value received from the command line.
	pub(crate) fn assign(&mut self, value: Option<Value>) {
		self.current = value;
		self.is_set = true;
	}

	/// # Append.
	///
	/// Push a multi-string value, starting over if `fresh`.
	pub(crate) fn append(&mut self, mut value: Vec<String>, fresh: bool) {
		if ! fresh {
			if let Some(Value::MultiString(old)) = self.current.take() {
				value.splice(0..0, old);
			}
		}
		self.assign(Some(Value::MultiString(value)));
	}

	/// # Loggable Value.
	///
	/// The effective value, formatted for logging, with secrets redacted.
	pub(crate) fn loggable(&self) -> String {
		if self.secret { "***".to_owned() }
		else {
			self.value().map_or_else(|| "null".to_owned(), ToString::to_string)
		}
	}
}



/// # Flag Builder.
///
/// This is returned by [`Flags::define`](crate::Flags::define) and friends,
/// and can be used to further configure the freshly-defined flag. Each
/// setter consumes and returns the builder so calls can be chained.
///
/// The builder holds a mutable borrow of the registry, so it is necessarily
/// dropped before parsing can begin.
///
/// ## Examples
///
/// ```
/// use flagstaff::Flags;
///
/// let mut flags = Flags::new();
/// flags.set_exit_on_error(false);
/// flags.define_string("name", None, Some("Who to greet."))
///     .unwrap()
///     .set_default("World")
///     .set_validator(|v: &String| {
///         if v.is_empty() { Err("The name cannot be empty.") }
///         else { Ok(()) }
///     });
///
/// assert!(flags.parse(["--name="], false).is_err());
/// ```
pub struct Flag<'a, K: FlagKind> {
	/// # Definition.
	def: &'a mut FlagDefinition,

	/// # Kind.
	kind: PhantomData<K>,
}

impl<K: FlagKind> Deref for Flag<'_, K> {
	type Target = FlagDefinition;
	#[inline]
	fn deref(&self) -> &Self::Target { self.def }
}

impl<K: FlagKind> fmt::Debug for Flag<'_, K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Flag").field(&self.def).finish()
	}
}

impl<'a, K: FlagKind + 'static> Flag<'a, K> {
	/// # New.
	pub(crate) fn new(def: &'a mut FlagDefinition) -> Self {
		Self { def, kind: PhantomData }
	}

	/// # Set Default.
	///
	/// Replace the default value.
	pub fn set_default<V: Into<K::Value>>(mut self, value: V) -> Self {
		self.def.default = Some(K::wrap(value.into()));
		self
	}

	/// # Set Validator.
	///
	/// Add a callback to vet values received from the command line. It is
	/// called once per occurrence (or once with the merged list for
	/// multi-string flags); defaults are never validated.
	///
	/// Returning an error aborts the parse with a
	/// [`FlagError::Validation`] carrying the error's message.
	pub fn set_validator<F, E>(mut self, cb: F) -> Self
	where
		F: Fn(&K::Value) -> Result<(), E> + Send + Sync + 'static,
		E: fmt::Display + 'static,
	{
		self.def.validator = Some(Box::new(move |value: &Value|
			K::peek(value).map_or(Ok(()), |v| cb(v).map_err(|e| e.to_string()))
		));
		self
	}

	/// # Set Description.
	pub fn set_description<S: Into<String>>(mut self, description: S) -> Self {
		self.def.description = Some(description.into());
		self
	}

	/// # Set Secret.
	///
	/// Mark (or unmark) the flag as sensitive.
	pub fn set_secret(mut self, secret: bool) -> Self {
		self.def.secret = secret;
		self
	}
}
