/*!
# Flagstaff: Errors

This is the obligatory error enum. Every failure the registry can produce
during definition, parsing, or lookup ends up here.
*/

use crate::Kind;
use thiserror::Error;



#[derive(Debug, Clone, Eq, PartialEq, Error)]
/// # Error!
pub enum FlagError {
	/// # Duplicate Definition.
	///
	/// A flag with this name has already been defined.
	#[error("Duplicate flag: --{0}")]
	Duplicate(String),

	/// # Define After Parse.
	///
	/// Flags cannot be added once the registry has been parsed (until it is
	/// reset).
	#[error("Flags cannot be defined after parsing: --{0}")]
	DefineAfterParse(String),

	/// # Unknown Flag.
	///
	/// The token (or name, for lookups) does not correspond to any defined
	/// flag.
	#[error("Unrecognized flag: {0}")]
	UnknownFlag(String),

	/// # Type Coercion.
	///
	/// The raw text could not be converted into the flag's declared type.
	/// The value is `None` when it was missing altogether.
	#[error("Invalid {kind} value for --{name}: {}", .value.as_deref().unwrap_or("(missing)"))]
	TypeCoercion {
		/// # Flag Name.
		name: String,
		/// # Expected Kind.
		kind: Kind,
		/// # Raw Value.
		value: Option<String>,
	},

	/// # Validation.
	///
	/// The flag's validator rejected the coerced value.
	#[error("Invalid value for --{name}: {message}")]
	Validation {
		/// # Flag Name.
		name: String,
		/// # Validator Message.
		message: String,
	},
}

impl FlagError {
	#[must_use]
	/// # Exit Code.
	///
	/// The status a process should exit with when terminating because of
	/// this error.
	pub const fn exit_code(&self) -> i32 { 1 }

	#[must_use]
	/// # Name.
	///
	/// Return the flag name (or raw token, for unrecognized input) this
	/// error concerns.
	pub fn name(&self) -> &str {
		match self {
			Self::Duplicate(s)
				| Self::DefineAfterParse(s)
				| Self::UnknownFlag(s)
				| Self::TypeCoercion { name: s, .. }
				| Self::Validation { name: s, .. } => s,
		}
	}

	#[must_use]
	/// # As String Slice.
	///
	/// A generic description of the error kind, without any of the
	/// particulars.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Duplicate(_) => "Duplicate flag.",
			Self::DefineAfterParse(_) => "Flag defined after parsing.",
			Self::UnknownFlag(_) => "Unrecognized flag.",
			Self::TypeCoercion { .. } => "Invalid flag value type.",
			Self::Validation { .. } => "Invalid flag value.",
		}
	}

	#[must_use]
	/// # Redacted.
	///
	/// Mask the raw value, if any, so the error is safe to print for
	/// secret flags.
	pub(crate) fn redacted(self) -> Self {
		match self {
			Self::TypeCoercion { name, kind, value: Some(_) } => Self::TypeCoercion {
				name,
				kind,
				value: Some("***".to_owned()),
			},
			e => e,
		}
	}
}
