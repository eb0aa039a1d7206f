/*!
# Flagstaff: Process-Wide Registry
*/

use crate::Flags;
use std::sync::{
	Mutex,
	MutexGuard,
	OnceLock,
	PoisonError,
};



/// # The Registry.
static FLAGS: OnceLock<Mutex<Flags>> = OnceLock::new();



/// # Process-Wide Registry.
///
/// Return a locked handle to the shared, process-wide [`Flags`] instance,
/// creating it on first use. It starts out empty with exit-on-error
/// enabled, and lives until the process ends; use [`Flags::reset`] to
/// start it over.
///
/// The lock is held for as long as the guard lives, so keep it short. A
/// poisoned lock is recovered rather than propagated.
///
/// Applications that would rather own their registry outright can simply
/// use [`Flags::new`] instead.
///
/// ## Examples
///
/// ```
/// {
///     let mut flags = flagstaff::global();
///     flags.define_boolean("verbose", None, None).unwrap();
///     flags.parse(["--verbose"], false).unwrap();
/// }
///
/// // Later, elsewhere…
/// assert!(flagstaff::global().is_set("verbose"));
/// ```
pub fn global() -> MutexGuard<'static, Flags> {
	FLAGS.get_or_init(|| Mutex::new(Flags::new()))
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
}
