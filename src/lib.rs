/*!
# Flagstaff

This crate provides a small, typed command-line flag registry called
[`Flags`]. Flags are declared upfront by name — each with a kind, an
optional default, description, and validator — and then the argument list
is parsed against them in a single pass, leaving typed values to be looked
up by name.

It sits somewhere between the standard library's barebones
[`std::env::args_os`] and full-service crates like
[clap](https://crates.io/crates/clap): there are no subcommands, no help
screens, and no environment or config file handling. Just flags.



## Syntax

| Kind | Example | Notes |
| ---- | ------- | ----- |
| String | `--name=value`, `--name value` | A bare `--name` sets the flag to nothing. |
| Integer | `--num=-3` | Base-10 only. |
| Number | `--ratio=0.5` | |
| Boolean | `--yes`, `--noyes`, `--yes=f` | Accepts `true`/`false`/`t`/`f`/`1`/`0`, case-insensitively. |
| String List | `--list=a,b,c` | Each occurrence replaces the last. |
| Multi-String | `--add=a --add=b` | Each occurrence is appended. |

Parsing stops at the first `--`; everything after it is returned verbatim.



## Example

```
use flagstaff::{
    Flags,
    kind::{Bool, Int, Multi},
};

let mut flags = Flags::new();

// Return errors rather than terminating the process.
flags.set_exit_on_error(false);

flags.define_integer("threads", Some(1), Some("Number of threads."))
    .unwrap()
    .set_validator(|n: &i64| {
        if 0 < *n { Ok(()) }
        else { Err("Threads must be positive.") }
    });
flags.define_boolean("verbose", None, None).unwrap();
flags.define_multi_string("path", None, None).unwrap();

let rest = flags.parse(
    ["--threads", "4", "--path=/foo", "--path=/bar", "--", "--verbose"],
    false,
).unwrap();

assert_eq!(flags.get_as::<Int>("threads").unwrap(), Some(&4));
assert_eq!(flags.get_as::<Bool>("verbose").unwrap(), Some(&false));
assert_eq!(
    flags.get_as::<Multi>("path").unwrap().map(Vec::len),
    Some(2),
);
assert_eq!(rest, vec!["--verbose".to_owned()]);
```

A process-wide instance is also available via [`global`] for programs
that would rather not pass a registry around.
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]



mod error;
mod flag;
mod flags;
mod global;
pub mod kind;

pub use error::FlagError;
pub use flag::{
	Flag,
	FlagDefinition,
};
pub use flags::Flags;
pub use global::global;
pub use kind::{
	FlagKind,
	Kind,
	Value,
};
