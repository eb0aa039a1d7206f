/*!
# Flagstaff: Demo

Run this with whatever arguments you like, e.g.:
cargo run --example flags -- --name Björk --times=2 --loud -- extra args
*/

use flagstaff::kind::{
	Bool,
	Int,
	Str,
};

fn main() {
	// Errors here print a message and exit, which is what we want.
	let rest = {
		let mut flags = flagstaff::global();
		flags.define_string("name", Some("World"), Some("Who to greet."))
			.unwrap()
			.set_validator(|v: &String| {
				if v.trim().is_empty() { Err("The name cannot be empty.") }
				else { Ok(()) }
			});
		flags.define_integer("times", Some(1), Some("Number of greetings."))
			.unwrap()
			.set_validator(|n: &i64| {
				if (1..=10).contains(n) { Ok(()) }
				else { Err("Pick a number between 1 and 10.") }
			});
		flags.define_boolean("loud", None, Some("Shout it."))
			.unwrap();
		flags.define_string("token", None, Some("A secret."))
			.unwrap()
			.set_secret(true);

		flags.parse_env(false).unwrap()
	};

	let flags = flagstaff::global();
	let name = flags.get_as::<Str>("name").ok().flatten().map_or("World", String::as_str);
	let times = flags.get_as::<Int>("times").ok().flatten().copied().unwrap_or(1);
	let loud = flags.get_as::<Bool>("loud").ok().flatten().copied().unwrap_or(false);

	for _ in 0..times {
		let line = format!("Hello, {name}!");
		if loud { println!("{}", line.to_uppercase()); }
		else { println!("{line}"); }
	}

	for def in flags.iter() {
		let value = if def.is_secret() { "***".to_owned() } else {
			def.value().map_or_else(|| "null".to_owned(), ToString::to_string)
		};
		println!("  --{} ({}): {value}{}", def.name(), def.kind(), if def.is_set() { "" } else { " [default]" });
	}

	if ! rest.is_empty() {
		println!("Extra: {}", rest.join(" "));
	}
}
