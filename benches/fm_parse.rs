/*!
# Benchmark: `flagstaff::Flags`
*/

use brunch::{
	Bench,
	benches,
};
use flagstaff::Flags;

fn flags() -> Flags {
	let mut flags = Flags::new();
	flags.set_exit_on_error(false);
	flags.define_string("name", Some("World"), None).unwrap();
	flags.define_integer("threads", Some(1), None).unwrap();
	flags.define_boolean("verbose", None, None).unwrap();
	flags.define_string_list("ext", None, None).unwrap();
	flags.define_multi_string("path", None, None).unwrap();
	flags
}

const ARGS: [&str; 9] = [
	"--name=Björk",
	"--threads",
	"4",
	"--noverbose",
	"--ext=jpg,png,gif",
	"--path=/foo/bar",
	"--path=/bar/baz",
	"--",
	"--nope",
];

benches!(
	Bench::new("flagstaff::Flags::new()")
		.run(Flags::new),

	Bench::spacer(),

	Bench::new("flagstaff::Flags::parse(9)")
		.run_seeded_with(flags, |mut f| f.parse(ARGS, false).is_ok()),

	Bench::new("flagstaff::Flags::parse(--)")
		.run_seeded_with(flags, |mut f| f.parse(["--", "a", "b"], false).is_ok()),
);
