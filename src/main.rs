//! Terminal stand-in for the chat bot: explicit commands from the arguments, chat messages from stdin.

use std::{
	env,
	io::{self, BufRead},
	process::ExitCode,
};

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::Parser;
use rolld::{
	command::DiceCommand,
	counter::{CounterStore, JsonFileCounter},
	dice::{roller::FastRand, Limits},
	parse::{normalize, notation},
	Rejection,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Counter file used when `ROLLD_COUNTER_FILE` isn't set
const DEFAULT_COUNTER_FILE: &str = "roll_count.json";

fn main() -> ExitCode {
	// Loaded before the subscriber so RUST_LOG can come from it, reported once logging is up
	let dotenv = dotenvy::dotenv();

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rolld=info".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
		.init();

	match dotenv {
		Ok(path) => debug!(path = %path.display(), "loaded .env"),
		Err(err) => {
			if let Some(err) = dotenv_problem(err) {
				warn!(error = %err, "unable to load .env");
			}
		}
	}

	let counter_path = env::var("ROLLD_COUNTER_FILE").unwrap_or_else(|_| DEFAULT_COUNTER_FILE.to_owned());
	let counter = JsonFileCounter::open(counter_path);
	let limits = limits_from_env();
	info!(path = %counter.path().display(), total = counter.load(), ?limits, "dice roller ready");

	let mut command = DiceCommand::new(FastRand::default(), counter).with_limits(limits);

	let args = env::args();
	if args.len() > 1 {
		// Obtain the notation by combining all args passed to the executable, so that it can be left unquoted
		// even with spaces. The first argument is ignored since it is typically the name of the executable itself.
		let input = args.skip(1).collect::<Vec<String>>().join(" ");
		return match command.run(&input) {
			Ok(message) => {
				println!("{message}");
				ExitCode::SUCCESS
			}
			Err(rejection) => {
				report_rejection(&input, &rejection);
				ExitCode::FAILURE
			}
		};
	}

	// Each line of stdin is a chat message, only rolled when it is nothing but notation
	for line in io::stdin().lock().lines() {
		let line = match line {
			Ok(line) => line,
			Err(err) => {
				warn!(error = %err, "unable to read message");
				return ExitCode::FAILURE;
			}
		};

		match command.handle_message(&line) {
			Some(Ok(message)) => println!("{message}"),
			Some(Err(rejection)) => println!("{}", rejection.advisory()),
			None => {}
		}
	}

	info!(presence = %command.presence(), "done");
	ExitCode::SUCCESS
}

/// Filters out the one `.env` error that isn't a problem: a missing file, since everything has a default.
fn dotenv_problem(err: dotenvy::Error) -> Option<dotenvy::Error> {
	(!err.not_found()).then_some(err)
}

/// Reads the limits from `ROLLD_MAX_DICE` and `ROLLD_MAX_SIDES`, falling back to the defaults.
fn limits_from_env() -> Limits {
	let defaults = Limits::default();
	Limits {
		max_count: env_u32("ROLLD_MAX_DICE").unwrap_or(defaults.max_count),
		max_sides: env_u32("ROLLD_MAX_SIDES").unwrap_or(defaults.max_sides),
	}
}

/// Reads an environment variable as a `u32`, warning about values that aren't one.
fn env_u32(key: &str) -> Option<u32> {
	let val = env::var(key).ok()?;
	match val.trim().parse() {
		Ok(parsed) => Some(parsed),
		Err(err) => {
			warn!(key, val = %val, error = %err, "ignoring invalid limit");
			None
		}
	}
}

/// Prints the advisory for a rejected command, along with a diagnostic pointing at the problem for unparseable input.
fn report_rejection(input: &str, rejection: &Rejection) {
	eprintln!("{}", rejection.advisory());
	if !matches!(rejection, Rejection::NoMatch) {
		return;
	}

	let normalized = normalize(input);
	let Err(errs) = notation().parse(normalized.as_str()).into_result() else {
		return;
	};
	for err in errs {
		let span = err.span().into_range();
		let printed = Report::build(ReportKind::Error, ("notation", span.clone()))
			.with_message("invalid dice notation")
			.with_label(
				Label::new(("notation", span))
					.with_message(err.to_string())
					.with_color(Color::Red),
			)
			.finish()
			.eprint(("notation", Source::from(normalized.as_str())));
		if let Err(err) = printed {
			warn!(error = %err, "unable to print diagnostic");
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io;

	use super::dotenv_problem;

	#[test]
	fn missing_dotenv_is_not_reported() {
		let missing = dotenvy::Error::Io(io::Error::from(io::ErrorKind::NotFound));
		assert!(dotenv_problem(missing).is_none());
	}

	#[test]
	fn malformed_dotenv_is_reported() {
		let malformed = dotenvy::Error::LineParse("ROLLD_MAX_DICE='100".to_owned(), 15);
		assert!(matches!(dotenv_problem(malformed), Some(dotenvy::Error::LineParse(..))));

		let unreadable = dotenvy::Error::Io(io::Error::from(io::ErrorKind::PermissionDenied));
		assert!(dotenv_problem(unreadable).is_some());
	}
}
