//! Storage for the running total of successful rolls.
//!
//! The command handler only ever loads the total and increments it; where the number lives is up to the
//! [`CounterStore`] it is given.

/// A monotonically increasing count of successful rolls.
pub trait CounterStore {
	/// Gets the current total.
	#[must_use]
	fn load(&self) -> u64;

	/// Adds one to the total, returning the new total.
	fn increment(&mut self) -> u64;
}

impl<C: CounterStore + ?Sized> CounterStore for &mut C {
	#[inline]
	fn load(&self) -> u64 {
		(**self).load()
	}

	#[inline]
	fn increment(&mut self) -> u64 {
		(**self).increment()
	}
}

/// Counter kept in memory only.
///
/// # Examples
/// ```
/// use rolld::counter::{CounterStore, MemoryCounter};
///
/// let mut counter = MemoryCounter::new(41);
/// assert_eq!(counter.increment(), 42);
/// assert_eq!(counter.load(), 42);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCounter(u64);

impl MemoryCounter {
	/// Creates a counter starting at the given total.
	#[must_use]
	#[inline]
	pub const fn new(total: u64) -> Self {
		Self(total)
	}
}

impl CounterStore for MemoryCounter {
	#[inline]
	fn load(&self) -> u64 {
		self.0
	}

	#[inline]
	fn increment(&mut self) -> u64 {
		self.0 = self.0.saturating_add(1);
		self.0
	}
}

#[cfg(feature = "persist")]
pub use self::file::{Error, JsonFileCounter};

#[cfg(feature = "persist")]
mod file {
	use std::{
		fs, io,
		path::{Path, PathBuf},
	};

	use serde::{Deserialize, Serialize};
	use tracing::{debug, warn};

	use super::CounterStore;

	/// On-disk layout of the counter file
	#[derive(Debug, Serialize, Deserialize)]
	struct CounterFile {
		/// Number of successful rolls so far
		total_rolls: u64,
	}

	/// Counter persisted as a small JSON object (`{"total_rolls": 42}`). Requires the `persist` feature.
	///
	/// The file is read once when opened and rewritten after every increment. Failing to read it starts the count
	/// at zero; failing to write it is logged and otherwise ignored, so a broken disk never stops a roll.
	#[derive(Debug, Clone)]
	pub struct JsonFileCounter {
		/// Location of the counter file
		path: PathBuf,

		/// Total as of the last load or increment
		total: u64,
	}

	impl JsonFileCounter {
		/// Opens the counter stored at `path`, starting from zero if it is missing or unreadable.
		#[must_use]
		pub fn open(path: impl Into<PathBuf>) -> Self {
			let path = path.into();
			let total = match read(&path) {
				Ok(total) => total,
				Err(Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
					debug!(path = %path.display(), "no counter file yet, starting from zero");
					0
				}
				Err(err) => {
					warn!(path = %path.display(), error = %err, "unable to read counter file, starting from zero");
					0
				}
			};

			Self { path, total }
		}

		/// Gets the location of the counter file.
		#[must_use]
		#[inline]
		pub fn path(&self) -> &Path {
			&self.path
		}

		/// Writes the current total to the counter file.
		///
		/// # Errors
		/// If the total can't be serialized or the file can't be written, an error variant is returned.
		pub fn save(&self) -> Result<(), Error> {
			let json = serde_json::to_string(&CounterFile {
				total_rolls: self.total,
			})?;
			fs::write(&self.path, json)?;
			Ok(())
		}
	}

	impl CounterStore for JsonFileCounter {
		#[inline]
		fn load(&self) -> u64 {
			self.total
		}

		fn increment(&mut self) -> u64 {
			self.total = self.total.saturating_add(1);
			if let Err(err) = self.save() {
				warn!(path = %self.path.display(), error = %err, "unable to save counter file");
			}
			self.total
		}
	}

	/// Reads the total from a counter file.
	fn read(path: &Path) -> Result<u64, Error> {
		let contents = fs::read_to_string(path)?;
		let file: CounterFile = serde_json::from_str(&contents)?;
		Ok(file.total_rolls)
	}

	/// An error resulting from reading or writing a counter file
	#[derive(thiserror::Error, Debug)]
	#[non_exhaustive]
	pub enum Error {
		/// The file couldn't be read or written.
		#[error("counter file I/O: {0}")]
		Io(#[from] io::Error),

		/// The file contents aren't a valid counter object.
		#[error("counter file format: {0}")]
		Json(#[from] serde_json::Error),
	}
}
