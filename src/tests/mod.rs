#[cfg(feature = "parse")]
mod command;
#[cfg(feature = "persist")]
mod counter;
