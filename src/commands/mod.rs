//! Drush command composition and sequential execution
//!
//! A [`stack::DrushStack`] owns the executable path, an optional site alias and an
//! [`arguments::ArgumentAccumulator`]. Every composed command gets the alias first,
//! then the subcommand, `-y` unless disabled, the global options in the order
//! they were set and finally whatever next-command arguments were queued since
//! the previous composition.
//!
//! Composed lines land in an [`queue::ExecutionQueue`], which runs them one after
//! another and optionally stops at the first failure.

pub mod arguments;
pub mod queue;
pub mod stack;
pub mod version;
