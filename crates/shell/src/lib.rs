//! `bookstore-shell`
//!
//! **Responsibility:** the line-oriented interactive menu.
//!
//! The shell is a thin layer: it reads choices and field values, builds books
//! and purchase requests, calls the catalog service, and prints the outcome.
//! It is the single place where failures are rendered and swallowed.

pub mod menu;
pub mod prompt;
pub mod shell;

pub use menu::MenuChoice;
pub use prompt::ShellError;
pub use shell::Shell;
