//! ChefBot is a terminal chat client for a culinary assistant backed by an
//! OpenAI-compatible chat-completion endpoint.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the transcript store, its storage backends, the completion
//!   client, configuration, and the chat session that ties them together.
//! - [`api`] defines the wire payloads and the HTTP transport seam.
//! - [`ui`] renders turns to the terminal and runs the line-oriented chat loop.
//! - [`commands`] recognizes the words handled locally at the chat prompt.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
