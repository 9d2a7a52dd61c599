//! Personal Assistant - contacts and notes behind one operations façade.
//!
//! Contacts (name, phones, birthday) and tagged notes are kept in two JSON
//! files. Every change goes through [`Operations`], which validates input,
//! writes the affected file atomically, and answers with a uniform
//! `{success, message, data?}` record. AI callers reach the façade through a
//! static function table and the [`tools::Dispatcher`]; the MCP server and the
//! `pa` CLI are thin layers over that dispatcher.
//!
//! # Architecture
//!
//! - **domain**: validated value objects (name, phone, birthday, tag, note id)
//! - **models**: `Contact`, `Note` and their containers
//! - **repositories**: JSON file persistence behind repository traits
//! - **services**: the operations façade
//! - **tools**: function table, typed arguments and dispatcher
//! - **server**: MCP server over stdio
//! - **config** / **error**: environment configuration and error types

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod tools;

pub use config::Config;
pub use domain::ValidationError;
pub use error::{ConfigError, DispatchError, OperationError, StorageError};
pub use models::{AddressBook, BirthdayReminder, Contact, Note, NoteStore};
pub use server::AssistantMcpServer;
pub use services::{ContactEdit, GlobalSearch, NoteEdit, OperationResult, Operations, Statistics};
pub use tools::{Dispatcher, FunctionCall};
