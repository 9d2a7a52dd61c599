//! Function-calling surface for AI callers.
//!
//! - **definitions**: the static function table and its JSON schemas
//! - **args**: typed arguments for each function
//! - **dispatcher**: validates a named call and runs it on the façade

pub mod args;
pub mod definitions;
pub mod dispatcher;

pub use definitions::{find, function_schemas, FunctionSpec, ParamKind, ParamSpec, FUNCTIONS};
pub use dispatcher::{Dispatcher, FunctionCall};
