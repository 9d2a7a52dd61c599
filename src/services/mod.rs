//! Application service layer.
//!
//! The [`Operations`] façade is the only component that touches the
//! collections and their repositories. The function dispatcher, the MCP
//! server and the CLI all go through it, and every call comes back as an
//! [`OperationResult`].

mod contact_ops;
mod note_ops;
mod operations;
mod result;

pub use contact_ops::ContactEdit;
pub use note_ops::{GlobalSearch, NoteEdit};
pub use operations::{Operations, Statistics};
pub use result::OperationResult;
