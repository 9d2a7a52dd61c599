//! MCP tool handlers for the personal assistant.
//!
//! Every tool mirrors one entry of the function table. Handlers serialize
//! their typed parameters back to JSON and route them through the
//! [`Dispatcher`], so MCP calls get exactly the validation an AI
//! function call gets.

use crate::services::OperationResult;
use crate::tools::args::*;
use crate::tools::Dispatcher;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// MCP server exposing the contact and note operations as tools.
#[derive(Clone)]
pub struct AssistantMcpServer {
    // Façade calls never overlap; the lock serializes them.
    dispatcher: Arc<Mutex<Dispatcher>>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for AssistantMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "personal-assistant".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Personal assistant - manages contacts (names, phones, birthdays) and tagged notes stored in local JSON files.".into()),
        }
    }
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// Render a result record; failures set the tool error flag.
fn to_tool_result(result: &OperationResult<Value>) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(result).map_err(to_mcp_error)?;
    if result.is_success() {
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        Ok(CallToolResult::error(vec![Content::text(text)]))
    }
}

#[tool_router]
impl AssistantMcpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(Mutex::new(dispatcher)),
            tool_router: Self::tool_router(),
        }
    }

    /// Dispatch one named call under the server lock.
    pub async fn call_function(&self, function: &str, arguments: Value) -> OperationResult<Value> {
        debug!("MCP tool call: {}", function);
        self.dispatcher.lock().await.dispatch(function, arguments)
    }

    async fn route<T: Serialize>(
        &self,
        function: &str,
        params: T,
    ) -> Result<CallToolResult, McpError> {
        let arguments = serde_json::to_value(params).map_err(to_mcp_error)?;
        let result = self.call_function(function, arguments).await;
        to_tool_result(&result)
    }

    #[tool(description = "Add a new contact. Name is required, phones can be multiple")]
    async fn add_contact(
        &self,
        params: Parameters<AddContactArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("add_contact", params.0).await
    }

    #[tool(description = "Search for contacts by name or phone number")]
    async fn search_contacts(
        &self,
        params: Parameters<QueryArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("search_contacts", params.0).await
    }

    #[tool(description = "List all contacts")]
    async fn show_contacts(&self) -> Result<CallToolResult, McpError> {
        self.route("show_contacts", NoArgs::default()).await
    }

    #[tool(
        description = "Edit an existing contact (add/remove/change phone, set/remove birthday)"
    )]
    async fn edit_contact(
        &self,
        params: Parameters<EditContactArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("edit_contact", params.0).await
    }

    #[tool(description = "Delete a contact")]
    async fn delete_contact(
        &self,
        params: Parameters<NameArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("delete_contact", params.0).await
    }

    #[tool(description = "View detailed information about a specific contact")]
    async fn view_contact_details(
        &self,
        params: Parameters<NameArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("view_contact_details", params.0).await
    }

    #[tool(
        description = "Get contacts with upcoming birthdays. Weekend birthdays are congratulated on the following Monday"
    )]
    async fn get_upcoming_birthdays(
        &self,
        params: Parameters<UpcomingBirthdaysArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("get_upcoming_birthdays", params.0).await
    }

    #[tool(description = "Get statistics about contacts and notes")]
    async fn get_statistics(&self) -> Result<CallToolResult, McpError> {
        self.route("get_statistics", NoArgs::default()).await
    }

    #[tool(description = "Add a phone number to an existing contact")]
    async fn add_phone(&self, params: Parameters<AddPhoneArgs>) -> Result<CallToolResult, McpError> {
        self.route("add_phone", params.0).await
    }

    #[tool(description = "Set or replace the birthday of an existing contact")]
    async fn add_birthday(
        &self,
        params: Parameters<AddBirthdayArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("add_birthday", params.0).await
    }

    #[tool(description = "Add a new note with optional tags")]
    async fn add_note(&self, params: Parameters<AddNoteArgs>) -> Result<CallToolResult, McpError> {
        self.route("add_note", params.0).await
    }

    #[tool(description = "Search for notes by title, content, or tags")]
    async fn search_notes(&self, params: Parameters<QueryArgs>) -> Result<CallToolResult, McpError> {
        self.route("search_notes", params.0).await
    }

    #[tool(description = "List all notes")]
    async fn show_notes(&self) -> Result<CallToolResult, McpError> {
        self.route("show_notes", NoArgs::default()).await
    }

    #[tool(description = "Edit an existing note (title, content, tags)")]
    async fn edit_note(&self, params: Parameters<EditNoteArgs>) -> Result<CallToolResult, McpError> {
        self.route("edit_note", params.0).await
    }

    #[tool(description = "Delete a note")]
    async fn delete_note(&self, params: Parameters<NoteIdArgs>) -> Result<CallToolResult, McpError> {
        self.route("delete_note", params.0).await
    }

    #[tool(description = "View detailed information about a specific note")]
    async fn view_note_details(
        &self,
        params: Parameters<NoteIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("view_note_details", params.0).await
    }

    #[tool(description = "Search for notes by specific tag")]
    async fn search_notes_by_tag(
        &self,
        params: Parameters<TagArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.route("search_notes_by_tag", params.0).await
    }

    #[tool(description = "Search across both contacts and notes simultaneously")]
    async fn global_search(&self, params: Parameters<QueryArgs>) -> Result<CallToolResult, McpError> {
        self.route("global_search", params.0).await
    }
}
