use clap::Subcommand;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tokio::io::{self, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use uuid::Uuid;

use intervals_client::{ClientConfig, IntervalsClient};
use intervals_core::dates::parse_calendar_date;
use intervals_core::error::{ClientError, codes};
use intervals_core::event::{CreateEventRequest, KNOWN_CATEGORIES, UpdateEventRequest};
use intervals_core::normalize::strip_nulls;
use intervals_core::workout::CreateWorkoutRequest;

pub use intervals_client::DEFAULT_BASE_URL;

const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
const MCP_SERVER_NAME: &str = "intervals-mcp";

#[derive(Subcommand)]
pub enum McpCommands {
    /// Run the MCP server over stdio
    Serve,
    /// Check the configured credentials with a single profile read
    Verify,
}

/// Everything the runtime needs to talk to intervals.icu. Collected by the
/// binary from flags and environment; the runtime never reads env itself.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub athlete_id: String,
    pub api_key: String,
    pub base_url: String,
}

pub async fn run(config: RuntimeConfig, command: McpCommands) -> i32 {
    let server = McpServer::new(config);
    match command {
        McpCommands::Serve => match server.serve_stdio().await {
            Ok(()) => 0,
            Err(err) => {
                let payload = json!({
                    "error": "mcp_server_error",
                    "message": err,
                });
                eprintln!("{}", to_pretty_json(&payload));
                1
            }
        },
        McpCommands::Verify => server.run_verify().await,
    }
}

struct McpServer {
    config: RuntimeConfig,
    client: IntervalsClient,
    session_id: String,
}

impl McpServer {
    fn new(config: RuntimeConfig) -> Self {
        let client = IntervalsClient::new(ClientConfig {
            athlete_id: config.athlete_id.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        });
        Self {
            config,
            client,
            session_id: format!("stdio-{}", Uuid::now_v7()),
        }
    }

    async fn serve_stdio(&self) -> Result<(), String> {
        info!(
            session_id = %self.session_id,
            athlete_id = %self.client.athlete_id(),
            "serving MCP over stdio"
        );

        let stdin = io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = io::stdout();

        loop {
            let incoming = read_framed_json(&mut reader)
                .await
                .map_err(|e| format!("Failed to read MCP message: {e}"))?;
            let Some(incoming) = incoming else {
                break;
            };

            let responses = self.handle_incoming_message(incoming).await;
            for response in responses {
                write_framed_json(&mut stdout, &response)
                    .await
                    .map_err(|e| format!("Failed to write MCP response: {e}"))?;
            }
        }

        Ok(())
    }

    /// One profile read against the live API. Prints a small report and
    /// maps success to exit code 0, anything else to 1.
    async fn run_verify(&self) -> i32 {
        match self.client.get_athlete_profile().await {
            Ok(profile) => {
                let report = json!({
                    "status": "ok",
                    "base_url": self.config.base_url,
                    "checked_at": chrono::Utc::now().to_rfc3339(),
                    "athlete": {
                        "id": profile.id,
                        "name": profile.name,
                        "firstname": profile.firstname,
                        "lastname": profile.lastname,
                        "city": profile.city,
                        "country": profile.country,
                        "timezone": profile.timezone,
                    },
                });
                let report = strip_nulls(report).unwrap_or(Value::Null);
                println!("{}", to_pretty_json(&report));
                0
            }
            Err(err) => {
                let report = json!({
                    "status": "error",
                    "error": err.code(),
                    "message": err.to_string(),
                });
                eprintln!("{}", to_pretty_json(&report));
                1
            }
        }
    }

    async fn handle_incoming_message(&self, incoming: Value) -> Vec<Value> {
        let mut responses = Vec::new();

        if let Some(batch) = incoming.as_array() {
            if batch.is_empty() {
                responses.push(error_response(
                    Value::Null,
                    RpcError::invalid_request("Batch request must not be empty"),
                ));
                return responses;
            }
            for item in batch {
                if let Some(response) = self.handle_single_message(item.clone()).await {
                    responses.push(response);
                }
            }
            return responses;
        }

        if let Some(response) = self.handle_single_message(incoming).await {
            responses.push(response);
        }
        responses
    }

    async fn handle_single_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            let id = obj.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(
                id,
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            // Most likely a client response; this server issues no outbound requests.
            return None;
        };

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        if let Some(id) = obj.get("id").cloned() {
            let result = self.handle_request(method, params).await;
            Some(match result {
                Ok(payload) => success_response(id, payload),
                Err(err) => error_response(id, err),
            })
        } else {
            self.handle_notification(method, params).await;
            None
        }
    }

    async fn handle_notification(&self, method: &str, _params: Value) {
        if matches!(
            method,
            "notifications/initialized" | "notifications/cancelled"
        ) {
            return;
        }
        debug!(method, "ignoring unknown notification");
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize_payload()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list_payload()),
            "tools/call" => self.handle_tools_call(params).await,
            "resources/list" => Ok(json!({ "resources": [] })),
            "prompts/list" => Ok(json!({ "prompts": [] })),
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    fn initialize_payload(&self) -> Value {
        let instructions = format!(
            "All tools operate on athlete {}. Dates are YYYY-MM-DD; event timestamps are \
             athlete-local YYYY-MM-DDTHH:mm:ss with no zone suffix. Workout and WORKOUT-event \
             descriptions use the intervals.icu builder syntax. The calendar's past is locked: \
             intervals_event_create rejects past starts, and intervals_event_update / \
             intervals_event_delete only touch events that have not started yet.",
            self.client.athlete_id()
        );
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                },
                "resources": {
                    "listChanged": false
                },
                "prompts": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": MCP_SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": instructions
        })
    }

    fn tools_list_payload(&self) -> Value {
        let tools: Vec<Value> = tool_definitions()
            .into_iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema,
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("tools/call params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let args = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(RpcError::invalid_params(
                    "tools/call 'arguments' must be an object",
                ));
            }
        };

        match self.execute_tool(name, &args).await {
            Ok(result) => Ok(tool_success_response(result)),
            Err(err) => {
                debug!(tool = name, code = err.code, "tool call failed");
                Ok(tool_error_response(&err))
            }
        }
    }

    async fn execute_tool(&self, name: &str, args: &Map<String, Value>) -> Result<Value, ToolError> {
        match name {
            "intervals_athlete_get" => self.tool_athlete_get().await,
            "intervals_activities_list" => self.tool_activities_list(args).await,
            "intervals_activity_get" => self.tool_activity_get(args).await,
            "intervals_wellness_list" => self.tool_wellness_list(args).await,
            "intervals_workouts_list" => self.tool_workouts_list().await,
            "intervals_workout_create" => self.tool_workout_create(args).await,
            "intervals_events_list" => self.tool_events_list(args).await,
            "intervals_event_create" => self.tool_event_create(args).await,
            "intervals_event_update" => self.tool_event_update(args).await,
            "intervals_event_delete" => self.tool_event_delete(args).await,
            _ => Err(ToolError::new(
                "unknown_tool",
                format!("Unknown tool: {name}"),
            )),
        }
    }

    async fn tool_athlete_get(&self) -> Result<Value, ToolError> {
        let profile = self.client.get_athlete_profile().await?;
        to_result_value(&profile)
    }

    async fn tool_activities_list(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let (oldest, newest) = required_date_range(args)?;
        let activities = self.client.get_activities(&oldest, &newest).await?;
        to_result_value(&activities)
    }

    async fn tool_activity_get(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let id = required_string(args, "id")?;
        let activity = self.client.get_activity(&id).await?;
        to_result_value(&activity)
    }

    async fn tool_wellness_list(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let (oldest, newest) = required_date_range(args)?;
        let wellness = self.client.get_wellness(&oldest, &newest).await?;
        to_result_value(&wellness)
    }

    async fn tool_workouts_list(&self) -> Result<Value, ToolError> {
        let workouts = self.client.get_workouts().await?;
        to_result_value(&workouts)
    }

    async fn tool_workout_create(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        required_string(args, "name")?;
        let input: CreateWorkoutRequest = parse_input("workout", args.clone())?;
        let workout = self.client.create_workout(&input).await?;
        to_result_value(&workout)
    }

    async fn tool_events_list(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let (oldest, newest) = required_date_range(args)?;
        let events = self.client.get_events(&oldest, &newest).await?;
        to_result_value(&events)
    }

    async fn tool_event_create(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let input: CreateEventRequest = parse_input("event", args.clone())?;
        if let Err(err) = input.start() {
            return Err(ToolError::new(codes::VALIDATION_FAILED, err.to_string())
                .with_field("start_date_local"));
        }
        let event = self.client.create_event(&input).await?;
        to_result_value(&event)
    }

    async fn tool_event_update(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let id = required_i64(args, "id")?;
        // The id travels in the URL; the patch body carries only the changes.
        let mut patch_args = args.clone();
        patch_args.remove("id");
        let patch: UpdateEventRequest = parse_input("event patch", patch_args)?;
        if let Err(err) = patch.start() {
            return Err(ToolError::new(codes::VALIDATION_FAILED, err.to_string())
                .with_field("start_date_local"));
        }
        let event = self.client.update_event(id, &patch).await?;
        to_result_value(&event)
    }

    async fn tool_event_delete(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let id = required_i64(args, "id")?;
        let ack = self.client.delete_event(id).await?;
        to_result_value(&ack)
    }
}

#[derive(Debug)]
struct ToolDefinition {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
}

fn tool_definitions() -> Vec<ToolDefinition> {
    let category_doc = format!(
        "Calendar category. Known values: {}. New upstream values are accepted as-is.",
        KNOWN_CATEGORIES.join(", ")
    );
    vec![
        ToolDefinition {
            name: "intervals_athlete_get",
            description: "Profile of the configured athlete. Also the cheapest way to check that the credentials work.",
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_activities_list",
            description: "List recorded activities within a date range (inclusive on both ends).",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "oldest": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
                    "newest": { "type": "string", "description": "End date (YYYY-MM-DD)" }
                },
                "required": ["oldest", "newest"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_activity_get",
            description: "Details of a specific activity by id.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The activity id" }
                },
                "required": ["id"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_wellness_list",
            description: "List wellness data (sleep, HRV, fatigue, weight, ...) within a date range.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "oldest": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
                    "newest": { "type": "string", "description": "End date (YYYY-MM-DD)" }
                },
                "required": ["oldest", "newest"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_workouts_list",
            description: "List all workouts in the athlete's library.",
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_workout_create",
            description: "Create a new workout in the library.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Workout name" },
                    "description": {
                        "type": "string",
                        "description": "Workout steps text. MUST follow intervals.icu builder syntax. For repeating steps (e.g. 5x), insert an empty line before and after the block (e.g. '\n\n5x\n- 3m Z5\n- 3m Z1\n\n'). Use \n for new lines."
                    },
                    "folder_id": { "type": "integer", "description": "Folder to place the workout in" },
                    "type": { "type": "string", "description": "Sport type (Ride, Run, ...)" },
                    "indoor": { "type": "boolean" }
                },
                "required": ["name"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_events_list",
            description: "List calendar events (planned workouts, races, notes, ...) within a date range.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "oldest": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
                    "newest": { "type": "string", "description": "End date (YYYY-MM-DD)" }
                },
                "required": ["oldest", "newest"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_event_create",
            description: "Create a new event on the calendar. The start must be in the future; the past is locked.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "start_date_local": {
                        "type": "string",
                        "description": "Start (YYYY-MM-DDTHH:mm:ss, athlete-local)"
                    },
                    "name": { "type": "string" },
                    "category": {
                        "type": "string",
                        "description": category_doc.clone()
                    },
                    "description": {
                        "type": "string",
                        "description": "Description/notes. If category=WORKOUT, this MUST follow intervals.icu builder syntax. For repeating steps (e.g. 5x), insert an empty line before and after the block (e.g. '\n\n5x\n- 3m Z5\n- 3m Z1\n\n'). Otherwise it is free text."
                    },
                    "type": { "type": "string", "description": "Sport type (Ride, Run, ...)" }
                },
                "required": ["start_date_local"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_event_update",
            description: "Update a future event on the calendar. Events that have already started are locked.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "description": "Event id" },
                    "start_date_local": {
                        "type": "string",
                        "description": "New start (YYYY-MM-DDTHH:mm:ss, athlete-local)"
                    },
                    "name": { "type": "string" },
                    "description": {
                        "type": "string",
                        "description": "Description/notes. If category=WORKOUT, this MUST follow intervals.icu builder syntax. For repeating steps (e.g. 5x), insert an empty line before and after the block (e.g. '\n\n5x\n- 3m Z5\n- 3m Z1\n\n'). Otherwise it is free text."
                    },
                    "category": {
                        "type": "string",
                        "description": category_doc
                    }
                },
                "required": ["id"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: "intervals_event_delete",
            description: "Delete a future event from the calendar. Events that have already started are locked.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "description": "Event id" }
                },
                "required": ["id"],
                "additionalProperties": false
            }),
        },
    ]
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct ToolError {
    code: &'static str,
    message: String,
    field: Option<&'static str>,
    docs_hint: Option<&'static str>,
    status: Option<u16>,
}

impl ToolError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            docs_hint: None,
            status: None,
        }
    }

    fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    fn with_docs_hint(mut self, docs_hint: &'static str) -> Self {
        self.docs_hint = Some(docs_hint);
        self
    }

    fn to_value(&self) -> Value {
        let mut payload = json!({
            "error": self.code,
            "message": self.message
        });
        if let Some(field) = self.field {
            payload["field"] = Value::String(field.to_string());
        }
        if let Some(docs_hint) = self.docs_hint {
            payload["docs_hint"] = Value::String(docs_hint.to_string());
        }
        if let Some(status) = self.status {
            payload["status"] = json!(status);
        }
        payload
    }
}

impl From<ClientError> for ToolError {
    fn from(err: ClientError) -> Self {
        let mut tool_err = ToolError {
            code: err.code(),
            message: err.to_string(),
            field: None,
            docs_hint: None,
            status: err.status(),
        };
        match tool_err.code {
            codes::PAST_EVENT_LOCKED => {
                tool_err = tool_err.with_field("start_date_local").with_docs_hint(
                    "The calendar's past is locked. Only events that have not started yet can be created, modified or deleted.",
                );
            }
            codes::NOT_FOUND => {
                tool_err = tool_err.with_docs_hint(
                    "List events with intervals_events_list to find a valid event id.",
                );
            }
            _ => {}
        }
        tool_err
    }
}

/// Normalizes a tool result and wraps it the way tools/call responses are
/// shaped: pretty JSON as the text part, the same value as structured
/// content when it is an object.
fn tool_success_response(result: Value) -> Value {
    let normalized = strip_nulls(result).unwrap_or(Value::Null);
    let mut payload = json!({
        "content": [{ "type": "text", "text": to_pretty_json(&normalized) }]
    });
    if normalized.is_object() {
        payload["structuredContent"] = normalized;
    }
    payload
}

fn tool_error_response(err: &ToolError) -> Value {
    let envelope = err.to_value();
    json!({
        "isError": true,
        "content": [{ "type": "text", "text": to_pretty_json(&envelope) }],
        "structuredContent": envelope
    })
}

fn to_result_value<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|err| {
        ToolError::new(
            codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {err}"),
        )
    })
}

fn parse_input<T: DeserializeOwned>(what: &str, args: Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args)).map_err(|err| {
        ToolError::new(
            codes::VALIDATION_FAILED,
            format!("Invalid {what} input: {err}"),
        )
    })
}

/// Checks presence and type only. Empty strings are forwarded; whether they
/// are acceptable is the API's decision.
fn required_string(args: &Map<String, Value>, key: &'static str) -> Result<String, ToolError> {
    match args.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ToolError::new(
            codes::VALIDATION_FAILED,
            format!("'{key}' must be a string"),
        )
        .with_field(key)),
        None => Err(ToolError::new(
            codes::VALIDATION_FAILED,
            format!("Missing required field '{key}'"),
        )
        .with_field(key)),
    }
}

fn required_i64(args: &Map<String, Value>, key: &'static str) -> Result<i64, ToolError> {
    match args.get(key) {
        Some(Value::Number(value)) => value.as_i64().ok_or_else(|| {
            ToolError::new(
                codes::VALIDATION_FAILED,
                format!("'{key}' must be an integer"),
            )
            .with_field(key)
        }),
        Some(_) => Err(ToolError::new(
            codes::VALIDATION_FAILED,
            format!("'{key}' must be an integer"),
        )
        .with_field(key)),
        None => Err(ToolError::new(
            codes::VALIDATION_FAILED,
            format!("Missing required field '{key}'"),
        )
        .with_field(key)),
    }
}

fn required_date(args: &Map<String, Value>, key: &'static str) -> Result<String, ToolError> {
    let raw = required_string(args, key)?;
    parse_calendar_date(&raw)
        .map_err(|err| ToolError::new(codes::VALIDATION_FAILED, err.to_string()).with_field(key))?;
    Ok(raw)
}

fn required_date_range(args: &Map<String, Value>) -> Result<(String, String), ToolError> {
    Ok((
        required_date(args, "oldest")?,
        required_date(args, "newest")?,
    ))
}

fn success_response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn error_response(id: Value, error: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": error.code,
            "message": error.message
        }
    })
}

async fn read_framed_json(
    reader: &mut BufReader<tokio::io::Stdin>,
) -> Result<Option<Value>, std::io::Error> {
    let mut content_length: Option<usize> = None;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            if content_length.is_none() {
                return Ok(None);
            }
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "Unexpected EOF while reading MCP headers",
            ));
        }

        if line == "\r\n" {
            break;
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                let parsed = value.trim().parse::<usize>().map_err(|_| {
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "Invalid Content-Length header",
                    )
                })?;
                content_length = Some(parsed);
            }
        }
    }

    let content_length = content_length.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Missing Content-Length header",
        )
    })?;
    let mut payload = vec![0_u8; content_length];
    reader.read_exact(&mut payload).await?;

    let json: Value = serde_json::from_slice(&payload).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Invalid JSON payload: {e}"),
        )
    })?;
    Ok(Some(json))
}

async fn write_framed_json(
    writer: &mut tokio::io::Stdout,
    value: &Value,
) -> Result<(), std::io::Error> {
    let body = serde_json::to_vec(value).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Failed to serialize JSON: {e}"),
        )
    })?;
    let header = format!(
        "Content-Length: {}\r\nContent-Type: application/json\r\n\r\n",
        body.len()
    );
    writer.write_all(header.as_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

fn to_pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
