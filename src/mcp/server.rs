//! MCP server implementation
//!
//! Implements the Model Context Protocol server that exposes the nutrition
//! tools via newline-delimited JSON-RPC on stdio.

use crate::mcp::protocol::*;
use crate::mcp::tools;
use crate::usda::FoodSource;
use anyhow::Result;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, Mutex};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

/// Longest request line accepted from the client
const MAX_LINE_LENGTH: usize = 1024 * 1024;

#[derive(Clone)]
pub struct McpServer {
    source: Arc<dyn FoodSource>,
    initialized: Arc<Mutex<bool>>,
}

impl McpServer {
    pub fn new(source: Arc<dyn FoodSource>) -> Self {
        Self {
            source,
            initialized: Arc::new(Mutex::new(false)),
        }
    }

    /// Run the MCP server on stdin/stdout until the client disconnects
    pub async fn run(&self) -> Result<()> {
        info!("MCP server starting on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests from `reader`, writing responses to `writer`.
    ///
    /// Tool calls run on their own tasks so a slow upstream lookup doesn't
    /// hold up other requests; responses may therefore arrive out of order.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(Self::write_loop(writer, response_rx));

        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    warn!("Dropping request longer than {} bytes", MAX_LINE_LENGTH);
                    let _ = response_tx.send(Self::parse_error("Request too large"));
                    continue;
                }
                Err(LinesCodecError::Io(e)) => {
                    error!("Failed to read line: {}", e);
                    return Err(e.into());
                }
            };

            let line = line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            debug!("Received request: {}", line);

            let request: JsonRpcRequest = match serde_json::from_str(line) {
                Ok(req) => req,
                Err(e) => {
                    let _ = response_tx.send(Self::parse_error(&format!("Parse error: {}", e)));
                    continue;
                }
            };

            if request.method == "tools/call" && !request.is_notification() {
                let server = self.clone();
                let tx = response_tx.clone();
                tokio::spawn(async move {
                    if let Some(response) = server.handle_request(request).await {
                        let _ = tx.send(response);
                    }
                });
            } else if let Some(response) = self.handle_request(request).await {
                let _ = response_tx.send(response);
            }
        }

        info!("Client closed connection");

        // The writer exits once every in-flight tool call has replied
        drop(response_tx);
        writer_task.await??;
        Ok(())
    }

    async fn write_loop<W>(
        writer: W,
        mut response_rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(response) = response_rx.recv().await {
            let response_json = serde_json::to_string(&response)?;
            sink.send(response_json).await?;
            debug!("Sent response");
        }

        Ok(())
    }

    fn parse_error(message: &str) -> JsonRpcResponse {
        JsonRpcResponse::failure(Value::Null, JsonRpcError::new(PARSE_ERROR, message))
    }

    /// Handle one request. Notifications get no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!("Notification: {}", request.method);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(INVALID_REQUEST, "Only JSON-RPC 2.0 is supported"),
            ));
        }

        // Handle method
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params).await,
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.handle_list_tools().await,
            "tools/call" => self.handle_call_tool(request.params).await,
            _ => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        Some(match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn handle_initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams =
            serde_json::from_value(params.unwrap_or(Value::Null)).map_err(|e| {
                JsonRpcError::new(INVALID_PARAMS, format!("Invalid initialize params: {}", e))
            })?;

        if let Some(client) = &params.client_info {
            info!(
                "Client connected: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            );
        }

        *self.initialized.lock().await = true;

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(serde_json::json!({})),
                ..Default::default()
            },
            server_info: ServerInfo {
                name: "nutrimcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        serde_json::to_value(result).map_err(|e| {
            JsonRpcError::new(INTERNAL_ERROR, format!("Failed to serialize result: {}", e))
        })
    }

    async fn handle_list_tools(&self) -> Result<Value, JsonRpcError> {
        let tools = tools::get_tool_definitions();

        let result = ListToolsResult { tools };

        serde_json::to_value(result).map_err(|e| {
            JsonRpcError::new(INTERNAL_ERROR, format!("Failed to serialize tools: {}", e))
        })
    }

    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        if !*self.initialized.lock().await {
            return Err(JsonRpcError::new(INTERNAL_ERROR, "Server not initialized"));
        }

        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| {
                JsonRpcError::new(INVALID_PARAMS, format!("Invalid tool call params: {}", e))
            })?;

        let result = tools::call_tool(&params.name, params.arguments, Arc::clone(&self.source)).await;

        serde_json::to_value(result).map_err(|e| {
            JsonRpcError::new(
                INTERNAL_ERROR,
                format!("Failed to serialize tool result: {}", e),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FoodDetail, FoodSummary, NutritionError};
    use async_trait::async_trait;
    use serde_json::json;

    /// Source with no data; every lookup reports no results
    struct EmptySource;

    #[async_trait]
    impl FoodSource for EmptySource {
        async fn search_foods(
            &self,
            query: &str,
            _limit: u32,
        ) -> crate::types::Result<Vec<FoodSummary>> {
            Err(NutritionError::NoResults(query.to_string()))
        }

        async fn get_food_detail(&self, fdc_id: i64) -> crate::types::Result<FoodDetail> {
            Err(NutritionError::Upstream {
                status: 404,
                body: format!("food {} not found", fdc_id),
            })
        }
    }

    fn server() -> McpServer {
        McpServer::new(Arc::new(EmptySource))
    }

    fn request(id: u64, method: &str, params: Value) -> JsonRpcRequest {
        serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = server();
        let response = server
            .handle_request(request(1, "initialize", json!({ "protocolVersion": "2024-11-05" })))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "nutrimcp");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_call_before_initialize_is_rejected() {
        let server = server();
        let response = server
            .handle_request(request(2, "tools/call", json!({ "name": "search_food_items" })))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_tool_errors_are_results_not_rpc_errors() {
        let server = server();
        server.handle_request(request(1, "initialize", json!({}))).await;

        let response = server
            .handle_request(request(
                2,
                "tools/call",
                json!({ "name": "search_nutrition", "arguments": { "ingredient": "xyz" } }),
            ))
            .await
            .unwrap();

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Error: No food items found for 'xyz'");
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = server()
            .handle_request(request(3, "resources/list", json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let notification: JsonRpcRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }))
        .unwrap();
        assert!(server().handle_request(notification).await.is_none());
    }

    #[tokio::test]
    async fn test_serve_over_duplex_stream() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            "not json\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nope"}}"#,
            "\n",
        );

        let (client_out, server_out) = tokio::io::duplex(64 * 1024);
        server()
            .serve(input.as_bytes(), server_out)
            .await
            .unwrap();

        let mut output = String::new();
        let mut client_out = client_out;
        tokio::io::AsyncReadExt::read_to_string(&mut client_out, &mut output)
            .await
            .unwrap();

        let responses: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 4);

        let by_id = |id: Value| responses.iter().find(|r| r["id"] == id).unwrap();
        assert_eq!(by_id(json!(1))["result"]["serverInfo"]["name"], "nutrimcp");
        assert_eq!(by_id(Value::Null)["error"]["code"], PARSE_ERROR);
        assert_eq!(by_id(json!(2))["result"]["tools"].as_array().unwrap().len(), 3);
        assert_eq!(
            by_id(json!(3))["result"]["content"][0]["text"],
            "Error: Unknown tool: nope"
        );
    }
}
