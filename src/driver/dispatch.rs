//! Request dispatch onto driver operations.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::protocol::{Command, Request, Response};

use super::core::Driver;

// ============================================================================
// Driver - Dispatch
// ============================================================================

impl Driver {
    /// Runs one decoded command and returns its result payload.
    ///
    /// # Errors
    ///
    /// Propagates the operation's error.
    pub async fn execute(&self, command: Command) -> Result<Value> {
        match command {
            Command::GetTabs => Ok(self.list_tabs().await?.to_value()),
            Command::CloseTabById { tab_id } => Ok(self.close_tab_by_id(tab_id).await?.to_value()),
            Command::ActivateTabById { tab_id } => {
                Ok(self.activate_tab_by_id(tab_id).await?.to_value())
            }
            Command::CloseTab { address } => {
                Ok(self.close_tab_by_position(address).await?.to_value())
            }
        }
    }

    /// Handles one request end to end. Never fails; errors become error
    /// responses.
    pub async fn handle(&self, request: Request) -> Response {
        let outcome = match Command::from_request(&request) {
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => Response::success(request.id, result),
            Err(e) => {
                if e.is_caller_error() {
                    info!(method = %request.method, kind = e.kind(), error = %e, "Request rejected");
                } else {
                    warn!(method = %request.method, kind = e.kind(), error = %e, "Request failed");
                }
                Response::failure(request.id, &e)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::bridge::ScriptRunner;
    use crate::bridge::fake::FakeBrowser;
    use crate::driver::BridgeOptions;

    use super::*;

    fn driver() -> (Driver, Arc<FakeBrowser>) {
        let fake = Arc::new(FakeBrowser::new().with_window(
            10,
            &[
                (555, "Home", "https://example.com"),
                (556, "Docs", "https://example.com/docs"),
            ],
            1,
        ));
        let driver = Driver::with_runner(
            BridgeOptions::new(),
            Arc::clone(&fake) as Arc<dyn ScriptRunner>,
        );
        (driver, fake)
    }

    #[tokio::test]
    async fn test_get_tabs_response() {
        let (driver, _) = driver();
        let response = driver.handle(Request::new(1, "get_tabs", Value::Null)).await;

        assert!(response.is_success());
        assert_eq!(response.id, json!(1));
        let result = response.result.unwrap();
        assert_eq!(result["tabCount"], 2);
        assert!(result["text"].as_str().unwrap().contains("(id 556)"));
    }

    #[tokio::test]
    async fn test_close_by_id_response() {
        let (driver, fake) = driver();
        let response = driver
            .handle(Request::new("a", "close_tab_by_id", json!({"tabId": 556})))
            .await;

        assert!(response.is_success());
        assert_eq!(response.text(), Some("Closed tab 556 (was tab 2 of window 1)."));
        assert_eq!(fake.mutations().len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let (driver, fake) = driver();
        let response = driver
            .handle(Request::new(2, "activate_tab_by_id", json!({"tabId": 999})))
            .await;

        assert!(response.is_error());
        assert_eq!(response.error.as_deref(), Some("not_found"));
        assert!(response.message.unwrap().contains("999"));
        assert!(fake.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_params_never_reach_bridge() {
        let (driver, fake) = driver();
        let response = driver
            .handle(Request::new(3, "close_tab", json!({"windowIndex": "1", "tabIndex": 1})))
            .await;

        assert_eq!(response.error.as_deref(), Some("validation_failure"));
        assert!(fake.scripts().is_empty());
    }

    #[tokio::test]
    async fn test_bridge_failure_response() {
        let (driver, fake) = driver();
        fake.fail_with("Google Chrome got an error: Application isn't running.");
        let response = driver.handle(Request::new(4, "get_tabs", Value::Null)).await;

        assert_eq!(response.error.as_deref(), Some("bridge_failure"));
        assert!(response.message.unwrap().contains("isn't running"));
    }
}
