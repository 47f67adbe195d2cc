//! Transport layer for RPC communication

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::StakingError;

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request and get JSON response
    async fn request_json(&self, method: &str, params: Vec<Value>)
        -> Result<Value, StakingError>;
}

/// Helper to deserialize a response value
pub fn deserialize_response<T: serde::de::DeserializeOwned>(
    value: Value,
) -> Result<T, StakingError> {
    serde_json::from_value(value).map_err(|e| StakingError::Serialization(e.to_string()))
}

/// Mock transport for testing
///
/// Per-method responses come from a FIFO queue first (so pagination and
/// nonce sequences can be scripted), then a fixed response, then built-in
/// defaults.
pub struct MockTransport {
    queued: Arc<Mutex<HashMap<String, VecDeque<Value>>>>,
    responses: Arc<Mutex<HashMap<String, Value>>>,
    default_responses: Arc<Mutex<HashMap<String, Value>>>,
    calls: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        defaults.insert("eth_chainId".to_string(), Value::String("0x1".to_string()));
        defaults.insert(
            "eth_getTransactionCount".to_string(),
            Value::String("0x0".to_string()),
        );
        defaults.insert(
            "eth_sendRawTransaction".to_string(),
            Value::String(
                "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b".to_string(),
            ),
        );
        defaults.insert("eth_call".to_string(), Value::String("0x".to_string()));
        defaults.insert("eth_getTransactionReceipt".to_string(), Value::Null);

        Self {
            queued: Arc::new(Mutex::new(HashMap::new())),
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_responses: Arc::new(Mutex::new(defaults)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far, in order, as (method, params)
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn recorded_calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls
            .lock()
            .expect("MockTransport mutex poisoned")
            .clone()
    }

    /// Set a fixed mock response for a method
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock).
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), response);
    }

    /// Queue a one-shot response for a method; queued responses are
    /// consumed in order before any fixed response applies
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push_response(&self, method: &str, response: Value) {
        self.queued
            .lock()
            .expect("MockTransport mutex poisoned")
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    /// Clear custom and queued responses
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
        self.queued
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, StakingError> {
        self.calls
            .lock()
            .map_err(|_| StakingError::Transport("MockTransport mutex poisoned".to_string()))?
            .push((method.to_string(), params));

        let queued = self
            .queued
            .lock()
            .map_err(|_| StakingError::Transport("MockTransport mutex poisoned".to_string()))?
            .get_mut(method)
            .and_then(|queue| queue.pop_front());

        if let Some(response) = queued {
            return Ok(response);
        }

        let custom = self
            .responses
            .lock()
            .map_err(|_| StakingError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        if let Some(response) = custom {
            return Ok(response);
        }

        let default = self
            .default_responses
            .lock()
            .map_err(|_| StakingError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        if let Some(response) = default {
            return Ok(response);
        }

        Err(StakingError::Rpc {
            code: -32601,
            message: format!("Method not found: {}", method),
        })
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, StakingError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": self.next_id(),
            "method": method,
            "params": params,
        });

        tracing::trace!(method, "sending rpc request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| StakingError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| StakingError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(StakingError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| StakingError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
