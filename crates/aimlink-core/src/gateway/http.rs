//! HTTP Gateway
//!
//! Implements both gateway contracts over the Aim.Link REST backend. Every
//! call is a JSON `POST`; responses go through the envelope unwrapper.

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::envelope::unwrap_envelope;
use super::{
    CreateNode, GatewayConfig, MapGateway, PageRequest, SessionContext, TreeGateway, UpdateNode,
};
use crate::domain::{GatewayError, GatewayResult, MapLogEntry, MapLogPage, MindMap, NodeId, TreeNode};

// ========================
// Endpoints
// ========================

const FETCH_TREE: &str = "mind/node/getMindMapTree";
const ADD_NODE: &str = "mind/node/add";
const UPDATE_NODE: &str = "mind/node/update";
const DELETE_NODE: &str = "mind/node/delete";
const LIST_MAPS: &str = "mind/map/listByParentId";
const MAP_LOG: &str = "mind/node/getMindMapLog";
const CREATE_MAP: &str = "mind/map/createMapList";
const UPDATE_MAP: &str = "mind/map/updateMapList";
const DELETE_MAP: &str = "mind/map/deleteMapList";

/// REST implementation of [`TreeGateway`] and [`MapGateway`]
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
    session: SessionContext,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig, session: SessionContext) -> GatewayResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config, session })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// POST a JSON body and return the unwrapped payload
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> GatewayResult<Value> {
        let url = self.config.endpoint(path);
        debug!("[API Request] POST {} (region {})", url, self.session.region());

        let mut request = self.client.post(&url).json(body);
        for (name, value) in self.session.header_pairs(&self.config.client_version) {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(format!("{} ({})", path, status)));
        }
        if !status.is_success() {
            warn!("[API Response] {} answered {}", path, status);
            return Err(GatewayError::Server(format!("HTTP {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Server(format!("unreadable response: {}", e)))?;
        unwrap_envelope(body).map_err(|e| {
            warn!("[API Response] {} failed: {}", path, e);
            e
        })
    }

    /// POST and decode the payload into `T`
    async fn post_for<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        decode(self.post(path, body).await?)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &GatewayConfig) -> GatewayResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| GatewayError::Network(format!("cannot build HTTP client: {}", e)))
}

// Browser fetch has no per-request timeout knob; it applies its own limits.
#[cfg(target_arch = "wasm32")]
fn build_client(_config: &GatewayConfig) -> GatewayResult<reqwest::Client> {
    Ok(reqwest::Client::new())
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_builder() {
        GatewayError::Validation(format!("malformed request: {}", err))
    } else if err.is_timeout() {
        GatewayError::Network("request timed out".to_string())
    } else {
        GatewayError::Network(err.to_string())
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> GatewayResult<T> {
    serde_json::from_value(payload)
        .map_err(|e| GatewayError::Server(format!("unexpected payload: {}", e)))
}

/// The add endpoint answers with a bare id or with the created node
fn node_id_from_payload(payload: Value) -> GatewayResult<NodeId> {
    let id = match payload {
        Value::Object(mut map) => map.remove("id").unwrap_or(Value::Null),
        other => other,
    };
    match id {
        Value::Number(_) | Value::String(_) => decode(id),
        _ => Err(GatewayError::Server("created node id missing from response".to_string())),
    }
}

#[async_trait(?Send)]
impl TreeGateway for HttpGateway {
    async fn fetch_tree(&self, tree_id: &NodeId) -> GatewayResult<TreeNode> {
        match self.post(FETCH_TREE, &json!({ "mindMapId": tree_id })).await? {
            Value::Null => Err(GatewayError::NotFound(format!("mind map {}", tree_id))),
            payload => decode(payload),
        }
    }

    async fn create_node(&self, request: &CreateNode) -> GatewayResult<NodeId> {
        node_id_from_payload(self.post(ADD_NODE, request).await?)
    }

    async fn update_node(&self, request: &UpdateNode) -> GatewayResult<()> {
        self.post(UPDATE_NODE, request).await.map(|_| ())
    }

    async fn delete_node(&self, node_id: &NodeId) -> GatewayResult<()> {
        self.post(DELETE_NODE, &json!({ "id": node_id })).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl MapGateway for HttpGateway {
    async fn list_maps(&self) -> GatewayResult<Vec<MindMap>> {
        let maps: Option<Vec<MindMap>> = self.post_for(LIST_MAPS, &json!({ "parentId": 0 })).await?;
        Ok(maps.unwrap_or_default())
    }

    async fn map_log(&self, page: PageRequest) -> GatewayResult<Vec<MapLogEntry>> {
        let page: Option<MapLogPage> = self.post_for(MAP_LOG, &page).await?;
        Ok(page.and_then(|p| p.list).unwrap_or_default())
    }

    async fn create_map(&self, name: &str) -> GatewayResult<()> {
        let body = json!({ "mapCatalogName": name, "parentId": "0", "catalogType": "map" });
        self.post(CREATE_MAP, &body).await.map(|_| ())
    }

    async fn rename_map(&self, map_id: &NodeId, name: &str) -> GatewayResult<()> {
        let body = json!({ "id": map_id, "mapCatalogName": name });
        self.post(UPDATE_MAP, &body).await.map(|_| ())
    }

    async fn delete_map(&self, map_id: &NodeId) -> GatewayResult<()> {
        self.post(DELETE_MAP, &json!({ "id": map_id })).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// One-shot backend: answers the first request with `status` and `body`
    /// and hands back the raw request it received
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{}/", addr), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&data).into_owned();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    /// Gateway against a local stub; ambient proxy settings are ignored
    fn gateway_at(host: &str) -> HttpGateway {
        let session = SessionContext::new("tok-1").with_corp("5").with_language(4);
        HttpGateway {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            config: GatewayConfig::new(host, "saasantapp/"),
            session,
        }
    }

    #[tokio::test]
    async fn test_fetch_tree_sends_session_headers() {
        let (host, server) =
            serve_once("200 OK", r#"{"code":200,"msg":"ok","data":{"id":10,"name":"Root","children":[]}}"#).await;

        let tree = gateway_at(&host).fetch_tree(&NodeId::from(10)).await.unwrap();
        assert_eq!(tree.name, "Root");

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /saasantapp/mind/node/getMindMapTree "), "{}", request);
        assert!(lower.contains("\r\ntoken: tok-1\r\n"), "{}", request);
        assert!(lower.contains("\r\ncorpid: 5\r\n"), "{}", request);
        assert!(lower.contains("\r\nantsregion: ja\r\n"), "{}", request);
        assert!(lower.contains("\r\nversion: mobile-v1.1\r\n"), "{}", request);
        assert!(request.ends_with(r#"{"mindMapId":10}"#), "{}", request);
    }

    #[tokio::test]
    async fn test_fetch_tree_null_data_is_not_found() {
        let (host, server) = serve_once("200 OK", r#"{"code":200,"data":null}"#).await;
        let result = gateway_at(&host).fetch_tree(&NodeId::from(10)).await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))), "{:?}", result);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_404_is_not_found() {
        let (host, server) = serve_once("404 Not Found", "{}").await;
        let result = gateway_at(&host).delete_node(&NodeId::from(4)).await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))), "{:?}", result);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_500_is_server_error() {
        let (host, server) = serve_once("500 Internal Server Error", "{}").await;
        let result = gateway_at(&host).fetch_tree(&NodeId::from(10)).await;
        assert!(matches!(result, Err(GatewayError::Server(_))), "{:?}", result);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreadable_body_is_server_error() {
        let (host, server) = serve_once("200 OK", "<html>gateway down</html>").await;
        let result = gateway_at(&host).fetch_tree(&NodeId::from(10)).await;
        assert!(matches!(result, Err(GatewayError::Server(_))), "{:?}", result);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_envelope_failure_is_mapped() {
        let (host, server) = serve_once("200 OK", r#"{"code":400,"msg":"name too long"}"#).await;
        let request = UpdateNode { node_id: NodeId::from(2), name: "x".repeat(300) };
        let result = gateway_at(&host).update_node(&request).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))), "{:?}", result);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_create_node_reads_new_id() {
        let (host, server) = serve_once("200 OK", r#"{"code":0,"data":{"id":77,"name":"Task A"}}"#).await;
        let request = CreateNode {
            tree_id: NodeId::from(10),
            parent_id: NodeId::from(1),
            name: "Task A".to_string(),
        };

        let id = gateway_at(&host).create_node(&request).await.unwrap();

        assert_eq!(id, NodeId::from(77));
        let sent = server.await.unwrap();
        assert!(sent.contains(r#""mindMapId":10"#), "{}", sent);
        assert!(sent.contains(r#""parentId":1"#), "{}", sent);
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let host = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let result = gateway_at(&host).fetch_tree(&NodeId::from(10)).await;
        assert!(matches!(result, Err(GatewayError::Network(_))), "{:?}", result);
    }

    #[test]
    fn test_created_id_from_bare_value() {
        assert_eq!(node_id_from_payload(json!(17)).unwrap(), NodeId::from(17));
        assert_eq!(node_id_from_payload(json!("n-17")).unwrap(), NodeId::from("n-17"));
    }

    #[test]
    fn test_created_id_from_node_object() {
        let payload = json!({ "id": 17, "name": "Task A" });
        assert_eq!(node_id_from_payload(payload).unwrap(), NodeId::from(17));
    }

    #[test]
    fn test_created_id_missing() {
        assert!(matches!(node_id_from_payload(Value::Null), Err(GatewayError::Server(_))));
        assert!(matches!(node_id_from_payload(json!({ "name": "x" })), Err(GatewayError::Server(_))));
    }

    #[test]
    fn test_decode_reports_server_error() {
        let result: GatewayResult<TreeNode> = decode(json!({ "name": "no id" }));
        assert!(matches!(result, Err(GatewayError::Server(_))));
    }

    #[test]
    fn test_gateway_keeps_session() {
        let session = SessionContext::new("tok").with_corp("5");
        let gateway = HttpGateway::new(GatewayConfig::default(), session.clone()).unwrap();
        assert_eq!(gateway.session(), &session);
        assert_eq!(gateway.config().base_url(), GatewayConfig::default().base_url());
    }
}
