//! # HTTP Integration Flows
//!
//! The node's router driven in-process and over a real TCP listener.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use node_runtime::container::{NodeConfig, ServiceContainer};
    use rd_01_entry_validation::test_utils::{EntrySigner, FixedTimeSource};
    use rd_01_entry_validation::{Entry, SiblingEntry};
    use serde_json::Value;
    use shared_crypto::Ed25519KeyPair;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tower::ServiceExt;

    const T: u64 = 1_700_000_000_000;

    fn node() -> ServiceContainer {
        ServiceContainer::with_clock(NodeConfig::default(), Arc::new(FixedTimeSource::new(T)))
            .expect("in-memory container")
    }

    async fn post(node: &ServiceContainer, entry: &Entry) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(entry).unwrap()))
            .unwrap();
        let response = node.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Minimal HTTP/1.1 GET over a fresh connection; returns the raw response.
    async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        );
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_directory_over_router() {
        let node = node();
        let k = EntrySigner::new(Ed25519KeyPair::generate());
        let a = k.entry("A", "v1", "a", T);
        let b = k.entry("B", "v1", "b", T);

        let (status, body) = post(&node, &a).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Array(vec![]));

        let (status, body) = post(&node, &b).await;
        assert_eq!(status, StatusCode::OK);
        let siblings: Vec<SiblingEntry> = serde_json::from_value(body).unwrap();
        assert_eq!(siblings, vec![a.clone().into_sibling()]);

        let stale = k.entry("A", "v1", "a", T - 1);
        let (status, body) = post(&node, &stale).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Newer entry already exists");
    }

    #[tokio::test]
    async fn test_addr_and_health_over_tcp() {
        let node = node();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(rd_03_directory_api::serve(listener, node.router()));

        let response = raw_get(addr, "/addr").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("127.0.0.1"));

        let response = raw_get(addr, "/health").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("\"status\":\"healthy\""));

        server.abort();
    }
}
