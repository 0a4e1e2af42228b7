use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde_json::json;

use chatvec_core::types::{Dimension, IndexTable, IndexTarget, Pair, VectorRecord};
use chatvec_core::Error;
use chatvec_vector::PineconeClient;

/// Answer a single request with `status` and `body`, returning the raw
/// request (head and body) that was received.
fn serve_once(status: u16, body: String) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header");
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap_or(0);
            }
            let end = line == "\r\n" || line.is_empty();
            request.push_str(&line);
            if end { break; }
        }
        let mut buf = vec![0u8; content_length];
        reader.read_exact(&mut buf).expect("read body");
        request.push_str(&String::from_utf8_lossy(&buf));

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .expect("write response");
        request
    });
    (addr, handle)
}

fn client_at(addr: SocketAddr) -> PineconeClient {
    let target = IndexTarget { host: Some(format!("http://{addr}/")), ..IndexTarget::new("chatbot-embeddings-384-2x9jann", "r", "ns-test") };
    let table = IndexTable::new([(Dimension::D384, target)]).expect("table");
    PineconeClient::new(table, "pc-key", Duration::from_secs(5)).expect("client")
}

fn records() -> Vec<VectorRecord> {
    vec![
        VectorRecord::from_pair(0, &Pair::new("Book transport for tomorrow at 8 AM", "Got it!"), Dimension::D384, vec![0.5; 384], 1),
        VectorRecord::from_pair(1, &Pair::new("yes", "What time works for you?"), Dimension::D384, vec![0.25; 384], 1),
    ]
}

#[tokio::test]
async fn upsert_posts_batch_with_api_key_header() -> anyhow::Result<()> {
    let (addr, server) = serve_once(200, r#"{"upsertedCount":2}"#.to_string());

    let n = client_at(addr).upsert_vectors(Dimension::D384, &records()).await?;
    assert_eq!(n, 2);

    let request = server.join().expect("server thread");
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /vectors/upsert HTTP/1.1"), "{request}");
    assert!(lower.contains("\r\napi-key: pc-key\r\n"), "{request}");
    assert!(request.contains(r#""namespace":"ns-test""#));
    assert!(request.contains(r#""id":"pair_1_dim_384""#));
    Ok(())
}

#[tokio::test]
async fn upsert_client_error_fails_the_batch() {
    let (addr, server) = serve_once(400, r#"{"message":"Vector dimension 384 does not match the dimension of the index 512"}"#.to_string());

    let err = client_at(addr).upsert_vectors(Dimension::D384, &records()).await.unwrap_err();
    assert!(matches!(err, Error::Status { service: "Pinecone", status: 400, .. }), "{err}");
    assert!(err.to_string().contains("does not match"));
    server.join().expect("server thread");
}

#[tokio::test]
async fn query_sends_top_k_and_parses_matches() -> anyhow::Result<()> {
    let body = json!({
        "matches": [
            {"id": "pair_0_dim_384", "score": 0.91, "metadata": {"input": "Book transport for tomorrow at 8 AM", "output": "Got it!", "dimension": 384.0}}
        ],
        "namespace": "ns-test"
    });
    let (addr, server) = serve_once(200, body.to_string());

    let matches = client_at(addr).query_vector(Dimension::D384, &[0.0; 384], 3).await?;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "pair_0_dim_384");
    assert_eq!(matches[0].metadata.output, "Got it!");

    let request = server.join().expect("server thread");
    assert!(request.starts_with("POST /query HTTP/1.1"), "{request}");
    assert!(request.to_ascii_lowercase().contains("\r\napi-key: pc-key\r\n"));
    assert!(request.contains(r#""topK":3"#));
    assert!(request.contains(r#""includeMetadata":true"#));
    assert!(request.contains(r#""namespace":"ns-test""#));
    Ok(())
}

#[tokio::test]
async fn query_non_success_status_is_an_error() {
    let (addr, server) = serve_once(404, r#"{"message":"Not Found"}"#.to_string());

    let err = client_at(addr).query_vector(Dimension::D384, &[0.0; 384], 3).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }), "{err}");
    server.join().expect("server thread");
}
