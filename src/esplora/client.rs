use std::str::FromStr;

use async_trait::async_trait;
use bitcoin::BlockHash;
use log::{debug, info};
use reqwest::Client;

use super::{EsploraApi, Transaction};
use crate::errors::AncestryError;

pub const DEFAULT_ENDPOINT: &str = "https://blockstream.info/api";

/// HTTP client for an Esplora-compatible block explorer
#[derive(Debug, Clone)]
pub struct EsploraClient {
    client: Client,
    base_url: String,
}

impl EsploraClient {
    /// Create a new client for the given API root
    pub fn new(base_url: String) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: Client, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn block_height_url(&self, height: u64) -> String {
        format!("{}/block-height/{}", self.base_url, height)
    }

    pub fn block_txs_url(&self, block_hash: &BlockHash, start_index: u64) -> String {
        format!("{}/block/{}/txs/{}", self.base_url, block_hash, start_index)
    }

    async fn get_text(&self, url: &str) -> Result<String, AncestryError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Unexpected response code {} from {}", status, url);
            return Err(AncestryError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl EsploraApi for EsploraClient {
    async fn get_block_hash(&self, height: u64) -> Result<BlockHash, AncestryError> {
        let url = self.block_height_url(height);
        debug!("Resolving block height {} via {}", height, url);

        let body = self.get_text(&url).await?;
        parse_block_hash(&body)
    }

    async fn get_block_txs(
        &self,
        block_hash: &BlockHash,
        start_index: u64,
    ) -> Result<Vec<Transaction>, AncestryError> {
        let url = self.block_txs_url(block_hash, start_index);
        info!("{}", url);

        let body = self.get_text(&url).await?;
        serde_json::from_str(&body).map_err(|source| {
            debug!("Failed to parse transactions from {}", url);
            AncestryError::Parse { url, source }
        })
    }
}

fn parse_block_hash(body: &str) -> Result<BlockHash, AncestryError> {
    let hash = body.trim();
    BlockHash::from_str(hash).map_err(|e| AncestryError::InvalidBlockHash {
        hash: hash.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    const TEST_BLOCK_HASH: &str =
        "000000000000000000076c036ff5119e5a5a74df77abf64203473364509f7732";

    /// Answers a single HTTP request with `status` and `body`. The handle
    /// yields the request line that was received.
    fn serve_once(status: &'static str, body: &'static str) -> (EsploraClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut header = String::new();
            while reader.read_line(&mut header).unwrap() > 0 && header != "\r\n" {
                header.clear();
            }

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
            request_line.trim_end().to_string()
        });

        let http = Client::builder().no_proxy().build().unwrap();
        (EsploraClient::with_client(http, format!("http://{addr}/api/")), handle)
    }

    #[tokio::test]
    async fn test_block_height_not_found_is_http_status() {
        let (client, server) = serve_once("404 Not Found", "Block not found");

        let result = client.get_block_hash(1).await;

        match result {
            Err(AncestryError::HttpStatus { url, status }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(url.ends_with("/api/block-height/1"), "unexpected url {url}");
            }
            other => panic!("Expected HttpStatus error, got {:?}", other),
        }
        assert_eq!(server.join().unwrap(), "GET /api/block-height/1 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_block_height_resolves_hash() {
        let (client, server) = serve_once("200 OK", TEST_BLOCK_HASH);

        let hash = client.get_block_hash(680000).await.unwrap();

        assert_eq!(hash.to_string(), TEST_BLOCK_HASH);
        assert_eq!(server.join().unwrap(), "GET /api/block-height/680000 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_block_txs_malformed_body_is_parse_error() {
        let (client, server) = serve_once("200 OK", "not json");
        let hash = BlockHash::from_str(TEST_BLOCK_HASH).unwrap();

        let result = client.get_block_txs(&hash, 0).await;

        match result {
            Err(AncestryError::Parse { url, .. }) => {
                assert!(url.ends_with(&format!("/block/{TEST_BLOCK_HASH}/txs/0")), "unexpected url {url}");
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_block_txs_server_error_is_http_status() {
        let (client, server) = serve_once("500 Internal Server Error", "");
        let hash = BlockHash::from_str(TEST_BLOCK_HASH).unwrap();

        let result = client.get_block_txs(&hash, 25).await;

        assert!(
            matches!(result, Err(AncestryError::HttpStatus { status, .. }) if status == StatusCode::INTERNAL_SERVER_ERROR),
            "Expected 500, got {:?}",
            result
        );
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_block_txs_empty_page() {
        let (client, server) = serve_once("200 OK", "[]");
        let hash = BlockHash::from_str(TEST_BLOCK_HASH).unwrap();

        let transactions = client.get_block_txs(&hash, 125).await.unwrap();

        assert!(transactions.is_empty());
        assert_eq!(
            server.join().unwrap(),
            format!("GET /api/block/{TEST_BLOCK_HASH}/txs/125 HTTP/1.1")
        );
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = EsploraClient::new("https://blockstream.info/api/".to_string());
        let hash = BlockHash::from_str(TEST_BLOCK_HASH).unwrap();

        assert_eq!(
            client.block_height_url(680000),
            "https://blockstream.info/api/block-height/680000"
        );
        assert_eq!(
            client.block_txs_url(&hash, 100),
            format!("https://blockstream.info/api/block/{TEST_BLOCK_HASH}/txs/100")
        );
    }

    #[test]
    fn test_parse_block_hash_trims_body() {
        let hash = parse_block_hash(&format!("{TEST_BLOCK_HASH}\n")).unwrap();
        assert_eq!(hash.to_string(), TEST_BLOCK_HASH);
    }

    #[test]
    fn test_parse_block_hash_rejects_garbage() {
        let result = parse_block_hash("Block not found");
        assert!(
            matches!(result, Err(AncestryError::InvalidBlockHash { ref hash, .. }) if hash == "Block not found"),
            "Expected InvalidBlockHash, got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Nothing listens on port 9 of the loopback interface.
        let http = Client::builder().no_proxy().build().unwrap();
        let client = EsploraClient::with_client(http, "http://127.0.0.1:9".to_string());

        let err = client.get_block_hash(680000).await.unwrap_err();
        assert!(err.is_network(), "Expected network error, got {:?}", err);
    }
}
