use std::path::Path;
use std::time::Duration;

use pitchviz_core::dictionary::DictionarySource;
use pitchviz_core::error::DictionaryLoadError;

use crate::dictionary::PitchDictionary;

#[derive(Clone)]
pub struct PitchDictionaryLoader {
    client: reqwest::Client,
}

impl PitchDictionaryLoader {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });

        Self { client }
    }

    /// Single attempt, no retries
    pub async fn load(&self, source: &DictionarySource) -> Result<PitchDictionary, DictionaryLoadError> {
        tracing::info!("Loading pitch dictionary from {}", source);
        let dict = match source {
            DictionarySource::Url(url) => self.fetch(url).await?,
            DictionarySource::File(path) => Self::load_from_file(path).await?,
        };
        tracing::info!("Loaded {} pitch entries", dict.entry_count());
        Ok(dict)
    }

    async fn fetch(&self, url: &str) -> Result<PitchDictionary, DictionaryLoadError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DictionaryLoadError::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        let json = response.text().await?;
        Ok(PitchDictionary::from_json(&json, url)?)
    }

    /// Load dictionary from file path
    pub async fn load_from_file(path: &Path) -> Result<PitchDictionary, DictionaryLoadError> {
        let json = tokio::fs::read_to_string(path).await?;
        Ok(PitchDictionary::from_json(&json, path.display().to_string())?)
    }
}

impl Default for PitchDictionaryLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pitchviz_core::dictionary::AccentDictionary;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serves one canned HTTP response and returns its URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/pitch-table.json", addr)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once("200 OK", r#"{"tree": [2], "street": [1]}"#).await;
        let loader = PitchDictionaryLoader::default();
        let dict = loader.load(&DictionarySource::Url(url)).await.unwrap();
        assert_eq!(dict.entry_count(), 2);
        assert_eq!(dict.search("tree")[0].accents, vec![2]);
    }

    #[tokio::test]
    async fn test_fetch_error_status_carries_body() {
        let url = serve_once("404 Not Found", "no such table").await;
        let loader = PitchDictionaryLoader::default();
        let err = loader.load(&DictionarySource::Url(url)).await.err().unwrap();

        match err {
            DictionaryLoadError::Fetch { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such table");
            }
            other => panic!("Wrong error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_json() {
        let url = serve_once("200 OK", "{not json").await;
        let loader = PitchDictionaryLoader::default();
        let err = loader.load(&DictionarySource::Url(url)).await.err().unwrap();
        assert!(matches!(err, DictionaryLoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_source() {
        // Bind then drop to get a port nobody listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let loader = PitchDictionaryLoader::new(Duration::from_secs(2));
        let url = format!("http://{}/pitch-table.json", addr);
        let err = loader.load(&DictionarySource::Url(url)).await.err().unwrap();
        assert!(matches!(err, DictionaryLoadError::Network(_)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"さくら": [0], "はし": [1, 2]}}"#).unwrap();

        let source = DictionarySource::File(file.path().to_path_buf());
        let dict = PitchDictionaryLoader::default().load(&source).await.unwrap();
        assert_eq!(dict.entry_count(), 2);
        assert_eq!(dict.search("し").len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = DictionarySource::File("/definitely/not/here.json".into());
        let err = PitchDictionaryLoader::default().load(&source).await.err().unwrap();
        assert!(matches!(err, DictionaryLoadError::Io(_)));
    }
}
