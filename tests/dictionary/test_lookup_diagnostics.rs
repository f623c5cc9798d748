// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use chitanka_dictionary_api::dictionary::{
    ChitankaClient, DictionaryConfig, DictionarySource, LookupError,
};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Formatted log output collected in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Capture WARN and above for the current thread until the guard drops
    fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn client_at(base_url: String, timeout_ms: u64) -> ChitankaClient {
    let config = DictionaryConfig {
        base_url,
        timeout_ms,
        ..DictionaryConfig::default()
    };
    ChitankaClient::new(config).unwrap()
}

#[tokio::test]
async fn test_timeout_logs_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1_500)))
        .mount(&server)
        .await;
    let client = client_at(server.uri(), 100);

    let logs = CapturedLogs::default();
    let _guard = logs.install();
    let err = client.lookup("тест").await.unwrap_err();

    assert!(matches!(err, LookupError::Timeout { .. }), "got {:?}", err);
    let output = logs.contents();
    assert!(output.contains("WARN"), "{output}");
    assert!(
        output.contains("Connection timeout or reset when accessing Chitanka"),
        "{output}"
    );
    assert!(output.contains("kind=\"timeout\""), "{output}");
}

#[tokio::test]
async fn test_unreachable_upstream_logs_error() {
    // Nothing listens on the discard port
    let client = client_at("http://127.0.0.1:9".to_string(), 2_000);

    let logs = CapturedLogs::default();
    let _guard = logs.install();
    let err = client.lookup("тест").await.unwrap_err();

    assert!(matches!(err, LookupError::Unreachable { .. }), "got {:?}", err);
    let output = logs.contents();
    assert!(output.contains("ERROR"), "{output}");
    assert!(
        output.contains("Chitanka dictionary website is unreachable"),
        "{output}"
    );
}

#[tokio::test]
async fn test_missing_word_logs_nothing_above_debug() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_at(server.uri(), 2_000);

    let logs = CapturedLogs::default();
    let _guard = logs.install();
    let err = client.lookup("несъществуваща").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound { .. }), "got {:?}", err);
    assert_eq!(logs.contents(), "");
}
