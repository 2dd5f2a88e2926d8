//! Log output of a watch session running over the real gateway.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use xcli_core::{Credentials, FixedClock};
use xcli_fetch::{ApiClient, FetchError, HttpRequest, HttpResponse, RATE_LIMIT_RESET_HEADER, Transport};
use xcli_watch::{CancellationToken, WatchEngine, WatchEvent, WatchOptions, WatchSink};

const NOW: i64 = 1_700_000_000;

// ============================================================================
// Fixtures
// ============================================================================

/// Answers the user lookup, then an empty seed page, then a 429, then
/// cancels the session on the following poll.
struct RateLimitedTransport {
    timeline_calls: AtomicUsize,
    cancel: CancellationToken,
}

#[async_trait]
impl Transport for RateLimitedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        if request.url.contains("/users/by/username/") {
            return Ok(HttpResponse::new(
                200,
                r#"{"data":{"id":"42","name":"A","username":"a"}}"#,
            ));
        }

        match self.timeline_calls.fetch_add(1, Ordering::SeqCst) {
            0 => Ok(HttpResponse::new(200, r#"{"meta":{"result_count":0}}"#)),
            1 => {
                let mut response = HttpResponse::new(429, r#"{"title":"Too Many Requests"}"#);
                response
                    .headers
                    .insert(RATE_LIMIT_RESET_HEADER, "1700000030".parse().unwrap());
                Ok(response)
            }
            _ => {
                self.cancel.cancel();
                Ok(HttpResponse::new(200, r#"{"meta":{"result_count":0}}"#))
            }
        }
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct CountingSink {
    rate_limited: usize,
}

impl WatchSink for CountingSink {
    fn on_event(&mut self, event: WatchEvent<'_>) {
        if matches!(event, WatchEvent::RateLimited { .. }) {
            self.rate_limited += 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_rate_limit_logs_one_warning() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let cancel = CancellationToken::new();
    let transport = RateLimitedTransport {
        timeline_calls: AtomicUsize::new(0),
        cancel: cancel.clone(),
    };
    let client = ApiClient::with_transport(Credentials::new("ck", "cs", "at", "ats", "bt"), transport);
    let engine = WatchEngine::new(client, WatchOptions::default(), cancel)
        .with_clock(Arc::new(FixedClock(NOW)));

    let mut sink = CountingSink::default();
    let summary = engine.run(&["a".to_string()], &mut sink).await.unwrap();

    assert_eq!(sink.rate_limited, 1);
    assert_eq!(summary.tweets_seen, 0);

    let text = logs.text();
    let warnings: Vec<&str> = text.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 1, "expected one warning, got: {warnings:#?}");
    assert!(warnings[0].contains("Rate limited"));
    assert!(warnings[0].contains("wait_secs=35"));
}
