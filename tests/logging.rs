//! Upstream failures on the demonstration routes are logged before the caller sees them.

use std::io;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use tracing::Level;

mod common;

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.lock().unwrap());
        String::from_utf8(bytes).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Current-thread runtime: every spawned server task logs through the scoped subscriber.
#[tokio::test]
async fn test_failure_is_logged_at_error_before_it_is_surfaced() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::ERROR)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let upstream = common::start_upstream(|_| (500, "boom".to_string())).await;
    let (proxy, shutdown) = common::start_proxy(&upstream.base_url()).await;

    for style in ["retrieve", "exchange"] {
        captured.take();

        let res = reqwest::get(format!("{}/items/client/{}/exception/occurred", proxy, style))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "style {}", style);

        let logs = captured.take();
        let line = logs
            .lines()
            .find(|line| line.contains("boom"))
            .unwrap_or_else(|| panic!("no log line carrying the upstream body for {}: {:?}", style, logs));
        assert!(line.contains("ERROR"), "style {}: {}", style, line);
        assert!(line.contains("500"), "style {}: {}", style, line);
    }

    shutdown.trigger();
}
