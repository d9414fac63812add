//! The per-request "Resolved host" record, captured as JSON.

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tenant_edge::config::TenantConfig;
use tracing::Level;

mod common;

use common::{send, test_server};

#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CaptureWriter {
    /// `fields` of every "Resolved host" event written so far.
    fn resolved_hosts(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter(|event| event["fields"]["message"] == "Resolved host")
            .map(|event| event["fields"].clone())
            .collect()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_resolved_host_record_fields() {
    let writer = CaptureWriter::default();
    let make_writer = writer.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(Level::INFO)
        .with_writer(move || make_writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let router = test_server(TenantConfig::default()).router();
    send(router.clone(), Some("localhost:3000"), "/").await;
    send(router.clone(), Some("john.localhost:3000"), "/dashboard?tab=users").await;
    send(router, Some("acme.example.com"), "/api/health").await;

    let records = writer.resolved_hosts();
    assert_eq!(records.len(), 2, "{records:#?}");

    let root = &records[0];
    assert_eq!(root["host"], "localhost:3000");
    assert_eq!(root["path"], "/");
    assert_eq!(root["subdomain"], "none");
    assert_eq!(root["rewritten"], "none");

    let tenant = &records[1];
    assert_eq!(tenant["host"], "john.localhost:3000");
    assert_eq!(tenant["path"], "/dashboard");
    assert_eq!(tenant["subdomain"], "john");
    assert_eq!(tenant["rewritten"], "/tenant/john/dashboard");
    assert!(tenant["request_id"].as_str().is_some_and(|id| !id.is_empty()));

    // Bypassed requests leave no record.
    assert!(records.iter().all(|r| r["path"] != "/api/health"));
}
