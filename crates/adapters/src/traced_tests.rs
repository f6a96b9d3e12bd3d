// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::memory::{MemoryFabric, StoreOp};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

#[test]
fn traced_writes_log_tier_node_and_key() {
    let fabric = MemoryFabric::new();
    let cluster = TracedCluster::new(fabric.node("app/0"));
    fabric.set_leader(&cluster.local_node());

    let (logs, result) = with_tracing(|| async {
        cluster.leader_store().set("leadlock.Serial", "{}").await
    });

    assert!(result.is_ok());
    assert!(logs.contains("store.set"), "logs: {logs}");
    assert!(logs.contains("tier=\"leader\""), "logs: {logs}");
    assert!(logs.contains("node=app/0"), "logs: {logs}");
    assert!(logs.contains("written"), "logs: {logs}");
}

#[test]
fn traced_failures_are_logged_as_errors() {
    let fabric = MemoryFabric::new();
    let cluster = TracedCluster::new(fabric.node("app/1"));
    fabric.fail(StoreOp::LocalGet);

    let (logs, result) = with_tracing(|| async { cluster.local_store().get("k").await });

    assert!(result.is_err());
    assert!(logs.contains("ERROR"), "logs: {logs}");
    assert!(logs.contains("read failed"), "logs: {logs}");
}

#[test]
fn missing_peer_group_is_reported() {
    let fabric = MemoryFabric::new();
    let cluster = TracedCluster::new(fabric.node("app/2"));

    let (logs, peers) = with_tracing(|| async { cluster.peer_store().is_none() });

    assert!(peers);
    assert!(logs.contains("no peer group joined"), "logs: {logs}");
}

#[tokio::test]
async fn traced_get_all_passes_rows_through() {
    let fabric = MemoryFabric::new();
    let cluster = TracedCluster::new(fabric.node("app/0"));
    fabric.join(&cluster.local_node());
    fabric.put_peer_value(&NodeId::new("app/0"), "k", "v");

    let rows = cluster.peer_store().unwrap().get_all("k").await.unwrap();
    assert_eq!(rows.get(&NodeId::new("app/0")).map(String::as_str), Some("v"));
    assert_eq!(cluster.inner().local_node(), NodeId::new("app/0"));
}
