use std::collections::HashMap;

use color_eyre::eyre::{eyre, Result};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::info;
use turno::{config::EngineConfig, turn::Intent};

use crate::table::{join_table, spawn_table, TableHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u64);

struct OpenTable {
    handle: TableHandle,
    task: JoinHandle<Result<()>>,
}

/// Every table currently running, keyed by id.
#[derive(Default)]
pub struct Tables {
    tables: Mutex<HashMap<TableId, OpenTable>>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a table and deals its first game.
    pub async fn open(&self, id: TableId, config: EngineConfig) -> Result<TableHandle> {
        let mut tables = self.tables.lock().await;
        if tables.contains_key(&id) {
            return Err(eyre!("table {} is already open", id.0));
        }

        let (handle, task) = spawn_table(config);
        handle.send(Intent::StartSession).await?;
        info!(table = id.0, "table opened");

        tables.insert(
            id,
            OpenTable {
                handle: handle.clone(),
                task,
            },
        );
        Ok(handle)
    }

    pub async fn get(&self, id: TableId) -> Option<TableHandle> {
        self.tables
            .lock()
            .await
            .get(&id)
            .map(|table| table.handle.clone())
    }

    pub async fn send(&self, id: TableId, intent: Intent) -> Result<()> {
        let handle = self
            .get(id)
            .await
            .ok_or_else(|| eyre!("no table with id {}", id.0))?;
        handle.send(intent).await
    }

    pub async fn len(&self) -> usize {
        self.tables.lock().await.len()
    }

    /// Aborts the table task. Intents still queued are dropped and handles held
    /// elsewhere go stale.
    pub async fn close(&self, id: TableId) -> Result<()> {
        let table = self
            .tables
            .lock()
            .await
            .remove(&id)
            .ok_or_else(|| eyre!("no table with id {}", id.0))?;

        let OpenTable { handle, task } = table;
        drop(handle);
        task.abort();
        info!(table = id.0, "table closed");

        match join_table(task).await {
            Ok(()) => Ok(()),
            Err(report) if is_cancelled(&report) => Ok(()),
            Err(report) => Err(report),
        }
    }
}

fn is_cancelled(report: &color_eyre::eyre::Report) -> bool {
    report
        .downcast_ref::<tokio::task::JoinError>()
        .map_or(false, |error| error.is_cancelled())
}
