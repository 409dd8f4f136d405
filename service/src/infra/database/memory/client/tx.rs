//! [`Tx`] client definitions.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracerr::Traced;

use crate::infra::database::{
    self,
    memory::{
        self,
        storage::{lock_key, Connection, Entity, LockKey, Storage, Tables},
    },
};

use super::NonTx;

/// Transactional [`Memory`] database client.
///
/// [`Memory`]: super::super::Memory
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`Storage`] to commit into.
    storage: Arc<Storage>,

    /// Inner representation of this client.
    inner: Arc<Mutex<Inner>>,
}

/// Inner representation of the [`Tx`] client.
#[derive(Debug)]
struct Inner {
    /// Writes not yet visible to other clients.
    ///
    /// [`None`] once committed.
    staged: Option<Tables>,

    /// Row locks held until this [`Tx`] ends.
    guards: HashMap<LockKey, OwnedMutexGuard<()>>,
}

impl Tx {
    /// Creates a new [`Tx`] client from the provided [`NonTx`] client.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            storage: client.storage,
            inner: Arc::new(Mutex::new(Inner {
                staged: Some(Tables::default()),
                guards: HashMap::new(),
            })),
        }
    }

    /// Commits this [`Tx`] client, releasing all its locks.
    ///
    /// # Errors
    ///
    /// If this [`Tx`] client is committed already.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let mut inner = self.inner.lock().await;
        let staged = inner.staged.take().ok_or_else(already_committed)?;

        self.storage.tables.write().await.merge(staged);
        inner.guards.clear();

        Ok(())
    }
}

/// Returns the error of using an already committed [`Tx`].
fn already_committed() -> Traced<database::Error> {
    tracerr::new!(database::Error::from(memory::Error::AlreadyCommitted))
}

impl Connection for Tx {
    async fn select<E: Entity>(
        &self,
        id: E::Id,
    ) -> Result<Option<E>, Traced<database::Error>> {
        let staged = self
            .inner
            .lock()
            .await
            .staged
            .as_ref()
            .and_then(|t| E::table(t).get(&id).cloned());
        if staged.is_some() {
            return Ok(staged);
        }

        let tables = self.storage.tables.read().await;
        Ok(E::table(&tables).get(&id).cloned())
    }

    async fn select_all<E, F>(
        &self,
        filter: F,
    ) -> Result<Vec<E>, Traced<database::Error>>
    where
        E: Entity,
        F: Fn(&E) -> bool,
    {
        let inner = self.inner.lock().await;
        let tables = self.storage.tables.read().await;

        let Some(staged) = inner.staged.as_ref().map(E::table) else {
            return Ok(E::table(&tables)
                .values()
                .filter(|&e| filter(e))
                .cloned()
                .collect());
        };

        Ok(E::table(&tables)
            .iter()
            .filter(|(id, _)| !staged.contains_key(*id))
            .map(|(_, e)| e)
            .chain(staged.values())
            .filter(|&e| filter(e))
            .cloned()
            .collect())
    }

    async fn upsert<E: Entity>(
        &self,
        entity: E,
    ) -> Result<(), Traced<database::Error>> {
        let mut inner = self.inner.lock().await;
        let staged = inner.staged.as_mut().ok_or_else(already_committed)?;
        _ = E::table_mut(staged).insert(entity.id(), entity);
        Ok(())
    }

    async fn lock<E: Entity>(
        &self,
        id: E::Id,
    ) -> Result<(), Traced<database::Error>> {
        let key = lock_key::<E>(id);
        {
            let inner = self.inner.lock().await;
            if inner.staged.is_none() {
                return Err(already_committed());
            }
            if inner.guards.contains_key(&key) {
                return Ok(());
            }
        }

        // Wait without holding `inner`, so the holder may still commit.
        let guard = self.storage.lock(key).await;
        _ = self.inner.lock().await.guards.insert(key, guard);
        Ok(())
    }
}
