//! [`NonTx`] client definitions.

use std::sync::Arc;

use tracerr::Traced;

use crate::infra::database::{
    self,
    memory::storage::{lock_key, Connection, Entity, Storage},
};

/// Non-transactional [`Memory`] database client.
///
/// Every write is committed immediately.
///
/// [`Memory`]: super::super::Memory
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// [`Storage`] shared by all the clients.
    pub(crate) storage: Arc<Storage>,
}

impl Connection for NonTx {
    async fn select<E: Entity>(
        &self,
        id: E::Id,
    ) -> Result<Option<E>, Traced<database::Error>> {
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
        let tables = self.storage.tables.read().await;
        Ok(E::table(&tables)
            .values()
            .filter(|&e| filter(e))
            .cloned()
            .collect())
    }

    async fn upsert<E: Entity>(
        &self,
        entity: E,
    ) -> Result<(), Traced<database::Error>> {
        let mut tables = self.storage.tables.write().await;
        _ = E::table_mut(&mut tables).insert(entity.id(), entity);
        Ok(())
    }

    async fn lock<E: Entity>(
        &self,
        id: E::Id,
    ) -> Result<(), Traced<database::Error>> {
        // Outside a transaction the lock is released right away, so this only
        // waits for the current holder.
        drop(self.storage.lock(lock_key::<E>(id)).await);
        Ok(())
    }
}
