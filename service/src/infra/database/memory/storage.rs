//! Storage of the [`Memory`] database.
//!
//! [`Memory`]: super::Memory

use std::{collections::HashMap, future::Future, hash::Hash, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    domain::{
        message, notification, rent_request, report, room, user, view_request,
        Message, Notification, RentRequest, Report, Room, User, ViewRequest,
    },
    infra::database,
};

/// Entity stored in its own table.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Type of this [`Entity`]'s primary key.
    type Id: Copy + Eq + Hash + Into<Uuid> + Send + Sync + 'static;

    /// Name of the table this [`Entity`] is stored in.
    const TABLE: &'static str;

    /// Returns the primary key of this [`Entity`].
    fn id(&self) -> Self::Id;

    /// Returns the table of this [`Entity`] in the provided [`Tables`].
    fn table(tables: &Tables) -> &HashMap<Self::Id, Self>;

    /// Returns the mutable table of this [`Entity`] in the provided
    /// [`Tables`].
    fn table_mut(tables: &mut Tables) -> &mut HashMap<Self::Id, Self>;
}

/// Implements [`Entity`] for the provided type stored in the provided
/// [`Tables`] field.
macro_rules! impl_entity {
    ($entity:ty, $id:ty, $table:ident) => {
        impl Entity for $entity {
            type Id = $id;

            const TABLE: &'static str = stringify!($table);

            fn id(&self) -> Self::Id {
                self.id
            }

            fn table(tables: &Tables) -> &HashMap<Self::Id, Self> {
                &tables.$table
            }

            fn table_mut(tables: &mut Tables) -> &mut HashMap<Self::Id, Self> {
                &mut tables.$table
            }
        }
    };
}

impl_entity!(User, user::Id, users);
impl_entity!(Room, room::Id, rooms);
impl_entity!(RentRequest, rent_request::Id, rent_requests);
impl_entity!(ViewRequest, view_request::Id, view_requests);
impl_entity!(Notification, notification::Id, notifications);
impl_entity!(Message, message::Id, messages);
impl_entity!(Report, report::Id, reports);

/// Set of all the [`Entity`] tables.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    /// [`User`]s table.
    users: HashMap<user::Id, User>,

    /// [`Room`]s table.
    rooms: HashMap<room::Id, Room>,

    /// [`RentRequest`]s table.
    rent_requests: HashMap<rent_request::Id, RentRequest>,

    /// [`ViewRequest`]s table.
    view_requests: HashMap<view_request::Id, ViewRequest>,

    /// [`Notification`]s table.
    notifications: HashMap<notification::Id, Notification>,

    /// [`Message`]s table.
    messages: HashMap<message::Id, Message>,

    /// [`Report`]s table.
    reports: HashMap<report::Id, Report>,
}

impl Tables {
    /// Overwrites rows of these [`Tables`] with the `staged` ones.
    pub(crate) fn merge(&mut self, staged: Self) {
        let Self {
            users,
            rooms,
            rent_requests,
            view_requests,
            notifications,
            messages,
            reports,
        } = staged;

        self.users.extend(users);
        self.rooms.extend(rooms);
        self.rent_requests.extend(rent_requests);
        self.view_requests.extend(view_requests);
        self.notifications.extend(notifications);
        self.messages.extend(messages);
        self.reports.extend(reports);
    }
}

/// Key of a row lock: table name and primary key.
pub(crate) type LockKey = (&'static str, Uuid);

/// Returns the [`LockKey`] of the provided [`Entity`] ID.
pub(crate) fn lock_key<E: Entity>(id: E::Id) -> LockKey {
    (E::TABLE, id.into())
}

/// Committed state shared by all the clients of a [`Memory`] database.
///
/// [`Memory`]: super::Memory
#[derive(Debug, Default)]
pub(crate) struct Storage {
    /// Committed [`Tables`].
    pub(crate) tables: RwLock<Tables>,

    /// Row locks, created on first use and dropped once nobody holds or
    /// awaits them.
    locks: Mutex<HashMap<LockKey, Arc<Mutex<()>>>>,
}

impl Storage {
    /// Acquires the row lock identified by the provided [`LockKey`], waiting
    /// for its current holder to release it.
    pub(crate) async fn lock(&self, key: LockKey) -> OwnedMutexGuard<()> {
        let row = {
            let mut locks = self.locks.lock().await;
            // Only the map references a released row.
            locks.retain(|k, row| *k == key || Arc::strong_count(row) > 1);
            Arc::clone(locks.entry(key).or_default())
        };
        row.lock_owned().await
    }
}

/// Generic [`Memory`] database connection.
///
/// [`Memory`]: super::Memory
pub trait Connection {
    /// Selects the [`Entity`] by its primary key.
    ///
    /// # Errors
    ///
    /// If the connection is no longer usable.
    fn select<E: Entity>(
        &self,
        id: E::Id,
    ) -> impl Future<Output = Result<Option<E>, Traced<database::Error>>>;

    /// Selects all the [`Entity`]s satisfying the provided `filter`, in no
    /// particular order.
    ///
    /// # Errors
    ///
    /// If the connection is no longer usable.
    fn select_all<E, F>(
        &self,
        filter: F,
    ) -> impl Future<Output = Result<Vec<E>, Traced<database::Error>>>
    where
        E: Entity,
        F: Fn(&E) -> bool;

    /// Inserts the provided [`Entity`] or replaces the existing one with the
    /// same primary key.
    ///
    /// # Errors
    ///
    /// If the connection is no longer usable.
    fn upsert<E: Entity>(
        &self,
        entity: E,
    ) -> impl Future<Output = Result<(), Traced<database::Error>>>;

    /// Locks the [`Entity`] row identified by the provided primary key.
    ///
    /// # Errors
    ///
    /// If the connection is no longer usable.
    fn lock<E: Entity>(
        &self,
        id: E::Id,
    ) -> impl Future<Output = Result<(), Traced<database::Error>>>;
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use super::Storage;

    #[tokio::test]
    async fn released_row_locks_are_dropped() {
        let storage = Storage::default();
        let (first, second) = (("rooms", Uuid::new_v4()), ("rooms", Uuid::new_v4()));

        drop(storage.lock(first).await);
        let held = storage.lock(second).await;

        {
            let locks = storage.locks.lock().await;
            assert_eq!(locks.len(), 1);
            assert!(locks.contains_key(&second));
        }

        drop(held);
        drop(storage.lock(first).await);
        assert_eq!(storage.locks.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn held_row_lock_survives_pruning() {
        let storage = Storage::default();
        let (first, second) = (("users", Uuid::new_v4()), ("users", Uuid::new_v4()));

        let held = storage.lock(first).await;
        drop(storage.lock(second).await);

        assert!(storage.locks.lock().await.contains_key(&first));
        drop(held);
    }
}
