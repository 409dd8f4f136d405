//! [`Database`] implementations.

mod message;
mod notification;
mod rent_request;
mod report;
mod room;
mod user;
mod view_request;

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Update};
use tracerr::Traced;

use crate::{
    domain::{
        message as msg, notification as notif, rent_request as rent, report as rep,
        room as rm, user as usr, view_request as view, Message, Notification,
        RentRequest, Report, Room, User, ViewRequest,
    },
    infra::{database, Database},
};

use super::{Connection, Entity, Memory, NonTx, Tx};

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Memory(Tx::from_non_tx(self.0.clone())))
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.0.commit().await.map_err(tracerr::wrap!())
    }
}

impl<C, E> Database<Insert<E>> for Memory<C>
where
    C: Connection,
    E: Entity,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entity): Insert<E>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.upsert(entity).await.map_err(tracerr::wrap!())
    }
}

impl<C, E> Database<Update<E>> for Memory<C>
where
    C: Connection,
    E: Entity,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(entity): Update<E>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.upsert(entity).await.map_err(tracerr::wrap!())
    }
}

impl<C, E> Database<Lock<By<E, E::Id>>> for Memory<C>
where
    C: Connection,
    E: Entity,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<E, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0
            .lock::<E>(by.into_inner())
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Implements selecting an [`Entity`] by its primary key.
macro_rules! impl_select_by_id {
    ($($entity:ty => $id:ty),* $(,)?) => {$(
        impl<C: Connection> Database<Select<By<Option<$entity>, $id>>>
            for Memory<C>
        {
            type Ok = Option<$entity>;
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Select(by): Select<By<Option<$entity>, $id>>,
            ) -> Result<Self::Ok, Self::Err> {
                self.0
                    .select::<$entity>(by.into_inner())
                    .await
                    .map_err(tracerr::wrap!())
            }
        }
    )*};
}

impl_select_by_id! {
    User => usr::Id,
    Room => rm::Id,
    RentRequest => rent::Id,
    ViewRequest => view::Id,
    Notification => notif::Id,
    Message => msg::Id,
    Report => rep::Id,
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Commit, Insert, Lock, Select, Transact},
        DateTime,
    };

    use crate::{
        domain::{user, User},
        infra::{database::Memory, Database as _},
    };

    fn user(name: &str) -> User {
        User {
            id: user::Id::new(),
            name: user::Name::new(name).unwrap(),
            email: None,
            phone: None,
            role: user::Role::Renter,
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn tx_writes_are_visible_only_after_commit() {
        let db = Memory::new();
        let alice = user("Alice");
        let id = alice.id;

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(alice)).await.unwrap();

        let inside = tx.execute(Select(By::<Option<User>, _>::new(id))).await;
        let outside = db.execute(Select(By::<Option<User>, _>::new(id))).await;
        assert!(inside.unwrap().is_some());
        assert!(outside.unwrap().is_none());

        tx.execute(Commit).await.unwrap();

        let outside = db.execute(Select(By::<Option<User>, _>::new(id))).await;
        assert!(outside.unwrap().is_some());
    }

    #[tokio::test]
    async fn dropped_tx_rolls_back() {
        let db = Memory::new();
        let alice = user("Alice");
        let id = alice.id;

        {
            let tx = db.execute(Transact).await.unwrap();
            tx.execute(Insert(alice)).await.unwrap();
            tx.execute(Lock(By::<User, _>::new(id))).await.unwrap();
        }

        let found = db.execute(Select(By::<Option<User>, _>::new(id))).await;
        assert!(found.unwrap().is_none());

        // The lock is released along with the dropped transaction.
        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Lock(By::<User, _>::new(id))).await.unwrap();
    }

    #[tokio::test]
    async fn second_commit_fails() {
        let db = Memory::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Commit).await.unwrap();

        assert!(tx.execute(Commit).await.is_err());
        assert!(tx.execute(Insert(user("Bob"))).await.is_err());
    }

    #[tokio::test]
    async fn lock_is_reentrant_within_tx() {
        let db = Memory::new();
        let id = user::Id::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Lock(By::<User, _>::new(id))).await.unwrap();
        tx.execute(Lock(By::<User, _>::new(id))).await.unwrap();
        tx.execute(Commit).await.unwrap();
    }
}
