//! [`Command`] for requesting a [`Room`] viewing.

use common::{
    operations::{
        By, Commit, Insert, Lock, Publish, Select, Transact, Transacted,
    },
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{room, user, view_request, Notification, Room, User, ViewRequest},
    infra::{database, notifier, Database, Notifier},
    read::view_request::Pending,
    workflow::view,
    Service,
};

use super::{Command, ErrorKind};

/// [`Command`] for requesting a [`Room`] viewing.
#[derive(Clone, Copy, Debug)]
pub struct CreateViewRequest {
    /// ID of the [`User`] willing to view the [`Room`].
    pub renter_id: user::Id,

    /// ID of the [`Room`] to view.
    pub room_id: room::Id,
}

impl<Db, Nt> Command<CreateViewRequest> for Service<Db, Nt>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Select<By<Option<ViewRequest>, Pending>>,
            Ok = Option<ViewRequest>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Room, room::Id>>, Err = Traced<database::Error>>
        + Database<Insert<ViewRequest>, Err = Traced<database::Error>>
        + Database<Insert<Notification>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Nt: Notifier<
        Publish<Notification>,
        Ok = usize,
        Err = Traced<notifier::Error>,
    >,
{
    type Ok = ViewRequest;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(renter_id = %cmd.renter_id, room_id = %cmd.room_id),
    )]
    async fn execute(
        &self,
        cmd: CreateViewRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateViewRequest { renter_id, room_id } = cmd;

        let renter = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(renter_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(renter_id))
            .map_err(tracerr::wrap!())?;
        let room = self
            .database()
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        let transition = view::create(view::Parties {
            renter: renter.id,
            owner: room.owner_id,
        })
        .map_err(tracerr::from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Room, _>::new(room.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let pending = tx
            .execute(Select(By::<Option<ViewRequest>, _>::new(Pending {
                renter_id: renter.id,
                room_id: room.id,
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(existing) = pending {
            return Err(tracerr::new!(E::AlreadyRequested(existing.id)));
        }

        let view::State { status, note } = transition.state.clone();
        let request = ViewRequest {
            id: view_request::Id::new(),
            renter_id: renter.id,
            room_id: room.id,
            owner_id: room.owner_id,
            status,
            note,
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let notifications = transition.notifications();
        for n in &notifications {
            tx.execute(Insert(n.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("created `ViewRequest(id: {})`", request.id);
        self.publish(notifications).await;

        Ok(request)
    }
}

/// Error of [`CreateViewRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Renter already has a pending [`ViewRequest`] for the [`Room`].
    #[display("`ViewRequest(id: {_0})` is already pending for this room")]
    AlreadyRequested(#[error(not(source))] view_request::Id),

    /// [`Room`] with the provided ID doesn't exist.
    #[display("`Room(id: {_0})` doesn't exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// View request is not allowed.
    #[display("{_0}")]
    #[from]
    Transition(view::Error),

    /// [`User`] with the provided ID doesn't exist.
    #[display("`User(id: {_0})` doesn't exist")]
    UserNotExists(#[error(not(source))] user::Id),
}

impl ExecutionError {
    /// Returns the [`ErrorKind`] of this [`ExecutionError`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(_) => ErrorKind::Internal,
            Self::AlreadyRequested(_) => ErrorKind::InvalidState,
            Self::RoomNotExists(_) | Self::UserNotExists(_) => {
                ErrorKind::NotFound
            }
            Self::Transition(e) => e.into(),
        }
    }
}
