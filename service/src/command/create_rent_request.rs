//! [`Command`] for requesting a [`Room`] rental.

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
    domain::{rent_request, room, user, Notification, RentRequest, Room, User},
    infra::{database, notifier, Database, Notifier},
    read::rent_request::Open,
    workflow::rent,
    Service,
};

use super::{Command, ErrorKind};

/// [`Command`] for requesting a [`Room`] rental.
#[derive(Clone, Copy, Debug)]
pub struct CreateRentRequest {
    /// ID of the [`User`] willing to rent the [`Room`].
    pub tenant_id: user::Id,

    /// ID of the [`Room`] to rent.
    pub room_id: room::Id,
}

impl<Db, Nt> Command<CreateRentRequest> for Service<Db, Nt>
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
            Select<By<Option<RentRequest>, Open>>,
            Ok = Option<RentRequest>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Room, room::Id>>, Err = Traced<database::Error>>
        + Database<Insert<RentRequest>, Err = Traced<database::Error>>
        + Database<Insert<Notification>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Nt: Notifier<
        Publish<Notification>,
        Ok = usize,
        Err = Traced<notifier::Error>,
    >,
{
    type Ok = RentRequest;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(tenant_id = %cmd.tenant_id, room_id = %cmd.room_id),
    )]
    async fn execute(
        &self,
        cmd: CreateRentRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRentRequest { tenant_id, room_id } = cmd;

        let tenant = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(tenant_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(tenant_id))
            .map_err(tracerr::wrap!())?;
        let room = self
            .database()
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        let transition = rent::create(rent::Parties {
            tenant: tenant.id,
            owner: room.owner_id,
        })
        .map_err(tracerr::from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent requests of the same tenant for the same `Room`.
        tx.execute(Lock(By::<Room, _>::new(room.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let open = tx
            .execute(Select(By::<Option<RentRequest>, _>::new(Open {
                tenant_id: tenant.id,
                room_id: room.id,
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(existing) = open {
            return Err(tracerr::new!(E::AlreadyRequested(existing.id)));
        }

        let request = RentRequest {
            id: rent_request::Id::new(),
            tenant_id: tenant.id,
            room_id: room.id,
            status: transition.state.status,
            finalization: transition.state.finalization,
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

        log::info!("created `RentRequest(id: {})`", request.id);
        self.publish(notifications).await;

        Ok(request)
    }
}

/// Error of [`CreateRentRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Tenant already has an open [`RentRequest`] for the [`Room`].
    #[display("`RentRequest(id: {_0})` is already open for this room")]
    AlreadyRequested(#[error(not(source))] rent_request::Id),

    /// [`Room`] with the provided ID doesn't exist.
    #[display("`Room(id: {_0})` doesn't exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// Rent request is not allowed.
    #[display("{_0}")]
    #[from]
    Transition(rent::Error),

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
