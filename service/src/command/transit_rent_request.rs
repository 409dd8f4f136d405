//! [`Command`] for applying a [`rent::Action`] to a [`RentRequest`].

use common::operations::{
    By, Commit, Insert, Lock, Publish, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        rent_request::{self, Status},
        room, user, Notification, RentRequest, Room,
    },
    infra::{database, notifier, Database, Notifier},
    workflow::rent,
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{Command, ErrorKind};

/// [`Command`] for applying a [`rent::Action`] to a [`RentRequest`].
///
/// Once both parties finalize the rental, the [`Room`] becomes
/// [`room::Status::Rented`] in the same transaction.
#[derive(Clone, Copy, Debug)]
pub struct TransitRentRequest {
    /// ID of the [`User`] performing the [`rent::Action`].
    pub actor_id: user::Id,

    /// ID of the [`RentRequest`] to apply the [`rent::Action`] to.
    pub request_id: rent_request::Id,

    /// [`rent::Action`] to apply.
    pub action: rent::Action,
}

impl<Db, Nt> Command<TransitRentRequest> for Service<Db, Nt>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<RentRequest, rent_request::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<RentRequest>, rent_request::Id>>,
            Ok = Option<RentRequest>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Room, room::Id>>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Update<RentRequest>, Err = Traced<database::Error>>
        + Database<Update<Room>, Err = Traced<database::Error>>
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
        fields(
            actor_id = %cmd.actor_id,
            request_id = %cmd.request_id,
            action = ?cmd.action,
        ),
    )]
    async fn execute(
        &self,
        cmd: TransitRentRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let TransitRentRequest {
            actor_id,
            request_id,
            action,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize actions upon the same `RentRequest`, so the finalization
        // marks of both parties are always observed.
        tx.execute(Lock(By::<RentRequest, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut request = tx
            .execute(Select(By::<Option<RentRequest>, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RentRequestNotExists(request_id))
            .map_err(tracerr::wrap!())?;
        let room = tx
            .execute(Select(By::<Option<Room>, _>::new(request.room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(request.room_id))
            .map_err(tracerr::wrap!())?;

        let state = rent::State {
            status: request.status,
            finalization: request.finalization,
        };
        let transition = rent::transition(
            state,
            actor_id,
            rent::Parties {
                tenant: request.tenant_id,
                owner: room.owner_id,
            },
            action,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;
        if transition.state == state {
            log::debug!("`RentRequest(id: {request_id})` is left unchanged");
            return Ok(request);
        }

        request.status = transition.state.status;
        request.finalization = transition.state.finalization;
        tx.execute(Update(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if request.status == Status::BothFinalized {
            tx.execute(Lock(By::<Room, _>::new(room.id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            let mut room = tx
                .execute(Select(By::<Option<Room>, _>::new(room.id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::RoomNotExists(room.id))
                .map_err(tracerr::wrap!())?;
            room.status = room::Status::Rented;
            tx.execute(Update(room))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

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

        log::info!(
            "`RentRequest(id: {request_id})` transitioned from `{}` to `{}`",
            state.status,
            request.status,
        );
        self.publish(notifications).await;

        Ok(request)
    }
}

/// Error of [`TransitRentRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`RentRequest`] with the provided ID doesn't exist.
    #[display("`RentRequest(id: {_0})` doesn't exist")]
    RentRequestNotExists(#[error(not(source))] rent_request::Id),

    /// [`Room`] with the provided ID doesn't exist.
    #[display("`Room(id: {_0})` doesn't exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`rent::Action`] is not allowed.
    #[display("{_0}")]
    #[from]
    Transition(rent::Error),
}

impl ExecutionError {
    /// Returns the [`ErrorKind`] of this [`ExecutionError`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(_) => ErrorKind::Internal,
            Self::RentRequestNotExists(_) | Self::RoomNotExists(_) => {
                ErrorKind::NotFound
            }
            Self::Transition(e) => e.into(),
        }
    }
}
