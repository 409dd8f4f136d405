//! [`Command`] for reporting a [`Room`] to moderators.

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{report, room, user, Report, Room, User},
    infra::{database, Database},
    Service,
};

use super::{Command, ErrorKind};

/// [`Command`] for reporting a [`Room`] to moderators.
///
/// Anyone except the [`Room`] owner may report it. Nobody is notified.
#[derive(Clone, Debug)]
pub struct CreateReport {
    /// ID of the [`User`] reporting the [`Room`].
    pub reporter_id: user::Id,

    /// ID of the reported [`Room`].
    pub room_id: room::Id,

    /// [`report::Reason`] of the [`Report`].
    pub reason: report::Reason,
}

impl<Db, Nt> Command<CreateReport> for Service<Db, Nt>
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
    Transacted<Db>: Database<Insert<Report>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Report;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(reporter_id = %cmd.reporter_id, room_id = %cmd.room_id),
    )]
    async fn execute(&self, cmd: CreateReport) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReport {
            reporter_id,
            room_id,
            reason,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<User>, _>::new(reporter_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(reporter_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;
        let room = self
            .database()
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;
        if room.owner_id == reporter_id {
            return Err(tracerr::new!(E::OwnRoom(room_id)));
        }

        let report = Report {
            id: report::Id::new(),
            reporter_id,
            room_id,
            reason,
            status: report::Status::Pending,
            created_at: DateTime::now().coerce(),
            resolved_at: None,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(report.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Room(id: {room_id})` reported by `User(id: {reporter_id})`");
        Ok(report)
    }
}

/// Error of [`CreateReport`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Owner tries to report their own [`Room`].
    #[display("`Room(id: {_0})` cannot be reported by its owner")]
    OwnRoom(#[error(not(source))] room::Id),

    /// [`Room`] with the provided ID doesn't exist.
    #[display("`Room(id: {_0})` doesn't exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`User`] with the provided ID doesn't exist.
    #[display("`User(id: {_0})` doesn't exist")]
    UserNotExists(#[error(not(source))] user::Id),
}

impl ExecutionError {
    /// Returns the [`ErrorKind`] of this [`ExecutionError`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(_) => ErrorKind::Internal,
            Self::OwnRoom(_) => ErrorKind::Forbidden,
            Self::RoomNotExists(_) | Self::UserNotExists(_) => {
                ErrorKind::NotFound
            }
        }
    }
}
