//! [`Command`] for listing a new [`Room`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{room, user, Room, User},
    infra::{database, Database},
    Service,
};

use super::{Command, ErrorKind};

/// [`Command`] for listing a new [`Room`].
#[derive(Clone, Debug)]
pub struct CreateRoom {
    /// ID of the [`User`] listing the [`Room`].
    pub actor_id: user::Id,

    /// [`room::Title`] of a new [`Room`].
    pub title: room::Title,

    /// [`room::Description`] of a new [`Room`].
    pub description: room::Description,

    /// [`room::Address`] of a new [`Room`].
    pub address: room::Address,

    /// [`room::City`] of a new [`Room`].
    pub city: room::City,

    /// [`room::District`] of a new [`Room`], if known.
    pub district: Option<room::District>,

    /// [`room::Price`] of a new [`Room`].
    pub price: room::Price,

    /// [`room::Area`] of a new [`Room`].
    pub area: room::Area,

    /// [`room::Capacity`] of a new [`Room`].
    pub capacity: room::Capacity,
}

impl<Db, Nt> Command<CreateRoom> for Service<Db, Nt>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Room>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(actor_id = %cmd.actor_id))]
    async fn execute(&self, cmd: CreateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRoom {
            actor_id,
            title,
            description,
            address,
            city,
            district,
            price,
            area,
            capacity,
        } = cmd;

        let owner = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(actor_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(actor_id))
            .map_err(tracerr::wrap!())?;
        if !owner.can_list_rooms() {
            return Err(tracerr::new!(E::NotAllowed(actor_id)));
        }

        let room = Room {
            id: room::Id::new(),
            owner_id: owner.id,
            title,
            description,
            address,
            city,
            district,
            price,
            area,
            capacity,
            status: room::Status::Available,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(room.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`User(id: {actor_id})` listed `Room(id: {})`", room.id);
        Ok(room)
    }
}

/// Error of [`CreateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] is not allowed to list rooms.
    #[display("`User(id: {_0})` is neither an owner nor an admin")]
    NotAllowed(#[error(not(source))] user::Id),

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
            Self::NotAllowed(_) => ErrorKind::Forbidden,
            Self::UserNotExists(_) => ErrorKind::NotFound,
        }
    }
}
