//! [`Command`] for sending a chat [`Message`].

use common::{
    operations::{By, Commit, Insert, Publish, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{message, notification, room, user, Message, Notification, Room, User},
    infra::{database, notifier, Database, Notifier},
    Service,
};

use super::{Command, ErrorKind};

/// [`Command`] for sending a chat [`Message`] to another [`User`].
///
/// The recipient is notified about every [`Message`].
#[derive(Clone, Debug)]
pub struct SendMessage {
    /// ID of the [`User`] sending the [`Message`].
    pub sender_id: user::Id,

    /// ID of the [`User`] receiving the [`Message`].
    pub recipient_id: user::Id,

    /// ID of the [`Room`] the [`Message`] is about, if any.
    pub room_id: Option<room::Id>,

    /// [`message::Content`] of the [`Message`].
    pub content: message::Content,
}

impl<Db, Nt> Command<SendMessage> for Service<Db, Nt>
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
    Transacted<Db>: Database<Insert<Message>, Err = Traced<database::Error>>
        + Database<Insert<Notification>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Nt: Notifier<
        Publish<Notification>,
        Ok = usize,
        Err = Traced<notifier::Error>,
    >,
{
    type Ok = Message;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(
            sender_id = %cmd.sender_id,
            recipient_id = %cmd.recipient_id,
            room_id = ?cmd.room_id,
        ),
    )]
    async fn execute(&self, cmd: SendMessage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendMessage {
            sender_id,
            recipient_id,
            room_id,
            content,
        } = cmd;

        if sender_id == recipient_id {
            return Err(tracerr::new!(E::SelfMessage));
        }

        let sender = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(sender_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(sender_id))
            .map_err(tracerr::wrap!())?;
        self.database()
            .execute(Select(By::<Option<User>, _>::new(recipient_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(recipient_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;
        if let Some(id) = room_id {
            self.database()
                .execute(Select(By::<Option<Room>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::RoomNotExists(id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        let message = Message {
            id: message::Id::new(),
            sender_id,
            recipient_id,
            room_id,
            content,
            created_at: DateTime::now().coerce(),
        };
        let notification = Notification::new(
            recipient_id,
            notification::Kind::Message,
            format!("New message from {}", sender.name).into(),
        );

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(message.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(notification.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!("sent `Message(id: {})`", message.id);
        self.publish(vec![notification]).await;

        Ok(message)
    }
}

/// Error of [`SendMessage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Room`] with the provided ID doesn't exist.
    #[display("`Room(id: {_0})` doesn't exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`User`] tries to message themselves.
    #[display("Cannot send a message to oneself")]
    SelfMessage,

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
            Self::RoomNotExists(_) | Self::UserNotExists(_) => {
                ErrorKind::NotFound
            }
            Self::SelfMessage => ErrorKind::Invalid,
        }
    }
}
