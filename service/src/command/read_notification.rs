//! [`Command`] for marking a [`Notification`] as read.

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{notification, user, Notification},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{Command, ErrorKind};

/// [`Command`] for the recipient to mark a [`Notification`] as read.
///
/// Reading an already read [`Notification`] changes nothing.
#[derive(Clone, Copy, Debug)]
pub struct ReadNotification {
    /// ID of the [`User`] reading the [`Notification`].
    pub actor_id: user::Id,

    /// ID of the [`Notification`] to read.
    pub notification_id: notification::Id,
}

impl<Db, Nt> Command<ReadNotification> for Service<Db, Nt>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Notification, notification::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Notification>, notification::Id>>,
            Ok = Option<Notification>,
            Err = Traced<database::Error>,
        > + Database<Update<Notification>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Notification;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(
            actor_id = %cmd.actor_id,
            notification_id = %cmd.notification_id,
        ),
    )]
    async fn execute(
        &self,
        cmd: ReadNotification,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReadNotification {
            actor_id,
            notification_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Notification, _>::new(notification_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut notification = tx
            .execute(Select(By::<Option<Notification>, _>::new(
                notification_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotificationNotExists(notification_id))
            .map_err(tracerr::wrap!())?;
        if notification.recipient_id != actor_id {
            return Err(tracerr::new!(E::NotRecipient(actor_id)));
        }
        if notification.is_read {
            return Ok(notification);
        }

        notification.is_read = true;
        tx.execute(Update(notification.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(notification)
    }
}

/// Error of [`ReadNotification`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] is not the recipient of the [`Notification`].
    #[display("`User(id: {_0})` is not the recipient")]
    NotRecipient(#[error(not(source))] user::Id),

    /// [`Notification`] with the provided ID doesn't exist.
    #[display("`Notification(id: {_0})` doesn't exist")]
    NotificationNotExists(#[error(not(source))] notification::Id),
}

impl ExecutionError {
    /// Returns the [`ErrorKind`] of this [`ExecutionError`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(_) => ErrorKind::Internal,
            Self::NotRecipient(_) => ErrorKind::Forbidden,
            Self::NotificationNotExists(_) => ErrorKind::NotFound,
        }
    }
}
