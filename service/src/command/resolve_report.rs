//! [`Command`] for moderating a pending [`Report`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Publish, Select, Transact, Transacted,
        Update,
    },
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        notification, report, room, user, Notification, Report, Room, User,
    },
    infra::{database, notifier, Database, Notifier},
    Service,
};

use super::{Command, ErrorKind};

/// [`Command`] for an admin to resolve or dismiss a pending [`Report`].
///
/// Resolving hides the reported [`Room`] from listings. The reporter is
/// notified either way.
#[derive(Clone, Copy, Debug)]
pub struct ResolveReport {
    /// ID of the [`User`] moderating.
    pub actor_id: user::Id,

    /// ID of the [`Report`] to moderate.
    pub report_id: report::Id,

    /// [`Resolution`] of the [`Report`].
    pub resolution: Resolution,
}

/// Moderation outcome of a [`Report`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// [`Report`] is confirmed and the [`Room`] gets hidden.
    Resolved,

    /// [`Report`] is dismissed.
    Dismissed,
}

impl Resolution {
    /// Returns the [`report::Status`] this [`Resolution`] leads to.
    #[must_use]
    pub const fn status(self) -> report::Status {
        match self {
            Self::Resolved => report::Status::Resolved,
            Self::Dismissed => report::Status::Dismissed,
        }
    }
}

impl<Db, Nt> Command<ResolveReport> for Service<Db, Nt>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<Report, report::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Report>, report::Id>>,
            Ok = Option<Report>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Room, room::Id>>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Update<Report>, Err = Traced<database::Error>>
        + Database<Update<Room>, Err = Traced<database::Error>>
        + Database<Insert<Notification>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Nt: Notifier<
        Publish<Notification>,
        Ok = usize,
        Err = Traced<notifier::Error>,
    >,
{
    type Ok = Report;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(
            actor_id = %cmd.actor_id,
            report_id = %cmd.report_id,
            resolution = ?cmd.resolution,
        ),
    )]
    async fn execute(
        &self,
        cmd: ResolveReport,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ResolveReport {
            actor_id,
            report_id,
            resolution,
        } = cmd;

        let admin = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(actor_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(actor_id))
            .map_err(tracerr::wrap!())?;
        if !admin.is_admin() {
            return Err(tracerr::new!(E::NotAdmin(actor_id)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Report, _>::new(report_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut report = tx
            .execute(Select(By::<Option<Report>, _>::new(report_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReportNotExists(report_id))
            .map_err(tracerr::wrap!())?;
        if report.status != report::Status::Pending {
            return Err(tracerr::new!(E::AlreadyModerated(report.status)));
        }

        report.status = resolution.status();
        report.resolved_at = Some(DateTime::now().coerce());
        tx.execute(Update(report.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if resolution == Resolution::Resolved {
            tx.execute(Lock(By::<Room, _>::new(report.room_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            let mut room = tx
                .execute(Select(By::<Option<Room>, _>::new(report.room_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::RoomNotExists(report.room_id))
                .map_err(tracerr::wrap!())?;
            room.status = room::Status::Hidden;
            tx.execute(Update(room))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        let notification = Notification::new(
            report.reporter_id,
            notification::Kind::Report,
            format!("Your report has been {}", report.status).into(),
        );
        tx.execute(Insert(notification.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Report(id: {report_id})` is `{}`", report.status);
        self.publish(vec![notification]).await;

        Ok(report)
    }
}

/// Error of [`ResolveReport`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Report`] is not pending anymore.
    #[display("`Report` is already `{_0}`")]
    AlreadyModerated(#[error(not(source))] report::Status),

    /// [`User`] is not an admin.
    #[display("`User(id: {_0})` is not an admin")]
    NotAdmin(#[error(not(source))] user::Id),

    /// [`Report`] with the provided ID doesn't exist.
    #[display("`Report(id: {_0})` doesn't exist")]
    ReportNotExists(#[error(not(source))] report::Id),

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
            Self::AlreadyModerated(_) => ErrorKind::InvalidState,
            Self::NotAdmin(_) => ErrorKind::Forbidden,
            Self::ReportNotExists(_)
            | Self::RoomNotExists(_)
            | Self::UserNotExists(_) => ErrorKind::NotFound,
        }
    }
}
