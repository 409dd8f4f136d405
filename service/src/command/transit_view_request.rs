//! [`Command`] for applying a [`view::Action`] to a [`ViewRequest`].

use common::operations::{
    By, Commit, Insert, Lock, Publish, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, view_request, Notification, User, ViewRequest},
    infra::{database, notifier, Database, Notifier},
    workflow::view,
    Service,
};

use super::{Command, ErrorKind};

/// [`Command`] for applying a [`view::Action`] to a [`ViewRequest`].
///
/// Accepting without an explicit contact shares the owner's phone (if any)
/// with the renter.
#[derive(Clone, Debug)]
pub struct TransitViewRequest {
    /// ID of the [`User`] performing the [`view::Action`].
    pub actor_id: user::Id,

    /// ID of the [`ViewRequest`] to apply the [`view::Action`] to.
    pub request_id: view_request::Id,

    /// [`view::Action`] to apply.
    pub action: view::Action,
}

impl<Db, Nt> Command<TransitViewRequest> for Service<Db, Nt>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<ViewRequest, view_request::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<ViewRequest>, view_request::Id>>,
            Ok = Option<ViewRequest>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Update<ViewRequest>, Err = Traced<database::Error>>
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
        fields(actor_id = %cmd.actor_id, request_id = %cmd.request_id),
    )]
    async fn execute(
        &self,
        cmd: TransitViewRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let TransitViewRequest {
            actor_id,
            request_id,
            mut action,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<ViewRequest, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut request = tx
            .execute(Select(By::<Option<ViewRequest>, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ViewRequestNotExists(request_id))
            .map_err(tracerr::wrap!())?;

        if let view::Action::Accept { contact, .. } = &mut action {
            if contact.is_none() && actor_id == request.owner_id {
                *contact = tx
                    .execute(Select(By::<Option<User>, _>::new(actor_id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .and_then(|owner| owner.phone);
            }
        }

        let previous = request.status;
        let transition = view::transition(
            view::State {
                status: request.status,
                note: request.note.clone(),
            },
            actor_id,
            view::Parties {
                renter: request.renter_id,
                owner: request.owner_id,
            },
            action,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        let view::State { status, note } = transition.state.clone();
        request.status = status;
        request.note = note;
        tx.execute(Update(request.clone()))
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

        log::info!(
            "`ViewRequest(id: {request_id})` transitioned from `{previous}` \
             to `{}`",
            request.status,
        );
        self.publish(notifications).await;

        Ok(request)
    }
}

/// Error of [`TransitViewRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`view::Action`] is not allowed.
    #[display("{_0}")]
    #[from]
    Transition(view::Error),

    /// [`ViewRequest`] with the provided ID doesn't exist.
    #[display("`ViewRequest(id: {_0})` doesn't exist")]
    ViewRequestNotExists(#[error(not(source))] view_request::Id),
}

impl ExecutionError {
    /// Returns the [`ErrorKind`] of this [`ExecutionError`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(_) => ErrorKind::Internal,
            Self::Transition(e) => e.into(),
            Self::ViewRequestNotExists(_) => ErrorKind::NotFound,
        }
    }
}
