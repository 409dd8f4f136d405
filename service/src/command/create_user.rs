//! [`Command`] for creating a new [`User`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Phone, Role};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::{Command, ErrorKind};

/// [`Command`] for creating a new [`User`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Email`] of a new [`User`].
    pub email: Option<user::Email>,

    /// [`Phone`] of a new [`User`].
    pub phone: Option<user::Phone>,

    /// [`Role`] of a new [`User`].
    pub role: user::Role,
}

impl<Db, Nt> Command<CreateUser> for Service<Db, Nt>
where
    Db: for<'l> Database<
            Select<By<Option<User>, &'l user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(email = ?cmd.email, phone = ?cmd.phone, role = %cmd.role),
    )]
    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            email,
            phone,
            role,
        } = cmd;

        if email.is_none() && phone.is_none() {
            return Err(tracerr::new!(E::NoContactInfo));
        }

        if let Some(email) = &email {
            let u = self
                .database()
                .execute(Select(By::new(email)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if u.is_some() {
                return Err(tracerr::new!(E::EmailOccupied(email.clone())));
            }
        }

        let user = User {
            id: user::Id::new(),
            name,
            email,
            phone,
            role,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("created `User(id: {})`", user.id);
        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Email`] is already occupied.
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] user::Email),

    /// No contact information provided.
    #[display("No contact information provided")]
    NoContactInfo,
}

impl ExecutionError {
    /// Returns the [`ErrorKind`] of this [`ExecutionError`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(_) => ErrorKind::Internal,
            Self::EmailOccupied(_) => ErrorKind::InvalidState,
            Self::NoContactInfo => ErrorKind::Invalid,
        }
    }
}
