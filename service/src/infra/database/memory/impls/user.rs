//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
};

impl<'l, C> Database<Select<By<Option<User>, &'l user::Email>>>
    for Memory<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'l user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();

        Ok(self
            .0
            .select_all(|u: &User| {
                u.email.as_ref().is_some_and(|e| {
                    AsRef::<str>::as_ref(e)
                        .eq_ignore_ascii_case(AsRef::<str>::as_ref(email))
                })
            })
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .next())
    }
}
