//! [`Notification`]-related [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Notification,
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read::notification::ForRecipient,
};

impl<C> Database<Select<By<Vec<Notification>, ForRecipient>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Notification>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Notification>, ForRecipient>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ForRecipient {
            recipient_id,
            unread_only,
        } = by.into_inner();

        let mut notifications = self
            .0
            .select_all(|n: &Notification| {
                n.recipient_id == recipient_id && !(unread_only && n.is_read)
            })
            .await
            .map_err(tracerr::wrap!())?;
        notifications.sort_by_key(|n| (Reverse(n.created_at), n.id));
        Ok(notifications)
    }
}
