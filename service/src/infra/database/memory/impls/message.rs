//! [`Message`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Message,
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read::message::Between,
};

impl<C> Database<Select<By<Vec<Message>, Between>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Message>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Message>, Between>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Between(a, b) = by.into_inner();

        let mut messages = self
            .0
            .select_all(|m: &Message| m.is_between(a, b))
            .await
            .map_err(tracerr::wrap!())?;
        messages.sort_by_key(|m| (m.created_at, m.id));
        Ok(messages)
    }
}
