//! [`Room`]-related [`Database`] implementations.

use common::operations::{By, Select};
use itertools::Itertools as _;
use tracerr::Traced;

use crate::{
    domain::Room,
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read::room::list,
};

impl<C> Database<Select<By<list::Page, list::Selector>>> for Memory<C>
where
    C: Connection,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector {
            arguments,
            filter: criteria,
        } = by.into_inner();
        let predicates = criteria.predicates();

        let rooms = self
            .0
            .select_all(|room: &Room| criteria.matches(room, &predicates))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(list::Page::cut(
            arguments,
            rooms.into_iter().sorted_by(|a, b| criteria.compare(a, b)),
        ))
    }
}
