//! [`Report`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{report, Report},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read::report::Pending,
};

impl<C> Database<Select<By<Vec<Report>, Pending>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Report>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Report>, Pending>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut reports = self
            .0
            .select_all(|r: &Report| r.status == report::Status::Pending)
            .await
            .map_err(tracerr::wrap!())?;
        reports.sort_by_key(|r| (r.created_at, r.id));
        Ok(reports)
    }
}
