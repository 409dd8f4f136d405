//! [`ViewRequest`]-related [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{view_request, ViewRequest},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read::view_request::{ByRenter, ForOwner, Pending},
};

impl<C> Database<Select<By<Vec<ViewRequest>, ForOwner>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<ViewRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<ViewRequest>, ForOwner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ForOwner(owner_id) = by.into_inner();

        let mut requests = self
            .0
            .select_all(|r: &ViewRequest| r.owner_id == owner_id)
            .await
            .map_err(tracerr::wrap!())?;
        requests.sort_by_key(|r| (Reverse(r.created_at), r.id));
        Ok(requests)
    }
}

impl<C> Database<Select<By<Vec<ViewRequest>, ByRenter>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<ViewRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<ViewRequest>, ByRenter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ByRenter(renter_id) = by.into_inner();

        let mut requests = self
            .0
            .select_all(|r: &ViewRequest| r.renter_id == renter_id)
            .await
            .map_err(tracerr::wrap!())?;
        requests.sort_by_key(|r| (Reverse(r.created_at), r.id));
        Ok(requests)
    }
}

impl<C> Database<Select<By<Option<ViewRequest>, Pending>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<ViewRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<ViewRequest>, Pending>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Pending { renter_id, room_id } = by.into_inner();

        Ok(self
            .0
            .select_all(|r: &ViewRequest| {
                r.renter_id == renter_id
                    && r.room_id == room_id
                    && r.status == view_request::Status::Pending
            })
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .next())
    }
}
