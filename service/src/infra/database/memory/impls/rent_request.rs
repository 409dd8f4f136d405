//! [`RentRequest`]-related [`Database`] implementations.

use std::{cmp::Reverse, collections::HashSet};

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{RentRequest, Room},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read::rent_request::{ByTenant, ForOwner, Open},
};

impl<C> Database<Select<By<Vec<RentRequest>, ForOwner>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<RentRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<RentRequest>, ForOwner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ForOwner(owner_id) = by.into_inner();

        let rooms = self
            .0
            .select_all(|r: &Room| r.owner_id == owner_id)
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|r| r.id)
            .collect::<HashSet<_>>();

        let mut requests = self
            .0
            .select_all(|r: &RentRequest| rooms.contains(&r.room_id))
            .await
            .map_err(tracerr::wrap!())?;
        requests.sort_by_key(|r| (Reverse(r.created_at), r.id));
        Ok(requests)
    }
}

impl<C> Database<Select<By<Vec<RentRequest>, ByTenant>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<RentRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<RentRequest>, ByTenant>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ByTenant(tenant_id) = by.into_inner();

        let mut requests = self
            .0
            .select_all(|r: &RentRequest| r.tenant_id == tenant_id)
            .await
            .map_err(tracerr::wrap!())?;
        requests.sort_by_key(|r| (Reverse(r.created_at), r.id));
        Ok(requests)
    }
}

impl<C> Database<Select<By<Option<RentRequest>, Open>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<RentRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RentRequest>, Open>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Open { tenant_id, room_id } = by.into_inner();

        Ok(self
            .0
            .select_all(|r: &RentRequest| {
                r.tenant_id == tenant_id
                    && r.room_id == room_id
                    && r.status.is_open()
            })
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .next())
    }
}
