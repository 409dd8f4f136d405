//! Rent request flow over the in-process infrastructure.

mod common;

use std::time::Duration;

use service::{
    command::{
        create_rent_request, CancelRentRequest, ConfirmRentFinalize,
        ConfirmRentViewing, CreateRentRequest, ErrorKind,
        UpdateRentRequestStatus,
    },
    domain::{
        notification,
        rent_request::{self, Status},
        room, user,
    },
    query,
    read::{notification::ForRecipient, rent_request::ByTenant},
    workflow::rent::Decision,
    Command as _,
};

use self::common::{list_room, register, setup};

#[tokio::test]
async fn full_rent_flow_marks_room_rented() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let tenant = register(&svc, "Tom", user::Role::Renter).await;
    let r = list_room(&svc, &owner, "Sunny loft", 400, "Hanoi").await;

    let request = svc
        .execute(CreateRentRequest {
            tenant_id: tenant.id,
            room_id: r.id,
        })
        .await
        .unwrap();
    assert_eq!(request.status, Status::Pending);

    let request = svc
        .execute(UpdateRentRequestStatus {
            actor_id: owner.id,
            request_id: request.id,
            decision: Decision::Approve,
        })
        .await
        .unwrap();
    assert_eq!(request.status, Status::Approved);

    let request = svc
        .execute(ConfirmRentViewing {
            actor_id: tenant.id,
            request_id: request.id,
        })
        .await
        .unwrap();
    assert_eq!(request.status, Status::ViewConfirmed);

    let request = svc
        .execute(ConfirmRentFinalize {
            actor_id: tenant.id,
            request_id: request.id,
        })
        .await
        .unwrap();
    assert_eq!(request.status, Status::ViewConfirmed);
    assert!(request.finalization.tenant);
    assert!(!request.finalization.owner);

    let request = svc
        .execute(ConfirmRentFinalize {
            actor_id: owner.id,
            request_id: request.id,
        })
        .await
        .unwrap();
    assert_eq!(request.status, Status::BothFinalized);

    let r = svc
        .execute(query::room::ById::by(r.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(r.status, room::Status::Rented);
}

#[tokio::test]
async fn rejects_duplicate_open_request() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let tenant = register(&svc, "Tom", user::Role::Renter).await;
    let r = list_room(&svc, &owner, "Sunny loft", 400, "Hanoi").await;

    let cmd = CreateRentRequest {
        tenant_id: tenant.id,
        room_id: r.id,
    };
    let first = svc.execute(cmd).await.unwrap();

    let err = svc.execute(cmd).await.unwrap_err();
    assert!(matches!(
        err.as_ref(),
        create_rent_request::ExecutionError::AlreadyRequested(id)
            if *id == first.id,
    ));
    assert_eq!(err.as_ref().kind(), ErrorKind::InvalidState);

    // Once rejected, the tenant may ask again.
    _ = svc
        .execute(UpdateRentRequestStatus {
            actor_id: owner.id,
            request_id: first.id,
            decision: Decision::Reject,
        })
        .await
        .unwrap();
    _ = svc.execute(cmd).await.unwrap();

    let requests = svc
        .execute(query::rent_requests::ByTenant::by(ByTenant(tenant.id)))
        .await
        .unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn owner_cannot_rent_own_room() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let r = list_room(&svc, &owner, "Sunny loft", 400, "Hanoi").await;

    let err = svc
        .execute(CreateRentRequest {
            tenant_id: owner.id,
            room_id: r.id,
        })
        .await
        .unwrap_err();

    assert_eq!(err.as_ref().kind(), ErrorKind::Forbidden);
}

#[tokio::test]
async fn rejects_wrong_actor_and_state() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let tenant = register(&svc, "Tom", user::Role::Renter).await;
    let r = list_room(&svc, &owner, "Sunny loft", 400, "Hanoi").await;
    let request = svc
        .execute(CreateRentRequest {
            tenant_id: tenant.id,
            room_id: r.id,
        })
        .await
        .unwrap();

    let err = svc
        .execute(UpdateRentRequestStatus {
            actor_id: tenant.id,
            request_id: request.id,
            decision: Decision::Approve,
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::Forbidden);

    let err = svc
        .execute(ConfirmRentViewing {
            actor_id: tenant.id,
            request_id: request.id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::InvalidState);

    let err = svc
        .execute(CancelRentRequest {
            actor_id: owner.id,
            request_id: request.id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::InvalidState);

    let err = svc
        .execute(ConfirmRentViewing {
            actor_id: tenant.id,
            request_id: rent_request::Id::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn notifications_are_persisted_and_published() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let tenant = register(&svc, "Tom", user::Role::Renter).await;
    let r = list_room(&svc, &owner, "Sunny loft", 400, "Hanoi").await;

    let mut inbox = svc.notifier().subscribe(&owner.id.into()).await.unwrap();

    _ = svc
        .execute(CreateRentRequest {
            tenant_id: tenant.id,
            room_id: r.id,
        })
        .await
        .unwrap();

    let delivered = tokio::time::timeout(Duration::from_secs(1), inbox.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(delivered.recipient_id, owner.id);
    assert_eq!(delivered.kind, notification::Kind::RentRequest);
    assert_eq!(
        delivered.topic().to_string(),
        format!("/topic/notifications/{}", owner.id),
    );

    let stored = svc
        .execute(query::notifications::ByRecipient::by(ForRecipient {
            recipient_id: owner.id,
            unread_only: true,
        }))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, delivered.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_finalization_completes_rental() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let tenant = register(&svc, "Tom", user::Role::Renter).await;
    let r = list_room(&svc, &owner, "Sunny loft", 400, "Hanoi").await;

    let request = svc
        .execute(CreateRentRequest {
            tenant_id: tenant.id,
            room_id: r.id,
        })
        .await
        .unwrap();
    _ = svc
        .execute(UpdateRentRequestStatus {
            actor_id: owner.id,
            request_id: request.id,
            decision: Decision::Approve,
        })
        .await
        .unwrap();
    _ = svc
        .execute(ConfirmRentViewing {
            actor_id: tenant.id,
            request_id: request.id,
        })
        .await
        .unwrap();

    let (by_tenant, by_owner) = tokio::join!(
        svc.execute(ConfirmRentFinalize {
            actor_id: tenant.id,
            request_id: request.id,
        }),
        svc.execute(ConfirmRentFinalize {
            actor_id: owner.id,
            request_id: request.id,
        }),
    );
    let statuses = [by_tenant.unwrap().status, by_owner.unwrap().status];
    assert!(statuses.contains(&Status::BothFinalized));

    let requests = svc
        .execute(query::rent_requests::ByTenant::by(ByTenant(tenant.id)))
        .await
        .unwrap();
    assert_eq!(requests[0].status, Status::BothFinalized);

    let r = svc
        .execute(query::room::ById::by(r.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(r.status, room::Status::Rented);
}
