//! Chat, notification and moderation flows over the in-process
//! infrastructure.

mod common;

use service::{
    command::{
        resolve_report::Resolution, CreateReport, ErrorKind,
        ReadNotification, ResolveReport, SendMessage,
    },
    domain::{message, notification, report, room, user},
    query,
    read::{self, message::Between, notification::ForRecipient},
    Command as _,
};

use self::common::{list_room, register, setup};

#[tokio::test]
async fn messages_notify_recipient() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let renter = register(&svc, "Rita", user::Role::Renter).await;
    let r = list_room(&svc, &owner, "Garden studio", 300, "Hue").await;

    let mut inbox = svc.notifier().subscribe(&owner.id.into()).await.unwrap();

    for (from, to, text) in [
        (&renter, &owner, "Is it still free?"),
        (&owner, &renter, "Yes, it is"),
    ] {
        _ = svc
            .execute(SendMessage {
                sender_id: from.id,
                recipient_id: to.id,
                room_id: Some(r.id),
                content: message::Content::new(text).unwrap(),
            })
            .await
            .unwrap();
    }

    let delivered = inbox.recv().await.unwrap();
    assert_eq!(delivered.kind, notification::Kind::Message);
    assert_eq!(delivered.text.to_string(), "New message from Rita");

    let conversation = svc
        .execute(query::messages::Conversation::by(Between(owner.id, renter.id)))
        .await
        .unwrap();
    let texts = conversation
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>();
    assert_eq!(texts, ["Is it still free?", "Yes, it is"]);

    let err = svc
        .execute(SendMessage {
            sender_id: owner.id,
            recipient_id: owner.id,
            room_id: None,
            content: message::Content::new("Note to self").unwrap(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::Invalid);
}

#[tokio::test]
async fn only_recipient_reads_notification() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let renter = register(&svc, "Rita", user::Role::Renter).await;

    _ = svc
        .execute(SendMessage {
            sender_id: renter.id,
            recipient_id: owner.id,
            room_id: None,
            content: message::Content::new("Hello").unwrap(),
        })
        .await
        .unwrap();
    let unread = ForRecipient {
        recipient_id: owner.id,
        unread_only: true,
    };
    let notifications = svc
        .execute(query::notifications::ByRecipient::by(unread))
        .await
        .unwrap();
    let id = notifications[0].id;

    let err = svc
        .execute(ReadNotification {
            actor_id: renter.id,
            notification_id: id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::Forbidden);

    for _ in 0..2 {
        let n = svc
            .execute(ReadNotification {
                actor_id: owner.id,
                notification_id: id,
            })
            .await
            .unwrap();
        assert!(n.is_read);
    }

    let notifications = svc
        .execute(query::notifications::ByRecipient::by(unread))
        .await
        .unwrap();
    assert!(notifications.is_empty());
}

#[tokio::test]
async fn resolved_report_hides_room() {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    let renter = register(&svc, "Rita", user::Role::Renter).await;
    let admin = register(&svc, "Adam", user::Role::Admin).await;
    let r = list_room(&svc, &owner, "Garden studio", 300, "Hue").await;

    let err = svc
        .execute(CreateReport {
            reporter_id: owner.id,
            room_id: r.id,
            reason: report::Reason::new("Mine").unwrap(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::Forbidden);

    let filed = svc
        .execute(CreateReport {
            reporter_id: renter.id,
            room_id: r.id,
            reason: report::Reason::new("Photos are fake").unwrap(),
        })
        .await
        .unwrap();
    let pending = svc
        .execute(query::reports::Pending::by(read::report::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let err = svc
        .execute(ResolveReport {
            actor_id: renter.id,
            report_id: filed.id,
            resolution: Resolution::Resolved,
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::Forbidden);

    let resolved = svc
        .execute(ResolveReport {
            actor_id: admin.id,
            report_id: filed.id,
            resolution: Resolution::Resolved,
        })
        .await
        .unwrap();
    assert_eq!(resolved.status, report::Status::Resolved);
    assert!(resolved.resolved_at.is_some());

    let r = svc
        .execute(query::room::ById::by(r.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(r.status, room::Status::Hidden);

    let err = svc
        .execute(ResolveReport {
            actor_id: admin.id,
            report_id: filed.id,
            resolution: Resolution::Dismissed,
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::InvalidState);

    let inbox = svc
        .execute(query::notifications::ByRecipient::by(ForRecipient {
            recipient_id: renter.id,
            unread_only: false,
        }))
        .await
        .unwrap();
    assert_eq!(inbox[0].kind, notification::Kind::Report);
}
