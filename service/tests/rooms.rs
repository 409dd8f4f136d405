//! Room search over the in-process infrastructure.

mod common;

use service::{
    command::{CreateRoom, ErrorKind},
    domain::{room, user},
    query::{self, rooms::List},
    Command as _,
};

use self::common::{list_room, register, setup, Svc};

async fn seeded() -> Svc {
    let svc = setup();
    let owner = register(&svc, "Olga", user::Role::Owner).await;
    for (title, price, city) in [
        ("Sunny loft", 450, "Hanoi"),
        ("Garden studio", 300, "Hanoi"),
        ("Quiet room", 700, "Hanoi"),
        ("Sea view loft", 550, "Da Nang"),
    ] {
        _ = list_room(&svc, &owner, title, price, city).await;
    }
    svc
}

fn titles(page: &service::read::room::list::Page) -> Vec<&str> {
    page.items.iter().map(|r| r.title.as_str()).collect()
}

#[tokio::test]
async fn filters_and_sorts() {
    let svc = seeded().await;

    let page = svc
        .execute(List {
            filter: Some("city:Hanoi,price:<500".into()),
            sort: Some("price".into()),
            order: Some("desc".into()),
            ..List::default()
        })
        .await
        .unwrap();

    assert_eq!(titles(&page), ["Sunny loft", "Garden studio"]);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn searches_any_word() {
    let svc = seeded().await;

    let page = svc
        .execute(List {
            search: Some("LOFT garden".into()),
            sort: Some("title".into()),
            ..List::default()
        })
        .await
        .unwrap();

    assert_eq!(titles(&page), ["Garden studio", "Sea view loft", "Sunny loft"]);
}

#[tokio::test]
async fn paginates() {
    let svc = seeded().await;

    let page = svc
        .execute(List {
            page: Some(1),
            size: Some(3),
            sort: Some("price".into()),
            ..List::default()
        })
        .await
        .unwrap();

    assert_eq!(titles(&page), ["Quiet room"]);
    let info = page.page_info();
    assert_eq!(info.total_items, 4);
    assert_eq!(info.total_pages, 2);
    assert!(!info.has_next_page);
    assert!(info.has_previous_page);

    let err = svc
        .execute(List {
            size: Some(0),
            ..List::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::Invalid);
}

#[tokio::test]
async fn tolerates_garbage_filters() {
    let svc = seeded().await;

    let page = svc
        .execute(List {
            filter: Some("badtoken,,rating:>4".into()),
            sort: Some("popularity".into()),
            ..List::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 4);

    let page = svc
        .execute(List {
            filter: Some("price:>cheap".into()),
            ..List::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn renters_cannot_list_rooms() {
    let svc = setup();
    let renter = register(&svc, "Rita", user::Role::Renter).await;

    let err = svc
        .execute(CreateRoom {
            actor_id: renter.id,
            title: room::Title::new("Attic").unwrap(),
            description: room::Description::new("Small attic").unwrap(),
            address: room::Address::new("1 Hang Bac").unwrap(),
            city: room::City::new("Hanoi").unwrap(),
            district: None,
            price: room::Price::new(100.into()).unwrap(),
            area: room::Area::new(10.into()).unwrap(),
            capacity: room::Capacity::new(1).unwrap(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.as_ref().kind(), ErrorKind::Forbidden);

    let page = svc.execute(List::default()).await.unwrap();
    assert!(page.items.is_empty());

    let missing = svc
        .execute(query::room::ById::by(room::Id::new()))
        .await
        .unwrap();
    assert!(missing.is_none());
}
