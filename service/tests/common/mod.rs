//! Fixtures shared by the [`Service`] integration tests.

#![allow(dead_code, reason = "not every test uses every fixture")]

use std::str::FromStr as _;

use rust_decimal::Decimal;
use service::{
    command::{CreateRoom, CreateUser},
    domain::{room, user, Room, User},
    infra::{Hub, Memory},
    Command as _, Config, Service,
};

/// [`Service`] wired over the in-process infrastructure.
pub type Svc = Service<Memory, Hub>;

/// Creates a new [`Svc`] with the default [`Config`].
pub fn setup() -> Svc {
    _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let config = Config::default();
    let hub = Hub::new(config.notifications.capacity);
    Service::new(config, Memory::new(), hub)
}

/// Registers a new [`User`] with the provided `name` and [`user::Role`].
pub async fn register(svc: &Svc, name: &str, role: user::Role) -> User {
    svc.execute(CreateUser {
        name: user::Name::new(name).unwrap(),
        email: user::Email::new(format!(
            "{}@example.com",
            name.to_lowercase().replace(' ', "."),
        )),
        phone: Some(user::Phone::from_str("+84 912 345 678").unwrap()),
        role,
    })
    .await
    .unwrap()
}

/// Lists a new [`Room`] of the provided `owner`.
pub async fn list_room(
    svc: &Svc,
    owner: &User,
    title: &str,
    price: i64,
    city: &str,
) -> Room {
    svc.execute(CreateRoom {
        actor_id: owner.id,
        title: room::Title::new(title).unwrap(),
        description: room::Description::new(format!("{title} near the park"))
            .unwrap(),
        address: room::Address::new("12 Kim Ma").unwrap(),
        city: room::City::new(city).unwrap(),
        district: None,
        price: room::Price::new(Decimal::from(price)).unwrap(),
        area: room::Area::new(Decimal::from(20)).unwrap(),
        capacity: room::Capacity::new(2).unwrap(),
    })
    .await
    .unwrap()
}
