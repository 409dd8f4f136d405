//! [`Room`]-related read definitions.

#[cfg(doc)]
use crate::domain::Room;

pub mod list {
    //! [`Room`] list definitions.

    use std::cmp::Ordering;

    use common::{
        define_pagination,
        filter::{Condition, Operator},
        pagination::{Order, Sort},
        Filter,
    };
    use itertools::Itertools as _;
    use rust_decimal::Decimal;
    use tracing as log;

    use crate::domain::{room, user, Room};

    define_pagination!(Room, Criteria);

    /// Criteria of [`Room`]s to be listed.
    #[derive(Clone, Debug, Default)]
    pub struct Criteria {
        /// Free-text search over titles, descriptions and addresses.
        pub search: Option<SearchPattern>,

        /// [`Sort`]ing of the list.
        pub sort: Sort<SortField>,

        /// [`Filter`] of the list.
        pub filter: Filter,
    }

    impl Criteria {
        /// Returns the [`Predicate`]s of the [`Filter`], skipping the
        /// conditions not applicable to [`Room`]s.
        #[must_use]
        pub fn predicates(&self) -> Vec<Predicate> {
            self.filter
                .conditions()
                .iter()
                .filter_map(|cond| {
                    let predicate = Predicate::from_condition(cond);
                    if predicate.is_none() {
                        log::debug!("skipping inapplicable filter `{cond}`");
                    }
                    predicate
                })
                .collect()
        }

        /// Checks whether the provided [`Room`] is to be listed according to
        /// these [`Criteria`] and the provided `predicates` built out of them.
        #[must_use]
        pub fn matches(&self, room: &Room, predicates: &[Predicate]) -> bool {
            room.status == room::Status::Available
                && self.search.as_ref().map_or(true, |s| s.matches(room))
                && predicates.iter().all(|p| p.matches(room))
        }

        /// Compares two [`Room`]s according to the [`Sort`] of these
        /// [`Criteria`], falling back to their IDs for a stable order.
        #[must_use]
        pub fn compare(&self, a: &Room, b: &Room) -> Ordering {
            self.sort
                .order
                .apply(self.sort.field.compare(a, b))
                .then_with(|| a.id.cmp(&b.id))
        }
    }

    /// Field to sort [`Room`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub enum SortField {
        /// [`room::Id`].
        #[default]
        Id,

        /// [`room::Price`].
        Price,

        /// [`room::Area`].
        Area,

        /// [`room::Capacity`].
        Capacity,

        /// [`room::Title`], case-insensitively.
        Title,

        /// Creation date and time.
        CreatedAt,
    }

    impl SortField {
        /// Parses a [`SortField`], falling back to [`SortField::Id`] on
        /// unknown fields.
        #[must_use]
        pub fn parse_lenient(input: &str) -> Self {
            match input.trim() {
                "price" => Self::Price,
                "area" => Self::Area,
                "capacity" => Self::Capacity,
                "title" => Self::Title,
                "createdAt" | "created_at" => Self::CreatedAt,
                other => {
                    if other != "id" {
                        log::debug!("unknown sort field `{other}`, using `id`");
                    }
                    Self::Id
                }
            }
        }

        /// Compares two [`Room`]s by this [`SortField`] in ascending order.
        #[must_use]
        pub fn compare(self, a: &Room, b: &Room) -> Ordering {
            match self {
                Self::Id => a.id.cmp(&b.id),
                Self::Price => a.price.cmp(&b.price),
                Self::Area => a.area.cmp(&b.area),
                Self::Capacity => a.capacity.cmp(&b.capacity),
                Self::Title => a
                    .title
                    .as_str()
                    .to_lowercase()
                    .cmp(&b.title.as_str().to_lowercase()),
                Self::CreatedAt => a.created_at.cmp(&b.created_at),
            }
        }
    }

    /// Builds a [`Sort`] out of the raw `field` and `order`, leniently.
    #[must_use]
    pub fn sort(field: Option<&str>, order: Option<&str>) -> Sort<SortField> {
        Sort {
            field: field.map(SortField::parse_lenient).unwrap_or_default(),
            order: order.map(Order::parse_lenient).unwrap_or_default(),
        }
    }

    /// Pattern matching any of its words in a [`Room`]'s title, description
    /// or address, case-insensitively.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct SearchPattern(Vec<String>);

    impl SearchPattern {
        /// Creates a new [`SearchPattern`] out of the given `input`.
        ///
        /// Returns [`None`] if the `input` contains no words.
        #[must_use]
        pub fn new(input: &str) -> Option<Self> {
            let words = input
                .split_whitespace()
                .map(str::to_lowercase)
                .unique()
                .collect::<Vec<_>>();
            (!words.is_empty()).then_some(Self(words))
        }

        /// Checks whether the provided [`Room`] matches this
        /// [`SearchPattern`].
        #[must_use]
        pub fn matches(&self, room: &Room) -> bool {
            let haystacks = [
                room.title.as_str().to_lowercase(),
                room.description.as_str().to_lowercase(),
                room.address.as_str().to_lowercase(),
            ];
            self.0
                .iter()
                .any(|word| haystacks.iter().any(|h| h.contains(word.as_str())))
        }
    }

    /// Numeric field of a [`Room`].
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum NumericField {
        /// [`room::Price`].
        Price,

        /// [`room::Area`].
        Area,

        /// [`room::Capacity`].
        Capacity,
    }

    impl NumericField {
        /// Returns the value of this [`NumericField`] in the provided
        /// [`Room`].
        fn value(self, room: &Room) -> Decimal {
            match self {
                Self::Price => room.price.into(),
                Self::Area => room.area.into(),
                Self::Capacity => u16::from(room.capacity).into(),
            }
        }
    }

    /// Textual field of a [`Room`].
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TextField {
        /// [`room::Title`].
        Title,

        /// [`room::Description`].
        Description,

        /// [`room::Address`].
        Address,

        /// [`room::City`].
        City,

        /// [`room::District`].
        District,
    }

    impl TextField {
        /// Returns the lowercased value of this [`TextField`] in the provided
        /// [`Room`], if any.
        fn value(self, room: &Room) -> Option<String> {
            let value = match self {
                Self::Title => room.title.as_str(),
                Self::Description => room.description.as_str(),
                Self::Address => room.address.as_str(),
                Self::City => room.city.as_str(),
                Self::District => room.district.as_ref()?.as_str(),
            };
            Some(value.to_lowercase())
        }
    }

    /// Typed predicate over [`Room`]s, built out of a filter [`Condition`].
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum Predicate {
        /// Numeric comparison.
        Compare {
            /// Compared [`NumericField`].
            field: NumericField,

            /// Comparison [`Operator`], never [`Operator::Contains`].
            operator: Operator,

            /// Value to compare with.
            value: Decimal,
        },

        /// Substring match over the decimal text of a [`NumericField`].
        NumericContains {
            /// Matched [`NumericField`].
            field: NumericField,

            /// Substring to look for.
            needle: String,
        },

        /// Case-insensitive comparison of a [`TextField`].
        Text {
            /// Compared [`TextField`].
            field: TextField,

            /// Comparison [`Operator`].
            operator: Operator,

            /// Lowercased value to compare with.
            value: String,
        },

        /// Exact [`room::Status`] match.
        Status(room::Status),

        /// Exact owner match.
        Owner(user::Id),

        /// Matches nothing, produced by a malformed value of a known field.
        Never,
    }

    impl Predicate {
        /// Builds a [`Predicate`] out of the provided [`Condition`].
        ///
        /// Returns [`None`] if the [`Condition`] refers to an unknown field,
        /// or uses an [`Operator`] unsupported by the field.
        #[must_use]
        pub fn from_condition(cond: &Condition) -> Option<Self> {
            let Condition {
                field,
                operator,
                value,
            } = cond;
            let operator = *operator;

            let numeric = match field.as_str() {
                "price" => Some(NumericField::Price),
                "area" => Some(NumericField::Area),
                "capacity" => Some(NumericField::Capacity),
                _ => None,
            };
            if let Some(field) = numeric {
                if operator == Operator::Contains {
                    return Some(Self::NumericContains {
                        field,
                        needle: value.clone(),
                    });
                }
                return Some(value.parse::<Decimal>().map_or(
                    Self::Never,
                    |value| Self::Compare {
                        field,
                        operator,
                        value,
                    },
                ));
            }

            let text = match field.as_str() {
                "title" => Some(TextField::Title),
                "description" => Some(TextField::Description),
                "address" => Some(TextField::Address),
                "city" => Some(TextField::City),
                "district" => Some(TextField::District),
                _ => None,
            };
            if let Some(field) = text {
                return Some(Self::Text {
                    field,
                    operator,
                    value: value.to_lowercase(),
                });
            }

            match (field.as_str(), operator) {
                ("status", Operator::Eq) => Some(
                    value
                        .to_uppercase()
                        .parse()
                        .map_or(Self::Never, Self::Status),
                ),
                ("owner" | "ownerId" | "owner_id", Operator::Eq) => {
                    Some(value.parse().map_or(Self::Never, Self::Owner))
                }
                _ => None,
            }
        }

        /// Checks whether the provided [`Room`] satisfies this [`Predicate`].
        #[must_use]
        pub fn matches(&self, room: &Room) -> bool {
            match self {
                Self::Compare {
                    field,
                    operator,
                    value,
                } => compare(*operator, &field.value(room), value),
                Self::NumericContains { field, needle } => {
                    field.value(room).to_string().contains(needle.as_str())
                }
                Self::Text {
                    field,
                    operator,
                    value,
                } => field.value(room).is_some_and(|actual| {
                    if *operator == Operator::Contains {
                        actual.contains(value.as_str())
                    } else {
                        compare(*operator, actual.as_str(), value.as_str())
                    }
                }),
                Self::Status(status) => room.status == *status,
                Self::Owner(id) => room.owner_id == *id,
                Self::Never => false,
            }
        }
    }

    /// Compares the `actual` value with the `expected` one using the provided
    /// [`Operator`].
    fn compare<T: Ord + ?Sized>(operator: Operator, actual: &T, expected: &T) -> bool {
        let ord = actual.cmp(expected);
        match operator {
            Operator::Eq => ord.is_eq(),
            Operator::Gt => ord.is_gt(),
            Operator::Lt => ord.is_lt(),
            Operator::Gte => ord.is_ge(),
            Operator::Lte => ord.is_le(),
            Operator::Contains => false,
        }
    }

    #[cfg(test)]
    mod spec {
        use common::{
            filter::{self, Operator},
            pagination::Order,
            DateTime, Filter,
        };
        use rust_decimal::Decimal;

        use crate::domain::{room, user, Room};

        use super::{
            sort, Criteria, NumericField, Predicate, SearchPattern, SortField,
        };

        fn room(title: &str, price: i64, city: &str) -> Room {
            Room {
                id: room::Id::new(),
                owner_id: user::Id::new(),
                title: room::Title::new(title).unwrap(),
                description: room::Description::new("Bright and quiet")
                    .unwrap(),
                address: room::Address::new("12 Kim Ma").unwrap(),
                city: room::City::new(city).unwrap(),
                district: None,
                price: room::Price::new(Decimal::from(price)).unwrap(),
                area: room::Area::new(Decimal::from(25)).unwrap(),
                capacity: room::Capacity::new(2).unwrap(),
                status: room::Status::Available,
                created_at: DateTime::now().coerce(),
            }
        }

        fn predicate(input: &str) -> Option<Predicate> {
            Predicate::from_condition(&filter::parse(input)[0])
        }

        #[test]
        fn numeric_range() {
            let cheap = room("Loft", 300, "Hanoi");
            let pricey = room("Loft", 700, "Hanoi");

            let p = predicate("price:>500").unwrap();
            assert!(!p.matches(&cheap));
            assert!(p.matches(&pricey));

            let p = predicate("price:<300").unwrap();
            assert!(p.matches(&cheap));

            let p = predicate("price<300").unwrap();
            assert!(!p.matches(&cheap));
        }

        #[test]
        fn unparseable_number_matches_nothing() {
            let p = predicate("price:>cheap").unwrap();

            assert_eq!(p, Predicate::Never);
            assert!(!p.matches(&room("Loft", 300, "Hanoi")));
        }

        #[test]
        fn text_is_case_insensitive() {
            let r = room("Sunny LOFT", 300, "Hanoi");

            assert!(predicate("city:hanoi").unwrap().matches(&r));
            assert!(predicate("title~loft").unwrap().matches(&r));
            assert!(!predicate("title:loft").unwrap().matches(&r));
        }

        #[test]
        fn missing_district_never_matches() {
            let r = room("Loft", 300, "Hanoi");

            assert!(!predicate("district~ba").unwrap().matches(&r));
        }

        #[test]
        fn skips_unknown_fields_and_operators() {
            assert_eq!(predicate("age:>18"), None);
            assert_eq!(predicate("status~AVAIL"), None);
            assert!(predicate("status:available").is_some());
        }

        #[test]
        fn combines_conditions() {
            let criteria = Criteria {
                filter: Filter::from("city:Hanoi,price:<500,bogus:1"),
                ..Criteria::default()
            };
            let predicates = criteria.predicates();
            assert_eq!(predicates.len(), 2);

            assert!(criteria.matches(&room("Loft", 300, "Hanoi"), &predicates));
            assert!(!criteria.matches(&room("Loft", 600, "Hanoi"), &predicates));
            assert!(!criteria.matches(&room("Loft", 300, "Hue"), &predicates));
        }

        #[test]
        fn lists_available_only() {
            let mut r = room("Loft", 300, "Hanoi");
            r.status = room::Status::Hidden;

            assert!(!Criteria::default().matches(&r, &[]));
        }

        #[test]
        fn search_matches_any_word() {
            let pattern = SearchPattern::new("  garden LOFT ").unwrap();

            assert!(pattern.matches(&room("Sunny loft", 300, "Hanoi")));
            assert!(!pattern.matches(&room("Studio", 300, "Hanoi")));
            assert_eq!(SearchPattern::new("   "), None);
        }

        #[test]
        fn sort_falls_back_to_id() {
            assert_eq!(SortField::parse_lenient("price"), SortField::Price);
            assert_eq!(SortField::parse_lenient("createdAt"), SortField::CreatedAt);
            assert_eq!(SortField::parse_lenient("rating"), SortField::Id);
        }

        #[test]
        fn sorts_descending() {
            let criteria = Criteria {
                sort: sort(Some("price"), Some("desc")),
                ..Criteria::default()
            };
            assert_eq!(criteria.sort.order, Order::Descending);

            let mut rooms =
                vec![room("A", 100, "Hanoi"), room("B", 300, "Hanoi")];
            rooms.sort_by(|a, b| criteria.compare(a, b));

            assert_eq!(rooms[0].title.as_str(), "B");
        }

        #[test]
        fn numeric_contains_matches_text() {
            let p = predicate("price~50").unwrap();

            assert!(matches!(
                p,
                Predicate::NumericContains { .. },
            ));
            assert!(p.matches(&room("Loft", 1500, "Hanoi")));
            assert!(!p.matches(&room("Loft", 1400, "Hanoi")));
            assert_eq!(
                predicate("capacity:>1").unwrap(),
                Predicate::Compare {
                    field: NumericField::Capacity,
                    operator: Operator::Gte,
                    value: Decimal::ONE,
                },
            );
        }
    }
}
