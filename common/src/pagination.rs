//! Abstractions for pagination.

use std::cmp::Ordering;

use derive_more::Display;

/// A page of items along with the information about the whole collection.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,

    /// Total number of items matching the selection, across all pages.
    pub total: usize,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] by cutting the provided sorted `items` with the
    /// provided [`Arguments`].
    #[must_use]
    pub fn cut(arguments: Arguments, items: impl IntoIterator<Item = I>) -> Self {
        let all = items.into_iter().collect::<Vec<_>>();
        let total = all.len();
        let items = all
            .into_iter()
            .skip(arguments.offset())
            .take(arguments.size)
            .collect();
        Self {
            items,
            arguments,
            total,
        }
    }

    /// Returns [`PageInfo`] of this [`Page`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        let pages = self.total.div_ceil(self.arguments.size);
        PageInfo {
            page: self.arguments.page,
            size: self.arguments.size,
            total_items: self.total,
            total_pages: pages,
            has_next_page: self.arguments.page + 1 < pages,
            has_previous_page: self.arguments.page > 0,
        }
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            arguments: self.arguments,
            total: self.total,
        }
    }
}

/// Information about a [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageInfo {
    /// Zero-based number of the [`Page`].
    pub page: usize,

    /// Maximum number of items on the [`Page`].
    pub size: usize,

    /// Total number of items across all pages.
    pub total_items: usize,

    /// Total number of pages.
    pub total_pages: usize,

    /// Indicator whether there is a next page.
    pub has_next_page: bool,

    /// Indicator whether there is a previous page.
    pub has_previous_page: bool,
}

/// Offset pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Zero-based number of the requested page.
    pub page: usize,

    /// Number of items per page.
    pub size: usize,
}

impl Arguments {
    /// Creates new [`Arguments`], using the provided `default` size if none is
    /// specified.
    ///
    /// Returns [`None`] if the `page` is negative or the `size` is not
    /// positive.
    pub fn new<Num>(
        page: Option<Num>,
        size: Option<Num>,
        default: usize,
    ) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        let page = match page {
            Some(p) => p.try_into().ok()?,
            None => 0,
        };
        let size = match size {
            Some(s) => s.try_into().ok()?,
            None => default,
        };
        (size > 0).then_some(Self { page, size })
    }

    /// Returns a copy of these [`Arguments`] with the `size` limited by the
    /// provided `max`.
    #[must_use]
    pub fn clamp(self, max: usize) -> Self {
        Self {
            size: self.size.clamp(1, max.max(1)),
            ..self
        }
    }

    /// Returns the number of items to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// Sorting order.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    #[default]
    #[display("ASC")]
    Ascending,

    /// Descending order.
    #[display("DESC")]
    Descending,
}

impl Order {
    /// Parses an [`Order`] in a case-insensitive manner, defaulting to
    /// [`Order::Ascending`] on anything unrecognized.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// Applies this [`Order`] to the provided ascending [`Ordering`].
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Sorting of a selection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sort<F> {
    /// Field to sort by.
    pub field: F,

    /// [`Order`] to sort in.
    pub order: Order,
}

impl<F: Default> Default for Sort<F> {
    fn default() -> Self {
        Self {
            field: F::default(),
            order: Order::Ascending,
        }
    }
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of items."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use std::cmp::Ordering;

    use super::{Arguments, Order, Page};

    #[test]
    fn arguments_reject_invalid_input() {
        assert_eq!(Arguments::new::<i32>(Some(-1), None, 10), None);
        assert_eq!(Arguments::new(None, Some(0), 10), None);
        assert_eq!(Arguments::new::<i32>(None, Some(-5), 10), None);
        assert_eq!(Arguments::new::<u32>(None, None, 0), None);
    }

    #[test]
    fn arguments_use_defaults() {
        assert_eq!(
            Arguments::new::<u32>(None, None, 10),
            Some(Arguments { page: 0, size: 10 }),
        );
        assert_eq!(
            Arguments::new(Some(2), Some(5), 10),
            Some(Arguments { page: 2, size: 5 }),
        );
    }

    #[test]
    fn clamps_size() {
        let args = Arguments { page: 1, size: 500 }.clamp(100);

        assert_eq!(args, Arguments { page: 1, size: 100 });
    }

    #[test]
    fn cuts_page_and_counts_total() {
        let page = Page::cut(Arguments { page: 1, size: 3 }, 0..8);

        assert_eq!(page.items, [3, 4, 5]);
        assert_eq!(page.total, 8);

        let info = page.page_info();
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next_page);
        assert!(info.has_previous_page);
    }

    #[test]
    fn page_beyond_end_is_empty() {
        let page = Page::cut(Arguments { page: 4, size: 3 }, 0..8);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 8);
        assert!(!page.page_info().has_next_page);
    }

    #[test]
    fn order_parses_leniently() {
        assert_eq!(Order::parse_lenient("DESC"), Order::Descending);
        assert_eq!(Order::parse_lenient("desc "), Order::Descending);
        assert_eq!(Order::parse_lenient("whatever"), Order::Ascending);
        assert_eq!(Order::Descending.apply(Ordering::Less), Ordering::Greater);
    }
}
