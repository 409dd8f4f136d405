//! [`Query`] collection related to the multiple [`Room`]s.

use common::{
    operations::{By, Select},
    Filter,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    command::ErrorKind,
    infra::{database, Database},
    read::room::list,
    Service,
};
#[cfg(doc)]
use crate::{domain::Room, Config};

use super::Query;

/// Searches the available [`Room`]s.
///
/// Every parameter is optional and unknown sort or filter fields are
/// tolerated, so any raw search request may be passed as is.
#[derive(Clone, Debug, Default)]
pub struct List {
    /// Whitespace-separated words, any of which a [`Room`] must mention.
    pub search: Option<String>,

    /// Zero-based page number.
    pub page: Option<i64>,

    /// Page size, [`Config`]ured default if omitted.
    pub size: Option<i64>,

    /// Field to sort by, `id` if omitted or unknown.
    pub sort: Option<String>,

    /// Sort order, `asc` if omitted or unknown.
    pub order: Option<String>,

    /// Raw filter expression, like `city:Hanoi,price:<500`.
    pub filter: Option<String>,
}

impl<Db, Nt> Query<List> for Service<Db, Nt>
where
    Db: Database<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<database::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?query.filter,
            page = ?query.page,
            search = ?query.search,
            size = ?query.size,
        ),
    )]
    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let List {
            search,
            page,
            size,
            sort,
            order,
            filter,
        } = query;
        let config = self.config().rooms;

        let arguments =
            list::Arguments::new(page, size, config.default_page_size)
                .ok_or(E::InvalidPagination)
                .map_err(tracerr::wrap!())?
                .clamp(config.max_page_size);
        let criteria = list::Criteria {
            search: search.as_deref().and_then(list::SearchPattern::new),
            sort: list::sort(sort.as_deref(), order.as_deref()),
            filter: Filter::new(filter),
        };

        self.database()
            .execute(Select(By::new(list::Selector {
                arguments,
                filter: criteria,
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`List`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Requested page is negative or its size is not positive.
    #[display("Invalid pagination arguments")]
    InvalidPagination,
}

impl ExecutionError {
    /// Returns the [`ErrorKind`] of this [`ExecutionError`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(_) => ErrorKind::Internal,
            Self::InvalidPagination => ErrorKind::Invalid,
        }
    }
}
