// Shared list-query building: search filter, ordering, paging.

use sqlx::{QueryBuilder, Sqlite};

use eventdesk_core::application::ListParams;
use eventdesk_core::domain::{SortField, SortOrder};

pub(crate) fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Name => "name",
        SortField::CreatedAt => "created_at",
        SortField::StartDate => "start_date",
    }
}

/// Stored alongside `name` as `name_folded`. SQLite's `LOWER()` folds ASCII
/// only, so both sides of a search are folded here.
pub(crate) fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// ` WHERE name_folded LIKE ?` when the params carry a search term.
pub(crate) fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, params: &ListParams) {
    if let Some(pattern) = params.like_pattern() {
        qb.push(" WHERE name_folded LIKE ");
        qb.push_bind(pattern);
        qb.push(r" ESCAPE '\'");
    }
}

/// ORDER BY, LIMIT and OFFSET. Unsorted lists are newest first; `id` breaks
/// ties so pages never overlap.
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, params: &ListParams) {
    let (column, order) = params
        .sort
        .map_or(("created_at", SortOrder::Desc), |(field, order)| {
            (sort_column(field), order)
        });
    qb.push(format!(" ORDER BY {column} {}, id ASC", order.as_sql()));
    qb.push(" LIMIT ");
    qb.push_bind(i64::from(params.limit));
    qb.push(" OFFSET ");
    qb.push_bind(i64::try_from(params.offset).unwrap_or(i64::MAX));
}

/// ` (?, ?, ...)` for an `IN` clause.
pub(crate) fn push_in_list<'a>(qb: &mut QueryBuilder<'a, Sqlite>, values: &'a [String]) {
    qb.push(" (");
    let mut separated = qb.separated(", ");
    for value in values {
        separated.push_bind(value.as_str());
    }
    separated.push_unseparated(")");
}
