//! List parameters and pages.

use serde::Deserialize;

use crate::domain::{DomainError, FieldErrors, SortField, SortOrder};

pub const MAX_LIMIT: u32 = 100;

/// What a collection allows: its default page size and sortable fields.
#[derive(Debug, Clone, Copy)]
pub struct ListPolicy {
    pub default_limit: u32,
    pub sortable: &'static [SortField],
}

impl ListPolicy {
    pub const EVENTS: Self = Self {
        default_limit: 20,
        sortable: &[SortField::Name, SortField::CreatedAt, SortField::StartDate],
    };

    pub const LABELS: Self = Self {
        default_limit: 10,
        sortable: &[SortField::Name, SortField::CreatedAt],
    };

    pub const USERS: Self = Self::LABELS;
}

/// Raw query parameters as they arrive over HTTP. Numbers stay text until
/// `resolve` so malformed values become field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub skip: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Resolved, bounded list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub offset: u64,
    pub limit: u32,
    pub search: Option<String>,
    pub sort: Option<(SortField, SortOrder)>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: ListPolicy::LABELS.default_limit,
            search: None,
            sort: None,
        }
    }
}

impl ListParams {
    /// 1-based page number of `offset`.
    pub fn page(&self) -> u32 {
        u32::try_from(self.offset / u64::from(self.limit.max(1))).unwrap_or(u32::MAX - 1) + 1
    }

    /// `%search%` pattern, Unicode-lowercased, for a LIKE against a lowercased
    /// column.
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{}%", escaped.to_lowercase())
        })
    }
}

impl RawListParams {
    /// Apply defaults and bounds.
    ///
    /// `skip` wins over `page` when both are given. `limit` is clamped to
    /// `1..=100`; `page` below 1 is treated as 1.
    pub fn resolve(&self, policy: ListPolicy) -> Result<ListParams, DomainError> {
        let mut errors = FieldErrors::new();

        let limit = number(&self.limit, "limit", &mut errors)
            .map_or(policy.default_limit, |n| n.clamp(1, u64::from(MAX_LIMIT)) as u32);

        let offset = match number(&self.skip, "skip", &mut errors) {
            Some(skip) => skip,
            None => {
                let page = number(&self.page, "page", &mut errors).unwrap_or(1).max(1);
                (page - 1).saturating_mul(u64::from(limit))
            }
        };

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let sort = match self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<SortField>() {
                Ok(field) if policy.sortable.contains(&field) => {
                    let order = match self.sort_order.as_deref().filter(|s| !s.is_empty()) {
                        None => SortOrder::default(),
                        Some(o) => o.parse().unwrap_or_else(|e: DomainError| {
                            collect(&mut errors, e);
                            SortOrder::default()
                        }),
                    };
                    Some((field, order))
                }
                Ok(field) => {
                    errors.add("sortBy", format!("cannot sort by '{field}'"));
                    None
                }
                Err(e) => {
                    collect(&mut errors, e);
                    None
                }
            },
        };

        errors.into_result()?;
        Ok(ListParams {
            offset,
            limit,
            search,
            sort,
        })
    }
}

fn number(raw: &Option<String>, field: &str, errors: &mut FieldErrors) -> Option<u64> {
    let raw = raw.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, "Expected a non-negative integer");
            None
        }
    }
}

fn collect(errors: &mut FieldErrors, error: DomainError) {
    if let DomainError::Validation(more) = error {
        errors.merge(more);
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            items,
            total,
            page,
            limit,
        }
    }

    pub fn for_params(items: Vec<T>, total: u64, params: &ListParams) -> Self {
        Self::new(items, total, params.page(), params.limit)
    }

    /// `ceil(total / limit)`.
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        u32::try_from(self.total.div_ceil(u64::from(self.limit))).unwrap_or(u32::MAX)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawListParams {
        let mut params = RawListParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "page" => params.page = v,
                "limit" => params.limit = v,
                "skip" => params.skip = v,
                "search" => params.search = v,
                "sortBy" => params.sort_by = v,
                "sortOrder" => params.sort_order = v,
                _ => unreachable!(),
            }
        }
        params
    }

    #[test]
    fn defaults_per_policy() {
        let events = RawListParams::default().resolve(ListPolicy::EVENTS).unwrap();
        assert_eq!((events.offset, events.limit), (0, 20));
        let labels = RawListParams::default().resolve(ListPolicy::LABELS).unwrap();
        assert_eq!(labels.limit, 10);
    }

    #[test]
    fn page_and_skip() {
        let p = raw(&[("page", "3"), ("limit", "5")]).resolve(ListPolicy::LABELS).unwrap();
        assert_eq!((p.offset, p.page()), (10, 3));
        let s = raw(&[("skip", "7"), ("limit", "5"), ("page", "9")])
            .resolve(ListPolicy::EVENTS)
            .unwrap();
        assert_eq!((s.offset, s.page()), (7, 2));
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(raw(&[("limit", "0")]).resolve(ListPolicy::LABELS).unwrap().limit, 1);
        assert_eq!(raw(&[("limit", "5000")]).resolve(ListPolicy::LABELS).unwrap().limit, 100);
    }

    #[test]
    fn malformed_numbers_are_field_errors() {
        let err = raw(&[("page", "two"), ("limit", "-1")])
            .resolve(ListPolicy::LABELS)
            .unwrap_err();
        let DomainError::Validation(errors) = err else { panic!("expected validation") };
        assert!(errors.for_field("page").is_some());
        assert!(errors.for_field("limit").is_some());
    }

    #[test]
    fn sort_whitelist_depends_on_policy() {
        let p = raw(&[("sortBy", "startDate"), ("sortOrder", "desc")])
            .resolve(ListPolicy::EVENTS)
            .unwrap();
        assert_eq!(p.sort, Some((SortField::StartDate, SortOrder::Desc)));
        assert!(raw(&[("sortBy", "startDate")]).resolve(ListPolicy::LABELS).is_err());
        assert!(raw(&[("sortBy", "email")]).resolve(ListPolicy::EVENTS).is_err());
        assert!(
            raw(&[("sortBy", "name"), ("sortOrder", "up")])
                .resolve(ListPolicy::EVENTS)
                .is_err()
        );
    }

    #[test]
    fn search_is_trimmed_and_escaped() {
        let p = raw(&[("search", "  50%_Off ")]).resolve(ListPolicy::LABELS).unwrap();
        assert_eq!(p.search.as_deref(), Some("50%_Off"));
        assert_eq!(p.like_pattern().unwrap(), "%50\\%\\_off%");
        assert!(raw(&[("search", "   ")]).resolve(ListPolicy::LABELS).unwrap().search.is_none());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Page::<()>::new(vec![], 21, 1, 10).total_pages(), 3);
        assert_eq!(Page::<()>::new(vec![], 20, 1, 10).total_pages(), 2);
        assert_eq!(Page::<()>::new(vec![], 0, 1, 10).total_pages(), 0);
    }
}
