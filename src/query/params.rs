//! REST query-string contract.
//!
//! Recognized keys are the paging pairs (`skip`/`take`, `offset`/`limit`,
//! `page`/`per_page`), `sort`, `fields` and `q`. Every other key is a filter
//! expression `<path>[_<op>]=<value>`.

use crate::error::{DbError, DbResult};

use super::filter::Predicate;
use super::pagination::ParamStyle;
use super::projection::parse_fields;
use super::sort::SortKey;

/// Page size when a request does not give one
pub const DEFAULT_TAKE: usize = 512;

/// Normalized paging window and the family it was given in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub take: usize,
    pub style: ParamStyle,
}

/// A parsed REST query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySpec {
    pub filters: Vec<Predicate>,
    pub sort: Vec<SortKey>,
    /// `None` when the request carried no paging parameters
    pub page: Option<PageRequest>,
    pub fields: Vec<String>,
    pub search: Option<String>,
    /// Pairs that are neither paging parameters nor empty, in request order
    pub passthrough: Vec<(String, String)>,
}

#[derive(Default)]
struct RawPaging {
    style: Option<ParamStyle>,
    first: Option<usize>,
    second: Option<usize>,
}

impl RawPaging {
    fn set(&mut self, style: ParamStyle, is_first: bool, key: &str, raw: &str) -> DbResult<()> {
        if let Some(existing) = self.style {
            if existing != style {
                let (a, b) = existing.names();
                return Err(DbError::BadRequest(format!(
                    "'{}' cannot be combined with '{}'/'{}'",
                    key, a, b
                )));
            }
        }
        self.style = Some(style);

        let value = raw.trim().parse::<usize>().map_err(|_| {
            DbError::BadRequest(format!("'{}' must be a non-negative integer, got '{}'", key, raw))
        })?;

        if is_first {
            self.first = Some(value);
        } else {
            self.second = Some(value);
        }
        Ok(())
    }

    fn finish(self) -> DbResult<Option<PageRequest>> {
        let Some(style) = self.style else {
            return Ok(None);
        };
        let (first_name, second_name) = style.names();

        let take = self.second.unwrap_or(DEFAULT_TAKE);
        if take == 0 {
            return Err(DbError::BadRequest(format!("'{}' must be greater than 0", second_name)));
        }

        let skip = match style {
            ParamStyle::PagePerPage => {
                let page = self.first.unwrap_or(1);
                if page == 0 {
                    return Err(DbError::BadRequest(format!(
                        "'{}' must be greater than 0",
                        first_name
                    )));
                }
                (page - 1).saturating_mul(take)
            }
            _ => self.first.unwrap_or(0),
        };

        Ok(Some(PageRequest { skip, take, style }))
    }
}

impl QuerySpec {
    /// Parse an encoded query string such as `age_lt=30&sort=-age`
    pub fn from_query_string(query: &str) -> DbResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| DbError::BadRequest(format!("Invalid query string: {}", e)))?;
        Self::from_pairs(pairs)
    }

    /// Parse decoded query-string pairs, in request order
    pub fn from_pairs(pairs: Vec<(String, String)>) -> DbResult<Self> {
        let mut spec = QuerySpec::default();
        let mut paging = RawPaging::default();

        for (key, value) in pairs {
            match key.as_str() {
                "skip" => paging.set(ParamStyle::SkipTake, true, &key, &value)?,
                "take" => paging.set(ParamStyle::SkipTake, false, &key, &value)?,
                "offset" => paging.set(ParamStyle::OffsetLimit, true, &key, &value)?,
                "limit" => paging.set(ParamStyle::OffsetLimit, false, &key, &value)?,
                "page" => paging.set(ParamStyle::PagePerPage, true, &key, &value)?,
                "per_page" => paging.set(ParamStyle::PagePerPage, false, &key, &value)?,
                "sort" => {
                    for token in value.split(',').filter(|t| !t.is_empty()) {
                        let sort_key = SortKey::parse(token).ok_or_else(|| {
                            DbError::BadRequest(format!("Invalid sort token '{}'", token))
                        })?;
                        spec.sort.push(sort_key);
                    }
                    spec.passthrough.push((key, value));
                }
                "fields" => {
                    spec.fields.extend(parse_fields(&value));
                    spec.passthrough.push((key, value));
                }
                "q" => {
                    if !value.is_empty() {
                        spec.search = Some(value.clone());
                    }
                    spec.passthrough.push((key, value));
                }
                "" => {}
                _ => {
                    spec.filters.push(Predicate::from_pair(&key, &value));
                    spec.passthrough.push((key, value));
                }
            }
        }

        spec.page = paging.finish()?;
        Ok(spec)
    }
}
