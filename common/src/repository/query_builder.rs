use mongodb::bson::{doc, Bson, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum OrderType {
    Asc,
    #[default]
    Desc,
}

impl OrderType {
    pub fn direction(self) -> i32 {
        match self {
            OrderType::Asc => 1,
            OrderType::Desc => -1,
        }
    }
}

/// Sort document for a single field.
pub fn sort_by(field: &str, order: OrderType) -> Document {
    doc! { field: order.direction() }
}

/// Newest first; ids grow monotonically.
pub fn newest_first() -> Document {
    sort_by("_id", OrderType::Desc)
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: Option<u64>, size: Option<u64>, default_size: u64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            size: size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Rows to skip, saturating at the largest offset MongoDB accepts.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size).min(i64::MAX as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page_num: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl PageInfo {
    pub fn of(page: &PageRequest, total_elements: u64) -> Self {
        Self {
            page_num: page.page,
            page_size: page.size,
            total_elements,
            total_pages: total_elements.div_ceil(page.size),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> PageResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult { items: self.items.into_iter().map(f).collect(), page_info: self.page_info }
    }
}

/// Small fluent builder for filter documents.
#[derive(Debug, Default, Clone)]
pub struct QueryBuilder {
    clauses: Vec<Document>,
    current: Document,
    logic_op: Option<&'static str>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, value.into());
        self
    }

    /// Equality only when a value is present.
    pub fn eq_opt<V: Into<Bson>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(field, v),
            None => self,
        }
    }

    pub fn ne(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, doc! { "$ne": value.into() });
        self
    }

    pub fn gt(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, doc! { "$gt": value.into() });
        self
    }

    pub fn lte(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, doc! { "$lte": value.into() });
        self
    }

    pub fn gte(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, doc! { "$gte": value.into() });
        self
    }

    pub fn lt(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, doc! { "$lt": value.into() });
        self
    }

    pub fn in_array<T: Into<Bson>>(mut self, field: &str, values: Vec<T>) -> Self {
        let arr = values.into_iter().map(Into::into).collect::<Vec<_>>();
        self.current.insert(field, doc! { "$in": arr });
        self
    }

    pub fn exists(mut self, field: &str) -> Self {
        self.current.insert(field, doc! { "$exists": true });
        self
    }

    pub fn and(mut self) -> Self {
        self.logic_op = Some("$and");
        self.push_current();
        self
    }

    pub fn or(mut self) -> Self {
        self.logic_op = Some("$or");
        self.push_current();
        self
    }

    pub fn build(mut self) -> Document {
        self.push_current();
        match (self.logic_op, self.clauses.len()) {
            (_, 0) => doc! {},
            (None, 1) | (Some("$and"), 1) => self.clauses.remove(0),
            (Some("$or"), _) => doc! { "$or": self.clauses },
            _ => doc! { "$and": self.clauses },
        }
    }

    fn push_current(&mut self) {
        if !self.current.is_empty() {
            self.clauses.push(std::mem::take(&mut self.current));
        }
    }
}
