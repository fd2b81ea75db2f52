use crate::errors::AppError;
use crate::repository::query_builder::{PageInfo, PageRequest, PageResult};
use crate::repository::repository_util::Repository;
use async_trait::async_trait;
use mongodb::IndexModel;
use mongodb::bson::{self, Bson, Document};
use regex::RegexBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct UniqueIndex {
    name: String,
    fields: Vec<String>,
    partial: Option<Document>,
}

/// In-process repository. Interprets the same filter/update documents as
/// MongoDB for the operators this workspace uses and enforces the unique
/// indexes it is given. Used by tests and the `memory` database backend.
pub struct MemoryRepository<T> {
    rows: RwLock<BTreeMap<i64, Document>>,
    unique_indexes: Vec<UniqueIndex>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl<T> MemoryRepository<T> {
    pub fn new(indexes: Vec<IndexModel>) -> Self {
        let unique_indexes = indexes
            .into_iter()
            .filter_map(|model| {
                let options = model.options?;
                if options.unique != Some(true) {
                    return None;
                }
                Some(UniqueIndex {
                    name: options.name.unwrap_or_default(),
                    fields: model.keys.keys().cloned().collect(),
                    partial: options.partial_filter_expression,
                })
            })
            .collect();
        Self { rows: RwLock::new(BTreeMap::new()), unique_indexes, _marker: PhantomData }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<i64, Document>>, AppError> {
        self.rows.read().map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<i64, Document>>, AppError> {
        self.rows.write().map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }

    fn check_unique(&self, rows: &BTreeMap<i64, Document>, id: i64, candidate: &Document) -> Result<(), AppError> {
        for index in &self.unique_indexes {
            if let Some(partial) = &index.partial {
                if !matches_filter(candidate, partial) {
                    continue;
                }
            }
            let key: Vec<Option<&Bson>> = index.fields.iter().map(|f| lookup(candidate, f)).collect();
            let clash = rows.iter().filter(|(other_id, _)| **other_id != id).any(|(_, other)| {
                let in_index = index.partial.as_ref().is_none_or(|p| matches_filter(other, p));
                in_index && index.fields.iter().zip(&key).all(|(f, v)| values_equal(lookup(other, f), *v))
            });
            if clash {
                return Err(AppError::DuplicateKey(format!("E11000 duplicate key error index: {}", index.name)));
            }
        }
        Ok(())
    }

    /// Applies `update` to every matching row, all or nothing.
    fn update_where(&self, filter: &Document, update: &Document, limit: Option<usize>) -> Result<Vec<Document>, AppError> {
        let mut rows = self.write()?;
        let ids: Vec<i64> = rows
            .iter()
            .filter(|(_, row)| matches_filter(row, filter))
            .map(|(id, _)| *id)
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        let mut staged = rows.clone();
        let mut changed = Vec::new();
        for id in ids {
            let Some(current) = staged.get(&id) else { continue };
            let mut next = current.clone();
            apply_update(&mut next, update)?;
            self.check_unique(&staged, id, &next)?;
            if &next != current {
                changed.push(next.clone());
            }
            staged.insert(id, next);
        }
        *rows = staged;
        Ok(changed)
    }
}

fn row_id(doc: &Document) -> Result<i64, AppError> {
    doc.get_i64("_id").map_err(|_| AppError::Internal("document without numeric _id".to_string()))
}

fn decode<T: DeserializeOwned>(doc: Document) -> Result<T, AppError> {
    Ok(bson::from_document(doc)?)
}

fn sorted(mut rows: Vec<Document>, sort: Option<&Document>) -> Vec<Document> {
    if let Some(sort) = sort {
        rows.sort_by(|a, b| {
            for (field, direction) in sort {
                let ord = compare_optional(lookup(a, field), lookup(b, field));
                let ord = if direction.as_i32().unwrap_or(1) < 0 { ord.reverse() } else { ord };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
    }
    rows
}

#[async_trait]
impl<T> Repository<T> for MemoryRepository<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, AppError> {
        let row = self.read()?.get(&id).cloned();
        row.map(decode).transpose()
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError> {
        let row = self.read()?.values().find(|row| matches_filter(row, &filter)).cloned();
        row.map(decode).transpose()
    }

    async fn find_all(&self, filter: Document, sort: Option<Document>) -> Result<Vec<T>, AppError> {
        let rows: Vec<Document> = self.read()?.values().filter(|row| matches_filter(row, &filter)).cloned().collect();
        sorted(rows, sort.as_ref()).into_iter().map(decode).collect()
    }

    async fn insert(&self, entity: &T) -> Result<(), AppError> {
        let doc = bson::to_document(entity)?;
        let id = row_id(&doc)?;
        let mut rows = self.write()?;
        if rows.contains_key(&id) {
            return Err(AppError::DuplicateKey(format!("E11000 duplicate key error index: _id_ {}", id)));
        }
        self.check_unique(&rows, id, &doc)?;
        rows.insert(id, doc);
        Ok(())
    }

    async fn save(&self, id: i64, entity: &T) -> Result<(), AppError> {
        let mut doc = bson::to_document(entity)?;
        doc.insert("_id", id);
        let mut rows = self.write()?;
        if !rows.contains_key(&id) {
            return Ok(());
        }
        self.check_unique(&rows, id, &doc)?;
        rows.insert(id, doc);
        Ok(())
    }

    async fn update_one(&self, filter: Document, update: Document) -> Result<u64, AppError> {
        Ok(self.update_where(&filter, &update, Some(1))?.len() as u64)
    }

    async fn update_many(&self, filter: Document, update: Document) -> Result<u64, AppError> {
        Ok(self.update_where(&filter, &update, None)?.len() as u64)
    }

    async fn find_one_and_update(&self, filter: Document, update: Document) -> Result<Option<T>, AppError> {
        let mut rows = self.write()?;
        let Some((id, current)) = rows.iter().find(|(_, row)| matches_filter(row, &filter)) else {
            return Ok(None);
        };
        let id = *id;
        let mut next = current.clone();
        apply_update(&mut next, &update)?;
        self.check_unique(&rows, id, &next)?;
        rows.insert(id, next.clone());
        decode(next).map(Some)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError> {
        Ok(self.write()?.remove(&id).map_or(0, |_| 1))
    }

    async fn delete_many(&self, filter: Document) -> Result<u64, AppError> {
        let mut rows = self.write()?;
        let before = rows.len();
        rows.retain(|_, row| !matches_filter(row, &filter));
        Ok((before - rows.len()) as u64)
    }

    async fn count(&self, filter: Document) -> Result<u64, AppError> {
        Ok(self.read()?.values().filter(|row| matches_filter(row, &filter)).count() as u64)
    }

    async fn query_by_page(&self, filter: Document, sort: Option<Document>, page: &PageRequest) -> Result<PageResult<T>, AppError> {
        let rows: Vec<Document> = self.read()?.values().filter(|row| matches_filter(row, &filter)).cloned().collect();
        let total = rows.len() as u64;
        let items = sorted(rows, sort.as_ref())
            .into_iter()
            .skip(usize::try_from(page.skip()).unwrap_or(usize::MAX))
            .take(page.size as usize)
            .map(decode)
            .collect::<Result<Vec<T>, AppError>>()?;
        Ok(PageResult { items, page_info: PageInfo::of(page, total) })
    }
}

// ==== filter evaluation ====

pub(crate) fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, condition)| match key.as_str() {
        "$and" => sub_filters(condition).iter().all(|f| matches_filter(doc, f)),
        "$or" => sub_filters(condition).iter().any(|f| matches_filter(doc, f)),
        _ => field_matches(lookup(doc, key), condition),
    })
}

fn sub_filters(condition: &Bson) -> Vec<Document> {
    condition
        .as_array()
        .map(|items| items.iter().filter_map(|b| b.as_document().cloned()).collect())
        .unwrap_or_default()
}

fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_document()?.get(part)?;
    }
    Some(current)
}

fn is_operator_doc(condition: &Bson) -> Option<&Document> {
    condition.as_document().filter(|d| d.keys().next().is_some_and(|k| k.starts_with('$')))
}

fn field_matches(value: Option<&Bson>, condition: &Bson) -> bool {
    let Some(ops) = is_operator_doc(condition) else {
        return values_equal(value, Some(condition));
    };
    ops.iter().all(|(op, arg)| match op.as_str() {
        "$eq" => values_equal(value, Some(arg)),
        "$ne" => !values_equal(value, Some(arg)),
        "$in" => arg.as_array().is_some_and(|items| items.iter().any(|i| values_equal(value, Some(i)))),
        "$nin" => !arg.as_array().is_some_and(|items| items.iter().any(|i| values_equal(value, Some(i)))),
        "$gt" => compare(value, arg) == Some(Ordering::Greater),
        "$gte" => matches!(compare(value, arg), Some(Ordering::Greater | Ordering::Equal)),
        "$lt" => compare(value, arg) == Some(Ordering::Less),
        "$lte" => matches!(compare(value, arg), Some(Ordering::Less | Ordering::Equal)),
        "$exists" => value.is_some() == arg.as_bool().unwrap_or(true),
        "$regex" => regex_matches(value, arg, ops.get_str("$options").unwrap_or("")),
        "$options" => true,
        _ => false,
    })
}

fn regex_matches(value: Option<&Bson>, pattern: &Bson, options: &str) -> bool {
    let (Some(Bson::String(text)), Some(pattern)) = (value, pattern.as_str()) else {
        return false;
    };
    RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .build()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

fn values_equal(value: Option<&Bson>, expected: Option<&Bson>) -> bool {
    match (value, expected) {
        (None | Some(Bson::Null), None | Some(Bson::Null)) => true,
        (Some(Bson::Array(items)), Some(e)) if !matches!(e, Bson::Array(_)) => items.iter().any(|i| values_equal(Some(i), Some(e))),
        (Some(v), Some(e)) => compare_bson(v, e) == Some(Ordering::Equal),
        _ => false,
    }
}

fn compare(value: Option<&Bson>, arg: &Bson) -> Option<Ordering> {
    compare_bson(value?, arg)
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

fn compare_bson(a: &Bson, b: &Bson) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x.partial_cmp(&y);
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
        (Bson::DateTime(x), Bson::DateTime(y)) => Some(x.cmp(y)),
        _ if a == b => Some(Ordering::Equal),
        _ => None,
    }
}

fn compare_optional(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => compare_bson(x, y).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ==== update operators ====

fn apply_update(doc: &mut Document, update: &Document) -> Result<(), AppError> {
    for (op, fields) in update {
        let fields = fields.as_document().ok_or_else(|| AppError::Internal(format!("{} expects a document", op)))?;
        for (path, arg) in fields {
            match op.as_str() {
                "$set" => set_path(doc, path, arg.clone()),
                "$unset" => unset_path(doc, path),
                "$inc" => {
                    let next = add_numbers(lookup(doc, path), arg)?;
                    set_path(doc, path, next);
                }
                _ => return Err(AppError::Internal(format!("unsupported update operator {}", op))),
            }
        }
    }
    Ok(())
}

fn add_numbers(current: Option<&Bson>, delta: &Bson) -> Result<Bson, AppError> {
    let sum = match (current, delta) {
        (None | Some(Bson::Null), d) => d.clone(),
        (Some(Bson::Int32(a)), Bson::Int32(b)) => Bson::Int32(a + b),
        (Some(Bson::Int64(a)), Bson::Int32(b)) => Bson::Int64(a + i64::from(*b)),
        (Some(Bson::Int32(a)), Bson::Int64(b)) => Bson::Int64(i64::from(*a) + b),
        (Some(Bson::Int64(a)), Bson::Int64(b)) => Bson::Int64(a + b),
        (Some(a), b) => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => Bson::Double(x + y),
            _ => return Err(AppError::Internal("$inc on a non-numeric field".to_string())),
        },
    };
    Ok(sum)
}

fn set_path(doc: &mut Document, path: &str, value: Bson) {
    match path.split_once('.') {
        None => {
            doc.insert(path, value);
        }
        Some((head, rest)) => {
            if !matches!(doc.get(head), Some(Bson::Document(_))) {
                doc.insert(head, Document::new());
            }
            if let Some(Bson::Document(child)) = doc.get_mut(head) {
                set_path(child, rest, value);
            }
        }
    }
}

fn unset_path(doc: &mut Document, path: &str) {
    match path.split_once('.') {
        None => {
            doc.remove(path);
        }
        Some((head, rest)) => {
            if let Some(Bson::Document(child)) = doc.get_mut(head) {
                unset_path(child, rest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::query_builder::{PageRequest, newest_first};
    use mongodb::bson::doc;
    use mongodb::options::IndexOptions;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Entry {
        #[serde(rename = "_id")]
        id: i64,
        program_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        status: String,
        headcount: i32,
    }

    fn entry(id: i64, program_id: i64, email: Option<&str>, status: &str) -> Entry {
        Entry { id, program_id, email: email.map(str::to_string), status: status.to_string(), headcount: 0 }
    }

    fn repo() -> MemoryRepository<Entry> {
        let options = IndexOptions::builder()
            .name(Some("uk_program_email".to_string()))
            .unique(Some(true))
            .partial_filter_expression(Some(doc! { "email": { "$exists": true } }))
            .build();
        MemoryRepository::new(vec![IndexModel::builder().keys(doc! { "program_id": 1, "email": 1 }).options(Some(options)).build()])
    }

    #[tokio::test]
    async fn partial_unique_index_rejects_only_indexed_duplicates() {
        let repo = repo();
        repo.insert(&entry(1, 10, Some("a@x.io"), "APPLIED")).await.unwrap();
        let err = repo.insert(&entry(2, 10, Some("a@x.io"), "APPLIED")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        // rows without the indexed field never clash
        repo.insert(&entry(3, 10, None, "APPLIED")).await.unwrap();
        repo.insert(&entry(4, 10, None, "APPLIED")).await.unwrap();
        repo.insert(&entry(5, 11, Some("a@x.io"), "APPLIED")).await.unwrap();
        assert_eq!(repo.count(doc! {}).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn update_many_only_counts_changed_rows() {
        let repo = repo();
        repo.insert(&entry(1, 10, None, "APPLIED")).await.unwrap();
        repo.insert(&entry(2, 10, None, "IN_PROGRESS")).await.unwrap();
        repo.insert(&entry(3, 11, None, "APPLIED")).await.unwrap();
        let filter = doc! { "program_id": 10_i64, "status": "APPLIED" };
        let update = doc! { "$set": { "status": "APPLIED_NOT_APPROVED" } };
        assert_eq!(repo.update_many(filter.clone(), update.clone()).await.unwrap(), 1);
        assert_eq!(repo.update_many(filter, update).await.unwrap(), 0);
        let other = repo.find_by_id(3).await.unwrap().unwrap();
        assert_eq!(other.status, "APPLIED");
    }

    #[tokio::test]
    async fn find_one_and_update_acts_as_compare_and_set() {
        let repo = repo();
        repo.insert(&entry(1, 10, None, "OPEN")).await.unwrap();
        let updated: Option<Entry> = repo
            .find_one_and_update(doc! { "_id": 1_i64, "headcount": 0 }, doc! { "$inc": { "headcount": 1 } })
            .await
            .unwrap();
        assert_eq!(updated.unwrap().headcount, 1);
        let stale: Option<Entry> = repo
            .find_one_and_update(doc! { "_id": 1_i64, "headcount": 0 }, doc! { "$inc": { "headcount": 1 } })
            .await
            .unwrap();
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn paging_sorts_and_reports_totals() {
        let repo = repo();
        for id in 1..=5 {
            repo.insert(&entry(id, 10, None, "APPLIED")).await.unwrap();
        }
        let page = repo.query_by_page(doc! { "program_id": { "$in": [10_i64] } }, Some(newest_first()), &PageRequest::new(Some(2), Some(2), 20)).await.unwrap();
        let ids: Vec<i64> = page.items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(page.page_info.total_elements, 5);
        assert_eq!(page.page_info.total_pages, 3);

        let beyond = repo.query_by_page(doc! {}, None, &PageRequest::new(Some(u64::MAX), Some(2), 20)).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.page_info.total_elements, 5);
    }

    #[test]
    fn filter_operators() {
        let row = doc! { "_id": 1_i64, "name": "Kim Intern", "grade": 3, "meeting": { "join_url": "https://z" } };
        assert!(matches_filter(&row, &doc! { "grade": { "$gte": 3_i64, "$lt": 4 } }));
        assert!(matches_filter(&row, &doc! { "name": { "$regex": "kim", "$options": "i" } }));
        assert!(matches_filter(&row, &doc! { "meeting.join_url": "https://z" }));
        assert!(matches_filter(&row, &doc! { "missing": null }));
        assert!(!matches_filter(&row, &doc! { "$or": [ { "grade": 1 }, { "grade": 2 } ] }));
    }
}
