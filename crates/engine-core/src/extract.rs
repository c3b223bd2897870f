//! Map-side extraction. Each mode fixes what is read from a work item and the
//! shape of what comes out, and is picked once per pipeline.

use crate::{error::TaskError, partition::Partition};
use connectors::{
    file::csv::filter::CsvFilter,
    source::{ReadRequest, RowSource},
};
use model::{
    core::key::Key,
    records::{row::RowData, work_item::WorkItem},
};

/// Keys extracted from one work item, in row order.
pub type KeyGroup = Vec<Key>;

/// Keyed tuples extracted from one work item, in row order.
pub type TupleGroup = Vec<JoinTuple>;

/// A joined row: its key and the attribute cells as they appeared in the
/// file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTuple {
    pub key: Key,
    pub attributes: Vec<String>,
}

impl JoinTuple {
    pub fn new(key: Key, attributes: Vec<String>) -> Self {
        JoinTuple { key, attributes }
    }

    /// Key first, then attributes.
    pub fn into_row(self) -> Vec<String> {
        std::iter::once(self.key.text().to_string())
            .chain(self.attributes)
            .collect()
    }
}

pub trait Extract: Send + Sync + 'static {
    /// What one work item maps to.
    type Output: Send + 'static;

    fn request(&self) -> ReadRequest;

    fn extract(&self, rows: Vec<RowData>) -> Self::Output;

    /// Number of mapped records carried by one output.
    fn record_count(output: &Self::Output) -> usize;
}

/// Count mode: the key of every row.
#[derive(Debug, Clone)]
pub struct CountKeys {
    pub key_column: String,
}

impl Extract for CountKeys {
    type Output = KeyGroup;

    fn request(&self) -> ReadRequest {
        ReadRequest::select([self.key_column.as_str()])
    }

    fn extract(&self, rows: Vec<RowData>) -> KeyGroup {
        rows.iter().map(|row| row.key(&self.key_column)).collect()
    }

    fn record_count(output: &KeyGroup) -> usize {
        output.len()
    }
}

/// Filter side of a join: keys of rows where `filter_column == filter_value`.
#[derive(Debug, Clone)]
pub struct FilterKeys {
    pub key_column: String,
    pub filter_column: String,
    pub filter_value: String,
}

impl Extract for FilterKeys {
    type Output = KeyGroup;

    fn request(&self) -> ReadRequest {
        ReadRequest::select([self.key_column.as_str()]).with_filter(CsvFilter::eq(
            self.filter_column.as_str(),
            self.filter_value.as_str(),
        ))
    }

    fn extract(&self, rows: Vec<RowData>) -> KeyGroup {
        rows.iter().map(|row| row.key(&self.key_column)).collect()
    }

    fn record_count(output: &KeyGroup) -> usize {
        output.len()
    }
}

/// Joined side: `(key, attribute_1, ...)` for every row.
#[derive(Debug, Clone)]
pub struct JoinTuples {
    pub key_column: String,
    pub attribute_columns: Vec<String>,
}

impl JoinTuples {
    fn columns(&self) -> Vec<String> {
        std::iter::once(self.key_column.clone())
            .chain(self.attribute_columns.iter().cloned())
            .collect()
    }
}

impl Extract for JoinTuples {
    type Output = TupleGroup;

    fn request(&self) -> ReadRequest {
        ReadRequest::select(self.columns())
    }

    fn extract(&self, rows: Vec<RowData>) -> TupleGroup {
        rows.iter()
            .map(|row| {
                let attributes = self
                    .attribute_columns
                    .iter()
                    .map(|column| row.text(column).to_string())
                    .collect();
                JoinTuple::new(row.key(&self.key_column), attributes)
            })
            .collect()
    }

    fn record_count(output: &TupleGroup) -> usize {
        output.len()
    }
}

/// Map worker body: decodes every work item of the partition and extracts
/// one output per item, keeping item order.
pub fn map_partition<X>(
    source: &dyn RowSource,
    extractor: &X,
    partition: Partition<WorkItem>,
) -> Result<Vec<X::Output>, TaskError>
where
    X: Extract + ?Sized,
{
    let request = extractor.request();
    partition
        .iter()
        .map(|item| {
            let rows = source.read(item.path(), &request)?;
            Ok(extractor.extract(rows))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::file::error::FileError;
    use model::core::value::{FieldValue, Value};
    use std::{collections::HashMap, path::Path, sync::Mutex};

    type Cells = Vec<(&'static str, &'static str)>;

    /// Serves canned rows per file name and records the requests it sees.
    struct StaticSource {
        files: HashMap<String, Vec<Cells>>,
        seen: Mutex<Vec<(String, Vec<String>, bool)>>,
    }

    impl StaticSource {
        fn new(files: Vec<(&str, Vec<Cells>)>) -> Self {
            StaticSource {
                files: files
                    .into_iter()
                    .map(|(name, rows)| (name.to_string(), rows))
                    .collect(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl RowSource for StaticSource {
        fn read(&self, path: &Path, request: &ReadRequest) -> Result<Vec<RowData>, FileError> {
            let name = path.to_string_lossy().into_owned();
            self.seen.lock().unwrap().push((
                name.clone(),
                request.columns.clone(),
                request.filter.is_some(),
            ));
            let rows = self
                .files
                .get(&name)
                .ok_or_else(|| FileError::NotFound(name.clone()))?;
            Ok(rows
                .iter()
                .map(|cells| {
                    let fields = cells
                        .iter()
                        .map(|(col, text)| FieldValue {
                            name: col.to_string(),
                            value: (!text.is_empty()).then(|| Value::String(text.to_string())),
                            text: text.to_string(),
                        })
                        .collect();
                    RowData::new(&name, fields)
                })
                .collect())
        }
    }

    fn k(v: &str) -> Key {
        Key::from_cell(v)
    }

    fn items(names: &[&str]) -> Partition<WorkItem> {
        Partition {
            index: 0,
            items: names.iter().map(|n| WorkItem::new(*n, *n)).collect(),
        }
    }

    #[test]
    fn test_count_keys_one_group_per_item() {
        let source = StaticSource::new(vec![
            ("f1", vec![vec![("date", "d1")], vec![("date", "d2")]]),
            ("f2", vec![vec![("date", "d1")], vec![("date", "")]]),
        ]);
        let extractor = CountKeys {
            key_column: "date".into(),
        };

        let groups = map_partition(&source, &extractor, items(&["f1", "f2"])).unwrap();
        assert_eq!(groups, vec![vec![k("d1"), k("d2")], vec![k("d1"), Key::null()]]);

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen[0], ("f1".to_string(), vec!["date".to_string()], false));
    }

    #[test]
    fn test_filter_keys_pushes_filter_down() {
        let source = StaticSource::new(vec![(
            "users",
            vec![vec![("id", "u1")], vec![("id", "")], vec![("id", "3.0")]],
        )]);
        let extractor = FilterKeys {
            key_column: "id".into(),
            filter_column: "country".into(),
            filter_value: "LT".into(),
        };

        let request = extractor.request();
        assert_eq!(request.columns, vec!["id".to_string()]);
        assert_eq!(request.filter, Some(CsvFilter::eq("country", "LT")));

        let keys = map_partition(&source, &extractor, items(&["users"])).unwrap();
        assert_eq!(keys, vec![vec![k("u1"), Key::null(), k("3")]]);
        assert_eq!(FilterKeys::record_count(&keys[0]), 3);
        assert!(source.seen.lock().unwrap()[0].2);
    }

    #[test]
    fn test_join_tuples_key_first() {
        let source = StaticSource::new(vec![(
            "clicks",
            vec![vec![
                ("click_target", "ad1"),
                ("date", "2021-1-5"),
                ("user_id", "007"),
            ]],
        )]);
        let extractor = JoinTuples {
            key_column: "user_id".into(),
            attribute_columns: vec!["date".into(), "click_target".into()],
        };

        let groups = map_partition(&source, &extractor, items(&["clicks"])).unwrap();
        assert_eq!(
            groups,
            vec![vec![JoinTuple::new(
                k("7"),
                vec!["2021-1-5".to_string(), "ad1".to_string()]
            )]]
        );
        assert_eq!(
            groups[0][0].clone().into_row(),
            vec!["007".to_string(), "2021-1-5".to_string(), "ad1".to_string()]
        );
    }

    #[test]
    fn test_decode_error_stops_the_partition() {
        let source = StaticSource::new(vec![("f1", vec![])]);
        let extractor = CountKeys {
            key_column: "date".into(),
        };
        let err = map_partition(&source, &extractor, items(&["f1", "missing", "f3"])).unwrap_err();
        assert!(matches!(err, TaskError::Decode(FileError::NotFound(ref f)) if f == "missing"));
        // nothing after the failing item is read
        assert_eq!(source.seen.lock().unwrap().len(), 2);
    }
}
