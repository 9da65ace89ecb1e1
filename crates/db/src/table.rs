use serde::{Deserialize, Serialize};

/// Surrogate key assigned by a [`Table`].
pub type RecordId = u64;

/// Anything stored in a [`Table`].
pub trait Record {
    fn id(&self) -> RecordId;
}

/// Ordered collection of records with a monotonically increasing id sequence.
///
/// Ids start at 1 and are never handed out twice. The counter is persisted with
/// the records, so a restored table keeps counting where it left off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table<T> {
    next_id: RecordId,
    records: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

impl<T: Record> Table<T> {
    /// Reserve the next id and store the record built from it.
    pub fn insert_with<F>(&mut self, build: F) -> &T
    where
        F: FnOnce(RecordId) -> T,
    {
        let id = self.next_id;
        self.next_id += 1;

        let index = self.records.len();
        self.records.push(build(id));
        &self.records[index]
    }

    /// Fallible variant of [`Table::insert_with`]; no id is consumed on error.
    pub fn try_insert_with<F, E>(&mut self, build: F) -> Result<&T, E>
    where
        F: FnOnce(RecordId) -> Result<T, E>,
    {
        let record = build(self.next_id)?;
        self.next_id += 1;

        let index = self.records.len();
        self.records.push(record);
        Ok(&self.records[index])
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
