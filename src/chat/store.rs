use super::message::{ChatRecord, RecordId};

/// Session-scoped transcript. Insertion order is the only order.
#[derive(Debug, Default)]
pub struct MessageStore {
    records: Vec<ChatRecord>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding only the welcome message.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.append(ChatRecord::welcome());
        store
    }

    pub fn append(&mut self, record: ChatRecord) -> RecordId {
        let id = record.id;
        self.records.push(record);
        id
    }

    /// Remove a record by id. Absent ids are ignored.
    pub fn remove_by_id(&mut self, id: RecordId) -> Option<ChatRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn snapshot(&self) -> &[ChatRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: RecordId) -> Option<&ChatRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn last(&self) -> Option<&ChatRecord> {
        self.records.last()
    }

    /// Placeholders currently in the transcript; at most one.
    pub fn pending_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_pending()).count()
    }
}
