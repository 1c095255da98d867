use std::collections::HashSet;

/// Unique records across every input file, in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    seen: HashSet<String>,
    records: Vec<String>,
    total_lines: usize,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record. Returns `false` if an equal string was already present.
    pub fn insert(&mut self, record: String) -> bool {
        self.total_lines += 1;
        if !self.seen.insert(record.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Adds every record of one file, keeping line order.
    pub fn extend<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = String>,
    {
        for record in records {
            self.insert(record);
        }
    }

    pub fn into_records(self) -> Vec<String> {
        self.records
    }

    /// Records offered before deduplication.
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.total_lines - self.records.len()
    }
}
