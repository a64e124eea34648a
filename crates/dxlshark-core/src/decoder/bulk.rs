use std::collections::HashMap;

/// Register range a Bulk Read asked one servo for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkRequest {
    pub register: u16,
    pub count: u16,
}

/// Servo ID -> last Bulk Read request naming it.
///
/// Entries live until a newer Bulk Read names the same ID; there is no
/// expiry and no merging.
#[derive(Debug, Default, Clone)]
pub struct BulkCorrelation {
    requests: HashMap<u8, BulkRequest>,
}

impl BulkCorrelation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: u8, request: BulkRequest) {
        self.requests.insert(id, request);
    }

    pub fn get(&self, id: u8) -> Option<BulkRequest> {
        self.requests.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
