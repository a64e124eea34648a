use std::collections::BTreeSet;

use super::bulk::{BulkCorrelation, BulkRequest};
use crate::protocols::dynamixel::instruction::Instruction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    pub register: u16,
    pub count: u16,
}

/// Request history used to interpret the status packets that follow.
#[derive(Debug, Default, Clone)]
pub struct RequestContext {
    last_instruction: Option<Instruction>,
    last_read: Option<ReadRequest>,
    awaiting: BTreeSet<u8>,
    bulk: BulkCorrelation,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last instruction that was not a status packet.
    pub fn last_instruction(&self) -> Option<Instruction> {
        self.last_instruction
    }

    pub fn last_read(&self) -> Option<ReadRequest> {
        self.last_read
    }

    pub fn bulk(&self) -> &BulkCorrelation {
        &self.bulk
    }

    /// True while servo `id` owes a status packet to an earlier request.
    pub fn awaiting_reply(&self, id: u8) -> bool {
        self.awaiting.contains(&id)
    }

    /// A new request replaces every outstanding expectation.
    pub(crate) fn begin_request(&mut self, instruction: Instruction) {
        self.last_instruction = Some(instruction);
        self.last_read = None;
        self.awaiting.clear();
    }

    pub(crate) fn expect_reply(&mut self, id: u8) {
        self.awaiting.insert(id);
    }

    pub(crate) fn record_read(&mut self, request: ReadRequest) {
        self.last_read = Some(request);
    }

    pub(crate) fn record_bulk(&mut self, id: u8, request: BulkRequest) {
        self.bulk.record(id, request);
    }

    pub(crate) fn reply_received(&mut self, id: u8) {
        self.awaiting.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::{ReadRequest, RequestContext};
    use crate::protocols::dynamixel::instruction::Instruction;

    #[test]
    fn new_request_clears_previous_expectations() {
        let mut context = RequestContext::new();
        context.begin_request(Instruction::Read);
        context.record_read(ReadRequest { register: 36, count: 2 });
        context.expect_reply(1);
        assert!(context.awaiting_reply(1));

        context.begin_request(Instruction::Write);
        assert!(!context.awaiting_reply(1));
        assert_eq!(context.last_read(), None);
        assert_eq!(context.last_instruction(), Some(Instruction::Write));
    }

    #[test]
    fn reply_consumes_expectation() {
        let mut context = RequestContext::new();
        context.begin_request(Instruction::Ping);
        context.expect_reply(3);
        context.reply_received(3);
        assert!(!context.awaiting_reply(3));
        assert_eq!(context.last_instruction(), Some(Instruction::Ping));
    }
}
