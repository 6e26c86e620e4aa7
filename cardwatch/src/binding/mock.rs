// cardwatch/src/binding/mock.rs

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::binding::traits::{BindingResult, PcscBinding, RawCard, RawContext};
use crate::protocol::Status;
use crate::types::ReaderWatch;

/// Scripted service binding for unit tests. It records every call and
/// replays queued outcomes, so tests can drive the reader logic through
/// arbitrary success and failure sequences without hardware.
///
/// Unseeded queues fall back to benign defaults: establish succeeds,
/// enumeration returns the configured reader list, connect reports no card,
/// transmit and status waits time out.
#[derive(Debug, Default)]
pub struct MockBinding {
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    readers: Vec<String>,
    next_handle: u64,

    establish_results: VecDeque<BindingResult<RawContext>>,
    reader_lists: VecDeque<BindingResult<Vec<String>>>,
    connect_results: VecDeque<BindingResult<(RawCard, u32)>>,
    transmit_results: VecDeque<BindingResult<Vec<u8>>>,
    status_results: VecDeque<BindingResult<(u32, Vec<u8>)>>,

    list_calls: usize,
    connects: Vec<String>,
    transmitted: Vec<Vec<u8>>,
    disconnected: Vec<(RawCard, u32)>,
    released: Vec<RawContext>,
    polls: Vec<(String, u32)>,
}

impl MockBinding {
    /// Fresh mock with empty queues and no readers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient reader list returned when no override is queued.
    pub fn set_readers(&self, names: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.readers = names.iter().map(|s| s.to_string()).collect();
    }

    /// Queue one enumeration result, overriding the ambient list once.
    pub fn push_reader_list(&self, names: &[&str]) {
        let list = names.iter().map(|s| s.to_string()).collect();
        self.state.lock().unwrap().reader_lists.push_back(Ok(list));
    }

    /// Queue one failed context establishment.
    pub fn push_establish_err(&self, status: Status) {
        self.state
            .lock()
            .unwrap()
            .establish_results
            .push_back(Err(status));
    }

    /// Queue one successful connect with the given card id and negotiated
    /// protocol.
    pub fn push_connect_ok(&self, card: u64, protocol: u32) {
        self.state
            .lock()
            .unwrap()
            .connect_results
            .push_back(Ok((RawCard(card), protocol)));
    }

    /// Queue one failed connect.
    pub fn push_connect_err(&self, status: Status) {
        self.state
            .lock()
            .unwrap()
            .connect_results
            .push_back(Err(status));
    }

    /// Queue one transmit response.
    pub fn push_transmit(&self, response: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .transmit_results
            .push_back(Ok(response));
    }

    /// Queue one failed transmit.
    pub fn push_transmit_err(&self, status: Status) {
        self.state
            .lock()
            .unwrap()
            .transmit_results
            .push_back(Err(status));
    }

    /// Queue one successful status wait reporting `event_state` and `atr`.
    pub fn push_status_change(&self, event_state: u32, atr: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .status_results
            .push_back(Ok((event_state, atr.to_vec())));
    }

    /// Queue one failed status wait.
    pub fn push_status_err(&self, status: Status) {
        self.state
            .lock()
            .unwrap()
            .status_results
            .push_back(Err(status));
    }

    /// Number of enumeration calls seen so far.
    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    /// Reader names connect was called with, in order.
    pub fn connects(&self) -> Vec<String> {
        self.state.lock().unwrap().connects.clone()
    }

    /// Command bytes transmitted, in order.
    pub fn transmitted(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().transmitted.clone()
    }

    /// Number of disconnect calls seen so far.
    pub fn disconnect_count(&self) -> usize {
        self.state.lock().unwrap().disconnected.len()
    }

    /// Dispositions passed to disconnect, in order.
    pub fn dispositions(&self) -> Vec<u32> {
        self.state
            .lock()
            .unwrap()
            .disconnected
            .iter()
            .map(|(_, d)| *d)
            .collect()
    }

    /// Number of context releases seen so far.
    pub fn release_count(&self) -> usize {
        self.state.lock().unwrap().released.len()
    }

    /// `(reader, current_state)` pairs of every status wait, in order.
    /// Lets tests assert the edge-trigger feedback between polls.
    pub fn polled_states(&self) -> Vec<(String, u32)> {
        self.state.lock().unwrap().polls.clone()
    }
}

impl PcscBinding for MockBinding {
    fn establish_context(&self) -> BindingResult<RawContext> {
        let mut state = self.state.lock().unwrap();
        if let Some(result) = state.establish_results.pop_front() {
            return result;
        }
        state.next_handle += 1;
        Ok(RawContext(state.next_handle))
    }

    fn release_context(&self, context: RawContext) -> BindingResult<()> {
        self.state.lock().unwrap().released.push(context);
        Ok(())
    }

    fn list_readers(&self, _context: RawContext) -> BindingResult<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if let Some(result) = state.reader_lists.pop_front() {
            return result;
        }
        Ok(state.readers.clone())
    }

    fn connect(
        &self,
        _context: RawContext,
        reader: &str,
        _share_mode: u32,
        _protocols: u32,
    ) -> BindingResult<(RawCard, u32)> {
        let mut state = self.state.lock().unwrap();
        state.connects.push(reader.to_string());
        state
            .connect_results
            .pop_front()
            .unwrap_or(Err(Status::NO_SMARTCARD))
    }

    fn transmit(
        &self,
        _card: RawCard,
        _active_protocol: u32,
        command: &[u8],
    ) -> BindingResult<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        state.transmitted.push(command.to_vec());
        state
            .transmit_results
            .pop_front()
            .unwrap_or(Err(Status::TIMEOUT))
    }

    fn disconnect(&self, card: RawCard, disposition: u32) -> BindingResult<()> {
        self.state
            .lock()
            .unwrap()
            .disconnected
            .push((card, disposition));
        Ok(())
    }

    fn get_status_change(
        &self,
        _context: RawContext,
        _timeout_ms: u32,
        watch: &ReaderWatch,
    ) -> BindingResult<ReaderWatch> {
        let mut state = self.state.lock().unwrap();
        state
            .polls
            .push((watch.reader.clone(), watch.current_state));
        match state.status_results.pop_front() {
            Some(Ok((event_state, atr))) => Ok(ReaderWatch {
                reader: watch.reader.clone(),
                current_state: watch.current_state,
                event_state,
                atr,
            }),
            Some(Err(status)) => Err(status),
            None => Err(Status::TIMEOUT),
        }
    }
}
