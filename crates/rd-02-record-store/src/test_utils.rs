//! # Test Utilities
//!
//! A key-value store whose point reads, scans and writes can be made to
//! fail independently, and whose scans can be slowed down, for exercising
//! store-failure and interleaving paths above the repository.

use crate::adapters::InMemoryKVStore;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Switches shared between a test and its `FaultyKVStore`.
#[derive(Debug, Default)]
pub struct FaultSwitches {
    pub fail_reads: AtomicBool,
    pub fail_scans: AtomicBool,
    pub fail_writes: AtomicBool,
    /// Milliseconds each scan blocks after taking its snapshot.
    pub scan_delay_ms: AtomicU64,
}

impl FaultSwitches {
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_scans(&self, fail: bool) {
        self.fail_scans.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_scan_delay(&self, delay: Duration) {
        self.scan_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

/// In-memory store that fails on demand without applying anything.
#[derive(Debug, Default)]
pub struct FaultyKVStore {
    inner: InMemoryKVStore,
    switches: Arc<FaultSwitches>,
}

impl FaultyKVStore {
    pub fn new() -> (Self, Arc<FaultSwitches>) {
        let switches = Arc::new(FaultSwitches::default());
        let store = Self {
            inner: InMemoryKVStore::new(),
            switches: Arc::clone(&switches),
        };
        (store, switches)
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> Result<(), KVStoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(KVStoreError::IOError {
                message: format!("injected {} failure", op),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for FaultyKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.check(&self.switches.fail_reads, "read")?;
        self.inner.get(key)
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.check(&self.switches.fail_writes, "write")?;
        self.inner.atomic_batch_write(operations)
    }

    fn conditional_batch_write(
        &self,
        key: &[u8],
        condition: &dyn Fn(Option<&[u8]>) -> bool,
        operations: Vec<BatchOperation>,
    ) -> Result<bool, KVStoreError> {
        self.check(&self.switches.fail_writes, "write")?;
        self.inner.conditional_batch_write(key, condition, operations)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        self.check(&self.switches.fail_scans, "scan")?;
        let rows = self.inner.prefix_scan(prefix)?;
        let delay = self.switches.scan_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            std::thread::sleep(Duration::from_millis(delay));
        }
        Ok(rows)
    }
}
