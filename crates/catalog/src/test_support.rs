//! Storage stub shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::storage::{KeyValueStorage, StorageError};

#[derive(Debug, Default)]
pub(crate) struct StubStorage {
    values: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
    write_attempts: Cell<usize>,
}

impl StubStorage {
    pub(crate) fn insert(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.set(true);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.set(true);
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }

    pub(crate) fn write_attempts(&self) -> usize {
        self.write_attempts.get()
    }
}

impl KeyValueStorage for StubStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Unavailable(format!("read of '{key}' refused")));
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_attempts.set(self.write_attempts.get() + 1);
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable(format!("write of '{key}' refused")));
        }
        self.insert(key, value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
