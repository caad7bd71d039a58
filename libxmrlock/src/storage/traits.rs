use crate::lock::{AtomicLock, LockId};

pub trait LockStore {
    fn write_lock(&mut self, lock: &AtomicLock) -> Result<(), anyhow::Error>;
    fn load_lock(&self, id: &LockId) -> Result<AtomicLock, anyhow::Error>;
}
