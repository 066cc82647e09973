//! The record store capability and its adapters.

mod memory;
mod postgres;

use async_trait::async_trait;

pub use memory::MemoryComputerStore;
pub use postgres::PgComputerStore;

use crate::error::StoreError;
use crate::models::computer::Computer;

/// Storage of computer records keyed by MAC address.
///
/// One instance is shared by every request handler and by the threshold
/// monitor, so implementations must be safe to call concurrently. No
/// operation spans more than one statement; callers get whatever
/// consistency the backing store offers between a write and a later read.
#[async_trait]
pub trait ComputerStore: Send + Sync {
    /// Insert a record. Fails with [`StoreError::Duplicate`] if the MAC
    /// address is taken.
    async fn create(&self, computer: &Computer) -> Result<Computer, StoreError>;

    /// Fetch one record. Fails with [`StoreError::NotFound`] if absent.
    async fn read(&self, mac_addr: &str) -> Result<Computer, StoreError>;

    /// Overwrite the record selected by `computer.mac_addr`. The MAC address
    /// itself is never rewritten. Fails with [`StoreError::NotFound`] if absent.
    async fn update(&self, computer: &Computer) -> Result<Computer, StoreError>;

    /// Remove one record. Fails with [`StoreError::NotFound`] if absent.
    async fn delete(&self, mac_addr: &str) -> Result<(), StoreError>;

    /// All records, ordered by MAC address.
    async fn read_all(&self) -> Result<Vec<Computer>, StoreError>;

    /// Records owned by `employee_abbr`, ordered by MAC address.
    async fn read_all_for_employee(&self, employee_abbr: &str)
        -> Result<Vec<Computer>, StoreError>;

    /// Number of records owned by `employee_abbr`.
    async fn count_for_employee(&self, employee_abbr: &str) -> Result<i64, StoreError>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
