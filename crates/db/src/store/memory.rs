use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::computer::Computer;
use crate::store::ComputerStore;

/// In-process [`ComputerStore`].
///
/// Records live in a map ordered by MAC address, which gives `read_all`
/// the same ordering as the PostgreSQL adapter.
#[derive(Debug, Default)]
pub struct MemoryComputerStore {
    computers: RwLock<BTreeMap<String, Computer>>,
}

impl MemoryComputerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `computers`. Later entries win on
    /// duplicate MAC addresses.
    pub fn with_computers(computers: impl IntoIterator<Item = Computer>) -> Self {
        let map = computers
            .into_iter()
            .map(|c| (c.mac_addr.clone(), c))
            .collect();
        Self {
            computers: RwLock::new(map),
        }
    }

    pub async fn len(&self) -> usize {
        self.computers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.computers.read().await.is_empty()
    }
}

#[async_trait]
impl ComputerStore for MemoryComputerStore {
    async fn create(&self, computer: &Computer) -> Result<Computer, StoreError> {
        let mut computers = self.computers.write().await;
        if computers.contains_key(&computer.mac_addr) {
            return Err(StoreError::duplicate(&computer.mac_addr));
        }
        computers.insert(computer.mac_addr.clone(), computer.clone());
        Ok(computer.clone())
    }

    async fn read(&self, mac_addr: &str) -> Result<Computer, StoreError> {
        self.computers
            .read()
            .await
            .get(mac_addr)
            .cloned()
            .ok_or_else(|| StoreError::not_found(mac_addr))
    }

    async fn update(&self, computer: &Computer) -> Result<Computer, StoreError> {
        let mut computers = self.computers.write().await;
        let stored = computers
            .get_mut(&computer.mac_addr)
            .ok_or_else(|| StoreError::not_found(&computer.mac_addr))?;
        *stored = computer.clone();
        Ok(computer.clone())
    }

    async fn delete(&self, mac_addr: &str) -> Result<(), StoreError> {
        self.computers
            .write()
            .await
            .remove(mac_addr)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(mac_addr))
    }

    async fn read_all(&self) -> Result<Vec<Computer>, StoreError> {
        Ok(self.computers.read().await.values().cloned().collect())
    }

    async fn read_all_for_employee(
        &self,
        employee_abbr: &str,
    ) -> Result<Vec<Computer>, StoreError> {
        Ok(self
            .computers
            .read()
            .await
            .values()
            .filter(|c| c.employee_abbr == employee_abbr)
            .cloned()
            .collect())
    }

    async fn count_for_employee(&self, employee_abbr: &str) -> Result<i64, StoreError> {
        let count = self
            .computers
            .read()
            .await
            .values()
            .filter(|c| c.employee_abbr == employee_abbr)
            .count();
        Ok(count as i64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
