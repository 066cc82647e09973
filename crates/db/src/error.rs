/// Failure of a [`ComputerStore`](crate::ComputerStore) operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("computer with MAC address {mac_addr} not found")]
    NotFound { mac_addr: String },

    #[error("computer with MAC address {mac_addr} already exists")]
    Duplicate { mac_addr: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(mac_addr: &str) -> Self {
        Self::NotFound {
            mac_addr: mac_addr.to_string(),
        }
    }

    pub fn duplicate(mac_addr: &str) -> Self {
        Self::Duplicate {
            mac_addr: mac_addr.to_string(),
        }
    }
}
