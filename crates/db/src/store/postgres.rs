use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::computer::Computer;
use crate::repositories::ComputerRepo;
use crate::store::ComputerStore;
use crate::DbPool;

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// [`ComputerStore`] backed by the `computers` table.
#[derive(Clone)]
pub struct PgComputerStore {
    pool: DbPool,
}

impl PgComputerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ComputerStore for PgComputerStore {
    async fn create(&self, computer: &Computer) -> Result<Computer, StoreError> {
        ComputerRepo::create(&self.pool, computer)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    StoreError::duplicate(&computer.mac_addr)
                } else {
                    StoreError::Database(err)
                }
            })
    }

    async fn read(&self, mac_addr: &str) -> Result<Computer, StoreError> {
        ComputerRepo::find_by_mac(&self.pool, mac_addr)
            .await?
            .ok_or_else(|| StoreError::not_found(mac_addr))
    }

    async fn update(&self, computer: &Computer) -> Result<Computer, StoreError> {
        ComputerRepo::update(&self.pool, computer)
            .await?
            .ok_or_else(|| StoreError::not_found(&computer.mac_addr))
    }

    async fn delete(&self, mac_addr: &str) -> Result<(), StoreError> {
        if ComputerRepo::delete(&self.pool, mac_addr).await? {
            Ok(())
        } else {
            Err(StoreError::not_found(mac_addr))
        }
    }

    async fn read_all(&self) -> Result<Vec<Computer>, StoreError> {
        Ok(ComputerRepo::list(&self.pool).await?)
    }

    async fn read_all_for_employee(
        &self,
        employee_abbr: &str,
    ) -> Result<Vec<Computer>, StoreError> {
        Ok(ComputerRepo::list_by_employee(&self.pool, employee_abbr).await?)
    }

    async fn count_for_employee(&self, employee_abbr: &str) -> Result<i64, StoreError> {
        Ok(ComputerRepo::count_by_employee(&self.pool, employee_abbr).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}
