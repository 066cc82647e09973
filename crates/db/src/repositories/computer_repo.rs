//! Repository for the `computers` table.

use sqlx::PgPool;

use crate::models::computer::Computer;

/// Column list for `computers` queries.
const COLUMNS: &str = "mac_addr, computer_name, ip_addr, employee_abbr, description";

/// Provides CRUD operations for computers.
pub struct ComputerRepo;

impl ComputerRepo {
    /// Insert a new computer, returning the stored row.
    pub async fn create(pool: &PgPool, input: &Computer) -> Result<Computer, sqlx::Error> {
        let query = format!(
            "INSERT INTO computers (mac_addr, computer_name, ip_addr, employee_abbr, description) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Computer>(&query)
            .bind(&input.mac_addr)
            .bind(&input.computer_name)
            .bind(&input.ip_addr)
            .bind(&input.employee_abbr)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a computer by MAC address.
    pub async fn find_by_mac(
        pool: &PgPool,
        mac_addr: &str,
    ) -> Result<Option<Computer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM computers WHERE mac_addr = $1");
        sqlx::query_as::<_, Computer>(&query)
            .bind(mac_addr)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable column of the row selected by `input.mac_addr`.
    ///
    /// Returns `None` if no row has that MAC address.
    pub async fn update(pool: &PgPool, input: &Computer) -> Result<Option<Computer>, sqlx::Error> {
        let query = format!(
            "UPDATE computers SET \
                computer_name = $2, \
                ip_addr = $3, \
                employee_abbr = $4, \
                description = $5 \
             WHERE mac_addr = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Computer>(&query)
            .bind(&input.mac_addr)
            .bind(&input.computer_name)
            .bind(&input.ip_addr)
            .bind(&input.employee_abbr)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a computer. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, mac_addr: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM computers WHERE mac_addr = $1")
            .bind(mac_addr)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all computers ordered by MAC address.
    pub async fn list(pool: &PgPool) -> Result<Vec<Computer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM computers ORDER BY mac_addr");
        sqlx::query_as::<_, Computer>(&query).fetch_all(pool).await
    }

    /// List the computers owned by one employee, ordered by MAC address.
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_abbr: &str,
    ) -> Result<Vec<Computer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM computers WHERE employee_abbr = $1 ORDER BY mac_addr"
        );
        sqlx::query_as::<_, Computer>(&query)
            .bind(employee_abbr)
            .fetch_all(pool)
            .await
    }

    /// Count the computers owned by one employee.
    pub async fn count_by_employee(pool: &PgPool, employee_abbr: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM computers WHERE employee_abbr = $1")
            .bind(employee_abbr)
            .fetch_one(pool)
            .await
    }
}
