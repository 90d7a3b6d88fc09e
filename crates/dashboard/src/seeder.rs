//! Seeds the dashboard tables from a fixture set.
//!
//! All four tables are created and filled inside one transaction. Rows whose
//! key already exists are skipped, so seeding the same fixtures again is a
//! no-op. Any failure rolls back the whole run, including table creation.
//!
//! Concurrent runs against the same database are serialised with a
//! transaction-scoped advisory lock, since two transactions racing on
//! `CREATE TABLE IF NOT EXISTS` collide on the catalog.

use std::fmt;

use placeholder_data::{Customer, Fixtures, Invoice, Revenue, User};
use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::auth::hash_password;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to acquire database connection: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("Failed to acquire seed lock: {0}")]
    Lock(#[source] sqlx::Error),
    #[error("Failed to create {table} table: {source}")]
    Schema {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("Failed to hash password for {email}: {source}")]
    Hash {
        email: String,
        #[source]
        source: bcrypt::BcryptError,
    },
    #[error("Password hashing task failed: {0}")]
    HashTask(#[source] JoinError),
    #[error("Failed to insert into {table}: {source}")]
    Insert {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("Failed to commit seed transaction: {0}")]
    Commit(#[source] sqlx::Error),
}

/// Rows actually inserted by one seeding run. Skipped conflicts are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: u64,
    pub customers: u64,
    pub invoices: u64,
    pub revenue: u64,
}

impl SeedSummary {
    pub fn total(&self) -> u64 {
        self.users + self.customers + self.invoices + self.revenue
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inserted {} users, {} customers, {} invoices, {} revenue rows",
            self.users, self.customers, self.invoices, self.revenue
        )
    }
}

/// Advisory lock key held for the duration of a seeding transaction.
pub const SEED_LOCK_KEY: i64 = 0x5EED_DA5B_0A2D;

const CREATE_UUID_EXTENSION: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

/// Database seeder for the dashboard fixtures.
#[derive(Clone)]
pub struct Seeder {
    pool: PgPool,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Seeds every table in one transaction.
    pub async fn seed(&self, fixtures: &Fixtures) -> Result<SeedSummary, SeedError> {
        for issue in fixtures.check() {
            warn!("Fixture issue: {issue}");
        }

        info!("Seeding {} fixture records...", fixtures.len());

        let password_hashes = hash_passwords(&fixtures.users).await?;

        let mut tx = self.pool.begin().await.map_err(SeedError::Connection)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SEED_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(SeedError::Lock)?;

        match seed_all(&mut *tx, fixtures, &password_hashes).await {
            Ok(summary) => {
                tx.commit().await.map_err(SeedError::Commit)?;
                info!("Seed committed: {summary}");
                Ok(summary)
            }
            Err(e) => {
                error!("Seeding failed, rolling back: {e}");
                if let Err(rollback) = tx.rollback().await {
                    warn!("Rollback failed: {rollback}");
                }
                Err(e)
            }
        }
    }
}

/// Hashes every fixture password off the async runtime, in fixture order.
async fn hash_passwords(users: &[User]) -> Result<Vec<String>, SeedError> {
    let credentials: Vec<(String, String)> = users
        .iter()
        .map(|u| (u.email.clone(), u.password.clone()))
        .collect();

    tokio::task::spawn_blocking(move || {
        credentials
            .into_iter()
            .map(|(email, password)| {
                hash_password(&password).map_err(|source| SeedError::Hash { email, source })
            })
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(SeedError::HashTask)?
}

async fn seed_all(
    conn: &mut PgConnection,
    fixtures: &Fixtures,
    password_hashes: &[String],
) -> Result<SeedSummary, SeedError> {
    Ok(SeedSummary {
        users: seed_users(conn, &fixtures.users, password_hashes).await?,
        customers: seed_customers(conn, &fixtures.customers).await?,
        invoices: seed_invoices(conn, &fixtures.invoices).await?,
        revenue: seed_revenue(conn, &fixtures.revenue).await?,
    })
}

async fn create_table(
    conn: &mut PgConnection,
    table: &'static str,
    statements: &[&str],
) -> Result<(), SeedError> {
    for statement in statements {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .map_err(|source| SeedError::Schema { table, source })?;
    }
    Ok(())
}

async fn seed_users(
    conn: &mut PgConnection,
    users: &[User],
    password_hashes: &[String],
) -> Result<u64, SeedError> {
    create_table(
        conn,
        "users",
        &[
            CREATE_UUID_EXTENSION,
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )
            "#,
        ],
    )
    .await?;

    let mut inserted = 0;
    for (user, password_hash) in users.iter().zip(password_hashes) {
        // No conflict target: a clash on either id or email skips the row.
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .execute(&mut *conn)
        .await
        .map_err(|source| SeedError::Insert {
            table: "users",
            source,
        })?;
        inserted += result.rows_affected();
    }

    info!("Seeded {inserted}/{} users", users.len());
    Ok(inserted)
}

async fn seed_customers(conn: &mut PgConnection, customers: &[Customer]) -> Result<u64, SeedError> {
    create_table(
        conn,
        "customers",
        &[
            CREATE_UUID_EXTENSION,
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL,
                image_url VARCHAR(255) NOT NULL
            )
            "#,
        ],
    )
    .await?;

    let mut inserted = 0;
    for customer in customers {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, image_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.image_url)
        .execute(&mut *conn)
        .await
        .map_err(|source| SeedError::Insert {
            table: "customers",
            source,
        })?;
        inserted += result.rows_affected();
    }

    info!("Seeded {inserted}/{} customers", customers.len());
    Ok(inserted)
}

async fn seed_invoices(conn: &mut PgConnection, invoices: &[Invoice]) -> Result<u64, SeedError> {
    // customer_id has no foreign key; orphans are reported by Fixtures::check.
    create_table(
        conn,
        "invoices",
        &[
            CREATE_UUID_EXTENSION,
            r#"
            CREATE TABLE IF NOT EXISTS invoices (
                id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
                customer_id UUID NOT NULL,
                amount INT NOT NULL,
                status VARCHAR(255) NOT NULL,
                date DATE NOT NULL
            )
            "#,
        ],
    )
    .await?;

    let mut inserted = 0;
    for invoice in invoices {
        let result = sqlx::query(
            r#"
            INSERT INTO invoices (id, customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(invoice.id())
        .bind(invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(&mut *conn)
        .await
        .map_err(|source| SeedError::Insert {
            table: "invoices",
            source,
        })?;
        inserted += result.rows_affected();
    }

    info!("Seeded {inserted}/{} invoices", invoices.len());
    Ok(inserted)
}

async fn seed_revenue(conn: &mut PgConnection, revenue: &[Revenue]) -> Result<u64, SeedError> {
    create_table(
        conn,
        "revenue",
        &[r#"
            CREATE TABLE IF NOT EXISTS revenue (
                month VARCHAR(4) NOT NULL UNIQUE,
                revenue INT NOT NULL
            )
            "#],
    )
    .await?;

    let mut inserted = 0;
    for rev in revenue {
        let result = sqlx::query(
            r#"
            INSERT INTO revenue (month, revenue)
            VALUES ($1, $2)
            ON CONFLICT (month) DO NOTHING
            "#,
        )
        .bind(&rev.month)
        .bind(rev.revenue)
        .execute(&mut *conn)
        .await
        .map_err(|source| SeedError::Insert {
            table: "revenue",
            source,
        })?;
        inserted += result.rows_affected();
    }

    info!("Seeded {inserted}/{} revenue months", revenue.len());
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = SeedSummary {
            users: 1,
            customers: 6,
            invoices: 13,
            revenue: 12,
        };
        assert_eq!(summary.total(), 32);
        assert_eq!(
            summary.to_string(),
            "inserted 1 users, 6 customers, 13 invoices, 12 revenue rows"
        );
    }

    #[test]
    fn test_error_messages_name_the_table() {
        let err = SeedError::Insert {
            table: "revenue",
            source: sqlx::Error::RowNotFound,
        };
        assert!(err.to_string().starts_with("Failed to insert into revenue:"));

        let err = SeedError::Schema {
            table: "users",
            source: sqlx::Error::PoolTimedOut,
        };
        assert!(err.to_string().starts_with("Failed to create users table:"));
    }

    #[tokio::test]
    async fn test_hash_passwords_keeps_fixture_order() {
        let users: Vec<User> = ["first", "second"]
            .into_iter()
            .map(|password| User {
                id: uuid::Uuid::new_v4(),
                name: "Alice".to_string(),
                email: format!("{password}@x.com"),
                password: password.to_string(),
            })
            .collect();

        let hashes = hash_passwords(&users).await.unwrap();

        assert_eq!(hashes.len(), 2);
        assert!(crate::auth::verify_password("first", &hashes[0]).unwrap());
        assert!(crate::auth::verify_password("second", &hashes[1]).unwrap());
        assert!(!crate::auth::verify_password("first", &hashes[1]).unwrap());
    }
}
