//! Fixture record types.
//!
//! Each record mirrors one row of the corresponding dashboard table. Values are
//! inserted verbatim except for [`User::password`], which is hashed by the
//! seeder before it reaches the database.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;
use validator::Validate;

/// Namespace for deriving stable invoice ids from their contents.
const INVOICE_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a9e_8d43_4b7a_a1e5_3c0d_9b27_f814);

/// A dashboard login. `password` is plaintext in the fixture set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Customer {
    pub id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Image URL must be between 1 and 255 characters"))]
    pub image_url: String,
}

/// Invoice payment state, stored as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invoice billed to a customer. `amount` is in cents.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Invoice {
    pub customer_id: Uuid,
    #[validate(range(min = 0, message = "Amount must not be negative"))]
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: Date,
}

impl Invoice {
    /// Stable id derived from the invoice contents.
    ///
    /// Fixture invoices carry no id of their own; deriving one keeps repeated
    /// seeding from inserting the same invoice twice.
    pub fn id(&self) -> Uuid {
        let key = format!(
            "{}|{}|{}|{}",
            self.customer_id, self.amount, self.status, self.date
        );
        Uuid::new_v5(&INVOICE_NAMESPACE, key.as_bytes())
    }
}

/// Revenue for one month, keyed by a short month label such as `"Jan"`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Revenue {
    #[validate(length(min = 1, max = 4, message = "Month label must be between 1 and 4 characters"))]
    pub month: String,
    #[validate(range(min = 0, message = "Revenue must not be negative"))]
    pub revenue: i32,
}
