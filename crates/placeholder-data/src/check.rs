//! Data-quality checks over a fixture set.
//!
//! None of these are enforced by the database schema. The seeder reports them
//! as warnings and seeds anyway; conflicting rows are skipped at insert time.

use std::collections::HashSet;

use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::fixtures::Fixtures;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureIssue {
    #[error("{entity} #{index} is invalid: {message}")]
    InvalidRecord {
        entity: &'static str,
        index: usize,
        message: String,
    },
    #[error("invoice #{index} references unknown customer {customer_id}")]
    UnknownCustomer { index: usize, customer_id: Uuid },
    #[error("duplicate user id {0}")]
    DuplicateUser(Uuid),
    #[error("duplicate user email {0}")]
    DuplicateEmail(String),
    #[error("duplicate customer id {0}")]
    DuplicateCustomer(Uuid),
    #[error("invoice #{index} duplicates an earlier invoice (id {id})")]
    DuplicateInvoice { index: usize, id: Uuid },
    #[error("duplicate revenue month {0}")]
    DuplicateMonth(String),
}

fn invalid_records<T: Validate>(entity: &'static str, records: &[T]) -> Vec<FixtureIssue> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record
                .validate()
                .err()
                .map(|errors| FixtureIssue::InvalidRecord {
                    entity,
                    index,
                    message: errors.to_string(),
                })
        })
        .collect()
}

impl Fixtures {
    /// Runs every data-quality check, returning the issues found in table order.
    pub fn check(&self) -> Vec<FixtureIssue> {
        let mut issues = Vec::new();

        issues.extend(invalid_records("user", &self.users));
        issues.extend(invalid_records("customer", &self.customers));
        issues.extend(invalid_records("invoice", &self.invoices));
        issues.extend(invalid_records("revenue", &self.revenue));

        let mut user_ids = HashSet::new();
        let mut emails = HashSet::new();
        for user in &self.users {
            if !user_ids.insert(user.id) {
                issues.push(FixtureIssue::DuplicateUser(user.id));
            }
            if !emails.insert(user.email.as_str()) {
                issues.push(FixtureIssue::DuplicateEmail(user.email.clone()));
            }
        }

        let mut customer_ids = HashSet::new();
        for customer in &self.customers {
            if !customer_ids.insert(customer.id) {
                issues.push(FixtureIssue::DuplicateCustomer(customer.id));
            }
        }

        issues.extend(self.orphaned_invoices());

        // Identical invoices derive the same id and collapse into one row.
        let mut invoice_ids = HashSet::new();
        for (index, invoice) in self.invoices.iter().enumerate() {
            let id = invoice.id();
            if !invoice_ids.insert(id) {
                issues.push(FixtureIssue::DuplicateInvoice { index, id });
            }
        }

        let mut months = HashSet::new();
        for revenue in &self.revenue {
            if !months.insert(revenue.month.as_str()) {
                issues.push(FixtureIssue::DuplicateMonth(revenue.month.clone()));
            }
        }

        issues
    }

    /// Invoices whose customer is not part of this fixture set.
    pub fn orphaned_invoices(&self) -> Vec<FixtureIssue> {
        let known: HashSet<Uuid> = self.customers.iter().map(|c| c.id).collect();

        self.invoices
            .iter()
            .enumerate()
            .filter(|(_, invoice)| !known.contains(&invoice.customer_id))
            .map(|(index, invoice)| FixtureIssue::UnknownCustomer {
                index,
                customer_id: invoice.customer_id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Invoice, InvoiceStatus, Revenue, User};
    use time::macros::date;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_placeholder_fixtures_are_clean() {
        let issues = Fixtures::placeholder().check();
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_every_placeholder_invoice_has_a_customer() {
        let fixtures = Fixtures::placeholder();
        let known: HashSet<Uuid> = fixtures.customers.iter().map(|c| c.id).collect();
        for invoice in &fixtures.invoices {
            assert!(known.contains(&invoice.customer_id));
        }
    }

    #[test]
    fn test_orphaned_invoice_reported() {
        let missing = Uuid::new_v4();
        let fixtures = Fixtures {
            invoices: vec![Invoice {
                customer_id: missing,
                amount: 100,
                status: InvoiceStatus::Paid,
                date: date!(2024 - 02 - 01),
            }],
            ..Default::default()
        };

        assert_eq!(
            fixtures.check(),
            vec![FixtureIssue::UnknownCustomer {
                index: 0,
                customer_id: missing,
            }]
        );
    }

    #[test]
    fn test_duplicates_reported() {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: "Amy Burns".to_string(),
            email: "amy@burns.com".to_string(),
            image_url: "/customers/amy-burns.png".to_string(),
        };
        let mut same_id = user("b@x.com");
        let first = user("c@x.com");
        let first_id = first.id;
        same_id.id = first_id;
        let invoice = Invoice {
            customer_id: customer.id,
            amount: 500,
            status: InvoiceStatus::Paid,
            date: date!(2023 - 08 - 19),
        };
        let fixtures = Fixtures {
            users: vec![user("a@x.com"), user("a@x.com"), first, same_id],
            customers: vec![customer.clone(), customer.clone()],
            invoices: vec![invoice.clone(), invoice.clone()],
            revenue: vec![
                Revenue {
                    month: "Jan".to_string(),
                    revenue: 1,
                },
                Revenue {
                    month: "Jan".to_string(),
                    revenue: 2,
                },
            ],
        };

        let issues = fixtures.check();
        assert!(issues.contains(&FixtureIssue::DuplicateEmail("a@x.com".to_string())));
        assert!(issues.contains(&FixtureIssue::DuplicateUser(first_id)));
        assert!(issues.contains(&FixtureIssue::DuplicateCustomer(customer.id)));
        assert!(issues.contains(&FixtureIssue::DuplicateInvoice {
            index: 1,
            id: invoice.id(),
        }));
        assert!(issues.contains(&FixtureIssue::DuplicateMonth("Jan".to_string())));
    }

    #[test]
    fn test_invalid_record_reported() {
        let fixtures = Fixtures {
            users: vec![user("not-an-email")],
            ..Default::default()
        };

        let issues = fixtures.check();
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            FixtureIssue::InvalidRecord { entity, index, .. } => {
                assert_eq!(*entity, "user");
                assert_eq!(*index, 0);
            }
            other => panic!("unexpected issue: {other:?}"),
        }
    }
}
