//! Shared entity fixtures for mapper tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use tablemap_mapper::{EnumRepr, Member, TableEnum, TableEntity};
use uuid::Uuid;

/// Keys bound by explicit markers, two plain columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub category: String,
    pub id: String,
    pub name: String,
    pub age: i32,
}

impl Person {
    pub fn ann() -> Self {
        Self {
            category: "users".into(),
            id: "42".into(),
            name: "Ann".into(),
            age: 30,
        }
    }
}

impl TableEntity for Person {
    fn members() -> Vec<Member<Self>> {
        vec![
            Member::field("Category", |p: &Person| &p.category, |p: &mut Person| &mut p.category)
                .partition_key(),
            Member::field("Id", |p: &Person| &p.id, |p: &mut Person| &mut p.id).row_key(),
            Member::field("Name", |p: &Person| &p.name, |p: &mut Person| &mut p.name),
            Member::field("Age", |p: &Person| &p.age, |p: &mut Person| &mut p.age),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Status {
    #[default]
    Pending,
    Shipped,
    Cancelled,
}

impl TableEnum for Status {
    const VARIANTS: &'static [(Self, &'static str, i32)] = &[
        (Self::Pending, "Pending", 0),
        (Self::Shipped, "Shipped", 1),
        (Self::Cancelled, "Cancelled", 2),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
}

impl TableEnum for Priority {
    const VARIANTS: &'static [(Self, &'static str, i32)] =
        &[(Self::Normal, "Normal", 10), (Self::Urgent, "Urgent", 20)];
    const REPR: EnumRepr = EnumRepr::Number;
}

/// Every role bound, every supported kind, a renamed nullable column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub customer: String,
    pub order_id: Uuid,
    pub placed_at: Option<DateTime<Utc>>,
    pub version: Option<String>,
    pub total: f64,
    pub status: Status,
    pub priority: Priority,
    pub notes: Option<String>,
    pub quantity: u16,
    pub attachment: Vec<u8>,
    pub rush: bool,
    pub sequence: i64,
}

impl TableEntity for Order {
    fn members() -> Vec<Member<Self>> {
        vec![
            Member::field("Customer", |o: &Order| &o.customer, |o: &mut Order| &mut o.customer)
                .partition_key(),
            Member::field("OrderId", |o: &Order| &o.order_id, |o: &mut Order| &mut o.order_id)
                .row_key(),
            Member::field("PlacedAt", |o: &Order| &o.placed_at, |o: &mut Order| &mut o.placed_at)
                .timestamp(),
            Member::field("Version", |o: &Order| &o.version, |o: &mut Order| &mut o.version)
                .etag(),
            Member::field("Total", |o: &Order| &o.total, |o: &mut Order| &mut o.total),
            Member::enumeration("Status", |o: &Order| &o.status, |o: &mut Order| &mut o.status),
            Member::enumeration("Priority", |o: &Order| &o.priority, |o: &mut Order| {
                &mut o.priority
            }),
            Member::field("Notes", |o: &Order| &o.notes, |o: &mut Order| &mut o.notes)
                .rename("Comment"),
            Member::field("Quantity", |o: &Order| &o.quantity, |o: &mut Order| &mut o.quantity),
            Member::field("Attachment", |o: &Order| &o.attachment, |o: &mut Order| {
                &mut o.attachment
            }),
            Member::field("Rush", |o: &Order| &o.rush, |o: &mut Order| &mut o.rush),
            Member::field("Sequence", |o: &Order| &o.sequence, |o: &mut Order| &mut o.sequence),
        ]
    }
}

/// Roles bound purely by reserved member names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conventional {
    pub partition_key: String,
    pub row_key: i64,
    pub timestamp: DateTime<Utc>,
    pub etag: String,
    pub label: String,
}

impl TableEntity for Conventional {
    fn members() -> Vec<Member<Self>> {
        vec![
            Member::field("PartitionKey", |c: &Conventional| &c.partition_key, |c: &mut Conventional| {
                &mut c.partition_key
            }),
            Member::field("RowKey", |c: &Conventional| &c.row_key, |c: &mut Conventional| {
                &mut c.row_key
            }),
            Member::field("Timestamp", |c: &Conventional| &c.timestamp, |c: &mut Conventional| {
                &mut c.timestamp
            }),
            Member::field("ETag", |c: &Conventional| &c.etag, |c: &mut Conventional| &mut c.etag),
            Member::field("Label", |c: &Conventional| &c.label, |c: &mut Conventional| &mut c.label),
        ]
    }
}
