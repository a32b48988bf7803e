//! Invoice form state: client fields, line items, and derived totals.
//!
//! Totals are computed on read from the current items and tax rate, so
//! they can never go stale after an edit.

use crate::numeric::{coerce_float, coerce_int};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days between the issue date and the default due date.
pub const DEFAULT_PAYMENT_TERM_DAYS: u64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Line items ──────────────────────────────────────────────────────────

/// One billable row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: u32,
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    /// A blank row: quantity 1, price 0.
    pub fn blank(id: u32) -> Self {
        Self {
            id,
            description: String::new(),
            quantity: 1,
            unit_price: 0.0,
        }
    }

    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Editable columns of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Description,
    Quantity,
    UnitPrice,
}

/// Derived invoice totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

// ─── Invoice fields ──────────────────────────────────────────────────────

/// Free-form invoice header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceField {
    InvoiceNumber,
    IssueDate,
    DueDate,
    ClientName,
    ClientEmail,
    ClientAddress,
    Notes,
}

impl InvoiceField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "invoiceNumber" => Some(Self::InvoiceNumber),
            "issueDate" | "date" => Some(Self::IssueDate),
            "dueDate" => Some(Self::DueDate),
            "clientName" => Some(Self::ClientName),
            "clientEmail" => Some(Self::ClientEmail),
            "clientAddress" => Some(Self::ClientAddress),
            "notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

/// The whole invoice form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFields {
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub client_name: String,
    pub client_email: String,
    pub client_address: String,
    pub notes: String,
    /// Percentage, e.g. `8.0` for 8 %.
    pub tax_rate: f64,
    pub items: Vec<LineItem>,
}

impl InvoiceFields {
    /// A blank invoice issued on `today`, due thirty days later.
    pub fn new(today: NaiveDate) -> Self {
        let due_date = today
            .checked_add_days(Days::new(DEFAULT_PAYMENT_TERM_DAYS))
            .unwrap_or(today);
        Self {
            invoice_number: "001".to_string(),
            issue_date: today,
            due_date,
            client_name: String::new(),
            client_email: String::new(),
            client_address: String::new(),
            notes: String::new(),
            tax_rate: 0.0,
            items: vec![LineItem::blank(1)],
        }
    }

    /// Set a header field from raw form text. Returns `true` if it changed.
    ///
    /// Dates must be `YYYY-MM-DD`; anything else keeps the previous date.
    pub fn set_field(&mut self, field: InvoiceField, value: &str) -> bool {
        let slot = match field {
            InvoiceField::InvoiceNumber => &mut self.invoice_number,
            InvoiceField::ClientName => &mut self.client_name,
            InvoiceField::ClientEmail => &mut self.client_email,
            InvoiceField::ClientAddress => &mut self.client_address,
            InvoiceField::Notes => &mut self.notes,
            InvoiceField::IssueDate | InvoiceField::DueDate => {
                let Ok(date) = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) else {
                    log::warn!("ignoring malformed date {value:?} for {field:?}");
                    return false;
                };
                let target = if field == InvoiceField::IssueDate {
                    &mut self.issue_date
                } else {
                    &mut self.due_date
                };
                let changed = *target != date;
                *target = date;
                return changed;
            }
        };
        if slot.as_str() == value {
            return false;
        }
        *slot = value.to_string();
        true
    }

    /// Set the tax rate from raw form text (non-numeric → 0).
    pub fn set_tax_rate(&mut self, raw: &str) -> bool {
        let rate = coerce_float(raw);
        let changed = self.tax_rate != rate;
        self.tax_rate = rate;
        changed
    }

    /// Append a blank item with the next id. Returns the new id.
    pub fn add_item(&mut self) -> u32 {
        let id = self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        self.items.push(LineItem::blank(id));
        id
    }

    /// Remove an item by id. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Edit one column of an item from raw form text.
    pub fn edit_item(&mut self, id: u32, field: ItemField, raw: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            log::debug!("edit_item: no line item {id}");
            return false;
        };
        match field {
            ItemField::Description => {
                if item.description == raw {
                    return false;
                }
                item.description = raw.to_string();
            }
            ItemField::Quantity => {
                let q = coerce_int(raw);
                if item.quantity == q {
                    return false;
                }
                item.quantity = q;
            }
            ItemField::UnitPrice => {
                let p = coerce_float(raw);
                if item.unit_price == p {
                    return false;
                }
                item.unit_price = p;
            }
        }
        true
    }

    pub fn totals(&self) -> Totals {
        let subtotal: f64 = self.items.iter().map(LineItem::amount).sum();
        let tax = subtotal * self.tax_rate / 100.0;
        Totals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Two-decimal money rendering (`51.3` → `"51.30"`).
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}
