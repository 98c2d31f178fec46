use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::newtype;

/// Документ, который можно отрисовать.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Document {
    /// Чек об оплате.
    Receipt(ReceiptRecord),

    /// Коммерческое предложение.
    Quotation(QuotationRecord),
}

impl Document {
    /// Возвращает номер документа.
    pub fn number(&self) -> &DocumentNumber {
        match self {
            Self::Receipt(r) => &r.receipt_number,
            Self::Quotation(q) => &q.quotation_number,
        }
    }
}

/// Заказчик.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Customer {
    pub name: CustomerName,
    pub email: String,
}

/// Чек об оплате.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    pub receipt_number: DocumentNumber,

    pub customer: Customer,

    /// Итоговая сумма оплаты.
    pub amount: Amount,

    /// Дата оплаты.
    pub date: NaiveDate,

    pub payment_method: String,

    pub status: ReceiptStatus,

    /// Количество позиций в чеке.
    #[serde(alias = "items")]
    pub item_count: u32,

    /// Детализация по позициям. Может отсутствовать.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
}

/// Коммерческое предложение.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRecord {
    pub quotation_number: DocumentNumber,

    pub customer: Customer,

    /// Предложенная сумма.
    pub amount: Amount,

    /// Дата выставления.
    pub created_date: NaiveDate,

    /// Дата, до которой предложение действует.
    /// Не проверяется относительно `created_date`.
    pub valid_until: NaiveDate,

    pub status: QuotationStatus,

    #[serde(alias = "items")]
    pub item_count: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
}

impl QuotationRecord {
    /// Проверяет что срок действия заканчивается раньше даты выставления.
    pub fn has_inverted_validity(&self) -> bool {
        self.valid_until < self.created_date
    }
}

/// Одна позиция документа.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub amount: Amount,
}

/// Статус чека.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    #[display(fmt = "paid")]
    Paid,
    #[display(fmt = "pending")]
    Pending,
    #[display(fmt = "refunded")]
    Refunded,
}

impl ReceiptStatus {
    /// CSS класс бейджа статуса.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Paid => "status-paid",
            Self::Pending => "status-pending",
            Self::Refunded => "status-refunded",
        }
    }
}

/// Статус коммерческого предложения.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    #[display(fmt = "draft")]
    Draft,
    #[display(fmt = "sent")]
    Sent,
    #[display(fmt = "accepted")]
    Accepted,
    #[display(fmt = "rejected")]
    Rejected,
    #[display(fmt = "expired")]
    Expired,
}

impl QuotationStatus {
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Draft => "status-draft",
            Self::Sent => "status-sent",
            Self::Accepted => "status-accepted",
            Self::Rejected => "status-rejected",
            Self::Expired => "status-expired",
        }
    }
}

newtype!(DocumentNumber, String, "String", document_number_validate);

fn document_number_validate(value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        return Err(anyhow!("document number shouldn't be empty"));
    }

    Ok(())
}

newtype!(CustomerName, String, "String", customer_name_validate);

fn customer_name_validate(value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        return Err(anyhow!("customer name shouldn't be empty"));
    }

    Ok(())
}

newtype!(Amount, f64, "f64", amount_validate);

fn amount_validate(value: &f64) -> anyhow::Result<()> {
    if !value.is_finite() {
        return Err(anyhow!("amount should be a finite number"));
    }

    if *value < 0.0 {
        return Err(anyhow!("amount shouldn't be negative"));
    }

    Ok(())
}
