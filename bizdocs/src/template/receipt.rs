use crate::{
    model::ReceiptRecord,
    sink::{DocumentSink, SinkOutcome, SinkResult},
};

use super::{base::STATUS_BADGE_STYLES, escape, Branding};

const RECEIPT_STYLES: &str = r#"
      .status-paid { background: #d1fae5; color: #065f46; }
      .status-pending { background: #fef3c7; color: #92400e; }
      .status-refunded { background: #fee2e2; color: #991b1b; }"#;

/// Шаблон чека об оплате.
pub struct ReceiptTemplate<'a> {
    branding: &'a Branding,
    record: &'a ReceiptRecord,
}

impl<'a> ReceiptTemplate<'a> {
    pub fn new(branding: &'a Branding, record: &'a ReceiptRecord) -> Self {
        Self { branding, record }
    }

    /// Собирает полный HTML документ чека.
    pub fn generate_document(&self) -> String {
        let b = self.branding;
        let r = self.record;

        let mut body = String::new();
        body.push_str(&b.title_block("Payment Receipt", r.receipt_number.as_str()));
        body.push_str(&b.info_section(
            "Billed To",
            &r.customer,
            "Receipt Details",
            &[
                ("Date", b.date(r.date)),
                ("Payment Method", escape(&r.payment_method)),
            ],
        ));
        body.push_str(&b.amount_section("AMOUNT PAID", r.amount));
        body.push_str(&b.items_table("Service/Product", r.item_count, r.amount, &r.line_items));
        body.push_str(&b.totals_block(
            r.amount,
            r.status.badge_class(),
            &r.status.to_string().to_uppercase(),
        ));
        body.push_str(&b.footer_block(&b.receipt_contact, &b.receipt_message));

        let styles = format!("{}{}", STATUS_BADGE_STYLES, RECEIPT_STYLES);

        b.shell(&format!("Receipt {}", r.receipt_number), &styles, &body)
    }

    /// Имя файла чека.
    pub fn filename(&self) -> String {
        format!("receipt-{}.html", self.record.receipt_number)
    }

    pub fn print_receipt(&self, sink: &dyn DocumentSink) -> SinkResult<SinkOutcome> {
        sink.consume(&self.generate_document(), &self.filename())
    }

    pub fn download_receipt(&self, sink: &dyn DocumentSink) -> SinkResult<SinkOutcome> {
        sink.consume(&self.generate_document(), &self.filename())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use enum_iterator::all;

    use super::*;
    use crate::{
        model::{Amount, Customer, CustomerName, DocumentNumber, LineItem, ReceiptStatus},
        template::tests::RecordingSink,
    };

    fn record(status: ReceiptStatus) -> ReceiptRecord {
        ReceiptRecord {
            receipt_number: DocumentNumber::new("RCP-2024-001").unwrap(),
            customer: Customer {
                name: CustomerName::new("Tech Solutions Inc").unwrap(),
                email: "contact@techsolutions.com".to_owned(),
            },
            amount: Amount::new(2500.0).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            payment_method: "Credit Card".to_owned(),
            status,
            item_count: 5,
            line_items: Vec::new(),
        }
    }

    #[test]
    fn renders_known_receipt() {
        let branding = Branding::default();
        let r = record(ReceiptStatus::Paid);

        let html = ReceiptTemplate::new(&branding, &r).generate_document();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Receipt RCP-2024-001</title>"));
        assert!(html.contains("Payment Receipt"));
        assert!(html.contains("#RCP-2024-001"));
        assert!(html.contains(r#"<div class="amount-value">$2,500</div>"#));
        assert!(html.contains(r#"<span class="status-badge status-paid">PAID</span>"#));
        assert!(html.contains("<strong>Date:</strong> 2024-01-15"));
        assert!(html.contains("<strong>Payment Method:</strong> Credit Card"));
        assert!(html.contains(r#"<td class="center">5</td>"#));
        assert!(html.contains("<td>Service/Product</td>"));
        assert!(html.contains("support@orizon.com"));
        assert!(html.contains("Thank you for your business!"));
    }

    #[test]
    fn exactly_one_badge_per_status() {
        let branding = Branding::default();

        for status in all::<ReceiptStatus>() {
            let r = record(status);
            let html = ReceiptTemplate::new(&branding, &r).generate_document();

            for other in all::<ReceiptStatus>() {
                let badge = format!(r#"class="status-badge {}""#, other.badge_class());
                let expected = if other == status { 1 } else { 0 };
                assert_eq!(expected, html.matches(&badge).count(), "{} in {}", other, status);
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let branding = Branding::default();
        let r = record(ReceiptStatus::Pending);
        let tmpl = ReceiptTemplate::new(&branding, &r);

        assert_eq!(tmpl.generate_document(), tmpl.generate_document());
    }

    #[test]
    fn customer_markup_is_escaped() {
        let branding = Branding::default();
        let mut r = record(ReceiptStatus::Refunded);
        r.customer.name = CustomerName::new("<img src=x onerror=alert(1)>").unwrap();

        let html = ReceiptTemplate::new(&branding, &r).generate_document();

        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn line_items_replace_summary_row() {
        let branding = Branding::default();
        let mut r = record(ReceiptStatus::Paid);
        r.line_items = vec![LineItem {
            description: "Consulting".to_owned(),
            quantity: 5,
            amount: Amount::new(2500.0).unwrap(),
        }];

        let html = ReceiptTemplate::new(&branding, &r).generate_document();

        assert!(html.contains("<td>Consulting</td>"));
        assert!(!html.contains("<td>Service/Product</td>"));
    }

    #[test]
    fn download_uses_receipt_filename() {
        let branding = Branding::default();
        let r = record(ReceiptStatus::Paid);
        let sink = RecordingSink::default();

        ReceiptTemplate::new(&branding, &r)
            .download_receipt(&sink)
            .unwrap();

        let consumed = sink.consumed.borrow();
        assert_eq!(1, consumed.len());
        assert_eq!("receipt-RCP-2024-001.html", consumed[0].1);
        assert!(consumed[0].0.contains("$2,500"));
    }
}
