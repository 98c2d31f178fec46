use log::warn;

use crate::{
    model::QuotationRecord,
    sink::{DocumentSink, SinkOutcome, SinkResult},
};

use super::{base::STATUS_BADGE_STYLES, Branding};

const QUOTATION_STYLES: &str = r#"
      .status-draft { background: #f3f4f6; color: #374151; }
      .status-sent { background: #dbeafe; color: #1e40af; }
      .status-accepted { background: #d1fae5; color: #065f46; }
      .status-rejected { background: #fee2e2; color: #991b1b; }
      .status-expired { background: #fef3c7; color: #92400e; }
      .validity-box {
        background: #fef3c7;
        border-left: 4px solid #f59e0b;
        padding: 16px;
        margin: 30px 0;
        border-radius: 8px;
      }
      .validity-text { color: #92400e; font-size: 14px; font-weight: 600; }"#;

/// Шаблон коммерческого предложения.
pub struct QuotationTemplate<'a> {
    branding: &'a Branding,
    record: &'a QuotationRecord,
}

impl<'a> QuotationTemplate<'a> {
    pub fn new(branding: &'a Branding, record: &'a QuotationRecord) -> Self {
        Self { branding, record }
    }

    /// Собирает полный HTML документ коммерческого предложения.
    ///
    /// Срок действия раньше даты выставления не считается ошибкой,
    /// документ всё равно будет собран.
    pub fn generate_document(&self) -> String {
        let b = self.branding;
        let q = self.record;

        if q.has_inverted_validity() {
            warn!(
                "Предложение {} действует до {}, это раньше даты выставления {}",
                q.quotation_number, q.valid_until, q.created_date
            );
        }

        let valid_until = b.date(q.valid_until);

        let mut body = String::new();
        body.push_str(&b.title_block("Quotation", q.quotation_number.as_str()));
        body.push_str(&b.info_section(
            "Quotation For",
            &q.customer,
            "Quotation Details",
            &[
                ("Date", b.date(q.created_date)),
                ("Valid Until", valid_until.clone()),
            ],
        ));
        body.push_str(&format!(
            r#"
      <div class="validity-box">
        <p class="validity-text">&#9888;&#65039; This quotation is valid until {}</p>
      </div>"#,
            valid_until
        ));
        body.push_str(&b.amount_section("QUOTED AMOUNT", q.amount));
        body.push_str(&b.items_table(
            "Service/Product Package",
            q.item_count,
            q.amount,
            &q.line_items,
        ));
        body.push_str(&b.totals_block(
            q.amount,
            q.status.badge_class(),
            &q.status.to_string().to_uppercase(),
        ));
        body.push_str(&b.footer_block(&b.quotation_contact, &b.quotation_message));

        let styles = format!("{}{}", STATUS_BADGE_STYLES, QUOTATION_STYLES);

        b.shell(&format!("Quotation {}", q.quotation_number), &styles, &body)
    }

    pub fn filename(&self) -> String {
        format!("quotation-{}.html", self.record.quotation_number)
    }

    pub fn print_quotation(&self, sink: &dyn DocumentSink) -> SinkResult<SinkOutcome> {
        sink.consume(&self.generate_document(), &self.filename())
    }

    pub fn download_quotation(&self, sink: &dyn DocumentSink) -> SinkResult<SinkOutcome> {
        sink.consume(&self.generate_document(), &self.filename())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use enum_iterator::all;

    use super::*;
    use crate::{
        model::{Amount, Customer, CustomerName, DocumentNumber, QuotationStatus},
        template::tests::RecordingSink,
    };

    fn record(status: QuotationStatus) -> QuotationRecord {
        QuotationRecord {
            quotation_number: DocumentNumber::new("QT-2024-001").unwrap(),
            customer: Customer {
                name: CustomerName::new("Global Enterprises").unwrap(),
                email: "info@global.com".to_owned(),
            },
            amount: Amount::new(15750.5).unwrap(),
            created_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            status,
            item_count: 3,
            line_items: Vec::new(),
        }
    }

    #[test]
    fn renders_validity_callout() {
        let branding = Branding::default();
        let q = record(QuotationStatus::Sent);

        let html = QuotationTemplate::new(&branding, &q).generate_document();

        assert!(html.contains("This quotation is valid until 2024-02-15</p>"));
        assert!(html.contains("<strong>Valid Until:</strong> 2024-02-15"));
        assert!(html.contains("<strong>Date:</strong> 2024-01-15"));
        assert!(html.contains("QUOTED AMOUNT"));
        assert!(html.contains(r#"<div class="amount-value">$15,750.5</div>"#));
        assert!(html.contains("<td>Service/Product Package</td>"));
        assert!(html.contains(r#"<span class="status-badge status-sent">SENT</span>"#));
        assert!(html.contains("sales@orizon.com"));
    }

    #[test]
    fn exactly_one_badge_per_status() {
        let branding = Branding::default();

        for status in all::<QuotationStatus>() {
            let q = record(status);
            let html = QuotationTemplate::new(&branding, &q).generate_document();

            for other in all::<QuotationStatus>() {
                let badge = format!(r#"class="status-badge {}""#, other.badge_class());
                let expected = if other == status { 1 } else { 0 };
                assert_eq!(expected, html.matches(&badge).count(), "{} in {}", other, status);
            }
        }
    }

    #[test]
    fn inverted_validity_still_renders() {
        let branding = Branding::default();
        let mut q = record(QuotationStatus::Expired);
        q.valid_until = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let html = QuotationTemplate::new(&branding, &q).generate_document();

        assert!(q.has_inverted_validity());
        assert!(html.contains("valid until 2024-01-01"));
        assert!(html.contains(r#"<span class="status-badge status-expired">EXPIRED</span>"#));
    }

    #[test]
    fn custom_date_format() {
        let branding = Branding {
            date_format: "%d.%m.%Y".to_owned(),
            ..Branding::default()
        };
        let q = record(QuotationStatus::Draft);

        let html = QuotationTemplate::new(&branding, &q).generate_document();

        assert!(html.contains("valid until 15.02.2024"));
    }

    #[test]
    fn print_uses_quotation_filename() {
        let branding = Branding::default();
        let q = record(QuotationStatus::Accepted);
        let sink = RecordingSink::default();

        QuotationTemplate::new(&branding, &q)
            .print_quotation(&sink)
            .unwrap();

        assert_eq!("quotation-QT-2024-001.html", sink.consumed.borrow()[0].1);
    }
}
