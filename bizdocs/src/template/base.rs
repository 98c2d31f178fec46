use std::fmt::Write;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::{Amount, Customer, LineItem};

use super::escape;

/// Фирменный стиль документов.
/// Общая часть для всех шаблонов: стили, шапка, блок заказчика и подвал.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Branding {
    /// Название компании в шапке.
    pub name: String,

    /// Подзаголовок под названием.
    pub tagline: String,

    /// Основной цвет.
    pub color: String,

    /// Тёмный оттенок основного цвета, используется в градиентах.
    pub color_dark: String,

    /// Символ валюты перед суммой.
    pub currency_symbol: String,

    /// Формат дат в документе (strftime).
    pub date_format: String,

    /// Контакт в подвале чека.
    pub receipt_contact: String,

    /// Благодарность в подвале чека.
    pub receipt_message: String,

    /// Контакт в подвале коммерческого предложения.
    pub quotation_contact: String,

    /// Благодарность в подвале коммерческого предложения.
    pub quotation_message: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "ORIZON".to_owned(),
            tagline: "PROFESSIONAL BUSINESS SOLUTIONS".to_owned(),
            color: "#3b82f6".to_owned(),
            color_dark: "#1d4ed8".to_owned(),
            currency_symbol: "$".to_owned(),
            date_format: "%Y-%m-%d".to_owned(),
            receipt_contact: "support@orizon.com".to_owned(),
            receipt_message: "Thank you for your business!".to_owned(),
            quotation_contact: "sales@orizon.com".to_owned(),
            quotation_message: "Thank you for considering Orizon!".to_owned(),
        }
    }
}

/// Стили бейджа статуса, общие для чека и коммерческого предложения.
pub(super) const STATUS_BADGE_STYLES: &str = r#"
      .status-badge {
        display: inline-block;
        padding: 6px 16px;
        border-radius: 20px;
        font-size: 12px;
        font-weight: 600;
        text-transform: uppercase;
      }"#;

impl Branding {
    /// Возвращает CSS, общий для всех документов.
    pub fn style_sheet(&self) -> String {
        format!(
            r#"
      * {{ margin: 0; padding: 0; box-sizing: border-box; }}
      body {{
        font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
        padding: 40px;
        background: #f5f5f5;
      }}
      .document-container {{
        max-width: 800px;
        margin: 0 auto;
        background: white;
        padding: 60px;
        box-shadow: 0 0 20px rgba(0,0,0,0.1);
      }}
      .header {{
        text-align: center;
        margin-bottom: 40px;
        padding-bottom: 30px;
        border-bottom: 3px solid {color};
      }}
      .logo {{
        font-size: 48px;
        font-weight: bold;
        background: linear-gradient(135deg, {color} 0%, {dark} 100%);
        -webkit-background-clip: text;
        -webkit-text-fill-color: transparent;
        background-clip: text;
        margin-bottom: 10px;
      }}
      .tagline {{ color: #6b7280; font-size: 14px; letter-spacing: 2px; }}
      .document-title {{ font-size: 32px; font-weight: bold; color: #1f2937; margin: 30px 0 10px; }}
      .document-number {{ color: #6b7280; font-size: 18px; margin-bottom: 30px; }}
      .info-section {{ display: flex; justify-content: space-between; margin-bottom: 40px; }}
      .info-block {{ flex: 1; }}
      .info-block.right {{ text-align: right; }}
      .info-label {{
        font-weight: 600;
        color: #374151;
        margin-bottom: 8px;
        font-size: 12px;
        text-transform: uppercase;
        letter-spacing: 1px;
      }}
      .info-value {{ color: #1f2937; font-size: 16px; line-height: 1.6; }}
      .amount-section {{
        background: linear-gradient(135deg, {color} 0%, {dark} 100%);
        padding: 30px;
        border-radius: 12px;
        margin: 40px 0;
        text-align: center;
      }}
      .amount-label {{ color: rgba(255,255,255,0.9); font-size: 14px; margin-bottom: 8px; letter-spacing: 1px; }}
      .amount-value {{ color: white; font-size: 48px; font-weight: bold; }}
      .details-table {{ width: 100%; border-collapse: collapse; margin: 30px 0; }}
      .details-table th {{
        background: #f3f4f6;
        padding: 12px;
        text-align: left;
        font-weight: 600;
        color: #374151;
        font-size: 12px;
        text-transform: uppercase;
      }}
      .details-table td {{ padding: 12px; border-bottom: 1px solid #e5e7eb; color: #1f2937; }}
      .details-table .center {{ text-align: center; }}
      .details-table .right {{ text-align: right; }}
      .totals {{ text-align: right; margin-top: 20px; }}
      .totals-inner {{ display: inline-block; text-align: left; }}
      .totals-row {{ display: flex; justify-content: space-between; margin-bottom: 8px; }}
      .totals-row span {{ color: #6b7280; margin-right: 40px; }}
      .totals-row.grand {{ padding-top: 12px; border-top: 2px solid #e5e7eb; font-size: 18px; }}
      .totals-row.grand span {{ color: #1f2937; font-weight: 600; }}
      .totals-row.grand strong {{ color: {color}; }}
      .footer {{
        margin-top: 60px;
        padding-top: 30px;
        border-top: 2px solid #e5e7eb;
        text-align: center;
        color: #6b7280;
        font-size: 14px;
      }}
      .footer-strong {{ font-weight: 600; color: {color}; }}
      @media print {{
        body {{ background: white; padding: 0; }}
        .document-container {{ box-shadow: none; padding: 40px; }}
      }}"#,
            color = self.color,
            dark = self.color_dark,
        )
    }

    /// Шапка с названием компании и подзаголовком.
    pub fn header_block(&self) -> String {
        format!(
            r#"
      <div class="header">
        <div class="logo">{}</div>
        <div class="tagline">{}</div>
      </div>"#,
            escape(&self.name),
            escape(&self.tagline)
        )
    }

    /// Имя и почта заказчика.
    pub fn customer_block(&self, customer: &Customer) -> String {
        format!(
            "<strong>{}</strong><br>\n          {}",
            escape(customer.name.as_str()),
            escape(&customer.email)
        )
    }

    pub fn footer_block(&self, contact_email: &str, message: &str) -> String {
        format!(
            r#"
      <div class="footer">
        <p style="margin-bottom: 10px;"><span class="footer-strong">{}</span></p>
        <p>This is an official document from {}.</p>
        <p style="margin-top: 10px; font-size: 12px;">If you have any questions, please contact us at {}</p>
      </div>"#,
            escape(message),
            escape(&self.name),
            escape(contact_email)
        )
    }

    /// Сумма в виде `$2,500` или `$1,234.5`.
    pub fn amount(&self, amount: Amount) -> String {
        format!(
            "{}{}",
            escape(&self.currency_symbol),
            super::format_amount(amount)
        )
    }

    /// Дата в формате `date_format`.
    /// Если формат не применим к дате, выводится ISO 8601.
    pub fn date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            warn!(
                "Формат даты {:?} не подходит, выводим {} в ISO 8601",
                self.date_format, date
            );
            out = date.to_string();
        }

        escape(&out)
    }

    /// Полный HTML документ.
    pub(super) fn shell(&self, title: &str, extra_styles: &str, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>{base}
{extra}
  </style>
</head>
<body>
  <div class="document-container">{header}
{body}
  </div>
</body>
</html>
"#,
            title = escape(title),
            base = self.style_sheet(),
            extra = extra_styles,
            header = self.header_block(),
            body = body,
        )
    }

    /// Заголовок документа с номером.
    pub(super) fn title_block(&self, title: &str, number: &str) -> String {
        format!(
            r#"
      <div class="document-title">{}</div>
      <div class="document-number">#{}</div>"#,
            escape(title),
            escape(number)
        )
    }

    /// Две колонки: заказчик слева, реквизиты документа справа.
    /// `details` это пары (подпись, уже экранированное значение).
    pub(super) fn info_section(
        &self,
        customer_label: &str,
        customer: &Customer,
        details_label: &str,
        details: &[(&str, String)],
    ) -> String {
        let details = details
            .iter()
            .map(|(label, value)| format!("<strong>{}:</strong> {}", escape(label), value))
            .collect::<Vec<_>>()
            .join("<br>\n          ");

        format!(
            r#"
      <div class="info-section">
        <div class="info-block">
          <div class="info-label">{}</div>
          <div class="info-value">
          {}
          </div>
        </div>
        <div class="info-block right">
          <div class="info-label">{}</div>
          <div class="info-value">
          {}
          </div>
        </div>
      </div>"#,
            escape(customer_label),
            self.customer_block(customer),
            escape(details_label),
            details
        )
    }

    pub(super) fn amount_section(&self, label: &str, amount: Amount) -> String {
        format!(
            r#"
      <div class="amount-section">
        <div class="amount-label">{}</div>
        <div class="amount-value">{}</div>
      </div>"#,
            escape(label),
            self.amount(amount)
        )
    }

    /// Таблица позиций.
    /// Без детализации выводится одна строка с количеством позиций и общей суммой.
    pub(super) fn items_table(
        &self,
        summary_description: &str,
        item_count: u32,
        amount: Amount,
        line_items: &[LineItem],
    ) -> String {
        let rows = if line_items.is_empty() {
            self.item_row(summary_description, item_count, amount)
        } else {
            line_items
                .iter()
                .map(|i| self.item_row(&i.description, i.quantity, i.amount))
                .collect::<String>()
        };

        format!(
            r#"
      <table class="details-table">
        <thead>
          <tr>
            <th>Description</th>
            <th class="center">Quantity</th>
            <th class="right">Amount</th>
          </tr>
        </thead>
        <tbody>{}
        </tbody>
      </table>"#,
            rows
        )
    }

    fn item_row(&self, description: &str, quantity: u32, amount: Amount) -> String {
        format!(
            r#"
          <tr>
            <td>{}</td>
            <td class="center">{}</td>
            <td class="right">{}</td>
          </tr>"#,
            escape(description),
            quantity,
            self.amount(amount)
        )
    }

    /// Итоги и бейдж статуса.
    pub(super) fn totals_block(&self, amount: Amount, badge_class: &str, badge_text: &str) -> String {
        let amount = self.amount(amount);
        format!(
            r#"
      <div class="totals">
        <div class="totals-inner">
          <div class="totals-row"><span>Subtotal:</span><strong>{amount}</strong></div>
          <div class="totals-row grand"><span>Total:</span><strong>{amount}</strong></div>
          <div style="margin-top: 12px;">
            <span class="status-badge {badge_class}">{badge_text}</span>
          </div>
        </div>
      </div>"#,
            amount = amount,
            badge_class = badge_class,
            badge_text = escape(badge_text),
        )
    }
}
