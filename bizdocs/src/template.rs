mod base;
mod factory;
mod quotation;
mod receipt;

pub use base::Branding;
pub use factory::TemplateFactory;
pub use quotation::QuotationTemplate;
pub use receipt::ReceiptTemplate;

use crate::{
    model::{Amount, Document},
    sink::{DocumentSink, SinkOutcome, SinkResult},
};

/// Отрисовывает документ в HTML.
pub fn render_template(doc: &Document, factory: &TemplateFactory) -> String {
    match doc {
        Document::Receipt(r) => factory.create_receipt_template(r).generate_document(),
        Document::Quotation(q) => factory.create_quotation_template(q).generate_document(),
    }
}

/// Отправляет документ на печать.
pub fn print_document(
    doc: &Document,
    factory: &TemplateFactory,
    sink: &dyn DocumentSink,
) -> SinkResult<SinkOutcome> {
    match doc {
        Document::Receipt(r) => factory.create_receipt_template(r).print_receipt(sink),
        Document::Quotation(q) => factory.create_quotation_template(q).print_quotation(sink),
    }
}

/// Сохраняет документ в файл.
pub fn download_document(
    doc: &Document,
    factory: &TemplateFactory,
    sink: &dyn DocumentSink,
) -> SinkResult<SinkOutcome> {
    match doc {
        Document::Receipt(r) => factory.create_receipt_template(r).download_receipt(sink),
        Document::Quotation(q) => factory
            .create_quotation_template(q)
            .download_quotation(sink),
    }
}

/// Экранирует текст для вставки в HTML.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Форматирует сумму с разделителями тысяч.
/// Дробная часть выводится только если она есть, не более трёх знаков.
pub fn format_amount(amount: Amount) -> String {
    // -0.0 + 0.0 даёт 0.0, иначе выводится "-0".
    let fixed = format!("{:.3}", amount.value() + 0.0);
    let (int, frac) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac = frac.trim_end_matches('0');

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac)
    }
}
