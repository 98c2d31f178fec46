use crate::model::{QuotationRecord, ReceiptRecord};

use super::{Branding, QuotationTemplate, ReceiptTemplate};

/// Создаёт шаблоны нужного типа с общим фирменным стилем.
#[derive(Debug, Clone, Default)]
pub struct TemplateFactory {
    branding: Branding,
}

impl TemplateFactory {
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn create_receipt_template<'a>(&'a self, record: &'a ReceiptRecord) -> ReceiptTemplate<'a> {
        ReceiptTemplate::new(&self.branding, record)
    }

    pub fn create_quotation_template<'a>(
        &'a self,
        record: &'a QuotationRecord,
    ) -> QuotationTemplate<'a> {
        QuotationTemplate::new(&self.branding, record)
    }
}
