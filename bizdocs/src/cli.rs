use chrono::{Days, Local, NaiveDate};
use enum_iterator::all;
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, DateSelect, Select, Text};

use crate::model::{
    Amount, Customer, CustomerName, DocumentNumber, QuotationRecord, QuotationStatus,
    ReceiptRecord, ReceiptStatus,
};

/// Способы оплаты, предлагаемые при создании чека.
const PAYMENT_METHODS: [&str; 4] = ["Credit Card", "Bank Transfer", "Cash", "PayPal"];

/// Через сколько дней по-умолчанию истекает коммерческое предложение.
const DEFAULT_VALIDITY_DAYS: u64 = 30;

/// Запрашивает у пользователя все поля чека.
pub fn ask_receipt() -> anyhow::Result<ReceiptRecord> {
    let receipt_number = ask_parsed("Номер чека", DocumentNumber::new)?;
    let customer = ask_customer()?;
    let amount = ask_parsed("Сумма", |s: &str| s.parse::<Amount>())?;
    let date = ask_date("Дата оплаты", today())?;
    let payment_method = Select::new("Способ оплаты", PAYMENT_METHODS.to_vec())
        .prompt()?
        .to_owned();
    let status = Select::new("Статус", all::<ReceiptStatus>().collect()).prompt()?;
    let item_count = ask_item_count()?;

    Ok(ReceiptRecord {
        receipt_number,
        customer,
        amount,
        date,
        payment_method,
        status,
        item_count,
        line_items: Vec::new(),
    })
}

/// Запрашивает у пользователя все поля коммерческого предложения.
pub fn ask_quotation() -> anyhow::Result<QuotationRecord> {
    let quotation_number = ask_parsed("Номер предложения", DocumentNumber::new)?;
    let customer = ask_customer()?;
    let amount = ask_parsed("Сумма", |s: &str| s.parse::<Amount>())?;
    let created_date = ask_date("Дата выставления", today())?;
    let valid_until = ask_date("Действует до", default_valid_until(created_date))?;
    let status = Select::new("Статус", all::<QuotationStatus>().collect()).prompt()?;
    let item_count = ask_item_count()?;

    Ok(QuotationRecord {
        quotation_number,
        customer,
        amount,
        created_date,
        valid_until,
        status,
        item_count,
        line_items: Vec::new(),
    })
}

fn ask_customer() -> anyhow::Result<Customer> {
    let name = ask_parsed("Заказчик", CustomerName::new)?;
    let email = Text::new("Email заказчика")
        .with_validator(validator(required))
        .prompt()?;

    Ok(Customer { name, email })
}

fn ask_item_count() -> anyhow::Result<u32> {
    let count = CustomType::<u32>::new("Количество позиций")
        .with_default(1)
        .with_error_message("Введите целое неотрицательное число")
        .prompt()?;

    Ok(count)
}

fn ask_date(title: &str, default: NaiveDate) -> anyhow::Result<NaiveDate> {
    let date = DateSelect::new(title).with_default(default).prompt()?;

    Ok(date)
}

/// Запрашивает строку и сразу превращает её в доменный тип.
/// Некорректный ввод отклоняется ещё в момент ввода.
fn ask_parsed<T, F>(title: &str, parse: F) -> anyhow::Result<T>
where
    T: 'static,
    F: Fn(&str) -> anyhow::Result<T> + Clone + 'static,
{
    let value = Text::new(title)
        .with_validator(validator(parse.clone()))
        .prompt()?;

    parse(&value)
}

fn required(value: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow::anyhow!("required"));
    }

    Ok(())
}

/// Превращает функцию разбора в валидатор для inquire.
fn validator<T, F>(parse: F) -> impl Fn(&str) -> Result<Validation, CustomUserError> + Clone
where
    F: Fn(&str) -> anyhow::Result<T> + Clone,
{
    move |s: &str| {
        Ok(match parse(s) {
            Ok(_) => Validation::Valid,
            Err(e) => Validation::Invalid(e.to_string().into()),
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_valid_until(created_date: NaiveDate) -> NaiveDate {
    created_date
        .checked_add_days(Days::new(DEFAULT_VALIDITY_DAYS))
        .unwrap_or(created_date)
}
