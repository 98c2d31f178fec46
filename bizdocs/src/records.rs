use std::{fs, io, path::Path};

use log::debug;
use serde_json::Value;

use crate::model::Document;

/// Загружает документы из JSON файла.
/// Файл может содержать как один документ, так и массив документов.
pub fn load(path: &Path) -> LoadResult {
    let content = fs::read_to_string(path)?;

    parse(&content)
}

/// Разбирает документы из JSON строки.
pub fn parse(content: &str) -> LoadResult {
    let value: Value = serde_json::from_str(content)?;

    let docs = match value {
        Value::Array(_) => serde_json::from_value::<Vec<Document>>(value)?,
        _ => vec![serde_json::from_value::<Document>(value)?],
    };

    if docs.is_empty() {
        return Err(LoadError::Empty);
    }

    debug!("Прочитано документов: {}", docs.len());

    Ok(docs)
}

pub type LoadResult = std::result::Result<Vec<Document>, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("read record file")]
    ReadFile(#[from] io::Error),

    #[error("deserialize")]
    Deserialize(#[from] serde_json::Error),

    #[error("record file contains no documents")]
    Empty,
}

/// Сохраняет документ в JSON файл.
pub fn save(doc: &Document, path: &Path) -> SaveResult {
    let content = to_string(doc)?;

    fs::create_dir_all(path.parent().unwrap_or(Path::new("")))?;

    fs::write(path, content)?;

    Ok(())
}

/// Представляет документ в виде JSON.
pub fn to_string(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

pub type SaveResult = std::result::Result<(), SaveError>;

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("write record file")]
    WriteFile(#[from] io::Error),

    #[error("serialize")]
    Serialize(#[from] serde_json::Error),
}
