use std::{fmt::Write, path::PathBuf};

use anyhow::anyhow;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::template::Branding;
use resolve_path::PathResolveExt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Каталог, куда сохраняются документы.
    pub output_dir: PathBuf,

    /// Пауза в миллисекундах между загрузкой документа и вызовом печати.
    pub print_delay_ms: u64,

    /// Фирменный стиль документов.
    pub branding: Branding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            print_delay_ms: 250,
            branding: Branding::default(),
        }
    }
}

/// Загружает конфигурацию.
/// Если файла нет, он будет создан со значениями по-умолчанию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let mut cfg: Config = confy::load_path(path)?;

    normalize(&mut cfg)?;

    Ok(cfg)
}

pub fn normalize(cfg: &mut Config) -> anyhow::Result<()> {
    // Чтобы правильно обработать относительные пути.
    cfg.output_dir = cfg.output_dir.try_resolve()?.into_owned();

    validate_color("branding.color", &cfg.branding.color)?;
    validate_color("branding.color_dark", &cfg.branding.color_dark)?;
    validate_date_format(&cfg.branding.date_format)?;

    Ok(())
}

/// Цвета попадают в CSS как есть, поэтому разрешаем только hex.
fn validate_color(key: &str, value: &str) -> anyhow::Result<()> {
    let re = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")?;

    if !re.is_match(value) {
        return Err(anyhow!("{} should be a hex color, got {:?}", key, value));
    }

    Ok(())
}

/// Формат проверяется пробным форматированием даты.
/// Поля времени и часового пояса у даты отсутствуют, такой формат не подходит.
fn validate_date_format(value: &str) -> anyhow::Result<()> {
    let mut probe = String::new();
    if write!(probe, "{}", NaiveDate::MIN.format(value)).is_err() {
        return Err(anyhow!("branding.date_format {:?} is not a valid format", value));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! validate_color_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (expected_ok, input) = $value;
                assert_eq!(expected_ok, validate_color("color", input).is_ok());
            }
        )*
        }
    }

    validate_color_tests! {
        color_short: (true, "#fff"),
        color_long: (true, "#3b82f6"),
        color_alpha: (true, "#3b82f6cc"),
        color_named: (false, "red"),
        color_injection: (false, "#fff; } body { display: none"),
        color_empty: (false, ""),
    }

    macro_rules! validate_date_format_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (expected_ok, input) = $value;
                assert_eq!(expected_ok, validate_date_format(input).is_ok());
            }
        )*
        }
    }

    validate_date_format_tests! {
        date_format_iso: (true, "%Y-%m-%d"),
        date_format_dotted: (true, "%d.%m.%Y"),
        date_format_month_name: (true, "%B %e, %Y"),
        date_format_dangling_percent: (false, "%Y-%"),
        date_format_time: (false, "%H:%M"),
        date_format_date_and_time: (false, "%Y-%m-%d %H:%M"),
        date_format_zone: (false, "%Y-%m-%d %z"),
    }

    #[test]
    fn load_creates_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = load(path.clone()).unwrap();

        assert!(path.exists());
        assert_eq!(250, cfg.print_delay_ms);
        assert_eq!(Branding::default(), cfg.branding);
        assert!(cfg.output_dir.is_absolute());
    }

    #[test]
    fn load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "print_delay_ms = 500\n\n[branding]\nname = \"ACME\"\n",
        )
        .unwrap();

        let cfg = load(path).unwrap();

        assert_eq!(500, cfg.print_delay_ms);
        assert_eq!("ACME", cfg.branding.name);
        assert_eq!("#3b82f6", cfg.branding.color);
    }

    #[test]
    fn load_rejects_time_in_date_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[branding]\ndate_format = \"%Y-%m-%d %H:%M\"\n").unwrap();

        assert!(load(path).is_err());
    }

    #[test]
    fn load_rejects_bad_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[branding]\ncolor = \"red\"\n").unwrap();

        assert!(load(path).is_err());
    }
}
