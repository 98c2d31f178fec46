use std::{
    cell::RefCell,
    collections::HashSet,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

/// Получатель готового документа.
/// Вся работа с окружением (браузер, файловая система) спрятана за ним,
/// поэтому сами шаблоны остаются чистыми функциями.
pub trait DocumentSink {
    /// Принимает готовый HTML документ.
    fn consume(&self, html: &str, filename: &str) -> SinkResult<SinkOutcome>;
}

/// Что получилось в итоге.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// Документ открыт в браузере для печати.
    Opened(PathBuf),

    /// Документ записан в файл.
    Written(PathBuf),
}

impl SinkOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Opened(p) | Self::Written(p) => p,
        }
    }
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("browser window for {path:?} could not be opened")]
    WindowBlocked {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("create temporary document")]
    TempFile(#[from] io::Error),

    #[error("write document to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("document {path:?} was already written by this run")]
    Collision { path: PathBuf },
}

/// Открывает путь в браузере.
pub type Opener = fn(&str) -> io::Result<()>;

/// Открывает документ в системном браузере и вызывает диалог печати.
#[derive(Clone)]
pub struct PrintSink {
    /// Пауза после загрузки страницы перед вызовом печати.
    delay_ms: u64,

    opener: Opener,
}

impl PrintSink {
    pub fn new(delay_ms: u64) -> Self {
        Self::with_opener(delay_ms, webbrowser::open)
    }

    pub fn with_opener(delay_ms: u64, opener: Opener) -> Self {
        Self { delay_ms, opener }
    }
}

impl DocumentSink for PrintSink {
    fn consume(&self, html: &str, filename: &str) -> SinkResult<SinkOutcome> {
        let html = inject_print_trigger(html, self.delay_ms);

        let stem = sanitize_filename::sanitize(filename.trim_end_matches(".html"));
        let mut file = tempfile::Builder::new()
            .prefix(&format!("{}-", stem))
            .suffix(".html")
            .tempfile()?;

        file.write_all(html.as_bytes())?;
        file.flush()?;

        let (_, path) = file.keep().map_err(|e| e.error)?;

        // Временный файл не удаляется, браузер читает его уже после выхода.
        info!("Открываем {:?} в браузере", path);

        (self.opener)(&path.to_string_lossy()).map_err(|source| SinkError::WindowBlocked {
            path: path.clone(),
            source,
        })?;

        info!("Документ {} отправлен на печать", filename);

        Ok(SinkOutcome::Opened(path))
    }
}

/// Добавляет в документ скрипт, вызывающий печать после загрузки страницы.
fn inject_print_trigger(html: &str, delay_ms: u64) -> String {
    let script = format!(
        "<script>\n  window.addEventListener('load', function () {{\n    setTimeout(function () {{ window.print(); }}, {});\n  }});\n</script>\n",
        delay_ms
    );

    match html.rfind("</body>") {
        Some(idx) => {
            let mut out = String::with_capacity(html.len() + script.len());
            out.push_str(&html[..idx]);
            out.push_str(&script);
            out.push_str(&html[idx..]);
            out
        }
        None => format!("{}{}", html, script),
    }
}

/// Сохраняет документ в каталог.
/// За один запуск в каждый файл пишется не больше одного документа.
#[derive(Debug, Clone)]
pub struct DownloadSink {
    output_dir: PathBuf,
    written: RefCell<HashSet<PathBuf>>,
}

impl DownloadSink {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            written: RefCell::new(HashSet::new()),
        }
    }
}

impl DocumentSink for DownloadSink {
    fn consume(&self, html: &str, filename: &str) -> SinkResult<SinkOutcome> {
        let path = self.output_dir.join(sanitize_filename::sanitize(filename));

        // Разные номера могут дать одно и то же имя после очистки.
        if !self.written.borrow_mut().insert(path.clone()) {
            return Err(SinkError::Collision { path });
        }

        let write = |path: &Path| -> io::Result<()> {
            fs::create_dir_all(&self.output_dir)?;
            fs::write(path, html)
        };

        write(&path).map_err(|source| SinkError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Документ сохранён в {:?}", path);

        Ok(SinkOutcome::Written(path))
    }
}
