//! Registry for readers and writers.

use crate::ir::Language;
use crate::traits::{Reader, Writer};
use std::sync::{OnceLock, RwLock};

/// Global reader registry.
static READERS: RwLock<Vec<&'static dyn Reader>> = RwLock::new(Vec::new());
static READERS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Global writer registry.
static WRITERS: RwLock<Vec<&'static dyn Writer>> = RwLock::new(Vec::new());
static WRITERS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom reader.
pub fn register_reader(reader: &'static dyn Reader) {
    READERS.write().unwrap().push(reader);
}

/// Register a custom writer.
pub fn register_writer(writer: &'static dyn Writer) {
    WRITERS.write().unwrap().push(writer);
}

fn init_readers() {
    READERS_INITIALIZED.get_or_init(|| {
        #[cfg(feature = "read-csharp")]
        {
            register_reader(&crate::input::csharp::CSHARP_READER);
        }
    });
}

fn init_writers() {
    WRITERS_INITIALIZED.get_or_init(|| {
        #[cfg(feature = "write-powershell")]
        {
            register_writer(&crate::output::powershell::POWERSHELL_WRITER);
        }
        #[cfg(feature = "write-powershell5")]
        {
            register_writer(&crate::output::powershell5::POWERSHELL5_WRITER);
        }
    });
}

/// Get a reader by language name.
pub fn reader_for_language(lang: &str) -> Option<&'static dyn Reader> {
    init_readers();
    READERS
        .read()
        .unwrap()
        .iter()
        .find(|r| r.language() == lang)
        .copied()
}

/// Get a reader by file extension.
pub fn reader_for_extension(ext: &str) -> Option<&'static dyn Reader> {
    init_readers();
    READERS
        .read()
        .unwrap()
        .iter()
        .find(|r| r.extensions().contains(&ext))
        .copied()
}

/// Get a writer by its language tag.
pub fn writer_for_language(lang: Language) -> Option<&'static dyn Writer> {
    init_writers();
    WRITERS
        .read()
        .unwrap()
        .iter()
        .find(|w| w.language() == lang)
        .copied()
}

/// Get all registered readers.
pub fn readers() -> Vec<&'static dyn Reader> {
    init_readers();
    READERS.read().unwrap().clone()
}

/// Get all registered writers.
pub fn writers() -> Vec<&'static dyn Writer> {
    init_writers();
    WRITERS.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "read-csharp")]
    fn reader_lookup() {
        let reader = reader_for_language("csharp").expect("csharp reader");
        assert_eq!(reader.language(), "csharp");
        assert!(reader.extensions().contains(&"cs"));

        let reader = reader_for_extension("cs").expect("cs extension");
        assert_eq!(reader.language(), "csharp");
    }

    #[test]
    #[cfg(feature = "write-powershell")]
    fn writer_lookup() {
        let writer = writer_for_language(Language::PowerShell).expect("function writer");
        assert_eq!(writer.language(), Language::PowerShell);
        assert_eq!(writer.extension(), "ps1");
    }

    #[test]
    #[cfg(all(feature = "read-csharp", feature = "write-powershell"))]
    fn roundtrip_via_registry() {
        let reader = reader_for_language("csharp").unwrap();
        let writer = writer_for_language(Language::PowerShell).unwrap();

        let ir = reader.read("var x = 1;").unwrap();
        let ps = writer.write(&ir);

        assert!(ps.contains("$x = 1"));
    }

    #[test]
    #[cfg(feature = "write-powershell5")]
    fn type_writer_lookup() {
        let writer = writer_for_language(Language::PowerShell5).expect("type writer");
        assert_eq!(writer.language(), Language::PowerShell5);
    }
}
