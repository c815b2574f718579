//! Formatter registry for discovering and constructing formats.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use mpidbc_models::SessionInfo;

use crate::error::{FormatError, Result};
use crate::text::TextFormatter;
use crate::traits::{Formatter, FormatterCtor, FormatterInfo};
use crate::vscode::VsCodeFormatter;

/// One registered format: its description plus a constructor.
#[derive(Debug, Clone, Copy)]
pub struct FormatEntry {
    info: FormatterInfo,
    ctor: FormatterCtor,
}

impl FormatEntry {
    /// Returns information about this format.
    pub fn info(&self) -> &FormatterInfo {
        &self.info
    }

    /// Returns the constructor for this format.
    pub fn constructor(&self) -> FormatterCtor {
        self.ctor
    }

    /// Constructs a formatter for the given session.
    pub fn construct(&self, session: SessionInfo) -> Box<dyn Formatter> {
        (self.ctor)(session)
    }
}

/// Registry for configuration formatters.
///
/// The registry maps a unique format name to its constructor and
/// description. It is populated once at startup and read-only thereafter.
///
/// # Example
///
/// ```
/// use mpidbc_formats::FormatterRegistry;
///
/// let registry = FormatterRegistry::with_builtins().unwrap();
///
/// // List available formats
/// for info in registry.list() {
///     println!("Available: {}", info.name);
/// }
///
/// // Get a specific format
/// if let Some(entry) = registry.get("txt") {
///     println!("Using: {}", entry.info().description);
/// }
/// ```
pub struct FormatterRegistry {
    formats: HashMap<String, FormatEntry>,
}

impl FormatterRegistry {
    /// Creates a registry with all built-in formats.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::empty();
        registry.register(TextFormatter::INFO, TextFormatter::construct)?;
        registry.register(VsCodeFormatter::INFO, VsCodeFormatter::construct)?;
        Ok(registry)
    }

    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            formats: HashMap::new(),
        }
    }

    /// Registers a format.
    ///
    /// Format names are globally unique; registering a second format under
    /// an existing name is a configuration error.
    pub fn register(&mut self, info: FormatterInfo, ctor: FormatterCtor) -> Result<()> {
        match self.formats.entry(info.name.to_string()) {
            Entry::Occupied(_) => Err(FormatError::DuplicateFormat(info.name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(FormatEntry { info, ctor });
                Ok(())
            }
        }
    }

    /// Gets a format by name.
    pub fn get(&self, name: &str) -> Option<&FormatEntry> {
        self.formats.get(name)
    }

    /// Resolves a format name, reporting the available names on failure.
    pub fn resolve(&self, name: &str) -> Result<&FormatEntry> {
        self.formats
            .get(name)
            .ok_or_else(|| FormatError::UnknownFormat {
                name: name.to_string(),
                available: self
                    .list()
                    .iter()
                    .map(|info| info.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Lists all registered formats, sorted by name.
    pub fn list(&self) -> Vec<&FormatterInfo> {
        let mut infos: Vec<&FormatterInfo> = self.formats.values().map(FormatEntry::info).collect();
        infos.sort_by_key(|info| info.name);
        infos
    }

    /// Returns the number of registered formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Returns true if no formats are registered.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
