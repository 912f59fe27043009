//! Template providers: JSON files in a directory, or the compiled-in catalog.
//!
//! A template file is named `<size>.json` and looks like
//! `{"seats": [{"position": 8}, {"position": 4}, ...]}`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::domain::{BracketTemplate, Format, SeatDescriptor};
use crate::infrastructure::traits::{FileSystem, TemplateProvider};
use crate::infrastructure::{InfraError, InfraResult};

/// Parse template JSON into its seat list.
pub fn parse_template(content: &str, context: &str) -> InfraResult<Vec<SeatDescriptor>> {
    serde_json::from_str::<BracketTemplate>(content)
        .map(|template| template.seats)
        .map_err(|e| InfraError::parse(context, e))
}

/// Templates read from `<dir>/<size>.json`.
pub struct DirectoryTemplates {
    dir: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl DirectoryTemplates {
    pub fn new(dir: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            dir: dir.into(),
            fs,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn template_path(&self, size: usize) -> PathBuf {
        self.dir.join(format!("{size}.json"))
    }

    /// Sizes with a template file in the directory, ascending.
    ///
    /// Scans the real filesystem regardless of the injected `FileSystem`.
    pub fn available_sizes(&self) -> InfraResult<Vec<usize>> {
        let mut sizes = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                InfraError::io(
                    format!("scan {}", self.dir.display()),
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                )
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }
            if let Some(size) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<usize>().ok())
            {
                sizes.push(size);
            }
        }
        sizes.sort_unstable();
        Ok(sizes)
    }
}

impl TemplateProvider for DirectoryTemplates {
    #[instrument(level = "debug", skip(self), fields(dir = %self.dir.display()))]
    fn seats(&self, size: usize) -> InfraResult<Vec<SeatDescriptor>> {
        let path = self.template_path(size);
        if !self.fs.is_file(&path) {
            return Err(InfraError::TemplateNotFound { size, path });
        }

        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
        let seats = parse_template(&content, &path.display().to_string())?;
        debug!("seats: loaded {} seats from {}", seats.len(), path.display());
        Ok(seats)
    }
}

/// Compiled-in single- and double-elimination templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinTemplates {
    format: Format,
}

const SINGLE_ELIMINATION: &[(usize, &str)] = &[
    (4, include_str!("../../templates/single_elimination/4.json")),
    (8, include_str!("../../templates/single_elimination/8.json")),
];

const DOUBLE_ELIMINATION: &[(usize, &str)] = &[
    (4, include_str!("../../templates/double_elimination/4.json")),
    (8, include_str!("../../templates/double_elimination/8.json")),
];

impl BuiltinTemplates {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    fn catalog(&self) -> &'static [(usize, &'static str)] {
        match self.format {
            Format::SingleElimination => SINGLE_ELIMINATION,
            Format::DoubleElimination => DOUBLE_ELIMINATION,
        }
    }

    pub fn available_sizes(&self) -> Vec<usize> {
        self.catalog().iter().map(|(size, _)| *size).collect()
    }
}

impl TemplateProvider for BuiltinTemplates {
    #[instrument(level = "debug", skip(self), fields(format = %self.format))]
    fn seats(&self, size: usize) -> InfraResult<Vec<SeatDescriptor>> {
        let (_, content) = self
            .catalog()
            .iter()
            .find(|(s, _)| *s == size)
            .ok_or(InfraError::UnsupportedSize {
                format: self.format,
                size,
            })?;
        parse_template(content, &format!("{}/{}.json", self.format, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogs_parse() {
        for format in [Format::SingleElimination, Format::DoubleElimination] {
            let provider = BuiltinTemplates::new(format);
            for size in provider.available_sizes() {
                let seats = provider.seats(size).unwrap();
                assert!(!seats.is_empty(), "{format}/{size} is empty");
            }
        }
    }

    #[test]
    fn test_builtin_seat_counts() {
        let single = BuiltinTemplates::new(Format::SingleElimination);
        assert_eq!(single.seats(4).unwrap().len(), 7);
        assert_eq!(single.seats(8).unwrap().len(), 15);

        let double = BuiltinTemplates::new(Format::DoubleElimination);
        assert_eq!(double.seats(4).unwrap().len(), 13);
        assert_eq!(double.seats(8).unwrap().len(), 29);
    }

    #[test]
    fn test_builtin_unknown_size() {
        let err = BuiltinTemplates::new(Format::DoubleElimination)
            .seats(5)
            .unwrap_err();
        assert!(matches!(err, InfraError::UnsupportedSize { size: 5, .. }));
    }

    #[test]
    fn test_parse_template_rejects_missing_position() {
        let err = parse_template(r#"{"seats": [{"name": "x"}]}"#, "inline").unwrap_err();
        assert!(matches!(err, InfraError::Parse { .. }));
    }
}
