//! Document repository contracts and file/in-memory implementations.
//!
//! # Responsibility
//! - Persist whole documents (overwrite, no history).
//! - Validate package and user ids before they become file names.
//!
//! # Invariants
//! - `<package>.json` is the canonical artifact, `<package>.xml` the derived
//!   one; both live directly in the user's folder.
//! - A save that fails during serialization writes nothing.
//! - Each artifact is replaced through a temp file and rename; if the
//!   second rename fails the previous canonical artifact is restored and no
//!   temp or backup files remain.

use crate::codec::json::{from_canonical, to_canonical};
use crate::codec::xml::to_derived;
use crate::codec::CodecError;
use crate::config::EngineConfig;
use crate::model::document::Document;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

const CANONICAL_EXTENSION: &str = "json";
const DERIVED_EXTENSION: &str = "xml";

static PACKAGE_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,127}$").expect("package id regex must compile")
});
static USER_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._@-]{0,127}$").expect("user id regex must compile")
});

/// Result type used by repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from document persistence.
#[derive(Debug)]
pub enum RepoError {
    /// No canonical artifact exists for this package id.
    NotFound(String),
    /// Package id would not make a safe file name.
    InvalidPackageId(String),
    /// User id would not make a safe folder name.
    InvalidUserId(String),
    /// Filesystem failure.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization or parse failure.
    Codec(CodecError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(package_id) => write!(f, "document not found: {package_id}"),
            Self::InvalidPackageId(package_id) => {
                write!(f, "invalid package id `{package_id}`")
            }
            Self::InvalidUserId(user) => write!(f, "invalid user id `{user}`"),
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::Codec(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Codec(err) => Some(err),
            Self::NotFound(_) | Self::InvalidPackageId(_) | Self::InvalidUserId(_) => None,
        }
    }
}

impl From<CodecError> for RepoError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// Checks that a package id is usable as a file stem.
pub fn validate_package_id(package_id: &str) -> RepoResult<()> {
    if PACKAGE_ID_PATTERN.is_match(package_id) && !package_id.contains("..") {
        Ok(())
    } else {
        Err(RepoError::InvalidPackageId(package_id.to_string()))
    }
}

/// Both serialized artifacts of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub canonical: String,
    pub derived: String,
}

impl Artifacts {
    /// Serializes both forms; nothing is returned unless both succeed.
    pub fn render(doc: &Document) -> RepoResult<Self> {
        Ok(Self {
            canonical: to_canonical(doc)?,
            derived: to_derived(doc)?,
        })
    }
}

/// Repository interface for whole-document persistence.
pub trait DocumentRepository {
    /// Loads a document from its canonical artifact.
    fn load(&self, package_id: &str) -> RepoResult<Document>;
    /// Writes both artifacts, overwriting any previous version.
    fn save(&self, package_id: &str, doc: &Document) -> RepoResult<()>;
    /// Returns the derived export last written for a package.
    fn load_derived(&self, package_id: &str) -> RepoResult<String>;
    /// Whether a canonical artifact exists.
    fn exists(&self, package_id: &str) -> RepoResult<bool>;
    /// Removes both artifacts.
    fn delete(&self, package_id: &str) -> RepoResult<()>;
    /// Package ids stored for this user, sorted.
    fn list(&self) -> RepoResult<Vec<String>>;
}

impl<R: DocumentRepository + ?Sized> DocumentRepository for &R {
    fn load(&self, package_id: &str) -> RepoResult<Document> {
        (**self).load(package_id)
    }

    fn save(&self, package_id: &str, doc: &Document) -> RepoResult<()> {
        (**self).save(package_id, doc)
    }

    fn load_derived(&self, package_id: &str) -> RepoResult<String> {
        (**self).load_derived(package_id)
    }

    fn exists(&self, package_id: &str) -> RepoResult<bool> {
        (**self).exists(package_id)
    }

    fn delete(&self, package_id: &str) -> RepoResult<()> {
        (**self).delete(package_id)
    }

    fn list(&self) -> RepoResult<Vec<String>> {
        (**self).list()
    }
}

/// Per-user folder of `<package>.json` / `<package>.xml` pairs.
#[derive(Debug, Clone)]
pub struct FileDocumentRepository {
    folder: PathBuf,
}

impl FileDocumentRepository {
    /// Opens (and creates if needed) the folder of `user`.
    pub fn open(config: &EngineConfig, user: &str) -> RepoResult<Self> {
        if !USER_ID_PATTERN.is_match(user) || user.contains("..") {
            return Err(RepoError::InvalidUserId(user.to_string()));
        }
        let folder = config.user_folder(user);
        std::fs::create_dir_all(&folder).map_err(|source| RepoError::Io {
            path: folder.clone(),
            source,
        })?;
        Ok(Self { folder })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of one artifact of a package.
    pub fn artifact_path(&self, package_id: &str, extension: &str) -> PathBuf {
        self.folder.join(format!("{package_id}.{extension}"))
    }

    fn write_replace(&self, path: &Path, contents: &str) -> RepoResult<PathBuf> {
        let temp = side_path(path, "tmp");
        std::fs::write(&temp, contents).map_err(|source| RepoError::Io {
            path: temp.clone(),
            source,
        })?;
        Ok(temp)
    }

    fn commit(temp: &Path, path: &Path) -> RepoResult<()> {
        std::fs::rename(temp, path).map_err(|source| RepoError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Renames both temp files into place. When the derived rename fails the
    /// previous canonical artifact is put back, so the pair never disagrees.
    fn commit_pair(
        canonical: (&Path, &Path),
        derived: (&Path, &Path),
    ) -> RepoResult<()> {
        let (canonical_temp, canonical_path) = canonical;
        let (derived_temp, derived_path) = derived;
        let backup = side_path(canonical_path, "bak");
        let had_previous = canonical_path.is_file();
        if had_previous {
            std::fs::copy(canonical_path, &backup).map_err(|source| RepoError::Io {
                path: backup.clone(),
                source,
            })?;
        }

        if let Err(err) = Self::commit(canonical_temp, canonical_path) {
            discard_files(&[&backup]);
            return Err(err);
        }
        if let Err(err) = Self::commit(derived_temp, derived_path) {
            let restored = if had_previous {
                std::fs::rename(&backup, canonical_path)
            } else {
                std::fs::remove_file(canonical_path)
            };
            if let Err(restore_err) = restored {
                error!(
                    "event=document_save module=repo status=error error_code=rollback_failed path={} error={}",
                    canonical_path.display(),
                    restore_err
                );
            }
            discard_files(&[&backup]);
            return Err(err);
        }
        discard_files(&[&backup]);
        Ok(())
    }

    fn read(&self, package_id: &str, extension: &str) -> RepoResult<String> {
        validate_package_id(package_id)?;
        let path = self.artifact_path(package_id, extension);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(RepoError::NotFound(package_id.to_string()))
            }
            Err(source) => Err(RepoError::Io { path, source }),
        }
    }
}

impl DocumentRepository for FileDocumentRepository {
    fn load(&self, package_id: &str) -> RepoResult<Document> {
        let started_at = Instant::now();
        let raw = self.read(package_id, CANONICAL_EXTENSION)?;
        let doc = from_canonical(&raw)?;
        info!(
            "event=document_load module=repo status=ok package_id={} nodes={} duration_ms={}",
            package_id,
            doc.len(),
            started_at.elapsed().as_millis()
        );
        Ok(doc)
    }

    fn save(&self, package_id: &str, doc: &Document) -> RepoResult<()> {
        let started_at = Instant::now();
        validate_package_id(package_id)?;
        let artifacts = match Artifacts::render(doc) {
            Ok(artifacts) => artifacts,
            Err(err) => {
                error!(
                    "event=document_save module=repo status=error package_id={} error_code=serialize_failed error={}",
                    package_id, err
                );
                return Err(err);
            }
        };

        let canonical_path = self.artifact_path(package_id, CANONICAL_EXTENSION);
        let derived_path = self.artifact_path(package_id, DERIVED_EXTENSION);
        let canonical_temp = self.write_replace(&canonical_path, &artifacts.canonical)?;
        let derived_temp = match self.write_replace(&derived_path, &artifacts.derived) {
            Ok(temp) => temp,
            Err(err) => {
                discard_files(&[&canonical_temp]);
                error!(
                    "event=document_save module=repo status=error package_id={} error_code=write_failed error={}",
                    package_id, err
                );
                return Err(err);
            }
        };
        if let Err(err) = Self::commit_pair(
            (&canonical_temp, &canonical_path),
            (&derived_temp, &derived_path),
        ) {
            discard_files(&[&canonical_temp, &derived_temp]);
            error!(
                "event=document_save module=repo status=error package_id={} error_code=commit_failed error={}",
                package_id, err
            );
            return Err(err);
        }

        info!(
            "event=document_save module=repo status=ok package_id={} nodes={} duration_ms={}",
            package_id,
            doc.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn load_derived(&self, package_id: &str) -> RepoResult<String> {
        self.read(package_id, DERIVED_EXTENSION)
    }

    fn exists(&self, package_id: &str) -> RepoResult<bool> {
        validate_package_id(package_id)?;
        Ok(self.artifact_path(package_id, CANONICAL_EXTENSION).is_file())
    }

    fn delete(&self, package_id: &str) -> RepoResult<()> {
        validate_package_id(package_id)?;
        if !self.exists(package_id)? {
            return Err(RepoError::NotFound(package_id.to_string()));
        }
        for extension in [CANONICAL_EXTENSION, DERIVED_EXTENSION] {
            let path = self.artifact_path(package_id, extension);
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(RepoError::Io { path, source }),
            }
        }
        info!(
            "event=document_delete module=repo status=ok package_id={}",
            package_id
        );
        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.folder).map_err(|source| RepoError::Io {
            path: self.folder.clone(),
            source,
        })?;
        let mut packages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RepoError::Io {
                path: self.folder.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(CANONICAL_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if validate_package_id(stem).is_ok() {
                    packages.push(stem.to_string());
                }
            }
        }
        packages.sort();
        Ok(packages)
    }
}

/// Hidden sibling `.<file>.<suffix>` used for temp and backup copies.
fn side_path(path: &Path, suffix: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{file_name}.{suffix}"))
}

/// Best-effort removal of leftovers; missing files are fine.
fn discard_files(paths: &[&Path]) {
    for path in paths {
        let _ = std::fs::remove_file(path);
    }
}

/// In-process repository keeping serialized artifacts in memory.
///
/// Round-trips through the same codecs as the file repository.
#[derive(Debug, Default)]
pub struct MemoryDocumentRepository {
    artifacts: RefCell<BTreeMap<String, Artifacts>>,
}

impl MemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw artifacts last saved for a package.
    pub fn artifacts(&self, package_id: &str) -> Option<Artifacts> {
        self.artifacts.borrow().get(package_id).cloned()
    }
}

impl DocumentRepository for MemoryDocumentRepository {
    fn load(&self, package_id: &str) -> RepoResult<Document> {
        let artifacts = self.artifacts.borrow();
        let stored = artifacts
            .get(package_id)
            .ok_or_else(|| RepoError::NotFound(package_id.to_string()))?;
        Ok(from_canonical(&stored.canonical)?)
    }

    fn save(&self, package_id: &str, doc: &Document) -> RepoResult<()> {
        validate_package_id(package_id)?;
        let rendered = Artifacts::render(doc)?;
        self.artifacts
            .borrow_mut()
            .insert(package_id.to_string(), rendered);
        Ok(())
    }

    fn load_derived(&self, package_id: &str) -> RepoResult<String> {
        self.artifacts
            .borrow()
            .get(package_id)
            .map(|stored| stored.derived.clone())
            .ok_or_else(|| RepoError::NotFound(package_id.to_string()))
    }

    fn exists(&self, package_id: &str) -> RepoResult<bool> {
        Ok(self.artifacts.borrow().contains_key(package_id))
    }

    fn delete(&self, package_id: &str) -> RepoResult<()> {
        self.artifacts
            .borrow_mut()
            .remove(package_id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(package_id.to_string()))
    }

    fn list(&self) -> RepoResult<Vec<String>> {
        Ok(self.artifacts.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        validate_package_id, DocumentRepository, FileDocumentRepository,
        MemoryDocumentRepository, RepoError,
    };
    use crate::config::EngineConfig;
    use crate::model::document::Document;
    use crate::model::names;
    use tempfile::TempDir;

    fn hidden_leftovers(repo: &FileDocumentRepository) -> Vec<String> {
        std::fs::read_dir(repo.folder())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with('.'))
            .collect()
    }

    #[test]
    fn package_ids_must_be_plain_file_stems() {
        assert!(validate_package_id("edi.100.1").is_ok());
        assert!(validate_package_id("knb-lter-nwt.5.2").is_ok());
        assert!(validate_package_id("../etc/passwd").is_err());
        assert!(validate_package_id("a..b").is_err());
        assert!(validate_package_id("").is_err());
    }

    #[test]
    fn memory_repo_reports_missing_documents() {
        let repo = MemoryDocumentRepository::new();
        assert!(matches!(repo.load("edi.1.1"), Err(RepoError::NotFound(_))));

        let doc = Document::new(names::EML);
        repo.save("edi.1.1", &doc).unwrap();
        assert_eq!(repo.load("edi.1.1").unwrap().root(), doc.root());
        assert_eq!(repo.list().unwrap(), vec!["edi.1.1".to_string()]);
        repo.delete("edi.1.1").unwrap();
        assert!(!repo.exists("edi.1.1").unwrap());
    }

    #[test]
    fn failed_derived_commit_restores_previous_canonical() {
        let dir = TempDir::new().unwrap();
        let repo = FileDocumentRepository::open(&EngineConfig::with_data_root(dir.path()), "alice")
            .unwrap();
        let mut doc = Document::new(names::EML);
        repo.save("edi.5.1", &doc).unwrap();
        let canonical_path = repo.artifact_path("edi.5.1", "json");
        let previous = std::fs::read_to_string(&canonical_path).unwrap();

        let derived_path = repo.artifact_path("edi.5.1", "xml");
        std::fs::remove_file(&derived_path).unwrap();
        std::fs::create_dir(&derived_path).unwrap();
        let root = doc.root();
        doc.create_node(names::DATASET, Some(root)).unwrap();

        assert!(matches!(repo.save("edi.5.1", &doc), Err(RepoError::Io { .. })));
        assert_eq!(std::fs::read_to_string(&canonical_path).unwrap(), previous);
        assert!(hidden_leftovers(&repo).is_empty());
    }

    #[test]
    fn failed_first_save_leaves_no_canonical_behind() {
        let dir = TempDir::new().unwrap();
        let repo = FileDocumentRepository::open(&EngineConfig::with_data_root(dir.path()), "alice")
            .unwrap();
        std::fs::create_dir(repo.artifact_path("edi.6.1", "xml")).unwrap();

        let doc = Document::new(names::EML);
        assert!(repo.save("edi.6.1", &doc).is_err());
        assert!(!repo.exists("edi.6.1").unwrap());
        assert!(hidden_leftovers(&repo).is_empty());
    }
}
