//! Document types, field alias tables, and template loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{fs, io};

use parking_lot::RwLock;
use thiserror::Error;

/// Mapping from template placeholder key (dotted) to external data key (flat).
///
/// These tables mirror the frontend form contract; an entry that drifts out
/// of sync silently yields unfilled placeholders, so they change only in
/// lock-step with the frontend.
pub type AliasTable = &'static [(&'static str, &'static str)];

const NDA_ALIASES: AliasTable = &[
    ("effective.date", "EFFECTIVE_DATE"),
    ("effective.day", "EFFECTIVE_DAY"),
    ("effective.month", "EFFECTIVE_MONTH"),
    ("effective.year", "EFFECTIVE_YEAR"),
    ("party.1.name", "PARTY_1_NAME"),
    ("party.1.address", "PARTY_1_ADDRESS"),
    ("party.1.short.name", "PARTY_1_SHORT_NAME"),
    ("party.1.signatory.name", "PARTY_1_SIGNATORY_NAME"),
    ("party.1.signatory.designation", "PARTY_1_SIGNATORY_DESIGNATION"),
    ("party.1.sign.place", "PARTY_1_SIGN_PLACE"),
    ("party.1.signature", "PARTY_1_SIGNATURE"),
    ("party.2.name", "PARTY_2_NAME"),
    ("party.2.address", "PARTY_2_ADDRESS"),
    ("party.2.signatory.name", "PARTY_2_SIGNATORY_NAME"),
    ("party.2.signatory.designation", "PARTY_2_SIGNATORY_DESIGNATION"),
    ("party.2.sign.place", "PARTY_2_SIGN_PLACE"),
    ("party.2.signature", "PARTY_2_SIGNATURE"),
    ("proposed.transaction", "PROPOSED_TRANSACTION"),
];

const FOUNDERS_ALIASES: AliasTable = &[
    ("company.name", "COMPANY_NAME"),
    ("company.address", "COMPANY_ADDRESS"),
    ("authorized.signatory.name", "COMPANY_SIGNATORY_NAME"),
    ("authorized.signatory.designation", "COMPANY_SIGNATORY_DESIGNATION"),
    ("founder.name", "FOUNDER_NAME"),
    ("founder.address", "FOUNDER_ADDRESS"),
    ("founder.designation", "FOUNDER_DESIGNATION"),
    ("founder.salary", "FOUNDER_SALARY"),
    ("founder.salary.words", "FOUNDER_SALARY_WORDS"),
    ("noncompete.period", "NONCOMPETE_PERIOD"),
    ("notice.period", "NOTICE_PERIOD"),
    ("severance.amount", "SEVERANCE_AMOUNT"),
    ("effective.date", "EFFECTIVE_DATE"),
    ("jurisdiction.city", "JURISDICTION_CITY"),
];

/// Enumerated set of agreement types the server can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Nda,
    Founders,
}

impl DocumentType {
    /// Resolve a requested key. Unknown keys fall back to the NDA template,
    /// a permissive default rather than an error.
    pub fn from_key(key: &str) -> Self {
        match key {
            "founders" => DocumentType::Founders,
            _ => DocumentType::Nda,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            DocumentType::Nda => "nda",
            DocumentType::Founders => "founders",
        }
    }

    pub fn template_file(&self) -> &'static str {
        match self {
            DocumentType::Nda => "nda-agreement-template.html",
            DocumentType::Founders => "founders-agreement-template.html",
        }
    }

    pub fn aliases(&self) -> AliasTable {
        match self {
            DocumentType::Nda => NDA_ALIASES,
            DocumentType::Founders => FOUNDERS_ALIASES,
        }
    }
}

/// Errors that can occur while loading a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template file '{0}' not found")]
    NotFound(&'static str),
    #[error("failed to read template: {0}")]
    Io(#[source] io::Error),
}

/// Get the bundled template directory path.
fn default_template_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Read-only store of agreement templates.
///
/// Templates are loaded from disk on first use and cached for the process
/// lifetime; the backing files are static so the cache never invalidates.
#[derive(Clone)]
pub struct TemplateStore {
    root: PathBuf,
    cache: Arc<RwLock<HashMap<DocumentType, String>>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::with_root(default_template_dir().to_path_buf())
    }

    /// Build a store over an arbitrary directory. Used by tests to point at
    /// fixture templates.
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            root,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load the raw template text for a document type.
    pub fn load(&self, doc_type: DocumentType) -> Result<String, TemplateError> {
        if let Some(text) = self.cache.read().get(&doc_type) {
            return Ok(text.clone());
        }

        let path = self.root.join(doc_type.template_file());
        let text = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                TemplateError::NotFound(doc_type.template_file())
            } else {
                TemplateError::Io(e)
            }
        })?;

        self.cache.write().insert(doc_type, text.clone());
        Ok(text)
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_known_types() {
        assert_eq!(DocumentType::from_key("nda"), DocumentType::Nda);
        assert_eq!(DocumentType::from_key("founders"), DocumentType::Founders);
    }

    #[test]
    fn test_from_key_falls_back_to_nda() {
        assert_eq!(DocumentType::from_key("lease"), DocumentType::Nda);
        assert_eq!(DocumentType::from_key(""), DocumentType::Nda);
        assert_eq!(DocumentType::from_key("FOUNDERS"), DocumentType::Nda);
    }

    #[test]
    fn test_alias_tables_are_disjoint_per_entry() {
        for table in [DocumentType::Nda.aliases(), DocumentType::Founders.aliases()] {
            let mut keys: Vec<_> = table.iter().map(|(placeholder, _)| placeholder).collect();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), table.len());
        }
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let store = TemplateStore::with_root(PathBuf::from("/nonexistent-template-dir"));
        let err = store.load(DocumentType::Nda).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }

    #[test]
    fn test_load_caches_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DocumentType::Nda.template_file());
        fs::write(&path, "<p>{{ party.1.name }}</p>").unwrap();

        let store = TemplateStore::with_root(dir.path().to_path_buf());
        let first = store.load(DocumentType::Nda).unwrap();

        // Remove the backing file; the cached copy must still be served.
        fs::remove_file(&path).unwrap();
        let second = store.load(DocumentType::Nda).unwrap();
        assert_eq!(first, second);
    }
}
