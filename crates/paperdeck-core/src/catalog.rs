//! Loading and validation of the paper-metadata CSV.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{PaperdeckError, Result};
use crate::resolve::resolve_url;

/// Columns every source file must carry. `arxiv_url` is optional and
/// synthesized as all-absent when the column is missing.
pub const REQUIRED_COLUMNS: [&str; 4] = ["abstract", "paper_pdf", "supplemental_pdf", "title"];

/// One row of paper metadata. Immutable once loaded; the `*_url` fields
/// are derived by [`Catalog::with_resolved_links`] and never mutated
/// afterward.
#[derive(Debug, Clone)]
pub struct PaperRecord {
    /// Paper title (selection key for the detail view; not guaranteed unique).
    pub title: String,

    /// Abstract text.
    pub abstract_text: String,

    /// Raw paper PDF path or URL as it appears in the source file.
    pub paper_pdf: String,

    /// Raw supplemental PDF path or URL.
    pub supplemental_pdf: String,

    /// arXiv link, if the column exists and the cell is non-empty.
    /// Never run through the resolver; used only when it already looks
    /// like an absolute URL.
    pub arxiv_url: Option<String>,

    /// Resolved paper PDF link.
    pub paper_pdf_url: Option<String>,

    /// Resolved supplemental PDF link.
    pub supplemental_pdf_url: Option<String>,
}

impl PaperRecord {
    /// The arXiv link, but only if it is usable as-is.
    pub fn usable_arxiv_url(&self) -> Option<&str> {
        self.arxiv_url
            .as_deref()
            .filter(|u| u.starts_with("http"))
    }
}

/// The full set of records from one source, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub records: Vec<PaperRecord>,
}

impl Catalog {
    /// Load a catalog from a file path. Fails with `SourceNotFound` if the
    /// path does not exist, before attempting to parse.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PaperdeckError::SourceNotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a catalog from any byte stream of delimited tabular text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();

        let index_of = |name: &str| headers.iter().position(|h| h == name);

        // Validate the required column set up front so a bad schema is
        // reported as one error, not per-row parse failures.
        let mut missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| index_of(c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(PaperdeckError::MissingColumns(missing));
        }

        let title_idx = index_of("title").unwrap_or_default();
        let abstract_idx = index_of("abstract").unwrap_or_default();
        let paper_pdf_idx = index_of("paper_pdf").unwrap_or_default();
        let supplemental_idx = index_of("supplemental_pdf").unwrap_or_default();
        let arxiv_idx = index_of("arxiv_url");

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let field = |idx: usize| row.get(idx).unwrap_or_default().to_string();

            let arxiv_url = arxiv_idx
                .and_then(|idx| row.get(idx))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from);

            records.push(PaperRecord {
                title: field(title_idx),
                abstract_text: field(abstract_idx),
                paper_pdf: field(paper_pdf_idx),
                supplemental_pdf: field(supplemental_idx),
                arxiv_url,
                paper_pdf_url: None,
                supplemental_pdf_url: None,
            });
        }

        Ok(Self { records })
    }

    /// Produce a copy of this catalog with `paper_pdf_url` and
    /// `supplemental_pdf_url` resolved against `base`. The receiver is left
    /// untouched so cached catalogs stay pristine.
    pub fn with_resolved_links(&self, base: Option<&str>) -> Catalog {
        let records = self
            .records
            .iter()
            .map(|r| {
                let mut r = r.clone();
                r.paper_pdf_url = resolve_url(base, Some(&r.paper_pdf));
                r.supplemental_pdf_url = resolve_url(base, Some(&r.supplemental_pdf));
                r
            })
            .collect();
        Catalog { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Memoized loader: one parse per distinct source path. The cached value is
/// shared immutably; link resolution always works on a copy.
#[derive(Default)]
pub struct LoadCache {
    entries: HashMap<PathBuf, Arc<Catalog>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached catalog for `path`, if one exists.
    pub fn get(&self, path: &Path) -> Option<Arc<Catalog>> {
        self.entries.get(path).cloned()
    }

    /// Load `path`, reusing the parsed result for a path seen before.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Catalog>> {
        if let Some(cached) = self.entries.get(path) {
            return Ok(cached.clone());
        }
        let catalog = Arc::new(Catalog::from_path(path)?);
        self.entries.insert(path.to_path_buf(), catalog.clone());
        Ok(catalog)
    }

    /// Insert an already-parsed catalog (e.g. loaded off-thread).
    pub fn insert(&mut self, path: PathBuf, catalog: Arc<Catalog>) {
        self.entries.insert(path, catalog);
    }

    /// Drop the cached parse for `path` so the next load re-reads the file.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CSV: &str = "\
title,abstract,paper_pdf,supplemental_pdf,arxiv_url
Alpha,First abstract,papers/alpha.pdf,supp/alpha.pdf,https://arxiv.org/abs/1
Beta,Second abstract,https://host.org/beta.pdf,,
";

    #[test]
    fn parses_all_columns() {
        let catalog = Catalog::from_reader(FULL_CSV.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let alpha = &catalog.records[0];
        assert_eq!(alpha.title, "Alpha");
        assert_eq!(alpha.abstract_text, "First abstract");
        assert_eq!(alpha.paper_pdf, "papers/alpha.pdf");
        assert_eq!(alpha.arxiv_url.as_deref(), Some("https://arxiv.org/abs/1"));

        let beta = &catalog.records[1];
        assert_eq!(beta.supplemental_pdf, "");
        assert_eq!(beta.arxiv_url, None);
    }

    #[test]
    fn missing_required_columns_reported_together() {
        let csv = "title,paper_pdf\nAlpha,a.pdf\n";
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            PaperdeckError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["abstract", "supplemental_pdf"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn absent_arxiv_column_synthesized_as_none() {
        let csv = "\
title,abstract,paper_pdf,supplemental_pdf
Alpha,text,a.pdf,s.pdf
";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert!(catalog.records.iter().all(|r| r.arxiv_url.is_none()));
    }

    #[test]
    fn missing_path_is_source_not_found() {
        let err = Catalog::from_path(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, PaperdeckError::SourceNotFound(_)));
    }

    #[test]
    fn resolved_links_leave_original_untouched() {
        let catalog = Catalog::from_reader(FULL_CSV.as_bytes()).unwrap();
        let resolved = catalog.with_resolved_links(Some("https://a.com/"));

        assert_eq!(
            resolved.records[0].paper_pdf_url.as_deref(),
            Some("https://a.com/papers/alpha.pdf")
        );
        // Already-absolute links pass through; blank ones stay absent.
        assert_eq!(
            resolved.records[1].paper_pdf_url.as_deref(),
            Some("https://host.org/beta.pdf")
        );
        assert_eq!(resolved.records[1].supplemental_pdf_url, None);
        // The source catalog keeps its unresolved state.
        assert!(catalog.records[0].paper_pdf_url.is_none());
    }

    #[test]
    fn usable_arxiv_url_requires_http_prefix() {
        let mut record = PaperRecord {
            title: String::new(),
            abstract_text: String::new(),
            paper_pdf: String::new(),
            supplemental_pdf: String::new(),
            arxiv_url: Some("arxiv.org/abs/1".to_string()),
            paper_pdf_url: None,
            supplemental_pdf_url: None,
        };
        assert_eq!(record.usable_arxiv_url(), None);
        record.arxiv_url = Some("https://arxiv.org/abs/1".to_string());
        assert_eq!(record.usable_arxiv_url(), Some("https://arxiv.org/abs/1"));
    }

    #[test]
    fn load_cache_returns_same_parse_for_same_path() {
        // Per-process dir so parallel test runs never collide.
        let dir = std::env::temp_dir().join(format!("paperdeck-cache-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("papers.csv");
        std::fs::write(&path, FULL_CSV).unwrap();

        let mut cache = LoadCache::new();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        cache.invalidate(&path);
        let third = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
