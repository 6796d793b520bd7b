//! Markdown export of a single paper record.

use std::path::{Path, PathBuf};

use crate::catalog::PaperRecord;
use crate::error::Result;

/// Name of the exported document.
pub const EXPORT_FILE_NAME: &str = "paper.md";

/// Render one record as a standalone Markdown document. Links that did not
/// resolve to a value are written as the literal `N/A`.
pub fn render_markdown(record: &PaperRecord) -> String {
    format!(
        "# {}\n\n## Abstract\n{}\n\n## Links\n- Paper PDF: {}\n- Supplemental PDF: {}\n- arXiv: {}\n",
        record.title,
        record.abstract_text,
        link_or_na(record.paper_pdf_url.as_deref()),
        link_or_na(record.supplemental_pdf_url.as_deref()),
        link_or_na(record.arxiv_url.as_deref()),
    )
}

/// Write the Markdown export into `dir` as `paper.md`, returning the path.
pub fn write_markdown(record: &PaperRecord, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, render_markdown(record))?;
    Ok(path)
}

fn link_or_na(link: Option<&str>) -> &str {
    link.unwrap_or("N/A")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_links() -> PaperRecord {
        PaperRecord {
            title: "Neural Radiance Fields".to_string(),
            abstract_text: "We present a method for view synthesis.".to_string(),
            paper_pdf: "papers/nerf.pdf".to_string(),
            supplemental_pdf: String::new(),
            arxiv_url: Some("https://arxiv.org/abs/2003.08934".to_string()),
            paper_pdf_url: Some("https://a.com/papers/nerf.pdf".to_string()),
            supplemental_pdf_url: None,
        }
    }

    #[test]
    fn renders_fixed_headings() {
        let md = render_markdown(&record_with_links());
        assert!(md.contains("# Neural Radiance Fields"));
        assert!(md.contains("## Abstract"));
        assert!(md.contains("## Links"));
        assert!(md.contains("- Paper PDF: https://a.com/papers/nerf.pdf"));
        assert!(md.contains("- arXiv: https://arxiv.org/abs/2003.08934"));
    }

    #[test]
    fn absent_links_render_as_na() {
        let mut record = record_with_links();
        record.arxiv_url = None;
        record.supplemental_pdf_url = None;
        let md = render_markdown(&record);
        assert!(md.contains("- Supplemental PDF: N/A"));
        assert!(md.contains("- arXiv: N/A"));
    }

    #[test]
    fn writes_named_file() {
        // Per-process dir so parallel test runs never collide.
        let dir =
            std::env::temp_dir().join(format!("paperdeck-export-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = write_markdown(&record_with_links(), &dir).unwrap();
        assert!(path.ends_with(EXPORT_FILE_NAME));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Neural Radiance Fields\n"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
