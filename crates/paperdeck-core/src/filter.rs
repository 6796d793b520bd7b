//! Substring filtering over title and abstract.

use crate::catalog::PaperRecord;

/// Two independent case-insensitive substring predicates, combined with
/// AND. An empty query string leaves that predicate always-true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub title: String,
    pub abstract_query: String,
}

impl FilterQuery {
    pub fn new(title: impl Into<String>, abstract_query: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            abstract_query: abstract_query.into(),
        }
    }

    /// Whether both predicates are inactive.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.abstract_query.is_empty()
    }

    /// Indices of matching records, in original order.
    pub fn apply(&self, records: &[PaperRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect()
    }

    fn matches(&self, record: &PaperRecord) -> bool {
        matches_query(&record.title, &self.title)
            && matches_query(&record.abstract_text, &self.abstract_query)
    }
}

/// An empty query matches everything; otherwise the field must contain the
/// query case-insensitively. An empty field never matches an active query.
fn matches_query(field: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    field.to_lowercase().contains(&query.to_lowercase())
}

/// First record whose title equals `title` exactly, together with how many
/// records share that title. Callers use the count to flag collisions
/// instead of silently picking one row.
pub fn select_by_title<'a>(
    records: &'a [PaperRecord],
    title: &str,
) -> Option<(&'a PaperRecord, usize)> {
    let count = records.iter().filter(|r| r.title == title).count();
    records
        .iter()
        .find(|r| r.title == title)
        .map(|r| (r, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, abstract_text: &str) -> PaperRecord {
        PaperRecord {
            title: title.to_string(),
            abstract_text: abstract_text.to_string(),
            paper_pdf: String::new(),
            supplemental_pdf: String::new(),
            arxiv_url: None,
            paper_pdf_url: None,
            supplemental_pdf_url: None,
        }
    }

    fn sample() -> Vec<PaperRecord> {
        vec![
            record("Neural Radiance Fields", "novel view synthesis"),
            record("Diffusion Models", "generative image synthesis"),
            record("Graph Networks", "relational reasoning"),
        ]
    }

    #[test]
    fn empty_queries_return_full_set_in_order() {
        let records = sample();
        let indices = FilterQuery::default().apply(&records);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn title_query_is_case_insensitive_substring() {
        let records = sample();
        let indices = FilterQuery::new("NEURAL", "").apply(&records);
        assert_eq!(indices, vec![0]);

        let indices = FilterQuery::new("s", "").apply(&records);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn queries_intersect() {
        let records = sample();
        let indices = FilterQuery::new("s", "synthesis").apply(&records);
        assert_eq!(indices, vec![0, 1]);

        let indices = FilterQuery::new("Graph", "synthesis").apply(&records);
        assert!(indices.is_empty());
    }

    #[test]
    fn empty_field_never_matches_active_query() {
        let records = vec![record("", "some text")];
        assert!(FilterQuery::new("x", "").apply(&records).is_empty());
        // But an inactive predicate still passes it through.
        assert_eq!(FilterQuery::new("", "text").apply(&records), vec![0]);
    }

    #[test]
    fn select_by_title_reports_collisions() {
        let records = vec![
            record("Same Title", "first"),
            record("Other", "x"),
            record("Same Title", "second"),
        ];
        let (found, count) = select_by_title(&records, "Same Title").unwrap();
        assert_eq!(found.abstract_text, "first");
        assert_eq!(count, 2);

        assert!(select_by_title(&records, "Missing").is_none());
    }
}
