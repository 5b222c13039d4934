// HTML pages that host the widget's mount point.
// Locates an element by id and replaces everything between its start and end tags.

use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{CardsError, Result};

/// A document containing mount points addressed by element id.
pub trait Page {
    /// Whether an element with `id` exists and can hold content.
    fn has_element(&self, id: &str) -> bool;

    /// Replace the element's entire inner content with `html`.
    fn set_inner_html(&mut self, id: &str, html: &str) -> Result<()>;
}

/// An HTML document held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    source: String,
}

impl HtmlDocument {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// A document that is nothing but an empty `<div id="...">` container.
    pub fn with_container(id: &str) -> Self {
        Self::new(format!(r#"<div id="{}"></div>"#, id))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Current inner content of the element with `id`.
    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.inner_range(id).map(|range| &self.source[range])
    }

    /// Byte range of the inner content of the element with `id`.
    ///
    /// Self-closing elements have no inner content and are not found. Anything
    /// inside `<!-- -->` is ignored, both when looking for the element and when
    /// matching its end tag.
    fn inner_range(&self, id: &str) -> Option<Range<usize>> {
        let comments = comment_spans(&self.source);
        let (tag_name, open_end) = find_id_attribute(&self.source, id, &comments)
            .into_iter()
            .find_map(|attr_pos| self.start_tag_around(attr_pos))?;
        if self.source[..open_end].ends_with('/') {
            return None;
        }
        let inner_start = open_end + 1;

        // ASCII lowercasing keeps byte offsets identical.
        let lower = self.source.to_ascii_lowercase();
        let tag_name = tag_name.to_ascii_lowercase();
        let open_tag = format!("<{}", tag_name);
        let close_tag = format!("</{}", tag_name);

        let mut depth = 1usize;
        let mut cursor = inner_start;
        while let Some(offset) = lower[cursor..].find('<') {
            let pos = cursor + offset;
            if let Some(comment) = comments.iter().find(|span| span.start == pos) {
                cursor = comment.end;
                continue;
            }
            let rest = &lower[pos..];
            if starts_with_tag(rest, &close_tag) {
                depth -= 1;
                if depth == 0 {
                    return Some(inner_start..pos);
                }
            } else if starts_with_tag(rest, &open_tag) {
                let end = tag_end(&lower, pos)?;
                if !lower[..end].ends_with('/') {
                    depth += 1;
                }
                cursor = end + 1;
                continue;
            }
            cursor = pos + 1;
        }

        None
    }

    /// Tag name and closing `>` of the start tag containing `attr_pos`, if the
    /// attribute really sits inside one.
    fn start_tag_around(&self, attr_pos: usize) -> Option<(String, usize)> {
        let tag_start = self.source[..attr_pos].rfind('<')?;
        let tag_name: String = self.source[tag_start + 1..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if tag_name.is_empty() {
            return None;
        }
        let open_end = tag_end(&self.source, tag_start)?;
        (open_end > attr_pos).then_some((tag_name, open_end))
    }
}

/// Positions of `id="..."` (or single-quoted) attributes with an exact value,
/// outside comments, in document order.
fn find_id_attribute(source: &str, id: &str, comments: &[Range<usize>]) -> Vec<usize> {
    let candidates = [format!(r#"id="{}""#, id), format!("id='{}'", id)];
    let mut found: Vec<usize> = candidates
        .iter()
        .flat_map(|needle| source.match_indices(needle.as_str()).map(|(pos, _)| pos))
        .filter(|&pos| {
            source[..pos]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace)
        })
        .filter(|pos| !comments.iter().any(|span| span.contains(pos)))
        .collect();
    found.sort_unstable();
    found
}

/// Byte ranges of `<!-- ... -->` comments. An unterminated comment runs to the end.
fn comment_spans(source: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = source[cursor..].find("<!--") {
        let start = cursor + offset;
        let end = source[start + 4..]
            .find("-->")
            .map_or(source.len(), |close| start + 4 + close + 3);
        spans.push(start..end);
        cursor = end;
    }
    spans
}

/// Index of the `>` ending the tag that opens at `tag_start`. A `>` inside a
/// quoted attribute value does not end the tag.
fn tag_end(source: &str, tag_start: usize) -> Option<usize> {
    let mut quote = None;
    for (i, c) in source[tag_start..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(tag_start + i),
            None => {}
        }
    }
    None
}

/// `rest` begins with `tag` followed by a tag-name boundary.
fn starts_with_tag(rest: &str, tag: &str) -> bool {
    rest.starts_with(tag)
        && rest[tag.len()..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace())
}

impl Page for HtmlDocument {
    fn has_element(&self, id: &str) -> bool {
        self.inner_range(id).is_some()
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> Result<()> {
        let range = self
            .inner_range(id)
            .ok_or_else(|| CardsError::Other(format!("no element with id '{}'", id)))?;
        self.source.replace_range(range, html);
        Ok(())
    }
}

/// An HTML document backed by a file, rewritten after every change.
#[derive(Debug)]
pub struct HtmlFile {
    path: PathBuf,
    document: HtmlDocument,
}

impl HtmlFile {
    /// Load a page from disk.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let source = fs::read_to_string(&path)?;
        Ok(Self {
            path,
            document: HtmlDocument::new(source),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }

    fn persist(&self) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(self.document.as_str().as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl Page for HtmlFile {
    fn has_element(&self, id: &str) -> bool {
        self.document.has_element(id)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> Result<()> {
        self.document.set_inner_html(id, html)?;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"<html><body>
<section class="projects">
  <h2>Projects</h2>
  <div id="github-projects" class="project-grid"><div class="loading-placeholder"><p>Loading</p></div></div>
  <div id="footer">f</div>
</section>
</body></html>"#;

    #[test]
    fn test_inner_html_handles_nesting() {
        let doc = HtmlDocument::new(PAGE);
        assert_eq!(
            doc.inner_html("github-projects"),
            Some(r#"<div class="loading-placeholder"><p>Loading</p></div>"#)
        );
        assert_eq!(doc.inner_html("footer"), Some("f"));
    }

    #[test]
    fn test_set_inner_html_replaces_only_the_mount() {
        let mut doc = HtmlDocument::new(PAGE);

        doc.set_inner_html("github-projects", "<div>a</div><div>b</div>")
            .unwrap();
        doc.set_inner_html("github-projects", "<p>done</p>").unwrap();

        assert_eq!(doc.inner_html("github-projects"), Some("<p>done</p>"));
        assert_eq!(doc.inner_html("footer"), Some("f"));
        assert!(doc.as_str().starts_with("<html><body>"));
    }

    #[test]
    fn test_missing_element() {
        let mut doc = HtmlDocument::new("<div id=\"other\"></div>");

        assert!(!doc.has_element("github-projects"));
        assert!(doc.set_inner_html("github-projects", "x").is_err());
    }

    #[test]
    fn test_id_must_match_exactly() {
        let doc = HtmlDocument::new(r#"<div data-id="github-projects"></div><div id="github-projects-old"></div>"#);
        assert!(!doc.has_element("github-projects"));
    }

    #[test]
    fn test_self_closing_is_not_a_mount() {
        let doc = HtmlDocument::new(r#"<div id="github-projects" />"#);
        assert!(!doc.has_element("github-projects"));
    }

    #[test]
    fn test_single_quotes_and_uppercase_tags() {
        let mut doc = HtmlDocument::new("<DIV id='github-projects'><Div>x</Div></DIV>");

        doc.set_inner_html("github-projects", "y").unwrap();

        assert_eq!(doc.as_str(), "<DIV id='github-projects'>y</DIV>");
    }

    #[test]
    fn test_commented_out_mount_is_ignored() {
        let source = r#"<!-- <div id="github-projects"></div> --><main>x</main>"#;
        let mut doc = HtmlDocument::new(source);

        assert!(!doc.has_element("github-projects"));
        assert!(doc.set_inner_html("github-projects", "<p>cards</p>").is_err());
        assert_eq!(doc.as_str(), source);
    }

    #[test]
    fn test_live_mount_after_commented_copy() {
        let mut doc = HtmlDocument::new(
            r#"<!-- <div id="github-projects">old</div> --><div id="github-projects">live</div>"#,
        );

        doc.set_inner_html("github-projects", "new").unwrap();

        assert_eq!(
            doc.as_str(),
            r#"<!-- <div id="github-projects">old</div> --><div id="github-projects">new</div>"#
        );
    }

    #[test]
    fn test_end_tag_inside_comment_does_not_close_mount() {
        let doc = HtmlDocument::new(r#"<div id="github-projects"><!-- </div> -->a</div><p>z</p>"#);
        assert_eq!(doc.inner_html("github-projects"), Some("<!-- </div> -->a"));
    }

    #[test]
    fn test_gt_inside_attribute_value() {
        let mut doc = HtmlDocument::new(
            r#"<div id="github-projects" data-note="a>b"></div><footer>f</footer>"#,
        );

        doc.set_inner_html("github-projects", "NEW").unwrap();

        assert_eq!(
            doc.as_str(),
            r#"<div id="github-projects" data-note="a>b">NEW</div><footer>f</footer>"#
        );
    }

    #[test]
    fn test_nested_tag_with_quoted_gt() {
        let doc = HtmlDocument::new(
            r#"<div id="github-projects"><div title='1 > 0'>x</div></div><div>after</div>"#,
        );
        assert_eq!(
            doc.inner_html("github-projects"),
            Some(r#"<div title='1 > 0'>x</div>"#)
        );
    }

    #[test]
    fn test_id_text_outside_a_tag_is_ignored() {
        let doc = HtmlDocument::new(r#"<p>set id="github-projects" here</p>"#);
        assert!(!doc.has_element("github-projects"));
    }

    #[test]
    fn test_file_page_persists_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.html");
        fs::write(&path, PAGE).unwrap();

        let mut page = HtmlFile::open(&path).unwrap();
        page.set_inner_html("github-projects", "<p>cards</p>").unwrap();

        let reloaded = HtmlDocument::new(fs::read_to_string(&path).unwrap());
        assert_eq!(reloaded.inner_html("github-projects"), Some("<p>cards</p>"));
    }
}
