//! Check command - validates a pages manifest before indexing.

use std::path::Path;

use color_eyre::eyre::{bail, Result, WrapErr};
use sitefind_core::Page;

/// Run the check command.
pub fn run(pages_path: &Path, strict: bool) -> Result<()> {
    let pages = Page::load_manifest(pages_path).wrap_err("Failed to load pages manifest")?;

    let report = validate(&pages);

    for warning in &report.warnings {
        println!("  ⚠ {warning}");
    }
    for error in &report.errors {
        println!("  ✗ {error}");
    }

    if !report.errors.is_empty() {
        bail!("{} manifest error(s)", report.errors.len());
    }
    if strict && !report.warnings.is_empty() {
        bail!("{} warning(s) with --strict", report.warnings.len());
    }

    println!("  ✓ {} page(s) ok", pages.len());
    Ok(())
}

/// Validation outcome for one manifest.
#[derive(Debug, Default)]
pub struct Report {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a page set: hrefs must be present and unique; untitled or
/// empty pages index poorly, so they warn.
pub fn validate(pages: &[Page]) -> Report {
    let mut report = Report::default();
    let mut seen = std::collections::HashSet::new();

    for (i, page) in pages.iter().enumerate() {
        if page.href.is_empty() {
            report.errors.push(format!("page {i} has an empty href"));
        } else if !seen.insert(page.href.as_str()) {
            report.errors.push(format!("duplicate href: {}", page.href));
        }

        if page.title.is_empty() {
            report
                .warnings
                .push(format!("page {} has an empty title", describe(page, i)));
        }
        if page.content.is_empty() {
            report
                .warnings
                .push(format!("page {} has no content", describe(page, i)));
        }
    }

    report
}

fn describe(page: &Page, i: usize) -> String {
    if page.href.is_empty() {
        format!("#{i}")
    } else {
        page.href.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(href: &str, title: &str, content: &str) -> Page {
        Page {
            href: href.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            lang: "en".to_string(),
        }
    }

    #[test]
    fn test_valid_manifest() {
        let pages = vec![page("/a", "Alpha", "alpha"), page("/b", "Beta", "beta")];
        let report = validate(&pages);

        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_href_is_error() {
        let pages = vec![page("/a", "Alpha", "alpha"), page("/a", "Again", "again")];
        let report = validate(&pages);

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("duplicate href"));
    }

    #[test]
    fn test_empty_href_is_error() {
        let pages = vec![page("", "Alpha", "alpha")];
        let report = validate(&pages);

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("empty href"));
    }

    #[test]
    fn test_empty_title_and_content_warn() {
        let pages = vec![page("/a", "", "")];
        let report = validate(&pages);

        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 2);
    }
}
