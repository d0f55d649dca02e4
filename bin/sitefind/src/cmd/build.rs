//! Build command - turns a pages manifest into the search index asset.

use std::{fs, path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use sitefind_core::{Config, Page};
use sitefind_index::{documents_from_pages, IndexSchema, SearchIndex};

/// Run the build command.
pub fn run(
    config_path: &Path,
    pages_path: &Path,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?pages_path, ?output, "Starting index build");

    let config = Config::load_or_default(config_path).wrap_err("Failed to load configuration")?;

    if !config.search.enabled {
        tracing::warn!("Search is disabled in configuration, nothing to build");
        return Ok(());
    }

    let pages = Page::load_manifest(pages_path).wrap_err("Failed to load pages manifest")?;
    let documents = documents_from_pages(&pages);

    let index = SearchIndex::build_with(
        IndexSchema::for_pages(),
        &documents,
        config.search.min_term_len,
    )
    .wrap_err("Failed to build search index")?;

    let out_path = match output {
        Some(path) => path.to_path_buf(),
        None => Path::new(&config.build.output_dir).join(&config.build.index_name),
    };

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    if pretty {
        fs::write(&out_path, index.to_json_pretty()?)
            .wrap_err_with(|| format!("Failed to write {}", out_path.display()))?;
    } else {
        index.write_to_file(&out_path)?;
    }

    tracing::info!(
        documents = index.document_count(),
        terms = index.term_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        path = %out_path.display(),
        "Search index built"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_build_from_manifest() {
        let dir = TempDir::new().unwrap();
        let pages_path = dir.path().join("pages.json");
        let out_path = dir.path().join("public/search-index.json");

        fs::write(
            &pages_path,
            r#"[
                {"href": "/a", "title": "Alpha", "content": "alpha page"},
                {"href": "/b", "title": "Beta", "content": "beta page"}
            ]"#,
        )
        .unwrap();

        run(
            &dir.path().join("missing.toml"),
            &pages_path,
            Some(&out_path),
            false,
        )
        .unwrap();

        let index = SearchIndex::from_json(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(index.document_count(), 2);
        assert_eq!(index.search("alpha", 10).len(), 1);
    }

    #[test]
    fn test_build_fails_without_manifest() {
        let dir = TempDir::new().unwrap();
        let result = run(
            &dir.path().join("missing.toml"),
            &dir.path().join("missing.json"),
            Some(&dir.path().join("out.json")),
            false,
        );

        assert!(result.is_err());
    }
}
