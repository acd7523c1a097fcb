//! Deriving descriptions for many pages at once.
//!
//! Pages are independent compilations and never share a store, so they can
//! run on the rayon pool without synchronization.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::derive::{derive, DeriveOptions};
use crate::error::Result;

/// Derive a description for each page, preserving input order.
///
/// With `parallel` set, pages are processed on the rayon thread pool.
pub fn describe_all<S>(
    pages: &[S],
    options: &DeriveOptions,
    parallel: bool,
) -> Vec<Option<String>>
where
    S: AsRef<str> + Sync,
{
    log::debug!(
        "Deriving descriptions for {} pages (parallel: {})",
        pages.len(),
        parallel
    );

    if parallel {
        pages
            .par_iter()
            .map(|page| derive(page.as_ref(), options))
            .collect()
    } else {
        pages.iter().map(|page| derive(page.as_ref(), options)).collect()
    }
}

/// Read and describe each HTML file, preserving input order.
///
/// A file that fails yields an error in its slot; the others are still
/// processed.
pub fn describe_files<P>(
    paths: &[P],
    options: &DeriveOptions,
    parallel: bool,
) -> Vec<(PathBuf, Result<Option<String>>)>
where
    P: AsRef<Path> + Sync,
{
    describe_files_with(paths, options, parallel, |_, _| {})
}

/// Like [`describe_files`], calling `on_done` as each file finishes.
///
/// With `parallel` set, `on_done` runs on worker threads in completion order.
pub fn describe_files_with<P, F>(
    paths: &[P],
    options: &DeriveOptions,
    parallel: bool,
    on_done: F,
) -> Vec<(PathBuf, Result<Option<String>>)>
where
    P: AsRef<Path> + Sync,
    F: Fn(&Path, &Result<Option<String>>) + Sync,
{
    let describe_one = |path: &P| {
        let path = path.as_ref();
        let result: Result<Option<String>> = std::fs::read_to_string(path)
            .map(|html| derive(&html, options))
            .map_err(Into::into);
        if let Err(ref e) = result {
            log::warn!("Failed to describe {}: {}", path.display(), e);
        }
        on_done(path, &result);
        (path.to_path_buf(), result)
    };

    if parallel {
        paths.par_iter().map(describe_one).collect()
    } else {
        paths.iter().map(describe_one).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<String> {
        (0..64)
            .map(|i| {
                if i % 3 == 0 {
                    format!("<table><tr><td><p>box {}</p></td></tr></table>", i)
                } else {
                    format!("<p>Page {}</p>", i)
                }
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pages = pages();
        let options = DeriveOptions::default();
        let seq = describe_all(&pages, &options, false);
        let par = describe_all(&pages, &options, true);
        assert_eq!(seq, par);
        assert_eq!(seq[0], None);
        assert_eq!(seq[1].as_deref(), Some("Page 1"));
    }

    #[test]
    fn test_empty_batch() {
        let pages: [&str; 0] = [];
        assert!(describe_all(&pages, &DeriveOptions::default(), true).is_empty());
    }

    #[test]
    fn test_describe_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.html");
        std::fs::write(&good, "<p>From file</p>").unwrap();
        let missing = dir.path().join("missing.html");

        let results = describe_files(&[good.clone(), missing], &DeriveOptions::default(), true);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, good);
        assert_eq!(
            results[0].1.as_ref().unwrap().as_deref(),
            Some("From file")
        );
        assert!(matches!(results[1].1, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_describe_files_callback() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..8)
            .map(|i| {
                let path = dir.path().join(format!("{}.html", i));
                std::fs::write(&path, format!("<p>Page {}</p>", i)).unwrap();
                path
            })
            .collect();

        let done = AtomicUsize::new(0);
        let results = describe_files_with(&paths, &DeriveOptions::default(), true, |_, r| {
            assert!(r.is_ok());
            done.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(done.load(Ordering::SeqCst), 8);
        assert_eq!(results[7].1.as_ref().unwrap().as_deref(), Some("Page 7"));
    }
}
