use std::{fs, io};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Chainable, Result};
use crate::rewrite::{self, RuleSet};
use crate::util::{self, PathExt};

/// The canonical landing page of the finished site.
pub const INDEX_FILE: &str = "index.html";

/// The readme-derived page the renderer emits; promoted to [`INDEX_FILE`].
pub const README_FILE: &str = "README.html";

const HTML_EXT: &str = "html";

/// Turns one rendered output directory into a relocatable site: promotes
/// the readme page to the site index, then rewrites the links of every
/// page directly inside the directory.
#[derive(Debug)]
pub struct Relinker {
    output: PathBuf,
    rules: RuleSet,
}

/// What one relink pass did: how many pages were processed and how many
/// replacements each rule made across all of them, in rule order.
#[derive(Debug, Default)]
pub struct RelinkReport {
    pub pages: usize,
    pub substitutions: Vec<(String, usize)>,
}

impl Relinker {
    pub fn new<P: AsRef<Path>>(output: P) -> Self {
        Relinker::with_rules(output, rewrite::site_relocation().clone())
    }

    pub fn with_rules<P: AsRef<Path>>(output: P, rules: RuleSet) -> Self {
        Relinker { output: output.as_ref().to_path_buf(), rules }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// One full pass: promote the readme page, discover the site's pages,
    /// rewrite their links in place. Each step is a precondition for the
    /// next; the first failure aborts the pass.
    pub fn run(&self) -> Result<RelinkReport> {
        self.promote_readme()?;
        let pages = self.discover()?;
        self.relink_pages(pages)
    }

    /// The renderer's generic landing page gives way to the readme-derived
    /// page. The landing page may be absent; the readme page must exist.
    fn promote_readme(&self) -> Result<()> {
        let readme = self.output.join(README_FILE);
        let index = self.output.join(INDEX_FILE);

        if !readme.is_file() {
            return err! {
                "the rendered output has no readme page to promote",
                "expected path" => readme.display(),
            };
        }

        if let Err(e) = fs::remove_file(&index) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e).chain_with(|| error! {
                    "failed to remove the generated landing page",
                    "landing page" => index.display(),
                });
            }
        }

        fs::rename(&readme, &index).chain_with(|| error! {
            "failed to promote the readme page to the site index",
            "readme page" => readme.display(),
            "site index" => index.display(),
        })
    }

    /// Every page directly inside the output directory. Subdirectories are
    /// not descended into; their contents belong to the renderer.
    fn discover(&self) -> Result<Vec<PathBuf>> {
        use jwalk::WalkDir;

        if !self.output.is_dir() {
            return err! {
                "the rendered output directory does not exist",
                "output directory" => self.output.display(),
            };
        }

        let walker = WalkDir::new(&self.output)
            .max_depth(1)
            .skip_hidden(false)
            .sort(true);

        let mut pages = Vec::new();
        for entry in walker {
            let entry = entry.chain_with(|| error! {
                "failed to enumerate the rendered output",
                "output directory" => self.output.display(),
            })?;

            if !entry.file_type.is_file() {
                continue;
            }

            let name = entry.file_name.to_string_lossy();
            if util::file_ext(&name) == Some(HTML_EXT) {
                pages.push(entry.path());
            }
        }

        Ok(pages)
    }

    fn relink_pages(&self, pages: Vec<PathBuf>) -> Result<RelinkReport> {
        let counts = pages.par_iter()
            .map(|page| self.relink_page(page))
            .collect::<Result<Vec<_>>>()?;

        let mut totals = vec![0; self.rules.len()];
        for page_counts in counts {
            for (total, count) in totals.iter_mut().zip(page_counts) {
                *total += count;
            }
        }

        Ok(RelinkReport {
            pages: pages.len(),
            substitutions: self.rules.patterns().map(str::to_owned).zip(totals).collect(),
        })
    }

    fn relink_page(&self, page: &Path) -> Result<Vec<usize>> {
        let text = page.read_text()?;
        let rewritten = self.rules.apply(&text);
        if rewritten.modified() {
            page.write_text(&rewritten.text)?;
        }

        Ok(rewritten.counts)
    }
}

#[cfg(test)]
mod relink_tests {
    use std::fs;
    use std::path::Path;

    use super::Relinker;

    fn seed(dir: &Path) {
        fs::create_dir_all(dir.join("_assets")).unwrap();
        fs::create_dir_all(dir.join("extra")).unwrap();
        fs::write(dir.join("index.html"), "<html>listing</html>").unwrap();
        fs::write(
            dir.join("README.html"),
            r#"<a href="/_assets/a.png"><a href="intro.md"><a href="README.html">"#,
        ).unwrap();
        fs::write(dir.join("intro.html"), r#"<a href="setup.md">next</a>"#).unwrap();
        fs::write(dir.join("style.css"), ".md { color: red }").unwrap();
        fs::write(dir.join("extra/notes.html"), r#"<a href="notes.md">"#).unwrap();
    }

    #[test]
    fn test_readme_becomes_the_index() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());

        let report = Relinker::new(dir.path()).run().unwrap();
        assert_eq!(report.pages, 2);
        assert!(!dir.path().join("README.html").exists());

        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(index, r#"<a href="./_assets/a.png"><a href="intro.html"><a href="index.html">"#);

        let intro = fs::read_to_string(dir.path().join("intro.html")).unwrap();
        assert_eq!(intro, r#"<a href="setup.html">next</a>"#);
    }

    #[test]
    fn test_missing_readme_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html>listing</html>").unwrap();

        assert!(Relinker::new(dir.path()).run().is_err());

        // nothing was touched
        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(index, "<html>listing</html>");
    }

    #[test]
    fn test_landing_page_may_be_absent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.html"), r#"<a href="a.md">"#).unwrap();

        let report = Relinker::new(dir.path()).run().unwrap();
        assert_eq!(report.pages, 1);

        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(index, r#"<a href="a.html">"#);
    }

    #[test]
    fn test_non_pages_and_subdirectories_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        Relinker::new(dir.path()).run().unwrap();

        let css = fs::read_to_string(dir.path().join("style.css")).unwrap();
        assert_eq!(css, ".md { color: red }");

        let nested = fs::read_to_string(dir.path().join("extra/notes.html")).unwrap();
        assert_eq!(nested, r#"<a href="notes.md">"#);
    }

    #[test]
    fn test_second_rewrite_pass_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());

        let relinker = Relinker::new(dir.path());
        relinker.run().unwrap();
        let first: Vec<String> = ["index.html", "intro.html"].iter()
            .map(|name| fs::read_to_string(dir.path().join(name)).unwrap())
            .collect();

        let pages = relinker.discover().unwrap();
        let report = relinker.relink_pages(pages).unwrap();
        assert!(report.substitutions.iter().all(|(_, count)| *count == 0));

        let second: Vec<String> = ["index.html", "intro.html"].iter()
            .map(|name| fs::read_to_string(dir.path().join(name)).unwrap())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_output_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let relinker = Relinker::new(dir.path().join("missing"));
        assert!(relinker.discover().is_err());
        assert!(relinker.run().is_err());
    }
}
