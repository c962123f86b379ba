//! Import and export of job postings kept in a PHP page's `$jobs` array.
//!
//! Older deployments hard-code the job list in the careers page as a PHP
//! array literal. The parser pulls the records out with regular
//! expressions; it is forgiving rather than a PHP parser. The writer puts an
//! edited list back in place of the literal, leaving the rest of the page
//! untouched.

pub mod parser;
pub mod writer;

use std::path::{Path, PathBuf};

use log::info;

use crate::error::LegacyError;
use crate::models::Job;

pub use parser::parse_jobs;
pub use writer::{render_jobs_array, replace_jobs_array};

/// A PHP page whose `$jobs` literal is being edited.
#[derive(Debug, Clone)]
pub struct LegacyJobFile {
    path: PathBuf,
    original: String,
    pub jobs: Vec<Job>,
}

impl LegacyJobFile {
    /// Reads `path` and parses its job list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LegacyError> {
        let path = path.as_ref().to_path_buf();
        let original = std::fs::read_to_string(&path).map_err(|source| LegacyError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let jobs = parse_jobs(&original)?;
        info!("Loaded {} jobs from {}", jobs.len(), path.display());
        Ok(Self {
            path,
            original,
            jobs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Page contents as last read or written.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Writes the current list back over the `$jobs` literal in place.
    pub fn save(&mut self) -> Result<(), LegacyError> {
        let path = self.path.clone();
        self.write_to(&path)
    }

    /// Writes the page with the current list to `target`, leaving the source file alone
    /// unless `target` is the source path.
    pub fn write_to(&mut self, target: &Path) -> Result<(), LegacyError> {
        let updated = replace_jobs_array(&self.original, &self.jobs)?;
        std::fs::write(target, &updated).map_err(|source| LegacyError::WriteFile {
            path: target.to_path_buf(),
            source,
        })?;
        info!("Wrote {} jobs to {}", self.jobs.len(), target.display());
        if target == self.path {
            self.original = updated;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"<?php
$jobs = [
    [
        "title" => "销售代表",
        "quota" => "若干",
        "salary" => "面议",
        "requirements" => [
            "沟通能力强",
        ]
    ]
];
?>
<h1>Careers</h1>
"#;

    const TEMPLATED_PAGE: &str = r#"<?php
$page_title = "加入我们";
$jobs = [
    [
        "title" => "环保工程师",
        "quota" => "3",
        "salary" => "5000 - 8000",
        "requirements" => [
            "环境工程相关专业",
        ]
    ]
];
?>
<ul>
<?php foreach ($jobs as $job) { ?>
    <li><?= $job["title"]; ?> (<?= $job["salary"]; ?>)</li>
<?php } ?>
</ul>
"#;

    #[test]
    fn test_load_edit_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("career.php");
        std::fs::write(&path, PAGE).unwrap();

        let mut file = LegacyJobFile::load(&path).unwrap();
        assert_eq!(file.jobs.len(), 1);
        file.jobs[0].salary_start = "4000".to_string();
        file.jobs[0].salary_end = "6000".to_string();
        file.save().unwrap();

        let reloaded = LegacyJobFile::load(&path).unwrap();
        assert_eq!(reloaded.jobs[0].salary(), "4000 - 6000");
        assert!(reloaded.original().ends_with("?>\n<h1>Careers</h1>\n"));
    }

    #[test]
    fn test_save_keeps_page_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("career.php");
        std::fs::write(&path, TEMPLATED_PAGE).unwrap();

        let mut file = LegacyJobFile::load(&path).unwrap();
        file.jobs.push(Job {
            title: "销售代表".to_string(),
            quota: "若干".to_string(),
            salary_start: "面议".to_string(),
            ..Default::default()
        });
        file.save().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let template = &TEMPLATED_PAGE[TEMPLATED_PAGE.find("\n?>").unwrap()..];
        assert!(written.ends_with(template));
        assert!(written.starts_with("<?php\n$page_title = \"加入我们\";\n$jobs = [\n"));

        let reloaded = LegacyJobFile::load(&path).unwrap();
        assert_eq!(reloaded.jobs, file.jobs);
    }

    #[test]
    fn test_write_to_other_path_keeps_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("career.php");
        let target = dir.path().join("career.new.php");
        std::fs::write(&source, PAGE).unwrap();

        let mut file = LegacyJobFile::load(&source).unwrap();
        file.jobs.clear();
        file.write_to(&target).unwrap();

        assert_eq!(std::fs::read_to_string(&source).unwrap(), PAGE);
        assert!(LegacyJobFile::load(&target).unwrap().jobs.is_empty());
    }

    #[test]
    fn test_save_refuses_invalid_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("career.php");
        std::fs::write(&path, PAGE).unwrap();

        let mut file = LegacyJobFile::load(&path).unwrap();
        file.jobs[0].title.clear();
        assert!(matches!(file.save(), Err(LegacyError::Validation(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), PAGE);
    }

    #[test]
    fn test_load_missing_file() {
        let result = LegacyJobFile::load("/nonexistent/career.php");
        assert!(matches!(result, Err(LegacyError::ReadFile { .. })));
    }
}
