//! Job postings.

use serde::{Deserialize, Serialize};

use super::{is_blank, lenient_string, Record, RecordKind};

/// A job posting.
///
/// The backend stores salary as one string and requirements as one
/// newline-separated string; both are split here for editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JobWire", into = "JobWire")]
pub struct Job {
    pub title: String,
    /// Free text ("3", "若干", ...).
    pub quota: String,
    pub salary_start: String,
    pub salary_end: String,
    /// One requirement per line.
    pub requirements: Vec<String>,
}

impl Job {
    /// Salary as stored by the backend.
    pub fn salary(&self) -> String {
        join_salary(&self.salary_start, &self.salary_end)
    }

    /// Requirements as one newline-joined block.
    pub fn requirements_text(&self) -> String {
        self.requirements.join("\n")
    }

    pub fn set_requirements_text(&mut self, text: &str) {
        self.requirements = split_lines(text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobField {
    Title,
    Quota,
    SalaryStart,
    SalaryEnd,
    Requirements,
}

impl Record for Job {
    type Field = JobField;

    const KIND: RecordKind = RecordKind::Jobs;

    fn fields() -> &'static [JobField] {
        &[
            JobField::Title,
            JobField::Quota,
            JobField::SalaryStart,
            JobField::SalaryEnd,
            JobField::Requirements,
        ]
    }

    fn placeholder() -> Self {
        Self {
            title: "新职位 - 请修改".to_string(),
            quota: "若干".to_string(),
            salary_start: "面议".to_string(),
            salary_end: String::new(),
            requirements: vec!["请填写要求1".to_string(), "请填写要求2".to_string()],
        }
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn get(&self, field: JobField) -> String {
        match field {
            JobField::Title => self.title.clone(),
            JobField::Quota => self.quota.clone(),
            JobField::SalaryStart => self.salary_start.clone(),
            JobField::SalaryEnd => self.salary_end.clone(),
            JobField::Requirements => self.requirements_text(),
        }
    }

    fn set(&mut self, field: JobField, value: &str) {
        match field {
            JobField::Title => self.title = value.to_string(),
            JobField::Quota => self.quota = value.to_string(),
            JobField::SalaryStart => self.salary_start = value.to_string(),
            JobField::SalaryEnd => self.salary_end = value.to_string(),
            JobField::Requirements => self.set_requirements_text(value),
        }
    }

    fn missing_field(&self) -> Option<&'static str> {
        if is_blank(&self.title) {
            Some("title")
        } else if is_blank(&self.quota) {
            Some("quota")
        } else if is_blank(&self.salary_start) {
            Some("salary start")
        } else {
            None
        }
    }
}

/// Splits a stored salary string into start and end.
///
/// Empty parts are dropped before counting, so `"5000-"` has one part. Only
/// an exact two-part split yields an end; otherwise the whole trimmed string
/// is the start.
pub fn split_salary(salary: &str) -> (String, String) {
    let salary = salary.trim();
    let parts: Vec<&str> = salary.split('-').filter(|p| !p.is_empty()).collect();
    if parts.len() == 2 {
        (parts[0].trim().to_string(), parts[1].trim().to_string())
    } else {
        (salary.to_string(), String::new())
    }
}

/// Inverse of [`split_salary`]: `"start - end"`, or just `start` when the end is blank.
pub fn join_salary(start: &str, end: &str) -> String {
    let end = end.trim();
    if end.is_empty() {
        start.trim().to_string()
    } else {
        format!("{} - {}", start.trim(), end)
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Requirements arrive as a string in some backend versions and as a list in others.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RequirementsWire {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct JobWire {
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    quota: String,
    #[serde(default, deserialize_with = "lenient_string")]
    salary: String,
    #[serde(default)]
    requirements: Option<RequirementsWire>,
}

impl From<JobWire> for Job {
    fn from(wire: JobWire) -> Self {
        let (salary_start, salary_end) = split_salary(&wire.salary);
        let requirements = match wire.requirements {
            None => Vec::new(),
            Some(RequirementsWire::Text(text)) => split_lines(&text),
            Some(RequirementsWire::List(items)) => items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        };
        Self {
            title: wire.title,
            quota: wire.quota,
            salary_start,
            salary_end,
            requirements,
        }
    }
}

impl From<Job> for JobWire {
    fn from(job: Job) -> Self {
        Self {
            salary: job.salary(),
            requirements: Some(RequirementsWire::Text(job.requirements_text())),
            title: job.title,
            quota: job.quota,
        }
    }
}
