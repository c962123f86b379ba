//! Renders a job list back into the `$jobs = [...]` PHP literal.

use crate::error::LegacyError;
use crate::models::{validate_all, Job};

use super::parser::locate_jobs_array;

const INDENT: &str = "    ";

fn php_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render_job(job: &Job) -> String {
    let l1 = INDENT;
    let l2 = INDENT.repeat(2);
    let l3 = INDENT.repeat(3);

    let requirements: String = job
        .requirements
        .iter()
        .map(|requirement| format!("{l3}{},\n", php_string(requirement)))
        .collect();

    format!(
        "{l1}[\n\
         {l2}\"title\" => {title},\n\
         {l2}\"quota\" => {quota},\n\
         {l2}\"salary\" => {salary},\n\
         {l2}\"requirements\" => [\n\
         {requirements}\
         {l2}]\n\
         {l1}]",
        title = php_string(&job.title),
        quota = php_string(&job.quota),
        salary = php_string(&job.salary()),
    )
}

/// Renders `jobs` as a complete `$jobs = [...];` statement.
pub fn render_jobs_array(jobs: &[Job]) -> String {
    let mut out = String::from("$jobs = [\n");
    let blocks: Vec<String> = jobs.iter().map(render_job).collect();
    if !blocks.is_empty() {
        out.push_str(&blocks.join(",\n"));
        out.push('\n');
    }
    out.push_str("];");
    out
}

/// Validates `jobs` and splices them over the `$jobs` statement in `original`.
///
/// Everything outside the statement is kept byte for byte.
pub fn replace_jobs_array(original: &str, jobs: &[Job]) -> Result<String, LegacyError> {
    validate_all(jobs)?;
    let range = locate_jobs_array(original)
        .ok_or(LegacyError::ArrayNotFound)?
        .statement;

    let mut out = String::with_capacity(original.len());
    out.push_str(&original[..range.start]);
    out.push_str(&render_jobs_array(jobs));
    out.push_str(&original[range.end..]);
    Ok(out)
}
