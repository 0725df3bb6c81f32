use std::fmt::Write as _;
use std::path::Path;

use chrono::Local;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::{info_time, JobRecord, Result};

/// Enumerated, human readable listing of the jobs.
pub fn format_jobs(jobs: &[JobRecord]) -> String {
    if jobs.is_empty() {
        return "\n❌ No jobs found\n".to_string();
    }

    let rule = "=".repeat(80);
    let mut out = format!("\n{rule}\n📊 FOUND {} JOBS\n{rule}\n\n", jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        // Writing into a String can't fail.
        let _ = write!(
            out,
            "{}. {}\n   🏢 {}\n   📍 {}\n   🕐 Posted: {}\n   🔗 {}\n\n",
            i + 1,
            job.title,
            job.company,
            job.location,
            job.posted_ago,
            job.url
        );
    }
    out
}

pub fn display_jobs(jobs: &[JobRecord]) {
    print!("{}", format_jobs(jobs));
}

/// Writes the jobs as a pretty printed JSON array, replacing the file if it exists.
/// Non-ASCII text is written as is.
pub async fn save_to_json(jobs: &[JobRecord], path: impl AsRef<Path>) -> Result<()> {
    let local_now = Local::now();
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(jobs)?;

    let mut file = File::create(path).await?;
    file.write_all(&json).await?;
    file.flush().await?;
    info_time!(local_now, "💾 Saved {} jobs to {}", jobs.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str) -> JobRecord {
        JobRecord {
            title: title.into(),
            company: "Zoë & Søn".into(),
            location: "N/A".into(),
            posted_time: "2 days ago".into(),
            posted_ago: "2 days ago".into(),
            url: "https://www.linkedin.com/jobs/view/1".into(),
            scraped_at: "2026-10-14 09:30:00".into(),
        }
    }

    #[test]
    fn summary_is_enumerated() {
        let out = format_jobs(&[job("First"), job("Second")]);
        assert!(out.contains("FOUND 2 JOBS"));
        assert!(out.contains(&"=".repeat(80)));
        assert!(out.contains("1. First\n   🏢 Zoë & Søn\n   📍 N/A\n   🕐 Posted: 2 days ago\n"));
        assert!(out.contains("2. Second\n"));
    }

    #[test]
    fn empty_summary() {
        assert!(format_jobs(&[]).contains("No jobs found"));
    }

    #[tokio::test]
    async fn saved_json_is_indented_and_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        save_to_json(&[job("Ingénieur")], &path).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n    \"title\": \"Ingénieur\""));
        assert!(text.contains("Zoë & Søn"));
        assert!(!text.contains("\\u"));
    }
}
