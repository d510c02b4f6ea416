// src/config/validate.rs

use crate::config::model::{JobGraphFile, RawJobGraphFile};
use crate::errors::{JobdagError, Result};

impl TryFrom<RawJobGraphFile> for JobGraphFile {
    type Error = JobdagError;

    fn try_from(raw: RawJobGraphFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(JobGraphFile::new_unchecked(raw.config, raw.job))
    }
}

fn validate_raw_config(cfg: &RawJobGraphFile) -> Result<()> {
    ensure_has_jobs(cfg)?;
    validate_job_names(cfg)?;
    validate_references(cfg)?;
    Ok(())
}

fn ensure_has_jobs(cfg: &RawJobGraphFile) -> Result<()> {
    if cfg.job.is_empty() {
        return Err(JobdagError::ConfigError(
            "job graph must contain at least one [job.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_job_names(cfg: &RawJobGraphFile) -> Result<()> {
    for name in cfg.job.keys() {
        if name.trim().is_empty() {
            return Err(JobdagError::ConfigError(
                "job names must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_references(cfg: &RawJobGraphFile) -> Result<()> {
    for (name, job) in cfg.job.iter() {
        if job.referenced_names().any(|r| r.trim().is_empty()) {
            return Err(JobdagError::ConfigError(format!(
                "job '{}' references an empty outcome name",
                name
            )));
        }
    }
    Ok(())
}
