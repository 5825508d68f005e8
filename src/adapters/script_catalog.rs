use crate::adapters::session_log::SessionLog;
use crate::domain::error::DiscoveryError;
use crate::domain::{first_comment_line, NamingConvention, ScriptEntry, NO_DESCRIPTION};
use crate::ports::ScriptRepository;

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub struct FsScriptCatalog {
    dir: PathBuf,
    naming: NamingConvention,
    log: SessionLog,
}

impl FsScriptCatalog {
    pub fn new<P: Into<PathBuf>>(dir: P, naming: NamingConvention, log: SessionLog) -> Self {
        Self {
            dir: dir.into(),
            naming,
            log,
        }
    }
}

impl ScriptRepository for FsScriptCatalog {
    fn scan(&self) -> Result<Vec<ScriptEntry>, DiscoveryError> {
        scan(&self.dir, &self.naming, &self.log)
    }
}

pub fn scan(
    dir: &Path,
    naming: &NamingConvention,
    log: &SessionLog,
) -> Result<Vec<ScriptEntry>, DiscoveryError> {
    let entries = fs::read_dir(dir).map_err(|err| DiscoveryError::from_io(dir, err))?;

    let mut scripts = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log.append(&format!("Error listing {}: {}", dir.display(), err));
                tracing::warn!(
                    dir = %dir.display(),
                    error = %err,
                    "skipping unreadable directory entry"
                );
                continue;
            }
        };
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        if !naming.matches(&file_name) {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let path = absolute(path);
        let description = describe(&path, log);
        scripts.push(ScriptEntry::new(file_name, path, description));
    }

    scripts.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    let names: Vec<&str> = scripts.iter().map(|script| script.file_name.as_str()).collect();
    log.append(&format!("Scripts found: {:?}", names));
    tracing::debug!(dir = %dir.display(), count = scripts.len(), "catalog scanned");
    Ok(scripts)
}

fn describe(path: &Path, log: &SessionLog) -> String {
    match read_description(path) {
        Ok(Some(description)) => description,
        Ok(None) => NO_DESCRIPTION.to_string(),
        Err(err) => {
            log.append(&format!("Error reading comment from {}: {}", path.display(), err));
            tracing::warn!(script = %path.display(), error = %err, "description unreadable");
            NO_DESCRIPTION.to_string()
        }
    }
}

fn read_description(path: &Path) -> io::Result<Option<String>> {
    let file = fs::File::open(path)?;
    first_comment_line(BufReader::new(file).lines())
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}
