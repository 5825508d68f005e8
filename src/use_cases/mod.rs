use crate::domain::error::DiscoveryError;
use crate::domain::{ScriptEntry, SessionSummary};
use crate::ports::{ScriptRepository, ScriptRunner};
use std::io::Write;

pub struct SelectorService {
    repo: Box<dyn ScriptRepository>,
    runner: Box<dyn ScriptRunner>,
}

impl SelectorService {
    pub fn new(repo: Box<dyn ScriptRepository>, runner: Box<dyn ScriptRunner>) -> Self {
        Self { repo, runner }
    }

    pub fn discover(&self) -> Result<Vec<ScriptEntry>, DiscoveryError> {
        self.repo.scan()
    }

    pub fn run_scripts(&self, scripts: &[ScriptEntry], out: &mut dyn Write) -> SessionSummary {
        self.runner.run(scripts, out)
    }
}
