use crate::adapters::session_log::SessionLog;
use crate::domain::{NamingConvention, ScriptEntry};
use crate::summary;
use crate::use_cases::SelectorService;
use std::error::Error;

pub fn run_named(
    service: &SelectorService,
    naming: &NamingConvention,
    names: &[String],
    log: &SessionLog,
) -> Result<(), Box<dyn Error>> {
    let catalog = service.discover()?;
    let scripts = resolve_names(&catalog, naming, names)?;

    let mut stdout = std::io::stdout();
    let summary = service.run_scripts(&scripts, &mut stdout);
    for line in summary::log_lines(&summary) {
        log.append(&line);
    }
    Ok(())
}

/// Map each requested name to a catalog entry, keeping the requested order.
/// A name may omit the configured extension.
pub fn resolve_names(
    catalog: &[ScriptEntry],
    naming: &NamingConvention,
    names: &[String],
) -> Result<Vec<ScriptEntry>, Box<dyn Error>> {
    let mut resolved = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        let with_extension = format!("{}{}", name, naming.extension);
        match catalog
            .iter()
            .find(|entry| entry.file_name == *name || entry.file_name == with_extension)
        {
            Some(entry) => resolved.push(entry.clone()),
            None => missing.push(name.as_str()),
        }
    }

    if !missing.is_empty() {
        return Err(format!("Script not found: {}", missing.join(", ")).into());
    }
    Ok(resolved)
}
