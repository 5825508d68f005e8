use crate::config::Settings;
use crate::domain::ScriptEntry;
use crate::use_cases::SelectorService;
use crate::util::display_width;
use std::error::Error;
use std::io::Write;

pub fn run_list(
    service: &SelectorService,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let scripts = service.discover()?;
    let mut stdout = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &scripts)?;
        writeln!(stdout)?;
        return Ok(());
    }

    writeln!(stdout, "Scripts folder: {}", settings.scripts_dir.display())?;
    write_listing(&mut stdout, &scripts)?;
    Ok(())
}

fn write_listing(out: &mut dyn Write, scripts: &[ScriptEntry]) -> std::io::Result<()> {
    if scripts.is_empty() {
        return writeln!(out, "(no scripts found)");
    }
    let width = scripts
        .iter()
        .map(|script| display_width(&script.file_name))
        .max()
        .unwrap_or(0);
    for script in scripts {
        let padding = width - display_width(&script.file_name);
        writeln!(
            out,
            " - {}{}  {}",
            script.file_name,
            " ".repeat(padding),
            script.description
        )?;
    }
    Ok(())
}
