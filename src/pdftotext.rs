use std::fs::read_to_string;
use std::io;
use std::path::Path;
use std::process::Command;

use tempfile::NamedTempFile;

/// Runs the `pdftotext` collaborator into a temp file and reads it back.
/// `layout` preserves the page's column layout, which some statement tables
/// need to survive extraction.
pub fn pdftotext(path: &Path, layout: bool) -> io::Result<String> {
    let temp_file = NamedTempFile::new()?;
    let mut command = Command::new("pdftotext");
    command.arg(path).arg(temp_file.path());
    if layout {
        command.arg("-layout");
    }
    let status = command.status()?;
    if !status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("pdftotext exited with {status}"),
        ));
    }
    read_to_string(temp_file.path())
}
