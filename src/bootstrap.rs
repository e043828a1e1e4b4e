use std::{
    fs,
    io::{self, Write},
    path::Path,
    thread,
    time::Duration,
};

use crate::error::SetupError;

const FLOPPY: &str = r"

		___________________________.
		|;;|                     |;;||
		|[]|---------------------|[]||
		|;;|                     |;;||
		|;;|                     |;;||
		|;;|                     |;;||
		|;;|                     |;;||
		|;;|                     |;;||
		|;;|                     |;;||
		|;;|_____________________|;;||
		|;;;;;;;;;;;;;;;;;;;;;;;;;;;||
		|;;;;;;_______________ ;;;;;||
		|;;;;;|  ___          |;;;;;||
		|;;;;;| |;;;|         |;;;;;||
		|;;;;;| |;;;|         |;;;;;||
		|;;;;;| |;;;|         |;;;;;||
		|;;;;;| |;;;|         |;;;;;||
		|;;;;;| |___|         |;;;;;||
		\_____|_______________|_____||
		 ~~~~~^^^^^^^^^^^^^^^^^~~~~~~ 


";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bootstrap {
    Existing,
    Created,
}

/// How the first-run creation is announced on stdout.
#[derive(Clone, Copy, Debug)]
pub struct Announce {
    pub enabled: bool,
    pub pause: Duration,
}

impl Default for Announce {
    fn default() -> Self {
        Self {
            enabled: true,
            pause: Duration::from_secs(1),
        }
    }
}

pub fn ensure_database(
    path: &Path,
    announce: Announce,
    out: &mut impl Write,
) -> Result<Bootstrap, SetupError> {
    writeln!(out, "Database directory: {}", path.display())?;

    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(Bootstrap::Existing),
        Ok(_) => return Err(SetupError::NotADirectory(path.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }

    create_dir(path).map_err(|source| SetupError::CreateDatabase {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "created database directory");

    if announce.enabled {
        writeln!(out, "Creating new database ...")?;
        out.flush()?;
        thread::sleep(announce.pause);
        write!(out, "{FLOPPY}")?;
        writeln!(out, "DONE! LET'S GET STARTED")?;
        out.flush()?;
        thread::sleep(announce.pause);
    }
    Ok(Bootstrap::Created)
}

#[cfg(unix)]
fn create_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> io::Result<()> {
    fs::DirBuilder::new().create(path)
}
