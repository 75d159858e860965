use std::process::Command;
#[cfg(test)]
use std::sync::Mutex;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Hands a URL to something that can show it to the user
pub trait Launcher {
    fn open(&self, url: &Url) -> Result<()>;
}

/// Opens URLs in the user's default browser through the platform opener.
/// The opener is spawned and not waited on.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Launcher for SystemBrowser {
    fn open(&self, url: &Url) -> Result<()> {
        let mut command = opener_command(url.as_str())?;
        debug!("Launching browser with {:?}", command.get_program());

        command
            .spawn()
            .map(drop)
            .map_err(|e| Error::Launch(e.to_string()))
    }
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Result<Command> {
    let mut command = Command::new("open");
    command.arg(url);
    Ok(command)
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Result<Command> {
    let mut command = Command::new("cmd");
    command.args(["/c", "start", "", url]);
    Ok(command)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn opener_command(url: &str) -> Result<Command> {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    Ok(command)
}

#[cfg(not(any(unix, target_os = "windows")))]
fn opener_command(_url: &str) -> Result<Command> {
    Err(Error::Launch("Unsupported operating system".to_string()))
}

/// Launcher that only records what it was asked to open
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    opened: Mutex<Vec<Url>>,
}

#[cfg(test)]
impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<Url> {
        self.opened
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Launcher for RecordingLauncher {
    fn open(&self, url: &Url) -> Result<()> {
        self.opened
            .lock()
            .map_err(|e| Error::Launch(e.to_string()))?
            .push(url.clone());
        Ok(())
    }
}
