use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

/// Spawns the Chrome process a session then attaches to over the debugging
/// port.
///
/// The child is a plain `std::process` spawn: the CLI exiting never tears
/// down the browser, so the operator can keep the filled form open.
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    initial_url: Option<String>,
    debugging_port: u16,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, initial_url: Option<String>) -> Self {
        Self {
            chrome_path,
            profile_path,
            initial_url,
            debugging_port: 9222,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.debugging_port = port;
        self
    }

    /// Launch the Chrome process.
    pub fn launch(&self) -> Result<Child> {
        let args = self.build_args();
        tracing::debug!(
            "Launching {} {}",
            self.chrome_path.display(),
            args.join(" ")
        );

        Command::new(&self.chrome_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {e}")))
    }

    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debugging_port),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            format!("--user-data-dir={}", self.profile_path.display()),
        ];

        // Bare hosts get a scheme so Chrome does not treat them as a search.
        if let Some(url) = &self.initial_url {
            let url = if !url.starts_with("http://") && !url.starts_with("https://") {
                format!("https://{url}")
            } else {
                url.clone()
            };
            args.push(url);
        } else {
            args.push("about:blank".to_string());
        }

        args
    }

    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher(url: Option<&str>) -> ChromeLauncher {
        ChromeLauncher::new(
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/tmp/profile"),
            url.map(str::to_string),
        )
    }

    #[test]
    fn test_args_carry_port_profile_and_url() {
        let args = launcher(Some("https://inserisci.subito.it/")).with_port(9229).build_args();

        assert!(args.contains(&"--remote-debugging-port=9229".to_string()));
        assert!(args.contains(&"--no-first-run".to_string()));
        assert!(args.contains(&"--no-default-browser-check".to_string()));
        assert!(args.contains(&"--user-data-dir=/tmp/profile".to_string()));
        assert!(args.contains(&"https://inserisci.subito.it/".to_string()));
    }

    #[test]
    fn test_bare_host_gets_https_scheme() {
        let args = launcher(Some("inserisci.subito.it")).build_args();
        assert!(args.contains(&"https://inserisci.subito.it".to_string()));
    }

    #[test]
    fn test_no_url_opens_blank_tab() {
        let args = launcher(None).build_args();
        assert!(args.contains(&"about:blank".to_string()));
        assert!(args.contains(&"--remote-debugging-port=9222".to_string()));
    }
}
