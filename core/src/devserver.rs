//! Dev-server launcher
//!
//! Spawns `npm run dev` in a project folder and watches its stdout for
//! the local URL, announcing it on the shared event channel.

use std::path::Path;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use filebot_protocol::{AgentEvent, ServerUrlEvent};

const URL_MARKER: &str = "http://localhost:";

/// Scan one chunk of process output for a local dev-server URL.
///
/// The port scanner is tolerant: digit runs shorter than 4 after the
/// marker are skipped and the scan continues, since bundlers often print
/// the marker in unrelated lines first.
pub fn find_port(data: &str) -> Option<u16> {
    let mut rest = data;
    while let Some(idx) = rest.find(URL_MARKER) {
        let after = &rest[idx + URL_MARKER.len()..];
        let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.len() >= 4
            && let Ok(port) = digits.parse::<u16>()
        {
            return Some(port);
        }
        rest = after;
    }
    None
}

/// Start `npm run dev` in `folder` and stream stdout until the first URL
/// appears. The child keeps running after the URL is announced; the
/// caller owns its lifetime through the returned handle.
pub fn launch(
    folder: &Path,
    events: UnboundedSender<AgentEvent>,
) -> std::io::Result<Child> {
    let mut child = Command::new("npm")
        .args(["run", "dev"])
        .current_dir(folder)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let Some(stdout) = child.stdout.take() else {
        return Ok(child);
    };

    info!(folder = %folder.display(), "dev server starting");
    tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        let mut announced = false;
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if !announced
                        && let Some(port) = find_port(&line)
                    {
                        announced = true;
                        let url = format!("{URL_MARKER}{port}");
                        info!(%url, "dev server ready");
                        let _ = events.send(AgentEvent::ServerUrl(ServerUrlEvent { url }));
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("dev server output read failed: {e}");
                    break;
                }
            }
        }
    });

    Ok(child)
}
