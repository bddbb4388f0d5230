//! Cloudflared process supervision
//!
//! Spawns `cloudflared tunnel run --token <token>` and watches its log
//! output for the first registered connection, which carries the public
//! endpoint descriptor. The connected event is consumed exactly once at
//! startup; afterwards the remaining log lines are forwarded in the
//! background until shutdown kills the child.

use crate::logger;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, Command};

/// Log line marker cloudflared emits once a relay connection is registered
const REGISTERED_MARKER: &str = "Registered tunnel connection";

/// Public endpoint descriptor parsed from the registration log line
#[derive(Debug, Clone, Serialize)]
pub struct Connection {
    pub id: String,
    pub ip: String,
    pub location: String,
}

#[derive(Debug)]
pub enum TunnelError {
    /// Spawning or reading from the cloudflared child failed
    Io(std::io::Error),
    /// cloudflared exited before registering a connection
    Closed,
}

impl fmt::Display for TunnelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cloudflared process error: {e}"),
            Self::Closed => write!(f, "cloudflared exited before the tunnel connected"),
        }
    }
}

impl std::error::Error for TunnelError {}

/// Handle to a running cloudflared tunnel session
pub struct Tunnel {
    child: Child,
    lines: Option<Lines<BufReader<ChildStderr>>>,
}

impl Tunnel {
    /// Spawn cloudflared with a tunnel token. cloudflared writes its log
    /// to stderr, which is piped for connection detection.
    pub fn with_token(bin: &Path, token: &str) -> Result<Self, TunnelError> {
        let mut child = Command::new(bin)
            .args(["tunnel", "run", "--token", token])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(TunnelError::Io)?;

        let stderr = child.stderr.take().ok_or(TunnelError::Closed)?;
        Ok(Self {
            child,
            lines: Some(BufReader::new(stderr).lines()),
        })
    }

    /// Block until cloudflared registers its first relay connection.
    ///
    /// Reads log lines, forwarding each, until one parses as a
    /// registration. An exhausted log stream means the child died before
    /// connecting.
    pub async fn wait_connected(&mut self) -> Result<Connection, TunnelError> {
        let lines = self.lines.as_mut().ok_or(TunnelError::Closed)?;
        while let Some(line) = lines.next_line().await.map_err(TunnelError::Io)? {
            logger::log_tunnel(&line);
            if let Some(connection) = parse_registration(&line) {
                return Ok(connection);
            }
        }
        Err(TunnelError::Closed)
    }

    /// Keep forwarding cloudflared log output on a background task
    pub fn forward_logs(&mut self) {
        if let Some(mut lines) = self.lines.take() {
            tokio::spawn(async move {
                while let Ok(Some(line)) = lines.next_line().await {
                    logger::log_tunnel(&line);
                }
            });
        }
    }

    /// Tear down the tunnel session
    pub async fn stop(&mut self) {
        if let Err(e) = self.child.kill().await {
            logger::log_warning(&format!("Failed to stop cloudflared: {e}"));
        }
    }
}

/// Parse a registration log line into a connection descriptor.
///
/// Expected shape:
/// `... INF Registered tunnel connection connIndex=0 connection=<uuid> ip=<addr> location=<colo> ...`
pub fn parse_registration(line: &str) -> Option<Connection> {
    let idx = line.find(REGISTERED_MARKER)?;
    let fields = &line[idx + REGISTERED_MARKER.len()..];

    let mut id = None;
    let mut ip = None;
    let mut location = None;
    for pair in fields.split_whitespace() {
        match pair.split_once('=') {
            Some(("connection", v)) => id = Some(v.to_string()),
            Some(("ip", v)) => ip = Some(v.to_string()),
            Some(("location", v)) => location = Some(v.to_string()),
            _ => {}
        }
    }

    Some(Connection {
        id: id?,
        ip: ip.unwrap_or_default(),
        location: location.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registration_line() {
        let line = "2024-06-01T12:00:00Z INF Registered tunnel connection \
                    connIndex=0 connection=7d3a4b2c-aaaa-bbbb-cccc-000011112222 \
                    ip=198.41.200.23 location=ams08 protocol=quic";
        let conn = parse_registration(line).unwrap();
        assert_eq!(conn.id, "7d3a4b2c-aaaa-bbbb-cccc-000011112222");
        assert_eq!(conn.ip, "198.41.200.23");
        assert_eq!(conn.location, "ams08");
    }

    #[test]
    fn test_parse_registration_without_ip() {
        let line = "INF Registered tunnel connection connIndex=1 \
                    connection=abc location=atl01";
        let conn = parse_registration(line).unwrap();
        assert_eq!(conn.id, "abc");
        assert_eq!(conn.ip, "");
        assert_eq!(conn.location, "atl01");
    }

    #[test]
    fn test_unrelated_lines_do_not_parse() {
        assert!(parse_registration("INF Starting tunnel tunnelID=xyz").is_none());
        assert!(parse_registration("").is_none());
        // Marker present but no connection field
        assert!(parse_registration("INF Registered tunnel connection connIndex=0").is_none());
    }

    #[test]
    fn test_connection_serializes_to_json() {
        let conn = Connection {
            id: "abc".to_string(),
            ip: "1.2.3.4".to_string(),
            location: "ams08".to_string(),
        };
        let json = serde_json::to_string(&conn).unwrap();
        assert_eq!(json, r#"{"id":"abc","ip":"1.2.3.4","location":"ams08"}"#);
    }
}
