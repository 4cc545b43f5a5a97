//! Fire-and-forget command delivery over one-shot TCP connections.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::{Command, DEFAULT_CONNECT_TIMEOUT_SECS};
use crate::errors::SendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAddress {
    pub host: String,
    pub port: u16,
}

impl DeviceAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into().trim().to_string(),
            port,
        }
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Sends each [`Command`] over a fresh connection. Nothing is read back and
/// nothing is retried.
#[derive(Debug, Clone)]
pub struct CommandSender {
    address: Option<DeviceAddress>,
    connect_timeout: Duration,
}

impl Default for CommandSender {
    fn default() -> Self {
        Self::new(None, Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
    }
}

impl CommandSender {
    pub fn new(address: Option<DeviceAddress>, connect_timeout: Duration) -> Self {
        Self {
            address: address.filter(|a| !a.host.is_empty()),
            connect_timeout,
        }
    }

    pub fn address(&self) -> Option<&DeviceAddress> {
        self.address.as_ref()
    }

    /// Replace the target address. A blank host clears it.
    pub fn set_address(&mut self, address: DeviceAddress) {
        self.address = Some(address).filter(|a| !a.host.is_empty());
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Write one command line and close the connection.
    pub async fn send(&self, command: &Command) -> Result<(), SendError> {
        let line = command.encode_line()?;
        let (mut stream, target) = self.connect().await?;
        debug!("-> {} {}", target, line.trim_end());

        match timeout(self.connect_timeout, stream.write_all(line.as_bytes())).await {
            Err(_) => {
                warn!("Write to {} timed out", target);
                return Err(SendError::Timeout {
                    addr: target,
                    secs: self.connect_timeout.as_secs(),
                });
            }
            Ok(Err(e)) => {
                warn!("Write to {} failed: {}", target, e);
                return Err(SendError::Write {
                    addr: target,
                    source: e,
                });
            }
            Ok(Ok(())) => {}
        }
        // Best-effort close; the payload is already handed to the kernel.
        let _ = stream.shutdown().await;
        info!("Sent {} to {}", command.name(), target);
        Ok(())
    }

    /// Open and immediately close a connection to check the device is listening.
    pub async fn probe(&self) -> Result<(), SendError> {
        let (stream, target) = self.connect().await?;
        drop(stream);
        info!("Device at {} accepted the connection", target);
        Ok(())
    }

    async fn connect(&self) -> Result<(TcpStream, String), SendError> {
        let addr = self.address.as_ref().ok_or(SendError::MissingAddress)?;
        let target = addr.to_string();
        match timeout(
            self.connect_timeout,
            TcpStream::connect((addr.host.as_str(), addr.port)),
        )
        .await
        {
            Err(_) => {
                warn!("Connection to {} timed out", target);
                Err(SendError::Timeout {
                    addr: target,
                    secs: self.connect_timeout.as_secs(),
                })
            }
            Ok(Err(e)) => {
                warn!("Connection to {} failed: {}", target, e);
                Err(SendError::Connect {
                    addr: target,
                    source: e,
                })
            }
            Ok(Ok(stream)) => Ok((stream, target)),
        }
    }
}
