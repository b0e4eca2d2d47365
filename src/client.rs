//! TCP probe implementation and per-phase timing
//!
//! A probe is one connect → write → read cycle. The read phase expects
//! exactly as many bytes as were written, which matches echo-style targets;
//! a shorter response is a read failure, not a short answer.

use crate::{
    error::{AppError, Result},
    models::{Config, ProbeReport},
};
use std::{
    future::Future,
    io,
    time::{Duration, Instant},
};
use async_trait::async_trait;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    time::timeout,
};

/// Probe abstraction used by the runner and scenarios
#[async_trait]
pub trait Prober: Send + Sync {
    /// Perform exactly one connect/write/read cycle against `address`
    async fn probe(&self, address: &str, payload: &[u8]) -> Result<ProbeReport>;
}

/// Timeouts applied to the individual phases of a probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Upper bound for the connect phase
    pub connect_timeout: Option<Duration>,
    /// Upper bound for each of the write and read phases
    pub io_timeout: Option<Duration>,
}

impl ProbeSettings {
    /// Same limit for every phase
    pub fn with_timeout(limit: Option<Duration>) -> Self {
        Self {
            connect_timeout: limit,
            io_timeout: limit,
        }
    }
}

impl From<&Config> for ProbeSettings {
    fn from(config: &Config) -> Self {
        Self::with_timeout(config.timeout())
    }
}

/// Prober backed by a fresh `TcpStream` per call
#[derive(Debug, Clone, Default)]
pub struct TcpProber {
    settings: ProbeSettings,
}

impl TcpProber {
    pub fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, address: &str, payload: &[u8]) -> Result<ProbeReport> {
        let dial_start = Instant::now();
        let connected = within(self.settings.connect_timeout, TcpStream::connect(address)).await;
        let dial_duration = dial_start.elapsed();
        let mut stream = connected
            .map_err(|e| AppError::connection(format!("dial tcp {}: {}", address, e)))?;

        let write_start = Instant::now();
        let written = within(self.settings.io_timeout, stream.write_all(payload)).await;
        let write_duration = write_start.elapsed();
        written.map_err(|e| AppError::write(format!("write to {}: {}", address, e)))?;

        let mut response = vec![0u8; payload.len()];
        let read_start = Instant::now();
        let read = within(self.settings.io_timeout, stream.read_exact(&mut response)).await;
        let read_duration = read_start.elapsed();
        read.map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => AppError::read(format!(
                "read from {}: connection closed before {} bytes were received",
                address,
                payload.len()
            )),
            _ => AppError::read(format!("read from {}: {}", address, e)),
        })?;

        Ok(ProbeReport::new(response, dial_duration, write_duration, read_duration))
    }
}

/// Await `fut`, failing with `TimedOut` once `limit` elapses
async fn within<T, F>(limit: Option<Duration>, fut: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match limit {
        Some(limit) => timeout(limit, fut).await.map_err(|_| {
            io::Error::new(io::ErrorKind::TimedOut, format!("timed out after {:?}", limit))
        })?,
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Echo server that serves connections until the test ends
    async fn spawn_echo_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };
                tokio::spawn(async move {
                    let (mut reader, mut writer) = socket.split();
                    let _ = tokio::io::copy(&mut reader, &mut writer).await;
                });
            }
        });
        address
    }

    #[tokio::test]
    async fn test_probe_echo_round_trip() {
        let address = spawn_echo_server().await;
        let prober = TcpProber::default();

        let report = prober.probe(&address, b"hello world").await.unwrap();
        assert_eq!(report.response(), b"hello world");
        assert_eq!(
            report.response_time(),
            report.dial_duration() + report.write_duration() + report.read_duration()
        );
    }

    #[tokio::test]
    async fn test_probe_empty_payload() {
        let address = spawn_echo_server().await;
        let report = TcpProber::default().probe(&address, b"").await.unwrap();
        assert!(report.response().is_empty());
    }

    #[tokio::test]
    async fn test_probe_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let error = TcpProber::default().probe(&address, b"ping").await.unwrap_err();
        assert_eq!(error.category(), "CONNECT");
        assert!(error.to_string().contains(&address));
    }

    #[tokio::test]
    async fn test_probe_unresolvable_address() {
        let error = TcpProber::default().probe("not-an-address", b"ping").await.unwrap_err();
        assert_eq!(error.category(), "CONNECT");
    }

    #[tokio::test]
    async fn test_probe_short_response_is_read_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4];
            socket.read_exact(&mut buf).await.unwrap();
            socket.write_all(&buf[..2]).await.unwrap();
        });

        let error = TcpProber::default().probe(&address, b"ping").await.unwrap_err();
        assert_eq!(error.category(), "READ");
        assert!(error.to_string().contains("4 bytes"));
    }

    #[tokio::test]
    async fn test_probe_read_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let prober = TcpProber::new(ProbeSettings {
            connect_timeout: None,
            io_timeout: Some(Duration::from_millis(100)),
        });
        let error = prober.probe(&address, b"ping").await.unwrap_err();
        assert_eq!(error.category(), "READ");
        assert!(error.to_string().contains("timed out"));
    }

    /// Large enough to outgrow the loopback socket buffers
    const BULK_PAYLOAD: usize = 64 * 1024 * 1024;

    #[tokio::test]
    async fn test_probe_write_reset_is_write_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // Closing with unread data resets the connection
            drop(socket);
        });

        let prober = TcpProber::new(ProbeSettings::with_timeout(Some(Duration::from_secs(10))));
        let error = prober.probe(&address, &vec![b'x'; BULK_PAYLOAD]).await.unwrap_err();
        assert_eq!(error.category(), "WRITE");
        assert!(error.to_string().contains(&address));
        assert!(!error.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_probe_write_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let prober = TcpProber::new(ProbeSettings {
            connect_timeout: None,
            io_timeout: Some(Duration::from_millis(200)),
        });
        let error = prober.probe(&address, &vec![b'x'; BULK_PAYLOAD]).await.unwrap_err();
        assert_eq!(error.category(), "WRITE");
        assert!(error.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_within_times_out_pending_phase() {
        let limit = Some(Duration::from_millis(20));
        let error = within(limit, std::future::pending::<io::Result<()>>()).await.unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::TimedOut);
        assert!(error.to_string().contains("timed out after 20ms"));

        // Without a limit the phase runs to completion
        assert_eq!(within(None, async { Ok(7) }).await.unwrap(), 7);
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config::default();
        let settings = ProbeSettings::from(&config);
        assert_eq!(settings.connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(settings.io_timeout, Some(Duration::from_secs(10)));

        let config = Config { timeout_seconds: None, ..Default::default() };
        assert_eq!(ProbeSettings::from(&config), ProbeSettings::default());
    }
}
