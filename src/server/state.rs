//! Server state and configuration.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::error::KuitansiError;
use crate::ledger::UuidSource;
use crate::session::{PrintFacility, ReceiptSession, ShareFacility};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Application state shared across handlers.
///
/// One editing session per server instance: the receipt lives only in
/// memory for the lifetime of the process. Handlers serialize through the
/// session lock, so core operations run one at a time.
pub struct AppState {
    pub config: ServerConfig,
    pub session: RwLock<ReceiptSession>,
    pub print: Mutex<Box<dyn PrintFacility + Send>>,
    pub share: Mutex<Box<dyn ShareFacility + Send>>,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_facilities(config, Box::new(HostPrint), Box::new(HostShare))
    }

    /// Construct with explicit facilities (tests use stubs).
    pub fn with_facilities(
        config: ServerConfig,
        print: Box<dyn PrintFacility + Send>,
        share: Box<dyn ShareFacility + Send>,
    ) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let session = ReceiptSession::new(
            Box::new(UuidSource),
            Local::now().date_naive(),
        );
        Self {
            config,
            session: RwLock::new(session),
            print: Mutex::new(print),
            share: Mutex::new(share),
            boot_time,
        }
    }
}

/// Default print facility: printing happens in the client's native print
/// dialog, so the server side only acknowledges the request.
pub struct HostPrint;

impl PrintFacility for HostPrint {
    fn print(&mut self) -> Result<(), KuitansiError> {
        info!("print handed to the host environment");
        Ok(())
    }
}

/// Default share facility: a headless host has no native share sheet, so
/// sharing reports as unsupported rather than failing silently.
pub struct HostShare;

impl ShareFacility for HostShare {
    fn is_supported(&self) -> bool {
        false
    }

    fn share(&mut self, _title: &str, _text: &str) -> Result<(), KuitansiError> {
        Err(KuitansiError::ShareUnsupported)
    }
}
