//! TCP accept loop
//!
//! Binds once with an explicit configuration value and spawns one
//! independent task per accepted connection. Sessions own their sockets
//! outright; the listener keeps no handle to them and a failed session
//! affects nothing but itself.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};

use msp_delivery::Dispatcher;

use crate::config::{DaemonConfig, SessionSettings};
use crate::session::ConnectionSession;

pub struct Listener {
    listener: TcpListener,
    dispatcher: Dispatcher,
    session_settings: SessionSettings,
}

impl Listener {
    /// Bind the configured address. Port 0 is honored, so tests can bind an
    /// ephemeral port and read it back with [`Listener::local_addr`].
    pub async fn bind(config: &DaemonConfig, dispatcher: Dispatcher) -> io::Result<Self> {
        let listener = TcpListener::bind(config.listen.bind_address()).await?;
        Ok(Self {
            listener,
            dispatcher,
            session_settings: config.session.clone(),
        })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept forever. Individual accept failures are logged and the loop
    /// keeps serving; only runs out when the listener socket itself dies.
    pub async fn run(self) -> io::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    info!(%peer, "accepted connection");
                    let session = ConnectionSession::new(
                        stream,
                        peer,
                        self.dispatcher.clone(),
                        &self.session_settings,
                    );
                    tokio::spawn(session.run());
                }
                Err(error) => {
                    // Usually transient (file-descriptor pressure); back off
                    // briefly instead of spinning on the error.
                    warn!(%error, "accept failed");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
}
