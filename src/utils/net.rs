//! Network helpers

use std::net::{IpAddr, Ipv4Addr};

use tokio::net::UdpSocket;
use tracing::debug;

/// Address of the interface used for outbound traffic.
///
/// Connecting a UDP socket only selects a route, no packet is sent. Any
/// failure falls back to the loopback address.
pub async fn local_ip(probe_addr: &str) -> IpAddr {
    match probe(probe_addr).await {
        Ok(ip) => ip,
        Err(e) => {
            debug!("Outbound IP probe via {} failed: {}", probe_addr, e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

async fn probe(probe_addr: &str) -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.connect(probe_addr).await?;
    Ok(socket.local_addr()?.ip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unresolvable_probe_falls_back_to_loopback() {
        let ip = local_ip("not a socket address").await;
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_loopback_probe() {
        let ip = local_ip("127.0.0.1:9").await;
        assert!(ip.is_loopback());
    }
}
