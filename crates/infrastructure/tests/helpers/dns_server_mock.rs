#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream replies to each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Echo the question and append one A record per query received so far,
    /// pointing back at the question name: the first query gets 10.0.0.1,
    /// the second 10.0.0.2, and so on.
    Answer,
    /// Reply correctly but with the ID bits flipped.
    WrongId,
    /// Reply with a datagram too short to hold a header.
    Garbage,
    /// Never reply.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let received = Arc::new(Mutex::new(Vec::new()));
        let received_by_task = Arc::clone(&received);
        let counter = AtomicUsize::new(0);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let query = buf[..len].to_vec();
                            received_by_task.lock().unwrap().push(query.clone());

                            let sequence = counter.fetch_add(1, Ordering::SeqCst) + 1;
                            let response = match behavior {
                                MockBehavior::Answer => {
                                    Self::build_mock_response(&query, Self::address_for(sequence))
                                }
                                MockBehavior::WrongId => {
                                    let mut response =
                                        Self::build_mock_response(&query, Self::address_for(sequence));
                                    if response.len() >= 2 {
                                        response[0] ^= 0xff;
                                        response[1] ^= 0xff;
                                    }
                                    response
                                }
                                MockBehavior::Garbage => {
                                    let mut response = query[..2.min(query.len())].to_vec();
                                    response.extend_from_slice(&[0x81, 0x80, 0x00]);
                                    response
                                }
                                MockBehavior::Silent => continue,
                            };
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Raw datagrams received so far, in arrival order.
    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    pub fn address_for(sequence: usize) -> Ipv4Addr {
        Ipv4Addr::new(10, 0, 0, sequence as u8)
    }

    fn build_mock_response(query: &[u8], address: Ipv4Addr) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);

        response.extend_from_slice(&query[0..2]);

        response.push(0x81);
        response.push(0x80);

        response.extend_from_slice(&query[4..6]);

        response.extend_from_slice(&[0x00, 0x01]);

        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&[0x00, 0x00]);

        if query.len() > 12 {
            response.extend_from_slice(&query[12..]);
        }

        response.extend_from_slice(&[
            0xc0, 0x0c, // pointer to the question name
            0x00, 0x01, // A
            0x00, 0x01, // IN
            0x00, 0x00, 0x00, 0x3c, // TTL 60
            0x00, 0x04,
        ]);
        response.extend_from_slice(&address.octets());

        response
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
