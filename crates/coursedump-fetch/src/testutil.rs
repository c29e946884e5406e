//! Test helpers for exercising the session against a real socket.

use std::io::{Read, Write};
use std::net::TcpListener;

/// Serve one canned HTTP response on a loopback port.
///
/// Returns the base URL of the listener. The listener accepts a single
/// connection and then shuts down, so a second request against the same
/// URL fails at the transport level.
pub(crate) fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 2048];
            let _ = stream.read(&mut request);
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/")
}
