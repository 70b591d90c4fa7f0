//! Loopback Nominatim stand-in for tests

use footprint_geocoding::{NominatimClient, NominatimConfig};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

/// Search body for a single hit at `lat`, `lon`
pub fn hit(lat: f64, lon: f64) -> String {
    format!(r#"[{{"lat": "{lat}", "lon": "{lon}"}}]"#)
}

/// A client with default settings (one request per second) pointed at a
/// loopback server answering `bodies` in order, one per connection.
///
/// The handle yields the raw request lines.
pub fn nominatim_stub(bodies: Vec<String>) -> (NominatimClient, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = std::thread::spawn(move || {
        bodies
            .into_iter()
            .map(|body| {
                let (mut stream, _) = listener.accept().unwrap();
                stream.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
                let mut buf = [0u8; 4096];
                let n = stream.read(&mut buf).unwrap_or(0);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                request.lines().next().unwrap_or_default().to_string()
            })
            .collect()
    });

    let config = NominatimConfig::default().with_base_url(format!("http://127.0.0.1:{port}"));
    (NominatimClient::with_config(config).unwrap(), handle)
}
