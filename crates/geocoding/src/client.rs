//! Nominatim client implementation

use crate::config::NominatimConfig;
use crate::error::{GeocodeError, GeocodeResult};
use crate::geocoder::Geocoder;
use footprint_core::rate_limit::{RateLimitConfig, RateLimiter};
use footprint_geo::Coordinate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// A place returned by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Resolved position
    pub coordinate: Coordinate,
    /// Full name reported by the service
    pub display_name: Option<String>,
}

/// Raw search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// OpenStreetMap Nominatim client
///
/// This client wraps `reqwest` and adds:
/// - A client-side throttle honouring the Nominatim usage policy, which
///   delays requests rather than dropping them
/// - A mandatory User-Agent
/// - Request correlation IDs for tracing
///
/// Failed lookups are never retried.
#[derive(Clone)]
pub struct NominatimClient {
    inner: Client,
    config: Arc<NominatimConfig>,
    rate_limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for NominatimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl NominatimClient {
    /// Create a client for the public instance with default settings
    pub fn new() -> GeocodeResult<Self> {
        Self::with_config(NominatimConfig::default())
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: NominatimConfig) -> GeocodeResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| GeocodeError::config("user_agent is not a valid header value"))?,
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(GeocodeError::Request)?;

        let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig::per_second(
            config.requests_per_second,
        )));

        Ok(Self {
            inner,
            config: Arc::new(config),
            rate_limiter,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &NominatimConfig {
        &self.config
    }

    /// Search for a place, returning the best match if any
    #[instrument(skip(self), fields(request_id))]
    pub async fn search(&self, place: &str) -> GeocodeResult<Option<Place>> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());
        let limit_key = extract_host(&self.config.base_url);

        self.pace(&limit_key, &request_id).await?;

        let start = Instant::now();
        let response = self
            .inner
            .get(self.config.search_url())
            .header(X_REQUEST_ID, &request_id)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let body = self.handle_response(response).await?;
        let result = parse_search_response(&body)?;

        debug!(
            request_id = %request_id,
            elapsed_ms = start.elapsed().as_millis(),
            found = result.is_some(),
            "Geocoding lookup finished"
        );

        Ok(result)
    }

    /// Wait for a throttle token.
    ///
    /// Back-to-back lookups (origin then destination) are spaced out to the
    /// configured rate. A wait longer than the request timeout fails with
    /// [`GeocodeError::Throttled`] instead.
    async fn pace(&self, key: &str, request_id: &str) -> GeocodeResult<()> {
        while !self.rate_limiter.try_acquire(key) {
            let wait = self.rate_limiter.retry_after(key);
            if wait > self.config.timeout {
                warn!(
                    request_id = %request_id,
                    retry_after_ms = wait.as_millis(),
                    "Geocoding throttled"
                );
                return Err(GeocodeError::Throttled { retry_after: wait });
            }
            debug!(request_id = %request_id, wait_ms = wait.as_millis(), "Pacing geocoding request");
            tokio::time::sleep(wait).await;
        }
        Ok(())
    }

    /// Turn a non-success status into an error, otherwise return the body
    async fn handle_response(&self, response: Response) -> GeocodeResult<String> {
        let status = response.status();

        if status.is_success() {
            response.text().await.map_err(|e| self.classify(e))
        } else {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            Err(GeocodeError::http(status.as_u16(), message))
        }
    }

    fn classify(&self, err: reqwest::Error) -> GeocodeError {
        if err.is_timeout() {
            GeocodeError::Timeout(self.config.timeout)
        } else {
            GeocodeError::Request(err)
        }
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, place: &str) -> GeocodeResult<Option<Coordinate>> {
        Ok(self.search(place).await?.map(|p| p.coordinate))
    }

    fn name(&self) -> &'static str {
        "nominatim"
    }
}

/// Parse a `format=json` search response body
pub fn parse_search_response(body: &str) -> GeocodeResult<Option<Place>> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)?;

    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };

    let lat: f64 = hit
        .lat
        .trim()
        .parse()
        .map_err(|_| GeocodeError::MalformedResponse(format!("Invalid latitude: {}", hit.lat)))?;
    let lon: f64 = hit
        .lon
        .trim()
        .parse()
        .map_err(|_| GeocodeError::MalformedResponse(format!("Invalid longitude: {}", hit.lon)))?;
    let coordinate = Coordinate::try_new(lat, lon)
        .map_err(|e| GeocodeError::MalformedResponse(e.to_string()))?;

    Ok(Some(Place {
        coordinate,
        display_name: hit.display_name,
    }))
}

/// Host part of a URL, used as the throttle key
fn extract_host(url: &str) -> String {
    url.split("://")
        .nth(1)
        .and_then(|rest| rest.split(['/', '?']).next())
        .filter(|host| !host.is_empty())
        .unwrap_or("default")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    /// Serve one canned HTTP response on a loopback port and return the port
    /// plus a handle yielding the raw request text.
    fn serve_once(status: &str, body: &str) -> (u16, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap_or(0);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });

        (port, handle)
    }

    fn local_client(port: u16) -> NominatimClient {
        NominatimClient::with_config(NominatimConfig::local(port)).unwrap()
    }

    #[test]
    fn test_extract_host() {
        assert_eq!(
            extract_host("https://nominatim.openstreetmap.org/search?q=x"),
            "nominatim.openstreetmap.org"
        );
        assert_eq!(extract_host("http://127.0.0.1:8080"), "127.0.0.1:8080");
        assert_eq!(extract_host("not a url"), "default");
    }

    #[test]
    fn test_parse_hit() {
        let body = r#"[{"place_id": 1, "lat": "40.4167047", "lon": "-3.7035825", "display_name": "Madrid, Comunidad de Madrid, España"}]"#;
        let place = parse_search_response(body).unwrap().unwrap();
        assert!((place.coordinate.latitude - 40.4167047).abs() < 1e-9);
        assert!((place.coordinate.longitude + 3.7035825).abs() < 1e-9);
        assert!(place.display_name.unwrap().starts_with("Madrid"));
    }

    #[test]
    fn test_parse_no_match() {
        assert!(parse_search_response("[]").unwrap().is_none());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_search_response(r#"{"error": "nope"}"#),
            Err(GeocodeError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_search_response(r#"[{"lat": "north", "lon": "1.0"}]"#),
            Err(GeocodeError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_search_response(r#"[{"lat": "95.0", "lon": "1.0"}]"#),
            Err(GeocodeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_client_creation() {
        assert!(NominatimClient::new().is_ok());
        let bad = NominatimConfig::default().with_user_agent("bad\nagent");
        assert!(NominatimClient::with_config(bad).is_err());
    }

    #[tokio::test]
    async fn test_search_sends_query_and_headers() {
        let (port, server) = serve_once(
            "200 OK",
            r#"[{"lat": "41.3828939", "lon": "2.1774322", "display_name": "Barcelona"}]"#,
        );
        let client = local_client(port);

        let coord = client.geocode("Barcelona").await.unwrap().unwrap();
        assert!((coord.latitude - 41.3828939).abs() < 1e-9);

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /search?"));
        assert!(request.contains("q=Barcelona"));
        assert!(request.contains("format=json"));
        assert!(request.contains("limit=1"));
        let lower = request.to_lowercase();
        assert!(lower.contains("user-agent: rojo-footprint/"));
        assert!(lower.contains("x-request-id: "));
    }

    #[tokio::test]
    async fn test_search_no_match() {
        let (port, server) = serve_once("200 OK", "[]");
        let client = local_client(port);

        assert!(client.geocode("Atlantis").await.unwrap().is_none());
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let (port, server) = serve_once("503 Service Unavailable", "overloaded");
        let client = local_client(port);

        let err = client.geocode("Madrid").await.unwrap_err();
        match err {
            GeocodeError::Http { status, ref message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.is_transient());
        server.join().unwrap();
    }

    /// Serve canned 200 responses, one connection each, in order
    fn serve_sequence(bodies: Vec<&'static str>) -> (u16, std::thread::JoinHandle<Vec<String>>) {
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
                    String::from_utf8_lossy(&buf[..n]).to_string()
                })
                .collect()
        });

        (port, handle)
    }

    #[tokio::test]
    async fn test_second_request_is_paced_not_rejected() {
        let (port, server) = serve_sequence(vec![
            r#"[{"lat": "40.4168", "lon": "-3.7038"}]"#,
            r#"[{"lat": "41.3874", "lon": "2.1686"}]"#,
        ]);
        let config = NominatimConfig::default().with_base_url(format!("http://127.0.0.1:{port}"));
        assert_eq!(config.requests_per_second, 1);
        let client = NominatimClient::with_config(config).unwrap();

        let start = Instant::now();
        assert!(client.geocode("Madrid").await.unwrap().is_some());
        assert!(client.geocode("Barcelona").await.unwrap().is_some());
        assert!(start.elapsed() >= Duration::from_millis(900));

        let requests = server.join().unwrap();
        assert!(requests[0].contains("q=Madrid"));
        assert!(requests[1].contains("q=Barcelona"));
    }

    #[tokio::test]
    async fn test_throttle_rejects_wait_beyond_timeout() {
        let (port, server) = serve_once("200 OK", "[]");
        let config = NominatimConfig::local(port)
            .with_requests_per_second(1)
            .with_timeout(Duration::from_millis(200));
        let client = NominatimClient::with_config(config).unwrap();

        assert!(client.geocode("Madrid").await.unwrap().is_none());
        server.join().unwrap();

        let err = client.geocode("Barcelona").await.unwrap_err();
        assert!(matches!(err, GeocodeError::Throttled { .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        // Bind then drop to get a port with nothing listening
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = local_client(port);

        let err = client.geocode("Madrid").await.unwrap_err();
        assert!(matches!(err, GeocodeError::Request(_)));
    }
}
