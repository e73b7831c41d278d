use crate::config::Config;
use crate::constants::*;
use crate::error::Result;
use crate::types::Color;
use attohttpc::body::Bytes;
use attohttpc::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::Error as _;
use std::time::Duration;

/// Which source drives the strip on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Follow the album art of the current Spotify track.
    Spotify,
    Manual,
}

impl Mode {
    pub fn path(&self) -> &'static str {
        match self {
            Mode::Spotify => SPOTIFY_PATH,
            Mode::Manual => MANUAL_PATH,
        }
    }
}

pub trait ColorEndpoint: Send + Sync {
    /// `GET /color`, resolved to the color the picker should start with.
    fn fetch(&self) -> Result<Color>;

    /// `POST /color`. The response body and status are not inspected.
    fn push(&self, color: Color) -> Result<()>;

    /// `GET /off`: stops any Spotify sync and blanks the strip.
    fn off(&self) -> Result<()>;

    fn mode(&self, mode: Mode) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ColorResponse {
    data: ColorData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColorData {
    r: Option<i32>,
    g: Option<i32>,
    b: Option<i32>,
}

/// Parses a `GET /color` body.
///
/// A missing or null `r` means the server has no color yet, and the whole
/// triple falls back to black regardless of what `g` and `b` hold.
pub fn parse_initial(body: &str) -> Result<Color> {
    let response: ColorResponse = serde_json::from_str(body)?;
    let ColorData { r, g, b } = response.data;

    let Some(r) = r else {
        return Ok(Color::BLACK);
    };

    match (g, b) {
        (Some(g), Some(b)) => Ok(Color::new(r, g, b)),
        _ => Err(serde_json::Error::custom("`g` and `b` must be numbers when `r` is set").into()),
    }
}

pub struct HttpColorClient {
    server: String,
    timeout: Duration,
}

impl HttpColorClient {
    pub fn new(server: &str, timeout: Duration) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.server, config.timeout())
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server, path)
    }

    fn touch(&self, path: &str) -> Result<()> {
        attohttpc::get(self.url(path))
            .timeout(self.timeout)
            .send()?;
        Ok(())
    }
}

impl ColorEndpoint for HttpColorClient {
    fn fetch(&self) -> Result<Color> {
        let url = self.url(COLOR_PATH);
        let response = attohttpc::get(&url)
            .timeout(self.timeout)
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        log::trace!("GET {} -> {}", url, body);
        parse_initial(&body)
    }

    fn push(&self, color: Color) -> Result<()> {
        let body = serde_json::to_vec(&color)?;
        attohttpc::post(self.url(COLOR_PATH))
            .timeout(self.timeout)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Bytes(body))
            .send()?;
        Ok(())
    }

    fn off(&self) -> Result<()> {
        self.touch(OFF_PATH)
    }

    fn mode(&self, mode: Mode) -> Result<()> {
        self.touch(mode.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rstest::rstest;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    struct Captured {
        request_line: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl Captured {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    /// Serves exactly one request with `status` and `body`, then hands back
    /// what the client sent.
    fn one_shot_server(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    headers.push((k.trim().to_string(), v.trim().to_string()));
                }
            }

            let len = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .map(|(_, v)| v.parse::<usize>().unwrap())
                .unwrap_or(0);
            let mut raw = vec![0; len];
            reader.read_exact(&mut raw).unwrap();

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();

            Captured {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(raw).unwrap(),
            }
        });

        (url, handle)
    }

    #[rstest]
    #[case(r#"{"data":{"r":null,"g":10,"b":20}}"#, Color::BLACK)]
    #[case(r#"{"data":{"g":10,"b":20}}"#, Color::BLACK)]
    #[case(r#"{"data":{"r":null,"g":null,"b":null}}"#, Color::BLACK)]
    #[case(r#"{"data":{"r":5,"g":10,"b":20}}"#, Color::new(5, 10, 20))]
    #[case(r#"{"status":"current","data":{"r":0,"g":255,"b":7}}"#, Color::new(0, 255, 7))]
    #[case(r#"{"data":{"r":300,"g":-1,"b":20}}"#, Color::new(300, -1, 20))]
    fn initial_color(#[case] body: &str, #[case] expected: Color) {
        assert_eq!(parse_initial(body).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("<html>oops</html>")]
    #[case(r#"{"status":"current"}"#)]
    #[case(r#"{"data":{"r":5,"g":null,"b":20}}"#)]
    #[case(r#"{"data":{"r":"red","g":1,"b":2}}"#)]
    fn malformed_bodies(#[case] body: &str) {
        assert!(matches!(parse_initial(body), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn fetch_reads_the_server_color() {
        let (url, server) = one_shot_server("200 OK", r#"{"status":"current","data":{"r":5,"g":10,"b":20}}"#);
        let client = HttpColorClient::new(&url, Duration::from_secs(5));

        assert_eq!(client.fetch().unwrap(), Color::new(5, 10, 20));

        let captured = server.join().unwrap();
        assert_eq!(captured.request_line, "GET /color HTTP/1.1");
    }

    #[test]
    fn fetch_rejects_error_status() {
        let (url, server) = one_shot_server("500 Internal Server Error", "{}");
        let client = HttpColorClient::new(&url, Duration::from_secs(5));

        assert!(matches!(client.fetch(), Err(Error::Http(_))));
        server.join().unwrap();
    }

    #[test]
    fn fetch_reports_unreachable_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = HttpColorClient::new(&url, Duration::from_secs(1));
        assert!(matches!(client.fetch(), Err(Error::Http(_))));
    }

    #[test]
    fn push_posts_json_triple() {
        let (url, server) = one_shot_server("200 OK", r#"{"status":"updating"}"#);
        let client = HttpColorClient::new(&url, Duration::from_secs(5));

        client.push(Color::new(1, 2, 3)).unwrap();

        let captured = server.join().unwrap();
        assert_eq!(captured.request_line, "POST /color HTTP/1.1");
        assert_eq!(captured.header("content-type"), Some(JSON_CONTENT_TYPE));
        assert_eq!(captured.body, r#"{"r":1,"g":2,"b":3}"#);
    }

    #[test]
    fn trailing_slash_on_server_is_dropped() {
        let client = HttpColorClient::new("http://ledpi.local:5000/", Duration::from_secs(1));
        assert_eq!(client.server(), "http://ledpi.local:5000");
        assert_eq!(client.url(COLOR_PATH), "http://ledpi.local:5000/color");
    }

    #[test]
    fn off_requests_the_off_route() {
        let (url, server) = one_shot_server("200 OK", "<html></html>");
        let client = HttpColorClient::new(&url, Duration::from_secs(5));

        client.off().unwrap();

        let captured = server.join().unwrap();
        assert_eq!(captured.request_line, "GET /off HTTP/1.1");
    }

    #[rstest]
    #[case(Mode::Spotify, "GET /spotify HTTP/1.1")]
    #[case(Mode::Manual, "GET /manual HTTP/1.1")]
    fn mode_switch_requests_its_route(#[case] mode: Mode, #[case] request_line: &str) {
        let (url, server) = one_shot_server("200 OK", "<html></html>");
        let client = HttpColorClient::new(&url, Duration::from_secs(5));

        client.mode(mode).unwrap();

        let captured = server.join().unwrap();
        assert_eq!(captured.request_line, request_line);
    }

    #[test]
    fn push_ignores_response_status() {
        let (url, server) = one_shot_server("500 Internal Server Error", "");
        let client = HttpColorClient::new(&url, Duration::from_secs(5));

        assert!(client.push(Color::BLACK).is_ok());
        server.join().unwrap();
    }
}
