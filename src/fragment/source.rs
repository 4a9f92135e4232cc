//! Where fragment markup comes from.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a fragment could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("`{0}` not found")]
    NotFound(String),

    #[error("`{name}` answered with HTTP {status}")]
    Status { name: String, status: u16 },

    #[error("request for `{name}` failed")]
    Network {
        name: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no response within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("`{0}` is not a relative resource name")]
    InvalidName(String),

    #[error("cannot build a URL for `{name}`")]
    Url {
        name: String,
        #[source]
        source: url::ParseError,
    },
}

/// Retrieves raw fragment markup by resource name.
#[allow(async_fn_in_trait)]
pub trait FragmentSource {
    async fn fetch(&self, name: &str) -> Result<String, FetchError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// Fragments read from a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FragmentSource for DirSource {
    async fn fetch(&self, name: &str) -> Result<String, FetchError> {
        let path = self.root.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(markup) => Ok(markup),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(FetchError::NotFound(name.to_string()))
            }
            Err(source) => Err(FetchError::Io { path, source }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Fragments fetched with HTTP GET below a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(mut base: Url) -> Self {
        // `Url::join` replaces the last segment unless the path ends in `/`
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    /// URL a resource name resolves to.
    pub fn url_for(&self, name: &str) -> Result<Url, FetchError> {
        self.base.join(name).map_err(|source| FetchError::Url {
            name: name.to_string(),
            source,
        })
    }
}

impl FragmentSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<String, FetchError> {
        let url = self.url_for(name)?;
        let network = |source| FetchError::Network {
            name: name.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                reqwest::StatusCode::NOT_FOUND => FetchError::NotFound(name.to_string()),
                _ => FetchError::Status {
                    name: name.to_string(),
                    status: status.as_u16(),
                },
            });
        }
        response.text().await.map_err(network)
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// The configured source, chosen at startup.
#[derive(Debug, Clone)]
pub enum Source {
    Dir(DirSource),
    Http(HttpSource),
}

impl FragmentSource for Source {
    async fn fetch(&self, name: &str) -> Result<String, FetchError> {
        match self {
            Self::Dir(source) => source.fetch(name).await,
            Self::Http(source) => source.fetch(name).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Dir(source) => source.describe(),
            Self::Http(source) => source.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_dir_source_reads_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("header.html"), "<nav></nav>").unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.fetch("header.html").await.unwrap(), "<nav></nav>");
        assert!(matches!(
            source.fetch("footer.html").await,
            Err(FetchError::NotFound(name)) if name == "footer.html"
        ));
    }

    #[tokio::test]
    async fn test_dir_source_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("header.html")).unwrap();

        let source = Source::Dir(DirSource::new(dir.path()));
        assert!(matches!(
            source.fetch("header.html").await,
            Err(FetchError::Io { .. })
        ));
    }

    #[test]
    fn test_http_source_joins_below_base() {
        let source = HttpSource::new(Url::parse("https://example.com/partials").unwrap());
        assert_eq!(
            source.url_for("header.html").unwrap().as_str(),
            "https://example.com/partials/header.html"
        );

        let source = HttpSource::new(Url::parse("https://example.com").unwrap());
        assert_eq!(
            source.url_for("footer.html").unwrap().as_str(),
            "https://example.com/footer.html"
        );
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status {
            name: "header.html".into(),
            status: 500,
        };
        assert_eq!(err.to_string(), "`header.html` answered with HTTP 500");
        assert_eq!(
            FetchError::Timeout(Duration::from_millis(250)).to_string(),
            "no response within 250ms"
        );
    }
}
