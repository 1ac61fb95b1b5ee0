//! Fetching a page together with its `robots.txt` and `llms.txt`
//!
//! Only public http(s) hosts are fetched. Hosts that are, or resolve to,
//! loopback, private, link-local or otherwise internal addresses are refused.
//! Redirect targets are re-checked against the same rule, and every name the
//! client connects to goes through [`PublicResolver`].

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use hyper::client::connect::dns::Name;
use metalens_core::url_utils::well_known_url;
use reqwest::dns::{Addrs, Resolve, Resolving};
use reqwest::{Client, StatusCode, redirect};
use thiserror::Error;
use url::{Host, Url};

use crate::VERSION;

/// Response bodies larger than this are rejected
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_REDIRECTS: usize = 5;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme '{0}' (only http and https are allowed)")]
    UnsupportedScheme(String),

    /// The host is local or private and must not be fetched.
    #[error("Refusing to fetch {0}: host is not publicly routable")]
    BlockedHost(String),

    #[error("Could not resolve host {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Response body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 5,
            user_agent: format!("metalens/{VERSION} (+https://github.com/pondevelopment/metalens)"),
        }
    }
}

/// A fetched page plus whichever well-known files could be retrieved
#[derive(Debug)]
pub struct FetchedSite {
    /// Address after redirects
    pub final_url: Url,
    pub html: String,
    pub robots_txt: Option<String>,
    pub llms_txt: Option<String>,
}

/// Fetch the page, `robots.txt` and `llms.txt` concurrently.
///
/// Only a failure on the page itself is an error; the two well-known files
/// come back as `None` when they are missing or unreachable.
pub async fn fetch_site(url: &str, config: &FetchConfig) -> Result<FetchedSite, FetchError> {
    let target = parse_target(url)?;
    ensure_public_host(&target).await?;

    let client = build_client(config)?;
    let robots_url = well_known_url(target.as_str(), "robots.txt");
    let llms_url = well_known_url(target.as_str(), "llms.txt");

    let (page, robots_txt, llms_txt) = tokio::join!(
        fetch_text(&client, target.clone(), config),
        fetch_optional(&client, robots_url, config),
        fetch_optional(&client, llms_url, config),
    );
    let (final_url, html) = page?;

    log::debug!(
        "Fetched {} ({} bytes), robots.txt: {}, llms.txt: {}",
        final_url,
        html.len(),
        robots_txt.is_some(),
        llms_txt.is_some()
    );

    Ok(FetchedSite {
        final_url,
        html,
        robots_txt,
        llms_txt,
    })
}

fn parse_target(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    if parsed.host().is_none() {
        return Err(FetchError::InvalidUrl(format!("{url} has no host")));
    }

    Ok(parsed)
}

fn build_client(config: &FetchConfig) -> Result<Client, FetchError> {
    let policy = redirect::Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error(format!("more than {MAX_REDIRECTS} redirects"))
        } else if is_blocked_literal(attempt.url()) {
            let message = format!("redirect to non-public address {}", attempt.url());
            attempt.error(message)
        } else {
            attempt.follow()
        }
    });

    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .redirect(policy)
        .dns_resolver(Arc::new(PublicResolver))
        .build()
        .map_err(FetchError::Http)
}

async fn fetch_text(client: &Client, url: Url, config: &FetchConfig) -> Result<(Url, String), FetchError> {
    let timeout = config.timeout;
    let classify = |e: reqwest::Error| {
        if e.is_timeout() {
            FetchError::Timeout { timeout }
        } else {
            FetchError::Http(e)
        }
    };

    let mut response = client
        .get(url.clone())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    if let Some(length) = response.content_length()
        && length > MAX_BODY_BYTES as u64
    {
        return Err(FetchError::TooLarge { limit: MAX_BODY_BYTES });
    }

    let final_url = response.url().clone();
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(classify)? {
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(FetchError::TooLarge { limit: MAX_BODY_BYTES });
        }
        body.extend_from_slice(&chunk);
    }

    Ok((final_url, String::from_utf8_lossy(&body).into_owned()))
}

/// Well-known files are best effort: any failure becomes `None`
async fn fetch_optional(client: &Client, url: Option<String>, config: &FetchConfig) -> Option<String> {
    let url = Url::parse(&url?).ok()?;

    match fetch_text(client, url.clone(), config).await {
        Ok((_, text)) => Some(text),
        Err(FetchError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
            log::debug!("{url} not found");
            None
        }
        Err(e) => {
            log::warn!("Could not fetch {url}: {e}");
            None
        }
    }
}

/// Reject internal hosts, resolving domain names first
async fn ensure_public_host(url: &Url) -> Result<(), FetchError> {
    if is_blocked_literal(url) {
        return Err(FetchError::BlockedHost(url.to_string()));
    }

    let Some(Host::Domain(domain)) = url.host() else {
        return Ok(());
    };
    let port = url.port_or_known_default().unwrap_or(80);

    lookup_public(domain, port).await?;
    Ok(())
}

/// DNS resolver that refuses names with any non-public address.
///
/// Installed on the client so redirect targets and the well-known file
/// requests are checked at connect time, not just the initial URL.
struct PublicResolver;

impl Resolve for PublicResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(resolve_public(name))
    }
}

async fn resolve_public(name: Name) -> Result<Addrs, Box<dyn std::error::Error + Send + Sync>> {
    // The connector fills in the port
    let addrs: Addrs = Box::new(lookup_public(name.as_str(), 0).await?.into_iter());
    Ok(addrs)
}

async fn lookup_public(host: &str, port: u16) -> Result<Vec<SocketAddr>, FetchError> {
    let addrs = tokio::net::lookup_host((host, port))
        .await
        .map_err(|source| FetchError::Resolve {
            host: host.to_string(),
            source,
        })?;

    public_addrs(host, addrs)
}

/// All addresses must be public; one internal address blocks the whole name
fn public_addrs(host: &str, addrs: impl IntoIterator<Item = SocketAddr>) -> Result<Vec<SocketAddr>, FetchError> {
    let addrs: Vec<SocketAddr> = addrs.into_iter().collect();

    if let Some(addr) = addrs.iter().find(|addr| is_blocked_ip(addr.ip())) {
        log::warn!("{host} resolves to non-public address {}", addr.ip());
        return Err(FetchError::BlockedHost(host.to_string()));
    }
    if addrs.is_empty() {
        return Err(FetchError::Resolve {
            host: host.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
        });
    }

    Ok(addrs)
}

/// Checks what can be decided without DNS: scheme, `localhost` names and IP literals
fn is_blocked_literal(url: &Url) -> bool {
    if !matches!(url.scheme(), "http" | "https") {
        return true;
    }

    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_blocked_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_blocked_ipv6(ip),
        None => true,
    }
}

fn is_blocked_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ip) => is_blocked_ipv4(ip),
        IpAddr::V6(ip) => is_blocked_ipv6(ip),
    }
}

fn is_blocked_ipv4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    // 100.64.0.0/10 carrier-grade NAT
    let cgnat = a == 100 && (b & 0xc0) == 64;

    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || cgnat
}

fn is_blocked_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_blocked_ipv4(v4);
    }

    ip.is_loopback() || ip.is_unspecified() || ip.is_unique_local() || ip.is_unicast_link_local()
}
