//! Static route table.
//!
//! Each relay route maps to exactly one upstream feed resource. The table is
//! compiled in and never changes at runtime.

use std::net::Ipv6Addr;
use url::Url;

use crate::config::UpstreamConfig;

/// Content-type the relayed body is served with. The bytes are never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Served as `text/xml`.
    Xml,
    /// Served as `image/jpeg`.
    BinaryImage,
}

impl ResponseKind {
    pub fn content_type(self) -> &'static str {
        match self {
            ResponseKind::Xml => "text/xml",
            ResponseKind::BinaryImage => "image/jpeg",
        }
    }
}

/// One relay route and the upstream resource behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    /// Path exposed by the relay.
    pub path: &'static str,
    /// Resource name under `/feed/` on the game server.
    pub upstream_file: &'static str,
    /// Value of the `file` query parameter, if the resource takes one.
    pub logical_file: Option<&'static str>,
    /// Fixed query parameters appended after `code` (and `file`).
    pub extra_query: &'static [(&'static str, &'static str)],
    pub response_kind: ResponseKind,
    /// Label placed in the `error` field of failure responses.
    pub error_label: &'static str,
}

const STATS_FILE: &str = "dedicated-server-stats.xml";
const SAVEGAME_FILE: &str = "dedicated-server-savegame.html";
const MAP_FILE: &str = "dedicated-server-stats-map.jpg";

pub const STATUS: RouteSpec = RouteSpec {
    path: "/status",
    upstream_file: STATS_FILE,
    logical_file: None,
    extra_query: &[],
    response_kind: ResponseKind::Xml,
    error_label: "Error fetching status",
};

pub const VEHICLES: RouteSpec = RouteSpec {
    path: "/vehicles",
    upstream_file: SAVEGAME_FILE,
    logical_file: Some("vehicles"),
    extra_query: &[],
    response_kind: ResponseKind::Xml,
    error_label: "Error fetching vehicle data",
};

pub const CAREER: RouteSpec = RouteSpec {
    path: "/career",
    upstream_file: SAVEGAME_FILE,
    logical_file: Some("careerSavegame"),
    extra_query: &[],
    response_kind: ResponseKind::Xml,
    error_label: "Error fetching career data",
};

pub const ECONOMY: RouteSpec = RouteSpec {
    path: "/economy",
    upstream_file: SAVEGAME_FILE,
    logical_file: Some("economy"),
    extra_query: &[],
    response_kind: ResponseKind::Xml,
    error_label: "Error fetching economy data",
};

pub const MAP_IMAGE: RouteSpec = RouteSpec {
    path: "/mapimage",
    upstream_file: MAP_FILE,
    logical_file: None,
    extra_query: &[("quality", "100"), ("size", "2048")],
    response_kind: ResponseKind::BinaryImage,
    error_label: "Error fetching map image",
};

/// All relay routes, in the order the health route lists them.
pub const ROUTES: [RouteSpec; 5] = [STATUS, VEHICLES, CAREER, ECONOMY, MAP_IMAGE];

/// `http://{host}:{port}/feed/`, with IPv6 literals bracketed.
pub fn feed_base_url(upstream: &UpstreamConfig) -> Result<Url, url::ParseError> {
    let host = upstream.host.as_str();
    let authority = if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]:{}", host, upstream.port)
    } else {
        format!("{}:{}", host, upstream.port)
    };
    Url::parse(&format!("http://{}/feed/", authority))
}

impl RouteSpec {
    /// Build the upstream URL:
    /// `http://{host}:{port}/feed/{upstream_file}?code={secret}[&file=..][&extra..]`.
    pub fn upstream_url(&self, upstream: &UpstreamConfig) -> Result<Url, url::ParseError> {
        let mut url = feed_base_url(upstream)?.join(self.upstream_file)?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("code", &upstream.secret);
            if let Some(file) = self.logical_file {
                query.append_pair("file", file);
            }
            for (key, value) in self.extra_query {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }
}
