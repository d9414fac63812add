//! Client-facing tenant URLs.
//!
//! The only consumer of the configured root domain. Local development
//! links keep the port the visitor is using.

use url::Url;

use crate::routing::host::hostname_from_header;
use crate::routing::DeploymentMode;

/// Port assumed for local links when the request carried none.
pub const DEFAULT_LOCAL_PORT: u16 = 3000;

/// Build the public URL of `path` on `subdomain`.
///
/// Local links hang off the host the visitor used. Production links hang
/// off `root_domain` over https.
pub fn tenant_url(
    mode: DeploymentMode,
    request_host: &str,
    root_domain: &str,
    subdomain: &str,
    path: &str,
) -> Result<Url, url::ParseError> {
    let mut url = match mode {
        DeploymentMode::Local => {
            let hostname = hostname_from_header(request_host);
            let base = hostname.strip_prefix("www.").unwrap_or(hostname);
            let base = if base.is_empty() { "localhost" } else { base };
            let port = request_host
                .rsplit_once(':')
                .and_then(|(_, p)| p.parse::<u16>().ok())
                .unwrap_or(DEFAULT_LOCAL_PORT);
            Url::parse(&format!("http://{subdomain}.{base}:{port}"))?
        }
        DeploymentMode::Production => Url::parse(&format!("https://{subdomain}.{root_domain}"))?,
    };

    url.set_path(path);
    Ok(url)
}
