use reqwest::Proxy;
use reqwest::blocking::Client;

use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("jdkvm/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, Default)]
pub struct ClientSetting {
    pub proxy: Option<String>,
}

impl ClientSetting {
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut cb = Client::builder().user_agent(USER_AGENT);

        if let Some(url) = self.proxy {
            tracing::debug!(proxy = %url, "using proxy");
            let proxy = Proxy::all(&url).map_err(|source| Error::Proxy {
                url: url.clone(),
                source,
            })?;
            cb = cb.proxy(proxy);
        }

        cb.build().map_err(Error::ClientBuild)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_proxy() {
        assert!(ClientSetting::default().build().is_ok());
    }

    #[test]
    fn test_build_with_proxy() {
        let setting = ClientSetting::default().with_proxy(Some("http://127.0.0.1:1080".into()));
        assert!(setting.build().is_ok());
    }

    #[test]
    fn test_blank_proxy_is_ignored() {
        let setting = ClientSetting::default().with_proxy(Some("  ".into()));
        assert!(setting.proxy.is_none());
    }
}
