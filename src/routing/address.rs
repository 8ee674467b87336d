//! Conversion between route paths and visible addresses.
//!
//! A route path is the table key ("home"); an address is what the history
//! shows ("/home", or "/app/home" under a base path).

use url::Url;

use crate::config::RouterSettings;

/// Maps route paths to addresses and back.
#[derive(Debug, Clone)]
pub struct AddressCodec {
    base: String,
    default_path: String,
}

impl AddressCodec {
    pub fn new(base_path: &str, default_path: &str) -> Self {
        let mut base = base_path.trim_end_matches('/').to_string();
        base.push('/');
        if !base.starts_with('/') {
            base.insert(0, '/');
        }
        Self {
            base,
            default_path: normalize_path(default_path).to_string(),
        }
    }

    pub fn from_settings(settings: &RouterSettings) -> Self {
        Self::new(&settings.base_path, &settings.default_path)
    }

    /// Address shown for `path`.
    pub fn address_for(&self, path: &str) -> String {
        format!("{}{}", self.base, normalize_path(path))
    }

    /// Route path encoded in `address`. Query and fragment are ignored; an
    /// address without a path, or outside the base, maps to the default path.
    pub fn path_from(&self, address: &str) -> String {
        let path = match Url::parse("http://localhost/").and_then(|root| root.join(address)) {
            Ok(url) => url.path().to_string(),
            Err(_) => address.split(['?', '#']).next().unwrap_or_default().to_string(),
        };
        let relative = path
            .strip_prefix(&self.base)
            .or_else(|| (path == self.base.trim_end_matches('/')).then_some(""));
        match relative.map(normalize_path) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => self.default_path.clone(),
        }
    }
}

/// Strip leading and trailing slashes from a route path.
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_base() {
        let codec = AddressCodec::new("/", "home");
        assert_eq!(codec.address_for("home"), "/home");
        assert_eq!(codec.address_for("/about/"), "/about");
        assert_eq!(codec.path_from("/about"), "about");
        assert_eq!(codec.path_from("/about?tab=team#top"), "about");
        assert_eq!(codec.path_from("/"), "home");
        assert_eq!(codec.path_from(""), "home");
    }

    #[test]
    fn test_nested_base() {
        let codec = AddressCodec::new("/app", "home");
        assert_eq!(codec.address_for("login"), "/app/login");
        assert_eq!(codec.path_from("/app/login"), "login");
        assert_eq!(codec.path_from("/app"), "home");
        assert_eq!(codec.path_from("/elsewhere"), "home");
    }

    #[test]
    fn test_round_trip_of_nested_path() {
        let codec = AddressCodec::new("/", "home");
        assert_eq!(codec.path_from(&codec.address_for("docs/intro")), "docs/intro");
    }
}
