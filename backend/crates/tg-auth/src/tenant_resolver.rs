/// Syntactic tenant resolution from the `Host` header.
///
/// `"<tenant>.<base_domain>[:<port>]"` yields `Some(tenant)`; the bare base
/// domain or any other host yields `None`. No registry is consulted here.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    base_domain: String,
}

impl TenantResolver {
    pub fn new(base_domain: &str) -> Self {
        Self {
            base_domain: base_domain
                .trim()
                .trim_matches('.')
                .to_ascii_lowercase(),
        }
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    pub fn resolve(&self, host: &str) -> Option<String> {
        if self.base_domain.is_empty() {
            return None;
        }

        let host = strip_port(host.trim())?;
        let host = host.strip_suffix('.').unwrap_or(host);

        // Needs at least one character plus the separating dot before the suffix
        let split = host.len().checked_sub(self.base_domain.len())?;
        if split < 2 {
            return None;
        }

        let suffix = host.get(split..)?;
        if !suffix.eq_ignore_ascii_case(&self.base_domain) || host.as_bytes()[split - 1] != b'.' {
            return None;
        }

        let label = host[..split - 1].split('.').next()?;
        if label.is_empty()
            || !label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return None;
        }

        Some(label.to_ascii_lowercase())
    }
}

/// Convenience wrapper for one-off resolution
pub fn resolve_tenant(host: &str, base_domain: &str) -> Option<String> {
    TenantResolver::new(base_domain).resolve(host)
}

fn strip_port(host: &str) -> Option<&str> {
    // IPv6 literals never carry a tenant label
    if host.starts_with('[') {
        return None;
    }

    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => Some(name),
        Some(_) => None,
        None => Some(host),
    }
}
