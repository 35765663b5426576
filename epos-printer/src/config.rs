//! Printer endpoint configuration

use std::time::Duration;

/// Device id of the printer attached to the ePOS-Print service itself
pub const DEFAULT_DEVICE_ID: &str = "local_printer";

/// Default request timeout (also forwarded to the device)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Endpoint configuration for an ePOS-Print capable printer
///
/// The configuration is not validated: a malformed host only surfaces
/// when the first request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printer host or IP (e.g., "192.168.1.50")
    pub host: String,

    /// Target device id on the ePOS-Print service
    pub device_id: String,

    /// Request timeout, used both locally and as the `timeout` query parameter
    pub timeout: Duration,

    /// Accept self-signed device certificates
    pub accept_invalid_certs: bool,
}

impl PrinterConfig {
    /// Create a configuration for the given host with default timeout
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            device_id: DEFAULT_DEVICE_ID.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request timeout in milliseconds
    pub fn with_timeout_ms(self, millis: u64) -> Self {
        self.with_timeout(Duration::from_millis(millis))
    }

    /// Set the target device id
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = device_id.into();
        self
    }

    /// Accept self-signed certificates presented by the printer
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Timeout in whole milliseconds
    pub fn timeout_ms(&self) -> u128 {
        self.timeout.as_millis()
    }

    /// Full service URL of the device
    pub fn device_address(&self) -> String {
        format!(
            "https://{}/cgi-bin/epos/service.cgi?devid={}&timeout={}",
            self.host,
            self.device_id,
            self.timeout_ms()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        let config = PrinterConfig::new("192.168.1.50");
        assert_eq!(
            config.device_address(),
            "https://192.168.1.50/cgi-bin/epos/service.cgi?devid=local_printer&timeout=60000"
        );
    }

    #[test]
    fn test_address_is_stable() {
        let a = PrinterConfig::new("printer.local").with_timeout_ms(5000);
        let b = PrinterConfig::new("printer.local").with_timeout_ms(5000);
        assert_eq!(a.device_address(), b.device_address());
        assert!(a.device_address().ends_with("&timeout=5000"));
    }

    #[test]
    fn test_custom_device_id() {
        let config = PrinterConfig::new("10.0.0.2").with_device_id("kitchen");
        assert!(config.device_address().contains("devid=kitchen&"));
    }

    #[test]
    fn test_host_not_validated() {
        let config = PrinterConfig::new("not a host");
        assert!(config.device_address().starts_with("https://not a host/"));
    }
}
