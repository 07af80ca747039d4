//! Collaborator boundary: persisted settings, network link, push channel.
//!
//! The monitor core only depends on the traits here. Storage, WiFi and the
//! HTTP/event-stream server are platform code behind them.
//!
//! [`bring_up()`] runs once at startup. Any failure is logged and reported
//! as [`LinkStatus::Offline`]; the waveform pipeline runs either way, the
//! dashboard is just unreachable.

use core::fmt;
use core::net::Ipv4Addr;

use crate::constants::SUBNET_MASK;

/// Persisted network setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigKey {
    Ssid,
    Password,
    Ip,
    Gateway,
}

impl ConfigKey {
    /// Storage key (file stem) for this setting.
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Ssid => "ssid",
            ConfigKey::Password => "pass",
            ConfigKey::Ip => "ip",
            ConfigKey::Gateway => "gateway",
        }
    }
}

/// Read-only key/value settings store.
pub trait ConfigSource {
    /// Stored text for `key`, or `None` if it is missing or unreadable.
    fn read_value(&self, key: ConfigKey) -> Option<&str>;
}

/// Push channel to connected dashboard clients.
///
/// Best effort: publishing never fails from the caller's point of view.
/// Encoding on the wire is up to the implementation.
pub trait EventSink {
    fn publish(&mut self, event: &str, value: u8, timestamp_ms: u32);
}

/// Station-mode network association.
pub trait NetworkLink {
    /// Error type for association failures.
    type Error: fmt::Debug;

    /// Configure the static address and join the network. Called once.
    ///
    /// Implementations bound their own wait (10 s on the reference board).
    fn connect(&mut self, settings: &NetworkSettings<'_>) -> Result<(), Self::Error>;
}

/// Why bring-up did not produce a connected link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// SSID missing or empty.
    UndefinedSsid,
    /// Static IP missing or empty.
    UndefinedIp,
    /// A stored address is not a dotted IPv4 address.
    InvalidAddress(ConfigKey),
    /// The link refused or timed out.
    LinkFailed,
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::UndefinedSsid => f.write_str("undefined SSID"),
            StartupError::UndefinedIp => f.write_str("undefined IP address"),
            StartupError::InvalidAddress(key) => {
                write!(f, "invalid IPv4 address in '{}'", key.as_str())
            }
            StartupError::LinkFailed => f.write_str("failed to connect"),
        }
    }
}

/// Validated station settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSettings<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
    pub ip: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub subnet: Ipv4Addr,
}

impl<'a> NetworkSettings<'a> {
    /// Read and validate settings from `config`.
    ///
    /// SSID and IP are required. A missing password means an open network;
    /// only its line ending is stripped.
    /// A missing gateway falls back to `0.0.0.0`; a malformed one is an error.
    pub fn load<C: ConfigSource + ?Sized>(config: &'a C) -> Result<Self, StartupError> {
        let ssid =
            non_empty(config.read_value(ConfigKey::Ssid)).ok_or(StartupError::UndefinedSsid)?;
        let ip_text =
            non_empty(config.read_value(ConfigKey::Ip)).ok_or(StartupError::UndefinedIp)?;
        let password = config
            .read_value(ConfigKey::Password)
            .map(|p| p.trim_end_matches(['\r', '\n']))
            .unwrap_or("");

        let ip = parse_addr(ip_text, ConfigKey::Ip)?;
        let gateway = match non_empty(config.read_value(ConfigKey::Gateway)) {
            Some(text) => parse_addr(text, ConfigKey::Gateway)?,
            None => Ipv4Addr::UNSPECIFIED,
        };

        Ok(NetworkSettings {
            ssid,
            password,
            ip,
            gateway,
            subnet: Ipv4Addr::from(SUBNET_MASK),
        })
    }
}

/// Stored files often end with a newline; surrounding whitespace is ignored.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_addr(text: &str, key: ConfigKey) -> Result<Ipv4Addr, StartupError> {
    text.parse().map_err(|_| StartupError::InvalidAddress(key))
}

/// Outcome of [`bring_up()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    Connected,
    Offline(StartupError),
}

impl LinkStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, LinkStatus::Connected)
    }
}

/// Load settings and connect once. Never retries, never panics.
pub fn bring_up<C, L>(config: &C, link: &mut L) -> LinkStatus
where
    C: ConfigSource + ?Sized,
    L: NetworkLink,
{
    match try_bring_up(config, link) {
        Ok(()) => LinkStatus::Connected,
        Err(err) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("network bring-up failed: {}; running offline", err);
            LinkStatus::Offline(err)
        }
    }
}

fn try_bring_up<C, L>(config: &C, link: &mut L) -> Result<(), StartupError>
where
    C: ConfigSource + ?Sized,
    L: NetworkLink,
{
    let settings = NetworkSettings::load(config)?;

    #[cfg(feature = "defmt")]
    defmt::info!(
        "connecting to '{=str}' as {=[u8; 4]}",
        settings.ssid,
        settings.ip.octets()
    );

    match link.connect(&settings) {
        Ok(()) => {
            #[cfg(feature = "defmt")]
            defmt::info!("connected, address {=[u8; 4]}", settings.ip.octets());
            Ok(())
        }
        Err(_err) => {
            #[cfg(feature = "defmt")]
            defmt::error!("link error: {}", defmt::Debug2Format(&_err));
            Err(StartupError::LinkFailed)
        }
    }
}
