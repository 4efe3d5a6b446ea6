/// Hardware signal probes
///
/// One probe per hardware attribute, with platform-specific variants picked
/// by `probe_set`. Probes never fail loudly: any OS error collapses to
/// `None` so the fingerprint degrades instead of aborting.
use std::fs;
use std::time::Duration;

use sha2::{Digest, Sha256};

use super::signal::SignalKind;
use crate::utils::command::run_with_timeout;
use crate::utils::platform::{Platform, detect_platform};

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// A probe for one hardware attribute
pub trait SignalProbe {
    fn kind(&self) -> SignalKind;

    /// Raw probe. `Err` carries the reason the attribute is unavailable on
    /// this machine.
    fn probe(&self) -> Result<String, String>;

    /// Collect the attribute, degrading any failure to `None`. The failure
    /// reason is reported on stderr; callers only see presence/absence.
    fn collect(&self) -> Option<String> {
        match self.probe() {
            Ok(value) => Some(value),
            Err(reason) => {
                eprintln!("⚠️  {} signal unavailable: {}", self.kind().name(), reason);
                None
            }
        }
    }
}

/// Ordered probe set for a platform: CPU, network adapter, mainboard.
/// The order is part of the fingerprint contract and must not change.
pub fn probe_set(platform: Platform) -> Vec<Box<dyn SignalProbe>> {
    let cpu: Box<dyn SignalProbe> = match platform {
        Platform::Windows => Box::new(WmicCpuProbe),
        Platform::Linux => Box::new(CpuinfoProbe),
        Platform::MacOs => Box::new(CoreCountProbe),
        Platform::Unknown => Box::new(UnsupportedProbe(SignalKind::Cpu)),
    };

    let board: Box<dyn SignalProbe> = match platform {
        Platform::Windows => Box::new(WmicBoardProbe),
        _ => Box::new(UnsupportedProbe(SignalKind::Mainboard)),
    };

    vec![cpu, Box::new(NodeIdProbe), board]
}

/// Windows CPU identifier via `wmic cpu get ProcessorId`
pub struct WmicCpuProbe;

impl SignalProbe for WmicCpuProbe {
    fn kind(&self) -> SignalKind {
        SignalKind::Cpu
    }

    fn probe(&self) -> Result<String, String> {
        let output = run_with_timeout("wmic", &["cpu", "get", "ProcessorId"], PROBE_TIMEOUT)
            .ok_or_else(|| "wmic cpu query failed".to_string())?;
        second_line(&output).ok_or_else(|| "wmic output had no value line".to_string())
    }
}

/// Linux CPU serial from /proc/cpuinfo
///
/// The `serial` field only exists on ARM SoCs; most x86 machines have no
/// CPU serial exposed and this probe yields nothing there.
pub struct CpuinfoProbe;

impl SignalProbe for CpuinfoProbe {
    fn kind(&self) -> SignalKind {
        SignalKind::Cpu
    }

    fn probe(&self) -> Result<String, String> {
        let cpuinfo = fs::read_to_string("/proc/cpuinfo")
            .map_err(|e| format!("cannot read /proc/cpuinfo: {}", e))?;
        serial_field(&cpuinfo).ok_or_else(|| "no serial field in /proc/cpuinfo".to_string())
    }
}

/// macOS fallback identifier via `sysctl -n machdep.cpu.core_count`
///
/// A core count is a weak substitute for a CPU serial and weakens
/// fingerprint uniqueness on this platform. Known limitation, kept as-is.
pub struct CoreCountProbe;

impl SignalProbe for CoreCountProbe {
    fn kind(&self) -> SignalKind {
        SignalKind::Cpu
    }

    fn probe(&self) -> Result<String, String> {
        let output = run_with_timeout(
            "sysctl",
            &["-n", "machdep.cpu.core_count"],
            PROBE_TIMEOUT,
        )
        .ok_or_else(|| "sysctl query failed".to_string())?;
        let count = output.trim();
        if count.is_empty() {
            return Err("sysctl returned no value".to_string());
        }
        Ok(count.to_string())
    }
}

/// Windows baseboard serial via `wmic baseboard get SerialNumber`
pub struct WmicBoardProbe;

impl SignalProbe for WmicBoardProbe {
    fn kind(&self) -> SignalKind {
        SignalKind::Mainboard
    }

    fn probe(&self) -> Result<String, String> {
        let output = run_with_timeout("wmic", &["baseboard", "get", "SerialNumber"], PROBE_TIMEOUT)
            .ok_or_else(|| "wmic baseboard query failed".to_string())?;
        second_line(&output).ok_or_else(|| "baseboard serial is blank".to_string())
    }
}

/// Node identifier derived from a network adapter address
///
/// Reads a hardware NIC address where one is available and falls back to a
/// stable hostname-derived pseudo address otherwise, so this probe always
/// produces a value. Output format: `AA-BB-CC-DD-EE-FF`.
pub struct NodeIdProbe;

impl SignalProbe for NodeIdProbe {
    fn kind(&self) -> SignalKind {
        SignalKind::NetworkAdapter
    }

    fn probe(&self) -> Result<String, String> {
        let node_id = read_nic_address().unwrap_or_else(fallback_node_id);
        Ok(format_node_id(&node_id))
    }
}

/// Placeholder probe for attributes the current platform does not expose
pub struct UnsupportedProbe(pub SignalKind);

impl SignalProbe for UnsupportedProbe {
    fn kind(&self) -> SignalKind {
        self.0
    }

    fn probe(&self) -> Result<String, String> {
        Err("not supported on this platform".to_string())
    }
}

/// Second non-empty line of a wmic-style table: header row, then the value.
fn second_line(output: &str) -> Option<String> {
    let mut lines = output.lines().map(str::trim).filter(|l| !l.is_empty());
    lines.next()?;
    lines.next().map(str::to_string)
}

/// Extract the `serial` field from /proc/cpuinfo contents.
/// The key is matched case-insensitively (`Serial` on Raspberry Pi).
fn serial_field(cpuinfo: &str) -> Option<String> {
    for line in cpuinfo.lines() {
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("serial") {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

fn read_nic_address() -> Option<[u8; 6]> {
    match detect_platform() {
        Platform::Linux => linux_nic_address(),
        Platform::Windows => windows_nic_address(),
        Platform::MacOs => macos_nic_address(),
        Platform::Unknown => None,
    }
}

/// First non-loopback interface address under /sys/class/net.
/// Interfaces are visited in name order so the pick is stable across runs.
fn linux_nic_address() -> Option<[u8; 6]> {
    let entries = fs::read_dir("/sys/class/net").ok()?;
    let mut names: Vec<String> = entries
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name != "lo")
        .collect();
    names.sort();

    for name in names {
        let addr_path = format!("/sys/class/net/{}/address", name);
        if let Ok(addr) = fs::read_to_string(&addr_path) {
            if let Some(mac) = parse_mac(addr.trim()) {
                if mac != [0u8; 6] {
                    return Some(mac);
                }
            }
        }
    }
    None
}

/// First physical adapter address reported by `getmac`
fn windows_nic_address() -> Option<[u8; 6]> {
    let output = run_with_timeout("getmac", &[], PROBE_TIMEOUT)?;
    output
        .split_whitespace()
        .filter_map(parse_mac)
        .find(|mac| *mac != [0u8; 6])
}

/// Primary interface address from `ifconfig en0`
fn macos_nic_address() -> Option<[u8; 6]> {
    let output = run_with_timeout("ifconfig", &["en0"], PROBE_TIMEOUT)?;
    for line in output.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() == Some("ether") {
            if let Some(mac) = tokens.next().and_then(parse_mac) {
                if mac != [0u8; 6] {
                    return Some(mac);
                }
            }
        }
    }
    None
}

/// Stable pseudo node id for machines with no readable NIC address.
///
/// Hashes the hostname and sets the multicast bit, the same address class
/// the OS node-id primitive synthesizes when no hardware NIC exists. Hashing
/// (rather than randomizing) keeps the fingerprint stable across runs.
fn fallback_node_id() -> [u8; 6] {
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown-host".to_string());

    let digest = Sha256::digest(host.as_bytes());
    let mut node_id = [0u8; 6];
    node_id.copy_from_slice(&digest[..6]);
    node_id[0] |= 0x01; // multicast bit marks the address as synthetic
    node_id
}

/// Render a node id as 6 uppercase hex byte-pairs joined by `-`
fn format_node_id(node_id: &[u8; 6]) -> String {
    node_id
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse `aa:bb:cc:dd:ee:ff` or `AA-BB-CC-DD-EE-FF` into bytes
fn parse_mac(text: &str) -> Option<[u8; 6]> {
    let parts: Vec<&str> = text.trim().split([':', '-']).collect();
    if parts.len() != 6 {
        return None;
    }

    let mut mac = [0u8; 6];
    for (i, part) in parts.iter().enumerate() {
        if part.len() != 2 {
            return None;
        }
        mac[i] = u8::from_str_radix(part, 16).ok()?;
    }
    Some(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_line_parses_wmic_table() {
        let output = "ProcessorId  \r\nBFEBFBFF000906EA  \r\n\r\n";
        assert_eq!(second_line(output).as_deref(), Some("BFEBFBFF000906EA"));
    }

    #[test]
    fn test_second_line_header_only() {
        assert_eq!(second_line("SerialNumber\r\n\r\n"), None);
        assert_eq!(second_line(""), None);
    }

    #[test]
    fn test_serial_field_found() {
        let cpuinfo = "processor\t: 0\nmodel name\t: ARMv7\nSerial\t\t: 00000000abad1dea\n";
        assert_eq!(serial_field(cpuinfo).as_deref(), Some("00000000abad1dea"));
    }

    #[test]
    fn test_serial_field_absent_on_x86() {
        let cpuinfo = "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel name\t: Intel(R) Core(TM)\n";
        assert_eq!(serial_field(cpuinfo), None);
    }

    #[test]
    fn test_serial_field_ignores_blank_value() {
        assert_eq!(serial_field("Serial\t\t: \n"), None);
    }

    #[test]
    fn test_parse_mac_colon_and_dash() {
        assert_eq!(
            parse_mac("aa:bb:cc:dd:ee:ff"),
            Some([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff])
        );
        assert_eq!(
            parse_mac("AA-BB-CC-DD-EE-FF"),
            Some([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff])
        );
    }

    #[test]
    fn test_parse_mac_rejects_garbage() {
        assert_eq!(parse_mac("N/A"), None);
        assert_eq!(parse_mac("aa:bb:cc:dd:ee"), None);
        assert_eq!(parse_mac("aa:bb:cc:dd:ee:fg"), None);
        assert_eq!(parse_mac("aaa:bb:cc:dd:ee:ff"), None);
    }

    #[test]
    fn test_format_node_id() {
        assert_eq!(
            format_node_id(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]),
            "AA-BB-CC-DD-EE-FF"
        );
        assert_eq!(
            format_node_id(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]),
            "00-01-02-03-04-05"
        );
    }

    #[test]
    fn test_fallback_node_id_is_stable_and_synthetic() {
        let a = fallback_node_id();
        let b = fallback_node_id();
        assert_eq!(a, b);
        assert_eq!(a[0] & 0x01, 0x01);
    }

    #[test]
    fn test_node_id_probe_always_yields_value() {
        let value = NodeIdProbe.collect().expect("node id must always exist");
        assert_eq!(value.len(), 17);
        assert_eq!(value, value.to_uppercase());
        assert!(parse_mac(&value).is_some());
    }

    #[test]
    fn test_unsupported_probe_degrades_to_none() {
        assert_eq!(UnsupportedProbe(SignalKind::Mainboard).collect(), None);
    }

    #[test]
    fn test_probe_set_order_is_fixed() {
        for platform in [
            Platform::Windows,
            Platform::Linux,
            Platform::MacOs,
            Platform::Unknown,
        ] {
            let probes = probe_set(platform);
            let kinds: Vec<SignalKind> = probes.iter().map(|p| p.kind()).collect();
            assert_eq!(
                kinds,
                vec![
                    SignalKind::Cpu,
                    SignalKind::NetworkAdapter,
                    SignalKind::Mainboard
                ]
            );
        }
    }
}
