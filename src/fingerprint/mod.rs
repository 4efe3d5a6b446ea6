/// Machine fingerprinting
///
/// Combines platform-dependent hardware signals into one stable SHA-256
/// digest used as the device id in the licensing handshake.
pub mod collectors;
pub mod signal;

pub use signal::{HardwareSignal, SignalKind};

use sha2::{Digest, Sha256};

use collectors::probe_set;
use crate::utils::platform::detect_platform;

/// Build the machine fingerprint from the current hardware.
///
/// Signals are collected in a fixed order (CPU, network adapter, mainboard);
/// unavailable signals are dropped. The network adapter signal always exists,
/// so the fingerprint input is never empty. Not stable across hardware
/// changes or virtualization moves; accepted limitation.
pub fn build_fingerprint() -> String {
    let platform = detect_platform();
    let signals: Vec<HardwareSignal> = probe_set(platform)
        .iter()
        .map(|probe| match probe.collect() {
            Some(value) => HardwareSignal::present(probe.kind(), value),
            None => HardwareSignal::absent(probe.kind()),
        })
        .collect();

    fingerprint_from_signals(&signals)
}

/// Hash the present signal values, preserving order.
///
/// Pure function: identical inputs always yield the identical digest.
/// Values are joined with `|`, UTF-8 encoded, and SHA-256 hashed to a
/// 64-character lowercase hex string.
pub fn fingerprint_from_signals(signals: &[HardwareSignal]) -> String {
    let joined = signals
        .iter()
        .filter_map(|signal| signal.value.as_deref())
        .collect::<Vec<_>>()
        .join("|");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha256_hex(input: &str) -> String {
        hex::encode(Sha256::digest(input.as_bytes()))
    }

    fn present(kind: SignalKind, value: &str) -> HardwareSignal {
        HardwareSignal::present(kind, value.to_string())
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let signals = vec![
            present(SignalKind::Cpu, "BFEBFBFF000906EA"),
            present(SignalKind::NetworkAdapter, "AA-BB-CC-DD-EE-FF"),
            present(SignalKind::Mainboard, "L1HF65E00ZB"),
        ];

        assert_eq!(
            fingerprint_from_signals(&signals),
            fingerprint_from_signals(&signals)
        );
    }

    #[test]
    fn test_fingerprint_is_order_sensitive() {
        let forward = vec![
            present(SignalKind::Cpu, "X"),
            present(SignalKind::NetworkAdapter, "Y"),
        ];
        let swapped = vec![
            present(SignalKind::Cpu, "Y"),
            present(SignalKind::NetworkAdapter, "X"),
        ];

        assert_ne!(
            fingerprint_from_signals(&forward),
            fingerprint_from_signals(&swapped)
        );
    }

    #[test]
    fn test_values_joined_with_pipe() {
        let signals = vec![
            present(SignalKind::Cpu, "A"),
            present(SignalKind::NetworkAdapter, "B"),
        ];
        assert_eq!(fingerprint_from_signals(&signals), sha256_hex("A|B"));
    }

    #[test]
    fn test_missing_signals_degrade_to_mac_only() {
        let signals = vec![
            HardwareSignal::absent(SignalKind::Cpu),
            present(SignalKind::NetworkAdapter, "AA-BB-CC-DD-EE-FF"),
            HardwareSignal::absent(SignalKind::Mainboard),
        ];

        assert_eq!(
            fingerprint_from_signals(&signals),
            sha256_hex("AA-BB-CC-DD-EE-FF")
        );
    }

    #[test]
    fn test_digest_is_64_lowercase_hex() {
        let signals = vec![present(SignalKind::NetworkAdapter, "AA-BB-CC-DD-EE-FF")];
        let digest = fingerprint_from_signals(&signals);

        assert_eq!(digest.len(), 64);
        assert!(
            digest
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_live_fingerprint_is_stable() {
        let fp1 = build_fingerprint();
        let fp2 = build_fingerprint();

        assert_eq!(fp1, fp2);
        assert_eq!(fp1.len(), 64);
    }
}
