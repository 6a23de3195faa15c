// ── Voucher ledger persistence ──
//
// Vouchers have no backend endpoint, so the ledger lives in a JSON file
// per profile under the data directory. Load tolerates a missing file
// (fresh default ledger); a corrupt file is an error, not a silent
// reset.

use std::path::PathBuf;

use tracing::debug;

use portway_core::VoucherLedger;

use crate::{ConfigError, data_dir};

fn ledger_path(profile_name: &str) -> PathBuf {
    data_dir().join(format!("vouchers-{profile_name}.json"))
}

/// Load the voucher ledger for a profile, defaulting when absent.
pub fn load_ledger(profile_name: &str) -> Result<VoucherLedger, ConfigError> {
    load_ledger_from(&ledger_path(profile_name))
}

/// Persist the voucher ledger for a profile.
pub fn save_ledger(profile_name: &str, ledger: &VoucherLedger) -> Result<(), ConfigError> {
    save_ledger_to(&ledger_path(profile_name), ledger)
}

fn load_ledger_from(path: &std::path::Path) -> Result<VoucherLedger, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let ledger = serde_json::from_str(&contents)?;
            debug!(path = %path.display(), "voucher ledger loaded");
            Ok(ledger)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(VoucherLedger::default()),
        Err(e) => Err(e.into()),
    }
}

fn save_ledger_to(path: &std::path::Path, ledger: &VoucherLedger) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(ledger)?)?;
    debug!(path = %path.display(), "voucher ledger saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_a_default_ledger() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = load_ledger_from(&dir.path().join("absent.json")).expect("default");
        assert!(ledger.vouchers().is_empty());
        assert!(ledger.guest_enabled);
    }

    #[test]
    fn ledger_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vouchers.json");

        let mut ledger = VoucherLedger::default();
        ledger.create("GUEST-AAAA".into(), "24 hours".into());
        ledger.guest_enabled = false;
        save_ledger_to(&path, &ledger).expect("save");

        let restored = load_ledger_from(&path).expect("load");
        assert_eq!(restored.vouchers().len(), 1);
        assert_eq!(restored.vouchers()[0].code, "GUEST-AAAA");
        assert!(!restored.guest_enabled);
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_reset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vouchers.json");
        std::fs::write(&path, "{not json").expect("write");
        assert!(matches!(load_ledger_from(&path), Err(ConfigError::Ledger(_))));
    }
}
