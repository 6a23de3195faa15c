// ── Guest voucher ledger ──
//
// Vouchers have no backend endpoint; the ledger is owned by the console
// state and persisted by the config layer between invocations. Claims
// are one-way in this layer: there is no "unclaim".

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle of a single voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherStatus {
    Unused,
    /// Claimed, with a free-text description of the claimant.
    Claimed { by: String },
}

/// A single-use guest network access code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    pub id: u32,
    pub code: String,
    /// Validity label, e.g. "24 hours".
    pub duration: String,
    pub status: VoucherStatus,
}

impl Voucher {
    pub fn is_unused(&self) -> bool {
        self.status == VoucherStatus::Unused
    }
}

/// All vouchers plus the guest-network master switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherLedger {
    pub guest_enabled: bool,
    vouchers: Vec<Voucher>,
    next_id: u32,
}

impl Default for VoucherLedger {
    fn default() -> Self {
        Self {
            guest_enabled: true,
            vouchers: Vec::new(),
            next_id: 1,
        }
    }
}

impl VoucherLedger {
    /// Newest first.
    pub fn vouchers(&self) -> &[Voucher] {
        &self.vouchers
    }

    pub fn get(&self, id: u32) -> Option<&Voucher> {
        self.vouchers.iter().find(|v| v.id == id)
    }

    /// Add one voucher with an explicit code.
    pub fn create(&mut self, code: String, duration: String) -> &Voucher {
        let id = self.next_id;
        self.next_id += 1;
        self.vouchers.insert(
            0,
            Voucher {
                id,
                code,
                duration,
                status: VoucherStatus::Unused,
            },
        );
        &self.vouchers[0]
    }

    /// Batch-generate `count` random codes valid for 24 hours.
    pub fn generate(&mut self, count: usize) -> Vec<String> {
        let mut codes = Vec::with_capacity(count);
        for _ in 0..count {
            let code = random_code();
            self.create(code.clone(), "24 hours".into());
            codes.push(code);
        }
        codes
    }

    /// Claim a voucher. One-way: claiming an already-claimed voucher is
    /// an error, not a re-assignment.
    pub fn claim(&mut self, id: u32, by: String) -> Result<&Voucher, CoreError> {
        let voucher = self
            .vouchers
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "voucher".into(),
                identifier: id.to_string(),
            })?;
        if !voucher.is_unused() {
            return Err(CoreError::VoucherAlreadyClaimed {
                code: voucher.code.clone(),
            });
        }
        voucher.status = VoucherStatus::Claimed { by };
        Ok(voucher)
    }

    /// Delete a voucher, returning it for the audit entry.
    pub fn delete(&mut self, id: u32) -> Result<Voucher, CoreError> {
        let idx = self
            .vouchers
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "voucher".into(),
                identifier: id.to_string(),
            })?;
        Ok(self.vouchers.remove(idx))
    }
}

/// `GUEST-XXXX` with four random uppercase alphanumerics.
fn random_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            char::from(CHARSET[idx])
        })
        .collect();
    format!("GUEST-{suffix}")
}
