//! Admin-mode capability flag
//!
//! Gates delete controls as a UI convenience only. A secret comparison
//! constant shipped in client code is not a security boundary, so none
//! is embedded here: the embedding application grants or revokes the
//! flag after whatever real authentication it performs. Enforcement
//! belongs to the backend.

/// Pure client-side admin-mode flag
#[derive(Debug, Default)]
pub struct AccessGate {
    admin: bool,
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter admin mode
    pub fn grant(&mut self) {
        self.admin = true;
    }

    /// Leave admin mode
    pub fn revoke(&mut self) {
        self.admin = false;
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }
}
