use sha2::{Digest, Sha256};

/// Static shared-secret gate. Mutations are only exposed while unlocked.
#[derive(Clone)]
pub struct AdminGate {
    secret_digest: [u8; 32],
    unlocked: bool,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("unlocked", &self.unlocked)
            .finish_non_exhaustive()
    }
}

fn digest(secret: &str) -> [u8; 32] {
    Sha256::digest(secret.as_bytes()).into()
}

impl AdminGate {
    pub fn new(secret: &str) -> Self {
        Self {
            secret_digest: digest(secret),
            unlocked: false,
        }
    }

    /// Unlocks the gate if `attempt` matches the configured secret; locks it otherwise.
    pub fn unlock(&mut self, attempt: &str) -> bool {
        self.unlocked = digest(attempt) == self.secret_digest;
        if self.unlocked {
            log::info!("Admin access granted");
        } else {
            log::warn!("Admin access denied");
        }
        self.unlocked
    }

    pub fn lock(&mut self) {
        self.unlocked = false;
    }

    pub fn is_admin(&self) -> bool {
        self.unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::AdminGate;

    #[test]
    fn test_gate_only_accepts_configured_secret() {
        let mut gate = AdminGate::new("chess123");
        assert!(!gate.is_admin());

        assert!(!gate.unlock("chess1234"));
        assert!(!gate.unlock(""));
        assert!(!gate.is_admin());

        assert!(gate.unlock("chess123"));
        assert!(gate.is_admin());

        // A wrong attempt while unlocked locks again.
        assert!(!gate.unlock("nope"));
        assert!(!gate.is_admin());

        gate.unlock("chess123");
        gate.lock();
        assert!(!gate.is_admin());
    }

    #[test]
    fn test_debug_hides_digest() {
        let gate = AdminGate::new("chess123");
        let debug = format!("{gate:?}");
        assert!(debug.contains("unlocked: false"));
        assert!(!debug.contains("secret"));
    }
}
