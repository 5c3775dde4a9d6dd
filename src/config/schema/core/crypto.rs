use super::Config;
use crate::security::SecretVault;
use anyhow::Result;

fn reveal_secret_option(
    value: &mut Option<String>,
    vault: &SecretVault,
    encrypt_enabled: bool,
) -> Result<bool> {
    let Some(current) = value.as_deref() else {
        return Ok(false);
    };

    let trimmed = current.trim();
    if trimmed.is_empty() {
        return Ok(false);
    }

    // Plain secrets are key material and stay byte-for-byte as written.
    if !SecretVault::is_protected(trimmed) {
        return Ok(encrypt_enabled);
    }

    *value = Some(vault.reveal(trimmed)?);
    Ok(false)
}

fn protect_secret_option(value: &mut Option<String>, vault: &SecretVault) -> Result<()> {
    let Some(current) = value.as_deref() else {
        return Ok(());
    };

    let trimmed = current.trim();
    if trimmed.is_empty() || SecretVault::is_protected(trimmed) {
        if trimmed != current {
            *value = Some(trimmed.to_string());
        }
        return Ok(());
    }

    *value = Some(vault.protect(current)?);
    Ok(())
}

impl Config {
    fn secret_vault(&self) -> SecretVault {
        SecretVault::new(self.config_dir(), self.secrets.encrypt)
    }

    /// Decrypt stored secrets. Returns `true` when the file still holds a
    /// plaintext secret that should be re-saved encrypted.
    pub(super) fn reveal_config_secrets_in_place(&mut self) -> Result<bool> {
        let vault = self.secret_vault();
        reveal_secret_option(&mut self.seal.secret, &vault, self.secrets.encrypt)
    }

    pub(super) fn protect_config_secrets_in_place(&mut self) -> Result<()> {
        if !self.secrets.encrypt {
            return Ok(());
        }
        let vault = self.secret_vault();
        protect_secret_option(&mut self.seal.secret, &vault)
    }

    pub(super) fn config_for_persistence(&self) -> Result<Self> {
        let mut persisted = self.clone();
        persisted.protect_config_secrets_in_place()?;
        Ok(persisted)
    }
}
