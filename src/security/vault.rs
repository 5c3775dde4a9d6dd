//! At-rest protection for the sealing secret stored in `config.toml`.
//!
//! Protected values look like `ENC:<hex(nonce || ciphertext)>` and are
//! encrypted with ChaCha20-Poly1305 under a per-install key kept next to the
//! config file in `.secret_key` (owner-only permissions on unix).

use anyhow::{Context, Result, bail};
use chacha20poly1305::{
    ChaCha20Poly1305, KeyInit, Nonce,
    aead::{Aead, OsRng, rand_core::RngCore},
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const KEY_FILE: &str = ".secret_key";
const PROTECTED_PREFIX: &str = "ENC:";
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

pub struct SecretVault {
    key_path: PathBuf,
    enabled: bool,
}

impl SecretVault {
    /// Vault whose key lives in `dir`. With `enabled == false` values pass
    /// through unchanged on write.
    pub fn new(dir: &Path, enabled: bool) -> Self {
        Self {
            key_path: dir.join(KEY_FILE),
            enabled,
        }
    }

    #[must_use]
    pub fn is_protected(value: &str) -> bool {
        value.starts_with(PROTECTED_PREFIX)
    }

    pub fn protect(&self, plaintext: &str) -> Result<String> {
        if !self.enabled || plaintext.is_empty() || Self::is_protected(plaintext) {
            return Ok(plaintext.to_string());
        }

        let cipher = self.cipher()?;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| anyhow::anyhow!("secret encryption failed: {e}"))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(format!("{PROTECTED_PREFIX}{}", hex::encode(combined)))
    }

    /// Decrypt a protected value. Plain values are returned as they are, so
    /// hand-edited configs keep working.
    pub fn reveal(&self, value: &str) -> Result<String> {
        let Some(hex_str) = value.strip_prefix(PROTECTED_PREFIX) else {
            return Ok(value.to_string());
        };

        let combined = hex::decode(hex_str)
            .map_err(|e| anyhow::anyhow!("protected secret is not valid hex: {e}"))?;
        if combined.len() <= NONCE_LEN {
            bail!("protected secret is too short");
        }
        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);

        let plaintext = Zeroizing::new(
            self.cipher()?
                .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
                .map_err(|e| anyhow::anyhow!("secret decryption failed: {e}"))?,
        );

        String::from_utf8(plaintext.to_vec()).context("decrypted secret is not valid UTF-8")
    }

    fn cipher(&self) -> Result<ChaCha20Poly1305> {
        let key = self.load_or_create_key()?;
        ChaCha20Poly1305::new_from_slice(&key)
            .map_err(|e| anyhow::anyhow!("invalid vault key length: {e}"))
    }

    fn load_or_create_key(&self) -> Result<Zeroizing<Vec<u8>>> {
        if self.key_path.exists() {
            restrict_permissions(&self.key_path)?;
            return read_key(&self.key_path);
        }

        let mut key = Zeroizing::new(vec![0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut key);
        match write_new_key(&self.key_path, &key) {
            Ok(()) => Ok(key),
            // Another process created the key between our check and write.
            Err(error)
                if error
                    .downcast_ref::<std::io::Error>()
                    .is_some_and(|io| io.kind() == std::io::ErrorKind::AlreadyExists) =>
            {
                read_key(&self.key_path)
            }
            Err(error) => Err(error),
        }
    }
}

fn read_key(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let hex_key = Zeroizing::new(fs::read_to_string(path).context("failed to read vault key")?);
    let key = Zeroizing::new(
        hex::decode(hex_key.trim())
            .map_err(|e| anyhow::anyhow!("vault key is not valid hex: {e}"))?,
    );
    if key.len() != KEY_LEN {
        bail!("vault key has invalid length (expected {KEY_LEN} bytes)");
    }
    Ok(key)
}

fn write_new_key(path: &Path, key: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(hex::encode(key).as_bytes())
        .context("failed to write vault key")?;
    file.sync_all().context("failed to sync vault key")?;
    restrict_permissions(path)
}

fn restrict_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .context("failed to restrict vault key permissions")?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
