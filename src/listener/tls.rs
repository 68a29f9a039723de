// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;

use super::server::ListenerError;

/// PEM certificate chain and private key for `wss://`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl TlsFiles {
    /// Paths starting with `~/` are resolved against the home directory.
    pub fn new(cert: impl AsRef<Path>, key: impl AsRef<Path>) -> Self {
        Self {
            cert: expand_home(cert.as_ref()),
            key: expand_home(key.as_ref()),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Reads both PEM files and builds the server config.
pub async fn load_tls(files: &TlsFiles) -> Result<RustlsConfig, ListenerError> {
    // Another rustls user may have installed a provider already; either one works.
    let _ = rustls::crypto::ring::default_provider().install_default();

    RustlsConfig::from_pem_file(&files.cert, &files.key)
        .await
        .map_err(|source| ListenerError::Tls {
            cert: files.cert.clone(),
            key: files.key.clone(),
            source,
        })
}
