// Version information for ecdh-envelope

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-secp256k1-hkdf-aes256gcm-2026-10-16";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-16";

/// Key agreement curve
pub const CURVE: &str = "secp256k1";

/// Key derivation function
pub const KDF: &str = "HKDF-SHA256";

/// Authenticated cipher
pub const CIPHER: &str = "AES-256-GCM";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "key-material-generation",
    "ecdh-key-exchange",
    "x509-public-keys",
    "sec1-public-keys",
    "hkdf-nonce-salt",
    "aes-256-gcm",
    "base64-payloads",
    "batch-file-input",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("ecdh-envelope {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "curve": CURVE,
        "kdf": KDF,
        "cipher": CIPHER,
        "features": FEATURES,
    })
}
