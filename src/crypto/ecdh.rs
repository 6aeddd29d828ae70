// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Exchange Implementation
//!
//! Computes the secp256k1 Diffie-Hellman shared secret between a local
//! private key and a peer public key. The secret is the x-coordinate of
//! `own_private * peer_public` and is wiped from memory when dropped.

use k256::{PublicKey, SecretKey};

use super::codec;
use super::error::Result;

/// Raw ECDH shared secret
///
/// Wraps `k256::ecdh::SharedSecret`, which zeroizes on drop. Never logged and
/// never returned across the public envelope API.
pub struct SharedSecret(k256::ecdh::SharedSecret);

impl SharedSecret {
    /// The 32-byte x-coordinate of the shared point
    pub fn as_bytes(&self) -> &[u8] {
        self.0.raw_secret_bytes().as_slice()
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// Derive the shared secret for a local private key and a peer public key
///
/// Both keys are already parsed, so this cannot fail: `PublicKey` is
/// guaranteed to be a non-identity point on the curve.
pub fn derive_shared_secret(own_private_key: &SecretKey, peer_public_key: &PublicKey) -> SharedSecret {
    let shared = k256::ecdh::diffie_hellman(
        own_private_key.to_nonzero_scalar(),
        peer_public_key.as_affine(),
    );
    SharedSecret(shared)
}

/// Derive the shared secret from encoded keys
///
/// # Arguments
///
/// * `own_private_key` - Raw 32-byte scalar
/// * `peer_public_key` - X.509 DER or SEC1 (33 or 65 bytes) point
///
/// # Errors
///
/// Returns `InvalidKey` if either key fails to parse, the scalar is out of
/// range, or the point is not on secp256k1.
///
/// # Example
///
/// ```ignore
/// let secret = derive_shared_secret_from_bytes(&own_priv_bytes, &peer_pub_der)?;
/// let material = derive_key_material(&secret, &sender_nonce, &requester_nonce)?;
/// ```
pub fn derive_shared_secret_from_bytes(
    own_private_key: &[u8],
    peer_public_key: &[u8],
) -> Result<SharedSecret> {
    let own_secret = codec::decode_private_key(own_private_key, "own_private_key")?;
    let peer_public = codec::decode_public_key(peer_public_key, "peer_public_key")?;

    tracing::trace!(
        peer_public_key = %codec::public_key_fingerprint(&peer_public),
        "Performing ECDH"
    );

    Ok(derive_shared_secret(&own_secret, &peer_public))
}
