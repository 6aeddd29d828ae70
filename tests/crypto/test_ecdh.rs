//! Tests for ECDH shared secret derivation

use ecdh_envelope::crypto::{
    derive_shared_secret, derive_shared_secret_from_bytes, encode_private_key, encode_public_key,
    CryptoError,
};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand::rngs::OsRng;

#[test]
fn test_derive_shared_secret_valid() {
    let own = SecretKey::random(&mut OsRng);
    let peer = SecretKey::random(&mut OsRng);

    let own_bytes = encode_private_key(&own);
    let peer_der = encode_public_key(&peer.public_key()).unwrap();

    let secret = derive_shared_secret_from_bytes(&own_bytes, &peer_der);
    assert!(secret.is_ok(), "ECDH derivation should succeed");
    assert_eq!(secret.unwrap().as_bytes().len(), 32, "Shared secret must be 32 bytes");
}

#[test]
fn test_key_derivation_deterministic() {
    let own = SecretKey::random(&mut OsRng);
    let peer = SecretKey::random(&mut OsRng);
    let own_bytes = encode_private_key(&own);
    let peer_der = encode_public_key(&peer.public_key()).unwrap();

    let first = derive_shared_secret_from_bytes(&own_bytes, &peer_der).unwrap();
    let second = derive_shared_secret_from_bytes(&own_bytes, &peer_der).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes(), "Derivation should be deterministic");
}

#[test]
fn test_both_parties_derive_same_secret() {
    let alice = SecretKey::random(&mut OsRng);
    let bob = SecretKey::random(&mut OsRng);

    let alice_side = derive_shared_secret(&alice, &bob.public_key());
    let bob_side = derive_shared_secret(&bob, &alice.public_key());
    assert_eq!(alice_side.as_bytes(), bob_side.as_bytes());
}

#[test]
fn test_sec1_and_der_peer_keys_agree() {
    let own = SecretKey::random(&mut OsRng);
    let peer = SecretKey::random(&mut OsRng);
    let own_bytes = encode_private_key(&own);

    let der = encode_public_key(&peer.public_key()).unwrap();
    let compressed = peer.public_key().to_encoded_point(true);

    let from_der = derive_shared_secret_from_bytes(&own_bytes, &der).unwrap();
    let from_sec1 = derive_shared_secret_from_bytes(&own_bytes, compressed.as_bytes()).unwrap();
    assert_eq!(from_der.as_bytes(), from_sec1.as_bytes());
}

#[test]
fn test_different_peers_give_different_secrets() {
    let own = SecretKey::random(&mut OsRng);
    let peer_a = SecretKey::random(&mut OsRng);
    let peer_b = SecretKey::random(&mut OsRng);

    let a = derive_shared_secret(&own, &peer_a.public_key());
    let b = derive_shared_secret(&own, &peer_b.public_key());
    assert_ne!(a.as_bytes(), b.as_bytes());
}

#[test]
fn test_invalid_public_key_malformed() {
    let own_bytes = encode_private_key(&SecretKey::random(&mut OsRng));

    let result = derive_shared_secret_from_bytes(&own_bytes, &[0xFF; 33]);
    assert!(matches!(result, Err(CryptoError::InvalidKey { .. })));
}

#[test]
fn test_invalid_public_key_size() {
    let own_bytes = encode_private_key(&SecretKey::random(&mut OsRng));

    let result = derive_shared_secret_from_bytes(&own_bytes, &[0x02; 20]);
    assert!(matches!(result, Err(CryptoError::InvalidKey { .. })));
}

#[test]
fn test_private_key_above_curve_order() {
    let peer_der = encode_public_key(&SecretKey::random(&mut OsRng).public_key()).unwrap();

    let result = derive_shared_secret_from_bytes(&[0xFF; 32], &peer_der);
    match result {
        Err(CryptoError::InvalidKey { key_type, .. }) => assert_eq!(key_type, "own_private_key"),
        other => panic!("Expected InvalidKey, got {:?}", other.map(|_| ())),
    }
}
