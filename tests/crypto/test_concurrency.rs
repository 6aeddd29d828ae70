//! Parallel use of the envelope service from multiple threads

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use ecdh_envelope::crypto::{EnvelopeService, KeyMaterial};

#[test]
fn test_parallel_round_trips_share_one_service() {
    let service = Arc::new(EnvelopeService::new());
    let a = Arc::new(service.generate_key_material().unwrap());
    let b = Arc::new(service.generate_key_material().unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            let a = Arc::clone(&a);
            let b = Arc::clone(&b);
            thread::spawn(move || {
                for i in 0..25 {
                    let message = format!("worker {} message {}", worker, i);
                    let envelope = service
                        .encrypt_message(&message, &a.private_key, &a.nonce, &b.x509_public_key, &b.nonce)
                        .unwrap();
                    let plaintext = service
                        .decrypt_message(
                            &envelope.encrypted_data,
                            &b.private_key,
                            &b.nonce,
                            &a.x509_public_key,
                            &a.nonce,
                        )
                        .unwrap();
                    assert_eq!(plaintext.decrypted_data, message);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_parallel_generation_is_uncorrelated() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                (0..50)
                    .map(|_| KeyMaterial::generate().unwrap().nonce)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for nonce in handle.join().unwrap() {
            assert!(seen.insert(nonce), "Nonce repeated across threads");
        }
    }
    assert_eq!(seen.len(), 400);
}
