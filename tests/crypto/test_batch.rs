//! Tests for six-line batch file processing

use std::io::Write;

use ecdh_envelope::crypto::{
    process_batch, process_batch_file, BatchResponse, CryptoError, EnvelopeService, ErrorKind,
    KeyMaterialResponse,
};
use tempfile::NamedTempFile;

fn party(service: &EnvelopeService) -> KeyMaterialResponse {
    service.generate_key_material().unwrap()
}

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_file_encrypt_matches_direct_call() {
    let service = EnvelopeService::new();
    let a = party(&service);
    let b = party(&service);

    let input = format!(
        "e\nHello World!!\n{}\n{}\n{}\n{}",
        a.nonce, b.nonce, a.private_key, b.x509_public_key
    );
    let file = write_file(&input);

    let from_file = process_batch_file(file.path(), &service).unwrap();
    let direct = service
        .encrypt_message("Hello World!!", &a.private_key, &a.nonce, &b.x509_public_key, &b.nonce)
        .unwrap();

    assert_eq!(from_file, BatchResponse::Encrypted(direct));
}

#[test]
fn test_file_decrypt() {
    let service = EnvelopeService::new();
    let a = party(&service);
    let b = party(&service);
    let envelope = service
        .encrypt_message("Hello World!!", &a.private_key, &a.nonce, &b.x509_public_key, &b.nonce)
        .unwrap();

    let input = format!(
        "d\n{}\n{}\n{}\n{}\n{}\n",
        envelope.encrypted_data, b.nonce, a.nonce, b.private_key, a.x509_public_key
    );
    let file = write_file(&input);

    match process_batch_file(file.path(), &service).unwrap() {
        BatchResponse::Decrypted(result) => assert_eq!(result.decrypted_data, "Hello World!!"),
        other => panic!("Expected Decrypted, got {:?}", other),
    }
}

#[test]
fn test_seven_lines_rejected_before_crypto() {
    let service = EnvelopeService::new();
    let a = party(&service);
    let b = party(&service);

    let input = format!(
        "e\nHello World!!\n{}\n{}\n{}\n{}\nextra",
        a.nonce, b.nonce, a.private_key, b.x509_public_key
    );

    let err = process_batch(&input, &service).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(matches!(err, CryptoError::InvalidBatchInput { line: 7, .. }));
}

#[test]
fn test_seven_lines_rejected_even_with_garbage_keys() {
    // Key fields are invalid too; the line count is reported first
    let input = "e\nhi\nx\nx\nx\nx\nx";
    let err = process_batch(input, &EnvelopeService::new()).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidBatchInput { line: 7, .. }));
}

#[test]
fn test_unknown_tag_rejected() {
    let service = EnvelopeService::new();
    let a = party(&service);
    let b = party(&service);

    for tag in ["E", "x", "", "e "] {
        let input = format!(
            "{}\nHello\n{}\n{}\n{}\n{}",
            tag, a.nonce, b.nonce, a.private_key, b.x509_public_key
        );
        let err = process_batch(&input, &service).unwrap_err();
        assert!(
            matches!(err, CryptoError::InvalidBatchInput { line: 1, .. }),
            "tag {:?} should be rejected",
            tag
        );
    }
}

#[test]
fn test_wrong_key_in_file_is_authentication_error() {
    let service = EnvelopeService::new();
    let a = party(&service);
    let b = party(&service);
    let eve = party(&service);
    let envelope = service
        .encrypt_message("Hello World!!", &a.private_key, &a.nonce, &b.x509_public_key, &b.nonce)
        .unwrap();

    let input = format!(
        "d\n{}\n{}\n{}\n{}\n{}",
        envelope.encrypted_data, b.nonce, a.nonce, eve.private_key, a.x509_public_key
    );
    let err = process_batch(&input, &service).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[test]
fn test_missing_file_is_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = process_batch_file(dir.path().join("absent.txt"), &EnvelopeService::new())
        .unwrap_err();
    assert!(matches!(err, CryptoError::Io(_)));
}

#[test]
fn test_response_serializes_as_encrypted_data() {
    let service = EnvelopeService::new();
    let a = party(&service);
    let b = party(&service);
    let input = format!(
        "e\nHello\n{}\n{}\n{}\n{}",
        a.nonce, b.nonce, a.private_key, b.x509_public_key
    );

    let response = process_batch(&input, &service).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("encryptedData").is_some());
    assert!(json.get("decryptedData").is_none());
}
