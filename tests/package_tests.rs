//! Integration tests for package files and the file wrappers.

use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;

use txvault::crypto::KdfParams;
use txvault::package::file::{decrypt_file, encrypt_file};
use txvault::package::{
    decrypt_package, decrypt_package_as, encrypt, read_package, write_package,
};
use txvault::TxVaultError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Deposit {
    transaction_date: String,
    amount: f64,
    description: String,
}

// ---------------------------------------------------------------------------
// Package files
// ---------------------------------------------------------------------------

#[test]
fn sealed_package_survives_disk_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("customer_1_encrypted.json");
    let record = json!({"customer_id": "c1", "purchases": []});

    write_package(&path, &encrypt(&record, "pin1234").unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(on_disk["v"], 1);
    assert!(on_disk["encrypted"].is_string());
    assert!(on_disk["salt"].is_string());

    let pkg = read_package(&path).unwrap();
    assert_eq!(decrypt_package(&pkg, "pin1234").unwrap(), record);
}

#[test]
fn package_without_version_field_still_opens() {
    let pkg = encrypt(&json!({"amount": 5}), "pw").unwrap();
    let legacy = format!(
        r#"{{"encrypted": "{}", "salt": "{}"}}"#,
        pkg.encrypted, pkg.salt
    );

    let parsed = txvault::EncryptedPackage::from_json(&legacy).unwrap();
    assert_eq!(decrypt_package(&parsed, "pw").unwrap(), json!({"amount": 5}));
}

#[test]
fn package_claiming_huge_kdf_cost_is_rejected_quickly() {
    let pkg = encrypt(&json!({"amount": 5}), "pw").unwrap();
    let crafted = format!(
        r#"{{"v": 1, "encrypted": "{}", "salt": "{}", "kdf_iterations": 4294967295}}"#,
        pkg.encrypted, pkg.salt
    );

    let parsed = txvault::EncryptedPackage::from_json(&crafted).unwrap();
    let started = Instant::now();
    let err = decrypt_package(&parsed, "pw").unwrap_err();

    assert!(matches!(err, TxVaultError::KeyDerivation(_)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn typed_roundtrip() {
    let deposit = Deposit {
        transaction_date: "2025-04-01".into(),
        amount: 1200.0,
        description: "Payroll".into(),
    };

    let pkg = encrypt(&deposit, "pw").unwrap();
    let back: Deposit = decrypt_package_as(&pkg, "pw").unwrap();
    assert_eq!(back, deposit);
}

#[test]
fn concurrent_encrypt_calls_are_independent() {
    let record = Arc::new(json!({"amount": 45.99, "merchant": "Target"}));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let record = Arc::clone(&record);
            thread::spawn(move || {
                let pass = format!("pass-{i}");
                let pkg = encrypt(&*record, &pass).unwrap();
                (pass, pkg)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for (pass, pkg) in &results {
        assert_eq!(&decrypt_package(pkg, pass).unwrap(), &*record);
    }
    assert_ne!(results[0].1.salt, results[1].1.salt);
}

// ---------------------------------------------------------------------------
// File wrappers
// ---------------------------------------------------------------------------

#[test]
fn file_roundtrip_restores_bytes() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("statement.bin");
    let sealed = dir.path().join("out").join("statement.bin.sealed.json");
    let restored = dir.path().join("restored.bin");

    let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    fs::write(&input, &bytes).unwrap();

    encrypt_file(&input, &sealed, "file-pass", &KdfParams::default()).unwrap();
    let written = decrypt_file(&sealed, &restored, "file-pass").unwrap();

    assert_eq!(written, bytes.len());
    assert_eq!(fs::read(&restored).unwrap(), bytes);
}

#[test]
fn sealed_file_record_has_single_data_field() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("note.txt");
    let sealed = dir.path().join("note.txt.sealed.json");
    fs::write(&input, b"hello").unwrap();

    let pkg = encrypt_file(&input, &sealed, "pw", &KdfParams::default()).unwrap();
    let record = decrypt_package(&pkg, "pw").unwrap();

    assert_eq!(record, json!({"data": "aGVsbG8="}));
}

#[test]
fn file_wrong_passphrase_fails_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("note.txt");
    let sealed = dir.path().join("note.txt.sealed.json");
    let restored = dir.path().join("restored.txt");
    fs::write(&input, b"secret").unwrap();

    encrypt_file(&input, &sealed, "right", &KdfParams::default()).unwrap();
    let err = decrypt_file(&sealed, &restored, "wrong").unwrap_err();

    assert!(matches!(err, TxVaultError::Authentication));
    assert!(!restored.exists());
}

#[test]
fn opening_a_record_package_as_file_is_encoding_error() {
    let dir = TempDir::new().unwrap();
    let sealed = dir.path().join("customer_encrypted.json");
    write_package(&sealed, &encrypt(&json!({"amount": 1}), "pw").unwrap()).unwrap();

    let err = decrypt_file(&sealed, &dir.path().join("x"), "pw").unwrap_err();
    assert!(matches!(err, TxVaultError::Encoding(_)));
}

#[cfg(unix)]
#[test]
fn decrypt_file_does_not_follow_planted_temp_symlink() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("note.txt");
    let sealed = dir.path().join("note.txt.sealed.json");
    let restored = dir.path().join("restored.txt");
    let sink = dir.path().join("sink");
    fs::write(&input, b"top secret plaintext").unwrap();
    encrypt_file(&input, &sealed, "pw", &KdfParams::default()).unwrap();

    // Plant links at the old fixed temp name and a few likely variants.
    for name in [".restored.txt.tmp", ".restored.txt.tmp-0"] {
        std::os::unix::fs::symlink(&sink, dir.path().join(name)).unwrap();
    }

    decrypt_file(&sealed, &restored, "pw").unwrap();

    assert!(!sink.exists());
    assert_eq!(fs::read(&restored).unwrap(), b"top secret plaintext");
    assert!(!fs::symlink_metadata(&restored).unwrap().file_type().is_symlink());
}

#[test]
fn missing_input_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = encrypt_file(
        &dir.path().join("missing"),
        &dir.path().join("out.json"),
        "pw",
        &KdfParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TxVaultError::Io(_)));
}
