use crate::imp::hasher::sha256::SHA256;
use crate::Hasher;

#[test]
fn test_sha256_known_vector() {
    let hasher = SHA256 {};

    let result = hasher.hash_hex(b"abc").unwrap();

    assert_eq!(
        result,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_sha256_empty_input() {
    let hasher = SHA256 {};

    let result = hasher.hash_hex(b"").unwrap();

    assert_eq!(
        result,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_sha256_hashes_raw_bytes_not_encoding() {
    let hasher = SHA256 {};
    let payload = vec![0x00u8, 0xff, 0x10, 0x80];

    // The digest of the raw bytes must differ from the digest of any textual
    // rendering of the same bytes.
    let raw = hasher.hash_hex(&payload).unwrap();
    let base64ish = hasher.hash_hex(b"AP8QgA==").unwrap();

    assert_ne!(raw, base64ish);
    assert_eq!(raw.len(), 64);
    assert!(raw.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_sha256_reader_matches_oneshot() {
    let hasher = SHA256 {};
    let payload = b"diploma file contents".to_vec();

    let oneshot = hasher.hash(&payload).unwrap();
    let streamed = SHA256::hash_reader(&mut payload.as_slice()).unwrap();

    assert_eq!(oneshot, streamed);
}
