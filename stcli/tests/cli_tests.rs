use assert_cmd::Command;
use std::fs;

fn stcli() -> Command {
    Command::cargo_bin("stcli").unwrap()
}

#[test]
fn encrypt_then_decrypt_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("key.bin");
    let plain_path = dir.path().join("plain.bin");
    let cipher_path = dir.path().join("cipher.bin");
    let out_path = dir.path().join("recovered.bin");

    fs::write(&key_path, b"an entirely reasonable key").unwrap();

    // three packets worth of data
    let plaintext: Vec<u8> = (0..1500u32).map(|n| (n * 13) as u8).collect();
    fs::write(&plain_path, &plaintext).unwrap();

    stcli()
        .args(["encrypt", "--key"])
        .arg(&key_path)
        .arg("--in")
        .arg(&plain_path)
        .arg("--out")
        .arg(&cipher_path)
        .assert()
        .success();

    // framed ciphertext is larger, and the first payload is scrambled
    let ciphertext = fs::read(&cipher_path).unwrap();
    assert!(ciphertext.len() > plaintext.len());
    assert_ne!(&ciphertext[4..104], &plaintext[..100]);

    stcli()
        .args(["decrypt", "--key"])
        .arg(&key_path)
        .arg("--in")
        .arg(&cipher_path)
        .arg("--out")
        .arg(&out_path)
        .assert()
        .success();

    assert_eq!(fs::read(&out_path).unwrap(), plaintext);
}

#[test]
fn decrypting_with_the_wrong_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("key.bin");
    let wrong_key_path = dir.path().join("wrong.bin");
    let plain_path = dir.path().join("plain.bin");
    let cipher_path = dir.path().join("cipher.bin");
    let out_path = dir.path().join("recovered.bin");

    fs::write(&key_path, b"the right key").unwrap();
    fs::write(&wrong_key_path, b"not the right key").unwrap();
    fs::write(&plain_path, vec![42u8; 1600]).unwrap();

    stcli()
        .args(["encrypt", "--key"])
        .arg(&key_path)
        .arg("--in")
        .arg(&plain_path)
        .arg("--out")
        .arg(&cipher_path)
        .assert()
        .success();

    stcli()
        .args(["decrypt", "--key"])
        .arg(&wrong_key_path)
        .arg("--in")
        .arg(&cipher_path)
        .arg("--out")
        .arg(&out_path)
        .assert()
        .failure()
        .stderr(predicates::str::contains("outside the decryption window"));
}

#[test]
fn empty_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("key.bin");
    let plain_path = dir.path().join("plain.bin");

    fs::write(&key_path, b"").unwrap();
    fs::write(&plain_path, b"data").unwrap();

    stcli()
        .args(["encrypt", "--key"])
        .arg(&key_path)
        .arg("--in")
        .arg(&plain_path)
        .arg("--out")
        .arg(dir.path().join("cipher.bin"))
        .assert()
        .failure()
        .stderr(predicates::str::contains("at least one byte"));
}

#[test]
fn hash_prints_the_known_vector() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("marked.bin");

    let mut data = [0u8; 128];
    data[0] = 6;
    data[64] = 3;
    fs::write(&data_path, data).unwrap();

    stcli()
        .args(["hash", "--algorithm", "rc4", "--bits", "64"])
        .arg(&data_path)
        .assert()
        .success()
        .stdout(predicates::str::contains("FAFF300339376F54"));
}

#[test]
fn hash_walks_directories_recursively() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("one.txt"), b"first file").unwrap();
    fs::write(sub.join("two.txt"), b"second file").unwrap();

    stcli()
        .args(["hash", "--algorithm", "xor", "--recursive"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("one.txt"))
        .stdout(predicates::str::contains("two.txt"));
}

#[test]
fn hash_rejects_unsupported_widths() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("data.bin");
    fs::write(&data_path, b"data").unwrap();

    stcli()
        .args(["hash", "--bits", "100"])
        .arg(&data_path)
        .assert()
        .failure()
        .stderr(predicates::str::contains("64, 128, 256 or 512"));
}
