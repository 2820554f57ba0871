//! End-to-end exercises of the packetized stream protocol through the
//! public API: an encrypter/decrypter pair sharing a key, payloads
//! delivered in order, reordered, and with losses.

use streamcrypt::consts::PACKETSIZE;
use streamcrypt::{Keystream, StreamDecrypter, StreamEncrypter};

const KEY: &[u8] = b"roundtrip integration key";

fn pair(key: &[u8]) -> (StreamEncrypter, StreamDecrypter) {
    let tx = StreamEncrypter::new(Keystream::rc4(key).unwrap());
    let rx = StreamDecrypter::new(Keystream::rc4(key).unwrap()).unwrap();
    (tx, rx)
}

fn payload(n: usize, len: usize) -> Vec<u8> {
    (0..len).map(|k| (k * 31 + n * 7) as u8).collect()
}

#[test]
fn three_chunks_in_order() {
    let (mut tx, mut rx) = pair(KEY);

    let plains: Vec<Vec<u8>> = (0..3).map(|n| payload(n, 100)).collect();

    for plain in &plains {
        let mut chunk = plain.clone();
        let id = tx.send_data(&mut chunk).unwrap();
        assert_ne!(&chunk, plain);

        assert!(rx.receive_data(&mut chunk, id).unwrap());
        assert_eq!(&chunk, plain);
    }
}

#[test]
fn three_chunks_delivered_b_a_c() {
    let (mut tx, mut rx) = pair(KEY);

    let plains: Vec<Vec<u8>> = (0..3).map(|n| payload(n, 100)).collect();
    let sent: Vec<(u16, Vec<u8>)> = plains
        .iter()
        .map(|p| {
            let mut chunk = p.clone();
            let id = tx.send_data(&mut chunk).unwrap();
            (id, chunk)
        })
        .collect();

    for &n in &[1usize, 0, 2] {
        let (id, ref ciphertext) = sent[n];
        let mut chunk = ciphertext.clone();
        assert!(rx.receive_data(&mut chunk, id).unwrap());
        assert_eq!(chunk, plains[n]);
    }
}

#[test]
fn long_stream_with_mixed_lengths() {
    let (mut tx, mut rx) = pair(KEY);

    for n in 0..150 {
        let len = match n % 4 {
            0 => 1,
            1 => 100,
            2 => 347,
            _ => PACKETSIZE,
        };
        let plain = payload(n, len);
        let mut chunk = plain.clone();
        let id = tx.send_data(&mut chunk).unwrap();

        assert!(rx.receive_data(&mut chunk, id).unwrap());
        assert_eq!(chunk, plain);
    }
}

#[test]
fn reordering_within_a_window_recovers_everything() {
    let (mut tx, mut rx) = pair(KEY);

    let count = 20;
    let plains: Vec<Vec<u8>> = (0..count).map(|n| payload(n, 64)).collect();
    let sent: Vec<(u16, Vec<u8>)> = plains
        .iter()
        .map(|p| {
            let mut chunk = p.clone();
            let id = tx.send_data(&mut chunk).unwrap();
            (id, chunk)
        })
        .collect();

    // deterministic shuffle: all evens first, then the odds reversed
    let mut order: Vec<usize> = (0..count).step_by(2).collect();
    order.extend((0..count).skip(1).step_by(2).rev());

    for n in order {
        let (id, ref ciphertext) = sent[n];
        let mut chunk = ciphertext.clone();
        assert!(rx.receive_data(&mut chunk, id).unwrap(), "chunk {n} lost");
        assert_eq!(chunk, plains[n]);
    }
}

#[test]
fn losses_within_the_window_do_not_desync() {
    let (mut tx, mut rx) = pair(KEY);

    for n in 0..60 {
        let plain = payload(n, 200);
        let mut chunk = plain.clone();
        let id = tx.send_data(&mut chunk).unwrap();

        // deliver only every other packet
        if n % 2 == 0 {
            assert!(rx.receive_data(&mut chunk, id).unwrap());
            assert_eq!(chunk, plain);
        }
    }
}

#[test]
fn mismatched_keys_do_not_decrypt() {
    let mut tx = StreamEncrypter::new(Keystream::rc4(KEY).unwrap());
    let mut rx = StreamDecrypter::new(Keystream::rc4(b"a different key").unwrap()).unwrap();

    let plain = payload(0, 100);
    let mut chunk = plain.clone();
    let id = tx.send_data(&mut chunk).unwrap();

    // either the identifier is unknown or the recovered bytes are wrong
    if rx.receive_data(&mut chunk, id).unwrap() {
        assert_ne!(chunk, plain);
    }
}
