//! Cross-mode streaming laws: output must not depend on how the caller
//! chunks the input, and every mode must round-trip.

use cipherstream_modes::aes::{AesDecryptor, AesEncryptor};
use cipherstream_modes::buffer::ByteBuffer;
use cipherstream_modes::modes::{CbcMode, CfbMode, CtrMode, EcbMode, GcmConfig, GcmMode, OfbMode};
use cipherstream_modes::util::Iv;
use cipherstream_types::{CryptoError, ModeStatus};

const KEY: [u8; 16] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
];
const IV: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];

const LENGTHS: [usize; 10] = [0, 1, 15, 16, 17, 31, 32, 33, 47, 64];
const CHUNKS: [usize; 5] = [1, 3, 7, 16, 64];

fn message(len: usize) -> Vec<u8> {
    // deterministic, non-repeating filler
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect()
}

/// Feed `data` through a streaming step in `chunk`-sized pieces.
fn stream_through<F>(mut step: F, data: &[u8], chunk: usize) -> Vec<u8>
where
    F: FnMut(&mut ByteBuffer, &mut ByteBuffer, bool) -> Result<ModeStatus, CryptoError>,
{
    let mut input = ByteBuffer::new();
    let mut output = ByteBuffer::new();
    if data.is_empty() {
        step(&mut input, &mut output, true).unwrap();
        return output.bytes().to_vec();
    }
    let mut fed = 0;
    while fed < data.len() {
        let end = (fed + chunk).min(data.len());
        input.put_bytes(&data[fed..end]);
        fed = end;
        let status = step(&mut input, &mut output, fed == data.len()).unwrap();
        if fed == data.len() {
            assert_eq!(status, ModeStatus::Complete);
        }
    }
    output.bytes().to_vec()
}

#[test]
fn cfb_chunking_is_invisible_and_round_trips() {
    for len in LENGTHS {
        let msg = message(len);
        let mut one_shot = CfbMode::new(AesEncryptor::new(&KEY).unwrap());
        one_shot.start(&Iv::from(&IV[..])).unwrap();
        let expected = stream_through(|i, o, f| one_shot.encrypt(i, o, f), &msg, 64);

        for chunk in CHUNKS {
            let mut mode = CfbMode::new(AesEncryptor::new(&KEY).unwrap());
            mode.start(&Iv::from(&IV[..])).unwrap();
            let ct = stream_through(|i, o, f| mode.encrypt(i, o, f), &msg, chunk);
            assert_eq!(ct, expected, "cfb len={len} chunk={chunk}");

            let mut dec = CfbMode::new(AesEncryptor::new(&KEY).unwrap());
            dec.start(&Iv::from(&IV[..])).unwrap();
            let pt = stream_through(|i, o, f| dec.decrypt(i, o, f), &ct, chunk);
            assert_eq!(pt, msg, "cfb round trip len={len} chunk={chunk}");
        }
    }
}

#[test]
fn ofb_chunking_is_invisible_and_round_trips() {
    for len in LENGTHS {
        let msg = message(len);
        let mut one_shot = OfbMode::new(AesEncryptor::new(&KEY).unwrap());
        one_shot.start(&Iv::from(&IV[..])).unwrap();
        let expected = stream_through(|i, o, f| one_shot.apply_keystream(i, o, f), &msg, 64);

        for chunk in CHUNKS {
            let mut mode = OfbMode::new(AesEncryptor::new(&KEY).unwrap());
            mode.start(&Iv::from(&IV[..])).unwrap();
            let ct = stream_through(|i, o, f| mode.apply_keystream(i, o, f), &msg, chunk);
            assert_eq!(ct, expected, "ofb len={len} chunk={chunk}");

            let mut dec = OfbMode::new(AesEncryptor::new(&KEY).unwrap());
            dec.start(&Iv::from(&IV[..])).unwrap();
            let pt = stream_through(|i, o, f| dec.apply_keystream(i, o, f), &ct, chunk);
            assert_eq!(pt, msg, "ofb round trip len={len} chunk={chunk}");
        }
    }
}

#[test]
fn ctr_chunking_is_invisible_and_round_trips() {
    for len in LENGTHS {
        let msg = message(len);
        let mut one_shot = CtrMode::new(AesEncryptor::new(&KEY).unwrap());
        one_shot.start(&Iv::from(&IV[..])).unwrap();
        let expected = stream_through(|i, o, f| one_shot.apply_keystream(i, o, f), &msg, 64);

        for chunk in CHUNKS {
            let mut mode = CtrMode::new(AesEncryptor::new(&KEY).unwrap());
            mode.start(&Iv::from(&IV[..])).unwrap();
            let ct = stream_through(|i, o, f| mode.apply_keystream(i, o, f), &msg, chunk);
            assert_eq!(ct, expected, "ctr len={len} chunk={chunk}");

            let mut dec = CtrMode::new(AesEncryptor::new(&KEY).unwrap());
            dec.start(&Iv::from(&IV[..])).unwrap();
            let pt = stream_through(|i, o, f| dec.apply_keystream(i, o, f), &ct, chunk);
            assert_eq!(pt, msg, "ctr round trip len={len} chunk={chunk}");
        }
    }
}

#[test]
fn ecb_padded_round_trip_every_length() {
    let mut enc = EcbMode::new(AesEncryptor::new(&KEY).unwrap());
    let mut dec = EcbMode::new(AesDecryptor::new(&KEY).unwrap());
    for len in 0..48 {
        let msg = message(len);
        enc.start();
        let mut input = ByteBuffer::from_bytes(&msg);
        enc.pad(&mut input);
        let mut ct = ByteBuffer::new();
        enc.encrypt(&mut input, &mut ct, true).unwrap();
        assert_eq!(ct.len() % 16, 0);

        dec.start();
        let mut pt = ByteBuffer::new();
        dec.decrypt(&mut ct, &mut pt, true).unwrap();
        assert!(dec.unpad(&mut pt, 0));
        assert_eq!(pt.bytes(), &msg[..], "ecb len={len}");
    }
}

#[test]
fn cbc_padded_round_trip_every_length_and_chunking() {
    for len in 0..48 {
        let msg = message(len);
        let mut padded = ByteBuffer::from_bytes(&msg);
        {
            let tmp = CbcMode::new(AesEncryptor::new(&KEY).unwrap());
            tmp.pad(&mut padded);
        }
        let padded = padded.bytes().to_vec();

        let mut one_shot = CbcMode::new(AesEncryptor::new(&KEY).unwrap());
        one_shot.start(Some(&Iv::from(&IV[..]))).unwrap();
        let expected = stream_through(|i, o, f| one_shot.encrypt(i, o, f), &padded, 64);

        for chunk in CHUNKS {
            let mut enc = CbcMode::new(AesEncryptor::new(&KEY).unwrap());
            enc.start(Some(&Iv::from(&IV[..]))).unwrap();
            let ct = stream_through(|i, o, f| enc.encrypt(i, o, f), &padded, chunk);
            assert_eq!(ct, expected, "cbc len={len} chunk={chunk}");

            let mut dec = CbcMode::new(AesDecryptor::new(&KEY).unwrap());
            dec.start(Some(&Iv::from(&IV[..]))).unwrap();
            let mut pt_buf = ByteBuffer::from_bytes(&stream_through(
                |i, o, f| dec.decrypt(i, o, f),
                &ct,
                chunk,
            ));
            assert!(dec.unpad(&mut pt_buf, 0));
            assert_eq!(pt_buf.bytes(), &msg[..], "cbc round trip len={len} chunk={chunk}");
        }
    }
}

#[test]
fn gcm_chunking_preserves_ciphertext_and_tag() {
    let aad = b"header bytes";
    for len in LENGTHS {
        let msg = message(len);

        let mut one_shot = GcmMode::new(AesEncryptor::new(&KEY).unwrap()).unwrap();
        one_shot
            .start(GcmConfig::encrypt(&IV[..12]).with_additional_data(aad))
            .unwrap();
        let expected_ct = stream_through(|i, o, f| one_shot.encrypt(i, o, f), &msg, 64);
        assert!(one_shot.after_finish());
        let expected_tag = one_shot.tag().to_vec();

        for chunk in CHUNKS {
            let mut mode = GcmMode::new(AesEncryptor::new(&KEY).unwrap()).unwrap();
            mode.start(GcmConfig::encrypt(&IV[..12]).with_additional_data(aad))
                .unwrap();
            let ct = stream_through(|i, o, f| mode.encrypt(i, o, f), &msg, chunk);
            assert!(mode.after_finish());
            assert_eq!(ct, expected_ct, "gcm ct len={len} chunk={chunk}");
            assert_eq!(mode.tag(), &expected_tag[..], "gcm tag len={len} chunk={chunk}");

            let mut dec = GcmMode::new(AesEncryptor::new(&KEY).unwrap()).unwrap();
            dec.start(
                GcmConfig::decrypt(&IV[..12], &expected_tag).with_additional_data(aad),
            )
            .unwrap();
            let pt = stream_through(|i, o, f| dec.decrypt(i, o, f), &ct, chunk);
            assert!(dec.after_finish(), "gcm verify len={len} chunk={chunk}");
            assert_eq!(pt, msg, "gcm round trip len={len} chunk={chunk}");
        }
    }
}

#[test]
fn gcm_flipping_any_bit_breaks_authentication() {
    let msg = message(33);
    let mut enc = GcmMode::new(AesEncryptor::new(&KEY).unwrap()).unwrap();
    enc.start(GcmConfig::encrypt(&IV[..12])).unwrap();
    let mut input = ByteBuffer::from_bytes(&msg);
    let mut output = ByteBuffer::new();
    enc.encrypt(&mut input, &mut output, true).unwrap();
    assert!(enc.after_finish());
    let ct = output.bytes().to_vec();
    let tag = enc.tag().to_vec();

    let mut dec = GcmMode::new(AesEncryptor::new(&KEY).unwrap()).unwrap();
    let verify = |dec: &mut GcmMode<AesEncryptor>, ct: &[u8], tag: &[u8]| -> bool {
        dec.start(GcmConfig::decrypt(&IV[..12], tag)).unwrap();
        let mut input = ByteBuffer::from_bytes(ct);
        let mut output = ByteBuffer::new();
        dec.decrypt(&mut input, &mut output, true).unwrap();
        dec.after_finish()
    };
    assert!(verify(&mut dec, &ct, &tag));

    for byte in 0..ct.len() {
        for bit in 0..8 {
            let mut tampered = ct.clone();
            tampered[byte] ^= 1 << bit;
            assert!(
                !verify(&mut dec, &tampered, &tag),
                "ciphertext bit {byte}.{bit} not detected"
            );
        }
    }
    for byte in 0..tag.len() {
        for bit in 0..8 {
            let mut tampered = tag.clone();
            tampered[byte] ^= 1 << bit;
            assert!(
                !verify(&mut dec, &ct, &tampered),
                "tag bit {byte}.{bit} not detected"
            );
        }
    }
}

#[test]
fn one_primitive_backs_many_streams() {
    // the blanket &T impl lets several instances share a single key schedule
    let aes = AesEncryptor::new(&KEY).unwrap();
    let mut ctr = CtrMode::new(&aes);
    let mut ofb = OfbMode::new(&aes);
    ctr.start(&Iv::from(&IV[..])).unwrap();
    ofb.start(&Iv::from(&IV[..])).unwrap();

    let msg = message(40);
    let ct_ctr = stream_through(|i, o, f| ctr.apply_keystream(i, o, f), &msg, 16);
    let ct_ofb = stream_through(|i, o, f| ofb.apply_keystream(i, o, f), &msg, 16);
    assert_ne!(ct_ctr, ct_ofb);
    assert_eq!(ct_ctr.len(), msg.len());
    assert_eq!(ct_ofb.len(), msg.len());
}
