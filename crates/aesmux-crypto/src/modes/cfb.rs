//! CFB (Cipher Feedback) modes of operation.
//!
//! CFB-128 and CFB-8 as defined in NIST SP 800-38A §6.3. Both only ever run
//! the block cipher forward, in either direction.

use aesmux_types::{CipherError, AES_BLOCK_SIZE};
use zeroize::Zeroize;

use super::{check_offset, check_output, stream_bytes};
use crate::provider::BlockCipher;

/// CFB-128 chaining state.
///
/// `iv` holds the feedback register, partially overwritten by ciphertext
/// when `offset` is not 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
pub struct Cfb128State {
    pub iv: [u8; AES_BLOCK_SIZE],
    pub offset: usize,
}

impl Cfb128State {
    pub fn new(iv: [u8; AES_BLOCK_SIZE]) -> Self {
        Self { iv, offset: 0 }
    }
}

/// CFB-8 shift register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
pub struct Cfb8State {
    pub iv: [u8; AES_BLOCK_SIZE],
}

impl Cfb8State {
    pub fn new(iv: [u8; AES_BLOCK_SIZE]) -> Self {
        Self { iv }
    }
}

/// Encrypt any number of bytes with CFB-128, resuming at `state.offset`.
pub fn cfb128_encrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    state: &mut Cfb128State,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CipherError> {
    check_offset(state.offset)?;
    check_output(input, output)?;

    let mut pos = state.offset;
    let result = stream_bytes(
        state,
        &mut pos,
        input,
        output,
        |s| {
            let mut block = s.iv;
            cipher.encrypt_block(&mut block)?;
            s.iv = block;
            Ok(())
        },
        |s, n, p| {
            s.iv[n] ^= p;
            s.iv[n]
        },
    );
    state.offset = pos;
    result
}

/// Decrypt any number of bytes with CFB-128, resuming at `state.offset`.
pub fn cfb128_decrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    state: &mut Cfb128State,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CipherError> {
    check_offset(state.offset)?;
    check_output(input, output)?;

    let mut pos = state.offset;
    let result = stream_bytes(
        state,
        &mut pos,
        input,
        output,
        |s| {
            let mut block = s.iv;
            cipher.encrypt_block(&mut block)?;
            s.iv = block;
            Ok(())
        },
        |s, n, c| {
            let p = s.iv[n] ^ c;
            s.iv[n] = c;
            p
        },
    );
    state.offset = pos;
    result
}

/// Encrypt any number of bytes with CFB-8.
pub fn cfb8_encrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    state: &mut Cfb8State,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CipherError> {
    check_output(input, output)?;

    for (out, &p) in output.iter_mut().zip(input) {
        let c = keystream_byte(cipher, &state.iv)? ^ p;
        *out = c;
        shift_in(&mut state.iv, c);
    }
    Ok(())
}

/// Decrypt any number of bytes with CFB-8.
pub fn cfb8_decrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    state: &mut Cfb8State,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CipherError> {
    check_output(input, output)?;

    for (out, &c) in output.iter_mut().zip(input) {
        *out = keystream_byte(cipher, &state.iv)? ^ c;
        shift_in(&mut state.iv, c);
    }
    Ok(())
}

fn keystream_byte<C: BlockCipher + ?Sized>(
    cipher: &C,
    iv: &[u8; AES_BLOCK_SIZE],
) -> Result<u8, CipherError> {
    let mut block = *iv;
    cipher.encrypt_block(&mut block)?;
    Ok(block[0])
}

/// Shift the register one byte left and append the ciphertext byte.
fn shift_in(iv: &mut [u8; AES_BLOCK_SIZE], feedback: u8) {
    iv.copy_within(1.., 0);
    iv[AES_BLOCK_SIZE - 1] = feedback;
}

#[cfg(all(test, feature = "soft-engine"))]
mod tests {
    use aesmux_types::KeyBits;

    use super::*;
    use crate::aes::SoftAesKey;

    fn hex_to_bytes(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn nist_key() -> SoftAesKey {
        SoftAesKey::new(KeyBits::Aes128, &hex_to_bytes("2b7e151628aed2a6abf7158809cf4f3c")).unwrap()
    }

    fn nist_key_256() -> SoftAesKey {
        SoftAesKey::new(
            KeyBits::Aes256,
            &hex_to_bytes("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4"),
        )
        .unwrap()
    }

    fn nist_iv() -> [u8; AES_BLOCK_SIZE] {
        hex_to_bytes("000102030405060708090a0b0c0d0e0f").try_into().unwrap()
    }

    // NIST SP 800-38A F.3.17 / F.3.18: CFB128-AES256
    #[test]
    fn test_cfb128_aes256() {
        let key = nist_key_256();
        let pt = hex_to_bytes("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e5130c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710");
        let expected = "dc7e84bfda79164b7ecd8486985d386039ffed143b28b1c832113c6331e5407bdf10132415e54b92a13ed0a8267ae2f975a385741ab9cef82031623d55b1e471";

        let mut state = Cfb128State::new(nist_iv());
        let mut ct = vec![0u8; pt.len()];
        cfb128_encrypt(&key, &mut state, &pt, &mut ct).unwrap();
        assert_eq!(hex(&ct), expected);

        let mut state = Cfb128State::new(nist_iv());
        let mut back = vec![0u8; ct.len()];
        cfb128_decrypt(&key, &mut state, &ct, &mut back).unwrap();
        assert_eq!(back, pt);
    }

    // NIST SP 800-38A F.3.11 / F.3.12: CFB8-AES256
    #[test]
    fn test_cfb8_aes256() {
        let key = nist_key_256();
        let pt = hex_to_bytes("6bc1bee22e409f96e93d7e117393172aae2d");
        let expected = "dc1f1a8520a64db55fcc8ac554844e889700";

        let mut state = Cfb8State::new(nist_iv());
        let mut ct = vec![0u8; pt.len()];
        cfb8_encrypt(&key, &mut state, &pt, &mut ct).unwrap();
        assert_eq!(hex(&ct), expected);

        let mut state = Cfb8State::new(nist_iv());
        let mut back = vec![0u8; ct.len()];
        cfb8_decrypt(&key, &mut state, &ct, &mut back).unwrap();
        assert_eq!(back, pt);
    }

    // NIST SP 800-38A F.3.13 / F.3.14: CFB128-AES128
    #[test]
    fn test_cfb128_aes128() {
        let key = nist_key();
        let pt = hex_to_bytes("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e5130c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710");
        let expected = "3b3fd92eb72dad20333449f8e83cfb4ac8a64537a0b3a93fcde3cdad9f1ce58b26751f67a3cbb140b1808cf187a4f4dfc04b05357c5d1c0eeac4c66f9ff7f2e6";

        let mut state = Cfb128State::new(nist_iv());
        let mut ct = vec![0u8; pt.len()];
        cfb128_encrypt(&key, &mut state, &pt, &mut ct).unwrap();
        assert_eq!(hex(&ct), expected);
        assert_eq!(state.offset, 0);

        let mut state = Cfb128State::new(nist_iv());
        let mut back = vec![0u8; ct.len()];
        cfb128_decrypt(&key, &mut state, &ct, &mut back).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn test_cfb128_resumes_mid_block() {
        let key = nist_key();
        let pt: Vec<u8> = (0..50u8).collect();

        let mut whole_state = Cfb128State::new(nist_iv());
        let mut whole = vec![0u8; pt.len()];
        cfb128_encrypt(&key, &mut whole_state, &pt, &mut whole).unwrap();
        assert_eq!(whole_state.offset, 50 % 16);

        let mut state = Cfb128State::new(nist_iv());
        let mut parts = vec![0u8; pt.len()];
        for (src, dst) in pt.chunks(7).zip(parts.chunks_mut(7)) {
            cfb128_encrypt(&key, &mut state, src, dst).unwrap();
        }
        assert_eq!(parts, whole);
        assert_eq!(state, whole_state);

        let mut state = Cfb128State::new(nist_iv());
        let mut back = vec![0u8; pt.len()];
        cfb128_decrypt(&key, &mut state, &whole[..3], &mut back[..3]).unwrap();
        cfb128_decrypt(&key, &mut state, &whole[3..], &mut back[3..]).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn test_cfb128_rejects_bad_offset() {
        let key = nist_key();
        let mut state = Cfb128State {
            iv: [0u8; 16],
            offset: 16,
        };
        let mut out = [0u8; 4];
        assert_eq!(
            cfb128_encrypt(&key, &mut state, &[1, 2, 3, 4], &mut out),
            Err(CipherError::InvalidOffset(16))
        );
        assert_eq!(out, [0u8; 4]);
    }

    // NIST SP 800-38A F.3.7 / F.3.8: CFB8-AES128
    #[test]
    fn test_cfb8_aes128() {
        let key = nist_key();
        let pt = hex_to_bytes("6bc1bee22e409f96e93d7e117393172aae2d");
        let expected = "3b79424c9c0dd436bace9e0ed4586a4f32b9";

        let mut state = Cfb8State::new(nist_iv());
        let mut ct = vec![0u8; pt.len()];
        cfb8_encrypt(&key, &mut state, &pt, &mut ct).unwrap();
        assert_eq!(hex(&ct), expected);
        // The register ends with the last 16 ciphertext bytes.
        assert_eq!(state.iv[..], ct[2..]);

        let mut state = Cfb8State::new(nist_iv());
        let mut back = vec![0u8; ct.len()];
        cfb8_decrypt(&key, &mut state, &ct, &mut back).unwrap();
        assert_eq!(back, pt);
        assert_eq!(state.iv[..], ct[2..]);
    }

    #[test]
    fn test_cfb8_roundtrip_unaligned() {
        let key = SoftAesKey::new(KeyBits::Aes256, &[0x33u8; 32]).unwrap();
        let pt = b"feedback is always the ciphertext byte";

        let mut enc = Cfb8State::new([0x44u8; 16]);
        let mut ct = vec![0u8; pt.len()];
        cfb8_encrypt(&key, &mut enc, &pt[..5], &mut ct[..5]).unwrap();
        cfb8_encrypt(&key, &mut enc, &pt[5..], &mut ct[5..]).unwrap();

        let mut dec = Cfb8State::new([0x44u8; 16]);
        let mut back = vec![0u8; ct.len()];
        cfb8_decrypt(&key, &mut dec, &ct, &mut back).unwrap();
        assert_eq!(&back[..], &pt[..]);
        assert_eq!(enc, dec);
    }

    #[test]
    fn test_short_output_rejected() {
        let key = nist_key();
        let mut state = Cfb8State::new([0u8; 16]);
        let mut out = [0u8; 2];
        assert_eq!(
            cfb8_encrypt(&key, &mut state, &[0u8; 3], &mut out),
            Err(CipherError::BufferTooSmall { need: 3, got: 2 })
        );
        assert_eq!(state.iv, [0u8; 16]);
    }
}
