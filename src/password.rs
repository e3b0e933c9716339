// password.rs - RFC 2865 §5.2 User-Password obfuscation
//
// b[0]   = MD5(secret || request_authenticator)
// b[i>0] = MD5(secret || cipher[i-1])
// cipher[i] = plaintext[i] XOR b[i]
//
// Deobfuscation mirrors this, XORing ciphertext blocks against the same
// keystream, then stripping trailing NULs.

use md5::{Digest, Md5};

const BLOCK: usize = 16;

fn keystream_block(secret: &str, prev: &[u8]) -> [u8; BLOCK] {
    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    hasher.update(prev);
    let digest = hasher.finalize();
    let mut block = [0u8; BLOCK];
    block.copy_from_slice(&digest);
    block
}

/// Obfuscate a cleartext User-Password for the wire.
///
/// Pads with zeros to a multiple of 16 bytes before XOR-ing against the
/// MD5 keystream. Empty input still produces one zero-filled block per
/// RFC 2865 (the AVP must carry at least 16 bytes of ciphertext).
pub fn obfuscate(plaintext: &[u8], authenticator: &[u8; 16], secret: &str) -> Vec<u8> {
    let padded_len = plaintext.len().div_ceil(BLOCK).max(1) * BLOCK;
    let mut padded = vec![0u8; padded_len];
    padded[..plaintext.len()].copy_from_slice(plaintext);

    let mut out = vec![0u8; padded_len];
    let mut prev: &[u8] = authenticator;
    let mut keystream;
    for chunk_idx in 0..(padded_len / BLOCK) {
        keystream = keystream_block(secret, prev);
        let start = chunk_idx * BLOCK;
        for i in 0..BLOCK {
            out[start + i] = padded[start + i] ^ keystream[i];
        }
        prev = &out[start..start + BLOCK];
    }
    out
}

/// Deobfuscate a ciphertext User-Password, stripping the zero padding.
pub fn deobfuscate(ciphertext: &[u8], authenticator: &[u8; 16], secret: &str) -> Vec<u8> {
    let mut out = vec![0u8; ciphertext.len() - (ciphertext.len() % BLOCK)];
    let mut prev: &[u8] = authenticator;
    for chunk_idx in 0..(out.len() / BLOCK) {
        let keystream = keystream_block(secret, prev);
        let start = chunk_idx * BLOCK;
        for i in 0..BLOCK {
            out[start + i] = ciphertext[start + i] ^ keystream[i];
        }
        prev = &ciphertext[start..start + BLOCK];
    }
    while out.last() == Some(&0) {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "top-secret";
    const AUTHENTICATOR: [u8; 16] = [
        0x37, 0x4c, 0x72, 0x21, 0x3f, 0xb1, 0x66, 0xbe, 0x67, 0x14, 0xef, 0x83, 0x78, 0x78, 0x61,
        0xf0,
    ];

    #[test]
    fn s1_deobfuscate_short_password() {
        let ciphertext = [
            0xB6, 0x89, 0x18, 0x42, 0x3E, 0xA9, 0x9B, 0x9F, 0x50, 0xBD, 0x7C, 0x89, 0x80, 0xC3,
            0xB2, 0x11,
        ];
        let plain = deobfuscate(&ciphertext, &AUTHENTICATOR, SECRET);
        assert_eq!(plain, b"super-password");
    }

    #[test]
    fn s2_deobfuscate_long_password() {
        let ciphertext = [
            0xA4, 0x9D, 0x09, 0x46, 0x2D, 0xE5, 0x8A, 0x9F, 0x42, 0xAF, 0x6A, 0x87, 0x93, 0xC6,
            0xD3, 0x70, 0x72, 0xCA, 0x1D, 0x5B, 0xED, 0x68, 0xCA, 0xFA, 0x78, 0x92, 0x01, 0xF7,
            0x44, 0x08, 0xCA, 0x98,
        ];
        let plain = deobfuscate(&ciphertext, &AUTHENTICATOR, SECRET);
        assert_eq!(plain, vec![b'a'; 30]);
    }

    #[test]
    fn round_trips_for_various_lengths() {
        for len in [1usize, 2, 15, 16, 17, 31, 32, 100, 128] {
            let plaintext = vec![b'x'; len];
            let cipher = obfuscate(&plaintext, &AUTHENTICATOR, SECRET);
            assert_eq!(cipher.len() % BLOCK, 0);
            let recovered = deobfuscate(&cipher, &AUTHENTICATOR, SECRET);
            assert_eq!(recovered, plaintext);
        }
    }

    #[test]
    fn encode_matches_scenario_one() {
        let cipher = obfuscate(b"super-password", &AUTHENTICATOR, SECRET);
        let expected = [
            0xB6, 0x89, 0x18, 0x42, 0x3E, 0xA9, 0x9B, 0x9F, 0x50, 0xBD, 0x7C, 0x89, 0x80, 0xC3,
            0xB2, 0x11,
        ];
        assert_eq!(cipher, expected);
    }
}
