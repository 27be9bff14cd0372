/// XOR, zero padding and AES-128 ECB/CBC byte transforms
use aes::Aes128;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use crate::error::SaveError;

/// AES block size; padding and both block modes work in these units.
pub const BLOCK_SIZE: usize = 16;

/// Right-pads with zero bytes to the next multiple of 16.
///
/// Input that is already block-aligned gets no padding at all, not a full
/// extra block (unlike PKCS#7). `unpad` depends on exactly this behavior,
/// as does the on-disk format.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let mut padded = data.to_vec();
    let rem = data.len() % BLOCK_SIZE;
    if rem != 0 {
        padded.resize(data.len() + BLOCK_SIZE - rem, 0);
    }
    padded
}

/// Strips all trailing zero bytes.
///
/// There is no length field in the format, so padding zeros cannot be told
/// apart from genuine trailing zeros in the plaintext: a payload that
/// itself ends in 0x00 comes back truncated. JSON text never ends in a
/// zero byte, so the save path is unaffected.
pub fn unpad(data: &[u8]) -> Vec<u8> {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    data[..end].to_vec()
}

/// XORs every byte against the low byte of `key`. Self-inverse; a key
/// whose low byte is zero is the identity transform. Length-preserving,
/// no padding.
pub fn xor_bytes(data: &[u8], key: u32) -> Vec<u8> {
    let k = (key & 0xFF) as u8;
    data.iter().map(|&b| b ^ k).collect()
}

fn aes128(key: &[u8]) -> Result<Aes128, SaveError> {
    if key.len() != BLOCK_SIZE {
        return Err(SaveError::Crypto(format!(
            "AES key must be {BLOCK_SIZE} bytes, got {}",
            key.len()
        )));
    }
    Ok(Aes128::new(GenericArray::from_slice(key)))
}

fn check_iv(iv: &[u8]) -> Result<(), SaveError> {
    if iv.len() != BLOCK_SIZE {
        return Err(SaveError::Crypto(format!(
            "IV must be {BLOCK_SIZE} bytes, got {}",
            iv.len()
        )));
    }
    Ok(())
}

fn check_cipher_len(data: &[u8]) -> Result<(), SaveError> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(SaveError::Crypto(format!(
            "ciphertext length {} is not a multiple of {BLOCK_SIZE}",
            data.len()
        )));
    }
    Ok(())
}

/// AES-128-ECB over the zero-padded input. No IV; identical plaintext
/// blocks produce identical ciphertext blocks.
pub fn encrypt_ecb(data: &[u8], key: &[u8]) -> Result<Vec<u8>, SaveError> {
    let cipher = aes128(key)?;
    let mut out = pad(data);
    for block in out.chunks_exact_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(out)
}

/// Inverse of `encrypt_ecb`; unpads after decrypting.
pub fn decrypt_ecb(data: &[u8], key: &[u8]) -> Result<Vec<u8>, SaveError> {
    let cipher = aes128(key)?;
    check_cipher_len(data)?;
    let mut out = data.to_vec();
    for block in out.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(unpad(&out))
}

/// AES-128-CBC over the zero-padded input, chained from `iv`.
pub fn encrypt_cbc(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, SaveError> {
    let cipher = aes128(key)?;
    check_iv(iv)?;

    let mut out = pad(data);
    let mut prev = [0u8; BLOCK_SIZE];
    prev.copy_from_slice(iv);

    for block in out.chunks_exact_mut(BLOCK_SIZE) {
        for (b, p) in block.iter_mut().zip(prev.iter()) {
            *b ^= p;
        }
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
        prev.copy_from_slice(block);
    }

    Ok(out)
}

/// Inverse of `encrypt_cbc`; unpads after decrypting.
pub fn decrypt_cbc(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, SaveError> {
    let cipher = aes128(key)?;
    check_iv(iv)?;
    check_cipher_len(data)?;

    let mut out = data.to_vec();
    let mut prev = [0u8; BLOCK_SIZE];
    prev.copy_from_slice(iv);

    for block in out.chunks_exact_mut(BLOCK_SIZE) {
        let mut saved = [0u8; BLOCK_SIZE];
        saved.copy_from_slice(block);
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
        for (b, p) in block.iter_mut().zip(prev.iter()) {
            *b ^= p;
        }
        prev = saved;
    }

    Ok(unpad(&out))
}
