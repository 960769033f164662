/// URL 安全字符集（RFC 3986 unreserved 子集），64 个字符
pub const ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| ID_ALPHABET[rand::random_range(0..ID_ALPHABET.len())] as char)
        .take(length)
        .collect()
}
