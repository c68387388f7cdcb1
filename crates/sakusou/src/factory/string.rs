//! Random strings for request payloads
//!
//! Every generator draws from the caller's random source, so a seeded
//! `StdRng` makes fixtures reproducible.

use rand::Rng;
use rand::seq::SliceRandom;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ALPHANUMERIC_SYMBOL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789\
    !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const EMAIL_ACCOUNT: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._+-";

const KANA: [char; 92] = [
    'あ', 'い', 'う', 'え', 'お', 'か', 'き', 'く', 'け', 'こ', 'さ', 'し', 'す', 'せ', 'そ', 'た',
    'ち', 'つ', 'て', 'と', 'な', 'に', 'ぬ', 'ね', 'の', 'は', 'ひ', 'ふ', 'へ', 'ほ', 'ま', 'み',
    'む', 'め', 'も', 'や', 'ゆ', 'よ', 'ら', 'り', 'る', 'れ', 'ろ', 'わ', 'を', 'ん',
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ヲ', 'ン',
];

/// Domain used by [`email_address`] callers that have no preference.
pub const DEFAULT_EMAIL_DOMAIN: &str = "testing.com";

fn pick<R, T>(rng: &mut R, pool: &[T], n: usize) -> String
where
    R: Rng + ?Sized,
    T: Copy + Into<char>,
{
    (0..n)
        .filter_map(|_| pool.choose(rng).copied().map(Into::into))
        .collect()
}

/// `n` random ASCII letters and digits.
pub fn alphanumeric<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    pick(rng, ALPHANUMERIC, n)
}

/// `n` random ASCII letters, digits and punctuation.
pub fn alphanumeric_symbol<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    pick(rng, ALPHANUMERIC_SYMBOL, n)
}

/// `n` random hiragana and katakana characters.
pub fn jp_alphabet<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    pick(rng, &KANA, n)
}

/// A random decimal number with exactly `digits` digits and no leading zero.
///
/// Zero digits yield an empty string.
pub fn decimal<R: Rng + ?Sized>(rng: &mut R, digits: usize) -> String {
    let mut number = String::with_capacity(digits);
    for position in 0..digits {
        let low = if position == 0 { 1 } else { 0 };
        number.push(char::from(b'0' + rng.gen_range(low..=9u8)));
    }
    number
}

/// A random lower-case hex token of `n / 2` random bytes.
pub fn hexadecimal<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    let mut bytes = vec![0u8; n / 2];
    rng.fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// A version 4 UUID in hyphenated form.
pub fn uuid<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    ::uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// A dotted IPv4 address with each octet uniform over `0..=255`.
pub fn ip_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..4)
        .map(|_| (rng.gen_range(1..=256u16) - 1).to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// An email address `n` characters long at `domain`.
///
/// The account part fills whatever `n` leaves after `@domain`; it is empty
/// when the domain alone is too long.
pub fn email_address<R: Rng + ?Sized>(rng: &mut R, n: usize, domain: &str) -> String {
    let account_len = n.saturating_sub(1 + domain.chars().count());
    let account = pick(rng, EMAIL_ACCOUNT, account_len);
    format!("{}@{}", account, domain)
}
