// Small helpers shared by the model and the screens

use rand::Rng;

const REFERRAL_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const REFERRAL_CODE_LEN: usize = 6;

/// Wall clock in epoch milliseconds (JS `Date` on wasm).
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Remaining boost time as `m:ss`; empty once expired.
pub fn format_remaining(expiry_ms: i64, now_ms: i64) -> String {
    let remaining = expiry_ms.saturating_sub(now_ms).max(0);
    if remaining == 0 {
        return String::new();
    }
    let secs = remaining / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Thousands-separated amount, e.g. `12,345`.
pub fn format_amount(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn generate_referral_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..REFERRAL_CODE_LEN)
        .map(|_| REFERRAL_ALPHABET[rng.gen_range(0..REFERRAL_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn remaining_time_formats_minutes_and_seconds() {
        assert_eq!(format_remaining(1_000 + 125_000, 1_000), "2:05");
        assert_eq!(format_remaining(500, 1_000), "");
        assert_eq!(format_remaining(1_000, 1_000), "");
    }

    #[test]
    fn amounts_get_separators() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
        assert_eq!(format_amount(1_234_567), "1,234,567");
    }

    #[test]
    fn referral_codes_are_uppercase_base36() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let code = generate_referral_code(&mut rng);
            assert_eq!(code.len(), REFERRAL_CODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }
}
