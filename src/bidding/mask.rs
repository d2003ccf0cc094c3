/// 숫자만 남기기
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 전화번호 마스크: (DD) DDDD-DDDD 또는 (DD) DDDDD-DDDD
/// 11자리를 넘으면 숫자만 그대로 돌려준다.
pub fn mask_phone(input: &str) -> String {
    let digits = digits_only(input);
    let len = digits.len();

    match len {
        0 => String::new(),
        1..=2 => format!("({digits}"),
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        7..=11 => {
            let split = if len == 11 { 7 } else { 6 };
            format!(
                "({}) {}-{}",
                &digits[..2],
                &digits[2..split],
                &digits[split..]
            )
        }
        _ => digits,
    }
}
