use crate::corpus::parse_duration;

#[test]
fn clock_format_is_converted() {
    assert_eq!(parse_duration("01:02:03"), 3723);
    assert_eq!(parse_duration("1:00:00"), 3600);
}

#[test]
fn leading_seconds_win_over_parenthetical_form() {
    // The bracketed form repeats the same amount; it must not be added twice.
    assert_eq!(parse_duration("1229s (20m29s)"), 1229);
    assert_eq!(parse_duration("45 s"), 45);
}

#[test]
fn unit_tokens_are_summed() {
    assert_eq!(parse_duration("1h 2m 3s"), 3723);
    assert_eq!(parse_duration("20m29s"), 1229);
    assert_eq!(parse_duration("2h"), 7200);
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(parse_duration("1H 2M 3S"), 3723);
    assert_eq!(parse_duration("  90S  "), 90);
}

#[test]
fn unparseable_input_is_zero() {
    assert_eq!(parse_duration(""), 0);
    assert_eq!(parse_duration("   "), 0);
    assert_eq!(parse_duration("garbage"), 0);
}

#[test]
fn oversized_numbers_do_not_panic() {
    assert_eq!(parse_duration("99999999999999999999999s"), 0);
    assert_eq!(parse_duration(&format!("{}h", u64::MAX)), u64::MAX);
}

#[test]
fn only_ascii_digits_count() {
    assert_eq!(parse_duration("０1:02:03"), 0);
    assert_eq!(parse_duration("１２s"), 0);
}
