use rgetorganized::core::percent::{
    capped_total, format_percent, parse_percent, percent_value, verify_weight,
};
use rgetorganized::errors::AppError;

#[test]
fn bare_numbers_become_percentages() {
    assert_eq!(parse_percent("85").unwrap(), "85%");
    assert_eq!(parse_percent("85.00").unwrap(), "85%");
    assert_eq!(parse_percent("85.5").unwrap(), "85.50%");
    assert_eq!(parse_percent(" 0 ").unwrap(), "0%");
}

#[test]
fn percent_suffix_is_normalized() {
    assert_eq!(parse_percent("42.5%").unwrap(), "42.50%");
    assert_eq!(parse_percent("100 %").unwrap(), "100%");
}

#[test]
fn fractions_are_divided() {
    assert_eq!(parse_percent("1/4").unwrap(), "25%");
    assert_eq!(parse_percent("17 / 20").unwrap(), "85%");
    assert_eq!(parse_percent("2/3").unwrap(), "66.67%");
    // a zero numerator short-circuits, even over zero
    assert_eq!(parse_percent("0/0").unwrap(), "0%");
}

#[test]
fn worded_fractions_are_divided() {
    assert_eq!(parse_percent("7 of 8").unwrap(), "87.50%");
    assert_eq!(parse_percent("2 out of 3").unwrap(), "66.67%");
}

#[test]
fn garbage_is_rejected() {
    for input in ["abc", "1/2/3", "5/0", "inf", "of", "12 out of", ""] {
        assert!(
            matches!(parse_percent(input), Err(AppError::InvalidGrade(_))),
            "'{}' should not parse",
            input
        );
    }
}

#[test]
fn formatted_values_read_back() {
    assert_eq!(percent_value("85.50%"), Some(85.5));
    assert_eq!(percent_value("--"), None);
    assert_eq!(format_percent(90.0), "90%");
    assert_eq!(format_percent(87.456), "87.46%");
}

#[test]
fn weights_must_fit_in_one_hundred_percent() {
    assert_eq!(verify_weight("40", 60.0).unwrap(), "40%");
    assert_eq!(verify_weight("1/3", 0.0).unwrap(), "33.33%");

    match verify_weight("50%", 60.0) {
        Err(AppError::WeightOverflow(total)) => assert_eq!(total, "110%"),
        other => panic!("expected overflow, got {:?}", other),
    }

    assert!(matches!(
        verify_weight("heavy", 0.0),
        Err(AppError::InvalidWeight(_))
    ));
    assert!(matches!(
        verify_weight("-10", 0.0),
        Err(AppError::InvalidWeight(_))
    ));
}

#[test]
fn displayed_total_is_capped() {
    assert_eq!(capped_total(120.0), 100.0);
    assert_eq!(capped_total(75.0), 75.0);
}
