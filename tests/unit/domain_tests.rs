use super::*;

#[test]
fn test_user_id_is_trimmed_and_bounded() {
    assert_eq!(UserId::parse("  bob ").unwrap().as_str(), "bob");
    assert!(UserId::parse("   ").is_err());
    assert!(UserId::parse(&"x".repeat(65)).is_err());
}

#[test]
fn test_record_rejects_impossible_values() {
    let user = UserId::parse("bob").unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let too_much_sleep = MetricReading { sleep_hours: 25.0, ..healthy_reading() };
    assert!(HealthMetricRecord::new(user.clone(), day, too_much_sleep).is_err());

    let negative_weight = MetricReading { weight_kg: -1.0, ..healthy_reading() };
    assert!(HealthMetricRecord::new(user.clone(), day, negative_weight).is_err());

    let not_a_number = MetricReading { blood_pressure: f64::NAN, ..healthy_reading() };
    assert!(HealthMetricRecord::new(user, day, not_a_number).is_err());
}

#[test]
fn test_record_keeps_reading() {
    let record = &days(1, healthy_reading())[0];
    assert_eq!(record.reading(), healthy_reading());
    assert_eq!(record.recorded_on, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
}

#[test]
fn test_age_is_calendar_year_difference() {
    // Birthday in March has not happened by January, but the year still counts
    let profile = profile_born(1974);
    assert_eq!(profile.age_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()), 50);
    assert_eq!(profile.age_on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), 50);
}

#[test]
fn test_gender_parsing() {
    assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
    assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
    assert!("unknown".parse::<Gender>().is_err());
}
