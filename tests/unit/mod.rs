/// Unit tests for the analysis core, driven through the public API
use chrono::NaiveDate;
use health_insights_mcp::*;

mod domain_tests;
mod insight_tests;

/// A healthy day: normal weight, blood pressure, sleep and activity
fn healthy_reading() -> MetricReading {
    MetricReading {
        weight_kg: 66.0,
        blood_pressure: 115.0,
        heart_rate: 64,
        sleep_hours: 7.5,
        steps: 9500,
        calories_burned: 2200,
    }
}

/// Records ordered newest first, the newest dated 2024-05-31
fn records(readings: impl IntoIterator<Item = MetricReading>) -> Vec<HealthMetricRecord> {
    let newest = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
    let user = UserId::parse("unit-user").unwrap();

    readings
        .into_iter()
        .enumerate()
        .map(|(i, reading)| {
            let day = newest - chrono::Duration::days(i as i64);
            HealthMetricRecord::new(user.clone(), day, reading).unwrap()
        })
        .collect()
}

fn days(n: usize, reading: MetricReading) -> Vec<HealthMetricRecord> {
    records(std::iter::repeat(reading).take(n))
}

fn profile_born(year: i32) -> UserProfile {
    UserProfile::new(
        UserId::parse("unit-user").unwrap(),
        NaiveDate::from_ymd_opt(year, 3, 15).unwrap(),
        None,
    )
    .unwrap()
}

fn assessment_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}
