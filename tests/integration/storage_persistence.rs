use super::*;
use chrono::NaiveDate;

fn reading(weight_kg: f64) -> MetricReading {
    MetricReading {
        weight_kg,
        blood_pressure: 121.0,
        heart_rate: 68,
        sleep_hours: 6.5,
        steps: 7000,
        calories_burned: 2000,
    }
}

#[test]
fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("health.db");
    let user = UserId::parse("carol").unwrap();

    {
        let storage = SqliteStorage::new(db_path.clone()).unwrap();
        for day in 1..=3 {
            let date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
            let record = HealthMetricRecord::new(user.clone(), date, reading(60.0 + day as f64)).unwrap();
            storage.insert_metric(&record).unwrap();
        }
        let profile = UserProfile::new(
            user.clone(),
            NaiveDate::from_ymd_opt(1970, 7, 4).unwrap(),
            Some(Gender::Female),
        )
        .unwrap();
        storage.upsert_profile(&profile).unwrap();
    }

    let storage = SqliteStorage::new(db_path).unwrap();
    let records = storage
        .fetch_recent_metrics(&user, 30, DateOrder::NewestFirst)
        .unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].weight_kg, 63.0);

    let profile = storage.fetch_user_profile(&user).unwrap().unwrap();
    assert_eq!(profile.gender, Some(Gender::Female));

    let report = AnalyticsEngine::new().health_insights(&storage, &user).unwrap();
    assert_eq!(report.insights.len(), 2);
    assert_eq!(report.recommendations.len(), 1);
}

#[test]
fn test_server_opens_on_existing_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("health.db");

    for _ in 0..2 {
        let server = tokio_test::block_on(HealthInsightsServer::new(db_path.clone()));
        assert!(server.is_ok());
    }
}

#[test]
fn test_users_are_isolated() {
    let storage = SqliteStorage::in_memory().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

    for name in ["dave", "erin"] {
        let user = UserId::parse(name).unwrap();
        storage
            .insert_metric(&HealthMetricRecord::new(user, date, reading(70.0)).unwrap())
            .unwrap();
    }

    let dave = UserId::parse("dave").unwrap();
    let records = storage.fetch_recent_metrics(&dave, 7, DateOrder::NewestFirst).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, dave);
    assert!(storage.fetch_user_profile(&dave).unwrap().is_none());
}
