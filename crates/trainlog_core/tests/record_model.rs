use trainlog_core::{CalendarDate, Distance, Record, RecordValidationError};
use uuid::Uuid;

fn date(text: &str) -> CalendarDate {
    CalendarDate::parse(text).unwrap()
}

#[test]
fn record_new_generates_non_nil_unique_ids() {
    let first = Record::new(date("01.01.2024"), Distance::new(5.0).unwrap());
    let second = Record::new(date("01.01.2024"), Distance::new(5.0).unwrap());

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert_eq!(first.display_date(), "01.01.2024");
}

#[test]
fn merge_adds_distance_and_keeps_id() {
    let mut record = Record::new(date("01.01.2024"), Distance::new(5.0).unwrap());
    let id = record.id;

    record.merge(Distance::new(3.0).unwrap()).unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.count.value(), 8.0);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Record::with_id(Uuid::nil(), date("01.01.2024"), Distance::new(1.0).unwrap())
        .unwrap_err();
    assert_eq!(err, RecordValidationError::NilId);
}

#[test]
fn record_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let record = Record::with_id(id, date("15.03.2024"), Distance::new(10.5).unwrap()).unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["date"], "15.03.2024");
    assert_eq!(json["count"], 10.5);

    let decoded: Record = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn deserialize_rejects_invalid_records() {
    let nil_id = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "date": "15.03.2024",
        "count": 1.0
    });
    let err = serde_json::from_value::<Record>(nil_id).unwrap_err();
    assert!(err.to_string().contains("nil"), "unexpected error: {err}");

    let zero_count = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "date": "15.03.2024",
        "count": 0.0
    });
    let err = serde_json::from_value::<Record>(zero_count).unwrap_err();
    assert!(err.to_string().contains("zero"), "unexpected error: {err}");
}
