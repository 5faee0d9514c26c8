use trainlog_core::{
    rows, FieldStatus, FormEvent, FormField, FormOutcome, InMemoryRecordRepository, RecordForm,
    RecordService, RowAction, SubmitOutcome,
};

fn service() -> RecordService<InMemoryRecordRepository> {
    RecordService::new(InMemoryRecordRepository::new())
}

fn fill(form: &mut RecordForm, date: &str, count: &str) {
    form.set_date_input(date);
    form.set_count_input(count);
}

#[test]
fn new_form_starts_with_valid_white_fields() {
    let form = RecordForm::new();
    assert_eq!(form.date_status(), FieldStatus::Valid);
    assert_eq!(form.count_status(), FieldStatus::Valid);
    assert_eq!(form.status(FormField::Date).background(), "white");
}

#[test]
fn invalid_date_flags_date_field_only() {
    let mut service = service();
    let mut form = RecordForm::new();
    fill(&mut form, "32.01.2024", "5");

    let outcome = form.submit(&mut service).unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected(FormField::Date));
    assert_eq!(form.date_status().background(), "red");
    assert_eq!(form.count_status(), FieldStatus::Valid);
    assert!(service.is_empty());
}

#[test]
fn zero_count_flags_count_field_and_clears_date_flag() {
    let mut service = service();
    let mut form = RecordForm::new();

    fill(&mut form, "bad", "5");
    form.submit(&mut service).unwrap();
    assert!(form.date_status().is_invalid());

    fill(&mut form, "10.05.2024", "0");
    let outcome = form.submit(&mut service).unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected(FormField::Count));
    assert_eq!(form.date_status(), FieldStatus::Valid);
    assert_eq!(form.count_status().background(), "red");
    assert!(service.is_empty());
}

#[test]
fn count_flag_is_untouched_while_date_is_invalid() {
    let mut service = service();
    let mut form = RecordForm::new();

    fill(&mut form, "10.05.2024", "");
    form.submit(&mut service).unwrap();
    assert!(form.count_status().is_invalid());

    // Count is now valid text, but the date check stops the submit first.
    fill(&mut form, "10.5.2024", "3");
    form.submit(&mut service).unwrap();
    assert!(form.date_status().is_invalid());
    assert!(form.count_status().is_invalid());
}

#[test]
fn valid_submit_saves_and_keeps_inputs() {
    let mut service = service();
    let mut form = RecordForm::new();
    fill(&mut form, "01.01.2024", "5");

    let outcome = form.handle(FormEvent::Submit, &mut service).unwrap();
    assert!(matches!(
        outcome,
        FormOutcome::Submitted(SubmitOutcome::Saved(_))
    ));
    assert_eq!(form.date_input(), "01.01.2024");
    assert_eq!(form.count_input(), "5");
    assert_eq!(service.len(), 1);
}

#[test]
fn rows_render_formatted_date_count_and_actions() {
    let mut service = service();
    let mut form = RecordForm::new();
    fill(&mut form, "01.01.2024", "5");
    form.submit(&mut service).unwrap();
    fill(&mut form, "15.03.2024", "10");
    form.submit(&mut service).unwrap();
    fill(&mut form, "01.01.2024", "3");
    form.submit(&mut service).unwrap();

    let rows = rows(&service.records().unwrap());
    let texts = rows
        .iter()
        .map(|row| (row.date_text.as_str(), row.count_text.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(texts, vec![("15.03.2024", "10"), ("01.01.2024", "8")]);
    assert_eq!(rows[0].actions, [RowAction::Edit, RowAction::Delete]);
    assert!(rows[0].actions[0].is_inert());
    assert!(!rows[0].actions[1].is_inert());
}

#[test]
fn delete_event_removes_row_by_displayed_date() {
    let mut service = service();
    let mut form = RecordForm::new();
    fill(&mut form, "01.01.2024", "5");
    form.submit(&mut service).unwrap();
    fill(&mut form, "02.01.2024", "1");
    form.submit(&mut service).unwrap();

    let row_date = rows(&service.records().unwrap())[1].date_text.clone();
    let outcome = form
        .handle(FormEvent::Delete { row_date }, &mut service)
        .unwrap();
    assert_eq!(outcome, FormOutcome::Deleted { removed: 1 });

    let remaining = rows(&service.records().unwrap());
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].date_text, "02.01.2024");
}

#[test]
fn edit_event_is_inert() {
    let mut service = service();
    let mut form = RecordForm::new();
    fill(&mut form, "01.01.2024", "5");
    form.submit(&mut service).unwrap();
    let before = service.records().unwrap();

    let outcome = form
        .handle(
            FormEvent::Edit {
                row_date: "01.01.2024".to_string(),
            },
            &mut service,
        )
        .unwrap();
    assert_eq!(outcome, FormOutcome::Ignored);
    assert_eq!(service.records().unwrap(), before);
}

#[test]
fn overflowing_merge_flags_count_field() {
    let mut service = service();
    let mut form = RecordForm::new();
    fill(&mut form, "01.01.2024", "1e308");
    form.submit(&mut service).unwrap();

    let outcome = form.submit(&mut service).unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected(FormField::Count));
    assert_eq!(form.date_status(), FieldStatus::Valid);
    assert!(form.count_status().is_invalid());
    assert_eq!(service.records().unwrap()[0].count.value(), 1e308);
}
