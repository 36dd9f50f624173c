use misis_id::error::ErrorKind;
use misis_id::presentation::student::{ProfileFields, StudentInfo};
use serde_json::json;

fn fields() -> ProfileFields {
    ProfileFields {
        full_name: Some(" Иванов Иван Иванович ".to_string()),
        faculty: Some("ИТКН".to_string()),
        group: Some("БИВТ-21-1".to_string()),
        course: Some("3".to_string()),
        specialization: Some("   ".to_string()),
        personal_email: Some("ivanov@example.com".to_string()),
        ..ProfileFields::default()
    }
}

#[test]
fn test_student_info_from_fields() {
    let student = StudentInfo::try_from(fields()).unwrap();
    assert_eq!(student.full_name(), "Иванов Иван Иванович");
    assert_eq!(student.faculty(), "ИТКН");
    assert_eq!(student.group(), "БИВТ-21-1");
    assert_eq!(student.course(), Some("3"));
    assert_eq!(student.specialization(), None);
    assert_eq!(student.personal_email(), Some("ivanov@example.com"));
    assert_eq!(student.record_book_number(), None);
}

#[test]
fn test_student_info_requires_name_group_faculty() {
    for field in ["full_name", "group", "faculty"] {
        let mut f = fields();
        match field {
            "full_name" => f.full_name = Some("  ".to_string()),
            "group" => f.group = None,
            _ => f.faculty = Some(String::new()),
        }
        let err = StudentInfo::try_from(f).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains(field), "{err}");
    }
}

#[test]
fn test_student_info_rejects_malformed_email() {
    let mut f = fields();
    f.corporate_email = Some("not-an-email".to_string());
    let err = StudentInfo::try_from(f).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("corporate_email"));
}

#[test]
fn test_student_info_new() {
    let student = StudentInfo::new("Петров Пётр", "МТМ-22-2", "ИНМиН").unwrap();
    assert_eq!(student.group(), "МТМ-22-2");
    assert!(StudentInfo::new("Петров Пётр", "", "ИНМиН").is_err());
}

#[test]
fn test_student_info_serialization_skips_absent_fields() {
    let student = StudentInfo::try_from(fields()).unwrap();
    let value = serde_json::to_value(&student).unwrap();
    assert_eq!(
        value,
        json!({
            "full_name": "Иванов Иван Иванович",
            "faculty": "ИТКН",
            "course": "3",
            "group": "БИВТ-21-1",
            "personal_email": "ivanov@example.com"
        })
    );
}

#[test]
fn test_student_info_deserialization_validates() {
    let student: StudentInfo = serde_json::from_value(json!({
        "full_name": "Сидорова Анна",
        "group": "БЭК-20-1",
        "faculty": "ЭУПП"
    }))
    .unwrap();
    assert_eq!(student.full_name(), "Сидорова Анна");

    let result = serde_json::from_value::<StudentInfo>(json!({
        "full_name": "Сидорова Анна",
        "group": "",
        "faculty": "ЭУПП"
    }));
    assert!(result.is_err());
}

#[test]
fn test_student_info_entries_in_display_order() {
    let student = StudentInfo::try_from(fields()).unwrap();
    let labels: Vec<&str> = student.entries().into_iter().map(|(l, _)| l).collect();
    assert_eq!(
        labels,
        vec!["Full name", "Faculty", "Course", "Group", "Personal email"]
    );
}

#[test]
fn test_student_info_display_and_debug() {
    let student = StudentInfo::new("Петров Пётр", "МТМ-22-2", "ИНМиН").unwrap();
    assert!(student.to_string().contains("МТМ-22-2"));
    assert!(format!("{student:?}").contains("ИНМиН"));
}
