use super::*;

fn course(title: &str) -> Course {
    Course { id: Uuid::new_v4(), title: title.into(), language: "ja".into(), level: "A1".into() }
}

fn word(term: &str, translation: &str) -> Word {
    Word { id: Uuid::new_v4(), term: term.into(), translation: translation.into(), reading: None }
}

fn lesson(course_id: Uuid, position: u32) -> Lesson {
    Lesson { id: Uuid::new_v4(), course_id, title: format!("Lesson {position}"), position, body: String::new() }
}

#[tokio::test]
async fn fetch_courses_pages_through_catalogue() {
    let fixture = Fixture { courses: (0..5).map(|i| course(&format!("C{i}"))).collect(), ..Fixture::default() };
    let api = InMemoryApi::new(fixture).with_per_page(2);

    let (page_one, pagination) = api.fetch_courses(1).await.unwrap();
    assert_eq!(page_one.len(), 2);
    assert_eq!(pagination.total, 5);
    assert_eq!(pagination.page_count(), 3);
    assert!(pagination.has_next());

    let (last, pagination) = api.fetch_courses(3).await.unwrap();
    assert_eq!(last.len(), 1);
    assert!(!pagination.has_next());
}

#[tokio::test]
async fn fetch_lessons_orders_by_position() {
    let c = course("Japanese");
    let fixture = Fixture {
        courses: vec![c.clone()],
        lessons: vec![
            LessonRecord { lesson: lesson(c.id, 2), vocabulary: vec![] },
            LessonRecord { lesson: lesson(c.id, 1), vocabulary: vec![] },
        ],
        ..Fixture::default()
    };
    let api = InMemoryApi::new(fixture);

    let lessons = api.fetch_lessons(c.id).await.unwrap();
    assert_eq!(lessons.iter().map(|l| l.position).collect::<Vec<_>>(), vec![1, 2]);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let api = InMemoryApi::new(Fixture::default());
    let id = Uuid::new_v4();

    assert_eq!(api.fetch_lesson(id).await, Err(ApiError::NotFound { kind: "lesson", id }));
    assert_eq!(api.fetch_lessons(id).await, Err(ApiError::NotFound { kind: "course", id }));
}

#[tokio::test]
async fn search_vocabulary_covers_lesson_words_without_duplicates() {
    let c = course("Japanese");
    let shared = word("ねこ", "cat");
    let fixture = Fixture {
        courses: vec![c.clone()],
        lessons: vec![LessonRecord { lesson: lesson(c.id, 1), vocabulary: vec![shared.clone(), word("いぬ", "dog")] }],
        words: vec![shared.clone()],
        ..Fixture::default()
    };
    let api = InMemoryApi::new(fixture);

    let hits = api.search_vocabulary("CAT").await.unwrap();
    assert_eq!(hits, vec![shared]);
    assert_eq!(api.search_vocabulary("").await.unwrap().len(), 2);
}

#[test]
fn fixture_parses_flattened_lessons() {
    let course_id = Uuid::new_v4();
    let lesson_id = Uuid::new_v4();
    let raw = format!(
        r#"{{
            "lessons": [{{
                "id": "{lesson_id}",
                "course_id": "{course_id}",
                "title": "Greetings",
                "position": 1,
                "body": "こんにちは",
                "vocabulary": []
            }}]
        }}"#
    );
    let api = InMemoryApi::from_json(&raw).unwrap();
    assert_eq!(api.fixture.lessons[0].lesson.title, "Greetings");
    assert!(api.lesson_index.contains_key(&lesson_id));
}
