//! PostgreSQL adapter against a live server. Opt-in:
//! `DATABASE_URL=postgres://... cargo test --test postgres_mapper_test -- --ignored`

use chrono::FixedOffset;
use sqlx::postgres::{PgPool, PgPoolOptions};
use teacher_helper::query::{FieldFilter, PageRequest};
use teacher_helper::{apply_migrations, CourseMapper, CourseRecord, Mapper, Record, UserMapper, UserRecord};

/// Pool plus a fresh schema for one test; `None` when DATABASE_URL is unset.
async fn test_schema(name: &str) -> Option<(PgPool, String)> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("SKIP: set DATABASE_URL to run PostgreSQL mapper tests");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to DATABASE_URL");
    let schema = format!("th_test_{}_{}", name, std::process::id());
    sqlx::query(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", schema))
        .execute(&pool)
        .await
        .unwrap();
    apply_migrations(&pool, &schema).await.expect("migrations");
    Some((pool, schema))
}

async fn drop_schema(pool: &PgPool, schema: &str) {
    sqlx::query(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", schema))
        .execute(pool)
        .await
        .unwrap();
}

fn course(name: &str, college_id: i64, credit: i32) -> CourseRecord {
    CourseRecord {
        course_name: Some(name.into()),
        college_id: Some(college_id),
        credit: Some(credit),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set DATABASE_URL and run with --ignored"]
async fn course_rows_round_trip_through_every_column_type() {
    let Some((pool, schema)) = test_schema("course").await else {
        return;
    };
    let mapper = CourseMapper::new(pool.clone(), schema.clone());
    mapper.ping().await.unwrap();

    let stored = mapper.insert(course("Compilers", 7, 4)).await.unwrap();
    let id = stored.course_id.expect("identity column assigns an id");
    assert_eq!(stored.course_name.as_deref(), Some("Compilers"));
    assert_eq!(stored.college_id, Some(7));
    assert_eq!(stored.credit, Some(4));
    assert!(stored.created_at.is_some());
    assert_eq!(mapper.find_by_id(id).await.unwrap(), Some(stored.clone()));

    let mut changed = stored.clone();
    changed.credit = None;
    let updated = mapper.update(changed).await.unwrap().unwrap();
    assert_eq!(updated.credit, None);
    assert_eq!(updated.created_at, stored.created_at);

    let mut ghost = course("Ghost", 7, 1);
    ghost.course_id = Some(id + 1000);
    assert!(mapper.update(ghost).await.unwrap().is_none());

    assert!(mapper.delete(id).await.unwrap());
    assert!(!mapper.delete(id).await.unwrap());
    assert!(mapper.find_by_id(id).await.unwrap().is_none());

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set DATABASE_URL and run with --ignored"]
async fn filters_page_in_id_order_and_match_timestamps_by_instant() {
    let Some((pool, schema)) = test_schema("filter").await else {
        return;
    };
    let mapper = CourseMapper::new(pool.clone(), schema.clone());
    for (name, college) in [("A", 1), ("B", 2), ("C", 1), ("D", 1)] {
        mapper.insert(course(name, college, 3)).await.unwrap();
    }

    let by_college = FieldFilter::parse(&CourseRecord::TABLE, Some("collegeId"), Some("1"))
        .unwrap()
        .unwrap();
    let page = mapper
        .find_by_filter(Some(&by_college), PageRequest { page: 2, limit: 2 })
        .await
        .unwrap();
    let names: Vec<_> = page.iter().filter_map(|c| c.course_name.as_deref()).collect();
    assert_eq!(names, vec!["D"]);

    let first = mapper
        .find_by_filter(None, PageRequest::first())
        .await
        .unwrap()
        .remove(0);
    let shifted = first
        .created_at
        .unwrap()
        .with_timezone(&FixedOffset::east_opt(8 * 3600).unwrap())
        .to_rfc3339();
    let by_created = FieldFilter::parse(&CourseRecord::TABLE, Some("createdAt"), Some(&shifted))
        .unwrap()
        .unwrap();
    let matched = mapper
        .find_by_filter(Some(&by_created), PageRequest::default())
        .await
        .unwrap();
    assert!(matched.iter().any(|c| c.course_id == first.course_id));

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set DATABASE_URL and run with --ignored"]
async fn user_text_filters_bind_as_strings() {
    let Some((pool, schema)) = test_schema("user").await else {
        return;
    };
    let mapper = UserMapper::new(pool.clone(), schema.clone());
    let user = mapper
        .insert(UserRecord {
            user_name: Some("zhang".into()),
            email: Some("zhang@example.edu".into()),
            college_id: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();

    let filter = FieldFilter::parse(&UserRecord::TABLE, Some("email"), Some("zhang@example.edu"))
        .unwrap()
        .unwrap();
    let rows = mapper
        .find_by_filter(Some(&filter), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(rows, vec![user]);

    drop_schema(&pool, &schema).await;
}
