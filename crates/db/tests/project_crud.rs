//! Integration tests for the project repository.

use chrono::{TimeZone, Utc};
use folio_core::project::normalize;
use folio_db::models::project::CreateProject;
use folio_db::repositories::ProjectRepo;
use sqlx::SqlitePool;

fn make_input(name: &str, sort_order: i64) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: "a project".to_string(),
        long_description: None,
        timeline: Some("Jan 2024 - Present".to_string()),
        tech_stack: vec!["React".to_string(), "Node".to_string()],
        live_href: None,
        source_href: Some("https://github.com/x/y".to_string()),
        icon_name: "FaGithub".to_string(),
        images: vec!["https://cdn/cover.png".to_string()],
        sort_order,
        grid_class: None,
    }
}

/// Insert a row with an explicit `created_at`, for ordering tests.
async fn insert_at(pool: &SqlitePool, name: &str, sort_order: i64, created_secs: i64) {
    sqlx::query(
        "INSERT INTO projects (name, description, sort_order, created_at)
         VALUES (?1, 'x', ?2, ?3)",
    )
    .bind(name)
    .bind(sort_order)
    .bind(Utc.timestamp_opt(created_secs, 0).unwrap())
    .execute(pool)
    .await
    .expect("insert should succeed");
}

#[sqlx::test(migrations = "./migrations")]
async fn create_assigns_id_and_created_at(pool: SqlitePool) {
    let row = ProjectRepo::create(&pool, &make_input("Billety", 1))
        .await
        .expect("create should succeed");

    assert!(row.id > 0);
    assert_eq!(row.name, "Billety");
    assert_eq!(row.tech_stack, r#"["React","Node"]"#);
    assert_eq!(row.images, r#"["https://cdn/cover.png"]"#);
    assert_eq!(row.sort_order, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn stored_row_normalizes_cleanly(pool: SqlitePool) {
    let row = ProjectRepo::create(&pool, &make_input("Billety", 0))
        .await
        .expect("create should succeed");

    let project = normalize(row.into_record());
    assert_eq!(project.tech_stack, vec!["React", "Node"]);
    assert_eq!(project.images, vec!["https://cdn/cover.png"]);
    assert_eq!(project.icon_name, "FaGithub");
    assert!(project.show_button_text, "source link should set the flag");
}

#[sqlx::test(migrations = "./migrations")]
async fn list_orders_by_weight_then_newest(pool: SqlitePool) {
    insert_at(&pool, "old-heavy", 1, 100).await;
    insert_at(&pool, "old-light", 0, 100).await;
    insert_at(&pool, "new-light", 0, 200).await;

    let rows = ProjectRepo::list_for_display(&pool)
        .await
        .expect("list should succeed");
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, vec!["new-light", "old-light", "old-heavy"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn equal_created_at_orders_by_weight(pool: SqlitePool) {
    insert_at(&pool, "weight-one", 1, 100).await;
    insert_at(&pool, "weight-zero", 0, 100).await;

    let rows = ProjectRepo::list_for_display(&pool)
        .await
        .expect("list should succeed");

    assert_eq!(rows[0].name, "weight-zero");
    assert_eq!(rows[1].name, "weight-one");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_the_row(pool: SqlitePool) {
    let row = ProjectRepo::create(&pool, &make_input("Doomed", 0))
        .await
        .expect("create should succeed");

    let deleted = ProjectRepo::delete(&pool, row.id)
        .await
        .expect("delete should succeed");
    assert!(deleted);

    let found = ProjectRepo::find_by_id(&pool, row.id)
        .await
        .expect("find should succeed");
    assert!(found.is_none());

    // Deleting again reports that nothing was removed.
    let deleted_again = ProjectRepo::delete(&pool, row.id)
        .await
        .expect("delete should succeed");
    assert!(!deleted_again);
}
