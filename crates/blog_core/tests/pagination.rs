use blog_core::db::open_db_in_memory;
use blog_core::{
    CommentInput, CommentRepository, PostInput, PostService, ServiceError,
    SqliteCommentRepository, SqlitePostRepository,
};
use rusqlite::Connection;

fn service(
    conn: &Connection,
) -> PostService<SqlitePostRepository<'_>, SqliteCommentRepository<'_>> {
    PostService::new(
        SqlitePostRepository::try_new(conn).unwrap(),
        SqliteCommentRepository::try_new(conn).unwrap(),
    )
}

fn seed_posts(
    service: &PostService<SqlitePostRepository<'_>, SqliteCommentRepository<'_>>,
    titles: &[&str],
) {
    for title in titles {
        service
            .create_post(&PostInput {
                title: title.to_string(),
                description: format!("{title} description text"),
                content: format!("{title} content"),
            })
            .unwrap();
    }
}

#[test]
fn five_posts_in_pages_of_two() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    seed_posts(&service, &["p1", "p2", "p3", "p4", "p5"]);

    let first = service.get_all_posts(0, 2, "id", "asc").unwrap();
    assert_eq!(first.number_of_elements, 2);
    assert_eq!(first.total_elements, 5);
    assert_eq!(first.total_pages, 3);
    assert!(first.first_page);
    assert!(!first.last_page);
    assert!(first.has_next);
    assert!(!first.has_previous);

    let middle = service.get_all_posts(1, 2, "id", "asc").unwrap();
    assert_eq!(middle.number_of_elements, 2);
    assert!(!middle.first_page);
    assert!(!middle.last_page);
    assert!(middle.has_next);
    assert!(middle.has_previous);

    let last = service.get_all_posts(2, 2, "id", "asc").unwrap();
    assert_eq!(last.number_of_elements, 1);
    assert_eq!(last.content[0].title, "p5");
    assert!(!last.first_page);
    assert!(last.last_page);
    assert!(!last.has_next);
    assert!(last.has_previous);
    assert!(last.has_content);

    let beyond = service.get_all_posts(3, 2, "id", "asc").unwrap();
    assert!(beyond.empty);
    assert!(!beyond.has_content);
}

#[test]
fn sorts_by_field_and_direction() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    seed_posts(&service, &["banana", "apple", "cherry"]);

    let ascending: Vec<_> = service
        .get_all_posts(0, 10, "title", "asc")
        .unwrap()
        .content
        .into_iter()
        .map(|post| post.title)
        .collect();
    assert_eq!(ascending, vec!["apple", "banana", "cherry"]);

    let descending: Vec<_> = service
        .get_all_posts(0, 10, "title", "DESC")
        .unwrap()
        .content
        .into_iter()
        .map(|post| post.title)
        .collect();
    assert_eq!(descending, vec!["cherry", "banana", "apple"]);

    let by_id_desc: Vec<_> = service
        .get_all_posts(0, 10, "id", "Desc")
        .unwrap()
        .content
        .into_iter()
        .map(|post| post.title)
        .collect();
    assert_eq!(by_id_desc, vec!["cherry", "apple", "banana"]);
}

#[test]
fn page_embeds_each_posts_comments() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    seed_posts(&service, &["first", "second"]);
    let comments = SqliteCommentRepository::try_new(&conn).unwrap();
    comments
        .create_comment(
            2,
            &CommentInput {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                body: "nice second post".to_string(),
            },
        )
        .unwrap();

    let page = service.get_all_posts(0, 10, "id", "asc").unwrap();
    assert!(page.content[0].comments.is_empty());
    assert_eq!(page.content[1].comments.len(), 1);
    assert_eq!(
        page.content[1].comments[0].post_title.as_deref(),
        Some("second")
    );
}

#[test]
fn rejects_unknown_sort_field_and_bad_page_size() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert!(matches!(
        service.get_all_posts(0, 10, "author", "asc"),
        Err(ServiceError::InvalidPageRequest(_))
    ));
    assert!(matches!(
        service.get_all_posts(0, 0, "id", "asc"),
        Err(ServiceError::InvalidPageRequest(_))
    ));
}

#[test]
fn empty_store_page() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let page = service.get_all_posts(0, 10, "id", "asc").unwrap();
    assert_eq!(page.total_elements, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.empty);
    assert!(page.first_page);
    assert!(page.last_page);
}
