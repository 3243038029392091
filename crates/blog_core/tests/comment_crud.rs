use blog_core::db::open_db_in_memory;
use blog_core::{
    CommentInput, CommentService, PostInput, PostRepository, ServiceError,
    SqliteCommentRepository, SqlitePostRepository,
};
use rusqlite::Connection;

fn post_input(title: &str) -> PostInput {
    PostInput {
        title: title.to_string(),
        description: format!("{title} description text"),
        content: format!("{title} content"),
    }
}

fn comment_input(name: &str) -> CommentInput {
    CommentInput {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        body: format!("{name} wrote a thoughtful remark"),
    }
}

fn service(
    conn: &Connection,
) -> CommentService<SqliteCommentRepository<'_>, SqlitePostRepository<'_>> {
    CommentService::new(
        SqliteCommentRepository::try_new(conn).unwrap(),
        SqlitePostRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn create_attaches_comment_with_post_title() {
    let conn = open_db_in_memory().unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let service = service(&conn);

    let post = posts.create_post(&post_input("Rust")).unwrap();
    let created = service
        .create_comment(&comment_input("Ann"), post.id)
        .unwrap();
    assert_eq!(created.name, "Ann");
    assert_eq!(created.post_title.as_deref(), Some("Rust"));

    let listed = service.get_comments_by_post_id(post.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].post_title.as_deref(), Some("Rust"));
}

#[test]
fn create_under_missing_post_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .create_comment(&comment_input("Ann"), 99)
        .unwrap_err();
    assert!(matches!(err, ServiceError::PostNotFound(99)));
}

#[test]
fn listing_unknown_post_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert!(service.get_comments_by_post_id(12345).unwrap().is_empty());
}

#[test]
fn listing_is_scoped_to_post_and_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let service = service(&conn);

    let a = posts.create_post(&post_input("Alpha")).unwrap();
    let b = posts.create_post(&post_input("Beta")).unwrap();
    let first = service.create_comment(&comment_input("Ann"), a.id).unwrap();
    service.create_comment(&comment_input("Bob"), b.id).unwrap();
    let third = service.create_comment(&comment_input("Cid"), a.id).unwrap();

    let ids: Vec<_> = service
        .get_comments_by_post_id(a.id)
        .unwrap()
        .into_iter()
        .map(|comment| comment.id)
        .collect();
    assert_eq!(ids, vec![first.id, third.id]);
}

#[test]
fn get_by_id_checks_existence_then_ownership() {
    let conn = open_db_in_memory().unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let service = service(&conn);

    let a = posts.create_post(&post_input("Alpha")).unwrap();
    let b = posts.create_post(&post_input("Beta")).unwrap();
    let comment = service.create_comment(&comment_input("Ann"), a.id).unwrap();

    let fetched = service.get_comment_by_id(a.id, comment.id).unwrap();
    assert_eq!(fetched.body, "Ann wrote a thoughtful remark");

    assert!(matches!(
        service.get_comment_by_id(b.id, comment.id),
        Err(ServiceError::InvalidRelation { post_id, comment_id })
            if post_id == b.id && comment_id == comment.id
    ));
    assert!(matches!(
        service.get_comment_by_id(999, comment.id),
        Err(ServiceError::PostNotFound(999))
    ));
    assert!(matches!(
        service.get_comment_by_id(a.id, 999),
        Err(ServiceError::CommentNotFound(999))
    ));
}

#[test]
fn update_and_delete_enforce_ownership() {
    let conn = open_db_in_memory().unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let service = service(&conn);

    let a = posts.create_post(&post_input("Alpha")).unwrap();
    let b = posts.create_post(&post_input("Beta")).unwrap();
    let comment = service.create_comment(&comment_input("Ann"), a.id).unwrap();

    assert!(matches!(
        service.update_comment(&comment_input("Eve"), b.id, comment.id),
        Err(ServiceError::InvalidRelation { .. })
    ));
    assert!(matches!(
        service.delete_comment(b.id, comment.id),
        Err(ServiceError::InvalidRelation { .. })
    ));

    let updated = service
        .update_comment(&comment_input("Eve"), a.id, comment.id)
        .unwrap();
    assert_eq!(updated.id, comment.id);
    assert_eq!(updated.name, "Eve");
    assert_eq!(updated.email, "eve@example.com");
    assert_eq!(updated.post_title.as_deref(), Some("Alpha"));

    service.delete_comment(a.id, comment.id).unwrap();
    assert!(matches!(
        service.get_comment_by_id(a.id, comment.id),
        Err(ServiceError::CommentNotFound(_))
    ));
}

#[test]
fn update_and_delete_report_missing_post_before_missing_comment() {
    let conn = open_db_in_memory().unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let service = service(&conn);

    let post = posts.create_post(&post_input("Alpha")).unwrap();
    let comment = service.create_comment(&comment_input("Ann"), post.id).unwrap();

    assert!(matches!(
        service.update_comment(&comment_input("Eve"), 999, comment.id),
        Err(ServiceError::PostNotFound(999))
    ));
    assert!(matches!(
        service.delete_comment(999, comment.id),
        Err(ServiceError::PostNotFound(999))
    ));
    assert!(matches!(
        service.update_comment(&comment_input("Eve"), 999, 999),
        Err(ServiceError::PostNotFound(999))
    ));
    assert!(matches!(
        service.update_comment(&comment_input("Eve"), post.id, 999),
        Err(ServiceError::CommentNotFound(999))
    ));
    assert!(matches!(
        service.delete_comment(post.id, 999),
        Err(ServiceError::CommentNotFound(999))
    ));

    let untouched = service.get_comment_by_id(post.id, comment.id).unwrap();
    assert_eq!(untouched.name, "Ann");
}

#[test]
fn invalid_comment_input_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let service = service(&conn);

    let post = posts.create_post(&post_input("Alpha")).unwrap();
    let mut input = comment_input("Ann");
    input.email = "ann-at-example".to_string();

    assert!(matches!(
        service.create_comment(&input, post.id),
        Err(ServiceError::Validation(errors)) if errors.field_errors().contains_key("email")
    ));
    assert!(service.get_comments_by_post_id(post.id).unwrap().is_empty());
}
