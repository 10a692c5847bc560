mod models;
mod orm;

use models::*;
use orm::Db;

fn main() {
    let users = UserQuerySet::new(Db::default())
        .id_in(vec![UserId(1), UserId(2)])
        .name_eq("ada".to_string())
        .email_is_not_null()
        .email_like("%@example.com")
        .status_ne(Status::Banned)
        .age_gte(18)
        .is_admin_eq(false)
        .type_starts_with("staff")
        .display_name_contains("a")
        .score_lt(10)
        .created_at_lte(std::time::SystemTime::now())
        .updated_at_is_null()
        .preload_profile()
        .preload_posts()
        .order_desc_by_score()
        .order_by("id")
        .limit(10)
        .offset(20)
        .all()
        .unwrap();
    assert!(users.is_empty());

    assert!(UserQuerySet::new(Db::default()).one().is_err());
    assert!(UserQuerySet::new(Db::default()).exists().unwrap());
    assert_eq!(PostQuerySet::new(Db::default()).title_eq("x".to_string()).delete_num(), Ok(2));

    let updated = UserQuerySet::new(Db::default())
        .age_lt(18)
        .get_updater()
        .set_age(18)
        .set_tags(vec!["minor".to_string()])
        .set_score(0)
        .update_num()
        .unwrap();
    assert_eq!(updated, 3);

    ProfileQuerySet::new(Db::default())
        .bio_is_null()
        .get_updater()
        .set_bio(Some("hi".to_string()))
        .update()
        .unwrap();

    assert_eq!(UserDBSchema::TAGS, "user_tags");
    assert_eq!(UserDBSchema::SCORE, "legacy \"score\" \\ v1");
    assert_eq!(UserDBSchema::DISPLAY_NAME, "display_name");
    assert_eq!(UserDBSchema::TYPE, "type");
    assert_eq!(UserDBSchema::CREATED_AT, "created_at");
    assert_eq!(ProfileDBSchema::BIO, "bio");
}
