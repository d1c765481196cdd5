//! End-to-end tests driving the taxonomy service through the real SQLite
//! repository: temp database, migrations, pooled reads, single-writer writes.

use std::sync::Arc;

use markops_core::errors::Error;
use markops_core::posts::{NewPost, PostRepositoryTrait};
use markops_core::taxonomy::{
    CategoryLevel, DeleteResolution, NewCategory, TaxonomyService, TaxonomyServiceTrait,
};
use markops_storage_sqlite::posts::PostRepository;
use markops_storage_sqlite::taxonomy::TaxonomyRepository;
use markops_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

struct TestDb {
    // Holds the temp dir open for the lifetime of the test.
    _dir: tempfile::TempDir,
    taxonomy: TaxonomyService,
    posts: PostRepository,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = init(dir.path().to_str().expect("utf-8 temp path")).expect("init db");
    let pool = create_pool(&db_path).expect("create pool");
    run_migrations(&pool).expect("run migrations");
    let writer = spawn_writer(&pool).expect("spawn writer");

    let repository = Arc::new(TaxonomyRepository::new(pool.clone(), writer.clone()));
    let taxonomy = TaxonomyService::new(repository);
    let posts = PostRepository::new(pool, writer);

    TestDb {
        _dir: dir,
        taxonomy,
        posts,
    }
}

async fn seed_branch(db: &TestDb) -> (String, String, String) {
    let main = db
        .taxonomy
        .create_category(NewCategory {
            id: None,
            name: "Electronics".to_string(),
            parent_id: None,
        })
        .await
        .expect("create main");
    let sub = db
        .taxonomy
        .create_category(NewCategory {
            id: None,
            name: "Audio".to_string(),
            parent_id: Some(main.id.clone()),
        })
        .await
        .expect("create sub");
    let brand = db
        .taxonomy
        .create_category(NewCategory {
            id: None,
            name: "Sonos".to_string(),
            parent_id: Some(sub.id.clone()),
        })
        .await
        .expect("create brand");
    (main.id, sub.id, brand.id)
}

#[tokio::test]
async fn create_and_read_back_assigns_levels() {
    let db = setup();
    let (main_id, sub_id, brand_id) = seed_branch(&db).await;

    let tree = db.taxonomy.get_category_tree().expect("tree");
    assert_eq!(tree.len(), 1);
    let main = &tree[0];
    assert_eq!(main.category.id, main_id);
    assert_eq!(main.level, CategoryLevel::Main);
    assert_eq!(main.children[0].category.id, sub_id);
    assert_eq!(main.children[0].level, CategoryLevel::Sub);
    assert_eq!(main.children[0].children[0].category.id, brand_id);
    assert_eq!(main.children[0].children[0].level, CategoryLevel::Brand);
}

#[tokio::test]
async fn counts_roll_up_the_branch_and_split_by_level() {
    let db = setup();
    let (main_id, sub_id, brand_id) = seed_branch(&db).await;

    // One post tagged down to the brand, one stopping at the sub level.
    db.posts
        .create_post(NewPost {
            title: "Speaker launch".to_string(),
            main_category_id: Some(main_id.clone()),
            sub_category_id: Some(sub_id.clone()),
            brand_type_id: Some(brand_id.clone()),
            ..Default::default()
        })
        .await
        .expect("create post");
    db.posts
        .create_post(NewPost {
            title: "Audio roundup".to_string(),
            main_category_id: Some(main_id.clone()),
            sub_category_id: Some(sub_id.clone()),
            ..Default::default()
        })
        .await
        .expect("create post");

    assert_eq!(db.taxonomy.get_branch_count(&main_id).expect("count"), 2);
    assert_eq!(db.taxonomy.get_branch_count(&sub_id).expect("count"), 2);
    assert_eq!(db.taxonomy.get_branch_count(&brand_id).expect("count"), 1);

    assert_eq!(
        db.taxonomy.get_strict_level_count(&main_id).expect("count"),
        0
    );
    assert_eq!(
        db.taxonomy.get_strict_level_count(&sub_id).expect("count"),
        1
    );
    assert_eq!(
        db.taxonomy
            .get_strict_level_count(&brand_id)
            .expect("count"),
        1
    );
}

#[tokio::test]
async fn recursive_purge_deletes_subtree_and_reports_orphans() {
    let db = setup();
    let (main_id, sub_id, brand_id) = seed_branch(&db).await;

    db.posts
        .create_post(NewPost {
            title: "Speaker launch".to_string(),
            main_category_id: Some(main_id.clone()),
            sub_category_id: Some(sub_id.clone()),
            brand_type_id: Some(brand_id.clone()),
            ..Default::default()
        })
        .await
        .expect("create post");

    let plan = db
        .taxonomy
        .delete_category(&sub_id, DeleteResolution::RecursivePurge)
        .await
        .expect("purge");
    assert_eq!(plan.deleted_ids.len(), 2);
    assert!(plan.deleted_ids.contains(&sub_id));
    assert!(plan.deleted_ids.contains(&brand_id));
    assert!(plan.reparented.is_empty());

    // The post row is untouched; its dangling tags show up as orphans.
    let orphans = db.taxonomy.get_orphaned_refs().expect("orphans");
    let orphan_ids: Vec<&str> = orphans.iter().map(|o| o.category_id.as_str()).collect();
    assert!(orphan_ids.contains(&sub_id.as_str()));
    assert!(orphan_ids.contains(&brand_id.as_str()));
    assert!(!orphan_ids.contains(&main_id.as_str()));
}

#[tokio::test]
async fn reassign_children_moves_them_under_the_new_parent() {
    let db = setup();
    let (main_id, sub_id, brand_id) = seed_branch(&db).await;
    let other_sub = db
        .taxonomy
        .create_category(NewCategory {
            id: None,
            name: "Video".to_string(),
            parent_id: Some(main_id.clone()),
        })
        .await
        .expect("create sub");

    let plan = db
        .taxonomy
        .delete_category(
            &sub_id,
            DeleteResolution::ReassignChildren(Some(other_sub.id.clone())),
        )
        .await
        .expect("reassign");
    assert_eq!(plan.deleted_ids, vec![sub_id]);
    assert_eq!(plan.reparented.len(), 1);

    let brand = db
        .taxonomy
        .get_category(&brand_id)
        .expect("read")
        .expect("brand survives");
    assert_eq!(brand.parent_id.as_deref(), Some(other_sub.id.as_str()));
}

#[tokio::test]
async fn reassign_to_root_promotes_children() {
    let db = setup();
    let (main_id, sub_id, _brand_id) = seed_branch(&db).await;

    db.taxonomy
        .delete_category(&main_id, DeleteResolution::ReassignChildren(None))
        .await
        .expect("reassign to root");

    let sub = db
        .taxonomy
        .get_category(&sub_id)
        .expect("read")
        .expect("sub survives");
    assert_eq!(sub.parent_id, None);
}

#[tokio::test]
async fn simple_delete_refuses_categories_with_children() {
    let db = setup();
    let (main_id, _sub_id, brand_id) = seed_branch(&db).await;

    let err = db
        .taxonomy
        .delete_category(&main_id, DeleteResolution::SimpleDelete)
        .await
        .expect_err("must refuse");
    assert!(matches!(err, Error::Validation(_)));

    // A leaf deletes fine.
    let plan = db
        .taxonomy
        .delete_category(&brand_id, DeleteResolution::SimpleDelete)
        .await
        .expect("delete leaf");
    assert_eq!(plan.deleted_ids, vec![brand_id]);
}

#[tokio::test]
async fn reassignment_targets_exclude_subtree_and_brands() {
    let db = setup();
    let (main_id, sub_id, brand_id) = seed_branch(&db).await;
    let other_main = db
        .taxonomy
        .create_category(NewCategory {
            id: None,
            name: "Apparel".to_string(),
            parent_id: None,
        })
        .await
        .expect("create main");

    let targets = db
        .taxonomy
        .get_reassignment_targets(&sub_id)
        .expect("targets");
    let target_ids: Vec<&str> = targets.iter().map(|c| c.id.as_str()).collect();
    assert!(target_ids.contains(&main_id.as_str()));
    assert!(target_ids.contains(&other_main.id.as_str()));
    assert!(!target_ids.contains(&sub_id.as_str()));
    assert!(!target_ids.contains(&brand_id.as_str()));
}

#[tokio::test]
async fn create_under_brand_is_rejected() {
    let db = setup();
    let (_main_id, _sub_id, brand_id) = seed_branch(&db).await;

    let err = db
        .taxonomy
        .create_category(NewCategory {
            id: None,
            name: "Too deep".to_string(),
            parent_id: Some(brand_id),
        })
        .await
        .expect_err("must refuse fourth level");
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn rename_persists_and_bumps_nothing_else() {
    let db = setup();
    let (main_id, _sub_id, _brand_id) = seed_branch(&db).await;

    let renamed = db
        .taxonomy
        .rename_category(&main_id, "Consumer Electronics")
        .await
        .expect("rename");
    assert_eq!(renamed.name, "Consumer Electronics");

    let read_back = db
        .taxonomy
        .get_category(&main_id)
        .expect("read")
        .expect("still there");
    assert_eq!(read_back.name, "Consumer Electronics");
    assert_eq!(read_back.parent_id, None);
}
