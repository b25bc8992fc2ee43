//! Integration tests for soft-delete, restore, and the trash listings.
//!
//! Exercises the repository layer to verify that:
//! - Soft-deleted entities are hidden from `find_by_id` and list queries
//! - Restoring makes an entity visible again with content intact
//! - `deleted_at` survives a restore; `restored_at` marks the transition
//! - Deleting an already-deleted entity matches nothing (returns `false`)
//! - The pattern is consistent across entity types (branch, agent, journal)

use chrono::NaiveDate;
use sqlx::PgPool;

use ledgerd_db::models::agent::CreateAgent;
use ledgerd_db::models::branch::CreateBranch;
use ledgerd_db::models::journals::CreateGeneralJournal;
use ledgerd_db::repositories::{AgentRepo, BranchRepo, GeneralJournalRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_branch(name: &str, digest: &str) -> CreateBranch {
    CreateBranch {
        name: name.to_string(),
        address: "123 Test Street".to_string(),
        tin: format!("ciphertext-{digest}"),
        tin_digest: digest.to_string(),
        machine_id: Some("MACHINE-01".to_string()),
    }
}

fn new_agent(code: &str, digest: &str) -> CreateAgent {
    CreateAgent {
        agent_code: code.to_string(),
        tin: format!("ciphertext-{digest}"),
        tin_digest: digest.to_string(),
        tax_classification: "individual".to_string(),
        registered_name: "Registered Name".to_string(),
        agent_name: "Agent Name".to_string(),
        trade_name: "Trade Name".to_string(),
        agent_type: "customer".to_string(),
        registration_type: "vat".to_string(),
        authorized_representative: None,
        address: "456 Test Avenue".to_string(),
        email: None,
        phone: None,
        fax: None,
        website: None,
    }
}

fn new_general_journal(jv_no: &str) -> CreateGeneralJournal {
    CreateGeneralJournal {
        date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        month: Some("March".to_string()),
        year: Some("2026".to_string()),
        jv_no: jv_no.to_string(),
        location_id: None,
        particular: "Test journal entry".to_string(),
        total_debit: Some("1000.00".to_string()),
        total_credit: Some("1000.00".to_string()),
        lines: None,
    }
}

// ---------------------------------------------------------------------------
// Branch lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_soft_delete_hides_from_find_by_id(pool: PgPool) {
    let branch = BranchRepo::create(&pool, &new_branch("Hidden Branch", "d1"))
        .await
        .unwrap();

    let deleted = BranchRepo::soft_delete(&pool, branch.id).await.unwrap();
    assert!(deleted, "soft_delete should return true on first call");

    let found = BranchRepo::find_by_id(&pool, branch.id).await.unwrap();
    assert!(
        found.is_none(),
        "find_by_id should return None for soft-deleted branch"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_soft_delete_hides_from_list(pool: PgPool) {
    let branch = BranchRepo::create(&pool, &new_branch("Listed Then Deleted", "d2"))
        .await
        .unwrap();

    let before = BranchRepo::list(&pool).await.unwrap();
    assert!(
        before.iter().any(|b| b.id == branch.id),
        "branch should appear in list before soft delete"
    );

    BranchRepo::soft_delete(&pool, branch.id).await.unwrap();

    let after = BranchRepo::list(&pool).await.unwrap();
    assert!(
        !after.iter().any(|b| b.id == branch.id),
        "branch should not appear in list after soft delete"
    );

    let deleted = BranchRepo::list_deleted(&pool).await.unwrap();
    assert!(
        deleted.iter().any(|b| b.id == branch.id),
        "branch should appear in the deleted listing"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_restore_preserves_content_and_stamps(pool: PgPool) {
    let branch = BranchRepo::create(&pool, &new_branch("Restore Me", "d3"))
        .await
        .unwrap();

    BranchRepo::soft_delete(&pool, branch.id).await.unwrap();
    let restored = BranchRepo::restore(&pool, branch.id).await.unwrap();
    assert!(restored, "restore should return true");

    let found = BranchRepo::find_by_id(&pool, branch.id)
        .await
        .unwrap()
        .expect("restored branch should be visible again");

    // Content is back to the pre-delete state.
    assert_eq!(found.name, "Restore Me");
    assert_eq!(found.address, branch.address);
    assert_eq!(found.tin, branch.tin);
    assert!(!found.is_deleted);

    // Both lifecycle stamps are now set: deleted_at is stale but kept.
    assert!(found.deleted_at.is_some(), "deleted_at must survive a restore");
    assert!(found.restored_at.is_some(), "restored_at must be stamped");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_already_deleted_matches_nothing(pool: PgPool) {
    let branch = BranchRepo::create(&pool, &new_branch("Delete Twice", "d4"))
        .await
        .unwrap();

    let first = BranchRepo::soft_delete(&pool, branch.id).await.unwrap();
    assert!(first, "first soft_delete should return true");

    let second = BranchRepo::soft_delete(&pool, branch.id).await.unwrap();
    assert!(
        !second,
        "second soft_delete should return false (already deleted)"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_restore_of_active_entity_matches_nothing(pool: PgPool) {
    let branch = BranchRepo::create(&pool, &new_branch("Never Deleted", "d5"))
        .await
        .unwrap();

    let restored = BranchRepo::restore(&pool, branch.id).await.unwrap();
    assert!(!restored, "restoring an active branch should return false");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_excludes_soft_deleted(pool: PgPool) {
    use ledgerd_db::models::branch::UpdateBranch;

    let branch = BranchRepo::create(&pool, &new_branch("No Updates After Delete", "d6"))
        .await
        .unwrap();
    BranchRepo::soft_delete(&pool, branch.id).await.unwrap();

    let update = UpdateBranch {
        name: Some("Should Not Apply".to_string()),
        ..Default::default()
    };
    let updated = BranchRepo::update(&pool, branch.id, &update).await.unwrap();
    assert!(updated.is_none(), "update must not touch a soft-deleted row");
}

// ---------------------------------------------------------------------------
// Other entity types share the pattern
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_tin_digest_lookup_ignores_deleted_agents(pool: PgPool) {
    let agent = AgentRepo::create(&pool, &new_agent("A-001", "shared-digest"))
        .await
        .unwrap();

    // Live agent is found by digest.
    let found = AgentRepo::find_by_tin_digest(&pool, "shared-digest", None)
        .await
        .unwrap();
    assert!(found.is_some());

    // After soft delete, the digest is free for reuse.
    AgentRepo::soft_delete(&pool, agent.id).await.unwrap();
    let found = AgentRepo::find_by_tin_digest(&pool, "shared-digest", None)
        .await
        .unwrap();
    assert!(
        found.is_none(),
        "TIN uniqueness pre-check must ignore soft-deleted rows"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_general_journal_lifecycle(pool: PgPool) {
    let entry = GeneralJournalRepo::create(&pool, &new_general_journal("JV-000123"))
        .await
        .unwrap();

    let deleted = GeneralJournalRepo::soft_delete(&pool, entry.id).await.unwrap();
    assert!(deleted);
    assert!(GeneralJournalRepo::find_by_id(&pool, entry.id)
        .await
        .unwrap()
        .is_none());

    let restored = GeneralJournalRepo::restore(&pool, entry.id).await.unwrap();
    assert!(restored);

    let found = GeneralJournalRepo::find_by_id(&pool, entry.id)
        .await
        .unwrap()
        .expect("restored journal entry should be visible");
    assert_eq!(found.jv_no, "JV-000123");
    assert_eq!(found.particular, "Test journal entry");
    assert!(found.deleted_at.is_some());
    assert!(found.restored_at.is_some());
}
